//! Event bus for broadcasting runtime events.
//!
//! [`Bus`] fans each [`Event`] out to per-subscriber bounded queues so that
//! worker actors and the supervisor can publish without ever blocking.
//!
//! - [`Bus::publish`] sends an event to all subscribers (non-blocking).
//! - [`Bus::subscribe`] creates a new receiver for consuming events.
//!
//! ## What it guarantees
//! - `publish(&Event)` returns immediately.
//! - Per-subscriber FIFO (queue order).
//!
//! ## What it does **not** guarantee
//! - No retries on per-subscriber queue overflow: the event is dropped for
//!   that subscriber only.
//! - No global ordering across different subscribers.

use std::sync::{Arc, Mutex, PoisonError};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::event::Event;

/// Broadcast channel for runtime events.
///
/// Cloning is cheap; clones share the subscriber list. Disconnected
/// subscribers are pruned lazily on the next publish.
#[derive(Clone)]
pub struct Bus {
    inner: Arc<BusInner>,
}

struct BusInner {
    subscribers: Mutex<Vec<Sender<Event>>>,
    capacity: usize,
}

impl Bus {
    /// Creates a new bus; each subscriber gets a queue of `capacity` events.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(BusInner {
                subscribers: Mutex::new(Vec::new()),
                capacity: capacity.max(1),
            }),
        }
    }

    /// Publishes an event to all subscribers without blocking.
    ///
    /// Full queues drop the event for that subscriber; disconnected
    /// subscribers are removed.
    pub fn publish(&self, ev: Event) {
        let mut subs = self
            .inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subs.retain(|tx| match tx.try_send(ev.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Disconnected(_)) => false,
        });
    }

    /// Subscribes to the bus and returns a new receiver.
    pub fn subscribe(&self) -> Receiver<Event> {
        let (tx, rx) = bounded(self.inner.capacity);
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Drops every subscriber sender so listener loops observe
    /// disconnection and exit. Called once during shutdown.
    pub(crate) fn close(&self) {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;

    #[test]
    fn test_publish_reaches_every_subscriber() {
        let bus = Bus::new(8);
        let rx_a = bus.subscribe();
        let rx_b = bus.subscribe();

        bus.publish(Event::now(EventKind::SimulationStarted));

        assert_eq!(rx_a.recv().unwrap().kind, EventKind::SimulationStarted);
        assert_eq!(rx_b.recv().unwrap().kind, EventKind::SimulationStarted);
    }

    #[test]
    fn test_full_queue_drops_without_blocking() {
        let bus = Bus::new(1);
        let rx = bus.subscribe();

        bus.publish(Event::now(EventKind::PauseRequested));
        bus.publish(Event::now(EventKind::PauseReached));

        assert_eq!(rx.recv().unwrap().kind, EventKind::PauseRequested);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_close_disconnects_subscribers() {
        let bus = Bus::new(8);
        let rx = bus.subscribe();
        bus.close();
        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let bus = Bus::new(8);
        let rx = bus.subscribe();
        drop(rx);
        // Publish twice: first prunes, second must still be a no-op.
        bus.publish(Event::now(EventKind::QuitRequested));
        bus.publish(Event::now(EventKind::QuitRequested));
    }
}
