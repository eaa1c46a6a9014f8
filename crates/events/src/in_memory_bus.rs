//! In-memory signal bus.

use std::sync::{Mutex, mpsc};

use crate::bus::{SignalBus, Subscription};

#[derive(Debug)]
pub enum InMemoryBusError {
    /// Publish failed due to internal lock poisoning.
    Poisoned,
}

/// In-memory pub/sub bus.
///
/// - No IO / no async
/// - Best-effort fan-out
/// - Dead subscribers are dropped on publish
#[derive(Debug)]
pub struct InMemorySignalBus<M> {
    subscribers: Mutex<Vec<mpsc::Sender<M>>>,
}

impl<M> InMemorySignalBus<M> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M> Default for InMemorySignalBus<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<M> SignalBus<M> for InMemorySignalBus<M>
where
    M: Clone + Send + 'static,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let mut subs = self
            .subscribers
            .lock()
            .map_err(|_| InMemoryBusError::Poisoned)?;

        // Drop any dead subscribers while publishing.
        subs.retain(|tx| tx.send(message.clone()).is_ok());

        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned, we still return a subscription;
        // it just won't receive messages until the process restarts.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_each_receive_published_messages() {
        let bus: InMemorySignalBus<u32> = InMemorySignalBus::new();
        let sub_a = bus.subscribe();
        let sub_b = bus.subscribe();

        bus.publish(7).unwrap();

        assert_eq!(sub_a.try_recv().unwrap(), 7);
        assert_eq!(sub_b.try_recv().unwrap(), 7);
    }

    #[test]
    fn dropped_subscribers_do_not_block_publishing() {
        let bus: InMemorySignalBus<u32> = InMemorySignalBus::new();
        let sub_a = bus.subscribe();
        {
            let _dead = bus.subscribe();
        }

        bus.publish(1).unwrap();
        bus.publish(2).unwrap();

        assert_eq!(sub_a.try_recv().unwrap(), 1);
        assert_eq!(sub_a.try_recv().unwrap(), 2);
    }

    #[test]
    fn subscription_only_sees_messages_after_subscribe() {
        let bus: InMemorySignalBus<&'static str> = InMemorySignalBus::new();
        bus.publish("early").unwrap();

        let sub = bus.subscribe();
        bus.publish("late").unwrap();

        assert_eq!(sub.try_recv().unwrap(), "late");
        assert!(sub.try_recv().is_err());
    }
}
