use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::trace;

use super::{Callback, EventBus, Predicate, SubscriptionId};

struct Subscription<E> {
    predicate: Predicate<E>,
    callback: Callback<E>,
}

/// In-memory event bus for receipt pushes.
pub struct ReceiptBus<E> {
    subs: DashMap<SubscriptionId, Subscription<E>>,
    seq: AtomicU64,
}

impl<E> Default for ReceiptBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ReceiptBus<E> {
    pub fn new() -> Self {
        Self {
            subs: DashMap::new(),
            seq: AtomicU64::new(1),
        }
    }

    /// Deliver `event` to every matching subscription. Returns how many fired.
    pub fn publish(&self, event: &E) -> usize {
        // collect first: removing while iterating would deadlock the shard
        let matched: Vec<SubscriptionId> = self
            .subs
            .iter()
            .filter(|s| (s.value().predicate)(event))
            .map(|s| *s.key())
            .collect();

        let mut fired = 0;
        for id in matched {
            if let Some((_, sub)) = self.subs.remove(&id) {
                (sub.callback)(event);
                fired += 1;
            }
        }
        trace!(fired, "receipt published");
        fired
    }

    pub fn subscription_count(&self) -> usize {
        self.subs.len()
    }
}

impl<E: 'static> EventBus<E> for ReceiptBus<E> {
    fn subscribe(&self, predicate: Predicate<E>, callback: Callback<E>) -> SubscriptionId {
        let id = self.seq.fetch_add(1, Ordering::Relaxed);
        self.subs.insert(id, Subscription { predicate, callback });
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subs.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    use super::*;

    fn counter_sub(bus: &ReceiptBus<i32>, want: i32, hits: &Arc<AtomicUsize>) -> SubscriptionId {
        let hits = Arc::clone(hits);
        bus.subscribe(
            Box::new(move |e: &i32| *e == want),
            Box::new(move |_: &i32| {
                hits.fetch_add(1, Ordering::SeqCst);
            }),
        )
    }

    #[test]
    fn subscriptions_fire_once() {
        let bus = ReceiptBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        counter_sub(&bus, 1, &hits);
        counter_sub(&bus, 2, &hits);

        assert_eq!(bus.publish(&3), 0);
        assert_eq!(bus.publish(&1), 1);
        assert_eq!(bus.publish(&1), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(bus.subscription_count(), 1);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let bus = ReceiptBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let id = counter_sub(&bus, 1, &hits);

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.publish(&1), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn callback_may_touch_the_bus() {
        let bus = Arc::new(ReceiptBus::<i32>::new());
        let inner = Arc::clone(&bus);
        bus.subscribe(
            Box::new(|_: &i32| true),
            Box::new(move |_: &i32| {
                // shard locks are released before callbacks run
                assert_eq!(inner.subscription_count(), 0);
            }),
        );
        assert_eq!(bus.publish(&0), 1);
    }
}
