//! Resolve-once-with-timeout over an event bus, and its use for group
//! message sequence ids.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{debug, warn};

use qchain_core::message::SequenceIds;
use qchain_core::resolve::{OnceValue, ResolveError};

use crate::collab::{EventBus, SubscriptionId};

/// Server push announcing the sequence id of a group message we sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupMessageReceipt {
    /// Random id chosen by the sender (`msg_rand`).
    pub correlation_id: i32,
    pub sequence_id: i32,
    pub group_id: i64,
    pub time: i32,
}

/// One in-flight resolution. The subscription is live until an event
/// matches, the timer fires, or `cancel` is called.
pub struct Resolution<E: 'static, T: Clone> {
    value: OnceValue<T>,
    subscription: SubscriptionId,
    bus: Arc<dyn EventBus<E>>,
}

impl<E: 'static, T: Clone> Resolution<E, T> {
    pub fn value(&self) -> &OnceValue<T> {
        &self.value
    }

    /// Abandon the resolution; awaiters see `Abandoned`.
    pub fn cancel(&self) {
        if self.value.fail(ResolveError::Abandoned) {
            self.bus.unsubscribe(self.subscription);
        }
    }
}

/// Subscribe for the first event matching `predicate` and settle the
/// returned value with `extract(event)`, or with `Timeout` after `timeout`.
///
/// The subscription is registered before this returns, so an event
/// published right after (e.g. the ack of a packet sent next) is never
/// missed. Must be called inside a tokio runtime.
pub fn resolve_once_with_timeout<E, T, P, X>(
    bus: Arc<dyn EventBus<E>>,
    predicate: P,
    extract: X,
    timeout: Duration,
) -> Resolution<E, T>
where
    E: 'static,
    T: Clone + Send + Sync + 'static,
    P: Fn(&E) -> bool + Send + Sync + 'static,
    X: FnOnce(&E) -> T + Send + Sync + 'static,
{
    let value = OnceValue::pending();

    let writer = value.clone();
    let subscription = bus.subscribe(
        Box::new(predicate),
        Box::new(move |event: &E| {
            writer.complete(extract(event));
        }),
    );

    let timer_value = value.clone();
    let timer_bus = Arc::clone(&bus);
    let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
    tokio::spawn(async move {
        tokio::select! {
            _ = timer_value.wait() => {}
            _ = tokio::time::sleep(timeout) => {
                if timer_value.fail(ResolveError::Timeout { timeout_ms }) {
                    timer_bus.unsubscribe(subscription);
                    warn!(subscription, timeout_ms, "no matching event before timeout");
                }
            }
        }
    });

    Resolution {
        value,
        subscription,
        bus,
    }
}

/// Tracks sequence ids of group messages through receipt pushes.
#[derive(Clone)]
pub struct SequenceIdResolver {
    bus: Arc<dyn EventBus<GroupMessageReceipt>>,
    timeout: Duration,
}

/// Pending ids of one logical group message, one part per packet.
pub struct GroupSequenceTracking {
    ids: SequenceIds,
    parts: Vec<Resolution<GroupMessageReceipt, i32>>,
}

impl GroupSequenceTracking {
    pub fn ids(&self) -> SequenceIds {
        self.ids.clone()
    }

    /// Stop waiting; used when the send itself failed.
    pub fn cancel(&self) {
        for part in &self.parts {
            part.cancel();
        }
        self.ids.fail(ResolveError::Abandoned);
    }
}

impl SequenceIdResolver {
    pub fn new(bus: Arc<dyn EventBus<GroupMessageReceipt>>, timeout: Duration) -> Self {
        Self { bus, timeout }
    }

    /// Start tracking the packets sent to `group_id` with `correlation_ids`.
    /// The combined value settles once every packet has its sequence id.
    pub fn track(&self, group_id: i64, correlation_ids: &[i32]) -> GroupSequenceTracking {
        let parts: Vec<_> = correlation_ids
            .iter()
            .map(|&rand| {
                resolve_once_with_timeout(
                    Arc::clone(&self.bus),
                    move |r: &GroupMessageReceipt| r.correlation_id == rand && r.group_id == group_id,
                    |r: &GroupMessageReceipt| r.sequence_id,
                    self.timeout,
                )
            })
            .collect();

        let ids: SequenceIds = OnceValue::pending();
        let combined = ids.clone();
        let cells: Vec<OnceValue<i32>> = parts.iter().map(|p| p.value().clone()).collect();
        tokio::spawn(async move {
            let outcome: Result<Vec<i32>, ResolveError> =
                join_all(cells.iter().map(|c| c.wait())).await.into_iter().collect();
            match outcome {
                Ok(seqs) => {
                    debug!(group_id, ?seqs, "sequence ids resolved");
                    combined.complete(seqs);
                }
                Err(e) => {
                    combined.fail(e);
                }
            }
        });

        GroupSequenceTracking { ids, parts }
    }
}
