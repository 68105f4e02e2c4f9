#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use qchain_client::collab::{EventBus, ReceiptBus};
use qchain_client::resolve::resolve_once_with_timeout;
use qchain_core::resolve::ResolveError;

#[tokio::test]
async fn first_matching_event_wins() {
    let bus: Arc<ReceiptBus<(u8, &'static str)>> = Arc::new(ReceiptBus::new());
    let dyn_bus: Arc<dyn EventBus<(u8, &'static str)>> = bus.clone();
    let res = resolve_once_with_timeout(
        dyn_bus,
        |e: &(u8, &'static str)| e.0 == 7,
        |e: &(u8, &'static str)| e.1.to_string(),
        Duration::from_secs(5),
    );

    assert_eq!(bus.publish(&(1, "nope")), 0);
    assert_eq!(bus.publish(&(7, "first")), 1);
    assert_eq!(bus.publish(&(7, "second")), 0);
    assert_eq!(res.value().wait().await, Ok("first".to_string()));
}

#[tokio::test]
async fn timeout_settles_and_unsubscribes() {
    let bus: Arc<ReceiptBus<u8>> = Arc::new(ReceiptBus::new());
    let dyn_bus: Arc<dyn EventBus<u8>> = bus.clone();
    let res = resolve_once_with_timeout(dyn_bus, |_: &u8| true, |e: &u8| *e, Duration::from_millis(20));

    assert_eq!(
        res.value().wait().await,
        Err(ResolveError::Timeout { timeout_ms: 20 })
    );
    assert_eq!(bus.subscription_count(), 0);
    assert_eq!(bus.publish(&1), 0);
}

#[tokio::test]
async fn cancel_abandons_and_unsubscribes() {
    let bus: Arc<ReceiptBus<u8>> = Arc::new(ReceiptBus::new());
    let dyn_bus: Arc<dyn EventBus<u8>> = bus.clone();
    let res = resolve_once_with_timeout(dyn_bus, |_: &u8| true, |e: &u8| *e, Duration::from_secs(5));

    res.cancel();
    assert_eq!(res.value().wait().await, Err(ResolveError::Abandoned));
    assert!(!bus.unsubscribe(1));
    assert_eq!(bus.publish(&1), 0);
}
