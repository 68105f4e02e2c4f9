//! Write-once value semantics.

#![allow(clippy::unwrap_used)]

use futures::executor::block_on;
use futures::FutureExt;

use qchain_core::resolve::{OnceValue, ResolveError};

#[test]
fn resolved_is_immediately_visible() {
    let v = OnceValue::resolved(vec![1, 2]);
    assert_eq!(v.peek(), Some(Ok(vec![1, 2])));
    assert_eq!(block_on(v.wait()), Ok(vec![1, 2]));
}

#[test]
fn first_settlement_wins() {
    let v: OnceValue<Vec<i32>> = OnceValue::pending();
    assert!(v.complete(vec![5]));
    assert!(!v.complete(vec![6]));
    assert!(!v.fail(ResolveError::Timeout { timeout_ms: 1 }));
    assert_eq!(block_on(v.clone().wait()), Ok(vec![5]));
}

#[test]
fn waiters_block_until_settled() {
    let v: OnceValue<i32> = OnceValue::pending();
    assert!(v.wait().now_or_never().is_none());

    let a = v.clone();
    let b = v.clone();
    let (ra, rb, _) = block_on(async {
        futures::join!(a.wait(), b.wait(), async {
            v.complete(9);
        })
    });
    assert_eq!(ra, Ok(9));
    assert_eq!(rb, Ok(9));
}

#[test]
fn failure_surfaces_at_await() {
    let v: OnceValue<i32> = OnceValue::pending();
    assert!(v.fail(ResolveError::Timeout { timeout_ms: 3000 }));
    assert_eq!(block_on(v.wait()), Err(ResolveError::Timeout { timeout_ms: 3000 }));
    assert!(v.is_settled());
}
