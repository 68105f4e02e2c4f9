//! Write-once, read-many values that can be awaited.
//!
//! `OnceValue<T>` is the runtime-agnostic half of "resolve once with timeout":
//! any number of handles may await it, any number of writers may race to
//! settle it, and only the first settlement is observed. Later attempts are
//! reported as `false` and leave the value untouched.

use std::sync::{Arc, Mutex, OnceLock};

use futures::channel::oneshot;
use futures::future::{FutureExt, Shared};

/// Why a pending value never produced its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// No matching event arrived before the deadline.
    Timeout { timeout_ms: u64 },
    /// Every writer went away without settling.
    Abandoned,
}

type Outcome<T> = std::result::Result<T, ResolveError>;

struct Inner<T: Clone> {
    value: OnceLock<Outcome<T>>,
    tx: Mutex<Option<oneshot::Sender<Outcome<T>>>>,
    rx: Shared<oneshot::Receiver<Outcome<T>>>,
}

/// Shared handle to a single-assignment value.
pub struct OnceValue<T: Clone> {
    inner: Arc<Inner<T>>,
}

impl<T: Clone> Clone for OnceValue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> OnceValue<T> {
    /// An unsettled value.
    pub fn pending() -> Self {
        let (tx, rx) = oneshot::channel();
        Self {
            inner: Arc::new(Inner {
                value: OnceLock::new(),
                tx: Mutex::new(Some(tx)),
                rx: rx.shared(),
            }),
        }
    }

    /// A value that is final from the start.
    pub fn resolved(value: T) -> Self {
        let this = Self::pending();
        this.settle(Ok(value));
        this
    }

    /// Settle with a payload. Returns `false` if already settled.
    pub fn complete(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Settle with a failure. Returns `false` if already settled.
    pub fn fail(&self, err: ResolveError) -> bool {
        self.settle(Err(err))
    }

    fn settle(&self, outcome: Outcome<T>) -> bool {
        if self.inner.value.set(outcome.clone()).is_err() {
            return false;
        }
        let tx = match self.inner.tx.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(tx) = tx {
            let _ = tx.send(outcome);
        }
        true
    }

    /// Current outcome without waiting.
    pub fn peek(&self) -> Option<Outcome<T>> {
        self.inner.value.get().cloned()
    }

    pub fn is_settled(&self) -> bool {
        self.inner.value.get().is_some()
    }

    /// Suspend until settled.
    pub async fn wait(&self) -> Outcome<T> {
        if let Some(v) = self.peek() {
            return v;
        }
        match self.inner.rx.clone().await {
            Ok(v) => v,
            Err(oneshot::Canceled) => Err(ResolveError::Abandoned),
        }
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for OnceValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.peek() {
            Some(v) => f.debug_tuple("OnceValue").field(&v).finish(),
            None => f.write_str("OnceValue(<pending>)"),
        }
    }
}
