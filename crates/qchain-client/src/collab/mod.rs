//! Collaborator seams: the transport, the resource uploader, and the event
//! bus the sequence-id resolver listens on. Session handling, encryption
//! and directory upkeep live behind these traits, outside this crate.

mod bus;

use async_trait::async_trait;

use qchain_core::error::Result;
use qchain_core::message::Target;

use crate::send::proto::{PbSendMsgReq, PbSendMsgResp};

pub use bus::ReceiptBus;
/// Member lookup used to render mention display names.
pub use qchain_core::pipeline::MemberDirectory;

/// Sends one message packet and returns the server's reply.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_message(&self, req: PbSendMsgReq) -> Result<PbSendMsgResp>;
}

/// What an uploaded message body is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    LongMessage,
    Forward,
}

/// Content-addressed storage for message bodies too big to send inline.
#[async_trait]
pub trait ResourceUploader: Send + Sync {
    /// Store `payload` for `target` and return its resource id.
    async fn upload(&self, target: Target, kind: ResourceKind, payload: Vec<u8>) -> Result<String>;
}

pub type SubscriptionId = u64;
pub type Predicate<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;
pub type Callback<E> = Box<dyn FnOnce(&E) + Send + Sync>;

/// Publish/subscribe interface. A subscription fires at most once: the
/// first matching event removes it before the callback runs.
pub trait EventBus<E>: Send + Sync {
    fn subscribe(&self, predicate: Predicate<E>, callback: Callback<E>) -> SubscriptionId;

    /// Drop a subscription. `false` if it already fired or was removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
