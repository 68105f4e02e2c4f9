//! Client handle tying configuration, collaborators and the send path
//! together.

use std::sync::Arc;

use qchain_core::error::Result;
use qchain_core::message::{MessageChain, Target};
use qchain_core::pipeline::{self, DecodeContext, MemberDirectory};
use qchain_core::wire::proto::RichText;
use qchain_core::wire::WireElement;

use crate::collab::{ReceiptBus, ResourceUploader, Transport};
use crate::config::ClientConfig;
use crate::resolve::{GroupMessageReceipt, SequenceIdResolver};
use crate::send::{BotIdentity, MessageReceipt, SendOptions, SendOrchestrator};

#[derive(Clone)]
pub struct MessageClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    orchestrator: SendOrchestrator,
    receipts: Arc<ReceiptBus<GroupMessageReceipt>>,
}

impl MessageClient {
    /// Build a client. Config is assumed validated (see `config::load_from_str`).
    pub fn new(
        cfg: &ClientConfig,
        bot: BotIdentity,
        transport: Arc<dyn Transport>,
        uploader: Arc<dyn ResourceUploader>,
    ) -> Self {
        Self::build(cfg, bot, transport, uploader, None)
    }

    /// Same as `new`, with a directory used for mention display names.
    pub fn with_directory(
        cfg: &ClientConfig,
        bot: BotIdentity,
        transport: Arc<dyn Transport>,
        uploader: Arc<dyn ResourceUploader>,
        directory: Arc<dyn MemberDirectory>,
    ) -> Self {
        Self::build(cfg, bot, transport, uploader, Some(directory))
    }

    fn build(
        cfg: &ClientConfig,
        bot: BotIdentity,
        transport: Arc<dyn Transport>,
        uploader: Arc<dyn ResourceUploader>,
        directory: Option<Arc<dyn MemberDirectory>>,
    ) -> Self {
        let receipts: Arc<ReceiptBus<GroupMessageReceipt>> = Arc::new(ReceiptBus::new());
        let resolver = SequenceIdResolver::new(receipts.clone(), cfg.sequence.receipt_timeout());
        let mut orchestrator = SendOrchestrator::new(bot, cfg.send.clone(), transport, uploader, resolver);
        if let Some(d) = directory {
            orchestrator = orchestrator.with_directory(d);
        }
        Self {
            inner: Arc::new(ClientInner { orchestrator, receipts }),
        }
    }

    pub fn bot(&self) -> &BotIdentity {
        self.inner.orchestrator.bot()
    }

    pub async fn send(&self, target: Target, chain: impl Into<MessageChain>) -> Result<MessageReceipt> {
        self.send_with(target, chain, SendOptions::default()).await
    }

    pub async fn send_with(
        &self,
        target: Target,
        chain: impl Into<MessageChain>,
        opts: SendOptions,
    ) -> Result<MessageReceipt> {
        self.inner.orchestrator.send(target, chain.into(), opts).await
    }

    /// Feed a group receipt push from the transport. Returns how many
    /// pending sends it settled.
    pub fn on_group_receipt(&self, receipt: &GroupMessageReceipt) -> usize {
        self.inner.receipts.publish(receipt)
    }

    pub fn receipt_bus(&self) -> Arc<ReceiptBus<GroupMessageReceipt>> {
        self.inner.receipts.clone()
    }

    pub fn decode(&self, elements: &[WireElement], ctx: &DecodeContext) -> MessageChain {
        pipeline::decode(elements, ctx)
    }

    pub fn decode_rich_text(&self, body: &RichText, ctx: &DecodeContext) -> MessageChain {
        pipeline::decode_rich_text(body, ctx)
    }
}
