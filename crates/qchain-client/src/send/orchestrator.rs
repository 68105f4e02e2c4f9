//! FIRST -> LONG_MESSAGE -> FRAGMENTED escalation for one logical send.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use tracing::{debug, info, warn};

use qchain_core::error::{QchainError, Result};
use qchain_core::message::{ForwardNode, MessageChain, MessageElement, MessageSource, Target};
use qchain_core::pipeline::{self, EncodeContext, MemberDirectory};
use qchain_core::resolve::OnceValue;
use qchain_core::wire::proto::RichText;
use qchain_core::wire::WireElement;

use crate::collab::{ResourceKind, ResourceUploader, Transport};
use crate::config::SendSection;
use crate::resolve::{GroupSequenceTracking, SequenceIdResolver};
use crate::send::fragment::{self, FragmentLimits};
use crate::send::packet::{self, PacketSlot, Reply};
use crate::send::upload::{self, MAX_FORWARD_NODES};
use crate::send::{MessageReceipt, SendOptions, SendStep};

/// Account the client sends as.
#[derive(Debug, Clone)]
pub struct BotIdentity {
    pub id: i64,
    pub nick: String,
}

enum Transmit {
    Sent(MessageSource),
    TooLarge,
}

pub struct SendOrchestrator {
    bot: BotIdentity,
    settings: SendSection,
    transport: Arc<dyn Transport>,
    uploader: Arc<dyn ResourceUploader>,
    resolver: SequenceIdResolver,
    directory: Option<Arc<dyn MemberDirectory>>,
    /// Local sequence ids for user-directed messages.
    seq: AtomicI32,
}

impl SendOrchestrator {
    pub fn new(
        bot: BotIdentity,
        settings: SendSection,
        transport: Arc<dyn Transport>,
        uploader: Arc<dyn ResourceUploader>,
        resolver: SequenceIdResolver,
    ) -> Self {
        let start = rand::thread_rng().gen_range(1..0x8000);
        Self {
            bot,
            settings,
            transport,
            uploader,
            resolver,
            directory: None,
            seq: AtomicI32::new(start),
        }
    }

    pub fn with_directory(mut self, directory: Arc<dyn MemberDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn bot(&self) -> &BotIdentity {
        &self.bot
    }

    /// Send `chain` to `target`, escalating on "too large" replies.
    ///
    /// Returns as soon as every packet is accepted; for groups the receipt's
    /// sequence ids keep resolving in the background.
    pub async fn send(&self, target: Target, chain: MessageChain, opts: SendOptions) -> Result<MessageReceipt> {
        let content = chain.without_source();
        if content.iter().all(MessageElement::is_metadata) {
            return Err(QchainError::InvalidElement("message is empty".into()));
        }
        if let Some(quote) = content.quote() {
            quote.source.ensure_sequence_id_available().await?;
        }
        let original = self.upload_forwards(target, content).await?;

        let allow_long = opts.allow_long_message.unwrap_or(self.settings.allow_long_message);
        let mut step = if opts.force_long_message || (allow_long && self.prefers_long(target, &original)) {
            SendStep::LongMessage
        } else {
            SendStep::First
        };

        loop {
            let packets = self.prepare(target, &original, step).await?;
            debug!(%target, %step, packets = packets.len(), "sending");
            match self.transmit(target, &original, &packets, step).await? {
                Transmit::Sent(source) => {
                    info!(%target, %step, packets = packets.len(), "message sent");
                    return Ok(MessageReceipt { target, source, step });
                }
                Transmit::TooLarge => {
                    let Some(next) = step.next(allow_long) else {
                        warn!(%target, %step, "message too large after every step");
                        return Err(QchainError::MessageTooLarge {
                            target,
                            content: Box::new(original),
                        });
                    };
                    info!(%target, from = %step, to = %next, "message too large, escalating");
                    step = next;
                }
            }
        }
    }

    fn encode_context(&self, target: Target) -> EncodeContext {
        let ctx = EncodeContext::for_target(target, self.bot.id);
        match &self.directory {
            Some(d) => ctx.with_directory(Arc::clone(d)),
            None => ctx,
        }
    }

    /// Encoded size of `chain` for `target`, flags included.
    fn measure(&self, target: Target, chain: &MessageChain) -> Result<usize> {
        let elements = pipeline::encode(chain, &self.encode_context(target))?;
        Ok(elements.iter().map(WireElement::encoded_len).sum())
    }

    fn prefers_long(&self, target: Target, chain: &MessageChain) -> bool {
        if !target.is_group() || !self.settings.auto_long_message {
            return false;
        }
        let chars = chain.content_to_string().chars().count();
        let images = chain.iter().filter(|e| matches!(e, MessageElement::Image(_))).count();
        chars > self.settings.long_message_threshold_chars || images > 2
    }

    async fn prepare(&self, target: Target, original: &MessageChain, step: SendStep) -> Result<Vec<MessageChain>> {
        match step {
            SendStep::First => {
                // user-directed sends are checked locally; groups rely on the server
                if !target.is_group() {
                    let size = self.measure(target, original)?;
                    let budget = self.settings.packet_budget(false);
                    if size > budget {
                        warn!(%target, size, budget, "message exceeds packet budget");
                        return Err(QchainError::MessageTooLarge {
                            target,
                            content: Box::new(original.clone()),
                        });
                    }
                }
                Ok(vec![original.clone()])
            }
            SendStep::LongMessage => Ok(vec![self.convert_to_long_message(target, original).await?]),
            SendStep::Fragmented => {
                let limits = FragmentLimits {
                    max_bytes: self.settings.packet_budget(target.is_group()),
                    max_elements: self.settings.max_fragment_elements,
                    text_chars: self.settings.fragment_text_chars,
                };
                fragment::split(target, original, limits, |c| self.measure(target, c))
            }
        }
    }

    /// Upload the content and keep only metadata plus a reference card.
    async fn convert_to_long_message(&self, target: Target, original: &MessageChain) -> Result<MessageChain> {
        let now = unix_now();
        let node = ForwardNode {
            sender_id: self.bot.id,
            sender_name: self.bot.nick.clone(),
            time: now as i32,
            chain: original.clone(),
        };
        let body = upload::transmit_body(target, self.bot.id, std::slice::from_ref(&node))?;
        let res_id = self.uploader.upload(target, ResourceKind::LongMessage, body).await?;
        debug!(%target, %res_id, "long message uploaded");

        let card = upload::long_message_card(&original.content_to_string(), &res_id, now);
        let mut chain: MessageChain = original.iter().filter(|e| e.is_metadata()).cloned().collect();
        chain.push(MessageElement::LongMessage(card));
        Ok(chain)
    }

    /// Replace application-built forwards by uploaded cards.
    async fn upload_forwards(&self, target: Target, chain: MessageChain) -> Result<MessageChain> {
        let oversized = chain.iter().any(|e| match e {
            MessageElement::Forward(f) => f.nodes.len() > MAX_FORWARD_NODES,
            _ => false,
        });
        if oversized {
            warn!(%target, limit = MAX_FORWARD_NODES, "forward exceeds node limit");
            return Err(QchainError::MessageTooLarge {
                target,
                content: Box::new(chain),
            });
        }
        let pending = chain.contains(|e| matches!(e, MessageElement::Forward(f) if f.needs_upload()));
        if !pending {
            return Ok(chain);
        }

        let mut out = MessageChain::new();
        for element in chain.into_elements() {
            match element {
                MessageElement::Forward(f) if f.needs_upload() => {
                    let body = upload::transmit_body(target, self.bot.id, &f.nodes)?;
                    let res_id = self.uploader.upload(target, ResourceKind::Forward, body).await?;
                    debug!(%target, %res_id, nodes = f.nodes.len(), "forward uploaded");
                    out.push(MessageElement::Forward(upload::render_forward(&f, &res_id, unix_now())));
                }
                other => out.push(other),
            }
        }
        Ok(out)
    }

    /// Send every packet in order. Stops at the first non-accepted reply.
    async fn transmit(
        &self,
        target: Target,
        original: &MessageChain,
        packets: &[MessageChain],
        step: SendStep,
    ) -> Result<Transmit> {
        let count = packets.len();
        let (rands, div_seq) = {
            let mut rng = rand::thread_rng();
            let rands: Vec<i32> = (0..count).map(|_| rng.gen_range(1..=i32::MAX)).collect();
            let div_seq = if count == 1 { 0 } else { rng.gen_range(1..=i32::MAX) };
            (rands, div_seq)
        };
        let seqs: Vec<i32> = (0..count).map(|_| self.seq.fetch_add(1, Ordering::Relaxed)).collect();

        let ctx = self.encode_context(target);
        let bodies = packets
            .iter()
            .map(|p| pipeline::encode_rich_text(p, &ctx))
            .collect::<Result<Vec<RichText>>>()?;

        // subscribe before the first packet leaves so no receipt is missed
        let tracking = match target {
            Target::Group(code) => Some(self.resolver.track(code, &rands)),
            _ => None,
        };
        let abort = |tracking: &Option<GroupSequenceTracking>| {
            if let Some(t) = tracking {
                t.cancel();
            }
        };

        for (index, ((body, &seq), &rand)) in bodies.into_iter().zip(&seqs).zip(&rands).enumerate() {
            let req = packet::build_request(
                target,
                body,
                PacketSlot {
                    index,
                    count,
                    div_seq,
                    seq,
                    rand,
                },
            );
            let resp = match self.transport.send_message(req).await {
                Ok(resp) => resp,
                Err(e) => {
                    abort(&tracking);
                    return Err(e);
                }
            };

            match packet::classify(target, &resp) {
                Reply::Accepted => debug!(%target, index, count, rand, "packet accepted"),
                Reply::TooLarge => {
                    abort(&tracking);
                    return Ok(Transmit::TooLarge);
                }
                Reply::Rejected(reason) => {
                    abort(&tracking);
                    warn!(%target, %reason, errtype = resp.errtype, "send rejected");
                    return Err(QchainError::Rejected {
                        target,
                        reason,
                        content: Box::new(original.clone()),
                    });
                }
                Reply::Failed => {
                    abort(&tracking);
                    warn!(%target, result = resp.result, errtype = resp.errtype, errmsg = %resp.errmsg, "send failed");
                    return Err(QchainError::SendFailed {
                        target,
                        result: resp.result,
                        err_code: resp.errtype,
                        message: resp.errmsg,
                    });
                }
            }
        }

        let ids = match &tracking {
            Some(t) => t.ids(),
            None => OnceValue::resolved(seqs),
        };
        let sent = match (step, packets.first()) {
            (SendStep::LongMessage, Some(card)) => card.clone(),
            _ => original.clone(),
        };
        Ok(Transmit::Sent(MessageSource::outgoing(
            target.source_kind(),
            ids,
            rands,
            unix_now() as i32,
            self.bot.id,
            target.id(),
            sent,
        )))
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
