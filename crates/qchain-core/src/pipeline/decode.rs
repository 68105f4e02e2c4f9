//! Decode pipeline: wire elements to message chain.

use tracing::debug;

use crate::message::{compat, MessageChain, MessageElement, MessageSource};
use crate::pipeline::DecodeContext;
use crate::protocol::ProcessorRegistry;
use crate::wire::{proto, WireElement};

/// State shared by all elements of one decode call.
#[derive(Debug, Default)]
struct DecodeState {
    anonymous: bool,
    long_text_resid: Option<String>,
}

/// What a decoder sees while handling one wire element.
pub struct DecoderContext<'a> {
    attributes: &'a DecodeContext,
    state: &'a mut DecodeState,
    out: &'a mut Vec<MessageElement>,
    consumed: bool,
}

impl<'a> DecoderContext<'a> {
    pub fn attributes(&self) -> &'a DecodeContext {
        self.attributes
    }

    /// Claim the current element without emitting anything.
    pub fn mark_as_consumed(&mut self) {
        self.consumed = true;
    }

    /// Emit an element; claims the current wire element.
    pub fn collect(&mut self, element: MessageElement) {
        self.consumed = true;
        self.out.push(element);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Sender is anonymous for this message.
    pub fn mark_anonymous(&mut self) {
        self.state.anonymous = true;
    }

    /// Long-text resource id announced by the message's general flags.
    pub fn long_text_resid(&self) -> Option<&str> {
        self.state.long_text_resid.as_deref()
    }
}

pub(crate) fn decode_with(
    registry: &ProcessorRegistry,
    elements: &[WireElement],
    ctx: &DecodeContext,
    leading: Vec<MessageElement>,
) -> MessageChain {
    let mut state = DecodeState {
        anonymous: false,
        long_text_resid: elements.iter().find_map(|e| match e {
            WireElement::GeneralFlags(f) if f.long_text_flag == 1 && !f.long_text_resid.is_empty() => {
                Some(f.long_text_resid.clone())
            }
            _ => None,
        }),
    };
    let mut out = leading;

    for (index, element) in elements.iter().enumerate() {
        let mut cx = DecoderContext {
            attributes: ctx,
            state: &mut state,
            out: &mut out,
            consumed: false,
        };
        for d in registry.decoders() {
            d.processor.process(&mut cx, element);
            if cx.consumed {
                debug!(index, wire = element.kind(), protocol = d.protocol, "decoded");
                break;
            }
        }
    }

    // a dropped artifact becomes the predecessor, so only one is removed
    let mut cleaned: Vec<MessageElement> = Vec::with_capacity(out.len() + 1);
    let mut dropped_last = false;
    for element in out {
        if let Some(prev) = cleaned.last().filter(|_| !dropped_last) {
            if is_encode_artifact(prev, &element) {
                debug!(after = prev.kind(), "dropping compatibility artifact");
                dropped_last = true;
                continue;
            }
        }
        dropped_last = false;
        cleaned.push(element);
    }

    if ctx.emit_source {
        let from_id = if state.anonymous {
            compat::ANONYMOUS_UIN
        } else {
            ctx.from_id
        };
        let source = MessageSource::incoming(
            ctx.kind,
            ctx.sequence_ids.clone(),
            ctx.internal_ids.clone(),
            ctx.time,
            from_id,
            ctx.target_id,
            elements.to_vec(),
            ctx.clone(),
        );
        cleaned.insert(0, MessageElement::Source(source));
    }

    MessageChain::from(cleaned)
}

/// Text injected on encode right after `prev`, or the mention synthesized
/// after a group quote.
fn is_encode_artifact(prev: &MessageElement, current: &MessageElement) -> bool {
    match (prev, current) {
        (_, MessageElement::PlainText(text)) => {
            compat::fallback_for(prev).is_some_and(|f| f == *text)
        }
        (MessageElement::QuoteReply(q), MessageElement::At(at)) => {
            q.source.kind == crate::message::SourceKind::Group
                && !q.source.is_anonymous()
                && at.target == q.source.from_id
        }
        _ => false,
    }
}

/// Decode a full rich text body; the voice attachment leads the chain.
pub(crate) fn decode_rich_text_with(
    registry: &ProcessorRegistry,
    rich: &proto::RichText,
    ctx: &DecodeContext,
) -> MessageChain {
    let elements = crate::wire::from_elems(rich.elems.clone());
    let leading = rich
        .ptt
        .as_ref()
        .map(|ptt| vec![MessageElement::Audio(crate::message::Audio::from_ptt(ptt))])
        .unwrap_or_default();
    decode_with(registry, &elements, ctx, leading)
}
