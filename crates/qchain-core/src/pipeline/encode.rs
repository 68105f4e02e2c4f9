//! Encode pipeline: message chain to wire elements.
//!
//! Elements are processed from a worklist. Encoders never recurse; synthetic
//! elements (fallback text, the mention after a quote) are queued right
//! after the element that produced them.

use std::collections::VecDeque;

use tracing::{debug, error};

use crate::error::{QchainError, Result};
use crate::message::{MessageChain, MessageElement};
use crate::pipeline::{EncodeContext, FlagsProposal};
use crate::protocol::ProcessorRegistry;
use crate::wire::{proto, WireElement};

/// State shared by all elements of one encode call.
#[derive(Debug, Default)]
struct EncodeState {
    proposals: Vec<FlagsProposal>,
    quoted_group: Option<i64>,
}

/// What an encoder sees while handling one message element.
pub struct EncoderContext<'a> {
    attributes: &'a EncodeContext,
    registry: &'a ProcessorRegistry,
    state: &'a mut EncodeState,
    out: &'a mut Vec<WireElement>,
    also: Vec<MessageElement>,
    consumed: bool,
}

impl<'a> EncoderContext<'a> {
    pub fn attributes(&self) -> &'a EncodeContext {
        self.attributes
    }

    pub fn mark_as_consumed(&mut self) {
        self.consumed = true;
    }

    /// Emit a wire element; claims the current message element.
    pub fn collect(&mut self, element: WireElement) {
        self.consumed = true;
        self.out.push(element);
    }

    /// Queue a synthetic element to be encoded right after the current one.
    pub fn process_also(&mut self, element: MessageElement) {
        self.also.push(element);
    }

    /// Propose the trailing flags variant.
    pub fn collect_general_flags(&mut self, proposal: FlagsProposal) {
        self.state.proposals.push(proposal);
    }

    /// Group the current quote points into, for mention name lookup.
    pub fn quoted_group(&self) -> Option<i64> {
        self.state.quoted_group
    }

    pub fn set_quoted_group(&mut self, group: Option<i64>) {
        self.state.quoted_group = group;
    }

    /// Encode a nested chain (quoted originals) in a separate call.
    pub fn encode_nested(&self, chain: &MessageChain, ctx: &EncodeContext) -> Result<Vec<WireElement>> {
        encode_with(self.registry, chain, ctx)
    }
}

pub(crate) fn encode_with(
    registry: &ProcessorRegistry,
    chain: &MessageChain,
    ctx: &EncodeContext,
) -> Result<Vec<WireElement>> {
    // the quoted source must precede all content
    let mut worklist: VecDeque<MessageElement> = VecDeque::with_capacity(chain.len());
    for element in chain.iter() {
        if matches!(element, MessageElement::QuoteReply(_)) {
            worklist.push_front(element.clone());
        } else {
            worklist.push_back(element.clone());
        }
    }

    let mut state = EncodeState::default();
    let mut out = Vec::with_capacity(chain.len() + 1);

    while let Some(element) = worklist.pop_front() {
        let mut cx = EncoderContext {
            attributes: ctx,
            registry,
            state: &mut state,
            out: &mut out,
            also: Vec::new(),
            consumed: false,
        };
        let mut claimed_by = None;
        for e in registry.encoders() {
            e.processor.process(&mut cx, &element)?;
            if cx.consumed {
                claimed_by = Some(e.protocol);
                break;
            }
        }
        let Some(protocol) = claimed_by else {
            error!(kind = element.kind(), "no encoder claimed element");
            return Err(QchainError::UnencodableElement(element.kind()));
        };
        debug!(kind = element.kind(), protocol, "encoded");

        let also = std::mem::take(&mut cx.also);
        for synthetic in also.into_iter().rev() {
            worklist.push_front(synthetic);
        }
    }

    if ctx.with_general_flags {
        out.push(FlagsProposal::select(&state.proposals).realize());
    }
    Ok(out)
}

pub(crate) fn encode_rich_text_with(
    registry: &ProcessorRegistry,
    chain: &MessageChain,
    ctx: &EncodeContext,
) -> Result<proto::RichText> {
    let elements = encode_with(registry, chain, ctx)?;
    let ptt = chain.iter().find_map(|e| match e {
        MessageElement::Audio(a) => Some(a.to_ptt(ctx.bot_id)),
        _ => None,
    });
    Ok(proto::RichText {
        elems: crate::wire::to_elems(&elements),
        ptt,
    })
}
