//! Decode and encode pipelines over the process-wide registry.
//!
//! Both pipelines are synchronous and keep all per-call state on the stack,
//! so concurrent calls for different messages never contend.

mod context;
mod decode;
mod encode;
mod flags;

pub use context::{DecodeContext, EncodeContext, MemberDirectory};
pub use decode::DecoderContext;
pub use encode::EncoderContext;
pub use flags::FlagsProposal;

use crate::error::Result;
use crate::message::MessageChain;
use crate::protocol::{registry, ProcessorRegistry};
use crate::wire::{proto, WireElement};

/// Decode received wire elements. Never fails: unknown input is kept as
/// `UnsupportedMessage`.
pub fn decode(elements: &[WireElement], ctx: &DecodeContext) -> MessageChain {
    decode::decode_with(registry(), elements, ctx, Vec::new())
}

/// Decode a rich text body, including its voice attachment.
pub fn decode_rich_text(rich: &proto::RichText, ctx: &DecodeContext) -> MessageChain {
    decode::decode_rich_text_with(registry(), rich, ctx)
}

/// Encode a chain. Fails only when an element kind has no encoder.
pub fn encode(chain: &MessageChain, ctx: &EncodeContext) -> Result<Vec<WireElement>> {
    encode::encode_with(registry(), chain, ctx)
}

/// Encode a chain into a rich text body; audio goes into the ptt slot.
pub fn encode_rich_text(chain: &MessageChain, ctx: &EncodeContext) -> Result<proto::RichText> {
    encode::encode_rich_text_with(registry(), chain, ctx)
}

impl ProcessorRegistry {
    pub fn decode(&self, elements: &[WireElement], ctx: &DecodeContext) -> MessageChain {
        decode::decode_with(self, elements, ctx, Vec::new())
    }

    pub fn encode(&self, chain: &MessageChain, ctx: &EncodeContext) -> Result<Vec<WireElement>> {
        encode::encode_with(self, chain, ctx)
    }
}
