//! Quote replies and source metadata.

use prost::Message as _;
use tracing::warn;

use crate::error::Result;
use crate::message::{At, MessageChain, MessageElement, MessageSource, QuoteReply, SourceKind};
use crate::pipeline::{DecodeContext, DecoderContext, EncoderContext};
use crate::protocol::{priority, MessageDecoder, MessageEncoder, MessageProtocol, ProcessorCollector};
use crate::wire::{from_elems, proto, to_elems, WireElement};

pub(super) struct QuoteReplyProtocol;

impl MessageProtocol for QuoteReplyProtocol {
    fn name(&self) -> &'static str {
        "quote-reply"
    }

    fn priority(&self) -> u16 {
        priority::METADATA
    }

    fn collect_processors(&self, c: &mut ProcessorCollector) {
        c.add_decoder(SourceMsgDecoder);
        c.add_encoder(QuoteReplyEncoder);
        c.add_encoder(SourceEncoder);
    }
}

struct SourceMsgDecoder;

impl MessageDecoder for SourceMsgDecoder {
    fn process(&self, cx: &mut DecoderContext<'_>, data: &WireElement) {
        let WireElement::SrcMsg(src) = data else { return };
        let attrs = cx.attributes();

        let internal_ids = if src.pb_reserve.is_empty() {
            Vec::new()
        } else {
            match proto::SourceResvAttr::decode(src.pb_reserve.as_slice()) {
                Ok(resv) => vec![resv.orig_uids as u32 as i32],
                Err(e) => {
                    warn!(error = %e, "srcMsg reserve unreadable");
                    Vec::new()
                }
            }
        };
        let target_id = match attrs.kind {
            SourceKind::Group => attrs.target_id,
            _ => src.to_uin,
        };
        let nested = DecodeContext::new(attrs.kind, src.sender_uin, target_id)
            .with_ids(src.orig_seqs.clone(), internal_ids.clone())
            .at(src.time);

        let source = MessageSource::incoming(
            attrs.kind,
            src.orig_seqs.clone(),
            internal_ids,
            src.time,
            src.sender_uin,
            target_id,
            from_elems(src.elems.clone()),
            nested,
        );
        cx.collect(MessageElement::QuoteReply(QuoteReply { source }));
    }
}

struct QuoteReplyEncoder;

impl MessageEncoder for QuoteReplyEncoder {
    fn process(&self, cx: &mut EncoderContext<'_>, data: &MessageElement) -> Result<()> {
        let MessageElement::QuoteReply(quote) = data else { return Ok(()) };
        let source = &quote.source;

        let original: MessageChain = source
            .original_message()
            .iter()
            .filter(|e| !e.is_metadata())
            .cloned()
            .collect();
        let nested_ctx = cx.attributes().without_general_flags();
        let elems = match cx.encode_nested(&original, &nested_ctx) {
            Ok(elems) => to_elems(&elems),
            Err(e) => {
                warn!(error = %e, "quoted original not encodable, sending bare reference");
                Vec::new()
            }
        };

        let pb_reserve = match source.internal_ids.first() {
            Some(&rand) => proto::SourceResvAttr {
                orig_uids: rand as u32 as u64,
                ..Default::default()
            }
            .encode_to_vec(),
            None => Vec::new(),
        };

        cx.collect(WireElement::SrcMsg(proto::SourceMsg {
            orig_seqs: source.sequence_ids().unwrap_or_default(),
            sender_uin: source.from_id,
            time: source.time,
            flag: 1,
            elems,
            r#type: 0,
            pb_reserve,
            to_uin: source.target_id,
            ..Default::default()
        }));

        if source.kind == SourceKind::Group && !source.is_anonymous() {
            cx.set_quoted_group(Some(source.target_id));
            cx.process_also(MessageElement::At(At::new(source.from_id)));
        }
        Ok(())
    }
}

/// Source metadata has no wire form of its own.
struct SourceEncoder;

impl MessageEncoder for SourceEncoder {
    fn process(&self, cx: &mut EncoderContext<'_>, data: &MessageElement) -> Result<()> {
        if matches!(data, MessageElement::Source(_)) {
            cx.mark_as_consumed();
        }
        Ok(())
    }
}
