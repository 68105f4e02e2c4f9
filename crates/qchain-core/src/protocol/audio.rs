use crate::error::Result;
use crate::message::MessageElement;
use crate::pipeline::{EncoderContext, FlagsProposal};
use crate::protocol::{priority, MessageEncoder, MessageProtocol, ProcessorCollector};
use crate::wire::{proto, WireElement};

/// Voice messages. The payload itself rides in the rich text `ptt` slot;
/// the elems only mark the body as voice.
pub(super) struct AudioProtocol;

impl MessageProtocol for AudioProtocol {
    fn name(&self) -> &'static str {
        "audio"
    }

    fn priority(&self) -> u16 {
        priority::CONTENT
    }

    fn collect_processors(&self, c: &mut ProcessorCollector) {
        c.add_encoder(AudioEncoder);
    }
}

struct AudioEncoder;

impl MessageEncoder for AudioEncoder {
    fn process(&self, cx: &mut EncoderContext<'_>, data: &MessageElement) -> Result<()> {
        if !matches!(data, MessageElement::Audio(_)) {
            return Ok(());
        }
        cx.collect(WireElement::ExtraInfo(proto::ExtraInfo {
            flags: 16,
            group_mask: 1,
            ..Default::default()
        }));
        cx.collect(WireElement::ElemFlags2(proto::ElemFlags2 { vip_status: 1 }));
        cx.collect_general_flags(FlagsProposal::Ptt);
        Ok(())
    }
}
