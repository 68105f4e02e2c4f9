use crate::pipeline::DecoderContext;
use crate::protocol::{priority, MessageDecoder, MessageProtocol, ProcessorCollector};
use crate::wire::WireElement;

/// Wire elements with no message content of their own.
pub(super) struct IgnoredProtocol;

impl MessageProtocol for IgnoredProtocol {
    fn name(&self) -> &'static str {
        "ignored"
    }

    fn priority(&self) -> u16 {
        priority::IGNORE
    }

    fn collect_processors(&self, c: &mut ProcessorCollector) {
        c.add_decoder(IgnoredDecoder);
    }
}

struct IgnoredDecoder;

impl MessageDecoder for IgnoredDecoder {
    fn process(&self, cx: &mut DecoderContext<'_>, data: &WireElement) {
        match data {
            WireElement::GeneralFlags(_) | WireElement::ExtraInfo(_) | WireElement::ElemFlags2(_) => {
                cx.mark_as_consumed()
            }
            WireElement::AnonGroupMsg(_) => {
                cx.mark_anonymous();
                cx.mark_as_consumed();
            }
            _ => {}
        }
    }
}
