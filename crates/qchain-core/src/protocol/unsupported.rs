use crate::error::Result;
use crate::message::{MessageElement, UnsupportedMessage};
use crate::pipeline::{DecoderContext, EncoderContext};
use crate::protocol::{priority, MessageDecoder, MessageEncoder, MessageProtocol, ProcessorCollector};
use crate::wire::WireElement;

/// Catch-all: keeps anything unclaimed so decoding never loses data.
pub(super) struct UnsupportedProtocol;

impl MessageProtocol for UnsupportedProtocol {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn priority(&self) -> u16 {
        priority::UNSUPPORTED
    }

    fn collect_processors(&self, c: &mut ProcessorCollector) {
        c.add_decoder(UnsupportedDecoder);
        c.add_encoder(UnsupportedEncoder);
    }
}

struct UnsupportedDecoder;

impl MessageDecoder for UnsupportedDecoder {
    fn process(&self, cx: &mut DecoderContext<'_>, data: &WireElement) {
        cx.collect(MessageElement::Unsupported(UnsupportedMessage { raw: data.clone() }));
    }
}

struct UnsupportedEncoder;

impl MessageEncoder for UnsupportedEncoder {
    fn process(&self, cx: &mut EncoderContext<'_>, data: &MessageElement) -> Result<()> {
        if let MessageElement::Unsupported(u) = data {
            cx.collect(u.raw.clone());
        }
        Ok(())
    }
}
