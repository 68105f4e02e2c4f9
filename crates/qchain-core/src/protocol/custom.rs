use bytes::{Buf, BufMut};

use crate::error::Result;
use crate::message::{CustomMessage, MessageElement};
use crate::pipeline::{DecoderContext, EncoderContext};
use crate::protocol::{priority, MessageDecoder, MessageEncoder, MessageProtocol, ProcessorCollector};
use crate::wire::{proto, WireElement};

/// `customElem.enumType` marking application payloads.
pub const CUSTOM_ELEM_TYPE: i32 = 103_904_510;

/// Application-defined payloads: `data = [u32 typeId] + payload`.
pub(super) struct CustomMessageProtocol;

impl MessageProtocol for CustomMessageProtocol {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn priority(&self) -> u16 {
        priority::CONTENT
    }

    fn collect_processors(&self, c: &mut ProcessorCollector) {
        c.add_decoder(CustomDecoder);
        c.add_encoder(CustomEncoder);
    }
}

struct CustomDecoder;

impl MessageDecoder for CustomDecoder {
    fn process(&self, cx: &mut DecoderContext<'_>, data: &WireElement) {
        let WireElement::CustomElem(elem) = data else { return };
        if elem.enum_type != CUSTOM_ELEM_TYPE {
            return;
        }
        let mut buf = elem.data.as_slice();
        if buf.remaining() < 4 {
            return;
        }
        let type_id = buf.get_u32();
        cx.collect(MessageElement::Custom(CustomMessage {
            type_id,
            payload: buf.to_vec(),
        }));
    }
}

struct CustomEncoder;

impl MessageEncoder for CustomEncoder {
    fn process(&self, cx: &mut EncoderContext<'_>, data: &MessageElement) -> Result<()> {
        let MessageElement::Custom(custom) = data else { return Ok(()) };
        let mut payload = Vec::with_capacity(4 + custom.payload.len());
        payload.put_u32(custom.type_id);
        payload.put_slice(&custom.payload);
        cx.collect(WireElement::CustomElem(proto::CustomElem {
            data: payload,
            enum_type: CUSTOM_ELEM_TYPE,
            ..Default::default()
        }));
        Ok(())
    }
}
