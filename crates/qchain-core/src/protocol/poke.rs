use prost::Message as _;
use tracing::warn;

use crate::error::Result;
use crate::message::{compat, MessageElement, Poke};
use crate::pipeline::{DecoderContext, EncoderContext};
use crate::protocol::{priority, MessageDecoder, MessageEncoder, MessageProtocol, ProcessorCollector};
use crate::wire::{proto, WireElement};

const SERVICE_POKE: i32 = 2;
const POKE_MIN_VERSION: &str = "7.2.0";

pub(super) struct PokeProtocol;

impl MessageProtocol for PokeProtocol {
    fn name(&self) -> &'static str {
        "poke"
    }

    fn priority(&self) -> u16 {
        priority::CONTENT
    }

    fn collect_processors(&self, c: &mut ProcessorCollector) {
        c.add_decoder(PokeDecoder);
        c.add_encoder(PokeEncoder);
    }
}

struct PokeDecoder;

impl MessageDecoder for PokeDecoder {
    fn process(&self, cx: &mut DecoderContext<'_>, data: &WireElement) {
        let WireElement::CommonElem(common) = data else { return };
        if common.service_type != SERVICE_POKE {
            return;
        }
        match proto::MsgElemInfoServtype2::decode(common.pb_elem.as_slice()) {
            Ok(p) => cx.collect(MessageElement::Poke(Poke {
                name: p.vaspoke_name,
                poke_type: p.poke_type,
                id: p.vaspoke_id,
            })),
            Err(e) => warn!(error = %e, "poke payload unreadable"),
        }
    }
}

struct PokeEncoder;

impl MessageEncoder for PokeEncoder {
    fn process(&self, cx: &mut EncoderContext<'_>, data: &MessageElement) -> Result<()> {
        let MessageElement::Poke(poke) = data else { return Ok(()) };
        let payload = proto::MsgElemInfoServtype2 {
            poke_type: poke.poke_type,
            vaspoke_id: poke.id,
            vaspoke_minver: POKE_MIN_VERSION.to_owned(),
            vaspoke_name: poke.name.clone(),
            ..Default::default()
        };
        cx.collect(WireElement::CommonElem(proto::CommonElem {
            service_type: SERVICE_POKE,
            pb_elem: payload.encode_to_vec(),
            business_type: poke.poke_type,
        }));
        cx.process_also(MessageElement::PlainText(compat::POKE_FALLBACK.to_owned()));
        Ok(())
    }
}
