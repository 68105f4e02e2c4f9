use crate::error::Result;
use crate::message::{Dice, MarketFace, MessageElement};
use crate::pipeline::{DecoderContext, EncoderContext, FlagsProposal};
use crate::protocol::{priority, MessageDecoder, MessageEncoder, MessageProtocol, ProcessorCollector};
use crate::wire::{proto, WireElement};

/// Shop stickers and dice.
pub(super) struct MarketFaceProtocol;

impl MessageProtocol for MarketFaceProtocol {
    fn name(&self) -> &'static str {
        "market-face"
    }

    fn priority(&self) -> u16 {
        priority::CONTENT
    }

    fn collect_processors(&self, c: &mut ProcessorCollector) {
        c.add_decoder(MarketFaceDecoder);
        c.add_encoder(MarketFaceEncoder);
    }
}

struct MarketFaceDecoder;

impl MessageDecoder for MarketFaceDecoder {
    fn process(&self, cx: &mut DecoderContext<'_>, data: &WireElement) {
        let WireElement::MarketFace(raw) = data else { return };
        match Dice::from_market_face(raw) {
            Some(dice) => cx.collect(MessageElement::Dice(dice)),
            None => cx.collect(MessageElement::MarketFace(MarketFace::from_raw(raw.clone()))),
        }
    }
}

struct MarketFaceEncoder;

impl MessageEncoder for MarketFaceEncoder {
    fn process(&self, cx: &mut EncoderContext<'_>, data: &MessageElement) -> Result<()> {
        let face = match data {
            MessageElement::MarketFace(face) => face.clone(),
            MessageElement::Dice(dice) => dice.to_market_face(),
            _ => return Ok(()),
        };
        // name text sits between the face and its extra info
        cx.collect(WireElement::MarketFace(face.raw));
        cx.collect(WireElement::Text(proto::Text {
            str: face.name,
            ..Default::default()
        }));
        cx.collect(WireElement::ExtraInfo(proto::ExtraInfo {
            flags: 8,
            group_mask: 1,
            ..Default::default()
        }));
        cx.collect_general_flags(FlagsProposal::MarketFace);
        Ok(())
    }
}
