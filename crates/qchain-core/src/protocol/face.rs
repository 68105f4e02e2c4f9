//! Small faces, vip faces and animated stickers.

use prost::Message as _;
use tracing::warn;

use crate::error::Result;
use crate::message::{Face, MessageElement, SuperFace, VipFace};
use crate::pipeline::{DecoderContext, EncoderContext};
use crate::protocol::{priority, MessageDecoder, MessageEncoder, MessageProtocol, ProcessorCollector};
use crate::wire::{proto, WireElement};

const SERVICE_VIP_FACE: i32 = 23;
const SERVICE_LARGE_FACE: i32 = 33;
const SERVICE_STICKER: i32 = 37;

/// Ids at or above this travel as commonElem 33.
const LARGE_FACE_MIN_ID: i32 = 260;
const FACE_BUF: [u8; 8] = [0x00, 0x01, 0x00, 0x04, 0x52, 0xCC, 0xF5, 0xD0];

pub(super) struct FaceProtocol;

impl MessageProtocol for FaceProtocol {
    fn name(&self) -> &'static str {
        "face"
    }

    fn priority(&self) -> u16 {
        priority::CONTENT
    }

    fn collect_processors(&self, c: &mut ProcessorCollector) {
        c.add_decoder(FaceDecoder);
        c.add_encoder(FaceEncoder);
    }
}

struct FaceDecoder;

impl MessageDecoder for FaceDecoder {
    fn process(&self, cx: &mut DecoderContext<'_>, data: &WireElement) {
        match data {
            WireElement::Face(face) => cx.collect(MessageElement::Face(Face { id: face.index })),
            WireElement::CommonElem(common) => {
                let decoded = match common.service_type {
                    SERVICE_LARGE_FACE => proto::MsgElemInfoServtype33::decode(common.pb_elem.as_slice())
                        .map(|v| MessageElement::Face(Face { id: v.index })),
                    SERVICE_VIP_FACE => proto::MsgElemInfoServtype23::decode(common.pb_elem.as_slice())
                        .map(|v| {
                            MessageElement::VipFace(VipFace {
                                kind_id: v.face_type,
                                name: v.face_summary,
                                count: v.face_bubble_count,
                            })
                        }),
                    SERVICE_STICKER => proto::MsgElemInfoServtype37::decode(common.pb_elem.as_slice())
                        .map(|v| {
                            MessageElement::SuperFace(SuperFace {
                                face_id: v.qsid,
                                sticker_id: v.sticker_id,
                                sticker_type: v.sticker_type,
                                name: v.text,
                            })
                        }),
                    _ => return,
                };
                match decoded {
                    Ok(element) => cx.collect(element),
                    Err(e) => warn!(service_type = common.service_type, error = %e, "face payload unreadable"),
                }
            }
            _ => {}
        }
    }
}

struct FaceEncoder;

impl MessageEncoder for FaceEncoder {
    fn process(&self, cx: &mut EncoderContext<'_>, data: &MessageElement) -> Result<()> {
        match data {
            MessageElement::Face(face) if face.id >= LARGE_FACE_MIN_ID => {
                let payload = proto::MsgElemInfoServtype33 {
                    index: face.id,
                    ..Default::default()
                };
                cx.collect(WireElement::CommonElem(proto::CommonElem {
                    service_type: SERVICE_LARGE_FACE,
                    pb_elem: payload.encode_to_vec(),
                    business_type: 1,
                }));
            }
            MessageElement::Face(face) => {
                let old = (0x1445 - 4i32).wrapping_add(face.id) as u16;
                cx.collect(WireElement::Face(proto::Face {
                    index: face.id,
                    old: old.to_be_bytes().to_vec(),
                    buf: FACE_BUF.to_vec(),
                }));
            }
            MessageElement::VipFace(vip) => {
                let payload = proto::MsgElemInfoServtype23 {
                    face_type: vip.kind_id,
                    face_bubble_count: vip.count,
                    face_summary: vip.name.clone(),
                    flag: 0,
                };
                cx.collect(WireElement::CommonElem(proto::CommonElem {
                    service_type: SERVICE_VIP_FACE,
                    pb_elem: payload.encode_to_vec(),
                    business_type: vip.kind_id,
                }));
                cx.process_also(MessageElement::PlainText(vip.fallback_text()));
            }
            MessageElement::SuperFace(sticker) => {
                let payload = proto::MsgElemInfoServtype37 {
                    pack_id: "1".to_owned(),
                    sticker_id: sticker.sticker_id.clone(),
                    qsid: sticker.face_id,
                    source_type: 1,
                    sticker_type: sticker.sticker_type,
                    result_id: String::new(),
                    text: sticker.name.clone(),
                    random_type: 1,
                };
                cx.collect(WireElement::CommonElem(proto::CommonElem {
                    service_type: SERVICE_STICKER,
                    pb_elem: payload.encode_to_vec(),
                    business_type: sticker.sticker_type,
                }));
            }
            _ => {}
        }
        Ok(())
    }
}
