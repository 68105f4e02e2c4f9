//! Images and flash images.
//!
//! Group conversations carry images as `customFace`, everything addressed to
//! a single user as `notOnlineImage`. Both decode to the same `Image`.

use prost::Message as _;
use tracing::warn;

use crate::error::Result;
use crate::message::{compat, Image, MessageElement, Target};
use crate::pipeline::{DecoderContext, EncodeContext, EncoderContext, FlagsProposal};
use crate::protocol::{priority, MessageDecoder, MessageEncoder, MessageProtocol, ProcessorCollector};
use crate::wire::{proto, WireElement};

const SERVICE_FLASH: i32 = 3;

pub(super) struct ImageProtocol;

impl MessageProtocol for ImageProtocol {
    fn name(&self) -> &'static str {
        "image"
    }

    fn priority(&self) -> u16 {
        priority::CONTENT
    }

    fn collect_processors(&self, c: &mut ProcessorCollector) {
        c.add_decoder(ImageDecoder);
        c.add_encoder(ImageEncoder);
    }
}

fn from_custom_face(f: &proto::CustomFace) -> Image {
    Image {
        id: f.file_path.clone(),
        md5: f.md5.clone(),
        size: f.size,
        width: f.width,
        height: f.height,
        image_type: f.image_type,
    }
}

fn from_not_online(f: &proto::NotOnlineImage) -> Image {
    let id = if f.res_id.is_empty() {
        f.file_path.clone()
    } else {
        f.res_id.clone()
    };
    Image {
        id,
        md5: f.pic_md5.clone(),
        size: f.file_len,
        width: f.pic_width,
        height: f.pic_height,
        image_type: f.img_type,
    }
}

fn to_custom_face(image: &Image) -> proto::CustomFace {
    proto::CustomFace {
        file_path: image.id.clone(),
        md5: image.md5.clone(),
        size: image.size,
        width: image.width,
        height: image.height,
        image_type: image.image_type,
        ..Default::default()
    }
}

fn to_not_online(image: &Image) -> proto::NotOnlineImage {
    proto::NotOnlineImage {
        file_path: image.id.clone(),
        res_id: image.id.clone(),
        file_len: image.size,
        pic_md5: image.md5.clone(),
        pic_width: image.width,
        pic_height: image.height,
        img_type: image.image_type,
        ..Default::default()
    }
}

fn to_user(ctx: &EncodeContext) -> bool {
    matches!(
        ctx.target,
        Some(Target::Friend(_) | Target::Temp { .. } | Target::Stranger(_))
    )
}

struct ImageDecoder;

impl MessageDecoder for ImageDecoder {
    fn process(&self, cx: &mut DecoderContext<'_>, data: &WireElement) {
        match data {
            WireElement::CustomFace(f) => cx.collect(MessageElement::Image(from_custom_face(f))),
            WireElement::NotOnlineImage(f) => cx.collect(MessageElement::Image(from_not_online(f))),
            WireElement::CommonElem(common) if common.service_type == SERVICE_FLASH => {
                match proto::MsgElemInfoServtype3::decode(common.pb_elem.as_slice()) {
                    Ok(flash) => {
                        let image = match (&flash.flash_troop_pic, &flash.flash_c2c_pic) {
                            (Some(f), _) => from_custom_face(f),
                            (None, Some(f)) => from_not_online(f),
                            (None, None) => return,
                        };
                        cx.collect(MessageElement::FlashImage(image));
                    }
                    Err(e) => warn!(error = %e, "flash image payload unreadable"),
                }
            }
            _ => {}
        }
    }
}

struct ImageEncoder;

impl MessageEncoder for ImageEncoder {
    fn process(&self, cx: &mut EncoderContext<'_>, data: &MessageElement) -> Result<()> {
        match data {
            MessageElement::Image(image) => {
                if to_user(cx.attributes()) {
                    cx.collect(WireElement::NotOnlineImage(to_not_online(image)));
                } else {
                    cx.collect(WireElement::CustomFace(to_custom_face(image)));
                }
            }
            MessageElement::FlashImage(image) => {
                let payload = if to_user(cx.attributes()) {
                    proto::MsgElemInfoServtype3 {
                        flash_c2c_pic: Some(to_not_online(image)),
                        ..Default::default()
                    }
                } else {
                    proto::MsgElemInfoServtype3 {
                        flash_troop_pic: Some(to_custom_face(image)),
                        ..Default::default()
                    }
                };
                cx.collect(WireElement::CommonElem(proto::CommonElem {
                    service_type: SERVICE_FLASH,
                    pb_elem: payload.encode_to_vec(),
                    business_type: 0,
                }));
                cx.process_also(MessageElement::PlainText(compat::FLASH_IMAGE_FALLBACK.to_owned()));
                cx.collect_general_flags(FlagsProposal::FlashImage);
            }
            _ => {}
        }
        Ok(())
    }
}
