use crate::error::{QchainError, Result};
use crate::message::{compat, At, MessageElement, Target};
use crate::pipeline::{DecoderContext, EncoderContext};
use crate::protocol::{priority, MessageDecoder, MessageEncoder, MessageProtocol, ProcessorCollector};
use crate::wire::attr::{self, FLAG_ALL, FLAG_MEMBER};
use crate::wire::{proto, WireElement};

/// Plain text and mentions.
pub(super) struct TextProtocol;

impl MessageProtocol for TextProtocol {
    fn name(&self) -> &'static str {
        "text"
    }

    fn priority(&self) -> u16 {
        priority::CONTENT
    }

    fn collect_processors(&self, c: &mut ProcessorCollector) {
        c.add_decoder(TextDecoder);
        c.add_encoder(TextEncoder);
    }
}

struct TextDecoder;

impl MessageDecoder for TextDecoder {
    fn process(&self, cx: &mut DecoderContext<'_>, data: &WireElement) {
        let WireElement::Text(text) = data else { return };

        if !text.attr6_buf.is_empty() {
            if let Some((flag, uin)) = attr::read_at(&text.attr6_buf) {
                if flag == FLAG_ALL || uin == 0 {
                    cx.collect(MessageElement::AtAll);
                } else {
                    cx.collect(MessageElement::At(At {
                        target: i64::from(uin),
                        display: text.str.clone(),
                    }));
                }
                return;
            }
        }
        cx.collect(MessageElement::PlainText(text.str.clone()));
    }
}

struct TextEncoder;

impl MessageEncoder for TextEncoder {
    fn process(&self, cx: &mut EncoderContext<'_>, data: &MessageElement) -> Result<()> {
        let text = match data {
            MessageElement::PlainText(s) => proto::Text {
                str: s.clone(),
                ..Default::default()
            },
            MessageElement::At(at) => {
                let uin = u32::try_from(at.target).map_err(|_| {
                    QchainError::InvalidElement(format!("mention target {} is not a valid uin", at.target))
                })?;
                let display = format!("@{}", attr::strip_emoji(&display_name(cx, at.target)));
                proto::Text {
                    attr6_buf: attr::encode_at_attr(&display, FLAG_MEMBER, uin),
                    str: display,
                    ..Default::default()
                }
            }
            MessageElement::AtAll => proto::Text {
                str: compat::AT_ALL_DISPLAY.to_owned(),
                attr6_buf: attr::encode_at_attr(compat::AT_ALL_DISPLAY, FLAG_ALL, 0),
                ..Default::default()
            },
            _ => return Ok(()),
        };
        cx.collect(WireElement::Text(text));
        Ok(())
    }
}

/// Member card in the target group, then in the quoted group, then the uin.
fn display_name(cx: &EncoderContext<'_>, uin: i64) -> String {
    let attrs = cx.attributes();
    let in_target = match attrs.target {
        Some(Target::Group(group)) => attrs.member_name(group, uin),
        _ => None,
    };
    in_target
        .or_else(|| cx.quoted_group().and_then(|g| attrs.member_name(g, uin)))
        .unwrap_or_else(|| uin.to_string())
}
