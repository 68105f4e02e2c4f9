//! XML/JSON rich cards: service messages, light apps, merged forwards and
//! long-message references.

use tracing::warn;

use crate::error::{QchainError, Result};
use crate::message::{
    compat, ForwardMessage, LightApp, LongMessageMarker, MessageElement, ServiceMessage,
};
use crate::pipeline::{DecoderContext, EncoderContext, FlagsProposal};
use crate::protocol::{priority, MessageDecoder, MessageEncoder, MessageProtocol, ProcessorCollector};
use crate::wire::payload::{self, xml_attr};
use crate::wire::{proto, WireElement};

/// Service id shared by forwards and long messages.
pub const SERVICE_MULTI_MSG: i32 = 35;

pub(super) struct RichMessageProtocol;

impl MessageProtocol for RichMessageProtocol {
    fn name(&self) -> &'static str {
        "rich-message"
    }

    fn priority(&self) -> u16 {
        priority::CONTENT
    }

    fn collect_processors(&self, c: &mut ProcessorCollector) {
        c.add_decoder(RichMsgDecoder);
        c.add_decoder(LightAppDecoder);
        c.add_encoder(RichMessageEncoder);
    }
}

struct RichMsgDecoder;

impl MessageDecoder for RichMsgDecoder {
    fn process(&self, cx: &mut DecoderContext<'_>, data: &WireElement) {
        let WireElement::RichMsg(rich) = data else { return };
        let content = match payload::unpack(&rich.template1) {
            Ok(c) => c,
            Err(e) => {
                warn!(service_id = rich.service_id, error = %e, "richMsg payload unreadable");
                return;
            }
        };

        let service_id = match rich.service_id {
            0 => xml_attr(&content, "serviceID").trim().parse().unwrap_or(0),
            sid => sid,
        };
        if service_id != SERVICE_MULTI_MSG {
            cx.collect(MessageElement::Service(ServiceMessage {
                service_id,
                content,
            }));
            return;
        }

        let res_id = xml_attr(&content, "m_resid").to_owned();
        let file_name = Some(xml_attr(&content, "m_fileName"))
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        let multi_msg_flag = xml_attr(&content, "multiMsgFlag").parse::<i32>().ok();
        let view_multi = xml_attr(&content, "action") == "viewMultiMsg";

        let element = match multi_msg_flag {
            Some(1) => {
                let res_id = Some(res_id)
                    .filter(|r| !r.is_empty())
                    .or_else(|| cx.long_text_resid().map(str::to_owned));
                match res_id {
                    Some(res_id) => MessageElement::LongMessage(LongMessageMarker { content, res_id }),
                    None => {
                        warn!("long message without resource id, dropped");
                        cx.mark_as_consumed();
                        return;
                    }
                }
            }
            _ if res_id.is_empty() => {
                if file_name.is_some() && view_multi {
                    MessageElement::Forward(ForwardMessage {
                        content,
                        res_id: None,
                        file_name,
                        ..Default::default()
                    })
                } else {
                    MessageElement::Service(ServiceMessage {
                        service_id,
                        content,
                    })
                }
            }
            Some(0) => MessageElement::Forward(ForwardMessage {
                content,
                res_id: Some(res_id),
                file_name,
                ..Default::default()
            }),
            _ if view_multi => MessageElement::Forward(ForwardMessage {
                content,
                res_id: Some(res_id),
                file_name,
                ..Default::default()
            }),
            _ => MessageElement::LongMessage(LongMessageMarker { content, res_id }),
        };
        cx.collect(element);
    }
}

struct LightAppDecoder;

impl MessageDecoder for LightAppDecoder {
    fn process(&self, cx: &mut DecoderContext<'_>, data: &WireElement) {
        let WireElement::LightApp(app) = data else { return };
        match payload::unpack(&app.data) {
            Ok(content) => cx.collect(MessageElement::LightApp(LightApp { content })),
            Err(e) => warn!(error = %e, "lightApp payload unreadable"),
        }
    }
}

struct RichMessageEncoder;

impl MessageEncoder for RichMessageEncoder {
    fn process(&self, cx: &mut EncoderContext<'_>, data: &MessageElement) -> Result<()> {
        match data {
            MessageElement::Service(service) => {
                cx.collect(rich_msg(service.service_id, &service.content)?);
                cx.collect_general_flags(FlagsProposal::RichMessage);
            }
            MessageElement::LightApp(app) => {
                cx.collect(WireElement::LightApp(proto::LightAppElem {
                    data: payload::pack(&app.content)?,
                    ..Default::default()
                }));
                cx.collect_general_flags(FlagsProposal::RichMessage);
            }
            MessageElement::Forward(forward) => {
                if forward.needs_upload() {
                    return Err(QchainError::InvalidElement(
                        "forward message must be uploaded before encoding".into(),
                    ));
                }
                cx.collect(rich_msg(SERVICE_MULTI_MSG, &forward.content)?);
                cx.process_also(MessageElement::PlainText(compat::MERGED_MESSAGE_FALLBACK.to_owned()));
                cx.collect_general_flags(FlagsProposal::RichMessage);
            }
            MessageElement::LongMessage(long) => {
                cx.collect(rich_msg(SERVICE_MULTI_MSG, &long.content)?);
                cx.process_also(MessageElement::PlainText(compat::MERGED_MESSAGE_FALLBACK.to_owned()));
                cx.collect_general_flags(FlagsProposal::LongMessage {
                    res_id: long.res_id.clone(),
                });
            }
            _ => {}
        }
        Ok(())
    }
}

fn rich_msg(service_id: i32, content: &str) -> Result<WireElement> {
    Ok(WireElement::RichMsg(proto::RichMsg {
        template1: payload::pack(content)?,
        service_id,
        ..Default::default()
    }))
}
