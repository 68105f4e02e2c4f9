//! Uploaded message bodies: long-message conversion and forward rendering.

use prost::Message as _;
use rand::Rng;

use qchain_core::error::Result;
use qchain_core::message::{ForwardMessage, ForwardNode, LongMessageMarker, Target};
use qchain_core::pipeline::{self, EncodeContext};
use qchain_core::wire::payload;

use crate::send::proto::{MsgBody, MultiMsgTransmit, TransmitGroupInfo, TransmitMsg, TransmitMsgHead};

/// Nodes a single forward may carry.
pub const MAX_FORWARD_NODES: usize = 200;

/// Characters of the brief shown on a long-message card.
const BRIEF_CHARS: usize = 30;

/// Preview lines rendered on a forward card.
const FORWARD_PREVIEW_LINES: usize = 4;

const MSG_TYPE_GROUP: i32 = 82;
const MSG_TYPE_C2C: i32 = 9;

/// Serialize `nodes` as the zlib-compressed transmit body the uploader stores.
pub fn transmit_body(target: Target, bot_id: i64, nodes: &[ForwardNode]) -> Result<Vec<u8>> {
    let ctx = EncodeContext::detached(bot_id);
    let mut rng = rand::thread_rng();

    let mut msg = Vec::with_capacity(nodes.len());
    for node in nodes {
        let rich_text = pipeline::encode_rich_text(&node.chain, &ctx)?;
        let group_info = match target {
            Target::Group(code) => Some(TransmitGroupInfo {
                group_code: code,
                group_card: node.sender_name.as_bytes().to_vec(),
            }),
            _ => None,
        };
        msg.push(TransmitMsg {
            head: Some(TransmitMsgHead {
                from_uin: node.sender_id,
                to_uin: target.id(),
                msg_type: if target.is_group() { MSG_TYPE_GROUP } else { MSG_TYPE_C2C },
                msg_seq: rng.gen_range(1..i32::MAX),
                msg_time: node.time,
                msg_uid: 0x0100_0000_0000_0000 | i64::from(rng.gen_range(1..i32::MAX)),
                group_info,
                from_nick: node.sender_name.clone(),
            }),
            body: Some(MsgBody {
                rich_text: Some(rich_text),
            }),
        });
    }

    payload::deflate(&MultiMsgTransmit { msg }.encode_to_vec())
}

/// Reference card replacing the content of a long message.
pub fn long_message_card(content: &str, res_id: &str, time: i64) -> LongMessageMarker {
    let brief = escape_xml(&limit_brief(content));
    let res_id_attr = escape_xml(res_id);
    let xml = format!(
        concat!(
            r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>"#,
            r#"<msg serviceID="35" templateID="1" action="viewMultiMsg" brief="{brief}" "#,
            r#"m_resid="{res_id}" m_fileName="{time}" sourceMsgId="0" url="" "#,
            r#"flag="3" adverSign="0" multiMsgFlag="1">"#,
            r#"<item layout="1"><title>{brief}</title><hr hidden="false" style="0"/>"#,
            r#"<summary>点击查看完整消息</summary></item>"#,
            r#"<source name="聊天记录" icon="" action="" appid="-1"/></msg>"#,
        ),
        brief = brief,
        res_id = res_id_attr,
        time = time,
    );
    LongMessageMarker {
        content: xml,
        res_id: res_id.to_owned(),
    }
}

/// Card for an uploaded forward; keeps the nodes for local inspection.
pub fn render_forward(forward: &ForwardMessage, res_id: &str, time: i64) -> ForwardMessage {
    let title = if forward.title.is_empty() {
        "群聊的聊天记录"
    } else {
        forward.title.as_str()
    };
    let preview: String = forward
        .nodes
        .iter()
        .take(FORWARD_PREVIEW_LINES)
        .map(|n| {
            format!(
                r##"<title size="26" color="#777777" maxLines="2" lineSpace="12">{}: {}</title>"##,
                escape_xml(&n.sender_name),
                escape_xml(&limit_brief(&n.chain.content_to_string())),
            )
        })
        .collect();
    let xml = format!(
        concat!(
            r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>"#,
            r#"<msg serviceID="35" templateID="1" action="viewMultiMsg" brief="[聊天记录]" "#,
            r#"m_resid="{res_id}" m_fileName="{time}" tSum="3" sourceMsgId="0" url="" "#,
            r#"flag="3" adverSign="0" multiMsgFlag="0">"#,
            r#"<item layout="1" advertiser_id="0" aid="0">"#,
            r#"<title size="34" maxLines="2" lineSpace="12">{title}</title>{preview}"#,
            r#"<hr hidden="false" style="0"/>"#,
            r##"<summary size="26" color="#777777">查看{count}条转发消息</summary></item>"##,
            r#"<source name="聊天记录" icon="" action="" appid="-1"/></msg>"#,
        ),
        res_id = escape_xml(res_id),
        time = time,
        title = escape_xml(title),
        preview = preview,
        count = forward.nodes.len(),
    );
    ForwardMessage {
        content: xml,
        res_id: Some(res_id.to_owned()),
        file_name: Some(time.to_string()),
        title: title.to_owned(),
        nodes: forward.nodes.clone(),
    }
}

fn limit_brief(content: &str) -> String {
    if content.chars().count() > BRIEF_CHARS {
        let mut s: String = content.chars().take(BRIEF_CHARS).collect();
        s.push('…');
        s
    } else {
        content.to_owned()
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use qchain_core::message::MessageChain;
    use qchain_core::wire::payload::xml_attr;

    #[test]
    fn long_card_carries_resource_id() {
        let card = long_message_card(&"a".repeat(40), "res<1>", 1_700_000_000);
        assert_eq!(card.res_id, "res<1>");
        assert_eq!(xml_attr(&card.content, "m_resid"), "res&lt;1&gt;");
        assert_eq!(xml_attr(&card.content, "multiMsgFlag"), "1");
        assert!(card.content.contains(&format!("{}…", "a".repeat(30))));
    }

    #[test]
    fn forward_card_is_a_forward_on_decode() {
        let forward = ForwardMessage::from_nodes(
            "",
            vec![ForwardNode {
                sender_id: 1,
                sender_name: "Bob".into(),
                time: 10,
                chain: MessageChain::from("hi"),
            }],
        );
        let rendered = render_forward(&forward, "R1", 160023);
        assert!(!rendered.needs_upload());
        assert_eq!(xml_attr(&rendered.content, "multiMsgFlag"), "0");
        assert_eq!(xml_attr(&rendered.content, "action"), "viewMultiMsg");
        assert!(rendered.content.contains("Bob: hi"));
        assert!(rendered.content.contains("查看1条转发消息"));
    }
}
