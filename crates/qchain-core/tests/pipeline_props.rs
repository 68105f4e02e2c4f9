//! Decode/encode pipeline properties.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use qchain_core::message::compat::{ANONYMOUS_UIN, MERGED_MESSAGE_FALLBACK, POKE_FALLBACK};
use qchain_core::message::*;
use qchain_core::pipeline::{self, DecodeContext, EncodeContext, FlagsProposal, MemberDirectory};
use qchain_core::wire::{attr, payload, proto, WireElement};

const GROUP: i64 = 1000;
const BOT: i64 = 42;

fn group_ctx() -> EncodeContext {
    EncodeContext::for_target(Target::Group(GROUP), BOT)
}

fn decode_group(elements: &[WireElement]) -> MessageChain {
    pipeline::decode(elements, &DecodeContext::group(GROUP, 555))
}

fn content(chain: &MessageChain) -> Vec<MessageElement> {
    chain.without_source().into_elements()
}

fn image() -> Image {
    let md5 = vec![0xAB; 16];
    Image {
        id: Image::id_from_md5(&md5, "jpg"),
        md5,
        size: 2048,
        width: 64,
        height: 48,
        image_type: 1000,
    }
}

fn flags_count(out: &[WireElement]) -> usize {
    out.iter().filter(|e| e.is_general_flags()).count()
}

struct Directory;

impl MemberDirectory for Directory {
    fn member_name(&self, group: i64, uin: i64) -> Option<String> {
        (group == GROUP && uin == 555).then(|| "Alice😀".to_owned())
    }
}

#[test]
fn plain_text_to_group() {
    let chain = MessageChain::from("hello");
    let out = pipeline::encode(&chain, &group_ctx()).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(
        out[0],
        WireElement::Text(proto::Text {
            str: "hello".into(),
            ..Default::default()
        })
    );
    assert_eq!(out[1], FlagsProposal::Default.realize());
}

#[test]
fn text_decodes_with_leading_source() {
    let ctx = DecodeContext::group(GROUP, 555).with_ids(vec![7], vec![99]).at(1_700_000_000);
    let chain = pipeline::decode(
        &[WireElement::Text(proto::Text {
            str: "hi".into(),
            ..Default::default()
        })],
        &ctx,
    );
    assert_eq!(chain.len(), 2);
    let source = chain.source().unwrap();
    assert!(matches!(chain.elements()[0], MessageElement::Source(_)));
    assert_eq!(source.sequence_ids(), Some(vec![7]));
    assert_eq!(source.internal_ids, vec![99]);
    assert_eq!(source.from_id, 555);
    assert_eq!(source.target_id, GROUP);
    assert_eq!(chain.elements()[1], MessageElement::text("hi"));
    assert_eq!(source.original_message(), &MessageChain::from("hi"));
}

#[test]
fn attr_with_zero_uin_is_at_all() {
    let chain = decode_group(&[WireElement::Text(proto::Text {
        str: "@all".into(),
        attr6_buf: attr::encode_at_attr("@all", attr::FLAG_ALL, 0),
        ..Default::default()
    })]);
    assert_eq!(content(&chain), vec![MessageElement::AtAll]);
}

#[test]
fn all_flag_marks_at_all_whatever_the_uin() {
    let chain = decode_group(&[WireElement::Text(proto::Text {
        str: "@all".into(),
        attr6_buf: attr::encode_at_attr("@all", attr::FLAG_ALL, 12345),
        ..Default::default()
    })]);
    assert_eq!(content(&chain), vec![MessageElement::AtAll]);

    let chain = decode_group(&[WireElement::Text(proto::Text {
        str: "@bob".into(),
        attr6_buf: attr::encode_at_attr("@bob", attr::FLAG_MEMBER, 12345),
        ..Default::default()
    })]);
    assert!(matches!(&content(&chain)[..], [MessageElement::At(a)] if a.target == 12345));
}

#[test]
fn mention_outside_uin_range_is_rejected() {
    for target in [i64::from(u32::MAX) + 1, -1] {
        let chain = MessageChain::from(vec![MessageElement::At(At::new(target))]);
        let err = pipeline::encode(&chain, &group_ctx()).unwrap_err();
        assert_eq!(err.client_code().as_str(), "INVALID_ELEMENT");
    }
}

#[test]
fn poke_fallback_is_stripped_on_decode() {
    let poke = MessageElement::Poke(Poke::new("戳一戳", 1, 1));
    let out = pipeline::encode(&MessageChain::from(vec![poke.clone()]), &group_ctx()).unwrap();

    assert!(matches!(out[0], WireElement::CommonElem(ref c) if c.service_type == 2 && c.business_type == 1));
    assert_eq!(
        out[1],
        WireElement::Text(proto::Text {
            str: POKE_FALLBACK.into(),
            ..Default::default()
        })
    );

    let chain = decode_group(&out);
    assert_eq!(content(&chain), vec![poke]);
}

#[test]
fn rich_flags_win_over_flash() {
    let forward = MessageElement::Forward(ForwardMessage {
        content: r#"<msg serviceID="35" m_resid="abc" m_fileName="f1" multiMsgFlag="0" action="viewMultiMsg"/>"#.into(),
        res_id: Some("abc".into()),
        file_name: Some("f1".into()),
        ..Default::default()
    });
    let chain = MessageChain::from(vec![MessageElement::FlashImage(image()), forward]);
    let out = pipeline::encode(&chain, &group_ctx()).unwrap();

    assert_eq!(flags_count(&out), 1);
    assert_eq!(out.last(), Some(&FlagsProposal::RichMessage.realize()));
    assert!(out.iter().any(|e| matches!(e, WireElement::Text(t) if t.str == MERGED_MESSAGE_FALLBACK)));
}

#[test]
fn long_message_flags_carry_resource_id() {
    let chain = MessageChain::from(vec![
        MessageElement::Service(ServiceMessage {
            service_id: 1,
            content: "{}".into(),
        }),
        MessageElement::LongMessage(LongMessageMarker {
            content: r#"<msg serviceID="35" m_resid="res1" multiMsgFlag="1"/>"#.into(),
            res_id: "res1".into(),
        }),
    ]);
    let out = pipeline::encode(&chain, &group_ctx()).unwrap();
    let Some(WireElement::GeneralFlags(flags)) = out.last() else {
        panic!("flags must be last");
    };
    assert_eq!(flags.long_text_flag, 1);
    assert_eq!(flags.long_text_resid, "res1");
}

#[test]
fn round_trip_group() {
    let md5 = vec![1u8; 16];
    let chain = MessageChain::from(vec![
        MessageElement::text("a"),
        MessageElement::At(At::new(7)),
        MessageElement::AtAll,
        MessageElement::Face(Face { id: 1 }),
        MessageElement::Face(Face { id: 300 }),
        MessageElement::Image(image()),
        MessageElement::VipFace(VipFace {
            kind_id: 9,
            name: "榴莲".into(),
            count: 2,
        }),
        MessageElement::SuperFace(SuperFace {
            face_id: 5,
            sticker_id: "16".into(),
            sticker_type: 1,
            name: "/流泪".into(),
        }),
        MessageElement::Poke(Poke::new("比心", 2, 0)),
        MessageElement::FlashImage(Image {
            id: Image::id_from_md5(&md5, "png"),
            md5,
            ..Default::default()
        }),
        MessageElement::Dice(Dice { value: 3 }),
        MessageElement::Service(ServiceMessage {
            service_id: 1,
            content: r#"{"app":"com.tencent.x"}"#.into(),
        }),
        MessageElement::LightApp(LightApp {
            content: r#"{"view":"news"}"#.into(),
        }),
        MessageElement::LongMessage(LongMessageMarker {
            content: r#"<msg serviceID="35" m_resid="res1" multiMsgFlag="1"/>"#.into(),
            res_id: "res1".into(),
        }),
        MessageElement::Custom(CustomMessage {
            type_id: 9,
            payload: vec![1, 2, 3],
        }),
        MessageElement::text("end"),
    ]);

    let out = pipeline::encode(&chain, &group_ctx()).unwrap();
    assert_eq!(flags_count(&out), 1);
    assert!(out.last().unwrap().is_general_flags());

    let decoded = decode_group(&out);
    assert_eq!(content(&decoded), chain.into_elements());
}

#[test]
fn round_trip_friend_images() {
    let ctx = EncodeContext::for_target(Target::Friend(555), BOT);
    let chain = MessageChain::from(vec![
        MessageElement::Image(image()),
        MessageElement::FlashImage(image()),
    ]);
    let out = pipeline::encode(&chain, &ctx).unwrap();
    assert!(matches!(out[0], WireElement::NotOnlineImage(_)));
    assert_eq!(out.last(), Some(&FlagsProposal::FlashImage.realize()));

    let decoded = pipeline::decode(&out, &DecodeContext::friend(555, BOT));
    assert_eq!(content(&decoded), chain.into_elements());
}

#[test]
fn encoding_is_deterministic() {
    let chain = MessageChain::from(vec![
        MessageElement::text("x"),
        MessageElement::LightApp(LightApp {
            content: "{\"a\":1}".into(),
        }),
        MessageElement::Dice(Dice { value: 6 }),
    ]);
    let a = pipeline::encode(&chain, &group_ctx()).unwrap();
    let b = pipeline::encode(&chain, &group_ctx()).unwrap();
    assert_eq!(a, b);
    let bytes_a: Vec<Vec<u8>> = a.iter().map(|e| e.to_bytes()).collect();
    let bytes_b: Vec<Vec<u8>> = b.iter().map(|e| e.to_bytes()).collect();
    assert_eq!(bytes_a, bytes_b);
}

#[test]
fn quote_reply_emits_source_first_and_mentions_sender() {
    let received = pipeline::decode(
        &[WireElement::Text(proto::Text {
            str: "original".into(),
            ..Default::default()
        })],
        &DecodeContext::group(GROUP, 555)
            .with_ids(vec![77], vec![99])
            .at(1_700_000_000),
    );
    let source = received.source().unwrap().clone();

    let reply = MessageChain::from(vec![
        MessageElement::text("reply"),
        MessageElement::QuoteReply(QuoteReply {
            source: source.clone(),
        }),
    ]);
    let ctx = group_ctx().with_directory(Arc::new(Directory));
    let out = pipeline::encode(&reply, &ctx).unwrap();

    let WireElement::SrcMsg(src) = &out[0] else {
        panic!("srcMsg must come first, got {}", out[0].kind());
    };
    assert_eq!(src.orig_seqs, vec![77]);
    assert_eq!(src.sender_uin, 555);
    assert_eq!(src.flag, 1);
    assert_eq!(src.elems.len(), 1);

    let WireElement::Text(at) = &out[1] else { panic!("mention expected") };
    assert_eq!(at.str, "@Alice");
    assert_eq!(attr::read_at_target(&at.attr6_buf), Some(555));

    let WireElement::Text(text) = &out[2] else { panic!("text expected") };
    assert_eq!(text.str, "reply");

    let decoded = decode_group(&out);
    let elements = content(&decoded);
    assert_eq!(elements.len(), 2, "mention artifact must be dropped: {elements:?}");
    let MessageElement::QuoteReply(q) = &elements[0] else { panic!("quote expected") };
    assert_eq!(q.source, source);
    assert_eq!(q.source.original_message(), &MessageChain::from("original"));
    assert_eq!(elements[1], MessageElement::text("reply"));
}

#[test]
fn mention_falls_back_to_uin() {
    let out = pipeline::encode(&MessageChain::from(vec![MessageElement::At(At::new(31337))]), &group_ctx()).unwrap();
    let WireElement::Text(t) = &out[0] else { panic!() };
    assert_eq!(t.str, "@31337");
    assert_eq!(t.attr6_buf.len(), attr::AT_ATTR_LEN);
}

#[test]
fn file_messages_cannot_be_encoded() {
    let chain = MessageChain::from(vec![MessageElement::File(FileMessage {
        id: "/abc".into(),
        bus_id: 102,
        name: "a.txt".into(),
        size: 6,
    })]);
    let err = pipeline::encode(&chain, &group_ctx()).unwrap_err();
    assert_eq!(err.client_code().as_str(), "UNENCODABLE_ELEMENT");
    assert!(err.to_string().contains("FileMessage"));
}

#[test]
fn forward_must_be_uploaded_first() {
    let chain = MessageChain::from(vec![MessageElement::Forward(ForwardMessage::from_nodes(
        "群聊的聊天记录",
        vec![ForwardNode {
            sender_id: 1,
            sender_name: "a".into(),
            time: 0,
            chain: MessageChain::from("x"),
        }],
    ))]);
    let err = pipeline::encode(&chain, &group_ctx()).unwrap_err();
    assert_eq!(err.client_code().as_str(), "INVALID_ELEMENT");
}

#[test]
fn long_message_resid_recovered_from_flags() {
    let rich = WireElement::RichMsg(proto::RichMsg {
        template1: payload::pack(r#"<msg serviceID="35" multiMsgFlag="1"/>"#).unwrap(),
        service_id: 35,
        ..Default::default()
    });
    let flags = WireElement::GeneralFlags(proto::GeneralFlags {
        long_text_flag: 1,
        long_text_resid: "R9".into(),
        ..Default::default()
    });

    let chain = decode_group(&[rich.clone(), flags]);
    let elements = content(&chain);
    assert!(matches!(&elements[..], [MessageElement::LongMessage(m)] if m.res_id == "R9"));

    // nothing to recover from: dropped, not surfaced as an error
    let chain = decode_group(&[rich]);
    assert!(content(&chain).is_empty());
}

#[test]
fn service_id_zero_reads_xml() {
    let rich = WireElement::RichMsg(proto::RichMsg {
        template1: payload::pack(r#"<msg serviceID="14" brief="x"/>"#).unwrap(),
        service_id: 0,
        ..Default::default()
    });
    let elements = content(&decode_group(&[rich]));
    assert!(matches!(&elements[..], [MessageElement::Service(s)] if s.service_id == 14));
}

#[test]
fn anonymous_sender_marks_source() {
    let chain = decode_group(&[
        WireElement::AnonGroupMsg(proto::AnonymousGroupMsg {
            flags: 2,
            anon_nick: "匿名".as_bytes().to_vec(),
            ..Default::default()
        }),
        WireElement::Text(proto::Text {
            str: "x".into(),
            ..Default::default()
        }),
    ]);
    assert_eq!(chain.source().unwrap().from_id, ANONYMOUS_UIN);
    assert_eq!(content(&chain), vec![MessageElement::text("x")]);
}

#[test]
fn opaque_elements_survive_round_trip() {
    let opaque = WireElement::Opaque {
        tag: 17,
        payload: vec![0x08, 0x01],
    };
    let chain = decode_group(&[opaque.clone()]);
    let out = pipeline::encode(&chain, &group_ctx()).unwrap();
    assert_eq!(out[0], opaque);
}

#[test]
fn sentinel_text_is_stripped_only_after_its_element() {
    // a user text identical to the sentinel after a poke is indistinguishable
    let chain = decode_group(&[
        WireElement::Text(proto::Text {
            str: POKE_FALLBACK.into(),
            ..Default::default()
        }),
    ]);
    assert_eq!(content(&chain), vec![MessageElement::text(POKE_FALLBACK)]);
}

#[test]
fn only_one_sentinel_is_stripped_per_element() {
    let poke = MessageElement::Poke(Poke::new("戳一戳", 1, 1));
    let user_text = MessageElement::text(POKE_FALLBACK);
    let chain = MessageChain::from(vec![poke.clone(), user_text.clone()]);
    let out = pipeline::encode(&chain, &group_ctx()).unwrap();

    let decoded = decode_group(&out);
    assert_eq!(content(&decoded), vec![poke, user_text]);
}

#[test]
fn unknown_elem_survives_rich_text_round_trip() {
    let raw = vec![0x9a, 0x06, 0x02, 0x08, 0x01];
    let body = proto::RichText {
        elems: vec![raw.clone()],
        ptt: None,
    };
    let chain = pipeline::decode_rich_text(&body, &DecodeContext::group(GROUP, 555));
    assert!(matches!(
        &content(&chain)[..],
        [MessageElement::Unsupported(u)] if u.raw == WireElement::Unknown(raw.clone())
    ));

    let again = pipeline::encode_rich_text(&chain, &group_ctx()).unwrap();
    assert_eq!(again.elems[0], raw);
    assert_eq!(again.elems.len(), 2);
}

fn file_entry(name: &str) -> Vec<u8> {
    use prost::Message as _;
    proto::ObjMsg {
        msg_type: 6,
        msg_content_info: vec![proto::MsgContentInfo {
            msg_file: Some(proto::MsgFile {
                bus_id: 102,
                file_path: format!("/{name}"),
                file_size: 4096,
                file_name: name.into(),
                ..Default::default()
            }),
            ..Default::default()
        }],
    }
    .encode_to_vec()
}

fn file_feed(lead: u8, entries: &[Vec<u8>]) -> WireElement {
    let mut value = vec![lead];
    for e in entries {
        value.extend_from_slice(&(e.len() as u16).to_be_bytes());
        value.extend_from_slice(e);
    }
    WireElement::TransElemInfo(proto::TransElem {
        elem_type: 24,
        elem_value: value,
    })
}

#[test]
fn group_file_feed_decodes_to_files() {
    let chain = decode_group(&[file_feed(1, &[file_entry("a.txt")])]);
    match &content(&chain)[..] {
        [MessageElement::File(f)] => {
            assert_eq!(f.name, "a.txt");
            assert_eq!(f.id, "/a.txt");
            assert_eq!(f.bus_id, 102);
            assert_eq!(f.size, 4096);
        }
        other => panic!("unexpected chain: {other:?}"),
    }
}

#[test]
fn unreadable_file_feeds_stay_unsupported() {
    // wrong lead byte
    let chain = decode_group(&[file_feed(2, &[file_entry("a.txt")])]);
    assert!(matches!(&content(&chain)[..], [MessageElement::Unsupported(_)]));

    // declared length runs past the end
    let mut truncated = file_feed(1, &[file_entry("a.txt")]);
    if let WireElement::TransElemInfo(t) = &mut truncated {
        t.elem_value.truncate(t.elem_value.len() - 3);
    }
    let chain = decode_group(&[truncated]);
    assert!(matches!(&content(&chain)[..], [MessageElement::Unsupported(_)]));

    // entries before the cut are kept
    let mut partial = file_feed(1, &[file_entry("a.txt"), file_entry("b.txt")]);
    if let WireElement::TransElemInfo(t) = &mut partial {
        t.elem_value.truncate(t.elem_value.len() - 3);
    }
    let chain = decode_group(&[partial]);
    assert!(matches!(&content(&chain)[..], [MessageElement::File(f)] if f.name == "a.txt"));

    // other trans elem types are not file feeds
    let chain = decode_group(&[WireElement::TransElemInfo(proto::TransElem {
        elem_type: 1,
        elem_value: vec![1, 0, 0],
    })]);
    assert!(matches!(&content(&chain)[..], [MessageElement::Unsupported(_)]));
}

#[test]
fn custom_elem_round_trip_and_foreign_types() {
    let custom = MessageElement::Custom(CustomMessage {
        type_id: 7,
        payload: b"hi".to_vec(),
    });
    let out = pipeline::encode(&MessageChain::from(vec![custom.clone()]), &group_ctx()).unwrap();
    assert!(matches!(&out[0], WireElement::CustomElem(c) if c.data == [0, 0, 0, 7, b'h', b'i']));
    assert_eq!(content(&decode_group(&out)), vec![custom]);

    let foreign = WireElement::CustomElem(proto::CustomElem {
        data: vec![0, 0, 0, 7],
        enum_type: 1,
        ..Default::default()
    });
    let short = WireElement::CustomElem(proto::CustomElem {
        data: vec![0, 7],
        enum_type: 103_904_510,
        ..Default::default()
    });
    for raw in [foreign, short] {
        let chain = decode_group(&[raw.clone()]);
        assert!(
            matches!(&content(&chain)[..], [MessageElement::Unsupported(u)] if u.raw == raw),
            "{raw:?}"
        );
    }
}

#[test]
fn voice_body_round_trip() {
    let audio = Audio {
        file_name: "a.amr".into(),
        file_md5: vec![3; 16],
        file_size: 1200,
        codec: 1,
        length: 4,
        file_key: vec![],
    };
    let chain = MessageChain::from(vec![MessageElement::Audio(audio.clone())]);
    let rich = pipeline::encode_rich_text(&chain, &group_ctx()).unwrap();
    assert!(rich.ptt.is_some());
    assert_eq!(rich.elems.len(), 3);

    let decoded = pipeline::decode_rich_text(&rich, &DecodeContext::group(GROUP, 555));
    assert_eq!(content(&decoded), vec![MessageElement::Audio(audio)]);
}
