#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use qchain_client::collab::{ResourceKind, ResourceUploader, Transport};
use qchain_client::config::ClientConfig;
use qchain_client::resolve::GroupMessageReceipt;
use qchain_client::send::proto::{PbSendMsgReq, PbSendMsgResp};
use qchain_client::{BotIdentity, MessageClient, SendOptions, SendStep};
use qchain_core::error::{QchainError, Result};
use qchain_core::message::{ForwardMessage, ForwardNode, MessageChain, MessageElement, Target};
use qchain_core::wire::{from_elems, WireElement};

const BOT: i64 = 10_000;
const GROUP: i64 = 123_456;

#[derive(Default)]
struct ScriptedTransport {
    replies: Mutex<VecDeque<PbSendMsgResp>>,
    sent: Mutex<Vec<PbSendMsgReq>>,
}

impl ScriptedTransport {
    fn with_replies(replies: Vec<PbSendMsgResp>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            sent: Mutex::default(),
        })
    }

    fn sent(&self) -> Vec<PbSendMsgReq> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send_message(&self, req: PbSendMsgReq) -> Result<PbSendMsgResp> {
        self.sent.lock().unwrap().push(req);
        Ok(self.replies.lock().unwrap().pop_front().unwrap_or_default())
    }
}

#[derive(Default)]
struct MemoryUploader {
    uploads: Mutex<Vec<(ResourceKind, usize)>>,
}

#[async_trait]
impl ResourceUploader for MemoryUploader {
    async fn upload(&self, _target: Target, kind: ResourceKind, payload: Vec<u8>) -> Result<String> {
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push((kind, payload.len()));
        Ok(format!("res-{}", uploads.len()))
    }
}

fn reply(result: i32, errtype: i32) -> PbSendMsgResp {
    PbSendMsgResp {
        result,
        errtype,
        ..Default::default()
    }
}

fn too_large() -> PbSendMsgResp {
    reply(10, 0)
}

struct Harness {
    client: MessageClient,
    transport: Arc<ScriptedTransport>,
    uploader: Arc<MemoryUploader>,
}

fn harness_with(cfg: ClientConfig, replies: Vec<PbSendMsgResp>) -> Harness {
    let transport = ScriptedTransport::with_replies(replies);
    let uploader = Arc::new(MemoryUploader::default());
    let bot = BotIdentity {
        id: BOT,
        nick: "bot".into(),
    };
    let client = MessageClient::new(&cfg, bot, transport.clone(), uploader.clone());
    Harness {
        client,
        transport,
        uploader,
    }
}

fn harness(replies: Vec<PbSendMsgResp>) -> Harness {
    harness_with(ClientConfig::default(), replies)
}

fn wire(req: &PbSendMsgReq) -> Vec<WireElement> {
    let body = req.msg_body.clone().unwrap().rich_text.unwrap();
    from_elems(body.elems)
}

fn long_text_resid(req: &PbSendMsgReq) -> Option<String> {
    wire(req).into_iter().find_map(|e| match e {
        WireElement::GeneralFlags(f) if f.long_text_flag == 1 => Some(f.long_text_resid),
        _ => None,
    })
}

fn ack(group_id: i64, correlation_id: i32, sequence_id: i32) -> GroupMessageReceipt {
    GroupMessageReceipt {
        correlation_id,
        sequence_id,
        group_id,
        time: 0,
    }
}

#[tokio::test]
async fn friend_send_succeeds_at_first_step() {
    let h = harness(vec![]);
    let receipt = h.client.send(Target::Friend(42), "hello").await.unwrap();

    assert_eq!(receipt.step, SendStep::First);
    let sent = h.transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].routing_head.clone().unwrap().c2c.unwrap().to_uin, 42);
    assert_eq!(sent[0].content_head.clone().unwrap().pkg_num, 1);

    // user-directed ids are local and known at once
    let ids = receipt.ensure_sequence_id_available().await.unwrap();
    assert_eq!(ids, vec![sent[0].msg_seq]);
    assert_eq!(receipt.source.internal_ids, vec![sent[0].msg_rand]);
    assert!(h.uploader.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn group_too_large_escalates_to_long_message() {
    let h = harness(vec![too_large()]);
    let text = "x".repeat(300);
    let receipt = h.client.send(Target::Group(GROUP), text.as_str()).await.unwrap();

    assert_eq!(receipt.step, SendStep::LongMessage);
    let sent = h.transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(long_text_resid(&sent[0]), None);
    assert_eq!(long_text_resid(&sent[1]).as_deref(), Some("res-1"));
    assert!(wire(&sent[1]).iter().any(|e| matches!(e, WireElement::RichMsg(_))));

    let uploads = h.uploader.uploads.lock().unwrap().clone();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, ResourceKind::LongMessage);

    let original = receipt.source.original_message();
    assert!(original
        .iter()
        .any(|e| matches!(e, MessageElement::LongMessage(m) if m.res_id == "res-1")));
}

#[tokio::test]
async fn second_too_large_fragments_the_message() {
    let h = harness(vec![too_large(), too_large()]);
    let text = "y".repeat(170);
    let receipt = h.client.send(Target::Group(GROUP), text.as_str()).await.unwrap();

    assert_eq!(receipt.step, SendStep::Fragmented);
    assert!(receipt.is_fragmented());
    let sent = h.transport.sent();
    let fragments = &sent[2..];
    assert_eq!(fragments.len(), 3);

    let heads: Vec<_> = fragments.iter().map(|r| r.content_head.clone().unwrap()).collect();
    assert!(heads.iter().all(|h| h.pkg_num == 3));
    assert_eq!(heads.iter().map(|h| h.pkg_index).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_ne!(heads[0].div_seq, 0);
    assert!(heads.iter().all(|h| h.div_seq == heads[0].div_seq));

    // each fragment has its own correlation id
    assert_eq!(receipt.source.internal_ids.len(), 3);
    assert_eq!(
        receipt.source.internal_ids,
        fragments.iter().map(|r| r.msg_rand).collect::<Vec<_>>()
    );
    assert_eq!(receipt.source.original_message().content_to_string(), text);
}

#[tokio::test]
async fn too_large_at_every_step_fails() {
    let h = harness(vec![too_large(), too_large(), too_large()]);
    let text = "z".repeat(100);
    let err = h.client.send(Target::Group(GROUP), text.as_str()).await.unwrap_err();

    assert_eq!(err.client_code().as_str(), "MESSAGE_TOO_LARGE");
    assert_eq!(err.target(), Some(&Target::Group(GROUP)));
    match err {
        QchainError::MessageTooLarge { content, .. } => assert_eq!(content.content_to_string(), text),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn long_message_can_be_skipped() {
    let h = harness(vec![too_large()]);
    let opts = SendOptions {
        allow_long_message: Some(false),
        ..Default::default()
    };
    let receipt = h
        .client
        .send_with(Target::Group(GROUP), "short", opts)
        .await
        .unwrap();

    assert_eq!(receipt.step, SendStep::Fragmented);
    assert!(h.uploader.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn forced_long_message_starts_there() {
    let h = harness(vec![]);
    let opts = SendOptions {
        force_long_message: true,
        ..Default::default()
    };
    let receipt = h.client.send_with(Target::Group(GROUP), "hi", opts).await.unwrap();

    assert_eq!(receipt.step, SendStep::LongMessage);
    assert_eq!(h.transport.sent().len(), 1);
}

#[tokio::test]
async fn rejections_are_not_retried() {
    let cases = [
        (120, "BOT_MUTED"),
        (104, "AT_ALL_LIMITED"),
        (299, "GROUP_CHAT_LIMITED"),
        (121, "ACCOUNT_RESTRICTED"),
        (7, "SEND_FAILED"),
    ];
    for (errtype, code) in cases {
        let h = harness(vec![reply(1, errtype)]);
        let err = h.client.send(Target::Group(GROUP), "hi").await.unwrap_err();
        assert_eq!(err.client_code().as_str(), code);
        assert_eq!(h.transport.sent().len(), 1, "{code}");
        // the failed send leaves no subscription behind
        assert_eq!(h.client.receipt_bus().subscription_count(), 0, "{code}");
    }
}

#[tokio::test]
async fn friend_over_budget_fails_without_sending() {
    let h = harness(vec![]);
    let text = "a".repeat(6000);
    let err = h.client.send(Target::Friend(42), text.as_str()).await.unwrap_err();

    assert_eq!(err.client_code().as_str(), "MESSAGE_TOO_LARGE");
    assert!(h.transport.sent().is_empty());
}

#[tokio::test]
async fn empty_chain_is_invalid() {
    let h = harness(vec![]);
    let err = h.client.send(Target::Friend(42), MessageChain::new()).await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "INVALID_ELEMENT");
}

#[tokio::test]
async fn group_sequence_id_resolves_from_matching_receipt() {
    let h = harness(vec![]);
    let receipt = h.client.send(Target::Group(GROUP), "hello").await.unwrap();
    let rand = h.transport.sent()[0].msg_rand;

    assert_eq!(h.client.on_group_receipt(&ack(GROUP, rand.wrapping_add(1), 77)), 0);
    assert_eq!(h.client.on_group_receipt(&ack(GROUP + 1, rand, 77)), 0);
    tokio::task::yield_now().await;
    assert!(receipt.source.ids.peek().is_none());

    assert_eq!(h.client.on_group_receipt(&ack(GROUP, rand, 77)), 1);
    let ids = receipt.ensure_sequence_id_available().await.unwrap();
    assert_eq!(ids, vec![77]);

    // settled once: a replayed receipt changes nothing
    assert_eq!(h.client.on_group_receipt(&ack(GROUP, rand, 78)), 0);
    assert_eq!(receipt.ensure_sequence_id_available().await.unwrap(), vec![77]);
}

#[tokio::test]
async fn fragmented_group_ids_resolve_in_order() {
    let h = harness(vec![too_large(), too_large()]);
    let text = "q".repeat(170);
    let receipt = h.client.send(Target::Group(GROUP), text.as_str()).await.unwrap();
    let rands = receipt.source.internal_ids.clone();

    // acks may arrive out of order
    for (i, rand) in rands.iter().enumerate().rev() {
        h.client.on_group_receipt(&ack(GROUP, *rand, 100 + i as i32));
    }
    let ids = receipt.ensure_sequence_id_available().await.unwrap();
    assert_eq!(ids, vec![100, 101, 102]);
}

#[tokio::test]
async fn missing_receipt_times_out() {
    let mut cfg = ClientConfig::default();
    cfg.sequence.receipt_timeout_ms = 100;
    let h = harness_with(cfg, vec![]);
    let receipt = h.client.send(Target::Group(GROUP), "hello").await.unwrap();

    let err = tokio::time::timeout(Duration::from_secs(5), receipt.ensure_sequence_id_available())
        .await
        .expect("resolver must give up first")
        .unwrap_err();
    assert_eq!(err.client_code().as_str(), "SEQUENCE_ID_TIMEOUT");
    assert_eq!(h.client.receipt_bus().subscription_count(), 0);
}

#[tokio::test]
async fn forward_is_uploaded_before_sending() {
    let h = harness(vec![]);
    let nodes = (0..3)
        .map(|i| ForwardNode {
            sender_id: 1000 + i,
            sender_name: format!("user{i}"),
            time: 1_700_000_000,
            chain: MessageChain::from(format!("line {i}").as_str()),
        })
        .collect();
    let chain = MessageChain::from(vec![MessageElement::Forward(ForwardMessage::from_nodes("chat", nodes))]);

    h.client.send(Target::Group(GROUP), chain).await.unwrap();

    let uploads = h.uploader.uploads.lock().unwrap().clone();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, ResourceKind::Forward);
    assert!(uploads[0].1 > 0);
    let sent = h.transport.sent();
    assert_eq!(sent.len(), 1);
    assert!(wire(&sent[0]).iter().any(|e| matches!(e, WireElement::RichMsg(_))));
}

#[tokio::test]
async fn oversized_forward_is_refused() {
    let h = harness(vec![]);
    let nodes = (0..201)
        .map(|i| ForwardNode {
            sender_id: i,
            sender_name: "u".into(),
            time: 0,
            chain: MessageChain::from("x"),
        })
        .collect();
    let chain = MessageChain::from(vec![MessageElement::Forward(ForwardMessage::from_nodes("chat", nodes))]);

    let err = h.client.send(Target::Group(GROUP), chain).await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "MESSAGE_TOO_LARGE");
    assert!(h.uploader.uploads.lock().unwrap().is_empty());
    assert!(h.transport.sent().is_empty());
}
