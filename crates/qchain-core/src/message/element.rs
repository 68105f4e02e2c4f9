//! Message elements: the portable, typed units of a chain.

use crate::message::{compat, MessageChain, MessageSource};
use crate::wire::{proto, WireElement};

/// One element of a message chain.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageElement {
    PlainText(String),
    At(At),
    AtAll,
    Face(Face),
    Image(Image),
    FlashImage(Image),
    Audio(Audio),
    Poke(Poke),
    VipFace(VipFace),
    SuperFace(SuperFace),
    MarketFace(MarketFace),
    Dice(Dice),
    Forward(ForwardMessage),
    LongMessage(LongMessageMarker),
    Service(ServiceMessage),
    LightApp(LightApp),
    File(FileMessage),
    QuoteReply(QuoteReply),
    Source(MessageSource),
    Custom(CustomMessage),
    Unsupported(UnsupportedMessage),
}

impl MessageElement {
    /// Stable kind name, used by diagnostics and encoder-completeness errors.
    pub fn kind(&self) -> &'static str {
        match self {
            MessageElement::PlainText(_) => "PlainText",
            MessageElement::At(_) => "At",
            MessageElement::AtAll => "AtAll",
            MessageElement::Face(_) => "Face",
            MessageElement::Image(_) => "Image",
            MessageElement::FlashImage(_) => "FlashImage",
            MessageElement::Audio(_) => "Audio",
            MessageElement::Poke(_) => "Poke",
            MessageElement::VipFace(_) => "VipFace",
            MessageElement::SuperFace(_) => "SuperFace",
            MessageElement::MarketFace(_) => "MarketFace",
            MessageElement::Dice(_) => "Dice",
            MessageElement::Forward(_) => "ForwardMessage",
            MessageElement::LongMessage(_) => "LongMessage",
            MessageElement::Service(_) => "ServiceMessage",
            MessageElement::LightApp(_) => "LightApp",
            MessageElement::File(_) => "FileMessage",
            MessageElement::QuoteReply(_) => "QuoteReply",
            MessageElement::Source(_) => "MessageSource",
            MessageElement::Custom(_) => "CustomMessage",
            MessageElement::Unsupported(_) => "UnsupportedMessage",
        }
    }

    /// Metadata elements carry no visible content.
    pub fn is_metadata(&self) -> bool {
        matches!(self, MessageElement::Source(_) | MessageElement::QuoteReply(_))
    }

    pub fn text(content: impl Into<String>) -> Self {
        MessageElement::PlainText(content.into())
    }

    /// Human-readable rendering used for briefs and summaries.
    pub fn content_to_string(&self) -> String {
        match self {
            MessageElement::PlainText(s) => s.clone(),
            MessageElement::At(at) => at.display.clone(),
            MessageElement::AtAll => compat::AT_ALL_DISPLAY.to_owned(),
            MessageElement::Face(f) => format!("[表情{}]", f.id),
            MessageElement::Image(_) => "[图片]".to_owned(),
            MessageElement::FlashImage(_) => "[闪照]".to_owned(),
            MessageElement::Audio(_) => "[语音]".to_owned(),
            MessageElement::Poke(p) => format!("[{}]", p.name),
            MessageElement::VipFace(v) => v.fallback_text(),
            MessageElement::SuperFace(s) => format!("[{}]", s.name),
            MessageElement::MarketFace(m) => m.name.clone(),
            MessageElement::Dice(d) => format!("{}{}", d.name(), d.value),
            MessageElement::Forward(_) => "[转发的聊天记录]".to_owned(),
            MessageElement::LongMessage(_) => "[长消息]".to_owned(),
            MessageElement::Service(s) => s.content.clone(),
            MessageElement::LightApp(l) => l.content.clone(),
            MessageElement::File(f) => format!("[文件]{}", f.name),
            MessageElement::Custom(_) | MessageElement::Unsupported(_) => String::new(),
            MessageElement::QuoteReply(_) | MessageElement::Source(_) => String::new(),
        }
    }
}

/// Member mention. Equality looks at the target only; the display text is
/// re-resolved on every encode.
#[derive(Debug, Clone)]
pub struct At {
    pub target: i64,
    pub display: String,
}

impl At {
    pub fn new(target: i64) -> Self {
        Self {
            target,
            display: format!("@{target}"),
        }
    }
}

impl PartialEq for At {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub id: i32,
}

/// Image reference, valid for both group and friend conversations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    /// `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}.ext` style id.
    pub id: String,
    pub md5: Vec<u8>,
    pub size: i32,
    pub width: i32,
    pub height: i32,
    pub image_type: i32,
}

impl Image {
    /// Derive the canonical id from an md5 digest.
    pub fn id_from_md5(md5: &[u8], ext: &str) -> String {
        let hex: String = md5.iter().map(|b| format!("{b:02X}")).collect();
        if hex.len() != 32 {
            return format!("{{{hex}}}.{ext}");
        }
        format!(
            "{{{}-{}-{}-{}-{}}}.{ext}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Audio {
    pub file_name: String,
    pub file_md5: Vec<u8>,
    pub file_size: i32,
    /// 0 amr, 1 silk.
    pub codec: i32,
    /// Seconds.
    pub length: i32,
    pub file_key: Vec<u8>,
}

impl Audio {
    pub fn to_ptt(&self, sender: i64) -> proto::Ptt {
        proto::Ptt {
            file_type: 4,
            src_uin: sender,
            file_md5: self.file_md5.clone(),
            file_name: self.file_name.as_bytes().to_vec(),
            file_size: self.file_size,
            bool_valid: true,
            file_key: self.file_key.clone(),
            time: self.length,
            format: self.codec,
            ..Default::default()
        }
    }

    pub fn from_ptt(ptt: &proto::Ptt) -> Self {
        Self {
            file_name: String::from_utf8_lossy(&ptt.file_name).into_owned(),
            file_md5: ptt.file_md5.clone(),
            file_size: ptt.file_size,
            codec: ptt.format,
            length: ptt.time,
            file_key: ptt.file_key.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poke {
    pub name: String,
    pub poke_type: i32,
    pub id: i32,
}

impl Poke {
    pub fn new(name: impl Into<String>, poke_type: i32, id: i32) -> Self {
        Self {
            name: name.into(),
            poke_type,
            id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VipFace {
    pub kind_id: i32,
    pub name: String,
    pub count: i32,
}

impl VipFace {
    pub fn fallback_text(&self) -> String {
        format!("[{}]x{}", self.name, self.count)
    }
}

/// Animated large sticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperFace {
    pub face_id: i32,
    pub sticker_id: String,
    pub sticker_type: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketFace {
    pub name: String,
    pub raw: proto::MarketFace,
}

impl MarketFace {
    pub fn from_raw(raw: proto::MarketFace) -> Self {
        Self {
            name: String::from_utf8_lossy(&raw.face_name).into_owned(),
            raw,
        }
    }
}

/// Dice roll, a market face with fixed resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dice {
    /// 1..=6
    pub value: u8,
}

impl Dice {
    pub const TAB_ID: i32 = 11464;
    const FACE_ID: [u8; 16] = [
        0x48, 0x23, 0xd3, 0xad, 0xb1, 0x5d, 0xf0, 0x80, 0x14, 0xce, 0x5d, 0x67, 0x96, 0xb7, 0x6e,
        0xe1,
    ];
    const KEY: &'static [u8] = b"409e2a69b16918f9";
    const PB_RESERVE: [u8; 18] = [
        0x0A, 0x06, 0x08, 0xAC, 0x02, 0x10, 0xAC, 0x02, 0x0A, 0x06, 0x08, 0xC9, 0x01, 0x10, 0xC9,
        0x01, 0x40, 0x01,
    ];
    const PARAM_PREFIX: &'static str = "rscType?1;value=";

    pub fn name(&self) -> &'static str {
        "[骰子]"
    }

    pub fn to_market_face(self) -> MarketFace {
        MarketFace::from_raw(proto::MarketFace {
            face_name: self.name().as_bytes().to_vec(),
            item_type: 6,
            face_info: 1,
            face_id: Self::FACE_ID.to_vec(),
            tab_id: Self::TAB_ID,
            sub_type: 3,
            key: Self::KEY.to_vec(),
            media_type: 0,
            image_width: 200,
            image_height: 200,
            mobile_param: format!("{}{}", Self::PARAM_PREFIX, self.value.saturating_sub(1))
                .into_bytes(),
            pb_reserve: Self::PB_RESERVE.to_vec(),
            ..Default::default()
        })
    }

    /// Recognize a dice among market faces.
    pub fn from_market_face(raw: &proto::MarketFace) -> Option<Self> {
        if raw.tab_id != Self::TAB_ID {
            return None;
        }
        let param = std::str::from_utf8(&raw.mobile_param).ok()?;
        let v: u8 = param.strip_prefix(Self::PARAM_PREFIX)?.parse().ok()?;
        (v < 6).then_some(Dice { value: v + 1 })
    }
}

/// One node of an application-built forward.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardNode {
    pub sender_id: i64,
    pub sender_name: String,
    pub time: i32,
    pub chain: MessageChain,
}

/// Merged forward card. Freshly built forwards carry `nodes` and no
/// resource id until the sender uploads them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForwardMessage {
    pub content: String,
    pub res_id: Option<String>,
    pub file_name: Option<String>,
    pub title: String,
    pub nodes: Vec<ForwardNode>,
}

impl ForwardMessage {
    pub fn from_nodes(title: impl Into<String>, nodes: Vec<ForwardNode>) -> Self {
        Self {
            title: title.into(),
            nodes,
            ..Default::default()
        }
    }

    pub fn needs_upload(&self) -> bool {
        self.res_id.is_none() && !self.nodes.is_empty()
    }
}

/// Reference card pointing at an uploaded long message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongMessageMarker {
    pub content: String,
    pub res_id: String,
}

/// XML/JSON rich card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMessage {
    pub service_id: i32,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightApp {
    pub content: String,
}

/// Group file feed. Receive-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMessage {
    pub id: String,
    pub bus_id: i32,
    pub name: String,
    pub size: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteReply {
    pub source: MessageSource,
}

/// Application-defined payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomMessage {
    pub type_id: u32,
    pub payload: Vec<u8>,
}

/// A wire element nobody could interpret, kept for re-sending.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedMessage {
    pub raw: WireElement,
}
