//! `WireElement`: the validated sum type over `proto::Elem`.
//!
//! A raw elem is a struct of 53 optional fields with exactly one expected to
//! be populated. Conversion enforces that rule; everything downstream matches
//! on a genuine enum. Elems carrying only fields outside the known schema are
//! kept verbatim as `Unknown`.

use tracing::warn;

use crate::error::{QchainError, Result};
use crate::wire::proto;

/// One protocol-level element.
#[derive(Debug, Clone, PartialEq)]
pub enum WireElement {
    Text(proto::Text),
    Face(proto::Face),
    NotOnlineImage(proto::NotOnlineImage),
    TransElemInfo(proto::TransElem),
    MarketFace(proto::MarketFace),
    CustomFace(proto::CustomFace),
    ElemFlags2(proto::ElemFlags2),
    RichMsg(proto::RichMsg),
    ExtraInfo(proto::ExtraInfo),
    VideoFile(proto::VideoFile),
    AnonGroupMsg(proto::AnonymousGroupMsg),
    CustomElem(proto::CustomElem),
    GeneralFlags(proto::GeneralFlags),
    SrcMsg(proto::SourceMsg),
    LightApp(proto::LightAppElem),
    CommonElem(proto::CommonElem),
    /// A field the codec does not interpret, kept byte-for-byte.
    Opaque { tag: u32, payload: Vec<u8> },
    /// Elem whose only fields lie outside the known schema: the raw bytes.
    Unknown(Vec<u8>),
}

/// Opaque elem fields: (tag, accessor).
macro_rules! opaque_fields {
    ($m:ident) => {
        $m!(
            3 => online_image,
            7 => elem_flags,
            10 => fun_face,
            11 => secret_file,
            13 => group_file,
            14 => pub_group,
            15 => market_trans,
            17 => shake_window,
            18 => pub_account,
            20 => tips_info,
            22 => qq_live_old,
            23 => life_online,
            24 => qqwallet_msg,
            25 => crm_elem,
            26 => conference_tips_info,
            27 => redbag_info,
            28 => low_version_tips,
            29 => bankcode_ctrl_info,
            30 => near_by_msg,
            32 => location_info,
            33 => pub_acc_info,
            34 => small_emoji,
            35 => fsj_msg_elem,
            36 => ark_app,
            38 => hc_flash_pic,
            39 => deliver_gift_msg,
            40 => bitapp_msg,
            41 => open_qq_data,
            42 => apollo_msg,
            43 => group_pub_acc_info,
            44 => bless_msg,
            46 => lola_msg,
            47 => group_business_msg,
            48 => msg_workflow_notify,
            49 => pat_elem,
            50 => group_post_elem,
            52 => eim_info
        )
    };
}

impl WireElement {
    /// Short stable name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            WireElement::Text(_) => "text",
            WireElement::Face(_) => "face",
            WireElement::NotOnlineImage(_) => "notOnlineImage",
            WireElement::TransElemInfo(_) => "transElemInfo",
            WireElement::MarketFace(_) => "marketFace",
            WireElement::CustomFace(_) => "customFace",
            WireElement::ElemFlags2(_) => "elemFlags2",
            WireElement::RichMsg(_) => "richMsg",
            WireElement::ExtraInfo(_) => "extraInfo",
            WireElement::VideoFile(_) => "videoFile",
            WireElement::AnonGroupMsg(_) => "anonGroupMsg",
            WireElement::CustomElem(_) => "customElem",
            WireElement::GeneralFlags(_) => "generalFlags",
            WireElement::SrcMsg(_) => "srcMsg",
            WireElement::LightApp(_) => "lightApp",
            WireElement::CommonElem(_) => "commonElem",
            WireElement::Opaque { .. } => "opaque",
            WireElement::Unknown(_) => "unknown",
        }
    }

    pub fn is_general_flags(&self) -> bool {
        matches!(self, WireElement::GeneralFlags(_))
    }

    /// Serialize through the raw container.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            WireElement::Unknown(raw) => raw.clone(),
            other => prost::Message::encode_to_vec(&proto::Elem::from(other.clone())),
        }
    }

    /// Parse and validate one elem.
    ///
    /// Non-empty input whose fields are all outside the schema becomes
    /// `Unknown`; empty input is `INVALID_ELEMENT`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let elem: proto::Elem = prost::Message::decode(bytes)?;
        match classify(elem)? {
            Some(e) => Ok(e),
            None if !bytes.is_empty() => Ok(WireElement::Unknown(bytes.to_vec())),
            None => Err(QchainError::InvalidElement("elem has no populated field".into())),
        }
    }

    /// Encoded byte length inside a rich text body.
    pub fn encoded_len(&self) -> usize {
        match self {
            WireElement::Unknown(raw) => raw.len(),
            other => prost::Message::encoded_len(&proto::Elem::from(other.clone())),
        }
    }
}

impl TryFrom<proto::Elem> for WireElement {
    type Error = QchainError;

    fn try_from(elem: proto::Elem) -> Result<Self> {
        classify(elem)?.ok_or_else(|| QchainError::InvalidElement("elem has no populated field".into()))
    }
}

/// The single populated field of `elem`, `None` if there is none.
fn classify(elem: proto::Elem) -> Result<Option<WireElement>> {
    let mut found: Vec<WireElement> = Vec::with_capacity(1);

    macro_rules! typed {
        ($($field:ident => $variant:ident),* $(,)?) => {
            $( if let Some(v) = elem.$field { found.push(WireElement::$variant(v)); } )*
        };
    }
    macro_rules! opaque {
        ($($tag:literal => $field:ident),* $(,)?) => {
            $( if let Some(payload) = elem.$field { found.push(WireElement::Opaque { tag: $tag, payload }); } )*
        };
    }

    typed!(
        text => Text,
        face => Face,
        not_online_image => NotOnlineImage,
        trans_elem_info => TransElemInfo,
        market_face => MarketFace,
        custom_face => CustomFace,
        elem_flags2 => ElemFlags2,
        rich_msg => RichMsg,
        extra_info => ExtraInfo,
        video_file => VideoFile,
        anon_group_msg => AnonGroupMsg,
        custom_elem => CustomElem,
        general_flags => GeneralFlags,
        src_msg => SrcMsg,
        light_app => LightApp,
        common_elem => CommonElem,
    );
    opaque_fields!(opaque);

    match found.len() {
        0 | 1 => Ok(found.pop()),
        n => {
            let kinds: Vec<&str> = found.iter().map(|e| e.kind()).collect();
            Err(QchainError::InvalidElement(format!(
                "elem has {n} populated fields: {}",
                kinds.join(",")
            )))
        }
    }
}

impl From<WireElement> for proto::Elem {
    fn from(e: WireElement) -> Self {
        let mut elem = proto::Elem::default();
        match e {
            WireElement::Text(v) => elem.text = Some(v),
            WireElement::Face(v) => elem.face = Some(v),
            WireElement::NotOnlineImage(v) => elem.not_online_image = Some(v),
            WireElement::TransElemInfo(v) => elem.trans_elem_info = Some(v),
            WireElement::MarketFace(v) => elem.market_face = Some(v),
            WireElement::CustomFace(v) => elem.custom_face = Some(v),
            WireElement::ElemFlags2(v) => elem.elem_flags2 = Some(v),
            WireElement::RichMsg(v) => elem.rich_msg = Some(v),
            WireElement::ExtraInfo(v) => elem.extra_info = Some(v),
            WireElement::VideoFile(v) => elem.video_file = Some(v),
            WireElement::AnonGroupMsg(v) => elem.anon_group_msg = Some(v),
            WireElement::CustomElem(v) => elem.custom_elem = Some(v),
            WireElement::GeneralFlags(v) => elem.general_flags = Some(v),
            WireElement::SrcMsg(v) => elem.src_msg = Some(v),
            WireElement::LightApp(v) => elem.light_app = Some(v),
            WireElement::CommonElem(v) => elem.common_elem = Some(v),
            WireElement::Opaque { tag, payload } => {
                macro_rules! put {
                    ($($t:literal => $field:ident),* $(,)?) => {
                        match tag {
                            $( $t => elem.$field = Some(payload), )*
                            other => warn!(tag = other, "opaque elem tag has no slot, dropped"),
                        }
                    };
                }
                opaque_fields!(put);
            }
            WireElement::Unknown(raw) => {
                if let Ok(decoded) = <proto::Elem as prost::Message>::decode(raw.as_slice()) {
                    elem = decoded;
                }
            }
        }
        elem
    }
}

/// Validate a received elem list. Elems breaking the one-variant rule are
/// dropped with a diagnostic.
pub fn from_elems(elems: Vec<Vec<u8>>) -> Vec<WireElement> {
    elems
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| match WireElement::from_bytes(&raw) {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(index, error = %err, "dropping malformed elem");
                None
            }
        })
        .collect()
}

/// Serialize back into raw elem bytes.
pub fn to_elems(elements: &[WireElement]) -> Vec<Vec<u8>> {
    elements.iter().map(WireElement::to_bytes).collect()
}
