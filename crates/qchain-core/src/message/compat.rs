//! Fallback texts for legacy clients.
//!
//! Encoders append these after elements an old client cannot render. The
//! decode cleanup pass strips them again, but only when they immediately
//! follow the element that caused them and match byte for byte.

use crate::message::MessageElement;

pub const MERGED_MESSAGE_FALLBACK: &str = "你的QQ暂不支持查看[转发多条消息]，请期待后续版本。";
pub const POKE_FALLBACK: &str = "[戳一戳]请使用最新版手机QQ体验新功能。";
pub const FLASH_IMAGE_FALLBACK: &str = "[闪照]请使用新版手机QQ查看闪照。";
pub const VOICE_FALLBACK: &str =
    "收到语音消息，你需要升级到最新版QQ才能接收，升级地址https://im.qq.com";

/// Display text of an "@all" mention.
pub const AT_ALL_DISPLAY: &str = "@全体成员";

/// Sender uin of anonymous group messages.
pub const ANONYMOUS_UIN: i64 = 80_000_000;

/// Text expected right after `element` when it was sent for legacy clients.
pub fn fallback_for(element: &MessageElement) -> Option<String> {
    match element {
        MessageElement::Poke(_) => Some(POKE_FALLBACK.to_owned()),
        MessageElement::FlashImage(_) => Some(FLASH_IMAGE_FALLBACK.to_owned()),
        MessageElement::Forward(_) | MessageElement::LongMessage(_) => {
            Some(MERGED_MESSAGE_FALLBACK.to_owned())
        }
        MessageElement::VipFace(v) => Some(v.fallback_text()),
        MessageElement::MarketFace(m) => Some(m.name.clone()),
        MessageElement::Dice(d) => Some(d.name().to_owned()),
        MessageElement::Audio(_) => Some(VOICE_FALLBACK.to_owned()),
        _ => None,
    }
}
