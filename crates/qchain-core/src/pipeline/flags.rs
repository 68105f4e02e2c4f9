//! Trailing general-flags selection.
//!
//! Encoders propose a flags variant; after the worklist drains exactly one is
//! realized, by fixed precedence:
//! long message > market face > rich message > flash image > ptt > default.

use crate::wire::{proto, WireElement};

const PB_RESERVE_RICH: &[u8] = &[
    0x08, 0x09, 0x78, 0x00, 0xC8, 0x01, 0x00, 0xF0, 0x01, 0x00, 0xF8, 0x01,
    0x00, 0x90, 0x02, 0x00, 0xC8, 0x02, 0x00, 0x98, 0x03, 0x00, 0xA0, 0x03,
    0x20, 0xB0, 0x03, 0x00, 0xC0, 0x03, 0x00, 0xD0, 0x03, 0x00, 0xE8, 0x03,
    0x00, 0x8A, 0x04, 0x02, 0x08, 0x03, 0x90, 0x04, 0x80, 0x80, 0x80, 0x10,
    0xB8, 0x04, 0x00, 0xC0, 0x04, 0x00,
];
const PB_RESERVE_PTT: &[u8] = &[
    0x78, 0x00, 0xF8, 0x01, 0x00, 0xC8, 0x02, 0x00, 0xAA, 0x03, 0x26, 0x08,
    0x22, 0x12, 0x22, 0x41, 0x20, 0x41, 0x3B, 0x25, 0x3E, 0x16, 0x45, 0x3F,
    0x43, 0x2F, 0x29, 0x3E, 0x44, 0x24, 0x14, 0x18, 0x46, 0x3D, 0x2B, 0x4A,
    0x44, 0x3A, 0x18, 0x2E, 0x19, 0x29, 0x1B, 0x26, 0x32, 0x31, 0x31, 0x29,
    0x43,
];
const PB_RESERVE_FLASH: &[u8] = &[
    0x78, 0x00, 0x90, 0x01, 0x01, 0xF8, 0x01, 0x00, 0xA0, 0x02, 0x00, 0xC8,
    0x02, 0x00,
];
const PB_RESERVE_MARKET_FACE: &[u8] = &[
    0x02, 0x78, 0x80, 0x80, 0x04, 0xC8, 0x01, 0x00, 0xF0, 0x01, 0x00, 0xF8,
    0x01, 0x00, 0x90, 0x02, 0x00, 0xC8, 0x02, 0x00, 0x98, 0x03, 0x00, 0xA0,
    0x03, 0x00, 0xB0, 0x03, 0x00, 0xC0, 0x03, 0x00, 0xD0, 0x03, 0x00, 0xE8,
    0x03, 0x00, 0x8A, 0x04, 0x04, 0x08, 0x02, 0x10, 0x3B, 0x90, 0x04, 0x80,
    0xC0, 0x80, 0x80, 0x04, 0xB8, 0x04, 0x00, 0xC0, 0x04, 0x00, 0xCA, 0x04,
    0x00, 0xF8, 0x04, 0x80, 0x80, 0x04, 0x88, 0x05, 0x00,
];
const PB_RESERVE_DEFAULT: &[u8] = &[0x78, 0x00, 0xF8, 0x01, 0x00, 0xC8, 0x02, 0x00];

/// Candidate trailing flags element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagsProposal {
    LongMessage { res_id: String },
    MarketFace,
    RichMessage,
    FlashImage,
    Ptt,
    Default,
}

impl FlagsProposal {
    fn rank(&self) -> u8 {
        match self {
            FlagsProposal::LongMessage { .. } => 0,
            FlagsProposal::MarketFace => 1,
            FlagsProposal::RichMessage => 2,
            FlagsProposal::FlashImage => 3,
            FlagsProposal::Ptt => 4,
            FlagsProposal::Default => 5,
        }
    }

    /// Pick the winner. Ties keep the earliest proposal.
    pub fn select(proposals: &[FlagsProposal]) -> FlagsProposal {
        proposals
            .iter()
            .min_by_key(|p| p.rank())
            .cloned()
            .unwrap_or(FlagsProposal::Default)
    }

    pub fn realize(&self) -> WireElement {
        let flags = match self {
            FlagsProposal::LongMessage { res_id } => proto::GeneralFlags {
                long_text_flag: 1,
                long_text_resid: res_id.clone(),
                pb_reserve: PB_RESERVE_DEFAULT.to_vec(),
                ..Default::default()
            },
            FlagsProposal::MarketFace => reserve(PB_RESERVE_MARKET_FACE),
            FlagsProposal::RichMessage => reserve(PB_RESERVE_RICH),
            FlagsProposal::FlashImage => reserve(PB_RESERVE_FLASH),
            FlagsProposal::Ptt => reserve(PB_RESERVE_PTT),
            FlagsProposal::Default => reserve(PB_RESERVE_DEFAULT),
        };
        WireElement::GeneralFlags(flags)
    }
}

fn reserve(bytes: &[u8]) -> proto::GeneralFlags {
    proto::GeneralFlags {
        pb_reserve: bytes.to_vec(),
        ..Default::default()
    }
}
