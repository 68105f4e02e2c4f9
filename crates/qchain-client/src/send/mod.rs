//! Outgoing sends: packet shapes, fragmentation, uploaded bodies and the
//! escalation state machine.

pub mod fragment;
mod orchestrator;
mod packet;
pub mod proto;
pub mod upload;

use std::fmt;

use qchain_core::error::Result;
use qchain_core::message::{MessageSource, QuoteReply, Target};

pub use orchestrator::{BotIdentity, SendOrchestrator};

/// Escalation step of one logical send. Steps only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SendStep {
    /// Chain sent as is.
    First,
    /// Content uploaded and replaced by a reference card.
    LongMessage,
    /// Content split over several packets.
    Fragmented,
}

impl SendStep {
    /// Step tried after a "too large" reply, if any.
    pub fn next(self, allow_long_message: bool) -> Option<SendStep> {
        match self {
            SendStep::First if allow_long_message => Some(SendStep::LongMessage),
            SendStep::First | SendStep::LongMessage => Some(SendStep::Fragmented),
            SendStep::Fragmented => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SendStep::First => "FIRST",
            SendStep::LongMessage => "LONG_MESSAGE",
            SendStep::Fragmented => "FRAGMENTED",
        }
    }
}

impl fmt::Display for SendStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call overrides of the configured send behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct SendOptions {
    /// `Some(false)` skips the long-message step.
    pub allow_long_message: Option<bool>,
    /// Start at the long-message step.
    pub force_long_message: bool,
}

/// Result of a successful send.
#[derive(Debug, Clone)]
pub struct MessageReceipt {
    pub target: Target,
    pub source: MessageSource,
    /// Step the send succeeded at.
    pub step: SendStep,
}

impl MessageReceipt {
    /// Suspend until the server-assigned sequence ids are known.
    pub async fn ensure_sequence_id_available(&self) -> Result<Vec<i32>> {
        self.source.ensure_sequence_id_available().await
    }

    /// Quote element referring to the sent message.
    pub fn quote(&self) -> QuoteReply {
        QuoteReply {
            source: self.source.clone(),
        }
    }

    pub fn is_fragmented(&self) -> bool {
        self.step == SendStep::Fragmented
    }
}
