//! Shared error type across qchain crates.

use thiserror::Error;

use crate::message::{MessageChain, Target};
use crate::resolve::ResolveError;

/// Stable error codes surfaced to callers and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Wire elem violated the one-variant rule.
    InvalidElement,
    /// Bytes could not be decoded into a wire struct.
    DecodeFailed,
    /// No encoder claimed an element kind.
    UnencodableElement,
    /// Message exceeded every size escalation.
    MessageTooLarge,
    BotMuted,
    AtAllLimited,
    GroupChatLimited,
    AccountRestricted,
    /// Generic server rejection.
    SendFailed,
    /// Sequence id did not arrive in time.
    SequenceIdTimeout,
    /// Sequence id will never arrive.
    SequenceIdUnavailable,
    UploadFailed,
    Transport,
    /// Invalid configuration.
    BadConfig,
    UnsupportedVersion,
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and receipts.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidElement => "INVALID_ELEMENT",
            ErrorCode::DecodeFailed => "DECODE_FAILED",
            ErrorCode::UnencodableElement => "UNENCODABLE_ELEMENT",
            ErrorCode::MessageTooLarge => "MESSAGE_TOO_LARGE",
            ErrorCode::BotMuted => "BOT_MUTED",
            ErrorCode::AtAllLimited => "AT_ALL_LIMITED",
            ErrorCode::GroupChatLimited => "GROUP_CHAT_LIMITED",
            ErrorCode::AccountRestricted => "ACCOUNT_RESTRICTED",
            ErrorCode::SendFailed => "SEND_FAILED",
            ErrorCode::SequenceIdTimeout => "SEQUENCE_ID_TIMEOUT",
            ErrorCode::SequenceIdUnavailable => "SEQUENCE_ID_UNAVAILABLE",
            ErrorCode::UploadFailed => "UPLOAD_FAILED",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Server-side policy rejections. Never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Muted,
    AtAllLimited,
    GroupChatLimited,
    AccountRestricted,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RejectReason::Muted => "bot is muted",
            RejectReason::AtAllLimited => "@all quota exhausted",
            RejectReason::GroupChatLimited => "group chat limited",
            RejectReason::AccountRestricted => "account restricted",
        };
        f.write_str(s)
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, QchainError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum QchainError {
    #[error("invalid wire element: {0}")]
    InvalidElement(String),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("no encoder claimed element kind {0}")]
    UnencodableElement(&'static str),
    #[error("message to {target} is too large")]
    MessageTooLarge {
        target: Target,
        content: Box<MessageChain>,
    },
    #[error("send to {target} rejected: {reason}")]
    Rejected {
        target: Target,
        reason: RejectReason,
        content: Box<MessageChain>,
    },
    #[error("send to {target} failed: result={result} errtype={err_code} {message}")]
    SendFailed {
        target: Target,
        result: i32,
        err_code: i32,
        message: String,
    },
    #[error("sequence id not received within {timeout_ms}ms")]
    SequenceIdTimeout { timeout_ms: u64 },
    #[error("sequence id abandoned before resolution")]
    SequenceIdUnavailable,
    #[error("upload failed: {0}")]
    Upload(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl QchainError {
    /// Map internal error to a stable code.
    pub fn client_code(&self) -> ErrorCode {
        match self {
            QchainError::InvalidElement(_) => ErrorCode::InvalidElement,
            QchainError::Decode(_) => ErrorCode::DecodeFailed,
            QchainError::UnencodableElement(_) => ErrorCode::UnencodableElement,
            QchainError::MessageTooLarge { .. } => ErrorCode::MessageTooLarge,
            QchainError::Rejected { reason, .. } => match reason {
                RejectReason::Muted => ErrorCode::BotMuted,
                RejectReason::AtAllLimited => ErrorCode::AtAllLimited,
                RejectReason::GroupChatLimited => ErrorCode::GroupChatLimited,
                RejectReason::AccountRestricted => ErrorCode::AccountRestricted,
            },
            QchainError::SendFailed { .. } => ErrorCode::SendFailed,
            QchainError::SequenceIdTimeout { .. } => ErrorCode::SequenceIdTimeout,
            QchainError::SequenceIdUnavailable => ErrorCode::SequenceIdUnavailable,
            QchainError::Upload(_) => ErrorCode::UploadFailed,
            QchainError::Transport(_) => ErrorCode::Transport,
            QchainError::BadConfig(_) => ErrorCode::BadConfig,
            QchainError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            QchainError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Target the failed send was addressed to, if any.
    pub fn target(&self) -> Option<&Target> {
        match self {
            QchainError::MessageTooLarge { target, .. }
            | QchainError::Rejected { target, .. }
            | QchainError::SendFailed { target, .. } => Some(target),
            _ => None,
        }
    }
}

impl From<prost::DecodeError> for QchainError {
    fn from(e: prost::DecodeError) -> Self {
        QchainError::Decode(e.to_string())
    }
}

impl From<ResolveError> for QchainError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::Timeout { timeout_ms } => QchainError::SequenceIdTimeout { timeout_ms },
            ResolveError::Abandoned => QchainError::SequenceIdUnavailable,
        }
    }
}
