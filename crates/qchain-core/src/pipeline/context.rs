//! Per-call pipeline attributes.

use std::fmt;
use std::sync::Arc;

use crate::message::{SourceKind, Target};

/// Group-membership lookup used to render mention display names.
pub trait MemberDirectory: Send + Sync {
    /// Name card (or nick) of `uin` in `group`, if they are a member.
    fn member_name(&self, group: i64, uin: i64) -> Option<String>;
}

/// Attributes of the message being decoded.
#[derive(Debug, Clone)]
pub struct DecodeContext {
    pub kind: SourceKind,
    /// Sender uin.
    pub from_id: i64,
    /// Group code for group messages, receiver uin otherwise.
    pub target_id: i64,
    pub sequence_ids: Vec<i32>,
    pub internal_ids: Vec<i32>,
    pub time: i32,
    /// Prepend a `MessageSource` to the decoded chain.
    pub emit_source: bool,
}

impl DecodeContext {
    pub fn new(kind: SourceKind, from_id: i64, target_id: i64) -> Self {
        Self {
            kind,
            from_id,
            target_id,
            sequence_ids: Vec::new(),
            internal_ids: Vec::new(),
            time: 0,
            emit_source: true,
        }
    }

    pub fn group(group: i64, sender: i64) -> Self {
        Self::new(SourceKind::Group, sender, group)
    }

    pub fn friend(sender: i64, bot: i64) -> Self {
        Self::new(SourceKind::Friend, sender, bot)
    }

    pub fn with_ids(mut self, sequence_ids: Vec<i32>, internal_ids: Vec<i32>) -> Self {
        self.sequence_ids = sequence_ids;
        self.internal_ids = internal_ids;
        self
    }

    pub fn at(mut self, time: i32) -> Self {
        self.time = time;
        self
    }

    pub fn without_source(&self) -> Self {
        Self {
            emit_source: false,
            ..self.clone()
        }
    }

    pub fn group_id(&self) -> Option<i64> {
        (self.kind == SourceKind::Group).then_some(self.target_id)
    }
}

/// Attributes of the chain being encoded.
#[derive(Clone)]
pub struct EncodeContext {
    /// `None` when encoding outside any conversation (forward nodes, quoted
    /// originals).
    pub target: Option<Target>,
    pub bot_id: i64,
    pub with_general_flags: bool,
    directory: Option<Arc<dyn MemberDirectory>>,
}

impl EncodeContext {
    pub fn for_target(target: Target, bot_id: i64) -> Self {
        Self {
            target: Some(target),
            bot_id,
            with_general_flags: true,
            directory: None,
        }
    }

    pub fn detached(bot_id: i64) -> Self {
        Self {
            target: None,
            bot_id,
            with_general_flags: false,
            directory: None,
        }
    }

    pub fn with_directory(mut self, directory: Arc<dyn MemberDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn without_general_flags(&self) -> Self {
        Self {
            with_general_flags: false,
            ..self.clone()
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.target, Some(Target::Group(_)))
    }

    pub fn member_name(&self, group: i64, uin: i64) -> Option<String> {
        self.directory.as_ref()?.member_name(group, uin)
    }
}

impl fmt::Debug for EncodeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodeContext")
            .field("target", &self.target)
            .field("bot_id", &self.bot_id)
            .field("with_general_flags", &self.with_general_flags)
            .field("directory", &self.directory.is_some())
            .finish()
    }
}
