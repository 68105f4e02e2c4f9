//! Message source metadata: where a message lives and how to point back at it.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::Result;
use crate::message::{compat, MessageChain, SourceKind};
use crate::pipeline::{self, DecodeContext};
use crate::resolve::OnceValue;
use crate::wire::WireElement;

/// Sequence ids of a message. Final at creation for received and
/// friend-directed messages; resolved later for outgoing group messages.
pub type SequenceIds = OnceValue<Vec<i32>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Incoming,
    Outgoing,
}

/// Metadata locating one message.
#[derive(Clone)]
pub struct MessageSource {
    pub kind: SourceKind,
    pub direction: Direction,
    pub ids: SequenceIds,
    /// Random correlation ids, one per packet.
    pub internal_ids: Vec<i32>,
    /// Seconds since epoch.
    pub time: i32,
    pub from_id: i64,
    pub target_id: i64,
    original: Arc<OriginalChain>,
}

/// Original content, materialized on first access.
struct OriginalChain {
    cell: OnceLock<MessageChain>,
    raw: Option<(Vec<WireElement>, DecodeContext)>,
}

impl MessageSource {
    /// Source of a message we sent.
    pub fn outgoing(
        kind: SourceKind,
        ids: SequenceIds,
        internal_ids: Vec<i32>,
        time: i32,
        from_id: i64,
        target_id: i64,
        original: MessageChain,
    ) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(original);
        Self {
            kind,
            direction: Direction::Outgoing,
            ids,
            internal_ids,
            time,
            from_id,
            target_id,
            original: Arc::new(OriginalChain { cell, raw: None }),
        }
    }

    /// Source of a received or quoted message; `raw` is decoded with `ctx`
    /// the first time the original chain is read.
    #[allow(clippy::too_many_arguments)]
    pub fn incoming(
        kind: SourceKind,
        ids: Vec<i32>,
        internal_ids: Vec<i32>,
        time: i32,
        from_id: i64,
        target_id: i64,
        raw: Vec<WireElement>,
        ctx: DecodeContext,
    ) -> Self {
        Self {
            kind,
            direction: Direction::Incoming,
            ids: OnceValue::resolved(ids),
            internal_ids,
            time,
            from_id,
            target_id,
            original: Arc::new(OriginalChain {
                cell: OnceLock::new(),
                raw: Some((raw, ctx.without_source())),
            }),
        }
    }

    /// Sequence ids if already known.
    pub fn sequence_ids(&self) -> Option<Vec<i32>> {
        self.ids.peek().and_then(|r| r.ok())
    }

    /// Suspend until the sequence ids are known.
    pub async fn ensure_sequence_id_available(&self) -> Result<Vec<i32>> {
        Ok(self.ids.wait().await?)
    }

    pub fn is_anonymous(&self) -> bool {
        self.from_id == compat::ANONYMOUS_UIN
    }

    /// Content of the message this source points at.
    pub fn original_message(&self) -> &MessageChain {
        let original = &self.original;
        original.cell.get_or_init(|| match &original.raw {
            Some((raw, ctx)) => pipeline::decode(raw, ctx),
            None => MessageChain::new(),
        })
    }
}

impl PartialEq for MessageSource {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.direction == other.direction
            && self.sequence_ids() == other.sequence_ids()
            && self.internal_ids == other.internal_ids
            && self.time == other.time
            && self.from_id == other.from_id
            && self.target_id == other.target_id
    }
}

impl fmt::Debug for MessageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageSource")
            .field("kind", &self.kind)
            .field("direction", &self.direction)
            .field("ids", &self.ids)
            .field("internal_ids", &self.internal_ids)
            .field("time", &self.time)
            .field("from_id", &self.from_id)
            .field("target_id", &self.target_id)
            .finish()
    }
}
