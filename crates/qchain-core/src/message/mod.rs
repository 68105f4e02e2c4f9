//! Message model: elements, chains, and source metadata.

pub mod chain;
pub mod compat;
pub mod element;
pub mod source;
pub mod target;

pub use chain::MessageChain;
pub use element::*;
pub use source::{Direction, MessageSource, SequenceIds};
pub use target::{SourceKind, Target};
