//! Wire layer: prost struct shapes, the validated element sum type, and the
//! small binary helpers shared by the protocol units.
//!
//! Parsing here is panic-free: malformed input is reported as `QchainError`
//! (or dropped with a diagnostic at the list boundary), never indexed raw.

pub mod attr;
pub mod element;
pub mod payload;
pub mod proto;

pub use element::{from_elems, to_elems, WireElement};
