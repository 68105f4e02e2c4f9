//! qchain core: wire elements, the message model, and the codec pipelines.
//!
//! This crate owns the bidirectional transform between a typed message chain
//! and the protocol's binary wire elements. It carries no async runtime so the
//! same pipelines serve inbound decoding, outbound encoding and offline tools.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed wire input degrades to `UnsupportedMessage` or a dropped element
//! with a diagnostic; it never brings the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod message;
pub mod pipeline;
pub mod protocol;
pub mod resolve;
pub mod wire;

/// Shared result type.
pub use error::{Result, QchainError};
