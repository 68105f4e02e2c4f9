//! qchain client: the outgoing send path and sequence-id resolution.
//!
//! Builds on `qchain-core` for encoding, adds the FIRST, LONG_MESSAGE and
//! FRAGMENTED escalation over a pluggable transport, and resolves the
//! server-assigned sequence ids of group messages from receipt pushes.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod client;
pub mod collab;
pub mod config;
pub mod obs;
pub mod resolve;
pub mod send;

pub use client::MessageClient;
pub use send::{BotIdentity, MessageReceipt, SendOptions, SendStep};
