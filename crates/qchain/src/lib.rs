//! Top-level facade crate for qchain.
//!
//! Re-exports the codec core and the client so users can depend on a single crate.

pub mod core {
    pub use qchain_core::*;
}

pub mod client {
    pub use qchain_client::*;
}
