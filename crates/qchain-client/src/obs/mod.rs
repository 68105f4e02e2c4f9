//! Tracing setup.
//!
//! `RUST_LOG` wins when set; otherwise the configured `log.level` applies.

use tracing_subscriber::{fmt, EnvFilter};

use qchain_core::error::{QchainError, Result};

use crate::config::LogSection;

/// Install the global fmt subscriber. Fails if one is already installed.
pub fn init_tracing(log: &LogSection) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| QchainError::Internal(format!("tracing init failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_reported() {
        let log = LogSection {
            level: "debug".into(),
        };
        // only this test installs a global subscriber in this binary
        assert!(init_tracing(&log).is_ok());
        let err = init_tracing(&log).unwrap_err();
        assert_eq!(err.client_code().as_str(), "INTERNAL");
    }
}
