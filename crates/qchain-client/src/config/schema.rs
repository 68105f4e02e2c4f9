use std::time::Duration;

use serde::Deserialize;
use qchain_core::error::{QchainError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub send: SendSection,

    #[serde(default)]
    pub sequence: SequenceSection,

    #[serde(default)]
    pub log: LogSection,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(QchainError::UnsupportedVersion);
        }
        self.send.validate()?;
        self.sequence.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            send: SendSection::default(),
            sequence: SequenceSection::default(),
            log: LogSection::default(),
        }
    }
}

/// Size budgets and escalation switches for outgoing messages.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SendSection {
    #[serde(default = "default_packet_bytes")]
    pub group_packet_bytes: usize,

    #[serde(default = "default_packet_bytes")]
    pub friend_packet_bytes: usize,

    #[serde(default = "default_long_message_threshold_chars")]
    pub long_message_threshold_chars: usize,

    #[serde(default = "default_max_fragment_elements")]
    pub max_fragment_elements: usize,

    #[serde(default = "default_fragment_text_chars")]
    pub fragment_text_chars: usize,

    #[serde(default = "default_true")]
    pub allow_long_message: bool,

    #[serde(default)]
    pub auto_long_message: bool,
}

impl Default for SendSection {
    fn default() -> Self {
        Self {
            group_packet_bytes: default_packet_bytes(),
            friend_packet_bytes: default_packet_bytes(),
            long_message_threshold_chars: default_long_message_threshold_chars(),
            max_fragment_elements: default_max_fragment_elements(),
            fragment_text_chars: default_fragment_text_chars(),
            allow_long_message: true,
            auto_long_message: false,
        }
    }
}

impl SendSection {
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("send.group_packet_bytes", self.group_packet_bytes),
            ("send.friend_packet_bytes", self.friend_packet_bytes),
        ] {
            if !(256..=65536).contains(&v) {
                return Err(QchainError::BadConfig(format!(
                    "{name} must be between 256 and 65536"
                )));
            }
        }
        if self.long_message_threshold_chars == 0 {
            return Err(QchainError::BadConfig(
                "send.long_message_threshold_chars must be positive".into(),
            ));
        }
        if !(1..=64).contains(&self.max_fragment_elements) {
            return Err(QchainError::BadConfig(
                "send.max_fragment_elements must be between 1 and 64".into(),
            ));
        }
        if !(1..=4096).contains(&self.fragment_text_chars) {
            return Err(QchainError::BadConfig(
                "send.fragment_text_chars must be between 1 and 4096".into(),
            ));
        }
        Ok(())
    }

    /// Byte budget of one packet to `is_group` contacts.
    pub fn packet_budget(&self, is_group: bool) -> usize {
        if is_group {
            self.group_packet_bytes
        } else {
            self.friend_packet_bytes
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceSection {
    #[serde(default = "default_receipt_timeout_ms")]
    pub receipt_timeout_ms: u64,
}

impl Default for SequenceSection {
    fn default() -> Self {
        Self {
            receipt_timeout_ms: default_receipt_timeout_ms(),
        }
    }
}

impl SequenceSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60000).contains(&self.receipt_timeout_ms) {
            return Err(QchainError::BadConfig(
                "sequence.receipt_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_millis(self.receipt_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LogSection {
    pub fn validate(&self) -> Result<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(()),
            other => Err(QchainError::BadConfig(format!(
                "log.level must be one of trace, debug, info, warn, error, off (got {other})"
            ))),
        }
    }
}

fn default_packet_bytes() -> usize {
    5000
}
fn default_long_message_threshold_chars() -> usize {
    702
}
fn default_max_fragment_elements() -> usize {
    4
}
fn default_fragment_text_chars() -> usize {
    80
}
fn default_true() -> bool {
    true
}
fn default_receipt_timeout_ms() -> u64 {
    3000
}
fn default_log_level() -> String {
    "info".into()
}
