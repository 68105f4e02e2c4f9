#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use qchain_client::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
send:
  group_packet_byte: 4000 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_CONFIG");
}

#[test]
fn unknown_version_is_rejected() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.send.group_packet_bytes, 5000);
    assert_eq!(cfg.send.packet_budget(false), 5000);
    assert_eq!(cfg.send.long_message_threshold_chars, 702);
    assert!(cfg.send.allow_long_message);
    assert!(!cfg.send.auto_long_message);
    assert_eq!(cfg.sequence.receipt_timeout().as_millis(), 3000);
    assert_eq!(cfg.log.level, "info");
}

#[test]
fn overrides_are_applied() {
    let ok = r#"
version: 1
send:
  friend_packet_bytes: 1024
  allow_long_message: false
  max_fragment_elements: 8
sequence:
  receipt_timeout_ms: 500
log:
  level: debug
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.send.packet_budget(false), 1024);
    assert_eq!(cfg.send.packet_budget(true), 5000);
    assert!(!cfg.send.allow_long_message);
    assert_eq!(cfg.send.max_fragment_elements, 8);
    assert_eq!(cfg.sequence.receipt_timeout_ms, 500);
}

#[test]
fn out_of_range_values_are_bad_config() {
    for bad in [
        "version: 1\nsequence:\n  receipt_timeout_ms: 10\n",
        "version: 1\nsend:\n  group_packet_bytes: 100\n",
        "version: 1\nsend:\n  max_fragment_elements: 0\n",
        "version: 1\nlog:\n  level: loud\n",
    ] {
        let err = config::load_from_str(bad).expect_err("must fail");
        assert_eq!(err.client_code().as_str(), "BAD_CONFIG", "{bad}");
    }
}
