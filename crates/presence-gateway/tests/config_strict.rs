#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use presence_gateway::config::{self, GatewayConfig};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
presence:
  sweep_interval_ms: 1000
  typing_ttl: 5000 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:50051");
    assert_eq!(cfg.presence.sweep_interval_ms, 1000);
    assert_eq!(cfg.presence.typing_ttl_ms, 5000);
    assert!(cfg.logging.json);
}

#[test]
fn ok_full_config() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9000"
presence:
  sweep_interval_ms: 250
  typing_ttl_ms: 2000
logging:
  json: false
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    let sweeper = cfg.presence.sweeper();
    assert_eq!(sweeper.interval.as_millis(), 250);
    assert_eq!(sweeper.ttl.as_millis(), 2000);
    assert!(!cfg.logging.json);
}

#[test]
fn unsupported_version_is_rejected() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn ttl_must_exceed_sweep_interval() {
    let bad = r#"
version: 1
presence:
  sweep_interval_ms: 2000
  typing_ttl_ms: 2000
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("typing_ttl_ms"));
}

#[test]
fn listen_must_be_socket_addr() {
    let bad = r#"
version: 1
server:
  listen: "localhost"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn port_override_keeps_host() {
    let mut cfg = GatewayConfig::default();
    cfg.override_port("6000").expect("valid port");
    assert_eq!(cfg.server.listen, "0.0.0.0:6000");

    assert!(cfg.override_port("not-a-port").is_err());
}

#[test]
fn missing_explicit_file_is_an_error() {
    let err = config::load_from_file("/definitely/not/here/presence.yaml").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INTERNAL");
}
