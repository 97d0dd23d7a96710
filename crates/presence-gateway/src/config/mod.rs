//! Gateway config loader (strict parsing).
//!
//! Resolution: `PRESENCE_CONFIG` names the file explicitly and must exist;
//! otherwise `presence.yaml` is read when present and built-in defaults are
//! used when it is not. `PORT` overrides the listen port either way.

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use presence_core::error::{PresenceError, Result};

pub use schema::{GatewayConfig, LoggingSection, PresenceSection, ServerSection};

pub const CONFIG_ENV: &str = "PRESENCE_CONFIG";
pub const PORT_ENV: &str = "PORT";
pub const DEFAULT_PATH: &str = "presence.yaml";

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PresenceError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| PresenceError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load config the way the binary does (env-driven path, defaults, PORT override).
pub fn load_from_env() -> Result<GatewayConfig> {
    let mut cfg = match std::env::var(CONFIG_ENV) {
        Ok(path) if !path.is_empty() => load_from_file(&path)?,
        _ => match fs::read_to_string(DEFAULT_PATH) {
            Ok(s) => load_from_str(&s)?,
            Err(e) if e.kind() == ErrorKind::NotFound => GatewayConfig::default(),
            Err(e) => {
                return Err(PresenceError::Internal(format!(
                    "read config failed ({DEFAULT_PATH}): {e}"
                )))
            }
        },
    };

    if let Ok(port) = std::env::var(PORT_ENV) {
        if !port.is_empty() {
            cfg.override_port(&port)?;
        }
    }
    Ok(cfg)
}
