use std::net::SocketAddr;

use serde::Deserialize;
use tokio::time::Duration;

use presence_core::error::{PresenceError, Result};
use presence_core::SweeperConfig;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub presence: PresenceSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            presence: PresenceSection::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PresenceError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.presence.validate()?;

        Ok(())
    }

    /// Replace the port of `server.listen`, keeping the host.
    pub fn override_port(&mut self, port: &str) -> Result<()> {
        let port: u16 = port
            .parse()
            .map_err(|e| PresenceError::BadRequest(format!("invalid PORT {port:?}: {e}")))?;
        let mut addr = self.server.listen_addr()?;
        addr.set_port(port);
        self.server.listen = addr.to_string();
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            PresenceError::BadRequest(format!(
                "server.listen must be a valid socket address ({}): {e}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:50051".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresenceSection {
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,

    #[serde(default = "default_typing_ttl_ms")]
    pub typing_ttl_ms: u64,
}

impl Default for PresenceSection {
    fn default() -> Self {
        Self {
            sweep_interval_ms: default_sweep_interval_ms(),
            typing_ttl_ms: default_typing_ttl_ms(),
        }
    }
}

impl PresenceSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60_000).contains(&self.sweep_interval_ms) {
            return Err(PresenceError::BadRequest(
                "presence.sweep_interval_ms must be between 100 and 60000".into(),
            ));
        }
        if !(500..=600_000).contains(&self.typing_ttl_ms) {
            return Err(PresenceError::BadRequest(
                "presence.typing_ttl_ms must be between 500 and 600000".into(),
            ));
        }
        if self.typing_ttl_ms <= self.sweep_interval_ms {
            return Err(PresenceError::BadRequest(
                "presence.typing_ttl_ms must be greater than sweep_interval_ms".into(),
            ));
        }
        Ok(())
    }

    pub fn sweeper(&self) -> SweeperConfig {
        SweeperConfig {
            interval: Duration::from_millis(self.sweep_interval_ms),
            ttl: Duration::from_millis(self.typing_ttl_ms),
        }
    }
}

fn default_sweep_interval_ms() -> u64 {
    1000
}
fn default_typing_ttl_ms() -> u64 {
    5000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// JSON lines instead of human-readable output.
    #[serde(default = "default_json")]
    pub json: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            json: default_json(),
        }
    }
}

fn default_json() -> bool {
    true
}
