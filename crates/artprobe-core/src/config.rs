//! Transport configuration, loadable from TOML.
//!
//! Every key is optional; missing keys take the Art-Net defaults.
//!
//! ```toml
//! destination = "2.255.255.255"
//! port = 6454
//! bind = "0.0.0.0:6454"
//! broadcast = true
//! timeout_ms = 2000
//! ```

use std::fs;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocols::artnet::layout::DEFAULT_PORT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Where packets go and how the local socket behaves.
///
/// # Examples
/// ```
/// use artprobe_core::TransportConfig;
///
/// let config = TransportConfig::from_toml_str("destination = \"10.0.0.7\"")?;
/// assert_eq!(config.destination_addr().to_string(), "10.0.0.7:6454");
/// # Ok::<(), artprobe_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransportConfig {
    pub destination: Ipv4Addr,
    pub port: u16,
    pub bind: SocketAddrV4,
    pub broadcast: bool,
    pub timeout_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            destination: Ipv4Addr::new(2, 255, 255, 255),
            port: DEFAULT_PORT,
            bind: SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DEFAULT_PORT),
            broadcast: true,
            timeout_ms: 2000,
        }
    }
}

impl TransportConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn destination_addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.destination, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
