// ⚙️ Server Configuration
// Defaults work out of the box; environment variables may override them.

use crate::error::ConfigError;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 8000;
pub const HOST_ENV: &str = "RECEIPTS_HOST";
pub const PORT_ENV: &str = "RECEIPTS_PORT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Binds `0.0.0.0:8000` unless overridden.
    ///
    /// `RECEIPTS_HOST` and `RECEIPTS_PORT` are optional; with neither set the
    /// server needs no environment at all.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::var(HOST_ENV).ok(), env::var(PORT_ENV).ok())
    }

    fn from_vars(host: Option<String>, port: Option<String>) -> Result<Self, ConfigError> {
        let mut config = ServerConfig::default();

        if let Some(host) = host {
            config.host = host.parse::<IpAddr>().map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidHost {
                    value: host.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(port) = port {
            config.port = port.parse::<u16>().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidPort {
                    value: port.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
