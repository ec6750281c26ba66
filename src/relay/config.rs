//! Relay configuration from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use super::RelayError;

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Where the relay listens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelayConfig {
    pub bind: IpAddr,
    pub port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl RelayConfig {
    /// Read `PORT` and `RELAY_BIND`, falling back to `0.0.0.0:3000`.
    pub fn from_env() -> Result<Self, RelayError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RelayError> {
        let mut config = Self::default();

        if let Some(value) = lookup("PORT") {
            config.port = value
                .trim()
                .parse()
                .map_err(|_| RelayError::InvalidEnv { name: "PORT", value })?;
        }
        if let Some(value) = lookup("RELAY_BIND") {
            config.bind = value
                .trim()
                .parse()
                .map_err(|_| RelayError::InvalidEnv {
                    name: "RELAY_BIND",
                    value,
                })?;
        }

        Ok(config)
    }

    /// Socket address to bind.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
