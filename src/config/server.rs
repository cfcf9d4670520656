//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use config::ConfigError;
use serde::Deserialize;

/// Smallest accepted request body limit; a generation request with a pattern and a
/// few validators fits well below it.
const MIN_BODY_BYTES: usize = 1024;

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads (0 = number of CPU cores).
    #[serde(default)]
    pub workers: usize,

    /// Maximum accepted request body, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Address the HTTP listener binds to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Validate the server section.
    ///
    /// # Errors
    ///
    /// Returns an error if the port is 0 or the body limit is below 1 KiB.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Message("server.port cannot be 0".to_string()));
        }
        if self.max_body_bytes < MIN_BODY_BYTES {
            return Err(ConfigError::Message(format!(
                "server.max_body_bytes must be at least {MIN_BODY_BYTES}, got {}",
                self.max_body_bytes
            )));
        }
        Ok(())
    }
}

const fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

const fn default_port() -> u16 {
    8080
}

const fn default_max_body_bytes() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}
