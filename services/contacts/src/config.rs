//! HTTP server configuration

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl ServerConfig {
    /// Load the configuration from the environment
    ///
    /// # Environment Variables
    /// - `APP_HOST`: Interface to bind (default: "0.0.0.0")
    /// - `APP_PORT`: Port to listen on (default: 3000)
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Socket address string suitable for `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
