//! Server configuration module

use clap::Parser;

use crate::config::{
    logging::LoggingConfig, server::ServerRuntimeConfig, site::SiteConfig, upstream::UpstreamConfig,
};

pub(crate) mod logging;
pub(crate) mod server;
pub(crate) mod site;
pub(crate) mod upstream;

/// BoltPromo JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "boltpromo-json", about = "BoltPromo JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Upstream REST backend settings.
    #[command(flatten)]
    pub upstream: UpstreamConfig,

    /// Public site settings for sitemap and structured data.
    #[command(flatten)]
    pub site: SiteConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
