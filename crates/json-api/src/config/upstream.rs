//! Upstream Backend Config

use clap::Args;

/// Settings for the remote REST backend this server aggregates.
#[derive(Debug, Args)]
pub struct UpstreamConfig {
    /// Base URL of the upstream REST API (without the /api/v1 prefix)
    #[arg(long, env = "API_URL", default_value = "http://localhost:8000")]
    pub api_url: String,
}
