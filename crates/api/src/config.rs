//! Process configuration, read from the environment at startup.

use std::path::PathBuf;

/// Runtime configuration for the API process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Base URL of the upstream API that owns accounts and contact intake.
    pub upstream_url: String,
    /// Optional path to a JSON catalog seed; the built-in seed is used when
    /// absent.
    pub catalog_seed: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("CONEWORKS_BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let upstream_url = std::env::var("CONEWORKS_UPSTREAM_URL").unwrap_or_else(|_| {
            tracing::warn!("CONEWORKS_UPSTREAM_URL not set; using local dev default");
            "http://127.0.0.1:9100".to_string()
        });

        let catalog_seed = std::env::var("CONEWORKS_CATALOG_SEED")
            .ok()
            .map(PathBuf::from);

        Self {
            bind_addr,
            upstream_url,
            catalog_seed,
        }
    }
}
