//! HTTP API application wiring (Axum router + service wiring).
//!
//! Structure:
//! - `services.rs`: service wiring (catalog read model, gate, upstream client)
//! - `routes/`: HTTP routes + handlers (one file per surface area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use coneworks_agegate::VerificationStore;

use crate::config::Config;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// The verification store is injected so tests can run against an in-memory
/// one while production wires up the file-backed store.
pub async fn build_app(
    config: &Config,
    store: Arc<dyn VerificationStore>,
) -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services(config, store).await?);

    Ok(routes::router().layer(ServiceBuilder::new().layer(Extension(services))))
}
