//! Upstream-delegated surfaces: accounts and contact intake.
//!
//! These handlers own no state. Each forwards the JSON body to the upstream
//! API exactly once and relays the upstream's status and raw body text back
//! to the caller; a transport failure becomes a 502 with the error message.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    forward(&services, "/api/auth/register", body).await
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    forward(&services, "/api/auth/login", body).await
}

pub async fn contact(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    forward(&services, "/api/contact", body).await
}

async fn forward(
    services: &AppServices,
    path: &str,
    body: serde_json::Value,
) -> axum::response::Response {
    match services.upstream().forward(path, &body).await {
        Ok((status, text)) => {
            let status =
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, text).into_response()
        }
        Err(err) => {
            tracing::warn!("upstream call to {path} failed: {err}");
            errors::json_error(StatusCode::BAD_GATEWAY, "upstream_unreachable", err.to_string())
        }
    }
}
