use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;

use coneworks_agegate::GateDecision;

use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/confirm", post(confirm))
        .route("/deny", post(deny))
}

#[derive(Debug, Default, Deserialize)]
pub struct GateStatusQuery {
    /// Route the visitor is on; exempt routes bypass the gate entirely.
    pub route: Option<String>,
}

pub async fn status(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<GateStatusQuery>,
) -> axum::response::Response {
    let decision = services.gate().status(query.route.as_deref(), Utc::now());
    (
        StatusCode::OK,
        Json(serde_json::json!({ "gate": decision_str(decision) })),
    )
        .into_response()
}

pub async fn confirm(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let verified_until = services.gate().confirm(Utc::now());
    (
        StatusCode::OK,
        Json(serde_json::json!({ "verified_until": verified_until })),
    )
        .into_response()
}

pub async fn deny(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "redirect": services.gate().deny() })),
    )
        .into_response()
}

fn decision_str(decision: GateDecision) -> &'static str {
    match decision {
        GateDecision::Show => "show",
        GateDecision::Hide => "hide",
    }
}
