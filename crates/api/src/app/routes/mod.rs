use axum::{
    routing::{get, post},
    Router,
};

pub mod auth;
pub mod catalog;
pub mod gate;
pub mod system;

/// Router for the full public surface.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/contact", post(auth::contact))
        .nest("/catalog", catalog::router())
        .nest("/gate", gate::router())
        .nest("/auth", auth::router())
}
