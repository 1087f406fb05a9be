use std::sync::Arc;

use coneworks_agegate::{FileVerificationStore, VerificationStore};
use coneworks_api::config::Config;

#[tokio::main]
async fn main() {
    coneworks_observability::init();

    let config = Config::from_env();

    let store: Arc<dyn VerificationStore> = Arc::new(
        FileVerificationStore::open_default().expect("failed to open verification store"),
    );

    let app = coneworks_api::app::build_app(&config, store)
        .await
        .expect("failed to build application");

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
