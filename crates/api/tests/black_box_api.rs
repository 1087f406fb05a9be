use std::sync::Arc;

use axum::http::StatusCode as AxumStatusCode;
use axum::routing::post;
use axum::{Json, Router};
use reqwest::StatusCode;

use coneworks_agegate::{InMemoryVerificationStore, VerificationStore};
use coneworks_api::config::Config;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
    upstream_handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        Self::spawn_with_seed(None).await
    }

    /// Build the app (same router as prod) against a fake upstream, bound to
    /// ephemeral ports.
    async fn spawn_with_seed(catalog_seed: Option<std::path::PathBuf>) -> Self {
        let (upstream_url, upstream_handle) = spawn_fake_upstream().await;

        let config = Config {
            bind_addr: "127.0.0.1:0".to_string(),
            upstream_url,
            catalog_seed,
        };
        let store: Arc<dyn VerificationStore> = Arc::new(InMemoryVerificationStore::new());

        let app = coneworks_api::app::build_app(&config, store)
            .await
            .expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            handle,
            upstream_handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
        self.upstream_handle.abort();
    }
}

/// Stand-in for the external API that owns accounts and contact intake.
async fn spawn_fake_upstream() -> (String, tokio::task::JoinHandle<()>) {
    let app = Router::new()
        .route(
            "/api/auth/register",
            post(|Json(body): Json<serde_json::Value>| async move {
                (
                    AxumStatusCode::CREATED,
                    Json(serde_json::json!({ "registered": body["email"] })),
                )
            }),
        )
        .route(
            "/api/auth/login",
            post(|| async { (AxumStatusCode::UNAUTHORIZED, "invalid credentials") }),
        )
        .route(
            "/api/contact",
            post(|| async { (AxumStatusCode::OK, "thanks, we will be in touch") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind fake upstream");
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), handle)
}

async fn get_json(client: &reqwest::Client, url: String) -> serde_json::Value {
    let res = client.get(url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn catalog_serves_the_first_page_by_default() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = get_json(&client, format!("{}/catalog", srv.base_url)).await;

    assert_eq!(body["page"], 1);
    assert_eq!(body["total_items"], 24);
    assert_eq!(body["total_pages"], 5);
    assert_eq!(body["items"].as_array().unwrap().len(), 5);

    // 5 pages fit the window outright: five plain entries, no ellipsis.
    let window = body["window"].as_array().unwrap();
    assert_eq!(window.len(), 5);
    assert!(window.iter().all(|e| e.get("ellipsis").is_none()));
    let current: Vec<&serde_json::Value> = window
        .iter()
        .filter(|e| e["current"].as_bool() == Some(true))
        .collect();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0]["page"], 1);
}

#[tokio::test]
async fn catalog_filters_by_paper_type() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = get_json(
        &client,
        format!("{}/catalog?paper_type=refined", srv.base_url),
    )
    .await;

    assert_eq!(body["total_items"], 8);
    assert_eq!(body["total_pages"], 2);
    for item in body["items"].as_array().unwrap() {
        assert_eq!(item["paper_type"], "refined");
    }
}

#[tokio::test]
async fn catalog_filters_combine_across_dimensions() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = get_json(
        &client,
        format!(
            "{}/catalog?paper_type=refined&packaging=box&size_min=90",
            srv.base_url
        ),
    )
    .await;

    // refined + box narrows to 4; size_min=90 keeps only 98mm and 109mm.
    assert_eq!(body["total_items"], 2);
    for item in body["items"].as_array().unwrap() {
        assert_eq!(item["paper_type"], "refined");
        assert_eq!(item["packaging"], "box");
        assert!(item["size_mm"].as_f64().unwrap() >= 90.0);
    }
}

#[tokio::test]
async fn catalog_selection_values_are_comma_separated() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = get_json(
        &client,
        format!("{}/catalog?paper_type=refined,hemp", srv.base_url),
    )
    .await;

    assert_eq!(body["total_items"], 16);
}

#[tokio::test]
async fn catalog_clamps_an_out_of_range_page() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = get_json(&client, format!("{}/catalog?page=99", srv.base_url)).await;

    assert_eq!(body["page"], 5);
    // Last page of 24 items at page size 5.
    assert_eq!(body["items"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn catalog_inverted_range_yields_empty_not_an_error() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = get_json(
        &client,
        format!("{}/catalog?lot_min=4000&lot_max=10", srv.base_url),
    )
    .await;

    assert_eq!(body["total_items"], 0);
    assert_eq!(body["total_pages"], 1);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn catalog_window_collapses_long_runs() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // 24 items at page size 2 -> 12 pages; from page 6 both gaps collapse.
    let body = get_json(
        &client,
        format!("{}/catalog?page_size=2&page=6", srv.base_url),
    )
    .await;

    assert_eq!(body["total_pages"], 12);
    let window = body["window"].as_array().unwrap();
    let pages: Vec<u64> = window
        .iter()
        .filter_map(|e| e["page"].as_u64())
        .collect();
    let ellipses = window
        .iter()
        .filter(|e| e["ellipsis"].as_bool() == Some(true))
        .count();
    assert_eq!(pages, vec![1, 5, 6, 7, 12]);
    assert_eq!(ellipses, 2);
}

#[tokio::test]
async fn catalog_rejects_zero_page_size() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/catalog?page_size=0", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn product_detail_roundtrip() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let listing = get_json(&client, format!("{}/catalog", srv.base_url)).await;
    let first = &listing["items"][0];
    let id = first["id"].as_str().unwrap();

    let detail = get_json(&client, format!("{}/catalog/{}", srv.base_url, id)).await;
    assert_eq!(detail["sku"], first["sku"]);

    let res = client
        .get(format!("{}/catalog/not-a-uuid", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(format!(
            "{}/catalog/00000000-0000-7000-8000-000000000000",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn gate_shows_until_confirmed_then_hides() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = get_json(&client, format!("{}/gate/status", srv.base_url)).await;
    assert_eq!(body["gate"], "show");

    let res = client
        .post(format!("{}/gate/confirm", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let verified_until = body["verified_until"].as_str().unwrap();
    assert!(verified_until.parse::<i64>().is_ok());

    let body = get_json(&client, format!("{}/gate/status", srv.base_url)).await;
    assert_eq!(body["gate"], "hide");
}

#[tokio::test]
async fn gate_exempt_routes_bypass_the_check() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = get_json(
        &client,
        format!("{}/gate/status?route=/privacy-policy", srv.base_url),
    )
    .await;
    assert_eq!(body["gate"], "hide");

    let body = get_json(
        &client,
        format!("{}/gate/status?route=/catalog", srv.base_url),
    )
    .await;
    assert_eq!(body["gate"], "show");
}

#[tokio::test]
async fn gate_deny_points_at_the_restricted_landing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/gate/deny", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["redirect"], "/restricted");

    // Denial mutates nothing: the gate still shows.
    let body = get_json(&client, format!("{}/gate/status", srv.base_url)).await;
    assert_eq!(body["gate"], "show");
}

#[tokio::test]
async fn register_relays_the_upstream_response() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&serde_json::json!({ "email": "buyer@example.com", "password": "hunter2" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["registered"], "buyer@example.com");
}

#[tokio::test]
async fn login_errors_surface_the_raw_upstream_body() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&serde_json::json!({ "email": "buyer@example.com", "password": "wrong" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.text().await.unwrap(), "invalid credentials");
}

#[tokio::test]
async fn contact_submissions_are_forwarded() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/contact", srv.base_url))
        .json(&serde_json::json!({ "name": "Jo", "message": "wholesale pricing?" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "thanks, we will be in touch");
}

#[tokio::test]
async fn unreachable_upstream_becomes_a_bad_gateway() {
    let (upstream_url, upstream_handle) = spawn_fake_upstream().await;
    // Tear the upstream down before using it.
    upstream_handle.abort();

    let config = Config {
        bind_addr: "127.0.0.1:0".to_string(),
        upstream_url,
        catalog_seed: None,
    };
    let store: Arc<dyn VerificationStore> = Arc::new(InMemoryVerificationStore::new());
    let app = coneworks_api::app::build_app(&config, store).await.unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let res = client
        .post(format!("http://{}/auth/login", addr))
        .json(&serde_json::json!({ "email": "x", "password": "y" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "upstream_unreachable");

    handle.abort();
}

#[tokio::test]
async fn catalog_seed_file_overrides_the_builtin_catalog() {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("coneworks-seed-{nanos}.json"));

    let products = vec![
        coneworks_catalog::Product::new("CN-X-1", "Test Cone A", "refined", "box", 84.0, 800),
        coneworks_catalog::Product::new("CN-X-2", "Test Cone B", "hemp", "bulk", 109.0, 3200),
    ];
    std::fs::write(&path, serde_json::to_string(&products).unwrap()).unwrap();

    let srv = TestServer::spawn_with_seed(Some(path.clone())).await;
    let client = reqwest::Client::new();

    let body = get_json(&client, format!("{}/catalog", srv.base_url)).await;
    assert_eq!(body["total_items"], 2);
    assert_eq!(body["items"][0]["sku"], "CN-X-1");

    let _ = std::fs::remove_file(&path);
}
