//! Service wiring: catalog read model, gate, upstream client.

use std::sync::Arc;

use anyhow::Context;

use coneworks_agegate::{AgeGate, VerificationStore};
use coneworks_catalog::Product;
use coneworks_core::ProductId;

use crate::config::Config;

/// Shared application services, wired once at startup.
pub struct AppServices {
    products: Vec<Product>,
    gate: AgeGate,
    upstream: UpstreamClient,
}

pub async fn build_services(
    config: &Config,
    store: Arc<dyn VerificationStore>,
) -> anyhow::Result<AppServices> {
    let products = match &config.catalog_seed {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read catalog seed at {path:?}"))?;
            let products: Vec<Product> = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse catalog seed at {path:?}"))?;
            tracing::info!("loaded {} products from {:?}", products.len(), path);
            products
        }
        None => {
            let products = builtin_seed();
            tracing::info!("no catalog seed configured; using built-in seed ({} products)", products.len());
            products
        }
    };

    Ok(AppServices {
        products,
        gate: AgeGate::new(store),
        upstream: UpstreamClient::new(config.upstream_url.clone()),
    })
}

impl AppServices {
    pub fn catalog(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == *id)
    }

    pub fn gate(&self) -> &AgeGate {
        &self.gate
    }

    pub fn upstream(&self) -> &UpstreamClient {
        &self.upstream
    }
}

/// Development catalog: the standard cone range, every paper in each size,
/// boxed and bulk lots.
fn builtin_seed() -> Vec<Product> {
    let papers = ["refined", "unrefined", "hemp"];
    let sizes = [
        (70.0, "Dogwalker"),
        (84.0, "Classic"),
        (98.0, "King"),
        (109.0, "Giant"),
    ];
    let lots = [("box", "BX", 800), ("bulk", "BLK", 3200)];

    let mut products = Vec::new();
    for paper in papers {
        for (size_mm, family) in sizes {
            for (packaging, pack_code, lot_size) in lots {
                let sku = format!(
                    "CN-{}-{}-{}",
                    size_mm as u32,
                    paper.chars().next().unwrap_or('x').to_ascii_uppercase(),
                    pack_code,
                );
                let name = format!("{family} {}mm ({paper}, {packaging})", size_mm as u32);
                products.push(Product::new(sku, name, paper, packaging, size_mm, lot_size));
            }
        }
    }
    products
}

/// Thin client for the upstream API that owns registration, login and
/// contact intake. One forwarded request, no retries; the upstream's
/// response body text is surfaced as-is.
#[derive(Clone)]
pub struct UpstreamClient {
    base_url: String,
    client: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// POST a JSON body to `path` on the upstream; returns the upstream's
    /// status code and raw body text.
    pub async fn forward(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<(u16, String), reqwest::Error> {
        let res = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        let status = res.status().as_u16();
        let text = res.text().await?;
        Ok((status, text))
    }
}
