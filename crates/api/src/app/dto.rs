use serde::Deserialize;

use coneworks_catalog::{PageEntry, Product};

// -------------------------
// Request DTOs
// -------------------------

/// Query parameters for `GET /catalog`.
///
/// `paper_type` and `packaging` carry comma-separated selected values; an
/// absent parameter leaves that dimension unfiltered.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub paper_type: Option<String>,
    pub packaging: Option<String>,
    pub size_min: Option<f64>,
    pub size_max: Option<f64>,
    pub lot_min: Option<u32>,
    pub lot_max: Option<u32>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Split a comma-separated selection into its values, dropping empties.
pub fn split_selection(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|v| !v.is_empty())
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(p: &Product) -> serde_json::Value {
    serde_json::json!({
        "id": p.id.to_string(),
        "sku": p.sku,
        "name": p.name,
        "paper_type": p.paper_type,
        "packaging": p.packaging,
        "size_mm": p.size_mm,
        "lot_size": p.lot_size,
    })
}

/// Render a page window. Exactly one entry carries `"current": true`.
pub fn window_to_json(window: &[PageEntry], current: u32) -> Vec<serde_json::Value> {
    window
        .iter()
        .map(|entry| match entry {
            PageEntry::Page(n) => serde_json::json!({
                "page": n,
                "current": *n == current,
            }),
            PageEntry::Ellipsis => serde_json::json!({ "ellipsis": true }),
        })
        .collect()
}
