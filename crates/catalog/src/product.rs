use serde::{Deserialize, Serialize};

use coneworks_core::ProductId;

/// A catalog entry: one pre-rolled cone SKU as presented to wholesale buyers.
///
/// This is a read model, not an aggregate: the catalog is loaded as a whole
/// and browsed; nothing here mutates a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    /// Paper variety, e.g. "refined", "unrefined", "hemp".
    pub paper_type: String,
    /// Packaging form, e.g. "box", "tube", "bulk".
    pub packaging: String,
    /// Cone length in millimetres.
    pub size_mm: f64,
    /// Units per wholesale lot.
    pub lot_size: u32,
}

impl Product {
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        paper_type: impl Into<String>,
        packaging: impl Into<String>,
        size_mm: f64,
        lot_size: u32,
    ) -> Self {
        Self {
            id: ProductId::new(),
            sku: sku.into(),
            name: name.into(),
            paper_type: paper_type.into(),
            packaging: packaging.into(),
            size_mm,
            lot_size,
        }
    }
}
