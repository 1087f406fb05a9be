//! Catalog filter state and its transitions.
//!
//! Filters are transient view state. Every operation here is a pure
//! transition: it takes the current state and returns the next one, leaving
//! the input untouched. Rendering layers own when to apply them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use coneworks_core::{DomainError, DomainResult, ValueObject};

use crate::product::Product;

/// A set-valued filter facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDimension {
    PaperType,
    Packaging,
}

/// Inclusive numeric `[lo, hi]` bound.
///
/// Ordering is intentionally not validated: an inverted bound (`lo > hi`) is
/// representable and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeBound<T> {
    pub lo: T,
    pub hi: T,
}

impl<T: PartialOrd + Copy> RangeBound<T> {
    pub fn new(lo: T, hi: T) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, value: T) -> bool {
        self.lo <= value && value <= self.hi
    }
}

impl<T: PartialOrd + Copy + core::fmt::Debug> ValueObject for RangeBound<T> {}

/// Filter + page state for the catalog view.
///
/// Invariants:
/// - an empty selection set means "no filter on this dimension";
/// - any filter change resets `current_page` to 1;
/// - `page_size` is fixed at construction and never changed by a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    selected_paper_types: BTreeSet<String>,
    selected_packaging: BTreeSet<String>,
    size_range: RangeBound<f64>,
    lot_range: RangeBound<u32>,
    // Full-domain bounds captured at construction; `clear` restores these.
    size_domain: RangeBound<f64>,
    lot_domain: RangeBound<u32>,
    current_page: u32,
    page_size: u32,
}

impl ValueObject for FilterState {}

impl FilterState {
    /// Create a state with explicit full-domain bounds.
    pub fn new(
        size_domain: RangeBound<f64>,
        lot_domain: RangeBound<u32>,
        page_size: u32,
    ) -> DomainResult<Self> {
        if page_size == 0 {
            return Err(DomainError::validation("page_size must be positive"));
        }
        Ok(Self {
            selected_paper_types: BTreeSet::new(),
            selected_packaging: BTreeSet::new(),
            size_range: size_domain,
            lot_range: lot_domain,
            size_domain,
            lot_domain,
            current_page: 1,
            page_size,
        })
    }

    /// Create a state whose full-domain bounds span the given catalog.
    pub fn for_catalog(items: &[Product], page_size: u32) -> DomainResult<Self> {
        let size_domain = items.iter().fold(None, |acc: Option<RangeBound<f64>>, p| {
            Some(match acc {
                None => RangeBound::new(p.size_mm, p.size_mm),
                Some(r) => RangeBound::new(r.lo.min(p.size_mm), r.hi.max(p.size_mm)),
            })
        });
        let lot_domain = items.iter().fold(None, |acc: Option<RangeBound<u32>>, p| {
            Some(match acc {
                None => RangeBound::new(p.lot_size, p.lot_size),
                Some(r) => RangeBound::new(r.lo.min(p.lot_size), r.hi.max(p.lot_size)),
            })
        });
        Self::new(
            size_domain.unwrap_or(RangeBound::new(0.0, 0.0)),
            lot_domain.unwrap_or(RangeBound::new(0, 0)),
            page_size,
        )
    }

    pub fn selected_paper_types(&self) -> &BTreeSet<String> {
        &self.selected_paper_types
    }

    pub fn selected_packaging(&self) -> &BTreeSet<String> {
        &self.selected_packaging
    }

    pub fn size_range(&self) -> RangeBound<f64> {
        self.size_range
    }

    pub fn lot_range(&self) -> RangeBound<u32> {
        self.lot_range
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Symmetric set toggle: add the value if absent, remove it if present.
    ///
    /// Toggling the same value twice restores the original selection.
    pub fn toggle(&self, dimension: FilterDimension, value: impl Into<String>) -> Self {
        let value = value.into();
        let mut next = self.clone();
        let set = match dimension {
            FilterDimension::PaperType => &mut next.selected_paper_types,
            FilterDimension::Packaging => &mut next.selected_packaging,
        };
        if !set.remove(&value) {
            set.insert(value);
        }
        next.current_page = 1;
        next
    }

    /// Replace the size bound. Ordering is the caller's concern; an inverted
    /// bound propagates as "no items match".
    pub fn set_size_range(&self, lo: f64, hi: f64) -> Self {
        let mut next = self.clone();
        next.size_range = RangeBound::new(lo, hi);
        next.current_page = 1;
        next
    }

    /// Replace the lot-size bound. Same ordering contract as `set_size_range`.
    pub fn set_lot_range(&self, lo: u32, hi: u32) -> Self {
        let mut next = self.clone();
        next.lot_range = RangeBound::new(lo, hi);
        next.current_page = 1;
        next
    }

    /// Reset both selection sets and both ranges to the full-domain bounds.
    /// Page size is untouched; page returns to 1. Idempotent.
    pub fn clear(&self) -> Self {
        let mut next = self.clone();
        next.selected_paper_types.clear();
        next.selected_packaging.clear();
        next.size_range = next.size_domain;
        next.lot_range = next.lot_domain;
        next.current_page = 1;
        next
    }

    /// Move to a page. The lower bound is enforced here; the upper bound is
    /// enforced against the filtered count at pagination time.
    pub fn with_page(&self, page: u32) -> Self {
        let mut next = self.clone();
        next.current_page = page.max(1);
        next
    }

    /// Whether a single product passes every active predicate.
    pub fn matches(&self, product: &Product) -> bool {
        let paper_ok = self.selected_paper_types.is_empty()
            || self.selected_paper_types.contains(&product.paper_type);
        let packaging_ok = self.selected_packaging.is_empty()
            || self.selected_packaging.contains(&product.packaging);
        paper_ok
            && packaging_ok
            && self.size_range.contains(product.size_mm)
            && self.lot_range.contains(product.lot_size)
    }

    /// Stable filter: source order is preserved, nothing is re-sorted.
    pub fn filtered<'a>(&self, items: &'a [Product]) -> Vec<&'a Product> {
        items.iter().filter(|p| self.matches(p)).collect()
    }
}
