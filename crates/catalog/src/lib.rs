//! Catalog domain module.
//!
//! This crate contains the product model and the catalog browsing rules
//! (filtering, pagination, page-window arithmetic), implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod filter;
pub mod pagination;
pub mod product;

pub use filter::{FilterDimension, FilterState, RangeBound};
pub use pagination::{
    paginate, page_window, page_window_with, total_pages, Page, PageCursor, PageEntry,
    MAX_VISIBLE_PAGES,
};
pub use product::Product;
