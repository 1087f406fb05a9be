use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use coneworks_catalog::{page_window, paginate, FilterDimension, FilterState};
use coneworks_core::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub const DEFAULT_PAGE_SIZE: u32 = 5;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_catalog))
        .route("/:id", get(get_product))
}

pub async fn list_catalog(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::CatalogQuery>,
) -> axum::response::Response {
    let items = services.catalog();
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

    let mut state = match FilterState::for_catalog(items, page_size) {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Some(raw) = &query.paper_type {
        for value in dto::split_selection(raw) {
            state = state.toggle(FilterDimension::PaperType, value);
        }
    }
    if let Some(raw) = &query.packaging {
        for value in dto::split_selection(raw) {
            state = state.toggle(FilterDimension::Packaging, value);
        }
    }
    if query.size_min.is_some() || query.size_max.is_some() {
        let current = state.size_range();
        state = state.set_size_range(
            query.size_min.unwrap_or(current.lo),
            query.size_max.unwrap_or(current.hi),
        );
    }
    if query.lot_min.is_some() || query.lot_max.is_some() {
        let current = state.lot_range();
        state = state.set_lot_range(
            query.lot_min.unwrap_or(current.lo),
            query.lot_max.unwrap_or(current.hi),
        );
    }
    // Page is applied last: filter changes above have already reset it.
    if let Some(page) = query.page {
        state = state.with_page(page);
    }

    let filtered = state.filtered(items);
    let page = paginate(&filtered, state.current_page(), state.page_size());
    let window = page_window(page.page, page.total_pages);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "items": page.items.iter().map(|p| dto::product_to_json(p)).collect::<Vec<_>>(),
            "page": page.page,
            "total_pages": page.total_pages,
            "total_items": page.total_items,
            "window": dto::window_to_json(&window, page.page),
        })),
    )
        .into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };

    match services.product(&id) {
        Some(p) => (StatusCode::OK, Json(dto::product_to_json(p))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}
