//! Product catalog endpoints.
//!
//! # Endpoints
//!
//! - `GET    /api/products`        - Filtered, paginated listing
//! - `GET    /api/products/search` - Name search (`?q=`)
//! - `GET    /api/products/stats`  - Product count per category
//! - `GET    /api/products/{id}`   - Single product
//! - `POST   /api/products`        - Create
//! - `PUT    /api/products/{id}`   - Full replace
//! - `DELETE /api/products/{id}`   - Delete
//!
//! Reads share the catalog read lock. Writes hold the write lock from
//! lookup to mutation, so a concurrent delete can never slip between the
//! existence check and the replace.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::{info, instrument};

use crate::catalog::Pagination;
use crate::error::AppResult;
use crate::extract::{Path, Query, ValidatedProduct};
use crate::metrics;
use crate::models::{
    CategoryStats, DeleteProductResponse, ListProductsQuery, Product, ProductPage, SearchQuery,
};
use crate::state::AppState;

/// Confirmation text returned by a successful delete.
pub const DELETE_SUCCESS_MESSAGE: &str = "Product deleted successfully";

/// List products, optionally filtered by category and paginated.
///
/// # Query Parameters
///
/// - `category` - Case-insensitive exact category match (empty = no filter)
/// - `page` - 1-based page number (default: 1)
/// - `limit` - Page size (default: 10)
///
/// # Response Body
///
/// ```json
/// {
///   "page": 1,
///   "limit": 10,
///   "total": 2,
///   "products": [{ "id": "1", "name": "Laptop", ... }]
/// }
/// ```
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> AppResult<Json<ProductPage>> {
    let pagination = Pagination::from_params(query.page.as_deref(), query.limit.as_deref())?;
    let catalog = state.catalog.read().await;

    Ok(Json(catalog.list(query.category.as_deref(), pagination)))
}

/// Get a single product by id.
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let catalog = state.catalog.read().await;
    catalog.get(&id).cloned().map(Json)
}

/// Create a product from a validated payload.
///
/// Returns `201 Created` with the stored record, including its new id.
#[instrument(skip(state))]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedProduct(input): ValidatedProduct,
) -> AppResult<(StatusCode, Json<Product>)> {
    let mut catalog = state.catalog.write().await;
    let product = catalog.create(input)?;
    metrics::record_mutation("create", catalog.len());

    info!(id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace every field of an existing product except its id.
#[instrument(skip(state))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedProduct(input): ValidatedProduct,
) -> AppResult<Json<Product>> {
    let mut catalog = state.catalog.write().await;
    let product = catalog.replace(&id, input)?;
    metrics::record_mutation("update", catalog.len());

    info!(%id, "Product updated");
    Ok(Json(product))
}

/// Delete a product, echoing the removed record.
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteProductResponse>> {
    let mut catalog = state.catalog.write().await;
    let product = catalog.remove(&id)?;
    metrics::record_mutation("delete", catalog.len());

    info!(%id, "Product deleted");
    Ok(Json(DeleteProductResponse {
        message: DELETE_SUCCESS_MESSAGE.to_string(),
        product,
    }))
}

/// Case-insensitive substring search over product names.
///
/// Not paginated. Responds 400 when `q` is missing or empty.
#[instrument(skip(state))]
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let catalog = state.catalog.read().await;
    catalog.search(query.q.as_deref()).map(Json)
}

/// Product count per lower-cased category.
///
/// # Response Body
///
/// ```json
/// { "electronics": 2, "kitchen": 1 }
/// ```
#[instrument(skip(state))]
pub async fn product_stats(State(state): State<AppState>) -> Json<CategoryStats> {
    Json(state.catalog.read().await.stats())
}
