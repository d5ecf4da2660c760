use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Product;

/// Query string of `GET /api/products`.
///
/// `page` and `limit` stay raw strings here; [`crate::catalog::Pagination`]
/// decides whether they are acceptable so that every rejection carries the
/// same message.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub category: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Query string of `GET /api/products/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// One page of a (possibly filtered) listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub page: usize,
    pub limit: usize,
    /// Size of the filtered set, not of this page
    pub total: usize,
    pub products: Vec<Product>,
}

/// Response after deleting a product.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteProductResponse {
    pub message: String,
    pub product: Product,
}

/// Lower-cased category to product count.
pub type CategoryStats = BTreeMap<String, usize>;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service health status
    pub status: String,
    /// Service version
    pub version: String,
    /// Number of products currently held
    pub products: usize,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Current timestamp
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_all_optional() {
        let query: ListProductsQuery =
            serde_json::from_str("{}").expect("Deserialization should succeed");

        assert!(query.category.is_none());
        assert!(query.page.is_none());
        assert!(query.limit.is_none());
    }

    #[test]
    fn test_product_page_serialization() {
        let page = ProductPage {
            page: 2,
            limit: 5,
            total: 7,
            products: vec![],
        };

        let json = serde_json::to_string(&page).expect("Serialization should succeed");
        assert_eq!(json, r#"{"page":2,"limit":5,"total":7,"products":[]}"#);
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            products: 3,
            uptime_seconds: 12,
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&response).expect("Serialization should succeed");
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"products\":3"));
    }
}
