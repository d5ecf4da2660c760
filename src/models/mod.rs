mod api;
mod product;

pub use api::{
    CategoryStats, DeleteProductResponse, HealthResponse, ListProductsQuery, ProductPage,
    SearchQuery,
};
pub use product::{Product, ProductInput, seed_products};
