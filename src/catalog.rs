//! In-memory product collection and its query engine.
//!
//! The [`Catalog`] owns an ordered `Vec<Product>`:
//!
//! - creates append to the end
//! - replaces overwrite in place, keeping position and id
//! - removes shift later records down without touching their ids
//!
//! `Catalog` itself is not synchronized. The application state wraps it in a
//! single `RwLock` so that each operation runs atomically with respect to
//! the others (see [`crate::state::SharedCatalog`]).

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{CategoryStats, Product, ProductInput, ProductPage, seed_products};
use crate::validation::{INVALID_PAGINATION_MESSAGE, parse_positive_integer, validate_search_query};

/// Message for every id lookup miss.
pub const PRODUCT_NOT_FOUND_MESSAGE: &str = "Product not found";

/// Page used when the client sends none.
pub const DEFAULT_PAGE: usize = 1;

/// Page size used when the client sends none.
pub const DEFAULT_LIMIT: usize = 10;

/// Generated ids tried per create before giving up.
pub const MAX_ID_ATTEMPTS: usize = 16;

/// Source of ids for newly created products.
pub type IdGenerator = Box<dyn Fn() -> String + Send + Sync>;

/// Validated `page`/`limit` pair, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
}

impl Pagination {
    /// Parse raw query values, falling back to the defaults when absent.
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> AppResult<Self> {
        let page = match page {
            Some(raw) => parse_positive_integer(raw),
            None => Some(DEFAULT_PAGE),
        };
        let limit = match limit {
            Some(raw) => parse_positive_integer(raw),
            None => Some(DEFAULT_LIMIT),
        };

        match (page, limit) {
            (Some(page), Some(limit)) => Ok(Self { page, limit }),
            _ => Err(AppError::Validation(
                INVALID_PAGINATION_MESSAGE.to_string(),
            )),
        }
    }

    /// Half-open index range `[start, end)` of this page, clamped to `len`.
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let start = (self.page - 1).saturating_mul(self.limit).min(len);
        let end = self.page.saturating_mul(self.limit).min(len);
        (start, end)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Ordered, in-memory set of products keyed by id.
pub struct Catalog {
    products: Vec<Product>,
    next_id: IdGenerator,
}

impl Catalog {
    /// Empty catalog with UUID v4 ids.
    pub fn new() -> Self {
        Self::from_products(Vec::new())
    }

    /// Catalog holding the startup seed records.
    pub fn seeded() -> Self {
        Self::from_products(seed_products())
    }

    /// Catalog holding `products` in the given order.
    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            products,
            next_id: Box::new(|| Uuid::new_v4().to_string()),
        }
    }

    /// Replace the id source (useful for deterministic tests).
    pub fn with_id_generator(
        mut self,
        generator: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        self.next_id = Box::new(generator);
        self
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All products in collection order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// One page of the products in `category` (or of all products).
    ///
    /// An empty `category` is treated as no filter. `total` is the size of
    /// the filtered set; pages past the end are empty rather than an error.
    pub fn list(&self, category: Option<&str>, pagination: Pagination) -> ProductPage {
        let wanted = category
            .filter(|c| !c.is_empty())
            .map(str::to_lowercase);

        let filtered: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| wanted.as_ref().is_none_or(|c| p.category_key() == *c))
            .collect();

        let (start, end) = pagination.bounds(filtered.len());
        let products = filtered
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|p| (*p).clone())
            .collect();

        ProductPage {
            page: pagination.page,
            limit: pagination.limit,
            total: filtered.len(),
            products,
        }
    }

    /// Exact, case-sensitive id lookup.
    pub fn get(&self, id: &str) -> AppResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(not_found)
    }

    /// Store a validated payload under a fresh id and return the record.
    ///
    /// Fails with [`AppError::Internal`] when the id generator keeps
    /// returning ids already in use; the catalog is left unchanged.
    pub fn create(&mut self, input: ProductInput) -> AppResult<Product> {
        let id = self.fresh_id()?;
        let product = Product::from_input(id, input);
        self.products.push(product.clone());
        Ok(product)
    }

    /// Overwrite all fields except `id` of an existing product.
    pub fn replace(&mut self, id: &str, input: ProductInput) -> AppResult<Product> {
        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(not_found)?;

        *slot = Product::from_input(id, input);
        Ok(slot.clone())
    }

    /// Remove a product, returning it.
    pub fn remove(&mut self, id: &str) -> AppResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(not_found)?;

        Ok(self.products.remove(index))
    }

    /// Products whose name contains `query`, ignoring case, in collection order.
    pub fn search(&self, query: Option<&str>) -> AppResult<Vec<Product>> {
        let needle = validate_search_query(query)?.to_lowercase();

        Ok(self
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    /// Count of products per lower-cased category.
    pub fn stats(&self) -> CategoryStats {
        let mut stats = CategoryStats::new();
        for product in &self.products {
            *stats.entry(product.category_key()).or_insert(0) += 1;
        }
        stats
    }

    /// Generate an id not held by any current product.
    fn fresh_id(&self) -> AppResult<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = (self.next_id)();
            if !self.products.iter().any(|p| p.id == id) {
                return Ok(id);
            }
        }
        Err(AppError::Internal(format!(
            "no unused product id after {MAX_ID_ATTEMPTS} attempts"
        )))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("products", &self.products)
            .finish_non_exhaustive()
    }
}

fn not_found() -> AppError {
    AppError::NotFound(PRODUCT_NOT_FOUND_MESSAGE.to_string())
}
