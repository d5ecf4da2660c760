//! Request extractors that reject with [`AppError`].
//!
//! Axum's stock extractors answer with their own plain-text rejections.
//! The wrappers here route every failure through the application error
//! type instead, so malformed input produces the same JSON body and
//! message as any other validation failure on that route.

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::AppError;
use crate::models::{ListProductsQuery, ProductInput, SearchQuery};
use crate::validation::{
    INVALID_PAGINATION_MESSAGE, INVALID_PRODUCT_MESSAGE, MISSING_SEARCH_QUERY_MESSAGE,
    validate_product_payload,
};

/// A query string type with the message clients get when it cannot be
/// deserialized at all (for example a repeated `page`).
pub trait QueryShape: DeserializeOwned + Send {
    const INVALID_MESSAGE: &'static str;
}

impl QueryShape for ListProductsQuery {
    const INVALID_MESSAGE: &'static str = INVALID_PAGINATION_MESSAGE;
}

impl QueryShape for SearchQuery {
    const INVALID_MESSAGE: &'static str = MISSING_SEARCH_QUERY_MESSAGE;
}

/// Query string extractor with an [`AppError`] rejection.
#[derive(Debug)]
pub struct Query<T>(pub T);

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: QueryShape,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Query(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!(%rejection, "Unusable query string");
                Err(AppError::Validation(T::INVALID_MESSAGE.to_string()))
            }
        }
    }
}

/// Path parameter extractor with an [`AppError`] rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// A create/update body that passed the product schema.
///
/// Runs before the handler, so an invalid body is rejected with 400 even
/// when the target id does not exist.
#[derive(Debug)]
pub struct ValidatedProduct(pub ProductInput);

impl<S> FromRequest<S> for ValidatedProduct
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Missing content type, unparseable JSON and oversized bodies all
        // count as an invalid product.
        let Json(payload) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(%rejection, "Unreadable product payload");
                AppError::Validation(INVALID_PRODUCT_MESSAGE.to_string())
            })?;

        validate_product_payload(&payload).map(Self)
    }
}
