//! HTTP middleware for request logging and authentication.
//!
//! Both are [`RequestStage`]s run in order by the [`Pipeline`] layer:
//!
//! ```text
//! Request → Request Log → Auth (/api/ only) → Router → Handler → Response
//!                           ↓
//!                      401 Unauthorized
//! ```
//!
//! # Security Considerations
//!
//! - API key comparison uses constant-time equality to prevent timing attacks
//! - A missing `API_KEY` configuration locks the protected prefix instead of
//!   opening it

pub mod auth;
pub mod pipeline;
pub mod request_log;

pub use auth::{API_KEY_HEADER, AUTH_FAILURE_MESSAGE, ApiKeyAuth};
pub use pipeline::{Pipeline, PipelineService, RequestStage};
pub use request_log::RequestLogger;
