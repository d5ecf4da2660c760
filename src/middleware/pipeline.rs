//! Ordered pre-routing stages.
//!
//! Every request runs through the stages of a [`Pipeline`] in list order
//! before it reaches the router. A stage either lets the request continue
//! (`Ok(())`) or short-circuits it with an [`AppError`], in which case no
//! later stage, route or handler runs and the error is rendered by
//! [`AppError`]'s `IntoResponse`, exactly once.
//!
//! The full request order is:
//!
//! ```text
//! request_log → authentication → routing → validation (POST/PUT) → handler
//! └──────── Pipeline ────────┘   └──── axum Router + extractors ────┘
//! ```

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, Response};
use axum::response::IntoResponse;
use tower::{Layer, Service};
use tracing::debug;

use super::auth::ApiKeyAuth;
use super::request_log::RequestLogger;
use crate::config::Config;
use crate::error::AppResult;

/// A single named step of the pre-routing pipeline.
pub trait RequestStage: Send + Sync {
    /// Stable identifier used in logs and by [`Pipeline::stage_names`].
    fn name(&self) -> &'static str;

    /// Inspect the request; `Err` stops the pipeline.
    fn check(&self, req: &Request<Body>) -> AppResult<()>;
}

/// Fixed, ordered list of request stages.
#[derive(Clone)]
pub struct Pipeline {
    stages: Arc<[Arc<dyn RequestStage>]>,
}

impl Pipeline {
    /// Build a pipeline running `stages` in the given order.
    pub fn new(stages: Vec<Arc<dyn RequestStage>>) -> Self {
        Self {
            stages: stages.into(),
        }
    }

    /// The standard pipeline: request logging, then API key authentication.
    pub fn from_config(config: &Config) -> Self {
        Self::new(vec![
            Arc::new(RequestLogger),
            Arc::new(ApiKeyAuth::new(
                config.api_key.clone(),
                config.api_prefix.clone(),
            )),
        ])
    }

    /// Names of all stages in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage in order, stopping at the first error.
    pub fn run(&self, req: &Request<Body>) -> AppResult<()> {
        for stage in self.stages.iter() {
            stage.check(req).inspect_err(|e| {
                debug!(stage = stage.name(), kind = e.kind(), "Pipeline short-circuited");
            })?;
        }
        Ok(())
    }
}

impl<S> Layer<S> for Pipeline {
    type Service = PipelineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PipelineService {
            inner,
            pipeline: self.clone(),
        }
    }
}

/// Service wrapper running the pipeline before the inner service.
#[derive(Clone)]
pub struct PipelineService<S> {
    inner: S,
    pipeline: Pipeline,
}

impl<S> Service<Request<Body>> for PipelineService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let verdict = self.pipeline.run(&req);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            match verdict {
                Ok(()) => inner.call(req).await,
                Err(err) => Ok(err.into_response()),
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use axum::http::StatusCode;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    /// Counts how often it runs, optionally rejecting.
    struct Probe {
        name: &'static str,
        calls: Arc<AtomicUsize>,
        reject: bool,
    }

    impl RequestStage for Probe {
        fn name(&self) -> &'static str {
            self.name
        }

        fn check(&self, _req: &Request<Body>) -> AppResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.reject {
                Err(AppError::Validation(format!("{} rejected", self.name)))
            } else {
                Ok(())
            }
        }
    }

    fn probe(name: &'static str, reject: bool) -> (Arc<dyn RequestStage>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let stage = Arc::new(Probe {
            name,
            calls: calls.clone(),
            reject,
        });
        (stage, calls)
    }

    fn request() -> Request<Body> {
        Request::builder().uri("/api/products").body(Body::empty()).unwrap()
    }

    #[test]
    fn test_standard_stage_order() {
        let pipeline = Pipeline::from_config(&Config::default());
        assert_eq!(pipeline.stage_names(), vec!["request_log", "authentication"]);
    }

    #[test]
    fn test_all_stages_run_when_passing() {
        let (a, a_calls) = probe("a", false);
        let (b, b_calls) = probe("b", false);
        let pipeline = Pipeline::new(vec![a, b]);

        assert!(pipeline.run(&request()).is_ok());
        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
        assert_eq!(b_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rejection_skips_later_stages() {
        let (a, _) = probe("a", true);
        let (b, b_calls) = probe("b", false);
        let pipeline = Pipeline::new(vec![a, b]);

        let err = pipeline.run(&request()).unwrap_err();
        assert_eq!(err.to_string(), "a rejected");
        assert_eq!(b_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_layer_short_circuits_inner_service() {
        let (reject, _) = probe("gate", true);
        let inner_calls = Arc::new(AtomicUsize::new(0));
        let counter = inner_calls.clone();

        let inner = tower::service_fn(move |_req: Request<Body>| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, Infallible>(Response::new(Body::empty())) }
        });
        let service = Pipeline::new(vec![reject]).layer(inner);

        let response = service.oneshot(request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(inner_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_layer_forwards_when_passing() {
        let (pass, _) = probe("noop", false);
        let inner = tower::service_fn(|_req: Request<Body>| async {
            Ok::<_, Infallible>(Response::new(Body::from("handled")))
        });
        let service = Pipeline::new(vec![pass]).layer(inner);

        let response = service.oneshot(request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
