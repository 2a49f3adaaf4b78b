//! Axum extractor for the per-request page builder.
//!
//! The builder is constructed fresh for every request and handed to the
//! handler as an argument; nothing is attached to ambient request or
//! response state.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use crate::http::context::RequestContext;
use crate::page::builder::Inertia;
use crate::service::InertiaService;

impl<S> FromRequestParts<S> for Inertia
where
    S: Send + Sync,
    Arc<InertiaService>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let service = Arc::<InertiaService>::from_ref(state);
        Ok(Inertia::new(service, RequestContext::from_parts(parts)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::InertiaConfig;
    use axum::http::Request;

    #[tokio::test]
    async fn test_extractor_builds_from_state() {
        let service = Arc::new(InertiaService::new(InertiaConfig::default()).unwrap());
        let (mut parts, _) = Request::builder()
            .uri("/dashboard")
            .header("x-inertia", "true")
            .body(())
            .unwrap()
            .into_parts();

        let inertia = Inertia::from_request_parts(&mut parts, &service)
            .await
            .unwrap();
        assert_eq!(inertia.request().url(), "/dashboard");
    }
}
