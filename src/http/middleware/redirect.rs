//! Preserve-method redirect middleware.
//!
//! Browsers reissue a 302 redirect as GET. For PUT, PATCH and DELETE
//! requests that silently demotes the follow-up request, so any 302 emitted
//! downstream is rewritten to 303 (See Other).

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

/// Rewrite 302 responses to PUT/PATCH/DELETE requests into 303.
///
/// Install with `axum::middleware::from_fn`.
pub async fn preserve_method_redirects(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let mut response = next.run(request).await;

    if response.status() == StatusCode::FOUND
        && (method == Method::PUT || method == Method::PATCH || method == Method::DELETE)
    {
        tracing::debug!(method = %method, "rewriting 302 redirect to 303");
        *response.status_mut() = StatusCode::SEE_OTHER;
    }

    response
}
