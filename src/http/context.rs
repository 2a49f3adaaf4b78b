//! Immutable per-request snapshot handed to the page builder and to
//! request-aware prop factories.

use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, Uri};

/// The request facts the protocol core needs: method, URL and headers.
///
/// Captured once when the [`Inertia`](crate::page::Inertia) extractor runs;
/// prop factories receive it behind an `Arc` so materialization can fan out
/// across keys without borrowing the request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
}

impl RequestContext {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap) -> Self {
        Self {
            method,
            uri,
            headers,
        }
    }

    pub fn from_parts(parts: &Parts) -> Self {
        Self::new(
            parts.method.clone(),
            parts.uri.clone(),
            parts.headers.clone(),
        )
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Path plus query, the `url` field of the page object.
    pub fn url(&self) -> &str {
        self.uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/")
    }

    /// Read a single header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        super::headers::get(&self.headers, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_includes_query() {
        let ctx = RequestContext::new(
            Method::GET,
            "/users?page=2".parse().unwrap(),
            HeaderMap::new(),
        );
        assert_eq!(ctx.url(), "/users?page=2");
    }

    #[test]
    fn test_url_defaults_to_root() {
        let ctx = RequestContext::new(
            Method::GET,
            Uri::from_static("http://localhost"),
            HeaderMap::new(),
        );
        assert_eq!(ctx.url(), "/");
    }
}
