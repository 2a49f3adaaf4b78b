//! Crate-wide error definitions.
//!
//! Every failure during a render surfaces as a single [`Error`] — a prop
//! producer that fails aborts the whole render, never a partial page object.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Boxed error type accepted from prop producers and factories.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the adapter.
#[derive(Debug, Error)]
pub enum Error {
    /// A prop producer or factory failed while materializing a page object.
    #[error("failed to resolve prop `{key}`: {source}")]
    Resolution {
        key: String,
        #[source]
        source: BoxError,
    },

    /// The external SSR renderer failed or returned an unusable payload.
    #[error("server-side render failed: {source}")]
    Render {
        #[source]
        source: BoxError,
    },

    /// The HTML shell could not be read.
    #[error("failed to read template `{path}`: {source}")]
    Template {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed or missing configuration, fatal at setup time.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The page object could not be serialized.
    #[error("failed to serialize page object: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A response could not be constructed (invalid header value, etc).
    #[error("failed to build response: {0}")]
    Response(#[from] axum::http::Error),
}

impl Error {
    pub(crate) fn resolution(key: impl Into<String>, source: BoxError) -> Self {
        Error::Resolution {
            key: key.into(),
            source,
        }
    }

    pub(crate) fn render(source: impl Into<BoxError>) -> Self {
        Error::Render {
            source: source.into(),
        }
    }
}

/// Renders errors as an opaque 500. Details go to the log, never to the
/// client as protocol output.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "inertia render failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::resolution("stats", "connection refused".into());
        assert_eq!(
            err.to_string(),
            "failed to resolve prop `stats`: connection refused"
        );

        let err = Error::Config("version must not be empty".into());
        assert!(err.to_string().contains("invalid configuration"));
    }
}
