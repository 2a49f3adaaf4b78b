//! HTML shell handling.
//!
//! # Responsibilities
//! - Load the HTML shell for a request
//! - Inject head/body fragments at the two markers
//! - Escape the page JSON so it survives a double-quoted attribute
//!
//! # Design Decisions
//! - Only the first occurrence of each marker is replaced
//! - Providers are async; file reads never block the request path

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Error;

/// Marker replaced with SSR head fragments (or nothing).
pub const HEAD_MARKER: &str = "<!-- @inertiaHead -->";

/// Marker replaced with the SSR body or the client-side root element.
pub const BODY_MARKER: &str = "<!-- @inertia -->";

/// Supplies the HTML shell for a given request URL.
#[async_trait]
pub trait TemplateProvider: Send + Sync {
    async fn template(&self, url: &str) -> Result<String, Error>;
}

/// Reads the shell from disk on every request.
///
/// Dev-server transformation of the shell is an external concern; this
/// provider returns the file as-is.
#[derive(Debug, Clone)]
pub struct FileTemplate {
    path: PathBuf,
}

impl FileTemplate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TemplateProvider for FileTemplate {
    async fn template(&self, _url: &str) -> Result<String, Error> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| Error::Template {
                path: self.path.display().to_string(),
                source,
            })
    }
}

/// A fixed in-memory shell, handy for tests and embedded defaults.
#[derive(Debug, Clone)]
pub struct StaticTemplate {
    html: String,
}

impl StaticTemplate {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

#[async_trait]
impl TemplateProvider for StaticTemplate {
    async fn template(&self, _url: &str) -> Result<String, Error> {
        Ok(self.html.clone())
    }
}

/// Replace the first occurrence of each marker.
pub fn inject(template: &str, head: &str, body: &str) -> String {
    template
        .replacen(HEAD_MARKER, head, 1)
        .replacen(BODY_MARKER, body, 1)
}

/// The client-side mount point with the page object embedded in `data-page`.
pub fn page_root(root_element_id: &str, page_json: &str) -> String {
    format!(
        r#"<div id="{}" data-page="{}"></div>"#,
        root_element_id,
        escape_attribute(page_json)
    )
}

/// Escape double and single quotes for embedding inside an HTML attribute.
pub fn escape_attribute(value: &str) -> String {
    value.replace('"', "&quot;").replace('\'', "&#039;")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHELL: &str = "<html><head><!-- @inertiaHead --></head>\
                         <body><!-- @inertia --></body></html>";

    #[test]
    fn test_inject_replaces_first_occurrence_only() {
        let twice = "<!-- @inertia --><!-- @inertia -->";
        assert_eq!(inject(twice, "", "X"), "X<!-- @inertia -->");
    }

    #[test]
    fn test_inject_fills_both_markers() {
        let html = inject(SHELL, "<title>t</title>", "<div>body</div>");
        assert!(html.contains("<title>t</title>"));
        assert!(html.contains("<div>body</div>"));
        assert!(!html.contains("@inertia"));
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(
            escape_attribute(r#"{"a":"it's"}"#),
            "{&quot;a&quot;:&quot;it&#039;s&quot;}"
        );
    }

    #[test]
    fn test_page_root_escapes_embedded_json() {
        let root = page_root("app", r#"{"component":"home"}"#);
        assert_eq!(
            root,
            r#"<div id="app" data-page="{&quot;component&quot;:&quot;home&quot;}"></div>"#
        );
    }

    #[tokio::test]
    async fn test_static_template_returns_shell() {
        let provider = StaticTemplate::new(SHELL);
        assert_eq!(provider.template("/").await.unwrap(), SHELL);
    }

    #[tokio::test]
    async fn test_file_template_missing_file_errors() {
        let provider = FileTemplate::new("/nonexistent/index.html");
        let err = provider.template("/").await.unwrap_err();
        assert!(matches!(err, Error::Template { .. }));
    }
}
