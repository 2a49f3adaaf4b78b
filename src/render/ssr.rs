//! Server-side rendering collaborator.
//!
//! # Responsibilities
//! - Define the renderer contract: page object in, head/body fragments out
//! - Talk to an external render server over HTTP
//!
//! # Design Decisions
//! - Renderer failures propagate; the adapter never silently falls back
//!   from server rendering to client rendering
//! - The gateway serializes the page object exactly as the JSON protocol
//!   response does, so the render server sees the same shape the client does

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::config::schema::SsrConfig;
use crate::error::Error;
use crate::page::object::PageObject;

/// Fragments returned by the SSR collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Markup injected at the head marker.
    pub head: String,
    /// Markup injected at the body marker.
    pub body: String,
}

/// Renders a page object into HTML fragments.
#[async_trait]
pub trait SsrRenderer: Send + Sync {
    async fn render(&self, page: &PageObject) -> Result<RenderedPage, Error>;
}

/// Talks to an external render server (typically a Node process hosting the
/// client app's server entrypoint) over HTTP.
pub struct HttpSsrGateway {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpSsrGateway {
    pub fn new(config: &SsrConfig) -> Result<Self, Error> {
        let endpoint = Url::parse(&config.server_url)
            .map_err(|err| Error::Config(format!("invalid SSR server URL: {err}")))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| Error::Config(format!("failed to build SSR client: {err}")))?;
        Ok(Self { endpoint, client })
    }
}

/// Wire shape of the render server's response. `head` arrives as a list of
/// fragments (one per tag), joined with newlines for injection.
#[derive(Debug, Deserialize)]
struct SsrResponse {
    #[serde(default)]
    head: Vec<String>,
    body: String,
}

#[async_trait]
impl SsrRenderer for HttpSsrGateway {
    async fn render(&self, page: &PageObject) -> Result<RenderedPage, Error> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(page)
            .send()
            .await
            .map_err(Error::render)?
            .error_for_status()
            .map_err(Error::render)?;

        let rendered: SsrResponse = response.json().await.map_err(Error::render)?;

        Ok(RenderedPage {
            head: rendered.head.join("\n"),
            body: rendered.body,
        })
    }
}
