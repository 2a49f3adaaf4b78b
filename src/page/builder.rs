//! Per-request page object construction and response emission.
//!
//! # Responsibilities
//! - Merge shared data with page-specific props
//! - Drive the resolver and assemble the page object
//! - Pick the output strategy: protocol JSON or full HTML document
//! - Enforce the stale-version and preserve-method redirect transitions
//!
//! # Design Decisions
//! - One builder per request, handed to the handler by the extractor;
//!   nothing is stashed on ambient request/response state
//! - `render` consumes the builder, so a second render of the same request
//!   is a compile error rather than a double-emitted response
//! - A stale version on GET short-circuits to 409 + `x-inertia-location`
//!   and never renders the page object

use std::collections::HashSet;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::Response;
use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::Error;
use crate::http::context::RequestContext;
use crate::http::headers;
use crate::page::object::PageObject;
use crate::page::props::{LazyKind, Prop, Props, DEFAULT_DEFER_GROUP};
use crate::page::resolver::PropResolver;
use crate::render::template;
use crate::service::InertiaService;

/// The per-request page builder.
///
/// Obtained as an axum extractor (see [`crate::http::extract`]); carries the
/// request snapshot, request-scoped shared data and the history flags.
pub struct Inertia {
    service: Arc<InertiaService>,
    request: Arc<RequestContext>,
    shared: Props,
    clear_history: bool,
    encrypt_history: bool,
}

impl Inertia {
    pub fn new(service: Arc<InertiaService>, request: RequestContext) -> Self {
        let encrypt_history = service.config().history.encrypt;
        let shared = service.shared().clone();
        Self {
            service,
            request: Arc::new(request),
            shared,
            clear_history: false,
            encrypt_history,
        }
    }

    /// The request snapshot this builder was constructed from.
    pub fn request(&self) -> &RequestContext {
        &self.request
    }

    /// Register request-scoped shared data, merged under page props.
    pub fn share(&mut self, key: impl Into<String>, prop: impl Into<Prop>) {
        self.shared.set(key, prop);
    }

    /// Share validation errors under `errors`, nested one level under the
    /// `x-inertia-error-bag` header value when the client sent one.
    pub fn share_errors(&mut self, errors: Map<String, Value>) {
        let payload = match self.request.header(headers::ERROR_BAG) {
            Some(bag) if !bag.is_empty() => {
                let mut nested = Map::new();
                nested.insert(bag.to_string(), Value::Object(errors));
                Value::Object(nested)
            }
            _ => Value::Object(errors),
        };
        self.shared.set("errors", Prop::Value(payload));
    }

    /// Ask the client to clear its history state. Sticky for the rest of
    /// the request.
    pub fn clear_history(&mut self) {
        self.clear_history = true;
    }

    /// Override the configured `encryptHistory` default. Last write wins.
    pub fn encrypt_history(&mut self, encrypt: bool) {
        self.encrypt_history = encrypt;
    }

    /// Render `component` with `props`, producing either the protocol JSON
    /// response or a full HTML document.
    ///
    /// Consumes the builder: a request renders at most once.
    pub async fn render(
        self,
        component: impl Into<String>,
        props: Props,
    ) -> Result<Response, Error> {
        let component = component.into();
        let page = self.build_page_object(&component, props).await?;

        if self.request.header(headers::INERTIA).is_none() {
            return self.render_document(&page).await;
        }

        if self.is_stale_version() {
            tracing::debug!(
                url = %page.url,
                server_version = %page.version,
                "stale client version, forcing full navigation"
            );
            return Response::builder()
                .status(StatusCode::CONFLICT)
                .header(header::VARY, headers::INERTIA)
                .header(headers::LOCATION, page.url.as_str())
                .body(Body::empty())
                .map_err(Error::from);
        }

        tracing::debug!(component = %page.component, url = %page.url, "protocol response");
        let body = serde_json::to_vec(&page)?;
        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::VARY, headers::INERTIA)
            .header(headers::INERTIA, "true")
            .body(Body::from(body))
            .map_err(Error::from)
    }

    /// Redirect after a handler action.
    ///
    /// Browsers reissue a 302 as GET; for PUT/PATCH/DELETE requests that
    /// would demote the follow-up request, so those get 303 instead.
    pub fn redirect(&self, url: &str) -> Result<Response, Error> {
        let method = self.request.method();
        if method == Method::PUT || method == Method::PATCH || method == Method::DELETE {
            return Response::builder()
                .status(StatusCode::SEE_OTHER)
                .header(header::LOCATION, url)
                .body(Body::empty())
                .map_err(Error::from);
        }
        Response::builder()
            .status(StatusCode::FOUND)
            .header(header::LOCATION, url)
            .header(header::VARY, headers::INERTIA)
            .body(Body::empty())
            .map_err(Error::from)
    }

    /// Force a full browser navigation to `url`.
    pub fn location(&self, url: &str) -> Result<Response, Error> {
        Response::builder()
            .status(StatusCode::CONFLICT)
            .header(headers::LOCATION, url)
            .body(Body::empty())
            .map_err(Error::from)
    }

    /// Stale iff this is a GET carrying a version header that differs from
    /// the server's current tag. An absent header is never stale.
    fn is_stale_version(&self) -> bool {
        if self.request.method() != Method::GET {
            return false;
        }
        match self.request.header(headers::VERSION) {
            Some(version) => version != self.service.version(),
            None => false,
        }
    }

    async fn build_page_object(
        &self,
        component: &str,
        props: Props,
    ) -> Result<PageObject, Error> {
        let mut combined = self.shared.clone();
        combined.extend(props);

        let resolver = PropResolver::new(component, self.request.headers());
        let resolved = resolver.resolve(&combined, &self.request).await?;

        let deferred_props = if resolver.is_partial() {
            None
        } else {
            deferred_groups(&combined)
        };
        let merge_props = merge_names(&combined, self.request.headers());

        Ok(PageObject {
            component: component.to_string(),
            url: self.request.url().to_string(),
            version: self.service.version(),
            props: resolved,
            clear_history: self.clear_history,
            encrypt_history: self.encrypt_history,
            deferred_props,
            merge_props,
        })
    }

    async fn render_document(&self, page: &PageObject) -> Result<Response, Error> {
        let shell = self.service.template().template(self.request.url()).await?;

        let html = if let Some(renderer) = self.service.ssr() {
            let rendered = renderer.render(page).await?;
            template::inject(&shell, &rendered.head, &rendered.body)
        } else {
            let json = serde_json::to_string(page)?;
            let root = template::page_root(&self.service.config().root_element_id.0, &json);
            template::inject(&shell, "", &root)
        };

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
            .body(Body::from(html))
            .map_err(Error::from)
    }
}

/// Deferred prop names grouped by declared group, insertion order preserved
/// within and across groups.
fn deferred_groups(props: &Props) -> Option<IndexMap<String, Vec<String>>> {
    let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
    for (key, prop) in props.iter() {
        let Some(lazy) = prop.as_lazy() else { continue };
        if lazy.kind() == LazyKind::Deferred {
            let group = lazy.defer_group().unwrap_or(DEFAULT_DEFER_GROUP);
            groups
                .entry(group.to_string())
                .or_default()
                .push(key.clone());
        }
    }
    (!groups.is_empty()).then_some(groups)
}

/// Merge-eligible prop names minus the reset set from `x-inertia-reset`.
fn merge_names(props: &Props, request_headers: &HeaderMap) -> Option<Vec<String>> {
    let reset: HashSet<String> = headers::comma_list(request_headers, headers::RESET)
        .unwrap_or_default()
        .into_iter()
        .collect();

    let names: Vec<String> = props
        .iter()
        .filter(|(key, prop)| prop.is_mergeable() && !reset.contains(key.as_str()))
        .map(|(key, _)| key.clone())
        .collect();

    (!names.is_empty()).then_some(names)
}
