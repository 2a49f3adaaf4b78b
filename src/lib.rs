//! Server-side adapter for the Inertia.js page-transition protocol.
//!
//! Lets a server-rendered axum application behave like a single-page
//! application: handlers render a *component* with a set of *props*, and the
//! adapter decides — from a handful of protocol headers — which props to
//! compute and whether to reply with a full HTML document or a JSON page
//! object.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use axum::{routing::get, Router};
//! use inertia_axum::config::InertiaConfig;
//! use inertia_axum::page::{defer, Inertia, Props};
//! use inertia_axum::service::InertiaService;
//! use serde_json::json;
//!
//! async fn dashboard(inertia: Inertia) -> Result<axum::response::Response, inertia_axum::Error> {
//!     let props = Props::new()
//!         .with("user", json!({"name": "jo"}))
//!         .with("stats", defer(|| async { Ok(json!({"visits": 12})) }));
//!     inertia.render("dashboard", props).await
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let service = Arc::new(InertiaService::new(InertiaConfig::default())?);
//! let app: Router = Router::new()
//!     .route("/dashboard", get(dashboard))
//!     .with_state(service);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod page;
pub mod render;
pub mod service;
pub mod version;

pub use config::InertiaConfig;
pub use error::Error;
pub use http::preserve_method_redirects;
pub use page::{Inertia, PageObject, Prop, Props};
pub use service::InertiaService;
pub use version::VersionHandle;
