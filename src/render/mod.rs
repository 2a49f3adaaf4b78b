//! Document rendering collaborators.
//!
//! # Data Flow
//! ```text
//! page object
//!     → template.rs (load HTML shell, inject at markers)
//!     → ssr.rs (optional: external render server produces fragments)
//!     → full HTML document response
//! ```

pub mod ssr;
pub mod template;

pub use ssr::{HttpSsrGateway, RenderedPage, SsrRenderer};
pub use template::{FileTemplate, StaticTemplate, TemplateProvider};
