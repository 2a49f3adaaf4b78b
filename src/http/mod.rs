//! HTTP protocol surface.
//!
//! # Data Flow
//! ```text
//! incoming request
//!     → extract.rs (build per-request Inertia from router state)
//!     → context.rs (immutable method/url/header snapshot)
//!     → headers.rs (wire-contract reads: partial filters, version, reset)
//!     → middleware/ (response rewrites: preserve-method redirects)
//! ```

pub mod context;
pub mod extract;
pub mod headers;
pub mod middleware;

pub use context::RequestContext;
pub use middleware::preserve_method_redirects;
