//! Request/response middleware.

pub mod redirect;

pub use redirect::preserve_method_redirects;
