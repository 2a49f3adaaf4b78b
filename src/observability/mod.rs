//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`; render failures and protocol
//!   transitions log with field context (component, url, version)
//! - Log level configurable via config and environment

pub mod logging;
