//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → InertiaConfig (validated, immutable)
//!     → InertiaService::new
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; only the version tag is swappable at
//!   runtime (through `VersionHandle`)
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    HistoryConfig, InertiaConfig, ObservabilityConfig, RootElementId, SsrConfig, TemplateConfig,
    VersionTag,
};
pub use validation::{validate_config, ValidationError};
