//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal config works out of the box.

use serde::{Deserialize, Serialize};

/// Root configuration for the Inertia adapter.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct InertiaConfig {
    /// Id of the root element the client app mounts into.
    pub root_element_id: RootElementId,

    /// Current asset/protocol version tag.
    pub version: VersionTag,

    /// HTML shell settings.
    pub template: TemplateConfig,

    /// Client-side history behavior.
    pub history: HistoryConfig,

    /// Server-side rendering settings.
    pub ssr: SsrConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Newtype carrying the root element id default.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RootElementId(pub String);

impl Default for RootElementId {
    fn default() -> Self {
        Self("app".to_string())
    }
}

/// Newtype carrying the version tag default.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct VersionTag(pub String);

impl Default for VersionTag {
    fn default() -> Self {
        Self("1".to_string())
    }
}

/// HTML shell configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Path to the HTML shell carrying the injection markers.
    pub path: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            path: "index.html".to_string(),
        }
    }
}

/// Client-side history configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Default for `encryptHistory` on every page object; overridable per
    /// request.
    pub encrypt: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { encrypt: true }
    }
}

/// Server-side rendering configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SsrConfig {
    /// Enable server-side rendering of full documents.
    pub enabled: bool,

    /// Endpoint of the external render server.
    pub server_url: String,

    /// Render request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SsrConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            server_url: "http://127.0.0.1:13714/render".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InertiaConfig::default();
        assert_eq!(config.root_element_id.0, "app");
        assert_eq!(config.version.0, "1");
        assert_eq!(config.template.path, "index.html");
        assert!(config.history.encrypt);
        assert!(!config.ssr.enabled);
        assert_eq!(config.ssr.timeout_secs, 30);
    }

    #[test]
    fn test_minimal_toml_parses() {
        let config: InertiaConfig = toml::from_str("").unwrap();
        assert_eq!(config.version.0, "1");

        let config: InertiaConfig = toml::from_str(
            r#"
            version = "9f2c"

            [ssr]
            enabled = true
            server_url = "http://localhost:13714/render"
            "#,
        )
        .unwrap();
        assert_eq!(config.version.0, "9f2c");
        assert!(config.ssr.enabled);
    }
}
