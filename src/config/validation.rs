//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and required-when-enabled fields
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: InertiaConfig → Result<(), Vec<ValidationError>>
//! - Runs at setup time, before any request is handled

use thiserror::Error;
use url::Url;

use crate::config::schema::InertiaConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("`{0}` must not be empty")]
    Empty(&'static str),

    #[error("ssr.server_url `{url}` is not a valid URL: {reason}")]
    InvalidSsrUrl { url: String, reason: String },

    #[error("ssr.timeout_secs must be greater than zero")]
    ZeroSsrTimeout,
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &InertiaConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.root_element_id.0.is_empty() {
        errors.push(ValidationError::Empty("root_element_id"));
    }
    if config.version.0.is_empty() {
        errors.push(ValidationError::Empty("version"));
    }
    if config.template.path.is_empty() {
        errors.push(ValidationError::Empty("template.path"));
    }

    if config.ssr.enabled {
        if let Err(err) = Url::parse(&config.ssr.server_url) {
            errors.push(ValidationError::InvalidSsrUrl {
                url: config.ssr.server_url.clone(),
                reason: err.to_string(),
            });
        }
        if config.ssr.timeout_secs == 0 {
            errors.push(ValidationError::ZeroSsrTimeout);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&InertiaConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = InertiaConfig::default();
        config.version.0 = String::new();
        config.template.path = String::new();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ValidationError::Empty("version")));
        assert!(errors.contains(&ValidationError::Empty("template.path")));
    }

    #[test]
    fn test_ssr_url_checked_only_when_enabled() {
        let mut config = InertiaConfig::default();
        config.ssr.server_url = "not a url".to_string();
        assert!(validate_config(&config).is_ok());

        config.ssr.enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidSsrUrl { .. }));
    }

    #[test]
    fn test_ssr_timeout_must_be_positive() {
        let mut config = InertiaConfig::default();
        config.ssr.enabled = true;
        config.ssr.timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::ZeroSsrTimeout]);
    }
}
