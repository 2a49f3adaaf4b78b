//! Setup-time service state shared by every request.

use std::sync::Arc;

use crate::config::schema::InertiaConfig;
use crate::config::validation::validate_config;
use crate::error::Error;
use crate::page::props::{Prop, Props};
use crate::render::ssr::{HttpSsrGateway, SsrRenderer};
use crate::render::template::{FileTemplate, TemplateProvider};
use crate::version::VersionHandle;

/// Validated, immutable bundle of configuration and collaborators.
///
/// Built once at startup and shared via `Arc`; the per-request
/// [`Inertia`](crate::page::Inertia) builder is constructed from it by the
/// extractor.
pub struct InertiaService {
    config: InertiaConfig,
    shared: Props,
    template: Arc<dyn TemplateProvider>,
    ssr: Option<Arc<dyn SsrRenderer>>,
    version: VersionHandle,
}

impl std::fmt::Debug for InertiaService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InertiaService")
            .field("config", &self.config)
            .field("shared", &self.shared)
            .field("template", &"<dyn TemplateProvider>")
            .field("ssr", &self.ssr.as_ref().map(|_| "<dyn SsrRenderer>"))
            .field("version", &self.version)
            .finish()
    }
}

impl InertiaService {
    /// Validate the configuration and wire up default collaborators: a file
    /// template provider and, when SSR is enabled, the HTTP render gateway.
    ///
    /// Configuration problems are fatal here, before any request runs.
    pub fn new(config: InertiaConfig) -> Result<Self, Error> {
        validate_config(&config).map_err(|errors| {
            Error::Config(
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        })?;

        let template: Arc<dyn TemplateProvider> =
            Arc::new(FileTemplate::new(config.template.path.clone()));
        let ssr: Option<Arc<dyn SsrRenderer>> = if config.ssr.enabled {
            Some(Arc::new(HttpSsrGateway::new(&config.ssr)?))
        } else {
            None
        };
        let version = VersionHandle::new(config.version.0.clone());

        Ok(Self {
            config,
            shared: Props::new(),
            template,
            ssr,
            version,
        })
    }

    /// Register application-level shared data, merged under every page's
    /// props.
    pub fn with_shared(mut self, key: impl Into<String>, prop: impl Into<Prop>) -> Self {
        self.shared.set(key, prop);
        self
    }

    /// Replace the template provider.
    pub fn with_template(mut self, template: impl TemplateProvider + 'static) -> Self {
        self.template = Arc::new(template);
        self
    }

    /// Replace the SSR renderer and enable server rendering.
    pub fn with_ssr(mut self, renderer: impl SsrRenderer + 'static) -> Self {
        self.config.ssr.enabled = true;
        self.ssr = Some(Arc::new(renderer));
        self
    }

    /// Swap in an externally managed version handle.
    pub fn with_version(mut self, version: VersionHandle) -> Self {
        self.version = version;
        self
    }

    pub fn config(&self) -> &InertiaConfig {
        &self.config
    }

    pub(crate) fn shared(&self) -> &Props {
        &self.shared
    }

    pub(crate) fn template(&self) -> &Arc<dyn TemplateProvider> {
        &self.template
    }

    pub(crate) fn ssr(&self) -> Option<&Arc<dyn SsrRenderer>> {
        self.ssr.as_ref()
    }

    /// The current version tag.
    pub fn version(&self) -> String {
        self.version.current()
    }

    /// Handle for swapping the version tag at runtime.
    pub fn version_handle(&self) -> VersionHandle {
        self.version.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_is_fatal_at_setup() {
        let mut config = InertiaConfig::default();
        config.version.0 = String::new();

        let err = InertiaService::new(config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_version_handle_is_shared() {
        let service = InertiaService::new(InertiaConfig::default()).unwrap();
        let handle = service.version_handle();
        handle.set("2");
        assert_eq!(service.version(), "2");
    }
}
