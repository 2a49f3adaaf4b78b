//! Prop selection and materialization.
//!
//! # Responsibilities
//! - Detect whether the request is a partial reload for the rendered
//!   component
//! - Select the subset of props a response includes, in the required order:
//!   first-load filter, `only` filter, `except` filter, `Always` override
//! - Materialize the selection: run factories and lazy producers
//!   concurrently across keys and fail the whole render on the first error
//!
//! # Design Decisions
//! - `only` looks keys up against the *original* set, so optional and
//!   deferred props can be requested by name on a partial reload
//! - `Always` props are restored from the original set after both filters
//! - Materialization is a fan-out/fan-in barrier; output order follows
//!   selection order regardless of producer completion order

use std::sync::Arc;

use axum::http::HeaderMap;
use futures_util::future::try_join_all;
use serde_json::{Map, Value};

use crate::error::Error;
use crate::http::context::RequestContext;
use crate::http::headers;
use crate::page::props::{FactoryOutput, Prop, Props};

/// Decides which props a response carries and produces their values.
pub struct PropResolver<'a> {
    component: &'a str,
    headers: &'a HeaderMap,
}

impl<'a> PropResolver<'a> {
    pub fn new(component: &'a str, headers: &'a HeaderMap) -> Self {
        Self { component, headers }
    }

    /// A request is a partial reload for this component iff the
    /// partial-component header names exactly this component.
    pub fn is_partial(&self) -> bool {
        headers::get(self.headers, headers::PARTIAL_COMPONENT) == Some(self.component)
    }

    /// Select the props to include, without running any producer.
    pub fn select(&self, props: &Props) -> Props {
        let partial = self.is_partial();

        let mut selected: Props = if partial {
            props.clone()
        } else {
            // Full load: optional and deferred props wait for a follow-up
            // partial reload.
            props
                .iter()
                .filter(|(_, prop)| !prop.ignores_first_load())
                .map(|(key, prop)| (key.clone(), prop.clone()))
                .collect()
        };

        if partial {
            if let Some(only) = headers::comma_list(self.headers, headers::PARTIAL_ONLY) {
                selected = only
                    .iter()
                    .filter_map(|key| {
                        props.get(key).map(|prop| (key.clone(), prop.clone()))
                    })
                    .collect();
            }

            if let Some(except) = headers::comma_list(self.headers, headers::PARTIAL_EXCEPT) {
                for key in &except {
                    selected.remove(key);
                }
            }
        }

        for (key, prop) in props.iter() {
            if prop.is_always() {
                selected.set(key.clone(), prop.clone());
            }
        }

        selected
    }

    /// Produce the final value for every selected prop.
    ///
    /// Each key's chain (factory → lazy wrapper → producer) runs
    /// sequentially; independent keys run concurrently. The first failure
    /// aborts every other materialization and the render.
    pub async fn materialize(
        &self,
        selected: Props,
        ctx: &Arc<RequestContext>,
    ) -> Result<Map<String, Value>, Error> {
        let tasks = selected.into_iter().map(|(key, prop)| {
            let ctx = Arc::clone(ctx);
            async move {
                let value = match prop {
                    Prop::Value(value) => value,
                    Prop::Lazy(lazy) => lazy
                        .produce()
                        .await
                        .map_err(|source| Error::resolution(&key, source))?,
                    Prop::Factory(factory) => {
                        let output = factory(ctx)
                            .await
                            .map_err(|source| Error::resolution(&key, source))?;
                        match output {
                            FactoryOutput::Value(value) => value,
                            FactoryOutput::Lazy(lazy) => lazy
                                .produce()
                                .await
                                .map_err(|source| Error::resolution(&key, source))?,
                        }
                    }
                };
                Ok::<(String, Value), Error>((key, value))
            }
        });

        let resolved = try_join_all(tasks).await?;
        Ok(resolved.into_iter().collect())
    }

    /// Selection followed by materialization.
    pub async fn resolve(
        &self,
        props: &Props,
        ctx: &Arc<RequestContext>,
    ) -> Result<Map<String, Value>, Error> {
        self.materialize(self.select(props), ctx).await
    }
}
