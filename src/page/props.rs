//! The prop model.
//!
//! # Responsibilities
//! - Represent plain, request-aware and lazy prop values as one closed union
//! - Carry the flags the resolver and the page builder switch on:
//!   mergeable, ignore-on-first-load, defer group
//! - Keep prop sets insertion-ordered; order is client-observable through
//!   `props`, `deferredProps` and `mergeProps`
//!
//! # Design Decisions
//! - Lazy props are a tagged union (kind + flags + producer), not a type
//!   hierarchy; resolution logic matches on [`LazyKind`]
//! - Producers are zero-argument async closures returning
//!   `Result<Value, BoxError>`; any error aborts the whole render
//! - Factories yield [`FactoryOutput`], closing the
//!   callable → lazy wrapper → producer chain at the type level

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::BoxError;
use crate::http::context::RequestContext;

/// Group name used by [`defer`] when none is given.
pub const DEFAULT_DEFER_GROUP: &str = "default";

/// Zero-argument async producer behind a lazy prop.
pub type Producer = Arc<dyn Fn() -> BoxFuture<'static, Result<Value, BoxError>> + Send + Sync>;

/// Request-aware async factory, used for shared data that depends on the
/// incoming request.
pub type Factory =
    Arc<dyn Fn(Arc<RequestContext>) -> BoxFuture<'static, Result<FactoryOutput, BoxError>> + Send + Sync>;

/// What a factory can yield: a plain value, or a lazy wrapper whose producer
/// is invoked right after.
pub enum FactoryOutput {
    Value(Value),
    Lazy(LazyProp),
}

impl From<Value> for FactoryOutput {
    fn from(value: Value) -> Self {
        FactoryOutput::Value(value)
    }
}

impl From<LazyProp> for FactoryOutput {
    fn from(lazy: LazyProp) -> Self {
        FactoryOutput::Lazy(lazy)
    }
}

/// The four lazy wrapper kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LazyKind {
    /// Excluded from first loads; included only when requested by name.
    Optional,
    /// Excluded from first loads; reported under `deferredProps` so the
    /// client fetches it after the initial render.
    Deferred,
    /// Always eligible; merged into client state instead of replacing it.
    Merge,
    /// Always included, exempt from partial-reload exclusion.
    Always,
}

/// A prop backed by a producer that only runs when the prop is included in
/// the response.
#[derive(Clone)]
pub struct LazyProp {
    kind: LazyKind,
    producer: Producer,
    mergeable: bool,
    ignore_on_first_load: bool,
    group: Option<String>,
}

impl LazyProp {
    fn new(kind: LazyKind, producer: Producer) -> Self {
        Self {
            kind,
            producer,
            mergeable: matches!(kind, LazyKind::Merge),
            ignore_on_first_load: matches!(kind, LazyKind::Optional | LazyKind::Deferred),
            group: matches!(kind, LazyKind::Deferred).then(|| DEFAULT_DEFER_GROUP.to_string()),
        }
    }

    /// Mark the prop merge-eligible. Optional props never merge, so this has
    /// no effect on them.
    pub fn merge(mut self) -> Self {
        if self.kind != LazyKind::Optional {
            self.mergeable = true;
        }
        self
    }

    /// Set the defer group. Has no effect on non-deferred props.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        if self.kind == LazyKind::Deferred {
            self.group = Some(group.into());
        }
        self
    }

    pub fn kind(&self) -> LazyKind {
        self.kind
    }

    pub fn is_mergeable(&self) -> bool {
        self.mergeable
    }

    pub fn ignores_first_load(&self) -> bool {
        self.ignore_on_first_load
    }

    /// Defer group name, present only for deferred props.
    pub fn defer_group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Invoke the wrapped producer.
    pub async fn produce(&self) -> Result<Value, BoxError> {
        (self.producer)().await
    }
}

impl fmt::Debug for LazyProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyProp")
            .field("kind", &self.kind)
            .field("mergeable", &self.mergeable)
            .field("ignore_on_first_load", &self.ignore_on_first_load)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

fn producer<F, Fut>(f: F) -> Producer
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
{
    Arc::new(move || f().boxed())
}

/// Prop excluded from first loads, included only via a partial reload that
/// names it.
pub fn optional<F, Fut>(f: F) -> LazyProp
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
{
    LazyProp::new(LazyKind::Optional, producer(f))
}

/// Prop excluded from the first load and grouped under `deferredProps` so
/// the client fetches it after the initial render.
pub fn defer<F, Fut>(f: F) -> LazyProp
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
{
    LazyProp::new(LazyKind::Deferred, producer(f))
}

/// Prop whose value the client merges into existing state instead of
/// replacing it.
pub fn merge<F, Fut>(f: F) -> LazyProp
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
{
    LazyProp::new(LazyKind::Merge, producer(f))
}

/// Prop included on every response, exempt from `only`/`except` exclusion.
pub fn always<F, Fut>(f: F) -> LazyProp
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
{
    LazyProp::new(LazyKind::Always, producer(f))
}

/// A single prop value.
#[derive(Clone)]
pub enum Prop {
    /// Serialized as-is.
    Value(Value),
    /// Evaluated with the request context on every render that includes it.
    Factory(Factory),
    /// One of the four lazy wrapper kinds.
    Lazy(LazyProp),
}

impl Prop {
    /// Wrap a plain JSON value.
    pub fn value(value: impl Into<Value>) -> Self {
        Prop::Value(value.into())
    }

    /// Wrap a request-aware factory.
    pub fn factory<F, Fut, O>(f: F) -> Self
    where
        F: Fn(Arc<RequestContext>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, BoxError>> + Send + 'static,
        O: Into<FactoryOutput>,
    {
        Prop::Factory(Arc::new(move |ctx| {
            let fut = f(ctx);
            async move { fut.await.map(Into::into) }.boxed()
        }))
    }

    pub fn as_lazy(&self) -> Option<&LazyProp> {
        match self {
            Prop::Lazy(lazy) => Some(lazy),
            _ => None,
        }
    }

    /// True for `Optional`/`Deferred` props, which full loads drop.
    pub fn ignores_first_load(&self) -> bool {
        self.as_lazy().is_some_and(LazyProp::ignores_first_load)
    }

    /// True for props force-included past `only`/`except` filtering.
    pub fn is_always(&self) -> bool {
        self.as_lazy()
            .is_some_and(|lazy| lazy.kind() == LazyKind::Always)
    }

    /// True for props listed in `mergeProps` unless reset.
    pub fn is_mergeable(&self) -> bool {
        self.as_lazy().is_some_and(LazyProp::is_mergeable)
    }
}

impl fmt::Debug for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prop::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Prop::Factory(_) => f.write_str("Factory(..)"),
            Prop::Lazy(lazy) => f.debug_tuple("Lazy").field(lazy).finish(),
        }
    }
}

impl From<Value> for Prop {
    fn from(value: Value) -> Self {
        Prop::Value(value)
    }
}

impl From<LazyProp> for Prop {
    fn from(lazy: LazyProp) -> Self {
        Prop::Lazy(lazy)
    }
}

impl From<&str> for Prop {
    fn from(value: &str) -> Self {
        Prop::Value(Value::from(value))
    }
}

impl From<String> for Prop {
    fn from(value: String) -> Self {
        Prop::Value(Value::from(value))
    }
}

impl From<bool> for Prop {
    fn from(value: bool) -> Self {
        Prop::Value(Value::from(value))
    }
}

impl From<i64> for Prop {
    fn from(value: i64) -> Self {
        Prop::Value(Value::from(value))
    }
}

impl From<i32> for Prop {
    fn from(value: i32) -> Self {
        Prop::Value(Value::from(value))
    }
}

impl From<u64> for Prop {
    fn from(value: u64) -> Self {
        Prop::Value(Value::from(value))
    }
}

impl From<f64> for Prop {
    fn from(value: f64) -> Self {
        Prop::Value(Value::from(value))
    }
}

/// An insertion-ordered prop set.
///
/// Built once per request by merging shared data with page-specific props;
/// page-specific keys win on conflict but keep their first-seen position.
#[derive(Debug, Clone, Default)]
pub struct Props(IndexMap<String, Prop>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a prop, replacing any existing value under the same key.
    pub fn set(&mut self, key: impl Into<String>, prop: impl Into<Prop>) {
        self.0.insert(key.into(), prop.into());
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, prop: impl Into<Prop>) -> Self {
        self.set(key, prop);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Prop> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Remove a prop, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Prop> {
        self.0.shift_remove(key)
    }

    /// Overlay `other`, its values winning on key collision.
    pub fn extend(&mut self, other: Props) {
        for (key, prop) in other.0 {
            self.0.insert(key, prop);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Prop)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Props {
    type Item = (String, Prop);
    type IntoIter = indexmap::map::IntoIter<String, Prop>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, Prop)> for Props {
    fn from_iter<I: IntoIterator<Item = (String, Prop)>>(iter: I) -> Self {
        Self(IndexMap::from_iter(iter))
    }
}
