//! The page object: the wire representation of one render.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One render, as serialized into the protocol JSON response or embedded in
/// the HTML document.
///
/// Constructed fresh per request by [`Inertia::render`], immutable once
/// emitted. Optional sections are omitted from the wire entirely when empty.
///
/// [`Inertia::render`]: crate::page::Inertia::render
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageObject {
    /// Identifier of the requested page component.
    pub component: String,

    /// Request path plus query string.
    pub url: String,

    /// Current asset/protocol version tag.
    pub version: String,

    /// Resolved props, lazy wrappers already replaced by produced values.
    pub props: Map<String, Value>,

    /// Instructs the client to clear its history state.
    pub clear_history: bool,

    /// Instructs the client to encrypt history entries.
    pub encrypt_history: bool,

    /// Deferred prop names by group, present only on full loads that carry
    /// at least one deferred prop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deferred_props: Option<IndexMap<String, Vec<String>>>,

    /// Merge-eligible prop names not reset on this response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_props: Option<Vec<String>>,
}
