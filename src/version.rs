//! The current asset/protocol version tag.
//!
//! The adapter only compares version tags, it never computes them. Asset
//! pipelines that derive a tag from a build manifest push it in through
//! [`VersionHandle::set`].

use std::sync::Arc;

use arc_swap::ArcSwap;

/// Shared, swappable handle to the current version tag.
///
/// Cloning is cheap and every clone observes later [`set`](Self::set) calls,
/// so a deploy hook can swap the tag while requests are in flight.
#[derive(Clone)]
pub struct VersionHandle {
    current: Arc<ArcSwap<String>>,
}

impl VersionHandle {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(initial.into())),
        }
    }

    /// The tag compared against `x-inertia-version` and emitted in page
    /// objects.
    pub fn current(&self) -> String {
        self.current.load().as_ref().clone()
    }

    /// Replace the tag. Requests already past their version check are
    /// unaffected.
    pub fn set(&self, version: impl Into<String>) {
        self.current.store(Arc::new(version.into()));
    }
}

impl std::fmt::Debug for VersionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("VersionHandle")
            .field(&self.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_observe_updates() {
        let handle = VersionHandle::new("1");
        let observer = handle.clone();
        assert_eq!(observer.current(), "1");

        handle.set("9f2c");
        assert_eq!(observer.current(), "9f2c");
    }
}
