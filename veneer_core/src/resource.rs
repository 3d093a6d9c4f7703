// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared caches read by overlays during compose.
//!
//! The title cache and resource manager are owned and mutated by the host
//! between frames. During a frame they are only reachable through shared
//! references bundled in [`FrameResources`](crate::overlay::FrameResources),
//! so overlays can read from them but never change them.

use core::fmt;

use kurbo::Size;

use crate::tab::TabId;

/// An opaque handle to a host-managed resource (bitmap, texture, etc.).
///
/// Resource keys are assigned by the host and passed through scene layers
/// without interpretation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceKey(pub u64);

impl fmt::Debug for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceKey({})", self.0)
    }
}

/// Read-only lookup of rendered tab titles.
pub trait TitleCache {
    /// Returns the resource holding the rendered title of `tab`, if cached.
    fn title_resource(&self, tab: TabId) -> Option<ResourceKey>;

    /// Returns the title text of `tab`, if cached.
    fn title_text(&self, tab: TabId) -> Option<&str> {
        _ = tab;
        None
    }
}

/// Read-only lookup of host-managed resources.
pub trait ResourceManager {
    /// Returns the pixel size of the resource, or `None` if it is not loaded.
    fn resource_size(&self, key: ResourceKey) -> Option<Size>;

    /// Returns whether the resource is loaded and can be drawn.
    fn is_ready(&self, key: ResourceKey) -> bool {
        self.resource_size(key).is_some()
    }
}

/// Caches that hold nothing.
///
/// Useful for hosts that have not populated their caches yet and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyCaches;

impl TitleCache for EmptyCaches {
    fn title_resource(&self, _tab: TabId) -> Option<ResourceKey> {
        None
    }
}

impl ResourceManager for EmptyCaches {
    fn resource_size(&self, _key: ResourceKey) -> Option<Size> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneResource;

    impl ResourceManager for OneResource {
        fn resource_size(&self, key: ResourceKey) -> Option<Size> {
            (key == ResourceKey(1)).then(|| Size::new(24.0, 24.0))
        }
    }

    #[test]
    fn is_ready_follows_resource_size() {
        assert!(OneResource.is_ready(ResourceKey(1)));
        assert!(!OneResource.is_ready(ResourceKey(2)));
    }

    #[test]
    fn empty_caches_hold_nothing() {
        assert_eq!(EmptyCaches.title_resource(TabId(1)), None);
        assert_eq!(EmptyCaches.title_text(TabId(1)), None);
        assert!(!EmptyCaches.is_ready(ResourceKey(0)));
    }
}
