// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay identity and z-order types.

use core::fmt;

/// A handle to an overlay registered with an
/// [`OverlayManager`](super::OverlayManager).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after an overlay is unregistered and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId {
    /// Slot index into the manager's registry.
    pub(crate) idx: u32,
    /// Generation counter; must match the manager's generation for this slot.
    pub(crate) generation: u32,
}

impl OverlayId {
    /// Reassembles a handle from its raw parts.
    ///
    /// Intended for decoding recorded traces. A handle built this way is only
    /// meaningful to the manager that issued the original.
    #[inline]
    #[must_use]
    pub const fn from_raw(index: u32, generation: u32) -> Self {
        Self {
            idx: index,
            generation,
        }
    }

    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OverlayId({}@gen{})", self.idx, self.generation)
    }
}

/// Front-to-back priority of an overlay, for drawing and hit-testing.
///
/// Larger values are closer to the viewer. Overlays with equal z-order are
/// ordered by registration: the one registered earlier sits further back.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZOrder(pub i32);

impl ZOrder {
    /// The backmost z-order.
    pub const BACK: Self = Self(i32::MIN);
    /// The frontmost z-order.
    pub const FRONT: Self = Self(i32::MAX);
}

impl fmt::Debug for ZOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZOrder({})", self.0)
    }
}
