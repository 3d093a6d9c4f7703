// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation clock time.
//!
//! [`FrameTime`] is a point on the host's animation clock in milliseconds.
//! Overlays receive it together with a millisecond delta on every
//! [`update`](crate::overlay::SceneOverlay::update) call, and tab lifecycle
//! events carry the time at which the tab model committed the change.

use core::fmt;
use core::ops::Add;

/// A point on the host animation clock, in milliseconds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FrameTime(pub u64);

impl FrameTime {
    /// The clock origin.
    pub const ZERO: Self = Self(0);

    /// Returns the raw millisecond value.
    #[inline]
    #[must_use]
    pub const fn millis(self) -> u64 {
        self.0
    }

    /// Returns the milliseconds elapsed since `earlier`, or zero if `earlier`
    /// is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_millis_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Checked addition of a millisecond delta.
    #[inline]
    #[must_use]
    pub const fn checked_add_millis(self, millis: u64) -> Option<Self> {
        match self.0.checked_add(millis) {
            Some(t) => Some(Self(t)),
            None => None,
        }
    }
}

impl Add<u64> for FrameTime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: u64) -> Self {
        Self(self.0 + rhs)
    }
}

impl fmt::Debug for FrameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameTime({}ms)", self.0)
    }
}
