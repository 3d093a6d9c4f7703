// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport geometry broadcast to overlays.
//!
//! A [`Viewport`] is always sanitized on construction: widths and heights that
//! are zero, negative, or not finite are clamped to [`MIN_EXTENT`], and a
//! non-finite visible offset becomes zero. Overlays can therefore lay out
//! against any `Viewport` without checking it first, including
//! [`Viewport::DEGENERATE`] when no size has been reported yet.

use core::fmt;

use kurbo::{Rect, Size};

/// Smallest width or height a sanitized viewport can have, in pixels.
pub const MIN_EXTENT: f64 = 1.0;

/// Screen orientation reported alongside viewport size changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Taller than wide.
    #[default]
    Portrait,
    /// Wider than tall.
    Landscape,
}

impl Orientation {
    /// Infers the orientation from a size; square sizes are portrait.
    #[must_use]
    pub fn from_size(size: Size) -> Self {
        if size.width > size.height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

/// Viewport geometry: size, visible viewport offset, and orientation.
#[derive(Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    visible_offset_y: f64,
    orientation: Orientation,
}

impl Viewport {
    /// The layout overlays use before any size has been reported.
    pub const DEGENERATE: Self = Self {
        width: MIN_EXTENT,
        height: MIN_EXTENT,
        visible_offset_y: 0.0,
        orientation: Orientation::Portrait,
    };

    /// Creates a sanitized viewport.
    ///
    /// `visible_offset_y` is the vertical offset of the visible viewport
    /// (e.g. when the top controls are partially scrolled away).
    #[must_use]
    pub fn new(width: f64, height: f64, visible_offset_y: f64, orientation: Orientation) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            visible_offset_y: if visible_offset_y.is_finite() {
                visible_offset_y
            } else {
                0.0
            },
            orientation,
        }
    }

    /// Creates a sanitized viewport from a size, inferring the orientation.
    #[must_use]
    pub fn from_size(size: Size) -> Self {
        Self::new(size.width, size.height, 0.0, Orientation::from_size(size))
    }

    /// Returns the viewport width.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Returns the viewport height.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Returns the vertical offset of the visible viewport.
    #[inline]
    #[must_use]
    pub const fn visible_offset_y(&self) -> f64 {
        self.visible_offset_y
    }

    /// Returns the reported orientation.
    #[inline]
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the viewport size.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the viewport bounds with the origin at the top-left corner.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size((0.0, 0.0), self.size())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::DEGENERATE
    }
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Viewport({}x{} +{} {:?})",
            self.width, self.height, self.visible_offset_y, self.orientation
        )
    }
}

fn sanitize_extent(v: f64) -> f64 {
    // NaN fails the comparison and is clamped too.
    if v.is_finite() && v >= MIN_EXTENT {
        v
    } else {
        MIN_EXTENT
    }
}
