// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accessibility and testing projection of overlay elements.
//!
//! Overlays describe their interactive and informative elements as
//! [`VirtualView`]s. Collection is append-only: each overlay pushes entries
//! into a caller-owned `Vec` in its own top-to-bottom, front-to-back order and
//! never touches entries that are already there.

use alloc::string::String;

use kurbo::Rect;

/// What kind of element a [`VirtualView`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewRole {
    /// A pressable control.
    Button,
    /// A selectable tab.
    Tab,
    /// A progress indicator.
    ProgressBar,
    /// A static label.
    Text,
    /// A decorative or informative image.
    Image,
}

/// An immutable description of one rendered element for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualView {
    bounds: Rect,
    label: String,
    role: ViewRole,
}

impl VirtualView {
    /// Creates a virtual view.
    #[must_use]
    pub fn new(bounds: Rect, label: impl Into<String>, role: ViewRole) -> Self {
        Self {
            bounds,
            label: label.into(),
            role,
        }
    }

    /// Returns the element bounds in viewport coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns the accessibility label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the element role.
    #[must_use]
    pub fn role(&self) -> ViewRole {
        self.role
    }
}
