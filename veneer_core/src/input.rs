// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events, hit-testing filters, and routing outcomes.
//!
//! Routing is first-match-wins, topmost first: the
//! [`OverlayManager`](crate::manager::OverlayManager) walks overlays from the
//! front of the z-order to the back, asks each overlay's [`EventFilter`]
//! whether it [`intercepts`](EventFilter::intercepts) the event, and hands the
//! event to the first filter that does. Filters behind the claiming overlay
//! are not consulted. If nothing claims the event, the host handles it.

use kurbo::{Point, Vec2};

use crate::manager::OverlayId;
use crate::time::FrameTime;

/// The gesture or pointer action carried by an [`InputEvent`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputKind {
    /// A pointer went down.
    Down {
        /// Pointer position.
        position: Point,
    },
    /// A pointer went up.
    Up {
        /// Pointer position.
        position: Point,
    },
    /// The current gesture was cancelled by the platform.
    Cancel,
    /// A completed tap.
    Tap {
        /// Tap position.
        position: Point,
    },
    /// A long press.
    LongPress {
        /// Press position.
        position: Point,
    },
    /// A drag step.
    Drag {
        /// Current pointer position.
        position: Point,
        /// Movement since the previous drag step.
        delta: Vec2,
    },
    /// A fling at the end of a drag.
    Fling {
        /// Pointer position when the fling started.
        position: Point,
        /// Fling velocity in pixels per second.
        velocity: Vec2,
    },
    /// A two-finger pinch step.
    Pinch {
        /// First pointer position.
        first: Point,
        /// Second pointer position.
        second: Point,
    },
}

impl InputKind {
    /// Returns the position used for hit-testing, if the event has one.
    ///
    /// Pinches hit-test at the midpoint between both pointers.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::Down { position }
            | Self::Up { position }
            | Self::Tap { position }
            | Self::LongPress { position }
            | Self::Drag { position, .. }
            | Self::Fling { position, .. } => Some(position),
            Self::Pinch { first, second } => Some(first.midpoint(second)),
            Self::Cancel => None,
        }
    }
}

/// An input event delivered to the overlay stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputEvent {
    /// When the event happened.
    pub time: FrameTime,
    /// What happened.
    pub kind: InputKind,
    /// Whether the soft keyboard was showing when the event happened.
    pub keyboard_showing: bool,
}

impl InputEvent {
    /// Creates an event with the keyboard hidden.
    #[must_use]
    pub fn new(time: FrameTime, kind: InputKind) -> Self {
        Self {
            time,
            kind,
            keyboard_showing: false,
        }
    }

    /// Shorthand for a [`InputKind::Tap`] event.
    #[must_use]
    pub fn tap(time: FrameTime, position: impl Into<Point>) -> Self {
        Self::new(
            time,
            InputKind::Tap {
                position: position.into(),
            },
        )
    }

    /// Returns the hit-testing position, if any.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        self.kind.position()
    }
}

/// Per-overlay hit-testing and gesture consumer.
///
/// Overlays expose a filter through
/// [`SceneOverlay::event_filter`](crate::overlay::SceneOverlay::event_filter).
pub trait EventFilter {
    /// Returns `true` if this filter claims the event.
    ///
    /// Called at most once per event, only if no overlay in front of this one
    /// claimed it.
    fn intercepts(&mut self, event: &InputEvent) -> bool;

    /// Consumes an event this filter claimed.
    ///
    /// Called exactly once, right after [`intercepts`](Self::intercepts)
    /// returned `true` for the same event.
    fn handle(&mut self, event: &InputEvent);
}

/// The result of routing one input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteOutcome {
    /// The given overlay's filter claimed and handled the event.
    Claimed(OverlayId),
    /// No overlay claimed the event; the host should handle it.
    Unclaimed,
}

impl RouteOutcome {
    /// Returns the claiming overlay, if any.
    #[must_use]
    pub const fn claimed_by(self) -> Option<OverlayId> {
        match self {
            Self::Claimed(id) => Some(id),
            Self::Unclaimed => None,
        }
    }

    /// Returns `true` if an overlay claimed the event.
    #[must_use]
    pub const fn is_claimed(self) -> bool {
        matches!(self, Self::Claimed(_))
    }
}
