// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay capability contract.
//!
//! A [`SceneOverlay`] is a self-contained visual and behavioral unit. Once
//! per frame it advances its own animation state and contributes an optional
//! render subtree. It may also expose an [`EventFilter`] for hit-testing,
//! report [`VirtualView`]s, and react to tab lifecycle and viewport
//! notifications.
//!
//! # State
//!
//! Overlays own all of their state. Conceptually each overlay alternates
//! between *idle* and *animating*: a lifecycle event that starts a visual
//! transition makes it animate, and [`update`](SceneOverlay::update)
//! returning `true` means it settled again. There is no terminal state; an
//! overlay keeps cycling until the host unregisters it.
//!
//! # Failure
//!
//! None of these methods return errors. An overlay that cannot contribute
//! this frame returns `None` from [`compose`](SceneOverlay::compose); the
//! next frame tries again with fresh state. Notifications about tabs the
//! overlay does not know must be ignored, and malformed geometry is already
//! clamped by [`Viewport`].

use alloc::vec::Vec;
use core::fmt;

use crate::input::EventFilter;
use crate::resource::{EmptyCaches, ResourceManager, TitleCache};
use crate::scene::SceneLayer;
use crate::tab::{
    TabClosed, TabClosureCancelled, TabCreated, TabLoadEvent, TabModelSwitched, TabMoved,
    TabSelected, TabTitleChanged,
};
use crate::time::FrameTime;
use crate::viewport::Viewport;
use crate::virtual_view::VirtualView;

/// Shared caches available to every [`compose`](SceneOverlay::compose) call.
///
/// Both caches are borrowed immutably for the whole frame.
#[derive(Clone, Copy)]
pub struct FrameResources<'a> {
    /// Rendered tab titles.
    pub titles: &'a dyn TitleCache,
    /// Host-managed resources.
    pub resources: &'a dyn ResourceManager,
}

impl<'a> FrameResources<'a> {
    /// Bundles the given caches.
    #[must_use]
    pub fn new(titles: &'a dyn TitleCache, resources: &'a dyn ResourceManager) -> Self {
        Self { titles, resources }
    }
}

impl FrameResources<'static> {
    /// Returns a bundle of empty caches.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            titles: &EmptyCaches,
            resources: &EmptyCaches,
        }
    }
}

impl fmt::Debug for FrameResources<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameResources").finish_non_exhaustive()
    }
}

/// A unit of visual and behavioral composition.
///
/// Only [`update`](Self::update) and [`compose`](Self::compose) are required;
/// every other capability has a default that opts out of it.
pub trait SceneOverlay {
    /// Advances animation state by `dt` milliseconds, ending at `time`.
    ///
    /// Returns `true` when the overlay is settled. Called every frame; once
    /// settled, further calls must keep returning `true` without changing
    /// state.
    fn update(&mut self, time: FrameTime, dt: u64) -> bool;

    /// Builds the render subtree for the current visual state.
    ///
    /// `y_offset` is the current vertical offset of the top browser controls.
    /// Returns `None` if the overlay has nothing to show this frame. Called
    /// every frame, whether or not [`update`](Self::update) reported settled,
    /// and possibly before any [`on_size_changed`](Self::on_size_changed).
    fn compose(&mut self, resources: &FrameResources<'_>, y_offset: f64) -> Option<SceneLayer>;

    /// Returns the hit-testing delegate, or `None` to never intercept input.
    fn event_filter(&mut self) -> Option<&mut dyn EventFilter> {
        None
    }

    /// Recomputes cached layout for new viewport geometry.
    ///
    /// May be called any number of times, including back to back; the latest
    /// call is authoritative.
    fn on_size_changed(&mut self, viewport: &Viewport) {
        _ = viewport;
    }

    /// Appends this overlay's virtual views to `out`.
    ///
    /// Entries already in `out` must not be removed or reordered.
    fn virtual_views(&self, out: &mut Vec<VirtualView>) {
        _ = out;
    }

    /// Returns whether the overlay currently has anything on screen.
    fn is_showing(&self) -> bool {
        true
    }

    /// A tab's title changed.
    fn tab_title_changed(&mut self, e: &TabTitleChanged) {
        _ = e;
    }

    /// The active tab model switched.
    fn tab_model_switched(&mut self, e: &TabModelSwitched) {
        _ = e;
    }

    /// A tab was selected.
    fn tab_selected(&mut self, e: &TabSelected) {
        _ = e;
    }

    /// A tab moved.
    fn tab_moved(&mut self, e: &TabMoved) {
        _ = e;
    }

    /// A tab was closed; it is no longer in the tab model.
    fn tab_closed(&mut self, e: &TabClosed) {
        _ = e;
    }

    /// A tab closure was undone.
    fn tab_closure_cancelled(&mut self, e: &TabClosureCancelled) {
        _ = e;
    }

    /// A tab was created.
    fn tab_created(&mut self, e: &TabCreated) {
        _ = e;
    }

    /// A page load started in a tab.
    fn tab_page_load_started(&mut self, e: &TabLoadEvent) {
        _ = e;
    }

    /// A page load finished in a tab.
    fn tab_page_load_finished(&mut self, e: &TabLoadEvent) {
        _ = e;
    }

    /// Network loading started in a tab.
    fn tab_load_started(&mut self, e: &TabLoadEvent) {
        _ = e;
    }

    /// Network loading finished in a tab.
    fn tab_load_finished(&mut self, e: &TabLoadEvent) {
        _ = e;
    }
}
