// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the overlay frame loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`OverlayManager`](crate::manager::OverlayManager) calls at each stage of
//! the frame, input, and broadcast protocols. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! [`FrameSummaryBuilder`] collects the outcome of a frame and produces a
//! [`FrameSummary`] at the end.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates per-overlay [`OverlayUpdateEvent`]
//!   and [`OverlayComposeEvent`] plus the corresponding `TraceSink` methods.

use crate::manager::OverlayId;
#[cfg(feature = "trace-rich")]
use crate::manager::ZOrder;
use crate::scene::ComposedScene;
use crate::tab::{TabEventKind, TabId};
use crate::time::FrameTime;
use crate::viewport::Viewport;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which phase of the frame is being traced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// Overlays advance their animation state.
    Update,
    /// Overlays contribute subtrees and the scene is composed.
    Compose,
    /// The composed scene is handed to the presenter.
    Submit,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a frame starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameBeginEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Frame time.
    pub time: FrameTime,
    /// Milliseconds since the previous frame.
    pub dt: u64,
    /// Number of registered overlays.
    pub overlay_count: u32,
}

/// Marks the beginning of a frame phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseBeginEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Which phase is starting.
    pub phase: PhaseKind,
}

/// Marks the end of a frame phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseEndEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Which phase is ending.
    pub phase: PhaseKind,
}

/// Emitted after one overlay's update.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayUpdateEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// The updated overlay.
    pub overlay: OverlayId,
    /// Whether the overlay reported settled.
    pub settled: bool,
}

/// Emitted after one overlay's compose.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayComposeEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// The composed overlay.
    pub overlay: OverlayId,
    /// The overlay's z-order.
    pub z: ZOrder,
    /// Layers contributed, or `None` if the overlay declined this frame.
    pub layer_count: Option<u32>,
}

/// Emitted when the composed scene is submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Number of contributing overlays.
    pub contributions: u32,
    /// Total layers in the scene.
    pub layers: u32,
}

/// Emitted after an input event was routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputRouteEvent {
    /// Input event time.
    pub time: FrameTime,
    /// The overlay that claimed the event, if any.
    pub claimed_by: Option<OverlayId>,
    /// How many filters were asked before routing stopped.
    pub consulted: u32,
}

/// Emitted after a tab lifecycle event was broadcast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BroadcastEvent {
    /// Which lifecycle event was broadcast.
    pub kind: TabEventKind,
    /// The tab the event is about, if any.
    pub tab_id: Option<TabId>,
    /// Number of overlays notified.
    pub recipients: u32,
}

/// Emitted after a viewport change was broadcast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportEvent {
    /// The new viewport.
    pub viewport: Viewport,
    /// Number of overlays notified.
    pub recipients: u32,
}

/// Per-frame summary produced by [`FrameSummaryBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSummary {
    /// Frame counter.
    pub frame_index: u64,
    /// Frame time.
    pub time: FrameTime,
    /// Milliseconds since the previous frame.
    pub dt: u64,
    /// Number of registered overlays.
    pub overlays: u32,
    /// Number of overlays that contributed a subtree.
    pub contributions: u32,
    /// Total layers in the composed scene.
    pub layers: u32,
    /// Whether every overlay reported settled.
    pub all_settled: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the overlay manager.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a frame starts.
    fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
        _ = e;
    }

    /// Called at the beginning of a frame phase.
    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        _ = e;
    }

    /// Called at the end of a frame phase.
    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        _ = e;
    }

    /// Called after each overlay update (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_overlay_update(&mut self, e: &OverlayUpdateEvent) {
        _ = e;
    }

    /// Called after each overlay compose (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_overlay_compose(&mut self, e: &OverlayComposeEvent) {
        _ = e;
    }

    /// Called when the scene is submitted.
    fn on_submit(&mut self, e: &SubmitEvent) {
        _ = e;
    }

    /// Called with a per-frame summary.
    fn on_frame_summary(&mut self, s: &FrameSummary) {
        _ = s;
    }

    /// Called after an input event was routed.
    fn on_input_route(&mut self, e: &InputRouteEvent) {
        _ = e;
    }

    /// Called after a tab lifecycle event was broadcast.
    fn on_broadcast(&mut self, e: &BroadcastEvent) {
        _ = e;
    }

    /// Called after a viewport change was broadcast.
    fn on_viewport(&mut self, e: &ViewportEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`FrameBeginEvent`].
    #[inline]
    pub fn frame_begin(&mut self, e: &FrameBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PhaseBeginEvent`].
    #[inline]
    pub fn phase_begin(&mut self, e: &PhaseBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_phase_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PhaseEndEvent`].
    #[inline]
    pub fn phase_end(&mut self, e: &PhaseEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_phase_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`OverlayUpdateEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn overlay_update(&mut self, e: &OverlayUpdateEvent) {
        if let Some(s) = &mut self.sink {
            s.on_overlay_update(e);
        }
    }

    /// Emits an [`OverlayComposeEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn overlay_compose(&mut self, e: &OverlayComposeEvent) {
        if let Some(s) = &mut self.sink {
            s.on_overlay_compose(e);
        }
    }

    /// Emits a [`SubmitEvent`].
    #[inline]
    pub fn submit(&mut self, e: &SubmitEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_submit(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameSummary`].
    #[inline]
    pub fn frame_summary(&mut self, s: &FrameSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_frame_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits an [`InputRouteEvent`].
    #[inline]
    pub fn input_route(&mut self, e: &InputRouteEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_input_route(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`BroadcastEvent`].
    #[inline]
    pub fn broadcast(&mut self, e: &BroadcastEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_broadcast(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ViewportEvent`].
    #[inline]
    pub fn viewport(&mut self, e: &ViewportEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_viewport(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// FrameSummaryBuilder
// ---------------------------------------------------------------------------

/// Collects the outcome of a frame and produces a [`FrameSummary`].
#[derive(Debug)]
pub struct FrameSummaryBuilder {
    begin: FrameBeginEvent,
    all_settled: bool,
    contributions: u32,
    layers: u32,
}

impl FrameSummaryBuilder {
    /// Starts building a summary for the given frame.
    #[must_use]
    pub fn new(begin: &FrameBeginEvent) -> Self {
        Self {
            begin: *begin,
            all_settled: false,
            contributions: 0,
            layers: 0,
        }
    }

    /// Records the aggregate update result.
    pub fn set_all_settled(&mut self, all_settled: bool) {
        self.all_settled = all_settled;
    }

    /// Records the composed scene's size.
    pub fn set_scene(&mut self, scene: &ComposedScene) {
        self.contributions = saturating_u32(scene.len());
        self.layers = saturating_u32(scene.layer_count());
    }

    /// Consumes the builder and produces the final [`FrameSummary`].
    #[must_use]
    pub fn finish(self) -> FrameSummary {
        FrameSummary {
            frame_index: self.begin.frame_index,
            time: self.begin.time,
            dt: self.begin.dt,
            overlays: self.begin.overlay_count,
            contributions: self.contributions,
            layers: self.layers,
            all_settled: self.all_settled,
        }
    }
}

/// Converts a count to `u32`, saturating at `u32::MAX`.
pub(crate) fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::ZOrder;
    use crate::scene::{Contribution, LayerTag, SceneLayer};

    fn sample_begin() -> FrameBeginEvent {
        FrameBeginEvent {
            frame_index: 42,
            time: FrameTime(1_000),
            dt: 16,
            overlay_count: 3,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_frame_begin(&sample_begin());
        sink.on_broadcast(&BroadcastEvent {
            kind: TabEventKind::Closed,
            tab_id: Some(TabId(7)),
            recipients: 2,
        });
        sink.on_frame_summary(&FrameSummaryBuilder::new(&sample_begin()).finish());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.frame_begin(&sample_begin());
        tracer.phase_begin(&PhaseBeginEvent {
            frame_index: 42,
            phase: PhaseKind::Update,
        });
    }

    #[test]
    fn summary_builder_counts_scene() {
        let mut scene = ComposedScene::new(42);
        let mut root = SceneLayer::group(LayerTag(0), kurbo::Rect::ZERO);
        root.push_child(SceneLayer::group(LayerTag(1), kurbo::Rect::ZERO));
        scene.push(Contribution {
            overlay: OverlayId::from_raw(0, 0),
            z: ZOrder(0),
            root,
        });

        let mut builder = FrameSummaryBuilder::new(&sample_begin());
        builder.set_all_settled(true);
        builder.set_scene(&scene);
        let summary = builder.finish();

        assert_eq!(summary.frame_index, 42);
        assert_eq!(summary.time, FrameTime(1_000));
        assert_eq!(summary.dt, 16);
        assert_eq!(summary.overlays, 3);
        assert_eq!(summary.contributions, 1);
        assert_eq!(summary.layers, 2);
        assert!(summary.all_settled);
    }

    #[test]
    fn summary_builder_defaults_to_unsettled_and_empty() {
        let summary = FrameSummaryBuilder::new(&sample_begin()).finish();
        assert!(!summary.all_settled);
        assert_eq!(summary.contributions, 0);
        assert_eq!(summary.layers, 0);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            frames: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
                self.frames.push(e.frame_index);
            }
        }

        let mut sink = RecordingSink { frames: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.frame_begin(&sample_begin());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.frames, &[42]);
    }
}
