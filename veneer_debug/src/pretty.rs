// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Frame times
//! are printed in milliseconds of the host animation clock.

use std::io::Write;

use veneer_core::manager::OverlayId;
use veneer_core::trace::{
    BroadcastEvent, FrameBeginEvent, FrameSummary, InputRouteEvent, OverlayComposeEvent,
    OverlayUpdateEvent, PhaseBeginEvent, PhaseEndEvent, PhaseKind, SubmitEvent, TraceSink,
    ViewportEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn phase_name(phase: PhaseKind) -> &'static str {
    match phase {
        PhaseKind::Update => "update",
        PhaseKind::Compose => "compose",
        PhaseKind::Submit => "submit",
    }
}

fn overlay_name(id: OverlayId) -> String {
    format!("#{}.{}", id.index(), id.generation())
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[frame] frame={} t={}ms dt={}ms overlays={}",
            e.frame_index,
            e.time.millis(),
            e.dt,
            e.overlay_count,
        );
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:begin] frame={} {}",
            e.frame_index,
            phase_name(e.phase),
        );
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:end] frame={} {}",
            e.frame_index,
            phase_name(e.phase),
        );
    }

    fn on_overlay_update(&mut self, e: &OverlayUpdateEvent) {
        let state = if e.settled { "settled" } else { "animating" };
        let _ = writeln!(
            self.writer,
            "[overlay:update] frame={} overlay={} {state}",
            e.frame_index,
            overlay_name(e.overlay),
        );
    }

    fn on_overlay_compose(&mut self, e: &OverlayComposeEvent) {
        let layers = match e.layer_count {
            Some(n) => n.to_string(),
            None => "none".to_owned(),
        };
        let _ = writeln!(
            self.writer,
            "[overlay:compose] frame={} overlay={} z={} layers={layers}",
            e.frame_index,
            overlay_name(e.overlay),
            e.z.0,
        );
    }

    fn on_submit(&mut self, e: &SubmitEvent) {
        let _ = writeln!(
            self.writer,
            "[submit] frame={} contributions={} layers={}",
            e.frame_index, e.contributions, e.layers,
        );
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        let settled = if s.all_settled { "yes" } else { "no" };
        let _ = writeln!(
            self.writer,
            "[summary] frame={} t={}ms overlays={} contributions={} layers={} settled={settled}",
            s.frame_index,
            s.time.millis(),
            s.overlays,
            s.contributions,
            s.layers,
        );
    }

    fn on_input_route(&mut self, e: &InputRouteEvent) {
        let target = e.claimed_by.map_or_else(|| "host".to_owned(), overlay_name);
        let _ = writeln!(
            self.writer,
            "[input] t={}ms claimed_by={target} consulted={}",
            e.time.millis(),
            e.consulted,
        );
    }

    fn on_broadcast(&mut self, e: &BroadcastEvent) {
        let tab = e
            .tab_id
            .map_or_else(|| "-".to_owned(), |id| id.0.to_string());
        let _ = writeln!(
            self.writer,
            "[broadcast] {} tab={tab} recipients={}",
            e.kind.name(),
            e.recipients,
        );
    }

    fn on_viewport(&mut self, e: &ViewportEvent) {
        let vp = &e.viewport;
        let _ = writeln!(
            self.writer,
            "[viewport] {}x{} offset={} {:?} recipients={}",
            vp.width(),
            vp.height(),
            vp.visible_offset_y(),
            vp.orientation(),
            e.recipients,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veneer_core::manager::ZOrder;
    use veneer_core::tab::{TabEventKind, TabId};
    use veneer_core::time::FrameTime;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_frame_begin() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_frame_begin(&FrameBeginEvent {
            frame_index: 1,
            time: FrameTime(32),
            dt: 16,
            overlay_count: 2,
        });
        let output = output(sink);
        assert!(output.contains("[frame]"), "got: {output}");
        assert!(output.contains("frame=1"), "got: {output}");
        assert!(output.contains("t=32ms"), "got: {output}");
    }

    #[test]
    fn pretty_print_declined_compose() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_overlay_compose(&OverlayComposeEvent {
            frame_index: 3,
            overlay: OverlayId::from_raw(2, 1),
            z: ZOrder(-4),
            layer_count: None,
        });
        let output = output(sink);
        assert!(output.contains("overlay=#2.1"), "got: {output}");
        assert!(output.contains("z=-4"), "got: {output}");
        assert!(output.contains("layers=none"), "got: {output}");
    }

    #[test]
    fn pretty_print_unclaimed_input_and_broadcast() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_input_route(&InputRouteEvent {
            time: FrameTime(500),
            claimed_by: None,
            consulted: 2,
        });
        sink.on_broadcast(&BroadcastEvent {
            kind: TabEventKind::Closed,
            tab_id: Some(TabId(7)),
            recipients: 3,
        });
        let output = output(sink);
        assert!(output.contains("claimed_by=host"), "got: {output}");
        assert!(output.contains("tab_closed tab=7 recipients=3"), "got: {output}");
    }
}
