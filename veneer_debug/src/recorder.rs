// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Decoding stops at the first truncated record or unknown tag.

use veneer_core::manager::{OverlayId, ZOrder};
use veneer_core::tab::{TabEventKind, TabId};
use veneer_core::time::FrameTime;
use veneer_core::trace::{
    BroadcastEvent, FrameBeginEvent, FrameSummary, InputRouteEvent, OverlayComposeEvent,
    OverlayUpdateEvent, PhaseBeginEvent, PhaseEndEvent, PhaseKind, SubmitEvent, TraceSink,
    ViewportEvent,
};
use veneer_core::viewport::{Orientation, Viewport};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_FRAME_BEGIN: u8 = 1;
const TAG_PHASE_BEGIN: u8 = 2;
const TAG_PHASE_END: u8 = 3;
const TAG_OVERLAY_UPDATE: u8 = 4;
const TAG_OVERLAY_COMPOSE: u8 = 5;
const TAG_SUBMIT: u8 = 6;
const TAG_FRAME_SUMMARY: u8 = 7;
const TAG_INPUT_ROUTE: u8 = 8;
const TAG_BROADCAST: u8 = 9;
const TAG_VIEWPORT: u8 = 10;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_overlay(&mut self, id: OverlayId) {
        self.write_u32(id.index());
        self.write_u32(id.generation());
    }

    fn write_option_overlay(&mut self, id: Option<OverlayId>) {
        match id {
            Some(id) => {
                self.write_u8(1);
                self.write_overlay(id);
            }
            None => {
                self.write_u8(0);
                self.write_overlay(OverlayId::from_raw(0, 0));
            }
        }
    }

    fn write_option_u32(&mut self, v: Option<u32>) {
        match v {
            Some(val) => {
                self.write_u8(1);
                self.write_u32(val);
            }
            None => {
                self.write_u8(0);
                self.write_u32(0);
            }
        }
    }

    fn write_option_tab(&mut self, v: Option<TabId>) {
        match v {
            Some(id) => {
                self.write_u8(1);
                self.write_i32(id.0);
            }
            None => {
                self.write_u8(0);
                self.write_i32(0);
            }
        }
    }

    fn write_phase(&mut self, p: PhaseKind) {
        self.write_u8(match p {
            PhaseKind::Update => 0,
            PhaseKind::Compose => 1,
            PhaseKind::Submit => 2,
        });
    }

    fn write_kind(&mut self, kind: TabEventKind) {
        self.write_u8(kind as u8);
    }

    fn write_viewport(&mut self, vp: &Viewport) {
        self.write_f64(vp.width());
        self.write_f64(vp.height());
        self.write_f64(vp.visible_offset_y());
        self.write_u8(match vp.orientation() {
            Orientation::Portrait => 0,
            Orientation::Landscape => 1,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
        self.write_u8(TAG_FRAME_BEGIN);
        self.write_u64(e.frame_index);
        self.write_u64(e.time.millis());
        self.write_u64(e.dt);
        self.write_u32(e.overlay_count);
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.write_u8(TAG_PHASE_BEGIN);
        self.write_u64(e.frame_index);
        self.write_phase(e.phase);
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.write_u8(TAG_PHASE_END);
        self.write_u64(e.frame_index);
        self.write_phase(e.phase);
    }

    fn on_overlay_update(&mut self, e: &OverlayUpdateEvent) {
        self.write_u8(TAG_OVERLAY_UPDATE);
        self.write_u64(e.frame_index);
        self.write_overlay(e.overlay);
        self.write_bool(e.settled);
    }

    fn on_overlay_compose(&mut self, e: &OverlayComposeEvent) {
        self.write_u8(TAG_OVERLAY_COMPOSE);
        self.write_u64(e.frame_index);
        self.write_overlay(e.overlay);
        self.write_i32(e.z.0);
        self.write_option_u32(e.layer_count);
    }

    fn on_submit(&mut self, e: &SubmitEvent) {
        self.write_u8(TAG_SUBMIT);
        self.write_u64(e.frame_index);
        self.write_u32(e.contributions);
        self.write_u32(e.layers);
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        self.write_u8(TAG_FRAME_SUMMARY);
        self.write_u64(s.frame_index);
        self.write_u64(s.time.millis());
        self.write_u64(s.dt);
        self.write_u32(s.overlays);
        self.write_u32(s.contributions);
        self.write_u32(s.layers);
        self.write_bool(s.all_settled);
    }

    fn on_input_route(&mut self, e: &InputRouteEvent) {
        self.write_u8(TAG_INPUT_ROUTE);
        self.write_u64(e.time.millis());
        self.write_option_overlay(e.claimed_by);
        self.write_u32(e.consulted);
    }

    fn on_broadcast(&mut self, e: &BroadcastEvent) {
        self.write_u8(TAG_BROADCAST);
        self.write_kind(e.kind);
        self.write_option_tab(e.tab_id);
        self.write_u32(e.recipients);
    }

    fn on_viewport(&mut self, e: &ViewportEvent) {
        self.write_u8(TAG_VIEWPORT);
        self.write_viewport(&e.viewport);
        self.write_u32(e.recipients);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`FrameBeginEvent`].
    FrameBegin(FrameBeginEvent),
    /// A [`PhaseBeginEvent`].
    PhaseBegin(PhaseBeginEvent),
    /// A [`PhaseEndEvent`].
    PhaseEnd(PhaseEndEvent),
    /// An [`OverlayUpdateEvent`].
    OverlayUpdate(OverlayUpdateEvent),
    /// An [`OverlayComposeEvent`].
    OverlayCompose(OverlayComposeEvent),
    /// A [`SubmitEvent`].
    Submit(SubmitEvent),
    /// A [`FrameSummary`].
    FrameSummary(FrameSummary),
    /// An [`InputRouteEvent`].
    InputRoute(InputRouteEvent),
    /// A [`BroadcastEvent`].
    Broadcast(BroadcastEvent),
    /// A [`ViewportEvent`].
    Viewport(ViewportEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let end = self.pos.checked_add(N)?;
        let bytes = self.data.get(self.pos..end)?.try_into().ok()?;
        self.pos = end;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_i32(&mut self) -> Option<i32> {
        self.take().map(i32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.take().map(f64::from_le_bytes)
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_overlay(&mut self) -> Option<OverlayId> {
        Some(OverlayId::from_raw(self.read_u32()?, self.read_u32()?))
    }

    fn read_option_overlay(&mut self) -> Option<Option<OverlayId>> {
        let present = self.read_u8()?;
        let id = self.read_overlay()?;
        Some((present != 0).then_some(id))
    }

    fn read_option_u32(&mut self) -> Option<Option<u32>> {
        let present = self.read_u8()?;
        let val = self.read_u32()?;
        Some((present != 0).then_some(val))
    }

    fn read_option_tab(&mut self) -> Option<Option<TabId>> {
        let present = self.read_u8()?;
        let val = self.read_i32()?;
        Some((present != 0).then_some(TabId(val)))
    }

    fn read_phase(&mut self) -> Option<PhaseKind> {
        Some(match self.read_u8()? {
            0 => PhaseKind::Update,
            1 => PhaseKind::Compose,
            _ => PhaseKind::Submit,
        })
    }

    fn read_kind(&mut self) -> Option<TabEventKind> {
        TabEventKind::ALL.get(usize::from(self.read_u8()?)).copied()
    }

    fn read_viewport(&mut self) -> Option<Viewport> {
        let width = self.read_f64()?;
        let height = self.read_f64()?;
        let offset = self.read_f64()?;
        let orientation = match self.read_u8()? {
            0 => Orientation::Portrait,
            _ => Orientation::Landscape,
        };
        Some(Viewport::new(width, height, offset, orientation))
    }

    fn decode_frame_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FrameBegin(FrameBeginEvent {
            frame_index: self.read_u64()?,
            time: FrameTime(self.read_u64()?),
            dt: self.read_u64()?,
            overlay_count: self.read_u32()?,
        }))
    }

    fn decode_phase_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PhaseBegin(PhaseBeginEvent {
            frame_index: self.read_u64()?,
            phase: self.read_phase()?,
        }))
    }

    fn decode_phase_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PhaseEnd(PhaseEndEvent {
            frame_index: self.read_u64()?,
            phase: self.read_phase()?,
        }))
    }

    fn decode_overlay_update(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::OverlayUpdate(OverlayUpdateEvent {
            frame_index: self.read_u64()?,
            overlay: self.read_overlay()?,
            settled: self.read_bool()?,
        }))
    }

    fn decode_overlay_compose(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::OverlayCompose(OverlayComposeEvent {
            frame_index: self.read_u64()?,
            overlay: self.read_overlay()?,
            z: ZOrder(self.read_i32()?),
            layer_count: self.read_option_u32()?,
        }))
    }

    fn decode_submit(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Submit(SubmitEvent {
            frame_index: self.read_u64()?,
            contributions: self.read_u32()?,
            layers: self.read_u32()?,
        }))
    }

    fn decode_frame_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FrameSummary(FrameSummary {
            frame_index: self.read_u64()?,
            time: FrameTime(self.read_u64()?),
            dt: self.read_u64()?,
            overlays: self.read_u32()?,
            contributions: self.read_u32()?,
            layers: self.read_u32()?,
            all_settled: self.read_bool()?,
        }))
    }

    fn decode_input_route(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::InputRoute(InputRouteEvent {
            time: FrameTime(self.read_u64()?),
            claimed_by: self.read_option_overlay()?,
            consulted: self.read_u32()?,
        }))
    }

    fn decode_broadcast(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Broadcast(BroadcastEvent {
            kind: self.read_kind()?,
            tab_id: self.read_option_tab()?,
            recipients: self.read_u32()?,
        }))
    }

    fn decode_viewport(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Viewport(ViewportEvent {
            viewport: self.read_viewport()?,
            recipients: self.read_u32()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_FRAME_BEGIN => self.decode_frame_begin(),
            TAG_PHASE_BEGIN => self.decode_phase_begin(),
            TAG_PHASE_END => self.decode_phase_end(),
            TAG_OVERLAY_UPDATE => self.decode_overlay_update(),
            TAG_OVERLAY_COMPOSE => self.decode_overlay_compose(),
            TAG_SUBMIT => self.decode_submit(),
            TAG_FRAME_SUMMARY => self.decode_frame_summary(),
            TAG_INPUT_ROUTE => self.decode_input_route(),
            TAG_BROADCAST => self.decode_broadcast(),
            TAG_VIEWPORT => self.decode_viewport(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
