// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Only frame begins, frame summaries, and input routing carry a timestamp.
//! Every other event is placed on a synthetic timeline that starts at the
//! last known frame time and advances one microsecond per event, so phases
//! nest and stay in recorded order.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use veneer_core::manager::OverlayId;
use veneer_core::time::FrameTime;

use crate::recorder::{RecordedEvent, decode};

/// Monotonic microsecond cursor.
#[derive(Debug, Default)]
struct Timeline {
    cursor_us: u64,
}

impl Timeline {
    /// Moves to `time` if it is ahead of the cursor and returns the new stamp.
    fn at(&mut self, time: FrameTime) -> u64 {
        let us = time.millis().saturating_mul(1000);
        self.cursor_us = self.cursor_us.saturating_add(1).max(us);
        self.cursor_us
    }

    fn tick(&mut self) -> u64 {
        self.cursor_us = self.cursor_us.saturating_add(1);
        self.cursor_us
    }
}

fn overlay_label(id: OverlayId) -> String {
    format!("#{}.{}", id.index(), id.generation())
}

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Update, compose, and submit phases become duration events; everything else
/// becomes an instant.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut timeline = Timeline::default();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::FrameBegin(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "FrameBegin",
                    "cat": "Frame",
                    "ts": timeline.at(e.time),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": e.frame_index,
                        "dt_ms": e.dt,
                        "overlays": e.overlay_count,
                    }
                }));
            }
            RecordedEvent::PhaseBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": format!("{:?}", e.phase),
                    "cat": "Frame",
                    "ts": timeline.tick(),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::PhaseEnd(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": format!("{:?}", e.phase),
                    "cat": "Frame",
                    "ts": timeline.tick(),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::OverlayUpdate(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "OverlayUpdate",
                    "cat": "Rich",
                    "ts": timeline.tick(),
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "overlay": overlay_label(e.overlay),
                        "settled": e.settled,
                    }
                }));
            }
            RecordedEvent::OverlayCompose(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "OverlayCompose",
                    "cat": "Rich",
                    "ts": timeline.tick(),
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "overlay": overlay_label(e.overlay),
                        "z": e.z.0,
                        "layers": e.layer_count,
                    }
                }));
            }
            RecordedEvent::Submit(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Submit",
                    "cat": "Frame",
                    "ts": timeline.tick(),
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "contributions": e.contributions,
                        "layers": e.layers,
                    }
                }));
            }
            RecordedEvent::FrameSummary(s) => {
                events.push(json!({
                    "ph": "i",
                    "name": "FrameSummary",
                    "cat": "Summary",
                    "ts": timeline.at(s.time),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": s.frame_index,
                        "dt_ms": s.dt,
                        "overlays": s.overlays,
                        "contributions": s.contributions,
                        "layers": s.layers,
                        "all_settled": s.all_settled,
                    }
                }));
            }
            RecordedEvent::InputRoute(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "InputRoute",
                    "cat": "Input",
                    "ts": timeline.at(e.time),
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "claimed_by": e.claimed_by.map(overlay_label),
                        "consulted": e.consulted,
                    }
                }));
            }
            RecordedEvent::Broadcast(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": e.kind.name(),
                    "cat": "Tab",
                    "ts": timeline.tick(),
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "tab_id": e.tab_id.map(|id| id.0),
                        "recipients": e.recipients,
                    }
                }));
            }
            RecordedEvent::Viewport(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Viewport",
                    "cat": "Viewport",
                    "ts": timeline.tick(),
                    "pid": 0,
                    "tid": 1,
                    "s": "g",
                    "args": {
                        "width": e.viewport.width(),
                        "height": e.viewport.height(),
                        "visible_offset_y": e.viewport.visible_offset_y(),
                        "orientation": format!("{:?}", e.viewport.orientation()),
                        "recipients": e.recipients,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use veneer_core::tab::{TabEventKind, TabId};
    use veneer_core::trace::{
        BroadcastEvent, FrameBeginEvent, PhaseBeginEvent, PhaseEndEvent, PhaseKind, TraceSink,
    };

    fn exported(rec: &RecorderSink) -> Vec<Value> {
        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        parsed.as_array().unwrap().clone()
    }

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_frame_begin(&FrameBeginEvent {
            frame_index: 0,
            time: FrameTime(2),
            dt: 16,
            overlay_count: 1,
        });
        rec.on_phase_begin(&PhaseBeginEvent {
            frame_index: 0,
            phase: PhaseKind::Update,
        });
        rec.on_phase_end(&PhaseEndEvent {
            frame_index: 0,
            phase: PhaseKind::Update,
        });
        rec.on_broadcast(&BroadcastEvent {
            kind: TabEventKind::Selected,
            tab_id: Some(TabId(3)),
            recipients: 1,
        });

        let events = exported(&rec);
        assert_eq!(events.len(), 4);
        assert_eq!(events[0]["name"], "FrameBegin");
        assert_eq!(events[0]["ts"], 2000);
        assert_eq!(events[1]["ph"], "B");
        assert_eq!(events[1]["name"], "Update");
        assert_eq!(events[2]["ph"], "E");
        assert_eq!(events[3]["name"], "tab_selected");
        assert_eq!(events[3]["args"]["tab_id"], 3);
    }

    #[test]
    fn timestamps_never_go_backwards() {
        let mut rec = RecorderSink::new();
        for (frame_index, millis) in [(0, 5), (1, 5), (2, 4)] {
            rec.on_frame_begin(&FrameBeginEvent {
                frame_index,
                time: FrameTime(millis),
                dt: 0,
                overlay_count: 0,
            });
        }

        let stamps: Vec<u64> = exported(&rec)
            .iter()
            .map(|e| e["ts"].as_u64().unwrap())
            .collect();
        assert_eq!(stamps, [5000, 5001, 5002]);
    }

    #[test]
    fn export_empty_input() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, json!([]));
    }
}
