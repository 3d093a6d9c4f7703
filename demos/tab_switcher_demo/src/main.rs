// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated host loop that drives the stock overlays through the manager.
//!
//! Runs 90 synthetic frames with a [`TabStripOverlay`] above a
//! [`LoadProgressOverlay`]. The host owns a tiny tab model, forwards its
//! lifecycle events to the overlays, and answers taps on the strip. Events are
//! printed through a [`PrettyPrintSink`] and recorded with a [`RecorderSink`],
//! then exported as a Chrome trace JSON file.

use std::cell::RefCell;
use std::fs::File;
use std::io::BufWriter;
use std::rc::Rc;

use kurbo::Point;
use veneer_core::backend::ScenePresenter;
use veneer_core::input::InputEvent;
use veneer_core::manager::{OverlayManager, ZOrder};
use veneer_core::overlay::FrameResources;
use veneer_core::scene::ComposedScene;
use veneer_core::tab::{TabClosed, TabCreated, TabEvent, TabId, TabLoadEvent, TabSelected};
use veneer_core::time::FrameTime;
use veneer_core::trace::{
    BroadcastEvent, FrameBeginEvent, FrameSummary, InputRouteEvent, OverlayComposeEvent,
    OverlayUpdateEvent, PhaseBeginEvent, PhaseEndEvent, SubmitEvent, TraceSink, Tracer,
    ViewportEvent,
};
use veneer_core::viewport::{Orientation, Viewport};
use veneer_debug::pretty::PrettyPrintSink;
use veneer_debug::recorder::RecorderSink;
use veneer_overlays::{LoadProgressConfig, LoadProgressOverlay, TabStripConfig, TabStripOverlay};

const FRAME_COUNT: u64 = 90;
/// Frame interval in milliseconds (≈60 Hz).
const FRAME_MS: u64 = 16;

/// Forwards every event to both sinks.
struct TeeSink {
    pretty: PrettyPrintSink,
    recorder: RecorderSink,
}

impl TraceSink for TeeSink {
    fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
        self.pretty.on_frame_begin(e);
        self.recorder.on_frame_begin(e);
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.pretty.on_phase_begin(e);
        self.recorder.on_phase_begin(e);
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.pretty.on_phase_end(e);
        self.recorder.on_phase_end(e);
    }

    fn on_overlay_update(&mut self, e: &OverlayUpdateEvent) {
        self.pretty.on_overlay_update(e);
        self.recorder.on_overlay_update(e);
    }

    fn on_overlay_compose(&mut self, e: &OverlayComposeEvent) {
        self.pretty.on_overlay_compose(e);
        self.recorder.on_overlay_compose(e);
    }

    fn on_submit(&mut self, e: &SubmitEvent) {
        self.pretty.on_submit(e);
        self.recorder.on_submit(e);
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        self.pretty.on_frame_summary(s);
        self.recorder.on_frame_summary(s);
    }

    fn on_input_route(&mut self, e: &InputRouteEvent) {
        self.pretty.on_input_route(e);
        self.recorder.on_input_route(e);
    }

    fn on_broadcast(&mut self, e: &BroadcastEvent) {
        self.pretty.on_broadcast(e);
        self.recorder.on_broadcast(e);
    }

    fn on_viewport(&mut self, e: &ViewportEvent) {
        self.pretty.on_viewport(e);
        self.recorder.on_viewport(e);
    }
}

/// Stands in for a rendering backend.
#[derive(Default)]
struct CountingPresenter {
    frames: u64,
    layers: usize,
}

impl ScenePresenter for CountingPresenter {
    fn submit(&mut self, scene: &ComposedScene) {
        self.frames += 1;
        self.layers += scene.layer_count();
    }
}

/// What the strip asked the host to do.
enum Request {
    Select(TabId),
    Close(TabId),
}

/// The host's side of the tab model.
#[derive(Default)]
struct TabModel {
    tabs: Vec<TabId>,
    selected: Option<TabId>,
    next_id: i32,
}

impl TabModel {
    fn create(&mut self, time: FrameTime) -> Vec<TabEvent> {
        self.next_id += 1;
        let tab_id = TabId(self.next_id);
        let prev_id = self.tabs.last().copied();
        self.tabs.push(tab_id);
        let mut events = vec![TabEvent::Created(TabCreated {
            time,
            incognito: false,
            tab_id,
            prev_id,
            selected: self.selected.is_none(),
        })];
        if self.selected.is_none() {
            events.extend(self.select(tab_id, time));
        }
        events
    }

    fn select(&mut self, tab_id: TabId, time: FrameTime) -> Option<TabEvent> {
        if self.selected == Some(tab_id) {
            return None;
        }
        let prev_id = self.selected.replace(tab_id);
        Some(TabEvent::Selected(TabSelected {
            time,
            incognito: false,
            tab_id,
            prev_id,
        }))
    }

    fn close(&mut self, tab_id: TabId, time: FrameTime) -> Vec<TabEvent> {
        let Some(index) = self.tabs.iter().position(|&t| t == tab_id) else {
            return Vec::new();
        };
        self.tabs.remove(index);
        let mut events = vec![TabEvent::Closed(TabClosed {
            time,
            incognito: false,
            tab_id,
        })];
        if self.selected == Some(tab_id) {
            self.selected = None;
            let neighbor = self.tabs.get(index.saturating_sub(1)).copied();
            if let Some(next) = neighbor {
                events.extend(self.select(next, time));
            }
        }
        events
    }
}

fn load(tab_id: TabId, time: FrameTime) -> TabLoadEvent {
    TabLoadEvent {
        time,
        incognito: false,
        tab_id,
    }
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut sink = TeeSink {
        pretty: PrettyPrintSink::new(Box::new(std::io::stdout())),
        recorder: RecorderSink::new(),
    };

    // -- overlays ----------------------------------------------------------
    let requests: Rc<RefCell<Vec<Request>>> = Rc::default();
    let on_select = Rc::clone(&requests);
    let on_close = Rc::clone(&requests);
    let strip = TabStripOverlay::new(TabStripConfig::tablet())
        .with_selection_handler(move |id| on_select.borrow_mut().push(Request::Select(id)))
        .with_close_handler(move |id| on_close.borrow_mut().push(Request::Close(id)));
    let progress = LoadProgressOverlay::new(LoadProgressConfig::toolbar());

    let mut manager = OverlayManager::new();
    manager.register(Box::new(progress), ZOrder(0));
    manager.register(Box::new(strip), ZOrder(1));

    let mut model = TabModel::default();
    let mut presenter = CountingPresenter::default();
    let resources = FrameResources::empty();

    // -- simulated loop ----------------------------------------------------
    let mut time = FrameTime(1_000);
    let mut settled_frames = 0_u64;

    for frame_index in 0..FRAME_COUNT {
        let mut tracer = Tracer::new(&mut sink);
        let mut events = Vec::new();

        match frame_index {
            0 => {
                let viewport = Viewport::new(1000.0, 600.0, 48.0, Orientation::Landscape);
                manager.on_size_changed(&viewport, &mut tracer);
                for _ in 0..3 {
                    events.extend(model.create(time));
                }
            }
            5 => events.push(TabEvent::PageLoadStarted(load(TabId(1), time))),
            40 => events.push(TabEvent::PageLoadFinished(load(TabId(1), time))),
            50 | 60 | 70 => {
                // Body of tab 2, close button of tab 3, then the page below.
                let position = match frame_index {
                    50 => Point::new(300.0, 20.0),
                    60 => Point::new(740.0, 20.0),
                    _ => Point::new(500.0, 400.0),
                };
                let outcome = manager.route_input(&InputEvent::tap(time, position), &mut tracer);
                if !outcome.is_claimed() {
                    println!("host handles tap at {position:?}");
                }
            }
            75 => events.push(TabEvent::LoadStarted(load(TabId(2), time))),
            85 => events.push(TabEvent::LoadFinished(load(TabId(2), time))),
            _ => {}
        }

        for request in requests.borrow_mut().drain(..) {
            match request {
                Request::Select(id) => events.extend(model.select(id, time)),
                Request::Close(id) => events.extend(model.close(id, time)),
            }
        }

        for event in &events {
            manager.broadcast(event, &mut tracer);
        }

        let settled = manager.render_frame(
            time,
            FRAME_MS,
            &resources,
            0.0,
            &mut presenter,
            &mut tracer,
        );
        if settled {
            settled_frames += 1;
        }

        time = time + FRAME_MS;
    }

    let mut views = Vec::new();
    manager.virtual_views(&mut views);
    for view in &views {
        println!("view {:?} {:?} {}", view.role(), view.bounds(), view.label());
    }
    println!(
        "presented {} frames ({} layers), {settled_frames} settled",
        presenter.frames, presenter.layers,
    );

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    veneer_debug::chrome::export(sink.recorder.as_bytes(), &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({FRAME_COUNT} frames)");
}
