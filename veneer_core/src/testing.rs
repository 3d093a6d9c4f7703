// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording test doubles shared by the unit tests of this crate.

use alloc::format;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{Rect, Vec2};

use crate::input::{EventFilter, InputEvent};
use crate::overlay::{FrameResources, SceneOverlay};
use crate::scene::{LayerTag, SceneLayer};
use crate::tab::{
    TabClosed, TabClosureCancelled, TabCreated, TabEventKind, TabId, TabLoadEvent,
    TabModelSwitched, TabMoved, TabSelected, TabTitleChanged,
};
use crate::time::FrameTime;
use crate::viewport::Viewport;
use crate::virtual_view::{ViewRole, VirtualView};

/// One observed call on a [`RecordingOverlay`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Update { settled: bool },
    Compose,
    Intercept,
    Handle,
    Size(Viewport),
    Tab(TabEventKind),
}

/// Calls observed across any number of overlays, in global order.
#[derive(Debug, Default)]
pub(crate) struct CallLog {
    entries: Vec<(&'static str, Call)>,
}

impl CallLog {
    /// Calls received by the named overlay, in order.
    pub(crate) fn calls_for(&self, name: &str) -> Vec<Call> {
        self.entries
            .iter()
            .filter(|(n, _)| *n == name)
            .map(|(_, call)| call.clone())
            .collect()
    }

    /// Names of the overlays whose calls match `pred`, in global order.
    pub(crate) fn names_where(&self, pred: impl Fn(&Call) -> bool) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|(_, call)| pred(call))
            .map(|(n, _)| *n)
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    fn push(&mut self, name: &'static str, call: Call) {
        self.entries.push((name, call));
    }
}

pub(crate) type SharedLog = Rc<RefCell<CallLog>>;

/// Claims positional events inside a rectangle.
struct RectFilter {
    name: &'static str,
    log: SharedLog,
    bounds: Rect,
}

impl EventFilter for RectFilter {
    fn intercepts(&mut self, event: &InputEvent) -> bool {
        self.log.borrow_mut().push(self.name, Call::Intercept);
        event.position().is_some_and(|p| self.bounds.contains(p))
    }

    fn handle(&mut self, _event: &InputEvent) {
        self.log.borrow_mut().push(self.name, Call::Handle);
    }
}

/// An overlay that logs every call it receives.
///
/// Settles after a configurable number of updates, optionally contributes a
/// single group layer, optionally claims input inside a rectangle, and keeps
/// a list of known tabs that is reported through its virtual views.
pub(crate) struct RecordingOverlay {
    name: &'static str,
    log: SharedLog,
    settle_after: u32,
    updates: u32,
    tag: Option<LayerTag>,
    filter: Option<RectFilter>,
    viewport: Viewport,
    showing: bool,
    tabs: Vec<TabId>,
}

impl RecordingOverlay {
    /// Creates an overlay with its own fresh log.
    pub(crate) fn new(name: &'static str) -> (Self, SharedLog) {
        let log = SharedLog::default();
        (Self::with_log(name, &log), log)
    }

    /// Creates an overlay writing into an existing log.
    pub(crate) fn with_log(name: &'static str, log: &SharedLog) -> Self {
        Self {
            name,
            log: Rc::clone(log),
            settle_after: 0,
            updates: 0,
            tag: None,
            filter: None,
            viewport: Viewport::DEGENERATE,
            showing: true,
            tabs: Vec::new(),
        }
    }

    pub(crate) fn settling_after(mut self, updates: u32) -> Self {
        self.settle_after = updates;
        self
    }

    pub(crate) fn contributing(mut self, tag: LayerTag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub(crate) fn claiming(mut self, bounds: Rect) -> Self {
        self.filter = Some(RectFilter {
            name: self.name,
            log: Rc::clone(&self.log),
            bounds,
        });
        self
    }

    pub(crate) fn hidden(mut self) -> Self {
        self.showing = false;
        self
    }

    pub(crate) fn with_tabs(mut self, ids: &[i32]) -> Self {
        self.tabs = ids.iter().copied().map(TabId).collect();
        self
    }

    fn record(&self, call: Call) {
        self.log.borrow_mut().push(self.name, call);
    }

    fn is_settled(&self) -> bool {
        self.updates >= self.settle_after
    }
}

impl SceneOverlay for RecordingOverlay {
    fn update(&mut self, _time: FrameTime, _dt: u64) -> bool {
        if !self.is_settled() {
            self.updates += 1;
        }
        let settled = self.is_settled();
        self.record(Call::Update { settled });
        settled
    }

    fn compose(&mut self, _resources: &FrameResources<'_>, y_offset: f64) -> Option<SceneLayer> {
        self.record(Call::Compose);
        let tag = self.tag?;
        let bounds = self.viewport.bounds() + Vec2::new(0.0, y_offset);
        let opacity = if self.is_settled() { 1.0 } else { 0.5 };
        Some(SceneLayer::group(tag, bounds).with_opacity(opacity))
    }

    fn event_filter(&mut self) -> Option<&mut dyn EventFilter> {
        match &mut self.filter {
            Some(filter) => Some(filter),
            None => None,
        }
    }

    fn on_size_changed(&mut self, viewport: &Viewport) {
        self.viewport = *viewport;
        self.record(Call::Size(*viewport));
    }

    fn virtual_views(&self, out: &mut Vec<VirtualView>) {
        for tab in &self.tabs {
            out.push(VirtualView::new(
                self.viewport.bounds(),
                format!("{}:{}", self.name, tab.0),
                ViewRole::Tab,
            ));
        }
    }

    fn is_showing(&self) -> bool {
        self.showing
    }

    fn tab_title_changed(&mut self, _e: &TabTitleChanged) {
        self.record(Call::Tab(TabEventKind::TitleChanged));
    }

    fn tab_model_switched(&mut self, _e: &TabModelSwitched) {
        self.record(Call::Tab(TabEventKind::ModelSwitched));
    }

    fn tab_selected(&mut self, _e: &TabSelected) {
        self.record(Call::Tab(TabEventKind::Selected));
    }

    fn tab_moved(&mut self, _e: &TabMoved) {
        self.record(Call::Tab(TabEventKind::Moved));
    }

    fn tab_closed(&mut self, e: &TabClosed) {
        self.record(Call::Tab(TabEventKind::Closed));
        self.tabs.retain(|&id| id != e.tab_id);
    }

    fn tab_closure_cancelled(&mut self, _e: &TabClosureCancelled) {
        self.record(Call::Tab(TabEventKind::ClosureCancelled));
    }

    fn tab_created(&mut self, e: &TabCreated) {
        self.record(Call::Tab(TabEventKind::Created));
        self.tabs.push(e.tab_id);
    }

    fn tab_page_load_started(&mut self, _e: &TabLoadEvent) {
        self.record(Call::Tab(TabEventKind::PageLoadStarted));
    }

    fn tab_page_load_finished(&mut self, _e: &TabLoadEvent) {
        self.record(Call::Tab(TabEventKind::PageLoadFinished));
    }

    fn tab_load_started(&mut self, _e: &TabLoadEvent) {
        self.record(Call::Tab(TabEventKind::LoadStarted));
    }

    fn tab_load_finished(&mut self, _e: &TabLoadEvent) {
        self.record(Call::Tab(TabEventKind::LoadFinished));
    }
}
