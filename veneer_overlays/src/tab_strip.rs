// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A horizontal strip of tabs.
//!
//! [`TabStripOverlay`] mirrors the tab model from lifecycle events: it keeps
//! one ordered tab list per model (normal and incognito) and shows the one
//! that is active. Tabs slide to their new positions when the list changes,
//! fade in when created or restored, and the selected tab fades in a
//! highlight.
//!
//! The strip never changes the tab model itself. Taps are reported to
//! host-supplied handlers ([`with_selection_handler`] and
//! [`with_close_handler`]); the host commits the change and answers with the
//! corresponding lifecycle broadcast.
//!
//! [`with_selection_handler`]: TabStripOverlay::with_selection_handler
//! [`with_close_handler`]: TabStripOverlay::with_close_handler

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect};
use veneer_core::input::{EventFilter, InputEvent, InputKind};
use veneer_core::overlay::{FrameResources, SceneOverlay};
use veneer_core::resource::ResourceKey;
use veneer_core::scene::{LayerTag, SceneLayer};
use veneer_core::tab::{
    TabClosed, TabClosureCancelled, TabCreated, TabId, TabModelSwitched, TabMoved, TabSelected,
    TabTitleChanged,
};
use veneer_core::time::FrameTime;
use veneer_core::viewport::Viewport;
use veneer_core::virtual_view::{ViewRole, VirtualView};

use crate::animation::{Animation, Easing};
use crate::config::TabStripConfig;

/// How many closed tabs per model can still be restored.
const RECENTLY_CLOSED: usize = 8;

const ROOT_TAG: LayerTag = LayerTag(0);
const PART_TAB: u64 = 1;
const PART_TITLE: u64 = 2;
const PART_CLOSE: u64 = 3;
const PART_HIGHLIGHT: u64 = 4;

/// Position differences below this are treated as no change.
const EPSILON: f64 = 1e-6;

/// Stable per-tab layer tag, distinct for every tab id and part. Never
/// collides with [`ROOT_TAG`].
fn tab_tag(id: TabId, part: u64) -> LayerTag {
    LayerTag((u64::from(id.0.cast_unsigned()) << 3) | part)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "animated opacity stays within 0..=1"
)]
fn opacity(value: f64) -> f32 {
    value as f32
}

/// What a point on the strip hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StripHit {
    /// The body of a tab.
    Tab(TabId),
    /// The close button of a tab.
    Close(TabId),
}

#[derive(Debug)]
struct StripTab {
    id: TabId,
    title: String,
    x: Animation,
    alpha: Animation,
    highlight: Animation,
}

impl StripTab {
    fn appearing(id: TabId, title: String, x: f64, fade_ms: u64) -> Self {
        Self {
            id,
            title,
            x: Animation::settled(x),
            alpha: Animation::new(0.0, 1.0, fade_ms, Easing::Linear),
            highlight: Animation::settled(0.0),
        }
    }

    fn advance(&mut self, dt: u64) -> bool {
        let mut done = self.x.advance(dt);
        done &= self.alpha.advance(dt);
        done &= self.highlight.advance(dt);
        done
    }
}

#[derive(Debug)]
struct ClosedTab {
    id: TabId,
    index: usize,
    title: String,
}

#[derive(Debug, Default)]
struct TabList {
    tabs: Vec<StripTab>,
    selected: Option<TabId>,
    recently_closed: Vec<ClosedTab>,
}

impl TabList {
    fn position(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    fn select(&mut self, id: TabId, fade_ms: u64) {
        if self.selected == Some(id) || self.position(id).is_none() {
            return;
        }
        for tab in &mut self.tabs {
            if tab.id == id {
                tab.highlight.retarget(1.0, fade_ms);
            } else if Some(tab.id) == self.selected {
                tab.highlight.retarget(0.0, fade_ms);
            }
        }
        self.selected = Some(id);
    }
}

/// Width of each tab when `count` tabs share the viewport.
fn tab_width(config: &TabStripConfig, viewport: &Viewport, count: usize) -> f64 {
    let count = count.max(1) as f64;
    (viewport.width() / count)
        .min(config.max_tab_width)
        .max(config.min_tab_width)
}

/// Left edge of the tab at `index`.
fn tab_x(config: &TabStripConfig, width: f64, index: usize) -> f64 {
    index as f64 * (width - config.tab_overlap).max(0.0)
}

type TabHandler = Box<dyn FnMut(TabId)>;

/// Tab switcher chrome: one row of tabs along the top of the viewport.
pub struct TabStripOverlay {
    config: TabStripConfig,
    viewport: Viewport,
    strip_top: f64,
    incognito: bool,
    lists: [TabList; 2],
    close_icon: Option<ResourceKey>,
    on_select: Option<TabHandler>,
    on_close: Option<TabHandler>,
}

impl fmt::Debug for TabStripOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabStripOverlay")
            .field("config", &self.config)
            .field("viewport", &self.viewport)
            .field("strip_top", &self.strip_top)
            .field("incognito", &self.incognito)
            .field("lists", &self.lists)
            .field("close_icon", &self.close_icon)
            .finish_non_exhaustive()
    }
}

impl TabStripOverlay {
    /// Creates an empty strip.
    #[must_use]
    pub fn new(config: TabStripConfig) -> Self {
        Self {
            config,
            viewport: Viewport::DEGENERATE,
            strip_top: 0.0,
            incognito: false,
            lists: [TabList::default(), TabList::default()],
            close_icon: None,
            on_select: None,
            on_close: None,
        }
    }

    /// Calls `handler` with the tab id when a tab body is tapped.
    #[must_use]
    pub fn with_selection_handler(mut self, handler: impl FnMut(TabId) + 'static) -> Self {
        self.on_select = Some(Box::new(handler));
        self
    }

    /// Calls `handler` with the tab id when a close button is tapped.
    #[must_use]
    pub fn with_close_handler(mut self, handler: impl FnMut(TabId) + 'static) -> Self {
        self.on_close = Some(Box::new(handler));
        self
    }

    /// Draws `icon` in every close button.
    #[must_use]
    pub fn with_close_icon(mut self, icon: ResourceKey) -> Self {
        self.close_icon = Some(icon);
        self
    }

    /// Returns the tabs of the active model, left to right.
    pub fn tab_ids(&self) -> impl Iterator<Item = TabId> + '_ {
        self.list().tabs.iter().map(|t| t.id)
    }

    /// Returns the selected tab of the active model.
    #[must_use]
    pub fn selected(&self) -> Option<TabId> {
        self.list().selected
    }

    /// Returns whether the incognito model is active.
    #[must_use]
    pub fn is_incognito(&self) -> bool {
        self.incognito
    }

    /// Returns the strip's bounds as of the last compose.
    #[must_use]
    pub fn strip_bounds(&self) -> Rect {
        Rect::new(
            0.0,
            self.strip_top,
            self.viewport.width(),
            self.strip_top + self.config.tab_height,
        )
    }

    /// Returns what lies under `point`.
    ///
    /// The selected tab is drawn above its neighbors, so it wins where tabs
    /// overlap; otherwise the tab further right does.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<StripHit> {
        if !self.strip_bounds().contains(point) {
            return None;
        }
        let list = self.list();
        let width = self.current_width();
        let selected = list
            .selected
            .and_then(|id| list.position(id))
            .map(|i| &list.tabs[i]);

        for tab in selected.into_iter().chain(list.tabs.iter().rev()) {
            let bounds = self.tab_rect(tab, width);
            if bounds.contains(point) {
                return Some(if self.close_rect(bounds).contains(point) {
                    StripHit::Close(tab.id)
                } else {
                    StripHit::Tab(tab.id)
                });
            }
        }
        None
    }

    // -- Internal helpers --

    fn list(&self) -> &TabList {
        &self.lists[usize::from(self.incognito)]
    }

    fn current_width(&self) -> f64 {
        tab_width(&self.config, &self.viewport, self.list().tabs.len())
    }

    fn tab_rect(&self, tab: &StripTab, width: f64) -> Rect {
        let x = tab.x.value();
        Rect::new(
            x,
            self.strip_top,
            x + width,
            self.strip_top + self.config.tab_height,
        )
    }

    fn close_rect(&self, tab_bounds: Rect) -> Rect {
        Rect::new(
            tab_bounds.x1 - self.config.close_button_width,
            tab_bounds.y0,
            tab_bounds.x1,
            tab_bounds.y1,
        )
    }

    /// Moves every tab of one model towards its slot.
    fn relayout(&mut self, incognito: bool, animate: bool) {
        let list = &mut self.lists[usize::from(incognito)];
        let width = tab_width(&self.config, &self.viewport, list.tabs.len());
        for (index, tab) in list.tabs.iter_mut().enumerate() {
            let target = tab_x(&self.config, width, index);
            if (tab.x.target() - target).abs() < EPSILON {
                continue;
            }
            if animate {
                tab.x.retarget(target, self.config.slide_ms);
            } else {
                tab.x.snap(target);
            }
        }
    }

    /// Inserts a tab that fades in at its final slot.
    fn insert_tab(&mut self, incognito: bool, index: usize, id: TabId, title: String) {
        let list = &mut self.lists[usize::from(incognito)];
        let index = index.min(list.tabs.len());
        let width = tab_width(&self.config, &self.viewport, list.tabs.len() + 1);
        let x = tab_x(&self.config, width, index);
        list.tabs.insert(
            index,
            StripTab::appearing(id, title, x, self.config.fade_ms),
        );
        self.relayout(incognito, true);
    }

    fn compose_tab(
        &self,
        tab: &StripTab,
        width: f64,
        resources: &FrameResources<'_>,
    ) -> SceneLayer {
        let bounds = self.tab_rect(tab, width);
        let mut layer =
            SceneLayer::group(tab_tag(tab.id, PART_TAB), bounds).with_opacity(opacity(tab.alpha.value()));

        let highlight = tab.highlight.value();
        if highlight > 0.0 {
            layer.push_child(
                SceneLayer::group(tab_tag(tab.id, PART_HIGHLIGHT), bounds)
                    .with_opacity(opacity(highlight)),
            );
        }

        if let Some(key) = resources.titles.title_resource(tab.id) {
            let available = (width - self.config.close_button_width).max(0.0);
            let title_width = resources
                .resources
                .resource_size(key)
                .map_or(available, |size| size.width.min(available));
            let title_bounds = Rect::new(
                bounds.x0,
                bounds.y0,
                bounds.x0 + title_width,
                bounds.y1,
            );
            layer.push_child(SceneLayer::leaf(
                tab_tag(tab.id, PART_TITLE),
                title_bounds,
                Some(key),
            ));
        }

        layer.push_child(SceneLayer::leaf(
            tab_tag(tab.id, PART_CLOSE),
            self.close_rect(bounds),
            self.close_icon,
        ));
        layer
    }
}

impl SceneOverlay for TabStripOverlay {
    fn update(&mut self, _time: FrameTime, dt: u64) -> bool {
        let mut settled = true;
        for list in &mut self.lists {
            for tab in &mut list.tabs {
                settled &= tab.advance(dt);
            }
        }
        settled
    }

    fn compose(&mut self, resources: &FrameResources<'_>, y_offset: f64) -> Option<SceneLayer> {
        self.strip_top = y_offset;
        let list = self.list();
        if list.tabs.is_empty() {
            return None;
        }

        let width = self.current_width();
        let mut root = SceneLayer::group(ROOT_TAG, self.strip_bounds());
        // The selected tab goes last so it draws above its neighbors.
        for tab in list.tabs.iter().filter(|t| Some(t.id) != list.selected) {
            root.push_child(self.compose_tab(tab, width, resources));
        }
        if let Some(tab) = list.selected.and_then(|id| list.position(id)).map(|i| &list.tabs[i]) {
            root.push_child(self.compose_tab(tab, width, resources));
        }
        Some(root)
    }

    fn event_filter(&mut self) -> Option<&mut dyn EventFilter> {
        Some(self)
    }

    fn on_size_changed(&mut self, viewport: &Viewport) {
        self.viewport = *viewport;
        self.relayout(false, false);
        self.relayout(true, false);
    }

    fn virtual_views(&self, out: &mut Vec<VirtualView>) {
        let width = self.current_width();
        for tab in &self.list().tabs {
            let label = if tab.title.is_empty() {
                format!("Tab {}", tab.id.0)
            } else {
                tab.title.clone()
            };
            out.push(VirtualView::new(self.tab_rect(tab, width), label, ViewRole::Tab));
        }
    }

    fn is_showing(&self) -> bool {
        !self.list().tabs.is_empty()
    }

    fn tab_title_changed(&mut self, e: &TabTitleChanged) {
        for list in &mut self.lists {
            if let Some(tab) = list.tabs.iter_mut().find(|t| t.id == e.tab_id) {
                tab.title.clone_from(&e.title);
            }
        }
    }

    fn tab_model_switched(&mut self, e: &TabModelSwitched) {
        self.incognito = e.incognito;
    }

    fn tab_selected(&mut self, e: &TabSelected) {
        let fade_ms = self.config.fade_ms;
        self.lists[usize::from(e.incognito)].select(e.tab_id, fade_ms);
    }

    fn tab_moved(&mut self, e: &TabMoved) {
        let list = &mut self.lists[usize::from(e.incognito)];
        let Some(from) = list.position(e.tab_id) else {
            return;
        };
        let tab = list.tabs.remove(from);
        let to = e.new_index.min(list.tabs.len());
        list.tabs.insert(to, tab);
        self.relayout(e.incognito, true);
    }

    fn tab_closed(&mut self, e: &TabClosed) {
        let list = &mut self.lists[usize::from(e.incognito)];
        let Some(index) = list.position(e.tab_id) else {
            return;
        };
        let tab = list.tabs.remove(index);
        if list.selected == Some(tab.id) {
            list.selected = None;
        }
        if list.recently_closed.len() == RECENTLY_CLOSED {
            list.recently_closed.remove(0);
        }
        list.recently_closed.push(ClosedTab {
            id: tab.id,
            index,
            title: tab.title,
        });
        self.relayout(e.incognito, true);
    }

    fn tab_closure_cancelled(&mut self, e: &TabClosureCancelled) {
        let list = &mut self.lists[usize::from(e.incognito)];
        let Some(pos) = list.recently_closed.iter().position(|c| c.id == e.tab_id) else {
            return;
        };
        let closed = list.recently_closed.remove(pos);
        if list.position(closed.id).is_some() {
            return;
        }
        self.insert_tab(e.incognito, closed.index, closed.id, closed.title);
    }

    fn tab_created(&mut self, e: &TabCreated) {
        let list = &self.lists[usize::from(e.incognito)];
        if list.position(e.tab_id).is_some() {
            return;
        }
        let index = e
            .prev_id
            .and_then(|prev| list.position(prev))
            .map_or(list.tabs.len(), |i| i + 1);
        self.insert_tab(e.incognito, index, e.tab_id, String::new());
        if e.selected {
            let fade_ms = self.config.fade_ms;
            self.lists[usize::from(e.incognito)].select(e.tab_id, fade_ms);
        }
    }
}

impl EventFilter for TabStripOverlay {
    fn intercepts(&mut self, event: &InputEvent) -> bool {
        if !self.is_showing() {
            return false;
        }
        match event.kind {
            InputKind::Down { position }
            | InputKind::Tap { position }
            | InputKind::LongPress { position }
            | InputKind::Drag { position, .. } => self.strip_bounds().contains(position),
            _ => false,
        }
    }

    fn handle(&mut self, event: &InputEvent) {
        let InputKind::Tap { position } = event.kind else {
            return;
        };
        match self.hit_test(position) {
            Some(StripHit::Tab(id)) => {
                if let Some(handler) = &mut self.on_select {
                    handler(id);
                }
            }
            Some(StripHit::Close(id)) => {
                if let Some(handler) = &mut self.on_close {
                    handler(id);
                }
            }
            None => {}
        }
    }
}
