// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Toolbar load progress bar.
//!
//! [`LoadProgressOverlay`] follows the selected tab. While that tab loads,
//! the bar trickles towards [`max_trickle`]; when the load finishes it fills
//! up and fades out. Load notifications about other tabs are ignored.
//!
//! The bar never intercepts input.
//!
//! [`max_trickle`]: crate::config::LoadProgressConfig::max_trickle

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use veneer_core::overlay::{FrameResources, SceneOverlay};
use veneer_core::resource::ResourceKey;
use veneer_core::scene::{LayerTag, SceneLayer};
use veneer_core::tab::{TabClosed, TabId, TabLoadEvent, TabModelSwitched, TabSelected};
use veneer_core::time::FrameTime;
use veneer_core::viewport::Viewport;
use veneer_core::virtual_view::{ViewRole, VirtualView};

use crate::animation::{Animation, Easing};
use crate::config::LoadProgressConfig;

const TRACK_TAG: LayerTag = LayerTag(0);
const BAR_TAG: LayerTag = LayerTag(1);

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Hidden,
    Loading { progress: f64 },
    Completing { fill: Animation },
    Fading { alpha: Animation },
}

/// A thin progress bar along the bottom edge of the toolbar.
#[derive(Debug)]
pub struct LoadProgressOverlay {
    config: LoadProgressConfig,
    viewport: Viewport,
    tracked: Option<TabId>,
    phase: Phase,
    bar: Option<ResourceKey>,
    /// Top controls offset from the last compose.
    y_offset: f64,
}

impl LoadProgressOverlay {
    /// Creates a hidden progress bar.
    #[must_use]
    pub fn new(config: LoadProgressConfig) -> Self {
        Self {
            config,
            viewport: Viewport::DEGENERATE,
            tracked: None,
            phase: Phase::Hidden,
            bar: None,
            y_offset: 0.0,
        }
    }

    /// Draws the filled part of the bar with `resource`.
    #[must_use]
    pub fn with_bar_resource(mut self, resource: ResourceKey) -> Self {
        self.bar = Some(resource);
        self
    }

    /// Returns the tab whose loads are shown.
    #[must_use]
    pub fn tracked_tab(&self) -> Option<TabId> {
        self.tracked
    }

    /// Returns the displayed progress in `0.0..=1.0`, or `None` while hidden.
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        match self.phase {
            Phase::Hidden => None,
            Phase::Loading { progress } => Some(progress),
            Phase::Completing { fill } => Some(fill.value()),
            Phase::Fading { .. } => Some(1.0),
        }
    }

    fn alpha(&self) -> f64 {
        match self.phase {
            Phase::Fading { alpha } => alpha.value(),
            _ => 1.0,
        }
    }

    fn start(&mut self, e: &TabLoadEvent) {
        if self.tracked != Some(e.tab_id) || matches!(self.phase, Phase::Loading { .. }) {
            return;
        }
        self.phase = Phase::Loading {
            progress: self.config.initial_progress,
        };
    }

    fn finish(&mut self, e: &TabLoadEvent) {
        if self.tracked != Some(e.tab_id) {
            return;
        }
        if let Phase::Loading { progress } = self.phase {
            self.phase = Phase::Completing {
                fill: Animation::new(progress, 1.0, self.config.complete_ms, Easing::EaseOut),
            };
        }
    }

    /// Bar geometry below the toolbar, which is offset by `y_offset`.
    fn track_bounds(&self, y_offset: f64) -> Rect {
        let top = y_offset + self.viewport.visible_offset_y();
        Rect::new(0.0, top, self.viewport.width(), top + self.config.bar_height)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "animated opacity stays within 0..=1"
)]
fn opacity(value: f64) -> f32 {
    value as f32
}

impl SceneOverlay for LoadProgressOverlay {
    fn update(&mut self, _time: FrameTime, dt: u64) -> bool {
        match &mut self.phase {
            Phase::Hidden => true,
            Phase::Loading { progress } => {
                let step = (self.config.trickle_rate * dt as f64 / 1000.0).min(1.0);
                let remaining = (self.config.max_trickle - *progress).max(0.0);
                *progress += remaining * step;
                false
            }
            Phase::Completing { fill } => {
                if fill.advance(dt) {
                    self.phase = Phase::Fading {
                        alpha: Animation::new(1.0, 0.0, self.config.finish_fade_ms, Easing::Linear),
                    };
                }
                false
            }
            Phase::Fading { alpha } => {
                if alpha.advance(dt) {
                    self.phase = Phase::Hidden;
                    return true;
                }
                false
            }
        }
    }

    fn compose(&mut self, _resources: &FrameResources<'_>, y_offset: f64) -> Option<SceneLayer> {
        self.y_offset = y_offset;
        let progress = self.progress()?;
        let track = self.track_bounds(y_offset);
        let filled = Rect::new(
            track.x0,
            track.y0,
            track.x0 + track.width() * progress.clamp(0.0, 1.0),
            track.y1,
        );

        let mut root = SceneLayer::group(TRACK_TAG, track).with_opacity(opacity(self.alpha()));
        root.push_child(SceneLayer::leaf(BAR_TAG, filled, self.bar));
        Some(root)
    }

    fn on_size_changed(&mut self, viewport: &Viewport) {
        self.viewport = *viewport;
    }

    fn virtual_views(&self, out: &mut Vec<VirtualView>) {
        if self.progress().is_some() {
            out.push(VirtualView::new(
                self.track_bounds(self.y_offset),
                String::from("Page load progress"),
                ViewRole::ProgressBar,
            ));
        }
    }

    fn is_showing(&self) -> bool {
        self.phase != Phase::Hidden
    }

    fn tab_model_switched(&mut self, _e: &TabModelSwitched) {
        self.tracked = None;
        self.phase = Phase::Hidden;
    }

    fn tab_selected(&mut self, e: &TabSelected) {
        if self.tracked != Some(e.tab_id) {
            self.tracked = Some(e.tab_id);
            self.phase = Phase::Hidden;
        }
    }

    fn tab_closed(&mut self, e: &TabClosed) {
        if self.tracked == Some(e.tab_id) {
            self.tracked = None;
            self.phase = Phase::Hidden;
        }
    }

    fn tab_page_load_started(&mut self, e: &TabLoadEvent) {
        self.start(e);
    }

    fn tab_page_load_finished(&mut self, e: &TabLoadEvent) {
        self.finish(e);
    }

    fn tab_load_started(&mut self, e: &TabLoadEvent) {
        self.start(e);
    }

    fn tab_load_finished(&mut self, e: &TabLoadEvent) {
        self.finish(e);
    }
}

#[cfg(test)]
mod tests {
    use veneer_core::viewport::Orientation;

    use super::*;

    fn load(tab: i32) -> TabLoadEvent {
        TabLoadEvent {
            time: FrameTime(0),
            incognito: false,
            tab_id: TabId(tab),
        }
    }

    fn tracking(tab: i32) -> LoadProgressOverlay {
        let mut bar = LoadProgressOverlay::new(LoadProgressConfig::toolbar());
        bar.on_size_changed(&Viewport::new(400.0, 800.0, 56.0, Orientation::Portrait));
        bar.tab_selected(&TabSelected {
            time: FrameTime(0),
            incognito: false,
            tab_id: TabId(tab),
            prev_id: None,
        });
        bar
    }

    #[test]
    fn hidden_until_the_tracked_tab_loads() {
        let mut bar = tracking(1);
        assert!(bar.update(FrameTime(0), 16));
        assert!(bar.compose(&FrameResources::empty(), 0.0).is_none());
        assert!(!bar.is_showing());

        bar.tab_load_started(&load(2));
        assert_eq!(bar.progress(), None, "other tabs are ignored");

        bar.tab_page_load_started(&load(1));
        assert_eq!(bar.progress(), Some(0.1));
        assert!(bar.is_showing());
    }

    #[test]
    fn trickles_without_reaching_the_ceiling() {
        let mut bar = tracking(1);
        bar.tab_load_started(&load(1));
        let mut last = 0.1;
        for _ in 0..200 {
            assert!(!bar.update(FrameTime(0), 16), "loading never settles");
            let now = bar.progress().expect("visible while loading");
            assert!(now >= last);
            last = now;
        }
        assert!(last > 0.7);
        assert!(last <= 0.9);
    }

    #[test]
    fn finishing_fills_fades_and_settles() {
        let mut bar = tracking(1);
        bar.tab_load_started(&load(1));
        bar.update(FrameTime(0), 16);
        bar.tab_load_finished(&load(1));

        let mut frames = 0;
        while !bar.update(FrameTime(0), 16) {
            frames += 1;
            assert!(frames < 100, "progress bar did not settle");
        }
        assert_eq!(bar.progress(), None);
        assert!(bar.update(FrameTime(0), 16));
        assert!(bar.compose(&FrameResources::empty(), 0.0).is_none());
    }

    #[test]
    fn finish_reaches_full_width_before_fading() {
        let mut bar = tracking(1);
        bar.tab_load_started(&load(1));
        bar.tab_load_finished(&load(1));
        // Fill takes 150ms.
        bar.update(FrameTime(0), 150);
        bar.update(FrameTime(0), 1);

        let root = bar
            .compose(&FrameResources::empty(), 0.0)
            .expect("fading bar is visible");
        let fill = root.find(BAR_TAG).expect("bar layer");
        assert_eq!(fill.bounds.width(), 400.0);
        assert!(root.opacity < 1.0);
    }

    #[test]
    fn bar_sits_under_the_toolbar() {
        let mut bar = tracking(1);
        bar.tab_load_started(&load(1));
        let root = bar
            .compose(&FrameResources::empty(), -20.0)
            .expect("loading bar is visible");
        assert_eq!(root.bounds.y0, 36.0);
        assert_eq!(root.bounds.height(), 3.0);
        let fill = root.find(BAR_TAG).expect("bar layer");
        assert!((fill.bounds.width() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn switching_tabs_resets() {
        let mut bar = tracking(1);
        bar.tab_load_started(&load(1));
        bar.tab_selected(&TabSelected {
            time: FrameTime(0),
            incognito: false,
            tab_id: TabId(2),
            prev_id: Some(TabId(1)),
        });
        assert_eq!(bar.tracked_tab(), Some(TabId(2)));
        assert_eq!(bar.progress(), None);

        bar.tab_load_finished(&load(1));
        assert_eq!(bar.progress(), None);
    }

    #[test]
    fn closing_the_loading_tab_settles() {
        let mut bar = tracking(3);
        bar.tab_load_started(&load(3));
        bar.tab_closed(&TabClosed {
            time: FrameTime(0),
            incognito: false,
            tab_id: TabId(3),
        });
        assert_eq!(bar.tracked_tab(), None);
        assert_eq!(bar.progress(), None);
        assert!(bar.update(FrameTime(0), 16));
        assert!(!bar.is_showing());
    }

    #[test]
    fn closing_another_tab_keeps_loading() {
        let mut bar = tracking(3);
        bar.tab_load_started(&load(3));
        bar.tab_closed(&TabClosed {
            time: FrameTime(0),
            incognito: false,
            tab_id: TabId(4),
        });
        assert_eq!(bar.tracked_tab(), Some(TabId(3)));
        assert!(!bar.update(FrameTime(0), 16));
    }

    #[test]
    fn restarting_while_fading_shows_the_bar_again() {
        let mut bar = tracking(1);
        bar.tab_load_started(&load(1));
        bar.tab_load_finished(&load(1));
        bar.update(FrameTime(0), 150);
        bar.update(FrameTime(0), 16);
        bar.tab_load_started(&load(1));
        assert_eq!(bar.progress(), Some(0.1));
    }

    #[test]
    fn reports_a_progress_view_only_while_visible() {
        let mut bar = tracking(1);
        let mut views = Vec::new();
        bar.virtual_views(&mut views);
        assert!(views.is_empty());

        bar.tab_load_started(&load(1));
        bar.virtual_views(&mut views);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].role(), ViewRole::ProgressBar);
    }

    #[test]
    fn progress_view_matches_the_drawn_bar() {
        let mut bar = tracking(1);
        bar.tab_load_started(&load(1));
        let root = bar
            .compose(&FrameResources::empty(), 56.0)
            .expect("loading bar is visible");

        let mut views = Vec::new();
        bar.virtual_views(&mut views);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].bounds(), root.bounds);
    }

    #[test]
    fn never_filters_input() {
        let mut bar = tracking(1);
        bar.tab_load_started(&load(1));
        assert!(bar.event_filter().is_none());
    }
}
