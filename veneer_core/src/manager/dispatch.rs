// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input routing, lifecycle broadcast, and virtual-view collection.

use alloc::vec::Vec;

use super::id::OverlayId;
use super::registry::OverlayManager;
use crate::input::{InputEvent, RouteOutcome};
use crate::tab::TabEvent;
use crate::trace::{BroadcastEvent, InputRouteEvent, Tracer, ViewportEvent, saturating_u32};
use crate::viewport::Viewport;
use crate::virtual_view::VirtualView;

impl OverlayManager {
    /// Offers an input event to overlays front-to-back.
    ///
    /// Overlays without an event filter are passed over. The first filter
    /// whose [`intercepts`](crate::input::EventFilter::intercepts) returns
    /// `true` handles the event and routing stops there; filters behind it
    /// are never asked. If nobody claims the event the host should apply its
    /// default handling.
    pub fn route_input(&mut self, event: &InputEvent, tracer: &mut Tracer<'_>) -> RouteOutcome {
        let mut consulted = 0_u32;
        let mut outcome = RouteOutcome::Unclaimed;

        for &idx in self.back_to_front.iter().rev() {
            let Some(entry) = &mut self.slots[idx as usize] else {
                continue;
            };
            let Some(filter) = entry.overlay.event_filter() else {
                continue;
            };
            consulted += 1;
            if filter.intercepts(event) {
                filter.handle(event);
                outcome = RouteOutcome::Claimed(OverlayId {
                    idx,
                    generation: self.generation[idx as usize],
                });
                break;
            }
        }

        tracer.input_route(&InputRouteEvent {
            time: event.time,
            claimed_by: outcome.claimed_by(),
            consulted,
        });
        outcome
    }

    /// Delivers a tab lifecycle event to every registered overlay.
    ///
    /// Overlays are notified in registration order, whatever their z-order,
    /// visibility, or animation state. Returns the number of recipients.
    pub fn broadcast(&mut self, event: &TabEvent, tracer: &mut Tracer<'_>) -> usize {
        let mut recipients = 0;
        for &idx in &self.registration {
            if let Some(entry) = &mut self.slots[idx as usize] {
                event.deliver_to(entry.overlay.as_mut());
                recipients += 1;
            }
        }

        tracer.broadcast(&BroadcastEvent {
            kind: event.kind(),
            tab_id: event.tab_id(),
            recipients: saturating_u32(recipients),
        });
        recipients
    }

    /// Delivers new viewport geometry to every registered overlay.
    ///
    /// The viewport is remembered and replayed to overlays registered later.
    /// Returns the number of recipients.
    pub fn on_size_changed(&mut self, viewport: &Viewport, tracer: &mut Tracer<'_>) -> usize {
        self.viewport = Some(*viewport);

        let mut recipients = 0;
        for &idx in &self.registration {
            if let Some(entry) = &mut self.slots[idx as usize] {
                entry.overlay.on_size_changed(viewport);
                recipients += 1;
            }
        }

        tracer.viewport(&ViewportEvent {
            viewport: *viewport,
            recipients: saturating_u32(recipients),
        });
        recipients
    }

    /// Appends every overlay's virtual views to `out`, topmost overlay first.
    ///
    /// Within one overlay, views keep the order the overlay reports them in.
    pub fn virtual_views(&self, out: &mut Vec<VirtualView>) {
        for &idx in self.back_to_front.iter().rev() {
            if let Some(entry) = &self.slots[idx as usize] {
                entry.overlay.virtual_views(out);
            }
        }
    }

    /// Returns `true` if any registered overlay has something on screen.
    #[must_use]
    pub fn any_showing(&self) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|entry| entry.overlay.is_showing())
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;

    use kurbo::{Point, Rect};

    use super::*;
    use crate::input::InputKind;
    use crate::manager::ZOrder;
    use crate::overlay::FrameResources;
    use crate::scene::LayerTag;
    use crate::tab::{TabClosed, TabEventKind, TabId, TabLoadEvent, TabModelSwitched};
    use crate::testing::{Call, RecordingOverlay, SharedLog};
    use crate::time::FrameTime;
    use crate::viewport::Orientation;

    const WHOLE: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    const TOP_STRIP: Rect = Rect::new(0.0, 0.0, 100.0, 20.0);

    fn tap(x: f64, y: f64) -> InputEvent {
        InputEvent::tap(FrameTime(100), Point::new(x, y))
    }

    fn handled_by(log: &SharedLog) -> Vec<&'static str> {
        log.borrow().names_where(|c| *c == Call::Handle)
    }

    #[test]
    fn topmost_claiming_filter_wins() {
        let log = SharedLog::default();
        let mut manager = OverlayManager::new();
        manager.register(
            Box::new(RecordingOverlay::with_log("back", &log).claiming(WHOLE)),
            ZOrder(0),
        );
        let front = manager.register(
            Box::new(RecordingOverlay::with_log("front", &log).claiming(WHOLE)),
            ZOrder(1),
        );

        let outcome = manager.route_input(&tap(10.0, 10.0), &mut Tracer::none());
        assert_eq!(outcome, RouteOutcome::Claimed(front));
        assert_eq!(handled_by(&log), ["front"]);
        // The back filter was never consulted.
        assert!(log.borrow().calls_for("back").is_empty());
    }

    #[test]
    fn declined_events_fall_through() {
        let log = SharedLog::default();
        let mut manager = OverlayManager::new();
        let back = manager.register(
            Box::new(RecordingOverlay::with_log("back", &log).claiming(WHOLE)),
            ZOrder(0),
        );
        manager.register(
            Box::new(RecordingOverlay::with_log("strip", &log).claiming(TOP_STRIP)),
            ZOrder(1),
        );

        let outcome = manager.route_input(&tap(50.0, 80.0), &mut Tracer::none());
        assert_eq!(outcome, RouteOutcome::Claimed(back));
        assert_eq!(log.borrow().calls_for("strip"), [Call::Intercept]);
        assert_eq!(log.borrow().calls_for("back"), [Call::Intercept, Call::Handle]);
    }

    #[test]
    fn overlays_without_filters_are_skipped() {
        let log = SharedLog::default();
        let mut manager = OverlayManager::new();
        let back = manager.register(
            Box::new(RecordingOverlay::with_log("back", &log).claiming(WHOLE)),
            ZOrder(0),
        );
        manager.register(Box::new(RecordingOverlay::with_log("plain", &log)), ZOrder(9));

        let outcome = manager.route_input(&tap(1.0, 1.0), &mut Tracer::none());
        assert_eq!(outcome.claimed_by(), Some(back));
    }

    #[test]
    fn unclaimed_events_go_back_to_the_host() {
        let log = SharedLog::default();
        let mut manager = OverlayManager::new();
        manager.register(
            Box::new(RecordingOverlay::with_log("strip", &log).claiming(TOP_STRIP)),
            ZOrder(0),
        );

        let outcome = manager.route_input(&tap(50.0, 500.0), &mut Tracer::none());
        assert_eq!(outcome, RouteOutcome::Unclaimed);
        let cancel = InputEvent::new(FrameTime(0), InputKind::Cancel);
        assert!(!manager.route_input(&cancel, &mut Tracer::none()).is_claimed());
        assert!(handled_by(&log).is_empty());
    }

    #[test]
    fn at_most_one_filter_handles_each_event() {
        let log = SharedLog::default();
        let mut manager = OverlayManager::new();
        for (name, z) in [("a", 0), ("b", 3), ("c", 1), ("d", 2)] {
            manager.register(
                Box::new(RecordingOverlay::with_log(name, &log).claiming(WHOLE)),
                ZOrder(z),
            );
        }
        for i in 0..5 {
            log.borrow_mut().clear();
            manager.route_input(&tap(f64::from(i), 5.0), &mut Tracer::none());
            assert_eq!(handled_by(&log), ["b"]);
        }
    }

    #[test]
    fn broadcast_reaches_everyone_once_in_registration_order() {
        let log = SharedLog::default();
        let mut manager = OverlayManager::new();
        manager.register(Box::new(RecordingOverlay::with_log("first", &log)), ZOrder(9));
        manager.register(
            Box::new(RecordingOverlay::with_log("hidden", &log).hidden()),
            ZOrder(-1),
        );
        manager.register(
            Box::new(RecordingOverlay::with_log("animating", &log).settling_after(100)),
            ZOrder(0),
        );

        let event = TabEvent::LoadStarted(TabLoadEvent {
            time: FrameTime(5),
            incognito: false,
            tab_id: TabId(2),
        });
        let recipients = manager.broadcast(&event, &mut Tracer::none());

        assert_eq!(recipients, 3);
        assert_eq!(
            log.borrow()
                .names_where(|c| *c == Call::Tab(TabEventKind::LoadStarted)),
            ["first", "hidden", "animating"]
        );
    }

    #[test]
    fn closing_an_unknown_tab_changes_nothing() {
        let (overlay, _log) = RecordingOverlay::new("strip");
        let mut manager = OverlayManager::new();
        manager.register(Box::new(overlay.with_tabs(&[1, 2, 3])), ZOrder(0));

        let mut before = Vec::new();
        manager.virtual_views(&mut before);

        let closed = TabEvent::Closed(TabClosed {
            time: FrameTime(10),
            incognito: false,
            tab_id: TabId(7),
        });
        assert_eq!(manager.broadcast(&closed, &mut Tracer::none()), 1);

        let mut after = Vec::new();
        manager.virtual_views(&mut after);
        assert_eq!(before, after);
        assert_eq!(after.len(), 3);
    }

    #[test]
    fn broadcast_to_empty_manager() {
        let mut manager = OverlayManager::new();
        let event = TabEvent::ModelSwitched(TabModelSwitched { incognito: true });
        assert_eq!(manager.broadcast(&event, &mut Tracer::none()), 0);
    }

    #[test]
    fn latest_size_change_is_authoritative() {
        let (overlay, log) = RecordingOverlay::new("a");
        let mut manager = OverlayManager::new();
        manager.register(Box::new(overlay.contributing(LayerTag(1))), ZOrder(0));

        let portrait = Viewport::new(400.0, 800.0, 0.0, Orientation::Portrait);
        let landscape = Viewport::new(800.0, 400.0, 24.0, Orientation::Landscape);
        assert_eq!(manager.on_size_changed(&portrait, &mut Tracer::none()), 1);
        assert_eq!(manager.on_size_changed(&landscape, &mut Tracer::none()), 1);
        assert_eq!(manager.viewport(), Some(landscape));

        let scene = manager.compose(&FrameResources::empty(), 0.0, &mut Tracer::none());
        assert_eq!(scene.contributions()[0].root.bounds.width(), 800.0);
        assert_eq!(
            log.borrow().calls_for("a"),
            [Call::Size(portrait), Call::Size(landscape), Call::Compose]
        );
    }

    #[test]
    fn virtual_views_are_collected_topmost_first() {
        let log = SharedLog::default();
        let mut manager = OverlayManager::new();
        manager.register(
            Box::new(RecordingOverlay::with_log("back", &log).with_tabs(&[1, 2])),
            ZOrder(0),
        );
        manager.register(
            Box::new(RecordingOverlay::with_log("front", &log).with_tabs(&[9])),
            ZOrder(1),
        );

        let mut views = vec![VirtualView::new(
            Rect::ZERO,
            "host",
            crate::virtual_view::ViewRole::Button,
        )];
        manager.virtual_views(&mut views);
        let labels: Vec<_> = views.iter().map(VirtualView::label).collect();
        assert_eq!(labels, ["host", "front:9", "back:1", "back:2"]);
    }

    #[test]
    fn any_showing_checks_every_overlay() {
        let log = SharedLog::default();
        let mut manager = OverlayManager::new();
        assert!(!manager.any_showing());
        let hidden = manager.register(
            Box::new(RecordingOverlay::with_log("hidden", &log).hidden()),
            ZOrder(0),
        );
        assert!(!manager.any_showing());
        manager.register(Box::new(RecordingOverlay::with_log("shown", &log)), ZOrder(0));
        assert!(manager.any_showing());
        manager.unregister(hidden);
        assert!(manager.any_showing());
    }
}
