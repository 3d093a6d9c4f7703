// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame protocol.
//!
//! A frame runs in three phases:
//!
//! 1. **Update**: every registered overlay advances its animation state, in
//!    back-to-front order. No overlay is skipped because another one (or
//!    itself) is already settled; the frame is settled only when all are.
//! 2. **Compose**: every overlay is asked for its subtree, back-to-front.
//!    Overlays returning `None` are left out of the scene. The front-most
//!    contribution ends up last.
//! 3. **Submit**: the [`ComposedScene`] is handed to the
//!    [`ScenePresenter`].
//!
//! [`update`](OverlayManager::update) starts a new frame and bumps
//! [`frame_index`](OverlayManager::frame_index);
//! [`compose`](OverlayManager::compose) tags its scene with the current
//! frame. [`render_frame`](OverlayManager::render_frame) runs all three
//! phases and reuses one scene buffer across frames.

use super::id::OverlayId;
use super::registry::OverlayManager;
use crate::backend::ScenePresenter;
use crate::overlay::FrameResources;
use crate::scene::{ComposedScene, Contribution};
use crate::time::FrameTime;
#[cfg(feature = "trace-rich")]
use crate::trace::{OverlayComposeEvent, OverlayUpdateEvent};
use crate::trace::{
    FrameBeginEvent, FrameSummaryBuilder, PhaseBeginEvent, PhaseEndEvent, PhaseKind, SubmitEvent,
    Tracer, saturating_u32,
};

impl OverlayManager {
    /// Returns the index of the current frame.
    ///
    /// The first call to [`update`](Self::update) starts frame 0.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.current_frame
    }

    /// Starts a new frame and advances every overlay by `dt` milliseconds.
    ///
    /// Returns `true` if every overlay reported settled.
    pub fn update(&mut self, time: FrameTime, dt: u64, tracer: &mut Tracer<'_>) -> bool {
        let begin = self.begin_frame(time, dt, tracer);
        self.update_overlays(&begin, tracer)
    }

    /// Composes the current frame into a new scene.
    pub fn compose(
        &mut self,
        resources: &FrameResources<'_>,
        y_offset: f64,
        tracer: &mut Tracer<'_>,
    ) -> ComposedScene {
        let mut scene = ComposedScene::new(self.current_frame);
        self.compose_into(&mut scene, resources, y_offset, tracer);
        scene
    }

    /// Composes the current frame into `scene`, replacing its contents.
    pub fn compose_into(
        &mut self,
        scene: &mut ComposedScene,
        resources: &FrameResources<'_>,
        y_offset: f64,
        tracer: &mut Tracer<'_>,
    ) {
        let frame_index = self.current_frame;
        scene.reset(frame_index);

        tracer.phase_begin(&PhaseBeginEvent {
            frame_index,
            phase: PhaseKind::Compose,
        });

        for &idx in &self.back_to_front {
            let Some(entry) = &mut self.slots[idx as usize] else {
                continue;
            };
            let overlay = OverlayId {
                idx,
                generation: self.generation[idx as usize],
            };
            let root = entry.overlay.compose(resources, y_offset);

            #[cfg(feature = "trace-rich")]
            tracer.overlay_compose(&OverlayComposeEvent {
                frame_index,
                overlay,
                z: entry.z,
                layer_count: root.as_ref().map(|r| saturating_u32(r.layer_count())),
            });

            if let Some(root) = root {
                scene.push(Contribution {
                    overlay,
                    z: entry.z,
                    root,
                });
            }
        }

        tracer.phase_end(&PhaseEndEvent {
            frame_index,
            phase: PhaseKind::Compose,
        });
    }

    /// Runs a whole frame: update, compose, then submit to `presenter`.
    ///
    /// Returns `true` if every overlay reported settled, meaning the host
    /// need not schedule another frame until something changes.
    pub fn render_frame(
        &mut self,
        time: FrameTime,
        dt: u64,
        resources: &FrameResources<'_>,
        y_offset: f64,
        presenter: &mut dyn ScenePresenter,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        let begin = self.begin_frame(time, dt, tracer);
        let mut summary = FrameSummaryBuilder::new(&begin);

        let all_settled = self.update_overlays(&begin, tracer);
        summary.set_all_settled(all_settled);

        let mut scene = core::mem::take(&mut self.scene);
        self.compose_into(&mut scene, resources, y_offset, tracer);

        let frame_index = begin.frame_index;
        tracer.phase_begin(&PhaseBeginEvent {
            frame_index,
            phase: PhaseKind::Submit,
        });
        presenter.submit(&scene);
        tracer.submit(&SubmitEvent {
            frame_index,
            contributions: saturating_u32(scene.len()),
            layers: saturating_u32(scene.layer_count()),
        });
        tracer.phase_end(&PhaseEndEvent {
            frame_index,
            phase: PhaseKind::Submit,
        });

        summary.set_scene(&scene);
        tracer.frame_summary(&summary.finish());

        self.scene = scene;
        all_settled
    }

    /// Allocates the next frame index and emits the frame-begin event.
    fn begin_frame(&mut self, time: FrameTime, dt: u64, tracer: &mut Tracer<'_>) -> FrameBeginEvent {
        let frame_index = self.frames_started;
        self.frames_started += 1;
        self.current_frame = frame_index;

        let begin = FrameBeginEvent {
            frame_index,
            time,
            dt,
            overlay_count: saturating_u32(self.len()),
        };
        tracer.frame_begin(&begin);
        begin
    }

    fn update_overlays(&mut self, begin: &FrameBeginEvent, tracer: &mut Tracer<'_>) -> bool {
        let frame_index = begin.frame_index;
        tracer.phase_begin(&PhaseBeginEvent {
            frame_index,
            phase: PhaseKind::Update,
        });

        let mut all_settled = true;
        for &idx in &self.back_to_front {
            let Some(entry) = &mut self.slots[idx as usize] else {
                continue;
            };
            let settled = entry.overlay.update(begin.time, begin.dt);
            all_settled &= settled;

            #[cfg(feature = "trace-rich")]
            tracer.overlay_update(&OverlayUpdateEvent {
                frame_index,
                overlay: OverlayId {
                    idx,
                    generation: self.generation[idx as usize],
                },
                settled,
            });
        }

        tracer.phase_end(&PhaseEndEvent {
            frame_index,
            phase: PhaseKind::Update,
        });
        all_settled
    }
}
