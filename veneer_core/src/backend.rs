// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for rendering integrations.
//!
//! Veneer stops at the [`ComposedScene`]: turning scene layers into GPU
//! layers or native views belongs to the host's rendering backend, which
//! implements [`ScenePresenter`]. The scene is borrowed for the duration of
//! the call only; backends that diff between frames must copy what they
//! need.

use crate::scene::ComposedScene;

/// Receives the composed scene at the end of each frame.
///
/// # Frame loop pseudocode
///
/// A typical host frame callback looks like this:
///
/// ```rust,ignore
/// fn on_frame(time: FrameTime, dt: u64) {
///     let resources = FrameResources::new(&title_cache, &resource_manager);
///     let settled = manager.render_frame(
///         time,
///         dt,
///         &resources,
///         browser_controls_offset,
///         &mut presenter,
///         &mut Tracer::none(),
///     );
///     if !settled {
///         request_next_frame();
///     }
/// }
/// ```
pub trait ScenePresenter {
    /// Hands the composed scene to the rendering backend.
    fn submit(&mut self, scene: &ComposedScene);
}
