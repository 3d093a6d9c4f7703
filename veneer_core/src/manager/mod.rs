// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay registry and orchestration.
//!
//! The [`OverlayManager`] owns the registration list of boxed
//! [`SceneOverlay`](crate::overlay::SceneOverlay)s and drives three
//! protocols over it:
//!
//! - **Frame**: [`update`](OverlayManager::update) every overlay in z-order,
//!   then [`compose`](OverlayManager::compose) their subtrees back-to-front
//!   into a [`ComposedScene`](crate::scene::ComposedScene), then submit it
//!   ([`render_frame`](OverlayManager::render_frame) runs all three).
//! - **Input**: [`route_input`](OverlayManager::route_input) offers an event
//!   to overlays front-to-back; the first filter that claims it handles it
//!   exclusively.
//! - **Broadcast**: [`broadcast`](OverlayManager::broadcast) and
//!   [`on_size_changed`](OverlayManager::on_size_changed) notify every
//!   registered overlay, in registration order, whatever its z-order,
//!   visibility, or animation state.
//!
//! # Z-order
//!
//! Each registration carries an explicit [`ZOrder`]. Overlays with equal
//! z-order are ordered by registration sequence, earlier registrations
//! further back. All registry mutations take `&mut self`, so the set of
//! overlays and their order cannot change while a frame, routing pass, or
//! broadcast is running.
//!
//! # Handles
//!
//! [`OverlayId`]s are generational: unregistering an overlay bumps the slot's
//! generation, so handles to removed overlays never alias a newer one.

mod dispatch;
mod frame;
mod id;
mod registry;

pub use id::{OverlayId, ZOrder};
pub use registry::OverlayManager;
