// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene-overlay contract and orchestration for composited browser chrome.
//!
//! `veneer_core` lets several independent visual overlays (a tab strip, a
//! toolbar progress bar, a tab switcher) cooperate on one composited frame.
//! Overlays never know about each other: they share input hit-testing and a
//! common stream of tab-lifecycle and viewport events through the
//! [`OverlayManager`](manager::OverlayManager). The crate is `no_std`
//! compatible (with `alloc`).
//!
//! # Architecture
//!
//! The host drives the manager once per frame and forwards events between
//! frames:
//!
//! ```text
//!   Host render loop
//!       │
//!       ▼
//!   OverlayManager::update() ──► SceneOverlay::update()        (z-order)
//!       │
//!       ▼
//!   OverlayManager::compose() ──► SceneOverlay::compose()      (back-to-front)
//!       │                              │
//!       │                              ▼
//!       │                         Option<SceneLayer>
//!       ▼
//!   ComposedScene ──► ScenePresenter::submit()
//!
//!   InputEvent ──► OverlayManager::route_input() ──► EventFilter (front-to-back,
//!                                                    first claim wins)
//!   TabEvent   ──► OverlayManager::broadcast()   ──► every overlay
//!   Viewport   ──► OverlayManager::on_size_changed() ──► every overlay
//! ```
//!
//! **[`overlay`]**: the [`SceneOverlay`](overlay::SceneOverlay) capability
//! trait and the read-only [`FrameResources`](overlay::FrameResources) bundle
//! handed to every compose call.
//!
//! **[`manager`]**: Overlay registry with generational handles and explicit
//! z-order, plus the per-frame, input-routing, and broadcast protocols.
//!
//! **[`scene`]**: Renderer-agnostic [`SceneLayer`](scene::SceneLayer)
//! subtrees and the per-frame [`ComposedScene`](scene::ComposedScene).
//!
//! **[`input`]**: Input events, the [`EventFilter`](input::EventFilter)
//! hit-testing trait, and routing outcomes.
//!
//! **[`tab`]**: Tab identity and immutable lifecycle event values.
//!
//! **[`viewport`]**: Sanitized viewport geometry.
//!
//! **[`resource`]**: Shared cache traits (titles, resources) and
//! [`ResourceKey`](resource::ResourceKey).
//!
//! **[`virtual_view`]**: Accessibility/testing projection of overlay
//! elements.
//!
//! **[`backend`]**: the [`ScenePresenter`](backend::ScenePresenter) trait
//! rendering backends implement.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! frame-loop instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Threading
//!
//! Everything runs on the host's render thread. Overlays are not required to
//! be `Send`, and shared caches are only reachable through shared references
//! during compose, so no locking happens anywhere in this crate.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-overlay
//!   update and compose events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod input;
pub mod manager;
pub mod overlay;
pub mod resource;
pub mod scene;
pub mod tab;
pub mod time;
pub mod trace;
pub mod viewport;
pub mod virtual_view;

#[cfg(test)]
mod testing;
