// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stock overlays for the [`veneer_core`] overlay manager.
//!
//! - [`TabStripOverlay`]: a horizontal tab strip that mirrors the tab model
//!   from lifecycle events and reports taps to the host.
//! - [`LoadProgressOverlay`]: a toolbar progress bar for the selected tab.
//!
//! Both are driven purely through the
//! [`SceneOverlay`](veneer_core::overlay::SceneOverlay) contract and animate
//! with the elapsed-time [`Animation`] helper. Layout and timing come from
//! plain config structs with `const fn` presets ([`TabStripConfig::phone`],
//! [`TabStripConfig::tablet`], [`LoadProgressConfig::toolbar`]).
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod animation;
pub mod config;
pub mod load_progress;
pub mod tab_strip;

pub use animation::{Animation, Easing};
pub use config::{LoadProgressConfig, TabStripConfig};
pub use load_progress::LoadProgressOverlay;
pub use tab_strip::{StripHit, TabStripOverlay};
