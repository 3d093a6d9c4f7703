// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout and timing presets for the stock overlays.

/// Geometry and animation timing of a
/// [`TabStripOverlay`](crate::TabStripOverlay).
///
/// Lengths are in viewport units, durations in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TabStripConfig {
    /// Height of the strip.
    pub tab_height: f64,
    /// Narrowest a tab may get before tabs overflow past the right edge.
    pub min_tab_width: f64,
    /// Widest a tab may get when there is room to spare.
    pub max_tab_width: f64,
    /// How far adjacent tabs overlap.
    pub tab_overlap: f64,
    /// Width of the close button at the trailing edge of each tab.
    pub close_button_width: f64,
    /// Duration of position changes (open, move, close).
    pub slide_ms: u64,
    /// Duration of opacity changes (open, selection highlight).
    pub fade_ms: u64,
}

impl TabStripConfig {
    /// Compact strip for narrow screens.
    #[must_use]
    pub const fn phone() -> Self {
        Self {
            tab_height: 40.0,
            min_tab_width: 96.0,
            max_tab_width: 180.0,
            tab_overlap: 8.0,
            close_button_width: 32.0,
            slide_ms: 150,
            fade_ms: 100,
        }
    }

    /// Full strip for large screens.
    #[must_use]
    pub const fn tablet() -> Self {
        Self {
            tab_height: 48.0,
            min_tab_width: 140.0,
            max_tab_width: 265.0,
            tab_overlap: 24.0,
            close_button_width: 40.0,
            slide_ms: 200,
            fade_ms: 150,
        }
    }
}

impl Default for TabStripConfig {
    fn default() -> Self {
        Self::tablet()
    }
}

/// Appearance and pacing of a
/// [`LoadProgressOverlay`](crate::LoadProgressOverlay).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadProgressConfig {
    /// Thickness of the bar.
    pub bar_height: f64,
    /// Progress shown as soon as a load starts, in `0.0..=1.0`.
    pub initial_progress: f64,
    /// Fraction of the remaining distance to `max_trickle` covered per
    /// second while loading.
    pub trickle_rate: f64,
    /// Ceiling the bar creeps towards until the load finishes.
    pub max_trickle: f64,
    /// Time to fill the bar once the load finishes.
    pub complete_ms: u64,
    /// Time to fade the full bar out.
    pub finish_fade_ms: u64,
}

impl LoadProgressConfig {
    /// The standard toolbar progress bar.
    #[must_use]
    pub const fn toolbar() -> Self {
        Self {
            bar_height: 3.0,
            initial_progress: 0.1,
            trickle_rate: 0.5,
            max_trickle: 0.9,
            complete_ms: 150,
            finish_fade_ms: 250,
        }
    }
}

impl Default for LoadProgressConfig {
    fn default() -> Self {
        Self::toolbar()
    }
}
