// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elapsed-time scalar animations.
//!
//! An [`Animation`] interpolates between two values over a fixed duration.
//! It is advanced by frame deltas rather than sampled at absolute times, and
//! elapsed time is capped at the duration, so once an animation finishes,
//! further frames leave it untouched.

/// Timing curve applied to an animation's progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Fast start, decelerating to rest (quadratic).
    EaseOut,
}

impl Easing {
    /// Maps linear progress `t` in `0.0..=1.0` to eased progress.
    ///
    /// Out-of-range input is clamped.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv
            }
        }
    }
}

/// A scalar moving from `from` to `to` over `duration` milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animation {
    from: f64,
    to: f64,
    elapsed: u64,
    duration: u64,
    easing: Easing,
}

impl Animation {
    /// Creates an animation at its start.
    #[must_use]
    pub const fn new(from: f64, to: f64, duration: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            elapsed: 0,
            duration,
            easing,
        }
    }

    /// Creates a finished animation resting at `value`.
    #[must_use]
    pub const fn settled(value: f64) -> Self {
        Self::new(value, value, 0, Easing::Linear)
    }

    /// Advances by `dt` milliseconds. Returns `true` once finished.
    pub fn advance(&mut self, dt: u64) -> bool {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.is_finished()
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed as f64 / self.duration as f64;
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// Returns the value the animation ends at.
    #[must_use]
    pub const fn target(&self) -> f64 {
        self.to
    }

    /// Returns `true` once the full duration has elapsed.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Restarts towards a new target from the current value.
    ///
    /// Keeps the easing curve.
    pub fn retarget(&mut self, to: f64, duration: u64) {
        *self = Self::new(self.value(), to, duration, self.easing);
    }

    /// Jumps to `value` and finishes.
    pub fn snap(&mut self, value: f64) {
        *self = Self {
            easing: self.easing,
            ..Self::settled(value)
        };
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::settled(0.0)
    }
}
