// SPDX-License-Identifier: MPL-2.0
//! Playback speed domain type.
//!
//! A type-safe wrapper for speed multipliers, always within the valid range,
//! and the single place where speed maps to tick cadence.

use std::time::Duration;

use crate::config::{
    MAX_PLAYBACK_SPEED, MIN_PLAYBACK_SPEED, NOMINAL_TICK_RATE_HZ, PLAYBACK_SPEED_PRESETS,
};

/// Playback speed multiplier, guaranteed to be within the valid range.
///
/// Speed affects only how often ticks occur; it never changes which frames
/// are decoded or how their timestamps are interpreted.
///
/// # Example
///
/// ```
/// use framepump::PlaybackSpeed;
///
/// let speed = PlaybackSpeed::new(2.0);
/// assert_eq!(speed.value(), 2.0);
///
/// // Values outside range are clamped
/// let too_fast = PlaybackSpeed::new(100.0);
/// assert_eq!(too_fast.value(), 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSpeed(f64);

impl PlaybackSpeed {
    /// Creates a new playback speed, clamping to the valid range.
    #[must_use]
    pub fn new(multiplier: f64) -> Self {
        Self(multiplier.clamp(MIN_PLAYBACK_SPEED, MAX_PLAYBACK_SPEED))
    }

    /// Returns the multiplier as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the tick interval the external scheduler should use at this
    /// speed: one tick every `1 / (nominal rate * speed)` seconds.
    #[must_use]
    pub fn tick_interval(self) -> Duration {
        Duration::from_secs_f64(1.0 / (NOMINAL_TICK_RATE_HZ * self.0))
    }

    /// Returns the next higher preset speed, or self if already at or above
    /// the highest preset.
    #[must_use]
    pub fn increase(self) -> Self {
        let next = PLAYBACK_SPEED_PRESETS
            .iter()
            .find(|&&s| s > self.0 + 0.001)
            .copied()
            .unwrap_or(self.0);
        Self(next)
    }

    /// Returns the next lower preset speed, or self if already at or below
    /// the lowest preset.
    #[must_use]
    pub fn decrease(self) -> Self {
        let prev = PLAYBACK_SPEED_PRESETS
            .iter()
            .rev()
            .find(|&&s| s < self.0 - 0.001)
            .copied()
            .unwrap_or(self.0);
        Self(prev)
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self(1.0)
    }
}
