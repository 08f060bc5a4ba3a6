// SPDX-License-Identifier: MPL-2.0
//! Playback state machine.
//!
//! A tagged enum rather than independent boolean flags, so illegal
//! combinations (playing and stopped at once) are unrepresentable.

/// Playback state of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No active cadence; position is at the start. Initial state.
    #[default]
    Stopped,

    /// Cadence-driven pumping is active.
    Playing,

    /// Cadence suspended; position retained exactly.
    Paused,
}

impl PlaybackState {
    /// Returns true if the cadence is active.
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Returns true if playback is paused.
    pub fn is_paused(self) -> bool {
        matches!(self, Self::Paused)
    }

    /// Returns true if playback is stopped.
    pub fn is_stopped(self) -> bool {
        matches!(self, Self::Stopped)
    }
}
