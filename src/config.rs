// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for playback constants.
//!
//! This module is the single source of truth for the tuning constants used
//! across the crate.
//!
//! # Categories
//!
//! - **Cadence**: nominal tick rate driving the pump
//! - **Speed**: playback speed bounds and presets
//! - **Seek**: relative seek step

// ==========================================================================
// Cadence Defaults
// ==========================================================================

/// Nominal tick rate at 1.0x speed, in Hz.
///
/// The external scheduler is expected to invoke `Player::tick` at
/// `NOMINAL_TICK_RATE_HZ * speed` ticks per second (roughly one tick every
/// 33 ms at normal speed).
pub const NOMINAL_TICK_RATE_HZ: f64 = 30.0;

// ==========================================================================
// Speed Defaults
// ==========================================================================

/// Minimum allowed playback speed multiplier.
pub const MIN_PLAYBACK_SPEED: f64 = 0.25;

/// Maximum allowed playback speed multiplier.
pub const MAX_PLAYBACK_SPEED: f64 = 4.0;

/// Preset speed steps offered to UI layers, in ascending order.
pub const PLAYBACK_SPEED_PRESETS: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

// ==========================================================================
// Seek Defaults
// ==========================================================================

/// Relative seek step for `step_backward`/`step_forward`, in milliseconds.
pub const SEEK_STEP_MS: i64 = 5000;
