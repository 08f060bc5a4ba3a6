// SPDX-License-Identifier: MPL-2.0
//! Time unit conversion utilities for playback.
//!
//! The pipeline deals in three clocks: caller-facing milliseconds, FFmpeg's
//! global `AV_TIME_BASE` units (microseconds) used by container-level seeks,
//! and per-stream PTS units scaled by the stream's time base.

use ffmpeg_next::Rational;

/// `AV_TIME_BASE` units per millisecond.
const AV_TIME_UNITS_PER_MS: i64 = (ffmpeg_next::ffi::AV_TIME_BASE as i64) / 1000;

/// Converts milliseconds to `AV_TIME_BASE` units for container-level seeks.
///
/// # Examples
///
/// ```
/// use framepump::player::time_units::ms_to_av_time;
///
/// assert_eq!(ms_to_av_time(1000), 1_000_000);
/// assert_eq!(ms_to_av_time(0), 0);
/// ```
#[inline]
pub fn ms_to_av_time(ms: i64) -> i64 {
    ms * AV_TIME_UNITS_PER_MS
}

/// Converts `AV_TIME_BASE` units to milliseconds.
///
/// # Examples
///
/// ```
/// use framepump::player::time_units::av_time_to_ms;
///
/// assert_eq!(av_time_to_ms(1_000_000), 1000);
/// assert_eq!(av_time_to_ms(500_000), 500);
/// ```
#[inline]
pub fn av_time_to_ms(av_time: i64) -> i64 {
    av_time / AV_TIME_UNITS_PER_MS
}

/// Converts a stream timestamp to milliseconds using the stream's time base.
#[inline]
pub fn pts_to_ms(pts: i64, time_base: Rational) -> i64 {
    let scale = f64::from(time_base.numerator()) / f64::from(time_base.denominator());
    (pts as f64 * scale * 1000.0) as i64
}

/// Formats a millisecond position as `hh:mm:ss` for time labels.
///
/// # Examples
///
/// ```
/// use framepump::player::time_units::format_timestamp;
///
/// assert_eq!(format_timestamp(0), "00:00:00");
/// assert_eq!(format_timestamp(61_000), "00:01:01");
/// assert_eq!(format_timestamp(3_600_000), "01:00:00");
/// ```
pub fn format_timestamp(ms: i64) -> String {
    let total_secs = ms.max(0) / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
