// SPDX-License-Identifier: MPL-2.0
//! Video playback engine.
//!
//! This module composes the pipeline: [`MediaSource`] reads compressed
//! packets from a container, [`VideoDecoder`] turns them into raw frames,
//! [`FrameConverter`] produces RGBA images, and [`Player`] drives the whole
//! thing one pump per tick.

mod converter;
mod decoder;
mod driver;
mod session;
mod source;
mod speed;
mod state;
pub mod time_units;

pub use converter::{FrameConverter, PresentableImage};
pub use decoder::{DecodePoll, VideoDecoder};
pub use driver::{FrameSink, Player, StateSink};
pub use session::SessionInfo;
pub use source::{MediaSource, ReadOutcome};
pub use speed::PlaybackSpeed;
pub use state::PlaybackState;

use std::sync::Once;

/// Static flag to ensure FFmpeg is initialized only once.
static FFMPEG_INIT: Once = Once::new();

/// Initialize FFmpeg with an appropriate log level.
///
/// Safe to call multiple times; initialization happens once thanks to
/// `std::sync::Once`. The FFmpeg log level is lowered to ERROR to suppress
/// per-file warning chatter (e.g. "Detected creation time before 1970").
pub fn init_ffmpeg() -> Result<(), ffmpeg_next::Error> {
    let mut init_result = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(e);
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}
