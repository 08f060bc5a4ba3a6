// SPDX-License-Identifier: MPL-2.0
//! `framepump` is a tick-driven video playback core built on FFmpeg.
//!
//! It opens a media container, locates the first video stream, decodes frames
//! on demand, converts them to RGBA, and paces presentation through an
//! externally scheduled [`Player::tick`](player::Player::tick) cadence. The
//! crate owns no window, timer, or audio path; UI layers drive it through the
//! control API and receive frames and state updates through callbacks.

pub mod config;
pub mod error;
pub mod player;

pub use error::{OpenError, PlaybackError, SeekError};
pub use player::{
    FrameSink, PlaybackSpeed, PlaybackState, Player, PresentableImage, SessionInfo, StateSink,
};
