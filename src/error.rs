// SPDX-License-Identifier: MPL-2.0
//! Error taxonomy for the playback pipeline.
//!
//! Each phase of the pipeline surfaces its own error enum: `OpenError` for
//! container/decoder setup, `SeekError` for repositioning, and
//! `PlaybackError` for control calls issued with nothing open. End-of-stream
//! and transient read failures are not errors; they are modeled as
//! [`ReadOutcome`](crate::player::ReadOutcome) variants.

use std::fmt;

/// Failure while opening a container and binding a decoder to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenError {
    /// The container could not be opened or parsed at all.
    ContainerUnreadable(String),

    /// The container parsed but usable stream metadata could not be derived.
    StreamInfoUnavailable(String),

    /// The container has no video stream.
    NoVideoStream,

    /// No decoder is registered for the stream's codec id.
    UnsupportedCodec(String),

    /// Decoder context creation or opening failed.
    DecoderInitFailed(String),
}

impl fmt::Display for OpenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenError::ContainerUnreadable(msg) => {
                write!(f, "Cannot read container: {}", msg)
            }
            OpenError::StreamInfoUnavailable(msg) => {
                write!(f, "Stream info unavailable: {}", msg)
            }
            OpenError::NoVideoStream => write!(f, "No video stream found"),
            OpenError::UnsupportedCodec(codec) => {
                write!(f, "Unsupported video codec: {}", codec)
            }
            OpenError::DecoderInitFailed(msg) => {
                write!(f, "Decoder initialization failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for OpenError {}

/// Failure while repositioning the read cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeekError {
    /// The underlying seek call errored; position and state are unchanged.
    SeekFailed(String),

    /// Seek was requested with no open session.
    NoActiveSession,
}

impl fmt::Display for SeekError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeekError::SeekFailed(msg) => write!(f, "Seek failed: {}", msg),
            SeekError::NoActiveSession => write!(f, "No active playback session"),
        }
    }
}

impl std::error::Error for SeekError {}

/// Failure of a playback control call (`play`/`pause`/`stop`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The control call requires an open session and none exists.
    NoActiveSession,
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::NoActiveSession => write!(f, "No active playback session"),
        }
    }
}

impl std::error::Error for PlaybackError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_error_display() {
        let err = OpenError::ContainerUnreadable("bad header".to_string());
        assert_eq!(format!("{}", err), "Cannot read container: bad header");

        let err = OpenError::NoVideoStream;
        assert_eq!(format!("{}", err), "No video stream found");

        let err = OpenError::UnsupportedCodec("av99".to_string());
        assert_eq!(format!("{}", err), "Unsupported video codec: av99");
    }

    #[test]
    fn seek_error_display() {
        let err = SeekError::SeekFailed("out of range".to_string());
        assert_eq!(format!("{}", err), "Seek failed: out of range");
        assert_eq!(
            format!("{}", SeekError::NoActiveSession),
            "No active playback session"
        );
    }

    #[test]
    fn playback_error_display() {
        assert_eq!(
            format!("{}", PlaybackError::NoActiveSession),
            "No active playback session"
        );
    }

    #[test]
    fn errors_box_as_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(OpenError::NoVideoStream);
        assert_eq!(err.to_string(), "No video stream found");

        let err: Box<dyn std::error::Error> = Box::new(SeekError::NoActiveSession);
        assert_eq!(err.to_string(), "No active playback session");

        let err: Box<dyn std::error::Error> = Box::new(PlaybackError::NoActiveSession);
        assert_eq!(err.to_string(), "No active playback session");
    }
}
