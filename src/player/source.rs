// SPDX-License-Identifier: MPL-2.0
//! Container demuxing: opens a media file and produces compressed packets.

use std::path::Path;

use ffmpeg_next::format;
use ffmpeg_next::format::context::Input;
use ffmpeg_next::media::Type;
use ffmpeg_next::{codec, Packet, Rational};

use super::time_units;
use crate::error::{OpenError, SeekError};

/// Result of one packet read. End-of-stream and transient failures are
/// ordinary outcomes here, not errors; the driver decides what to do with
/// them.
pub enum ReadOutcome {
    /// A compressed packet belonging to any stream of the container.
    Packet(Packet),

    /// The demuxer reached the end of the container. Reading can only be
    /// restarted by an explicit seek.
    EndOfStream,

    /// A non-EOF negative read result. Tolerated; the next read may succeed.
    TransientError(ffmpeg_next::Error),
}

/// An open container with one selected video stream.
///
/// Owns the demuxer handle exclusively; dropping the source closes the
/// container.
pub struct MediaSource {
    input: Input,
    stream_index: usize,
    time_base: Rational,
    parameters: codec::Parameters,
    duration_ms: i64,
}

impl MediaSource {
    /// Opens a container and locates its first video stream in index order.
    ///
    /// Duration prefers the container-level value and falls back to
    /// `stream duration * stream time base` when that is unavailable.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, OpenError> {
        super::init_ffmpeg()
            .map_err(|e| OpenError::ContainerUnreadable(format!("FFmpeg init failed: {e}")))?;

        let input = format::input(&path)
            .map_err(|e| OpenError::ContainerUnreadable(e.to_string()))?;

        let (stream_index, time_base, parameters, stream_duration) = {
            let stream = input
                .streams()
                .find(|s| s.parameters().medium() == Type::Video)
                .ok_or(OpenError::NoVideoStream)?;
            (
                stream.index(),
                stream.time_base(),
                stream.parameters(),
                stream.duration(),
            )
        };

        let duration_ms = if input.duration() > 0 {
            time_units::av_time_to_ms(input.duration())
        } else if stream_duration > 0 {
            time_units::pts_to_ms(stream_duration, time_base)
        } else {
            0
        };

        Ok(Self {
            input,
            stream_index,
            time_base,
            parameters,
            duration_ms,
        })
    }

    /// Reads the next packet from the container.
    pub fn read_packet(&mut self) -> ReadOutcome {
        let mut packet = Packet::empty();
        match packet.read(&mut self.input) {
            Ok(()) => ReadOutcome::Packet(packet),
            Err(ffmpeg_next::Error::Eof) => ReadOutcome::EndOfStream,
            Err(e) => ReadOutcome::TransientError(e),
        }
    }

    /// Repositions the read cursor to the nearest keyframe at or before
    /// `target_ms`. The caller must flush the decoder afterwards.
    pub fn seek_ms(&mut self, target_ms: i64) -> Result<(), SeekError> {
        let ts = time_units::ms_to_av_time(target_ms);
        // RangeTo bounds the seek so FFmpeg lands on a keyframe at-or-before
        // the target rather than after it.
        self.input
            .seek(ts, ..ts)
            .map_err(|e| SeekError::SeekFailed(e.to_string()))
    }

    /// Index of the selected video stream within the container.
    pub fn stream_index(&self) -> usize {
        self.stream_index
    }

    /// Time base of the selected video stream.
    pub fn time_base(&self) -> Rational {
        self.time_base
    }

    /// Container duration in milliseconds (0 when unknown).
    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    /// Codec parameters of the selected video stream, for decoder setup.
    pub fn video_parameters(&self) -> codec::Parameters {
        self.parameters.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn open_fails_for_missing_file() {
        let result = MediaSource::open("/nonexistent/clip.mp4");
        assert!(matches!(result, Err(OpenError::ContainerUnreadable(_))));
    }

    #[test]
    fn open_fails_for_garbage_data() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is definitely not a video container").unwrap();
        file.flush().unwrap();

        let result = MediaSource::open(file.path());
        // Unparseable bytes; a pathological probe may also parse them as a
        // headerless container with no video track.
        assert!(matches!(
            result,
            Err(OpenError::ContainerUnreadable(_)) | Err(OpenError::NoVideoStream)
        ));
    }

    #[test]
    fn open_fails_for_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = MediaSource::open(file.path());
        assert!(matches!(
            result,
            Err(OpenError::ContainerUnreadable(_)) | Err(OpenError::NoVideoStream)
        ));
    }
}
