// SPDX-License-Identifier: MPL-2.0
//! One open playback session and its per-tick pump.

use std::path::Path;

use ffmpeg_next::{frame, Packet};
use tracing::{debug, warn};

use super::converter::FrameConverter;
use super::decoder::{DecodePoll, VideoDecoder};
use super::driver::FrameSink;
use super::source::{MediaSource, ReadOutcome};
use super::speed::PlaybackSpeed;
use super::state::PlaybackState;
use super::time_units;
use crate::error::OpenError;

/// Metadata returned by a successful open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionInfo {
    /// Total duration in milliseconds (0 when the container does not say).
    pub duration_ms: i64,

    /// Native frame width in pixels.
    pub native_width: u32,

    /// Native frame height in pixels.
    pub native_height: u32,
}

/// Result of one pump step.
pub(crate) enum PumpOutcome {
    /// A frame was converted and emitted.
    FramePresented,

    /// The step completed without a presentable frame.
    NoFrame,

    /// The demuxer ran out of packets.
    EndOfStream,
}

/// How one read outcome advances the pump loop.
enum ReadStep {
    /// A packet for the bound video stream; feed it to the decoder.
    DecodePacket(Packet),

    /// A packet belonging to another stream; discard it and read again.
    SkipPacket,

    /// The step is over.
    Finish(PumpOutcome),
}

/// Maps one demuxer read onto the next pump action.
///
/// A transient read error ends the step without a frame; it is logged and
/// otherwise tolerated, so the next tick simply retries.
fn classify_read(outcome: ReadOutcome, video_stream: usize) -> ReadStep {
    match outcome {
        ReadOutcome::Packet(packet) if packet.stream() != video_stream => ReadStep::SkipPacket,
        ReadOutcome::Packet(packet) => ReadStep::DecodePacket(packet),
        ReadOutcome::EndOfStream => ReadStep::Finish(PumpOutcome::EndOfStream),
        ReadOutcome::TransientError(e) => {
            warn!(error = %e, "transient read error");
            ReadStep::Finish(PumpOutcome::NoFrame)
        }
    }
}

/// The unit of ownership for one open file.
///
/// Exclusively owns every native handle beneath it. Field order fixes the
/// release order on drop: the conversion buffer goes first, then the decoder,
/// then the demuxer.
pub struct Session {
    converter: Option<FrameConverter>,
    pub(crate) decoder: VideoDecoder,
    pub(crate) source: MediaSource,
    pub(crate) duration_ms: i64,
    pub(crate) current_time_ms: i64,
    pub(crate) speed: PlaybackSpeed,
    pub(crate) state: PlaybackState,
}

impl Session {
    /// Opens the container and binds a decoder to its video stream.
    ///
    /// A failure at any stage drops whatever was already acquired.
    pub(crate) fn open<P: AsRef<Path>>(path: P) -> Result<Self, OpenError> {
        let source = MediaSource::open(path)?;
        let decoder = VideoDecoder::open(source.video_parameters())?;

        let (width, height) = (decoder.width(), decoder.height());
        if width == 0 || height == 0 {
            return Err(OpenError::StreamInfoUnavailable(format!(
                "invalid video dimensions: {width}x{height}"
            )));
        }

        debug!(
            width,
            height,
            duration_ms = source.duration_ms(),
            stream_index = source.stream_index(),
            "opened video session"
        );

        let duration_ms = source.duration_ms();
        Ok(Self {
            converter: None,
            decoder,
            source,
            duration_ms,
            current_time_ms: 0,
            speed: PlaybackSpeed::default(),
            state: PlaybackState::Stopped,
        })
    }

    pub(crate) fn info(&self) -> SessionInfo {
        SessionInfo {
            duration_ms: self.duration_ms,
            native_width: self.decoder.width(),
            native_height: self.decoder.height(),
        }
    }

    /// One pump step: emit the first available video frame, reading packets
    /// as needed, and update the current time from its timestamp.
    ///
    /// Packets belonging to other streams are discarded. At most one frame is
    /// emitted per step. Frames still buffered in the decoder from an earlier
    /// submit are presented before any new packet is read; that drain-first
    /// order also keeps the decoder ready to accept the next packet, so a
    /// submit never fails with `EAGAIN`.
    pub(crate) fn pump(&mut self, on_frame: &mut Option<FrameSink>) -> PumpOutcome {
        match self.decoder.receive() {
            Ok(DecodePoll::Frame(decoded)) => return self.present(&decoded, on_frame),
            Ok(DecodePoll::NeedMoreInput) => {}
            Err(e) => warn!(error = %e, "decode failed"),
        }

        loop {
            match classify_read(self.source.read_packet(), self.source.stream_index()) {
                ReadStep::SkipPacket => {}
                ReadStep::Finish(outcome) => return outcome,
                ReadStep::DecodePacket(packet) => {
                    if let Err(e) = self.decoder.submit(&packet) {
                        warn!(error = %e, "decoder rejected packet");
                        continue;
                    }
                    // Drain until the decoder wants more input; the first
                    // frame ends the step.
                    loop {
                        match self.decoder.receive() {
                            Ok(DecodePoll::Frame(decoded)) => {
                                return self.present(&decoded, on_frame);
                            }
                            Ok(DecodePoll::NeedMoreInput) => break,
                            Err(e) => {
                                warn!(error = %e, "decode failed");
                                break;
                            }
                        }
                    }
                }
            }
        }
    }

    /// Updates the current time from the frame's timestamp, converts the
    /// frame, and hands it to the display sink.
    fn present(&mut self, decoded: &frame::Video, on_frame: &mut Option<FrameSink>) -> PumpOutcome {
        if let Some(ts) = decoded.timestamp() {
            self.current_time_ms = time_units::pts_to_ms(ts, self.source.time_base());
        }

        if self.converter.is_none() {
            let (width, height) = (self.decoder.width(), self.decoder.height());
            match FrameConverter::new(width, height, self.decoder.format()) {
                Ok(converter) => {
                    debug!(width, height, "created frame converter");
                    self.converter = Some(converter);
                }
                Err(e) => {
                    warn!(error = %e, "failed to create frame converter");
                    return PumpOutcome::NoFrame;
                }
            }
        }
        let Some(converter) = self.converter.as_mut() else {
            return PumpOutcome::NoFrame;
        };

        match converter.convert(decoded) {
            Ok(image) => {
                if let Some(sink) = on_frame.as_mut() {
                    sink(image, self.current_time_ms);
                }
                PumpOutcome::FramePresented
            }
            Err(e) => {
                warn!(error = %e, "frame conversion failed");
                PumpOutcome::NoFrame
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // `classify_read` never touches the session, so a step it finishes leaves
    // the playback state and position exactly as they were.

    #[test]
    fn transient_read_error_ends_the_step_without_a_frame() {
        let step = classify_read(ReadOutcome::TransientError(ffmpeg_next::Error::InvalidData), 0);
        assert!(matches!(step, ReadStep::Finish(PumpOutcome::NoFrame)));
    }

    #[test]
    fn end_of_stream_finishes_the_step() {
        let step = classify_read(ReadOutcome::EndOfStream, 0);
        assert!(matches!(step, ReadStep::Finish(PumpOutcome::EndOfStream)));
    }

    #[test]
    fn packets_from_other_streams_are_discarded() {
        // A fresh packet carries stream index 0.
        let step = classify_read(ReadOutcome::Packet(Packet::empty()), 3);
        assert!(matches!(step, ReadStep::SkipPacket));
    }

    #[test]
    fn video_stream_packets_reach_the_decoder() {
        let step = classify_read(ReadOutcome::Packet(Packet::empty()), 0);
        assert!(matches!(step, ReadStep::DecodePacket(_)));
    }
}
