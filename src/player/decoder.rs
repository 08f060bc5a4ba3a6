// SPDX-License-Identifier: MPL-2.0
//! Video decoding: turns compressed packets into raw frames.
//!
//! Modern decoder APIs are asymmetric: one submitted packet may yield zero,
//! one, or several frames, and buffered frames must be drained until the
//! decoder asks for more input. [`VideoDecoder::receive`] models that
//! discipline explicitly.

use ffmpeg_next::codec;
use ffmpeg_next::frame;
use ffmpeg_next::{decoder, Packet};

use crate::error::OpenError;

/// Result of polling the decoder for a frame.
pub enum DecodePoll {
    /// A decoded frame is ready.
    Frame(frame::Video),

    /// The decoder has no buffered output; submit another packet.
    NeedMoreInput,
}

/// One video decoder instance bound to a stream's codec parameters.
pub struct VideoDecoder {
    inner: decoder::Video,
}

impl VideoDecoder {
    /// Selects and opens a decoder matching the stream's codec id.
    pub fn open(parameters: codec::Parameters) -> Result<Self, OpenError> {
        let codec_id = parameters.id();
        if decoder::find(codec_id).is_none() {
            return Err(OpenError::UnsupportedCodec(format!("{codec_id:?}")));
        }

        let context = codec::context::Context::from_parameters(parameters)
            .map_err(|e| OpenError::DecoderInitFailed(e.to_string()))?;
        let inner = context
            .decoder()
            .video()
            .map_err(|e| OpenError::DecoderInitFailed(e.to_string()))?;

        Ok(Self { inner })
    }

    /// Submits one compressed packet for decoding.
    pub fn submit(&mut self, packet: &Packet) -> Result<(), ffmpeg_next::Error> {
        self.inner.send_packet(packet)
    }

    /// Polls for the next decoded frame.
    ///
    /// `EAGAIN` and `EOF` both mean the decoder currently has nothing
    /// buffered; any other error is surfaced to the caller.
    pub fn receive(&mut self) -> Result<DecodePoll, ffmpeg_next::Error> {
        let mut decoded = frame::Video::empty();
        match self.inner.receive_frame(&mut decoded) {
            Ok(()) => Ok(DecodePoll::Frame(decoded)),
            Err(ffmpeg_next::Error::Other { errno }) if errno == ffmpeg_next::error::EAGAIN => {
                Ok(DecodePoll::NeedMoreInput)
            }
            Err(ffmpeg_next::Error::Eof) => Ok(DecodePoll::NeedMoreInput),
            Err(e) => Err(e),
        }
    }

    /// Discards all buffered reference state.
    ///
    /// Mandatory after any discontinuous seek, otherwise stale reference
    /// frames decode into garbage output.
    pub fn flush(&mut self) {
        self.inner.flush();
    }

    /// Native frame width reported by the decoder.
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Native frame height reported by the decoder.
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Native pixel format of decoded frames.
    pub fn format(&self) -> ffmpeg_next::format::Pixel {
        self.inner.format()
    }
}
