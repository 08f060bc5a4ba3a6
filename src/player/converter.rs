// SPDX-License-Identifier: MPL-2.0
//! Pixel format conversion into a presentable RGBA buffer.
//!
//! The converter is created lazily on the first decoded frame of a session,
//! sized once to the stream's native resolution, and reused unchanged for the
//! session's lifetime. A mid-stream resolution change is a documented
//! non-goal; frames that do not match the converter's dimensions fail to
//! convert rather than triggering a resize.

use ffmpeg_next::format::Pixel;
use ffmpeg_next::frame;
use ffmpeg_next::software::scaling;

/// A converted frame ready for display: tightly coupled to the converter's
/// internal buffer, valid only until the next conversion. The display sink
/// must copy whatever it wants to keep.
pub struct PresentableImage<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    stride: usize,
}

impl<'a> PresentableImage<'a> {
    /// Raw RGBA plane, including any per-row stride padding.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row in `data`, which may exceed `width * 4`.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Copies the image into a tightly packed `width * height * 4` RGBA
    /// buffer, dropping stride padding.
    pub fn packed_rgba(&self) -> Vec<u8> {
        let row_bytes = self.width as usize * 4;
        let mut packed = Vec::with_capacity(row_bytes * self.height as usize);
        for y in 0..self.height as usize {
            let row_start = y * self.stride;
            packed.extend_from_slice(&self.data[row_start..row_start + row_bytes]);
        }
        packed
    }
}

/// Converts raw decoded frames to RGBA at the stream's native resolution.
///
/// The output frame buffer is allocated once and reused across calls.
pub struct FrameConverter {
    scaler: scaling::Context,
    output: frame::Video,
    width: u32,
    height: u32,
}

impl FrameConverter {
    /// Creates a converter fixed to the given source resolution and pixel
    /// format, targeting RGBA with bilinear quality.
    pub fn new(width: u32, height: u32, src_format: Pixel) -> Result<Self, ffmpeg_next::Error> {
        let scaler = scaling::Context::get(
            src_format,
            width,
            height,
            Pixel::RGBA,
            width,
            height,
            scaling::Flags::BILINEAR,
        )?;

        Ok(Self {
            scaler,
            output: frame::Video::empty(),
            width,
            height,
        })
    }

    /// Converts one decoded frame into the reused output buffer.
    pub fn convert(
        &mut self,
        decoded: &frame::Video,
    ) -> Result<PresentableImage<'_>, ffmpeg_next::Error> {
        self.scaler.run(decoded, &mut self.output)?;

        Ok(PresentableImage {
            data: self.output.data(0),
            width: self.width,
            height: self.height,
            stride: self.output.stride(0),
        })
    }

    /// Width the converter was sized to at creation.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height the converter was sized to at creation.
    pub fn height(&self) -> u32 {
        self.height
    }
}
