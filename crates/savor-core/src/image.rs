//! Image representation for the enhancement pipeline.

use ::image::{DynamicImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TransformError;

/// Interleaved channel layouts the operators understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelLayout {
    /// 8-bit red, green, blue.
    Rgb,
    /// 8-bit red, green, blue, alpha. Alpha is carried through untouched.
    Rgba,
}

impl ChannelLayout {
    /// Samples per pixel.
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb => write!(f, "RGB8"),
            Self::Rgba => write!(f, "RGBA8"),
        }
    }
}

/// Decoded 8-bit raster. Layout and dimensions never change after decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel layout of `data`.
    pub layout: ChannelLayout,
    /// Interleaved samples, row-major.
    pub data: Vec<u8>,
}

impl PhotoImage {
    /// Wrap a raw buffer. No validation happens here; operators call
    /// [`PhotoImage::validate`] before touching pixels.
    pub fn from_raw(width: u32, height: u32, layout: ChannelLayout, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            layout,
            data,
        }
    }

    /// Normalize any decoded image to RGB8 or RGBA8.
    ///
    /// Colour types that carry alpha become RGBA8; everything else
    /// (greyscale, 16-bit, float) becomes RGB8.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        if image.color().has_alpha() {
            Self::from_raw(width, height, ChannelLayout::Rgba, image.into_rgba8().into_raw())
        } else {
            Self::from_raw(width, height, ChannelLayout::Rgb, image.into_rgb8().into_raw())
        }
    }

    /// Convert back to a `DynamicImage` for resampling and encoding.
    pub fn to_dynamic(&self) -> Result<DynamicImage, TransformError> {
        self.validate()?;
        let malformed = || TransformError::MalformedBuffer {
            expected: self.expected_len(),
            actual: self.data.len(),
        };
        let image = match self.layout {
            ChannelLayout::Rgb => DynamicImage::ImageRgb8(
                RgbImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(malformed)?,
            ),
            ChannelLayout::Rgba => DynamicImage::ImageRgba8(
                RgbaImage::from_raw(self.width, self.height, self.data.clone())
                    .ok_or_else(malformed)?,
            ),
        };
        Ok(image)
    }

    /// Samples per pixel.
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Buffer length implied by the dimensions and layout.
    pub fn expected_len(&self) -> usize {
        self.pixel_count() * self.channels()
    }

    /// Reject buffers whose length disagrees with the header.
    pub fn validate(&self) -> Result<(), TransformError> {
        if self.data.len() == self.expected_len() {
            Ok(())
        } else {
            Err(TransformError::MalformedBuffer {
                expected: self.expected_len(),
                actual: self.data.len(),
            })
        }
    }

    /// Iterate pixels as mutable slices of `channels()` samples.
    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        let channels = self.channels();
        self.data.chunks_exact_mut(channels)
    }

    /// Iterate pixels as slices of `channels()` samples.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.channels())
    }
}

/// ITU-R 601 luma in fixed point, matching the usual 8-bit greyscale
/// conversion: `(19595 R + 38470 G + 7471 B + 0x8000) >> 16`.
#[inline]
pub fn luma8(px: &[u8]) -> u8 {
    let l = (px[0] as u32 * 19595 + px[1] as u32 * 38470 + px[2] as u32 * 7471 + 0x8000) >> 16;
    l as u8
}
