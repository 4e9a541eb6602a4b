//! Decode, normalize and bound the input before enhancement.

use ::image::codecs::png::PngEncoder;
use ::image::imageops::FilterType;
use ::image::{DynamicImage, ImageEncoder, ImageError};
use serde::{Deserialize, Serialize};

use crate::error::EnhanceError;
use crate::image::{ChannelLayout, PhotoImage};

/// What pre-processing did to the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preprocessing {
    /// Decoded size `(width, height)`.
    pub original: (u32, u32),
    /// Size after the resolution bound.
    pub bounded: (u32, u32),
    /// Channel layout after normalization.
    pub layout: ChannelLayout,
}

impl Preprocessing {
    /// Whether the resolution bound downscaled the photo.
    pub fn resized(&self) -> bool {
        self.original != self.bounded
    }
}

/// A decoded, bounded photo plus its canonical PNG encoding.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub image: PhotoImage,
    /// Lossless encoding of `image`; sent to the analyzer.
    pub png: Vec<u8>,
    pub info: Preprocessing,
}

/// Decode `raw`, normalize to RGB8/RGBA8 and downscale so that neither
/// side exceeds `max_dimension`.
pub fn prepare(raw: &[u8], max_dimension: u32) -> Result<Prepared, EnhanceError> {
    let decoded = ::image::load_from_memory(raw).map_err(EnhanceError::Decode)?;
    let original = (decoded.width(), decoded.height());

    let bounded = bound_resolution(decoded, max_dimension);
    let image = PhotoImage::from_dynamic(bounded);
    let info = Preprocessing {
        original,
        bounded: (image.width, image.height),
        layout: image.layout,
    };
    if info.resized() {
        tracing::info!(
            "downscaled {}x{} -> {}x{}",
            original.0,
            original.1,
            info.bounded.0,
            info.bounded.1
        );
    }

    let png = encode_png(&image).map_err(|source| EnhanceError::Processing {
        stage: "intermediate encode",
        source,
    })?;
    Ok(Prepared { image, png, info })
}

/// Fit within `max_dimension × max_dimension`, preserving aspect ratio,
/// with Lanczos resampling. Images already within bounds pass through.
pub fn bound_resolution(image: DynamicImage, max_dimension: u32) -> DynamicImage {
    if image.width() <= max_dimension && image.height() <= max_dimension {
        return image;
    }
    image.resize(max_dimension, max_dimension, FilterType::Lanczos3)
}

/// Lossless PNG encoding of a photo.
pub fn encode_png(image: &PhotoImage) -> Result<Vec<u8>, ImageError> {
    // A malformed buffer would be rejected by the encoder anyway; report it
    // with the same error type.
    image.validate().map_err(|e| {
        ImageError::Parameter(::image::error::ParameterError::from_kind(
            ::image::error::ParameterErrorKind::Generic(e.to_string()),
        ))
    })?;

    let color = match image.layout {
        ChannelLayout::Rgb => ::image::ExtendedColorType::Rgb8,
        ChannelLayout::Rgba => ::image::ExtendedColorType::Rgba8,
    };
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(&image.data, image.width, image.height, color)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{Rgb, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 128]));
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(img.as_raw(), width, height, ::image::ExtendedColorType::Rgb8)
            .unwrap();
        out
    }

    #[test]
    fn test_small_image_is_not_resized() {
        let prepared = prepare(&png_bytes(40, 30), 2048).unwrap();
        assert_eq!(prepared.info.original, (40, 30));
        assert_eq!(prepared.info.bounded, (40, 30));
        assert!(!prepared.info.resized());
        assert_eq!(prepared.image.layout, ChannelLayout::Rgb);
    }

    #[test]
    fn test_large_image_is_bounded_preserving_aspect() {
        let prepared = prepare(&png_bytes(200, 100), 64).unwrap();
        assert_eq!(prepared.info.bounded, (64, 32));
        assert!(prepared.info.resized());
        assert_eq!(prepared.image.data.len(), 64 * 32 * 3);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = prepare(b"definitely not an image", 2048).unwrap_err();
        assert!(matches!(err, EnhanceError::Decode(_)));
        assert!(matches!(prepare(&[], 2048), Err(EnhanceError::Decode(_))));
    }

    #[test]
    fn test_intermediate_png_decodes_to_same_pixels() {
        let prepared = prepare(&png_bytes(16, 9), 2048).unwrap();
        let back = PhotoImage::from_dynamic(::image::load_from_memory(&prepared.png).unwrap());
        assert_eq!(back, prepared.image);
    }

    #[test]
    fn test_encode_rejects_malformed_buffer() {
        let broken = PhotoImage::from_raw(4, 4, ChannelLayout::Rgba, vec![0; 3]);
        assert!(encode_png(&broken).is_err());
    }
}
