//! Brightness, contrast, saturation and sharpness enhancers.
//!
//! Each enhancer blends the photo against a *degenerate* version of itself:
//!
//! ```text
//! out = degenerate + factor × (in − degenerate)
//! ```
//!
//! | enhancer   | degenerate                                 |
//! |------------|--------------------------------------------|
//! | brightness | black                                      |
//! | contrast   | flat grey at the image's mean luma         |
//! | saturation | the pixel's own luma                       |
//! | sharpness  | 3×3 smoothed copy (borders left unchanged) |
//!
//! `factor = 1.0` returns an exact copy. Alpha is never touched.

use crate::error::TransformError;
use crate::grading::{begin, blend};
use crate::image::{PhotoImage, luma8};

/// Smoothing kernel used as the sharpness reference, row-major.
const SMOOTH_KERNEL: [u32; 9] = [1, 1, 1, 1, 5, 1, 1, 1, 1];
/// Sum of [`SMOOTH_KERNEL`].
const SMOOTH_SCALE: u32 = 13;

/// Scale every colour sample toward or away from black.
pub fn brightness(image: &PhotoImage, factor: f64) -> Result<PhotoImage, TransformError> {
    let mut out = begin(image, "brightness", factor)?;
    if factor == 1.0 {
        return Ok(out);
    }

    for px in out.pixels_mut() {
        for c in &mut px[..3] {
            *c = blend(0.0, *c, factor);
        }
    }
    Ok(out)
}

/// Stretch or compress colour samples around the mean luma.
pub fn contrast(image: &PhotoImage, factor: f64) -> Result<PhotoImage, TransformError> {
    let mut out = begin(image, "contrast", factor)?;
    if factor == 1.0 {
        return Ok(out);
    }

    let mean = mean_luma(image);
    for px in out.pixels_mut() {
        for c in &mut px[..3] {
            *c = blend(mean, *c, factor);
        }
    }
    Ok(out)
}

/// Push colour away from (or toward) each pixel's grey value.
pub fn saturation(image: &PhotoImage, factor: f64) -> Result<PhotoImage, TransformError> {
    let mut out = begin(image, "saturation", factor)?;
    if factor == 1.0 {
        return Ok(out);
    }

    for px in out.pixels_mut() {
        let gray = luma8(px) as f64;
        for c in &mut px[..3] {
            *c = blend(gray, *c, factor);
        }
    }
    Ok(out)
}

/// Blend against a smoothed copy; above 1.0 sharpens, below softens.
pub fn sharpness(image: &PhotoImage, factor: f64) -> Result<PhotoImage, TransformError> {
    let mut out = begin(image, "sharpness", factor)?;
    if factor == 1.0 {
        return Ok(out);
    }

    let smoothed = smooth3x3(image);
    let channels = image.channels();
    for (i, px) in out.pixels_mut().enumerate() {
        let base = i * channels;
        for c in 0..3 {
            px[c] = blend(smoothed[base + c] as f64, px[c], factor);
        }
    }
    Ok(out)
}

/// Mean luma rounded to the nearest integer level. Empty images give 0.
fn mean_luma(image: &PhotoImage) -> f64 {
    let count = image.pixel_count();
    if count == 0 {
        return 0.0;
    }
    let sum: u64 = image.pixels().map(|px| luma8(px) as u64).sum();
    (sum as f64 / count as f64).round()
}

/// Apply [`SMOOTH_KERNEL`] to the colour channels. The outermost rows and
/// columns keep their original samples.
fn smooth3x3(image: &PhotoImage) -> Vec<u8> {
    let mut out = image.data.clone();
    let (w, h) = (image.width as usize, image.height as usize);
    if w < 3 || h < 3 {
        return out;
    }

    let channels = image.channels();
    let src = &image.data;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            for c in 0..3 {
                let mut acc = 0u32;
                for ky in 0..3 {
                    for kx in 0..3 {
                        let idx = ((y + ky - 1) * w + (x + kx - 1)) * channels + c;
                        acc += src[idx] as u32 * SMOOTH_KERNEL[ky * 3 + kx];
                    }
                }
                // Round to nearest.
                out[(y * w + x) * channels + c] =
                    ((acc + SMOOTH_SCALE / 2) / SMOOTH_SCALE) as u8;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ChannelLayout;

    fn gradient(width: u32, height: u32) -> PhotoImage {
        let data = (0..width * height)
            .flat_map(|i| {
                let v = (i * 37 % 256) as u8;
                [v, v.wrapping_mul(3), 255 - v]
            })
            .collect();
        PhotoImage::from_raw(width, height, ChannelLayout::Rgb, data)
    }

    #[test]
    fn test_factor_one_is_exact_copy() {
        let image = gradient(7, 5);
        assert_eq!(brightness(&image, 1.0).unwrap(), image);
        assert_eq!(contrast(&image, 1.0).unwrap(), image);
        assert_eq!(saturation(&image, 1.0).unwrap(), image);
        assert_eq!(sharpness(&image, 1.0).unwrap(), image);
    }

    #[test]
    fn test_brightness_scales_and_clamps() {
        let image = PhotoImage::from_raw(1, 1, ChannelLayout::Rgb, vec![100, 200, 10]);
        let out = brightness(&image, 1.5).unwrap();
        assert_eq!(out.data, vec![150, 255, 15]);
        let out = brightness(&image, 0.5).unwrap();
        assert_eq!(out.data, vec![50, 100, 5]);
    }

    #[test]
    fn test_brightness_preserves_alpha() {
        let image = PhotoImage::from_raw(1, 1, ChannelLayout::Rgba, vec![100, 100, 100, 77]);
        let out = brightness(&image, 1.2).unwrap();
        assert_eq!(out.data[3], 77);
        assert_eq!(out.data[0], 120);
    }

    #[test]
    fn test_contrast_keeps_flat_image_flat() {
        let image = PhotoImage::from_raw(3, 3, ChannelLayout::Rgb, vec![90; 27]);
        let out = contrast(&image, 1.4).unwrap();
        assert_eq!(out.data, image.data);
    }

    #[test]
    fn test_contrast_spreads_around_mean() {
        // Mean luma is 100.
        let image = PhotoImage::from_raw(2, 1, ChannelLayout::Rgb, vec![50, 50, 50, 150, 150, 150]);
        let out = contrast(&image, 2.0).unwrap();
        assert_eq!(out.data, vec![0, 0, 0, 200, 200, 200]);
    }

    #[test]
    fn test_saturation_small_factor_approaches_gray() {
        let image = PhotoImage::from_raw(1, 1, ChannelLayout::Rgb, vec![200, 100, 50]);
        let out = saturation(&image, 0.01).unwrap();
        let spread = out.data.iter().max().unwrap() - out.data.iter().min().unwrap();
        assert!(spread <= 2, "expected near-gray, got {:?}", out.data);
    }

    #[test]
    fn test_saturation_leaves_gray_pixels() {
        let image = PhotoImage::from_raw(2, 1, ChannelLayout::Rgb, vec![40, 40, 40, 220, 220, 220]);
        let out = saturation(&image, 1.7).unwrap();
        assert_eq!(out.data, image.data);
    }

    #[test]
    fn test_sharpness_leaves_borders_and_flat_regions() {
        let image = PhotoImage::from_raw(4, 4, ChannelLayout::Rgb, vec![60; 48]);
        let out = sharpness(&image, 2.0).unwrap();
        assert_eq!(out.data, image.data);

        let image = gradient(5, 5);
        let out = sharpness(&image, 2.0).unwrap();
        // First row is a border row.
        assert_eq!(out.data[..15], image.data[..15]);
    }

    #[test]
    fn test_sharpness_amplifies_center_spike() {
        let mut data = vec![100u8; 27];
        data[12..15].copy_from_slice(&[180, 180, 180]);
        let image = PhotoImage::from_raw(3, 3, ChannelLayout::Rgb, data);
        let out = sharpness(&image, 2.0).unwrap();
        assert!(out.data[12] > 180);
    }

    #[test]
    fn test_invalid_factor_is_rejected() {
        let image = gradient(2, 2);
        for f in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                brightness(&image, f),
                Err(TransformError::InvalidFactor { name: "brightness", .. })
            ));
        }
    }

    #[test]
    fn test_malformed_buffer_is_rejected() {
        let image = PhotoImage::from_raw(3, 3, ChannelLayout::Rgb, vec![0; 5]);
        assert!(matches!(
            contrast(&image, 1.2),
            Err(TransformError::MalformedBuffer { expected: 27, actual: 5 })
        ));
        // Even the identity factor refuses malformed input.
        assert!(saturation(&image, 1.0).is_err());
    }
}
