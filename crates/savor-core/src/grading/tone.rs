//! Luminance-thresholded shadows and highlights.
//!
//! ```text
//! L = 0.299 R + 0.587 G + 0.114 B          (0–255 scale, from the input)
//! L > 150  →  rgb × (1 + highlights)
//! L < 100  →  rgb × (1 + shadows)
//! otherwise untouched
//! ```
//!
//! The two classes are disjoint and classification happens on the input
//! pixel, so the shadow pass never sees the highlight pass's output.

use crate::error::TransformError;
use crate::grading::blend;
use crate::image::PhotoImage;

/// Pixels brighter than this are highlights.
pub const HIGHLIGHT_THRESHOLD: f64 = 150.0;
/// Pixels darker than this are shadows.
pub const SHADOW_THRESHOLD: f64 = 100.0;

#[inline]
fn luminance(px: &[u8]) -> f64 {
    0.299 * px[0] as f64 + 0.587 * px[1] as f64 + 0.114 * px[2] as f64
}

/// Lift or pull the shadow and highlight bands independently.
/// Both amounts at 0.0 return an exact copy.
pub fn shadows_highlights(
    image: &PhotoImage,
    shadows: f64,
    highlights: f64,
) -> Result<PhotoImage, TransformError> {
    image.validate()?;
    for (name, value) in [("shadows", shadows), ("highlights", highlights)] {
        if !value.is_finite() {
            return Err(TransformError::InvalidFactor { name, value });
        }
    }

    let mut out = image.clone();
    if shadows == 0.0 && highlights == 0.0 {
        return Ok(out);
    }

    let highlight_gain = 1.0 + highlights;
    let shadow_gain = 1.0 + shadows;
    for px in out.pixels_mut() {
        let l = luminance(px);
        let gain = if l > HIGHLIGHT_THRESHOLD && highlights != 0.0 {
            highlight_gain
        } else if l < SHADOW_THRESHOLD && shadows != 0.0 {
            shadow_gain
        } else {
            continue;
        };
        for c in &mut px[..3] {
            *c = blend(0.0, *c, gain);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ChannelLayout;

    /// One dark, one mid, one bright pixel.
    fn bands() -> PhotoImage {
        PhotoImage::from_raw(
            3,
            1,
            ChannelLayout::Rgb,
            vec![40, 50, 60, 120, 125, 130, 200, 190, 180],
        )
    }

    #[test]
    fn test_zero_amounts_are_identity() {
        let image = bands();
        assert_eq!(shadows_highlights(&image, 0.0, 0.0).unwrap(), image);
    }

    #[test]
    fn test_highlights_only_leaves_darker_pixels() {
        let image = bands();
        let out = shadows_highlights(&image, 0.0, 0.2).unwrap();
        assert_eq!(out.data[..6], image.data[..6]);
        assert_eq!(out.data[6..], [240, 228, 216]);
    }

    #[test]
    fn test_shadows_only_touches_dark_band() {
        let image = bands();
        let out = shadows_highlights(&image, 0.1, 0.0).unwrap();
        assert_eq!(out.data[..3], [44, 55, 66]);
        assert_eq!(out.data[3..], image.data[3..]);
    }

    #[test]
    fn test_negative_amounts_darken_and_clamp() {
        let image = bands();
        let out = shadows_highlights(&image, -2.0, -0.5).unwrap();
        assert_eq!(out.data[..3], [0, 0, 0]);
        assert_eq!(out.data[3..6], image.data[3..6]);
        assert_eq!(out.data[6..], [100, 95, 90]);
    }

    #[test]
    fn test_masks_come_from_input_luminance() {
        // A dark pixel lifted past 150 must not be treated as a highlight.
        let image = PhotoImage::from_raw(1, 1, ChannelLayout::Rgb, vec![90, 90, 90]);
        let out = shadows_highlights(&image, 0.9, -0.5).unwrap();
        assert_eq!(out.data, vec![171, 171, 171]);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let greys = PhotoImage::from_raw(
            4,
            1,
            ChannelLayout::Rgb,
            vec![99, 99, 99, 100, 100, 100, 150, 150, 150, 151, 151, 151],
        );
        let lifted = shadows_highlights(&greys, 0.2, 0.2).unwrap();
        assert_eq!(lifted.data[..3], [118, 118, 118]);
        assert_eq!(lifted.data[3..9], greys.data[3..9]);
        assert_eq!(lifted.data[9..], [181, 181, 181]);

        let highlights_only = shadows_highlights(&greys, 0.0, 0.2).unwrap();
        assert_eq!(highlights_only.data[..9], greys.data[..9]);
        let shadows_only = shadows_highlights(&greys, 0.2, 0.0).unwrap();
        assert_eq!(shadows_only.data[3..], greys.data[3..]);
    }

    #[test]
    fn test_alpha_untouched() {
        let image = PhotoImage::from_raw(1, 1, ChannelLayout::Rgba, vec![200, 200, 200, 12]);
        let out = shadows_highlights(&image, 0.0, 0.1).unwrap();
        assert_eq!(out.data[3], 12);
    }

    #[test]
    fn test_non_finite_amount_rejected() {
        assert!(shadows_highlights(&bands(), f64::NAN, 0.0).is_err());
    }
}
