//! Colour temperature via red/blue channel scaling.
//!
//! Warming boosts the red plane and dims the blue plane; cooling does the
//! opposite. Both scales are capped so that a large warmth value cannot
//! blow out a channel:
//!
//! ```text
//! warmth > 1:  red × min(warmth, 1.3)       blue × max(2 − warmth, 0.8)
//! warmth < 1:  blue × min(2 − warmth, 1.3)  red × max(warmth, 0.8)
//! ```
//!
//! Green and alpha are never modified.

use crate::error::TransformError;
use crate::grading::{begin, blend};
use crate::image::PhotoImage;

/// Upper cap on the boosted channel.
const MAX_BOOST: f64 = 1.3;
/// Lower cap on the dimmed channel.
const MIN_CUT: f64 = 0.8;

/// `(red_scale, blue_scale)` for a warmth factor.
pub fn channel_scales(warmth: f64) -> (f64, f64) {
    if warmth > 1.0 {
        (warmth.min(MAX_BOOST), (2.0 - warmth).max(MIN_CUT))
    } else if warmth < 1.0 {
        (warmth.max(MIN_CUT), (2.0 - warmth).min(MAX_BOOST))
    } else {
        (1.0, 1.0)
    }
}

/// Shift the red/blue balance. `warmth = 1.0` returns an exact copy.
pub fn color_temperature(image: &PhotoImage, warmth: f64) -> Result<PhotoImage, TransformError> {
    let mut out = begin(image, "warmth", warmth)?;
    if warmth == 1.0 {
        return Ok(out);
    }

    let (red, blue) = channel_scales(warmth);
    for px in out.pixels_mut() {
        px[0] = blend(0.0, px[0], red);
        px[2] = blend(0.0, px[2], blue);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ChannelLayout;

    const EPSILON: f64 = 1e-12;

    fn sample() -> PhotoImage {
        PhotoImage::from_raw(
            2,
            1,
            ChannelLayout::Rgba,
            vec![100, 120, 141, 255, 250, 10, 200, 30],
        )
    }

    #[test]
    fn test_warmth_one_is_identity() {
        let image = sample();
        assert_eq!(color_temperature(&image, 1.0).unwrap(), image);
    }

    #[test]
    fn test_warm_boosts_red_and_cuts_blue() {
        let out = color_temperature(&sample(), 1.1).unwrap();
        assert_eq!(out.data[0], 110);
        assert_eq!(out.data[1], 120, "green must not change");
        assert_eq!(out.data[2], 126);
        assert_eq!(out.data[3], 255, "alpha must not change");
        assert_eq!(out.data[4], 255, "red clamps at 255");
        assert_eq!(out.data[7], 30);
    }

    #[test]
    fn test_cool_boosts_blue_and_cuts_red() {
        let out = color_temperature(&sample(), 0.9).unwrap();
        assert_eq!(out.data[0], 90);
        assert_eq!(out.data[2], 155);
        assert_eq!(out.data[1], 120);
    }

    #[test]
    fn test_scales_are_capped() {
        let (r, b) = channel_scales(2.5);
        assert!((r - 1.3).abs() < EPSILON);
        assert!((b - 0.8).abs() < EPSILON);

        let (r, b) = channel_scales(0.2);
        assert!((r - 0.8).abs() < EPSILON);
        assert!((b - 1.3).abs() < EPSILON);

        assert_eq!(channel_scales(1.0), (1.0, 1.0));
    }

    #[test]
    fn test_rgb_layout_is_preserved() {
        let image = PhotoImage::from_raw(1, 2, ChannelLayout::Rgb, vec![10, 20, 30, 40, 50, 60]);
        let out = color_temperature(&image, 1.05).unwrap();
        assert_eq!(out.layout, ChannelLayout::Rgb);
        assert_eq!(out.data.len(), 6);
        assert_eq!((out.width, out.height), (1, 2));
    }
}
