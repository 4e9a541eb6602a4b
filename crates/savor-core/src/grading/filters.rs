//! Histogram stretch and unsharp mask used by the standard automatic mode.

use crate::error::TransformError;
use crate::image::PhotoImage;
use crate::scopes::histogram;

/// Percentage clipped from each end of every channel histogram.
pub const AUTOCONTRAST_CUTOFF: f64 = 3.0;
/// Gaussian sigma of the unsharp reference.
pub const UNSHARP_RADIUS: f32 = 0.5;
/// Strength of the unsharp correction, in percent of the difference.
pub const UNSHARP_PERCENT: f64 = 110.0;
/// Differences below this many levels are left alone.
pub const UNSHARP_THRESHOLD: i32 = 5;

/// Per-channel histogram stretch.
///
/// `cutoff` percent of the pixels is discarded from the dark and the bright
/// end of each colour channel; the remaining range is mapped linearly onto
/// 0..=255. Channels that collapse to a single level are left unchanged.
pub fn autocontrast(image: &PhotoImage, cutoff: f64) -> Result<PhotoImage, TransformError> {
    image.validate()?;
    if !cutoff.is_finite() || !(0.0..50.0).contains(&cutoff) {
        return Err(TransformError::InvalidFactor {
            name: "autocontrast cutoff",
            value: cutoff,
        });
    }

    let hist = histogram::compute(image);
    let luts: [[u8; 256]; 3] = std::array::from_fn(|c| stretch_lut(&hist.bins[c], cutoff));

    let mut out = image.clone();
    for px in out.pixels_mut() {
        for (c, lut) in luts.iter().enumerate() {
            px[c] = lut[px[c] as usize];
        }
    }
    Ok(out)
}

/// Lookup table for one channel.
fn stretch_lut(bins: &[u64], cutoff: f64) -> [u8; 256] {
    let mut identity = [0u8; 256];
    for (i, v) in identity.iter_mut().enumerate() {
        *v = i as u8;
    }

    let mut h: Vec<u64> = bins.to_vec();
    let total: u64 = h.iter().sum();
    let cut = (total as f64 * cutoff / 100.0).floor() as u64;
    clip(h.iter_mut(), cut);
    clip(h.iter_mut().rev(), cut);

    let lo = h.iter().position(|&n| n > 0);
    let hi = h.iter().rposition(|&n| n > 0);
    let (lo, hi) = match (lo, hi) {
        (Some(lo), Some(hi)) if hi > lo => (lo as i64, hi as i64),
        _ => return identity,
    };

    let mut lut = [0u8; 256];
    for (i, v) in lut.iter_mut().enumerate() {
        let stretched = (i as i64 - lo) as f64 * 255.0 / (hi - lo) as f64;
        *v = stretched.clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Remove `cut` samples from the bins in iteration order.
fn clip<'a>(bins: impl Iterator<Item = &'a mut u64>, mut cut: u64) {
    for n in bins {
        if cut == 0 {
            break;
        }
        let taken = cut.min(*n);
        *n -= taken;
        cut -= taken;
    }
}

/// Light unsharp mask: `v + percent% × (v − blur(v))` wherever the
/// difference reaches `threshold`. Alpha is never touched.
pub fn unsharp_mask(
    image: &PhotoImage,
    radius: f32,
    percent: f64,
    threshold: i32,
) -> Result<PhotoImage, TransformError> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(TransformError::InvalidFactor {
            name: "unsharp radius",
            value: radius as f64,
        });
    }
    let blurred = PhotoImage::from_dynamic(image.to_dynamic()?.blur(radius));

    let gain = percent / 100.0;
    let mut out = image.clone();
    for (px, reference) in out.pixels_mut().zip(blurred.pixels()) {
        for c in 0..3 {
            let diff = px[c] as i32 - reference[c] as i32;
            if diff.abs() >= threshold {
                px[c] = (px[c] as f64 + gain * diff as f64).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
    Ok(out)
}
