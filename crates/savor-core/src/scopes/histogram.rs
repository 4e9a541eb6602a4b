//! RGB + luminance histogram computation.

use serde::{Deserialize, Serialize};

use crate::image::{PhotoImage, luma8};

/// Histogram data for R, G, B, and luminance channels (256 bins each).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramData {
    /// Bin counts for `[R, G, B, Luma]` channels. Each `Vec` has 256 entries.
    pub bins: [Vec<u64>; 4],
    /// Peak bin value across all channels (for normalization).
    pub peak: u64,
}

/// Index of the luminance channel in [`HistogramData::bins`].
pub const LUMA: usize = 3;

impl HistogramData {
    /// Number of pixels counted.
    pub fn total(&self) -> u64 {
        self.bins[LUMA].iter().sum()
    }

    /// Mean luminance on a 0.0–1.0 scale:
    /// `Σ(i · bins[i]) / (total · 255)`. An empty histogram returns 0.0.
    pub fn average_luma(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let weighted: u64 = self.bins[LUMA]
            .iter()
            .enumerate()
            .map(|(i, &count)| i as u64 * count)
            .sum();
        weighted as f64 / total as f64 / 255.0
    }
}

/// Compute histogram from a photo. Alpha is ignored.
pub fn compute(image: &PhotoImage) -> HistogramData {
    let mut bins: [Vec<u64>; 4] = std::array::from_fn(|_| vec![0; 256]);

    for px in image.pixels() {
        bins[0][px[0] as usize] += 1;
        bins[1][px[1] as usize] += 1;
        bins[2][px[2] as usize] += 1;
        bins[LUMA][luma8(px) as usize] += 1;
    }

    let peak = bins
        .iter()
        .flat_map(|channel| channel.iter().copied())
        .max()
        .unwrap_or(0);

    HistogramData { bins, peak }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ChannelLayout;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_uniform_gray_lands_in_one_bin() {
        let image = PhotoImage::from_raw(4, 4, ChannelLayout::Rgb, vec![128; 48]);
        let hist = compute(&image);
        assert_eq!(hist.bins[LUMA][128], 16);
        assert_eq!(hist.peak, 16);
        assert!((hist.average_luma() - 128.0 / 255.0).abs() < EPSILON);
    }

    #[test]
    fn test_half_black_half_white_average() {
        let mut data = vec![0u8; 2 * 4];
        data.extend(vec![255u8; 2 * 4]);
        let image = PhotoImage::from_raw(2, 2, ChannelLayout::Rgba, data);
        let hist = compute(&image);
        assert_eq!(hist.total(), 4);
        assert!((hist.average_luma() - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_empty_image_average_is_zero() {
        let image = PhotoImage::from_raw(0, 0, ChannelLayout::Rgb, vec![]);
        let hist = compute(&image);
        assert_eq!(hist.peak, 0);
        assert_eq!(hist.average_luma(), 0.0);
    }
}
