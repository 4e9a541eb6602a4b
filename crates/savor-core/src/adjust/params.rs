//! The factor set that defines an enhancement.
//!
//! `AdjustmentFactors` is the single source of truth handed from the
//! resolver to the operators. Nothing else carries intent between them.

use serde::{Deserialize, Serialize};

/// Every operator reads here. Immutable once handed to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentFactors {
    /// Brightness multiplier. 1.0 = neutral.
    pub brightness: f64,
    /// Contrast multiplier around the mean luma. 1.0 = neutral.
    pub contrast: f64,
    /// Saturation multiplier. 1.0 = neutral.
    pub saturation: f64,
    /// Sharpness multiplier. 1.0 = neutral.
    pub sharpness: f64,
    /// Red/blue balance. 1.0 = neutral, above warms, below cools.
    pub warmth: f64,
    /// Additive shadow lift, roughly −0.2..0.2. 0.0 = neutral.
    pub shadows: f64,
    /// Additive highlight lift, roughly −0.2..0.2. 0.0 = neutral.
    pub highlights: f64,
}

impl Default for AdjustmentFactors {
    /// Produces an identity (no-op) enhancement.
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            sharpness: 1.0,
            warmth: 1.0,
            shadows: 0.0,
            highlights: 0.0,
        }
    }
}

impl AdjustmentFactors {
    /// True when every factor sits exactly at its neutral value.
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

/// A partial factor set. Multiplicative keys multiply, additive keys add.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharpness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warmth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadows: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<f64>,
}

impl FactorOverrides {
    /// No overrides at all.
    pub const NONE: Self = Self {
        brightness: None,
        contrast: None,
        saturation: None,
        sharpness: None,
        warmth: None,
        shadows: None,
        highlights: None,
    };

    /// Fold these overrides into a running factor set.
    pub fn compose_into(&self, factors: &mut AdjustmentFactors) {
        fn mul(target: &mut f64, by: Option<f64>) {
            if let Some(v) = by {
                *target *= v;
            }
        }
        fn add(target: &mut f64, by: Option<f64>) {
            if let Some(v) = by {
                *target += v;
            }
        }

        mul(&mut factors.brightness, self.brightness);
        mul(&mut factors.contrast, self.contrast);
        mul(&mut factors.saturation, self.saturation);
        mul(&mut factors.sharpness, self.sharpness);
        mul(&mut factors.warmth, self.warmth);
        add(&mut factors.shadows, self.shadows);
        add(&mut factors.highlights, self.highlights);
    }

    /// True when no key is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// Slider deltas in `[-50, 50]` for the three user-facing controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualAdjustments {
    pub brightness: i32,
    pub saturation: i32,
    pub contrast: i32,
}

impl ManualAdjustments {
    /// Slider range, inclusive on both ends.
    pub const RANGE: std::ops::RangeInclusive<i32> = -50..=50;

    /// Build from raw slider values, clamping out-of-range input.
    pub fn new(brightness: i32, saturation: i32, contrast: i32) -> Self {
        Self {
            brightness: clamp_delta("brightness", brightness),
            saturation: clamp_delta("saturation", saturation),
            contrast: clamp_delta("contrast", contrast),
        }
    }

    /// True when every slider is at zero.
    pub fn is_neutral(&self) -> bool {
        self.brightness == 0 && self.saturation == 0 && self.contrast == 0
    }

    /// Linear mapping onto the base factor set.
    pub fn to_factors(self) -> AdjustmentFactors {
        AdjustmentFactors {
            brightness: delta_to_factor(self.brightness),
            contrast: delta_to_factor(self.contrast),
            saturation: delta_to_factor(self.saturation),
            ..AdjustmentFactors::default()
        }
    }
}

fn clamp_delta(name: &str, value: i32) -> i32 {
    let range = ManualAdjustments::RANGE;
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        tracing::warn!("{name} delta {value} outside [-50, 50], clamped to {clamped}");
    }
    clamped
}

/// `1.0 + delta / 100`; the clamped range keeps the result in `[0.5, 1.5]`.
fn delta_to_factor(delta: i32) -> f64 {
    1.0 + delta as f64 / 100.0
}
