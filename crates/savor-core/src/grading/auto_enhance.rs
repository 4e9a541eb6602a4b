//! Automatic enhancement for food photos.
//!
//! Picks brightness/contrast/saturation from the mean luminance of the photo
//! and then biases the result slightly warm, which reads as more appetizing.
//!
//! # Algorithm
//! 1. Build the luma histogram of the greyscale-converted photo
//! 2. `avg = Σ(i · hist[i]) / (pixels · 255)`
//! 3. Gentle mode ignores `avg` and returns near-neutral factors
//! 4. Standard mode picks one of three luminance bands and adds a 3%
//!    histogram stretch plus a light unsharp mask (see [`AutoMode::passes`])

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::adjust::params::AdjustmentFactors;
use crate::grading::AutoPasses;
use crate::grading::filters::AUTOCONTRAST_CUTOFF;
use crate::image::PhotoImage;
use crate::scopes::histogram;

/// Below this mean luma a photo counts as dark.
const DARK_BAND: f64 = 0.3;
/// Above this mean luma a photo counts as bright.
const BRIGHT_BAND: f64 = 0.7;

/// Automatic enhancement profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutoMode {
    /// Barely visible correction; fidelity first.
    Gentle,
    /// Brightness chosen by luminance band.
    Standard,
}

impl AutoMode {
    /// Passes the chain runs in addition to the factor stages.
    pub fn passes(self) -> AutoPasses {
        match self {
            Self::Gentle => AutoPasses::default(),
            Self::Standard => AutoPasses {
                autocontrast_cutoff: Some(AUTOCONTRAST_CUTOFF),
                unsharp: true,
            },
        }
    }
}

impl fmt::Display for AutoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gentle => write!(f, "gentle"),
            Self::Standard => write!(f, "standard"),
        }
    }
}

impl FromStr for AutoMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gentle" => Ok(Self::Gentle),
            "standard" => Ok(Self::Standard),
            other => Err(format!("unknown auto mode: {other:?}")),
        }
    }
}

/// Choose base factors from image content.
///
/// Returns an `AdjustmentFactors` with shadows/highlights at 0.0; the
/// category and audience presets are applied on top by the resolver.
pub fn auto_adjust(image: &PhotoImage, mode: AutoMode) -> AdjustmentFactors {
    match mode {
        AutoMode::Gentle => AdjustmentFactors {
            brightness: 1.01,
            contrast: 1.01,
            saturation: 1.01,
            sharpness: 1.0,
            warmth: 1.01,
            ..AdjustmentFactors::default()
        },
        AutoMode::Standard => {
            let avg = histogram::compute(image).average_luma();
            let (brightness, contrast, saturation) = if avg < DARK_BAND {
                (1.15, 1.05, 1.05)
            } else if avg > BRIGHT_BAND {
                (0.95, 1.02, 1.05)
            } else {
                (1.02, 1.05, 1.05)
            };
            tracing::debug!("auto enhance: mean luma {avg:.3} -> brightness {brightness}");

            AdjustmentFactors {
                brightness,
                contrast,
                saturation,
                sharpness: 1.02,
                warmth: 1.03,
                ..AdjustmentFactors::default()
            }
        }
    }
}
