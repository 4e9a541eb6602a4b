//! Grading tools: pixel operators, the fixed operator chain, and
//! automatic adjustments.
//!
//! Chain order (each stage changes the statistics the next one sees):
//!
//! ```text
//! [autocontrast] → brightness → contrast → saturation → sharpness
//!     → [unsharp mask] → temperature → shadows/highlights
//! ```
//!
//! Bracketed stages run only when the standard automatic mode asks for them.

pub mod auto_enhance;
pub mod enhance;
pub mod filters;
pub mod temperature;
pub mod tone;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::adjust::params::AdjustmentFactors;
use crate::error::TransformError;
use crate::image::PhotoImage;

/// Blend `value` against `degenerate` and saturate to 8 bits.
///
/// ```text
/// out = trunc(clamp(degenerate + factor × (value − degenerate), 0, 255))
/// ```
#[inline]
pub(crate) fn blend(degenerate: f64, value: u8, factor: f64) -> u8 {
    (degenerate + factor * (value as f64 - degenerate)).clamp(0.0, 255.0) as u8
}

/// Validate input and factor, then hand back a working copy.
pub(crate) fn begin(
    image: &PhotoImage,
    name: &'static str,
    factor: f64,
) -> Result<PhotoImage, TransformError> {
    image.validate()?;
    if !factor.is_finite() || factor <= 0.0 {
        return Err(TransformError::InvalidFactor {
            name,
            value: factor,
        });
    }
    Ok(image.clone())
}

/// One stage of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    Autocontrast,
    Brightness,
    Contrast,
    Saturation,
    Sharpness,
    UnsharpMask,
    Temperature,
    ShadowsHighlights,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Autocontrast => "autocontrast",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::Sharpness => "sharpness",
            Self::UnsharpMask => "unsharp mask",
            Self::Temperature => "colour temperature",
            Self::ShadowsHighlights => "shadows/highlights",
        };
        f.write_str(name)
    }
}

/// A stage that ran and changed the photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedStep {
    pub kind: StepKind,
    pub description: String,
}

/// A stage that failed; the photo kept its pre-stage pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedStep {
    pub kind: StepKind,
    pub reason: String,
}

/// Extra passes outside the factor set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoPasses {
    /// Histogram stretch, clipping this percentage at each end.
    pub autocontrast_cutoff: Option<f64>,
    /// Light unsharp mask after the sharpness stage, when sharpness > 1.
    pub unsharp: bool,
}

/// Result of running the full chain.
#[derive(Debug, Clone)]
pub struct ChainOutcome {
    pub image: PhotoImage,
    pub applied: Vec<AppliedStep>,
    pub failed: Vec<FailedStep>,
}

/// Apply every non-neutral stage in the fixed order.
///
/// Stages are independent: a failing stage is logged and recorded, the
/// image keeps its pre-stage pixels, and the remaining stages still run.
pub fn apply_chain(image: PhotoImage, factors: &AdjustmentFactors) -> ChainOutcome {
    apply_chain_with(image, factors, AutoPasses::default())
}

/// [`apply_chain`] plus the automatic-mode passes.
pub fn apply_chain_with(
    image: PhotoImage,
    factors: &AdjustmentFactors,
    passes: AutoPasses,
) -> ChainOutcome {
    let mut outcome = ChainOutcome {
        image,
        applied: Vec::new(),
        failed: Vec::new(),
    };

    let f = factors;
    if let Some(cutoff) = passes.autocontrast_cutoff {
        outcome.run(StepKind::Autocontrast, format!("autocontrast (cutoff {cutoff}%)"), |img| {
            filters::autocontrast(img, cutoff)
        });
    }
    if f.brightness != 1.0 {
        outcome.run(StepKind::Brightness, format!("brightness ×{:.2}", f.brightness), |img| {
            enhance::brightness(img, f.brightness)
        });
    }
    if f.contrast != 1.0 {
        outcome.run(StepKind::Contrast, format!("contrast ×{:.2}", f.contrast), |img| {
            enhance::contrast(img, f.contrast)
        });
    }
    if f.saturation != 1.0 {
        outcome.run(StepKind::Saturation, format!("saturation ×{:.2}", f.saturation), |img| {
            enhance::saturation(img, f.saturation)
        });
    }
    if f.sharpness != 1.0 {
        outcome.run(StepKind::Sharpness, format!("sharpness ×{:.2}", f.sharpness), |img| {
            enhance::sharpness(img, f.sharpness)
        });
    }
    if passes.unsharp && f.sharpness > 1.0 {
        let description = format!(
            "unsharp mask (radius {}, {}%, threshold {})",
            filters::UNSHARP_RADIUS,
            filters::UNSHARP_PERCENT,
            filters::UNSHARP_THRESHOLD
        );
        outcome.run(StepKind::UnsharpMask, description, |img| {
            filters::unsharp_mask(
                img,
                filters::UNSHARP_RADIUS,
                filters::UNSHARP_PERCENT,
                filters::UNSHARP_THRESHOLD,
            )
        });
    }
    if f.warmth != 1.0 {
        let (red, blue) = temperature::channel_scales(f.warmth);
        let description = format!(
            "colour temperature ×{:.2} (red ×{red:.2}, blue ×{blue:.2})",
            f.warmth
        );
        outcome.run(StepKind::Temperature, description, |img| {
            temperature::color_temperature(img, f.warmth)
        });
    }
    if f.shadows != 0.0 || f.highlights != 0.0 {
        let description = format!(
            "shadows/highlights (shadows {:+.2}, highlights {:+.2})",
            f.shadows, f.highlights
        );
        outcome.run(StepKind::ShadowsHighlights, description, |img| {
            tone::shadows_highlights(img, f.shadows, f.highlights)
        });
    }

    outcome
}

impl ChainOutcome {
    fn run(
        &mut self,
        kind: StepKind,
        description: String,
        op: impl FnOnce(&PhotoImage) -> Result<PhotoImage, TransformError>,
    ) {
        match op(&self.image) {
            Ok(next) => {
                tracing::debug!("applied {description}");
                self.image = next;
                self.applied.push(AppliedStep { kind, description });
            }
            Err(e) => {
                tracing::warn!("{kind} step failed, keeping previous pixels: {e}");
                self.failed.push(FailedStep {
                    kind,
                    reason: e.to_string(),
                });
            }
        }
    }
}
