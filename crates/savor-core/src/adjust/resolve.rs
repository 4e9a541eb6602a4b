//! Combine sliders, presets and the advisory signal into one factor set.
//!
//! Composition order is fixed: manual base, category, audience, advisory.
//! Every step is a pure function of its inputs.

use crate::adjust::params::{AdjustmentFactors, ManualAdjustments};
use crate::adjust::presets::{Audience, Category};
use crate::analysis::Advisory;

/// Brightness multiplier when the photo is reported as dark.
const DARK_BRIGHTNESS: f64 = 1.08;
/// Shadow lift when the photo is reported as dark.
const DARK_SHADOWS: f64 = 0.1;
/// Brightness multiplier when the photo is reported as bright.
const BRIGHT_BRIGHTNESS: f64 = 0.95;
/// Highlight pull when the photo is reported as bright.
const BRIGHT_HIGHLIGHTS: f64 = -0.05;

/// Resolve the final factors starting from the manual sliders.
pub fn resolve(
    manual: ManualAdjustments,
    category: Category,
    audience: Audience,
    advisory: Advisory,
) -> AdjustmentFactors {
    resolve_from_base(manual.to_factors(), category, audience, advisory)
}

/// Resolve the final factors from an arbitrary base (e.g. auto-enhance).
pub fn resolve_from_base(
    base: AdjustmentFactors,
    category: Category,
    audience: Audience,
    advisory: Advisory,
) -> AdjustmentFactors {
    let mut factors = base;
    category.preset().compose_into(&mut factors);
    audience.preset().compose_into(&mut factors);
    apply_advisory(&mut factors, advisory);

    tracing::debug!(
        "resolved factors for {category} / {audience} ({advisory:?}): {factors:?}"
    );
    factors
}

fn apply_advisory(factors: &mut AdjustmentFactors, advisory: Advisory) {
    match advisory {
        Advisory::Dark => {
            factors.brightness *= DARK_BRIGHTNESS;
            factors.shadows += DARK_SHADOWS;
        }
        Advisory::Bright => {
            factors.brightness *= BRIGHT_BRIGHTNESS;
            factors.highlights += BRIGHT_HIGHLIGHTS;
        }
        Advisory::Neutral | Advisory::Unavailable => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_neutral_inputs_resolve_to_identity() {
        let factors = resolve(
            ManualAdjustments::default(),
            Category::Other,
            Audience::Other,
            Advisory::Unavailable,
        );
        assert!(factors.is_neutral());
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let run = || {
            resolve(
                ManualAdjustments::new(12, -7, 33),
                Category::Yakiniku,
                Audience::Couples,
                Advisory::Dark,
            )
        };
        let a = run();
        let b = run();
        assert_eq!(a, b);
        assert_eq!(a.brightness.to_bits(), b.brightness.to_bits());
    }

    #[test]
    fn test_cafe_then_students_composes_brightness() {
        let factors = resolve(
            ManualAdjustments::default(),
            Category::Cafe,
            Audience::Students,
            Advisory::Unavailable,
        );
        assert!(close(factors.brightness, 1.0815), "{}", factors.brightness);
        assert!(close(factors.saturation, 1.03 * 1.05));
        assert!(close(factors.warmth, 1.02));
        assert!(close(factors.highlights, 0.05));
    }

    #[test]
    fn test_izakaya_families_with_manual_brightness() {
        let factors = resolve(
            ManualAdjustments::new(10, 0, 0),
            Category::Izakaya,
            Audience::Families,
            Advisory::Unavailable,
        );
        assert!(close(factors.brightness, 1.1 * 1.02 * 1.03));
        assert!(close(factors.saturation, 1.071));
        assert!(close(factors.warmth, 1.08 * 1.03));
        assert_eq!(factors.contrast, 1.0);
        assert_eq!(factors.sharpness, 1.0);
    }

    #[test]
    fn test_bar_shadows_are_additive() {
        let factors = resolve(
            ManualAdjustments::default(),
            Category::BarPub,
            Audience::Other,
            Advisory::Dark,
        );
        // −0.1 from the preset, +0.1 from the advisory.
        assert!(close(factors.shadows, 0.0));
        assert!(close(factors.brightness, 1.08));
    }

    #[test]
    fn test_bright_advisory_pulls_highlights() {
        let factors = resolve(
            ManualAdjustments::default(),
            Category::Other,
            Audience::Other,
            Advisory::Bright,
        );
        assert!(close(factors.brightness, 0.95));
        assert!(close(factors.highlights, -0.05));
        assert_eq!(factors.shadows, 0.0);
    }

    #[test]
    fn test_neutral_advisory_is_noop() {
        let manual = ManualAdjustments::new(-20, 15, 5);
        let a = resolve(manual, Category::French, Audience::Seniors, Advisory::Neutral);
        let b = resolve(manual, Category::French, Audience::Seniors, Advisory::Unavailable);
        assert_eq!(a, b);
    }

    #[test]
    fn test_extreme_inputs_keep_multiplicative_factors_positive() {
        for category in Category::all() {
            for audience in Audience::all() {
                for advisory in [Advisory::Dark, Advisory::Bright] {
                    let f = resolve(ManualAdjustments::new(-50, -50, -50), *category, *audience, advisory);
                    for v in [f.brightness, f.contrast, f.saturation, f.sharpness, f.warmth] {
                        assert!(v > 0.0);
                    }
                }
            }
        }
    }
}
