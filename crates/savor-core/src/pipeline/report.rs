//! Per-run enhancement report.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::adjust::params::AdjustmentFactors;
use crate::adjust::presets::{Audience, Category};
use crate::analysis::Advisory;
use crate::grading::auto_enhance::AutoMode;
use crate::grading::{AppliedStep, FailedStep};
use crate::pipeline::preprocess::Preprocessing;

/// What the pipeline did to one photo. Returned to the caller, never kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancementReport {
    pub category: Category,
    pub audience: Audience,
    /// Advisory used by the resolver.
    pub advisory: Advisory,
    /// Set when the base factors came from the automatic heuristic.
    pub auto_mode: Option<AutoMode>,
    /// Final factors handed to the operator chain.
    pub factors: AdjustmentFactors,
    /// Applied operators, in application order.
    pub steps: Vec<AppliedStep>,
    /// Operators that failed and were skipped.
    pub skipped: Vec<FailedStep>,
    pub preprocessing: Preprocessing,
}

impl EnhancementReport {
    /// One-line summary of applied steps.
    pub fn summary(&self) -> String {
        if self.steps.is_empty() {
            return "no adjustments".to_string();
        }
        self.steps
            .iter()
            .map(|s| s.description.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Markdown explanation suitable for showing next to the result.
    pub fn explanation(&self) -> String {
        let f = &self.factors;
        let mut out = String::new();
        let _ = writeln!(out, "### Enhancement complete\n");
        let _ = writeln!(out, "**Business**: {}", self.category);
        let _ = writeln!(out, "**Audience**: {}\n", self.audience);

        let _ = writeln!(out, "#### Factors");
        let _ = writeln!(out, "- Brightness: ×{:.2}", f.brightness);
        let _ = writeln!(out, "- Saturation: ×{:.2}", f.saturation);
        let _ = writeln!(out, "- Contrast: ×{:.2}", f.contrast);
        let _ = writeln!(out, "- Warmth: ×{:.2}", f.warmth);
        let _ = writeln!(out, "- Sharpness: ×{:.2}", f.sharpness);
        let _ = writeln!(out, "- Shadows: {:+.2}", f.shadows);
        let _ = writeln!(out, "- Highlights: {:+.2}\n", f.highlights);

        let _ = writeln!(out, "#### Applied");
        let _ = writeln!(out, "{}", self.summary());
        for skipped in &self.skipped {
            let _ = writeln!(out, "- skipped {}: {}", skipped.kind, skipped.reason);
        }

        let _ = writeln!(out, "\n#### Style");
        let _ = writeln!(out, "- {}: {}", self.category, self.category.style_note());
        let _ = writeln!(out, "- {}: {}", self.audience, self.audience.style_note());

        if let Some(mode) = self.auto_mode {
            let _ = writeln!(out, "\nBase factors chosen automatically ({mode} mode).");
        }
        match self.advisory {
            Advisory::Dark => {
                let _ = writeln!(out, "Content analysis found the photo dark; lifted brightness and shadows.");
            }
            Advisory::Bright => {
                let _ = writeln!(out, "Content analysis found the photo bright; eased brightness and highlights.");
            }
            Advisory::Neutral | Advisory::Unavailable => {}
        }
        if self.preprocessing.resized() {
            let (w, h) = self.preprocessing.bounded;
            let _ = writeln!(out, "Resized to {w}x{h} before enhancement.");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::StepKind;
    use crate::image::ChannelLayout;

    fn report() -> EnhancementReport {
        EnhancementReport {
            category: Category::RamenShop,
            audience: Audience::Students,
            advisory: Advisory::Dark,
            auto_mode: None,
            factors: AdjustmentFactors {
                brightness: 1.2,
                ..AdjustmentFactors::default()
            },
            steps: vec![AppliedStep {
                kind: StepKind::Brightness,
                description: "brightness ×1.20".into(),
            }],
            skipped: vec![],
            preprocessing: Preprocessing {
                original: (3000, 1500),
                bounded: (2048, 1024),
                layout: ChannelLayout::Rgb,
            },
        }
    }

    #[test]
    fn test_summary_lists_steps() {
        assert_eq!(report().summary(), "brightness ×1.20");
        let empty = EnhancementReport {
            steps: vec![],
            ..report()
        };
        assert_eq!(empty.summary(), "no adjustments");
    }

    #[test]
    fn test_explanation_mentions_context() {
        let text = report().explanation();
        assert!(text.contains("Ramen shop"));
        assert!(text.contains("Brightness: ×1.20"));
        assert!(text.contains("dark"));
        assert!(text.contains("2048x1024"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["category"], "ramen-shop");
        assert_eq!(json["advisory"], "dark");
        assert_eq!(json["steps"][0]["kind"], "brightness");
    }
}
