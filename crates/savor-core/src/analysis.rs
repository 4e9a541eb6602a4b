//! Content-analysis seam and the advisory adapter.
//!
//! The analyzer is an external collaborator that looks at the photo and
//! returns free text. The pipeline never trusts that text directly: it is
//! classified once into an [`Advisory`] and only that tag reaches the
//! resolver.

use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::error::AnalysisError;

/// Fixed instruction sent with every analysis request.
pub const ANALYSIS_PROMPT: &str = "\
Analyze this restaurant food photograph and answer briefly:
1. The type of dish and its notable features.
2. The current colour tone and brightness (say whether it looks dark or bright).
3. What would make it more appealing on social media.
4. Suggested shooting angle or composition.";

/// Structured brightness hint derived from the analyzer output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Advisory {
    /// The photo reads as under-exposed.
    Dark,
    /// The photo reads as over-exposed.
    Bright,
    /// Analysis ran but said nothing about exposure.
    Neutral,
    /// No analysis result (disabled, failed or timed out).
    #[default]
    Unavailable,
}

/// Japanese phrases that mark a dark photo. Matched anywhere in the text;
/// the noun forms (暗さ, 明るさ) do not match.
const DARK_PHRASES: &[&str] = &["暗い"];
/// Japanese phrases that mark a bright photo.
const BRIGHT_PHRASES: &[&str] = &["明るい"];
/// English words that mark a dark photo. Matched as whole words only, so
/// "darkness" does not count.
const DARK_WORDS: &[&str] = &["dark"];
/// English words that mark a bright photo. "brightness" does not count.
const BRIGHT_WORDS: &[&str] = &["bright"];

impl Advisory {
    /// Classify analyzer text. When both a dark and a bright keyword
    /// appear, `Dark` wins.
    pub fn classify(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let mentions = |phrases: &[&str], english: &[&str]| {
            phrases.iter().any(|p| lowered.contains(p))
                || words.iter().any(|w| english.contains(w))
        };

        if mentions(DARK_PHRASES, DARK_WORDS) {
            Self::Dark
        } else if mentions(BRIGHT_PHRASES, BRIGHT_WORDS) {
            Self::Bright
        } else {
            Self::Neutral
        }
    }

    /// Collapse an analyzer outcome into an advisory. Errors degrade to
    /// `Unavailable`.
    pub fn from_outcome(outcome: &Result<String, AnalysisError>) -> Self {
        match outcome {
            Ok(text) => Self::classify(text),
            Err(_) => Self::Unavailable,
        }
    }
}

/// Something that can describe a photo in free text.
///
/// Implementations own their transport, credentials and retries. The
/// pipeline bounds each call with its own timeout.
pub trait ContentAnalyzer: Send + Sync {
    fn analyze(
        &self,
        png: &[u8],
        prompt: &str,
    ) -> impl Future<Output = Result<String, AnalysisError>> + Send;
}

/// Analyzer that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAnalyzer;

impl ContentAnalyzer for NoAnalyzer {
    async fn analyze(&self, _png: &[u8], _prompt: &str) -> Result<String, AnalysisError> {
        Err(AnalysisError::Disabled)
    }
}

/// Analyzer that always answers with the same text.
#[derive(Debug, Clone, Default)]
pub struct FixedAnalyzer(pub String);

impl FixedAnalyzer {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl ContentAnalyzer for FixedAnalyzer {
    async fn analyze(&self, _png: &[u8], _prompt: &str) -> Result<String, AnalysisError> {
        Ok(self.0.clone())
    }
}
