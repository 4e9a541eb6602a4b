//! Pipeline configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest side allowed before the pre-processing downscale.
const DEFAULT_MAX_DIMENSION: u32 = 2048;
/// Upper bound on the content-analysis call.
const DEFAULT_ANALYSIS_TIMEOUT_MS: u64 = 10_000;
/// Inputs above this size are processed but logged.
const DEFAULT_LARGE_INPUT_WARN_BYTES: usize = 4 * 1024 * 1024;

/// Runtime configuration for [`crate::EnhancementPipeline`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Longest side in pixels; larger inputs are downscaled.
    pub max_dimension: u32,
    /// Whether to consult the content analyzer at all.
    pub analysis_enabled: bool,
    /// Time budget for the content analyzer, in milliseconds.
    pub analysis_timeout_ms: u64,
    /// Encoded input size that triggers a warning.
    pub large_input_warn_bytes: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_dimension: env_parse("SAVOR_MAX_DIMENSION")
                .filter(|&d: &u32| d > 0)
                .unwrap_or(DEFAULT_MAX_DIMENSION),
            analysis_enabled: std::env::var("SAVOR_DISABLE_ANALYSIS").is_err(),
            analysis_timeout_ms: env_parse("SAVOR_ANALYSIS_TIMEOUT_MS")
                .unwrap_or(DEFAULT_ANALYSIS_TIMEOUT_MS),
            large_input_warn_bytes: DEFAULT_LARGE_INPUT_WARN_BYTES,
        }
    }
}

impl PipelineConfig {
    /// Parse a JSON document; absent fields take their defaults.
    /// A zero `max_dimension` is rejected.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        if config.max_dimension == 0 {
            return Err(serde::de::Error::custom("max_dimension must be at least 1"));
        }
        Ok(config)
    }

    /// Analyzer time budget as a `Duration`.
    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_millis(self.analysis_timeout_ms)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}
