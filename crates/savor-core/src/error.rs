use std::time::Duration;

/// Failures that cross the pipeline boundary.
#[derive(Debug, thiserror::Error)]
pub enum EnhanceError {
    #[error("input is not a supported raster image: {0}")]
    Decode(#[source] ::image::ImageError),
    #[error("could not produce output image ({stage}): {source}")]
    Processing {
        stage: &'static str,
        #[source]
        source: ::image::ImageError,
    },
    #[error("enhancement worker did not finish: {0}")]
    Worker(#[source] tokio::task::JoinError),
}

/// A single operator could not run. The pipeline keeps the pre-step image.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("malformed pixel buffer: expected {expected} bytes, found {actual}")]
    MalformedBuffer { expected: usize, actual: usize },
    #[error("invalid {name} factor: {value}")]
    InvalidFactor { name: &'static str, value: f64 },
}

/// The content analyzer produced nothing usable. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("content analysis is disabled")]
    Disabled,
    #[error("content analysis unavailable: {0}")]
    Unavailable(String),
    #[error("content analysis timed out after {0:?}")]
    TimedOut(Duration),
}

/// A category or audience label that is not part of the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} label: {label:?}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub label: String,
}
