//! Savor Core: colour and tone enhancement for food photography.
//!
//! This crate contains the adjustment resolver, the pixel operators, the
//! automatic enhancement heuristic and the end-to-end pipeline. No UI,
//! network client or packaging concerns live here.

pub mod adjust;
pub mod analysis;
pub mod config;
pub mod error;
pub mod grading;
pub mod image;
pub mod pipeline;
pub mod scopes;

// Re-exports for convenience.
pub use adjust::params::{AdjustmentFactors, FactorOverrides, ManualAdjustments};
pub use adjust::presets::{Audience, Category};
pub use adjust::resolve::resolve;
pub use analysis::{Advisory, ContentAnalyzer, FixedAnalyzer, NoAnalyzer};
pub use config::PipelineConfig;
pub use error::{AnalysisError, EnhanceError, TransformError, UnknownLabel};
pub use grading::auto_enhance::{AutoMode, auto_adjust};
pub use crate::image::{ChannelLayout, PhotoImage};
pub use pipeline::report::EnhancementReport;
pub use pipeline::{BatchItem, BatchResult, EnhanceRequest, Enhanced, EnhancementPipeline};
