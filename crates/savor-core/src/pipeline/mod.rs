//! End-to-end enhancement: decode → bound → analyze → resolve → grade → encode.
//!
//! The pipeline is an explicitly constructed value. It holds its
//! configuration and analyzer and nothing else, so one instance can serve
//! any number of independent requests.

pub mod preprocess;
pub mod report;

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};

use crate::adjust::params::{AdjustmentFactors, ManualAdjustments};
use crate::adjust::presets::{Audience, Category};
use crate::adjust::resolve::resolve_from_base;
use crate::analysis::{ANALYSIS_PROMPT, Advisory, ContentAnalyzer, NoAnalyzer};
use crate::config::PipelineConfig;
use crate::error::{AnalysisError, EnhanceError};
use crate::grading::{self, AppliedStep, FailedStep, auto_enhance};
use crate::grading::auto_enhance::AutoMode;
use crate::image::PhotoImage;
use report::EnhancementReport;

/// Everything the caller decides about one photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceRequest {
    pub category: Category,
    pub audience: Audience,
    pub manual: ManualAdjustments,
    /// Automatic base factors, used only when every manual slider is zero.
    pub auto_mode: Option<AutoMode>,
}

impl EnhanceRequest {
    pub fn new(category: Category, audience: Audience) -> Self {
        Self {
            category,
            audience,
            manual: ManualAdjustments::default(),
            auto_mode: None,
        }
    }

    pub fn with_manual(mut self, manual: ManualAdjustments) -> Self {
        self.manual = manual;
        self
    }

    pub fn with_auto(mut self, mode: AutoMode) -> Self {
        self.auto_mode = Some(mode);
        self
    }
}

/// Enhanced PNG plus the report describing it.
#[derive(Debug, Clone)]
pub struct Enhanced {
    pub png: Vec<u8>,
    pub report: EnhancementReport,
}

/// One named input of a batch.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Result for one batch input, in input order.
#[derive(Debug)]
pub struct BatchResult {
    pub name: String,
    pub result: Result<Enhanced, EnhanceError>,
}

/// The enhancement pipeline.
pub struct EnhancementPipeline<A = NoAnalyzer> {
    config: PipelineConfig,
    analyzer: A,
}

impl EnhancementPipeline<NoAnalyzer> {
    /// Pipeline that never consults a content analyzer.
    pub fn without_analysis(config: PipelineConfig) -> Self {
        Self::new(config, NoAnalyzer)
    }
}

impl<A: ContentAnalyzer> EnhancementPipeline<A> {
    pub fn new(config: PipelineConfig, analyzer: A) -> Self {
        Self { config, analyzer }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Enhance one encoded photo.
    ///
    /// Only decode failures and failure to encode the output surface as
    /// errors. Analysis problems and individual operator failures degrade
    /// gracefully and are visible in the report.
    ///
    /// Decoding and grading run on Tokio's blocking pool, so this must be
    /// awaited inside a Tokio runtime.
    pub async fn process(
        &self,
        raw: &[u8],
        request: &EnhanceRequest,
    ) -> Result<Enhanced, EnhanceError> {
        if raw.len() > self.config.large_input_warn_bytes {
            tracing::warn!(
                "input is {} bytes, above the {} byte soft limit",
                raw.len(),
                self.config.large_input_warn_bytes
            );
        }

        let owned = raw.to_vec();
        let max_dimension = self.config.max_dimension;
        let prepared = run_blocking(move || preprocess::prepare(&owned, max_dimension)).await?;
        let advisory = self.advise(&prepared.png).await;

        let info = prepared.info;
        let image = prepared.image;
        let request = *request;
        let graded = run_blocking(move || grade(image, request, advisory)).await?;

        let report = EnhancementReport {
            category: request.category,
            audience: request.audience,
            advisory,
            auto_mode: graded.auto_mode,
            factors: graded.factors,
            steps: graded.applied,
            skipped: graded.failed,
            preprocessing: info,
        };
        tracing::info!(
            "enhanced {}x{} photo for {} / {}: {}",
            info.bounded.0,
            info.bounded.1,
            request.category,
            request.audience,
            report.summary()
        );
        Ok(Enhanced {
            png: graded.png,
            report,
        })
    }

    /// Enhance several photos with the same request. Photos share no state
    /// and their CPU stages run concurrently; results come back in input
    /// order.
    pub async fn process_batch(
        &self,
        items: &[BatchItem],
        request: &EnhanceRequest,
    ) -> Vec<BatchResult> {
        let runs = items.iter().map(|item| async move {
            let result = self.process(&item.bytes, request).await;
            if let Err(e) = &result {
                tracing::warn!("{}: {e}", item.name);
            }
            BatchResult {
                name: item.name.clone(),
                result,
            }
        });
        join_all(runs).await
    }

    /// Ask the analyzer about the photo, within the configured time budget.
    async fn advise(&self, png: &[u8]) -> Advisory {
        if !self.config.analysis_enabled {
            return Advisory::Unavailable;
        }

        let budget = self.config.analysis_timeout();
        let outcome =
            match tokio::time::timeout(budget, self.analyzer.analyze(png, ANALYSIS_PROMPT)).await {
                Ok(result) => result,
                Err(_) => Err(AnalysisError::TimedOut(budget)),
            };

        match &outcome {
            Ok(_) => {}
            Err(AnalysisError::Disabled) => tracing::debug!("no content analyzer configured"),
            Err(e) => tracing::warn!("proceeding without advisory: {e}"),
        }
        let advisory = Advisory::from_outcome(&outcome);
        tracing::debug!("advisory: {advisory:?}");
        advisory
    }
}

/// CPU half of a request, after analysis.
struct Graded {
    png: Vec<u8>,
    factors: AdjustmentFactors,
    auto_mode: Option<AutoMode>,
    applied: Vec<AppliedStep>,
    failed: Vec<FailedStep>,
}

fn grade(
    image: PhotoImage,
    request: EnhanceRequest,
    advisory: Advisory,
) -> Result<Graded, EnhanceError> {
    let auto_mode = request.auto_mode.filter(|_| request.manual.is_neutral());
    let base = match auto_mode {
        Some(mode) => auto_enhance::auto_adjust(&image, mode),
        None => request.manual.to_factors(),
    };
    let factors = resolve_from_base(base, request.category, request.audience, advisory);
    let passes = auto_mode.map(AutoMode::passes).unwrap_or_default();

    let outcome = grading::apply_chain_with(image, &factors, passes);
    let png = preprocess::encode_png(&outcome.image).map_err(|source| {
        EnhanceError::Processing {
            stage: "final encode",
            source,
        }
    })?;
    Ok(Graded {
        png,
        factors,
        auto_mode,
        applied: outcome.applied,
        failed: outcome.failed,
    })
}

async fn run_blocking<T, F>(work: F) -> Result<T, EnhanceError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, EnhanceError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(EnhanceError::Worker)?
}
