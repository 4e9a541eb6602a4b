use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use savor_core::{
    Audience, AutoMode, BatchItem, Category, ContentAnalyzer, EnhanceRequest, EnhancementPipeline,
    FactorOverrides, FixedAnalyzer, ManualAdjustments, PipelineConfig,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "savor")]
#[command(version, about = "Colour and tone enhancement for restaurant food photos", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enhance one or more photos
    Enhance {
        /// Input photos (any format the decoder understands)
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        out: PathBuf,

        /// Business type, e.g. "izakaya", "ramen-shop", "カフェ"
        #[arg(short, long, default_value = "other")]
        category: Category,

        /// Target audience, e.g. "families", "office-women"
        #[arg(short, long, default_value = "other")]
        audience: Audience,

        /// Brightness slider (-50..50)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        brightness: i32,

        /// Saturation slider (-50..50)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        saturation: i32,

        /// Contrast slider (-50..50)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        contrast: i32,

        /// Choose base factors automatically when all sliders are zero
        #[arg(long, value_name = "MODE")]
        auto: Option<AutoMode>,

        /// Use this text as the content-analysis answer for every photo
        #[arg(long, value_name = "TEXT")]
        advisory: Option<String>,

        /// Pipeline configuration (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Report format
        #[arg(short, long, default_value = "text")]
        report: ReportFormat,
    },

    /// List business types and audiences with their preset factors
    Presets {
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Enhance {
            inputs,
            out,
            category,
            audience,
            brightness,
            saturation,
            contrast,
            auto,
            advisory,
            config,
            report,
        } => {
            let mut config = match config {
                Some(path) => load_config(&path)?,
                None => PipelineConfig::default(),
            };
            let mut request = EnhanceRequest::new(category, audience)
                .with_manual(ManualAdjustments::new(brightness, saturation, contrast));
            if let Some(mode) = auto {
                request = request.with_auto(mode);
            }

            std::fs::create_dir_all(&out)
                .with_context(|| format!("failed to create {}", out.display()))?;

            match advisory {
                Some(text) => {
                    config.analysis_enabled = true;
                    let pipeline = EnhancementPipeline::new(config, FixedAnalyzer::new(text));
                    enhance_all(&pipeline, &inputs, &out, &request, report).await
                }
                None => {
                    let pipeline = EnhancementPipeline::without_analysis(config);
                    enhance_all(&pipeline, &inputs, &out, &request, report).await
                }
            }
        }

        Commands::Presets { format } => {
            print_presets(format)?;
            Ok(())
        }
    }
}

/// `RUST_LOG` directives when present and valid, `info` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn load_config(path: &Path) -> anyhow::Result<PipelineConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    PipelineConfig::from_json(&json).with_context(|| format!("invalid config {}", path.display()))
}

async fn enhance_all<A: ContentAnalyzer>(
    pipeline: &EnhancementPipeline<A>,
    inputs: &[PathBuf],
    out: &Path,
    request: &EnhanceRequest,
    report: ReportFormat,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut failed = 0usize;

    let mut paths = Vec::with_capacity(inputs.len());
    let mut items = Vec::with_capacity(inputs.len());
    for path in inputs {
        match std::fs::read(path) {
            Ok(bytes) => {
                paths.push(path);
                items.push(BatchItem {
                    name: path.display().to_string(),
                    bytes,
                });
            }
            Err(e) => {
                error!("{}: {e}", path.display());
                failed += 1;
            }
        }
    }

    let results = pipeline.process_batch(&items, request).await;

    let mut json_reports = Vec::new();
    for (path, batch) in paths.into_iter().zip(results) {
        let enhanced = match batch.result {
            Ok(enhanced) => enhanced,
            Err(e) => {
                error!("{}: {e}", batch.name);
                failed += 1;
                continue;
            }
        };

        let target = output_path(path, out);
        if let Err(e) = std::fs::write(&target, &enhanced.png) {
            error!("{}: {e}", target.display());
            failed += 1;
            continue;
        }
        info!("{} -> {}", batch.name, target.display());

        match report {
            ReportFormat::Text => {
                println!("== {} ==", batch.name);
                println!("{}", enhanced.report.explanation());
            }
            ReportFormat::Json => json_reports.push(serde_json::json!({
                "input": batch.name,
                "output": target.display().to_string(),
                "report": enhanced.report,
            })),
        }
    }

    if report == ReportFormat::Json {
        println!("{}", serde_json::to_string_pretty(&json_reports)?);
    }

    info!(
        "processed {} photo(s) in {:.2}s, {failed} failed",
        inputs.len(),
        start.elapsed().as_secs_f64()
    );
    if failed > 0 {
        anyhow::bail!("{failed} of {} photo(s) failed", inputs.len());
    }
    Ok(())
}

/// `<out>/<stem>_enhanced.png`
fn output_path(input: &Path, out: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());
    out.join(format!("{stem}_enhanced.png"))
}

fn print_presets(format: ReportFormat) -> anyhow::Result<()> {
    match format {
        ReportFormat::Text => {
            println!("Business types:");
            for c in Category::all() {
                println!(
                    "  {:<12} {:<12} {}",
                    c.slug(),
                    c.native_label(),
                    describe_overrides(&c.preset())
                );
            }
            println!("\nAudiences:");
            for a in Audience::all() {
                println!(
                    "  {:<14} {:<12} {}",
                    a.slug(),
                    a.native_label(),
                    describe_overrides(&a.preset())
                );
            }
        }
        ReportFormat::Json => {
            let categories: Vec<_> = Category::all()
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "slug": c.slug(),
                        "label": c.label(),
                        "native": c.native_label(),
                        "style": c.style_note(),
                        "preset": c.preset(),
                    })
                })
                .collect();
            let audiences: Vec<_> = Audience::all()
                .iter()
                .map(|a| {
                    serde_json::json!({
                        "slug": a.slug(),
                        "label": a.label(),
                        "native": a.native_label(),
                        "style": a.style_note(),
                        "preset": a.preset(),
                    })
                })
                .collect();
            let doc = serde_json::json!({ "categories": categories, "audiences": audiences });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(())
}

fn describe_overrides(o: &FactorOverrides) -> String {
    if o.is_empty() {
        return "(neutral)".to_string();
    }
    let scaled = [
        ("brightness", o.brightness),
        ("contrast", o.contrast),
        ("saturation", o.saturation),
        ("sharpness", o.sharpness),
        ("warmth", o.warmth),
    ];
    let shifted = [("shadows", o.shadows), ("highlights", o.highlights)];

    scaled
        .iter()
        .filter_map(|(name, v)| v.map(|v| format!("{name} ×{v:.2}")))
        .chain(
            shifted
                .iter()
                .filter_map(|(name, v)| v.map(|v| format!("{name} {v:+.2}"))),
        )
        .collect::<Vec<_>>()
        .join(", ")
}
