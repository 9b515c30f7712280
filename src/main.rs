mod demo;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use patiox::{report::render_summary, Design, Engine, EngineConfig};
use tracing_subscriber::EnvFilter;

use demo::build_sample_design;

/// Evaluate a patio-cover design and print its cost and structural report.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON engine configuration (scale, cantilever limits, prices).
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON design to evaluate; a sample layout is used when omitted.
    #[arg(long)]
    design: Option<PathBuf>,
}

/// Read a design and pass its shade rectangle through the enforcer, as a
/// drag on the plan would.
fn load_design(engine: &Engine, path: &Path) -> Result<Design, Box<dyn Error>> {
    let design: Design = serde_json::from_str(&fs::read_to_string(path)?)?;
    tracing::info!(path = %path.display(), posts = design.posts().len(), "design loaded");
    Ok(engine.set_shade_area(&design, design.shade_area().copied()))
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("patiox=info")),
        )
        .init();

    let cli = Cli::parse();

    // Configuration first, so every later step sees the same scale and prices.
    let config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let engine = Engine::new(config)?;

    let design = match &cli.design {
        Some(path) => load_design(&engine, path)?,
        None => {
            tracing::info!("no design given, using the sample layout");
            build_sample_design(&engine)
        }
    };

    let evaluation = engine.evaluate(&design);
    if !evaluation.classification.safe {
        tracing::warn!(
            span_ft = evaluation.cantilever_span_ft,
            "cantilever exceeds the largest post's limit"
        );
    }

    println!("{}", render_summary(&design, &evaluation));

    Ok(())
}
