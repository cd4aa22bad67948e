//! Analyze command implementation.

use anyhow::{Context, Result};
use ta_analysis::{AnalysisEngine, TechnicalRequest, TechnicalService};
use ta_config::AppConfig;
use tracing::info;

use super::detector;
use crate::cli::{AnalyzeArgs, OutputFormat};

pub async fn run(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    let source = args.data.source(config)?;
    let engine = AnalysisEngine::with_detector(detector(&config.analysis, None));
    let service = TechnicalService::new(source, engine);

    let request = TechnicalRequest::new(&args.data.symbol, args.data.days(config))
        .with_indicators(args.indicators);
    info!(
        symbol = %request.symbol,
        days = request.days,
        indicators = ?request.indicators,
        "Starting technical analysis"
    );

    let response = service
        .handle(&request)
        .await
        .context("Technical analysis failed")?;

    match args.output {
        OutputFormat::Json => println!("{}", response.to_json()?),
        OutputFormat::Text => println!("{}", response.summary()),
    }

    if let Some(save_path) = &args.save {
        std::fs::write(save_path, response.to_json()?)?;
        info!("Results saved to {:?}", save_path);
    }

    Ok(())
}
