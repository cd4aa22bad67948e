//! Support/resistance command implementation.

use anyhow::{bail, Context, Result};
use serde_json::json;
use ta_config::AppConfig;
use ta_core::traits::PriceSource;
use tracing::info;

use super::detector;
use crate::cli::{LevelsArgs, OutputFormat};

pub async fn run(args: LevelsArgs, config: &AppConfig) -> Result<()> {
    if let Some(tolerance) = args.tolerance {
        if !(tolerance > 0.0 && tolerance < 1.0) {
            bail!("--tolerance must be between 0 and 1, got {}", tolerance);
        }
    }

    let source = args.data.source(config)?;
    let days = args.data.days(config);
    let bars = source
        .historical_bars(&args.data.symbol, days)
        .await
        .with_context(|| format!("Failed to load prices for {}", args.data.symbol))?;
    let prices: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let detector = detector(&config.analysis, args.tolerance);
    let levels = detector.detect(&prices);
    info!(
        symbol = %args.data.symbol,
        points = prices.len(),
        support = levels.support.len(),
        resistance = levels.resistance.len(),
        "Support/resistance detected"
    );

    match args.output {
        OutputFormat::Json => {
            let body = json!({
                "symbol": args.data.symbol,
                "days": days,
                "tolerance": detector.tolerance(),
                "supportResistance": levels,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => {
            println!("Support/Resistance: {} ({} days, {} points)", args.data.symbol, days, prices.len());
            println!("═══════════════════════════════════════════════════════════");
            println!("  Tolerance:   {:.2}%", detector.tolerance() * 100.0);
            println!("  Support:     {}", format_levels(&levels.support));
            println!("  Resistance:  {}", format_levels(&levels.resistance));
        }
    }

    Ok(())
}

fn format_levels(levels: &[f64]) -> String {
    if levels.is_empty() {
        return "none".to_string();
    }
    levels
        .iter()
        .map(|l| format!("{:.2}", l))
        .collect::<Vec<_>>()
        .join(", ")
}
