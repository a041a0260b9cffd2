use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use wolf_journal::analytics::JournalReport;
use wolf_journal::config::AnalyticsConfig;
use wolf_journal::source::{JsonFileSource, TradeSource};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = AnalyticsConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let path = args
        .iter()
        .skip(1)
        .find(|a| !a.starts_with("--"))
        .map(String::as_str)
        .unwrap_or("trades.json");
    let as_json = args.iter().any(|a| a == "--json");

    info!(
        "Analyzing {} (balance {:.2}, key chain {:?})",
        path,
        cfg.initial_balance,
        cfg.key_chain.keys()
    );

    let mut source = JsonFileSource::new(path);
    let trades = source
        .load_trades()
        .await
        .with_context(|| format!("loading trades from {}", path))?;

    let report = tokio::task::spawn_blocking(move || JournalReport::build(&trades, &cfg))
        .await
        .context("report task panicked")??;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print_summary();
    }

    Ok(())
}
