use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use marketlens_core::{IndicatorConfig, DEFAULT_FUTURE_DAYS};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "marketlens")]
#[command(about = "Technical-indicator pipeline over daily multi-ticker price series")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute indicators over a raw OHLCV CSV and write the enriched table
    Compute {
        /// Path to the raw CSV (Date, Ticker, Open, High, Low, Close, Volume)
        #[arg(short, long)]
        input: PathBuf,

        /// Path for the enriched CSV
        #[arg(short, long)]
        output: PathBuf,

        /// Business days of forecast scaffold appended per ticker
        #[arg(long, default_value_t = DEFAULT_FUTURE_DAYS)]
        future_days: usize,

        /// Anchor date for the forecast scaffold (defaults to the latest
        /// date in the input)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Compute {
            input,
            output,
            future_days,
            as_of,
        } => {
            let raw = marketlens_data::load_raw_bars(&input)
                .with_context(|| format!("loading {}", input.display()))?;
            let input_rows = raw.len();

            let config = IndicatorConfig::default();
            let rows = marketlens_pipeline::run(raw, future_days, as_of, &config);

            marketlens_data::write_indicator_rows(&output, &rows)
                .with_context(|| format!("writing {}", output.display()))?;

            info!(
                input_rows,
                output_rows = rows.len(),
                output = %output.display(),
                "enriched table written"
            );
        }
    }

    Ok(())
}
