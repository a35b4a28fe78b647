//! fish-replay: feeds recorded trade stream payloads through the fish detector.
//!
//! Input is one Binance trade message per line (raw or combined-stream
//! envelope), read from a file or stdin. Classified fish are logged as they
//! are detected and a shark advice summary is logged periodically and at the
//! end of the input.
//!
//! # Usage
//!
//! ```sh
//! fish-replay --input btcusdt-trades.jsonl --replay-clock
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use fish_core::Config;
use fish_detector::{Advisor, FishDetector, FishQueries, ManualClock, SharkAdvice};
use fish_ingestion::TradeNormalizer;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::time::interval;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Replay recorded trades through the fish detector.
#[derive(Parser, Debug)]
#[command(name = "fish-replay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Recorded payloads, one JSON message per line (stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Drive the detector clock from trade timestamps instead of wall-clock time
    #[arg(long)]
    replay_clock: bool,

    /// Seconds between periodic shark advice summaries
    #[arg(long, default_value_t = 30)]
    advice_interval: u64,

    /// Minutes covered by each shark advice summary
    #[arg(long)]
    advice_minutes: Option<i64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(false).init();

    info!("fish-replay v{}", env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Replay failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    let mut detector = FishDetector::new(&config);
    let replay_clock = if cli.replay_clock {
        let clock = Arc::new(ManualClock::from_millis(0));
        detector = detector.with_clock(clock.clone());
        Some(clock)
    } else {
        None
    };
    let detector = Arc::new(detector);

    let advisor = Advisor::new(config.detector.rng_seed);
    let queries = Arc::new(FishQueries::new(
        Arc::clone(&detector),
        advisor,
        config.query.clone(),
    ));

    let advice_handle = spawn_advice_task(
        Arc::clone(&queries),
        Duration::from_secs(cli.advice_interval.max(1)),
        cli.advice_minutes,
    );

    let reader: Box<dyn AsyncRead + Unpin + Send> = match cli.input {
        Some(ref path) => Box::new(
            tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening input {}", path.display()))?,
        ),
        None => Box::new(tokio::io::stdin()),
    };

    let mut normalizer = TradeNormalizer::from_config(&config.ingestion);
    let mut lines = BufReader::new(reader).lines();
    let mut line_no: u64 = 0;

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("reading input")?,
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, stopping replay");
                break;
            }
        };
        let Some(line) = line else { break };
        line_no += 1;

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match normalizer.normalize(line) {
            Ok(Some(trade)) => {
                if let Some(ref clock) = replay_clock {
                    clock.advance_to_millis(trade.timestamp);
                }
                detector.ingest(trade);
            }
            Ok(None) => {}
            Err(e) => warn!(line = line_no, "Skipping payload: {}", e),
        }
    }

    advice_handle.abort();

    let stats = normalizer.stats();
    info!(
        lines = line_no,
        accepted = stats.accepted,
        rejected = stats.rejected,
        filtered = stats.filtered,
        volume = stats.total_volume,
        "Input finished"
    );
    info!(
        trades = detector.trades_seen(),
        window = detector.window_len(),
        fish = detector.history_len(),
        "Detector state"
    );
    log_advice(&queries.shark_advice(cli.advice_minutes));

    Ok(())
}

/// Log shark advice every `period` until aborted.
fn spawn_advice_task(
    queries: Arc<FishQueries>,
    period: Duration,
    minutes: Option<i64>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        // First tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            log_advice(&queries.shark_advice(minutes));
        }
    })
}

fn log_advice(advice: &SharkAdvice) {
    info!(
        verdict = ?advice.verdict,
        thicc = advice.thicc_fish,
        leverage = advice.leverage_fish,
        total = advice.total_fish,
        minutes = advice.timeframe_min,
        "{} {}",
        advice.headline,
        advice.shark_message
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["fish-replay"]).unwrap();
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.advice_interval, 30);
        assert!(!cli.replay_clock);
        assert!(cli.input.is_none());

        let cli = Cli::try_parse_from(["fish-replay", "--log-level", "debug", "--replay-clock"]).unwrap();
        assert_eq!(cli.log_level, "debug");
        assert!(cli.replay_clock);
    }
}
