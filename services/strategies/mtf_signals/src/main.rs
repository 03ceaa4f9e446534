//! Multi-Timeframe Signal Strategy Main Entry Point

use anyhow::{Context, Result};
use binance_klines_adapter::{BinanceClientConfig, BinanceKlineClient};
use clap::Parser;
use config::service::paths;
use config::Settings;
use message_sink::TelegramSink;
use mtf_signals::SignalRunner;
use state_store::JsonFileStateStore;
use std::path::PathBuf;
use std::time::Duration;
use strategy_shared::{init_strategy_logging, resolve_config_path};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "mtf_signals")]
#[command(about = "Evaluate multi-timeframe signals for the configured pairs once")]
struct Args {
    /// Runner configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long)]
    json_logs: bool,

    /// Evaluate and log, without notifying or writing state
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_strategy_logging(&args.log_level, args.json_logs)?;

    info!("Starting multi-timeframe signal run");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config_path = resolve_config_path(args.config, paths::RUNNER_CONFIG_ENV, paths::RUNNER_CONFIG);
    let settings = Settings::load(Some(&config_path))
        .with_context(|| format!("Failed to load configuration ({:?})", config_path))?;

    info!(
        "Configuration loaded: {} pairs, {}/{} candles, policy {:?}",
        settings.thresholds.pairs.len(),
        settings.runner.market_data.short_interval,
        settings.runner.market_data.medium_interval,
        settings.runner.fetch.policy
    );

    let source = BinanceKlineClient::new(BinanceClientConfig::from_runner(
        &settings.runner.market_data,
        &settings.runner.fetch,
    ))
    .context("Failed to build Binance client")?;
    info!(
        "Candle source: {} (retries: {})",
        source.config().base_url,
        source.config().retry_attempts
    );

    let telegram = &settings.runner.telegram;
    let sink = TelegramSink::new(
        telegram.api_base_url.clone(),
        telegram.bot_token.clone(),
        telegram.chat_id.clone(),
        Duration::from_secs(settings.runner.market_data.http_timeout_secs),
    )
    .context("Failed to build Telegram sink")?;
    if !sink.is_configured() {
        info!("Telegram credentials not set, alerts will be skipped");
    }

    let store = JsonFileStateStore::new(settings.runner.paths.state.clone());
    info!("State file: {:?}", store.path());

    let runner = SignalRunner::new(settings, source, sink, store).with_dry_run(args.dry_run);
    let report = runner.run().await.context("Signal run failed")?;

    info!(
        "Signal run finished: {} signals, state written: {}",
        report.signals.len(),
        report.state_written
    );

    Ok(())
}
