//! Run orchestration
//!
//! One run is a single pass: load state, evaluate every configured pair,
//! notify each emitted signal, then persist the run's signals. Pair work is
//! fanned out with bounded concurrency while results keep configured order.
//! Every pair is evaluated before the first notification, so an aborted run
//! sends nothing and writes nothing.

use crate::aggregator::{Decision, MultiTimeframeAggregator};
use crate::error::Result;
use crate::evaluator::evaluate_primary;
use crate::signals::SignalStats;
use crate::snapshot::{IndicatorParams, IndicatorSnapshot};
use config::{FetchFailurePolicy, Settings};
use futures::stream::{self, StreamExt, TryStreamExt};
use message_sink::{AlertLabels, Message, MessageSink};
use state_store::StateStore;
use strategy_shared::{
    log_failure, log_metrics, log_signal, log_success, log_warning, CandleSource, FetchError,
    MetricsCollector, RunMetrics,
};
use tracing::{debug, info, instrument};
use types::{EmittedSignal, EvaluationResult};

/// Both timeframe evaluations and the decision for one pair
#[derive(Debug, Clone, PartialEq)]
pub struct PairEvaluation {
    pub pair: String,
    pub short: EvaluationResult,
    pub medium: EvaluationResult,
    pub decision: Decision,
}

/// What a completed run did
#[derive(Debug, Clone)]
pub struct RunReport {
    pub evaluations: Vec<PairEvaluation>,
    pub signals: Vec<EmittedSignal>,
    pub skipped_pairs: Vec<String>,
    pub stats: SignalStats,
    pub metrics: RunMetrics,
    /// False for dry runs
    pub state_written: bool,
}

pub struct SignalRunner<C, S, St> {
    settings: Settings,
    source: C,
    sink: S,
    store: St,
    dry_run: bool,
}

impl<C, S, St> SignalRunner<C, S, St>
where
    C: CandleSource,
    S: MessageSink,
    St: StateStore,
{
    pub fn new(settings: Settings, source: C, sink: S, store: St) -> Self {
        Self {
            settings,
            source,
            sink,
            store,
            dry_run: false,
        }
    }

    /// Evaluate and log, but neither notify nor persist
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    /// Execute one full run
    pub async fn run(&self) -> Result<RunReport> {
        let pairs = &self.settings.thresholds.pairs;
        info!(
            pairs = pairs.len(),
            source = self.source.name(),
            sink = %self.sink.metadata().name,
            dry_run = self.dry_run,
            "Starting signal run"
        );

        let metrics = MetricsCollector::new();
        let state = self.store.load().await?;

        let mut stats = SignalStats::default();
        let (evaluations, skipped_pairs) = self.evaluate_all(&metrics).await?;
        for _ in &skipped_pairs {
            stats.record_skipped();
        }
        for evaluation in &evaluations {
            stats.record_decision(&evaluation.decision);
        }

        let signals: Vec<EmittedSignal> = evaluations
            .iter()
            .filter_map(|e| e.decision.signal().cloned())
            .collect();

        let state_written = if self.dry_run {
            for signal in &signals {
                log_signal!(
                    "[dry run] would emit {} {} at {:.1}%",
                    signal.pair,
                    signal.direction,
                    signal.confidence * 100.0
                );
            }
            false
        } else {
            self.notify_all(&signals, &metrics).await;
            self.store
                .save(&state.with_signals(signals.clone()))
                .await?;
            true
        };

        let elapsed = metrics.uptime();
        let metrics = metrics.get_metrics();
        log_metrics!(
            "Run complete in {:?}: {} pairs evaluated, {} skipped, {} signals ({} buy / {} sell), avg confidence {:.3}, {} notification failures",
            elapsed,
            stats.pairs_evaluated,
            stats.pairs_skipped,
            stats.total_signals(),
            stats.buy_signals,
            stats.sell_signals,
            stats.avg_confidence,
            metrics.notifications_failed
        );

        Ok(RunReport {
            evaluations,
            signals,
            skipped_pairs,
            stats,
            metrics,
            state_written,
        })
    }

    /// Evaluate every pair in configured order, applying the fetch policy
    async fn evaluate_all(
        &self,
        metrics: &MetricsCollector,
    ) -> Result<(Vec<PairEvaluation>, Vec<String>)> {
        let pairs = &self.settings.thresholds.pairs;
        let concurrency = self.settings.runner.fetch.max_concurrent_pairs.max(1);
        let evaluations = stream::iter(pairs.iter())
            .map(|pair| self.evaluate_pair(pair, metrics))
            .buffered(concurrency);

        match self.settings.runner.fetch.policy {
            FetchFailurePolicy::FailFast => {
                let evaluations = evaluations
                    .try_collect::<Vec<_>>()
                    .await
                    .map_err(|e| {
                        log_failure!("Aborting run, fetch failed for {}: {}", e.pair(), e);
                        e
                    })?;
                Ok((evaluations, Vec::new()))
            }
            FetchFailurePolicy::SkipPair => {
                let results: Vec<std::result::Result<PairEvaluation, FetchError>> =
                    evaluations.collect().await;

                let mut kept = Vec::with_capacity(results.len());
                let mut skipped = Vec::new();
                for result in results {
                    match result {
                        Ok(evaluation) => kept.push(evaluation),
                        Err(e) => {
                            log_warning!("Skipping {}: {}", e.pair(), e);
                            metrics.increment_skipped();
                            skipped.push(e.pair().to_string());
                        }
                    }
                }
                Ok((kept, skipped))
            }
        }
    }

    #[instrument(skip_all, fields(pair = %pair))]
    async fn evaluate_pair(
        &self,
        pair: &str,
        metrics: &MetricsCollector,
    ) -> std::result::Result<PairEvaluation, FetchError> {
        let market_data = &self.settings.runner.market_data;
        let short = self
            .evaluate_timeframe(pair, &market_data.short_interval, metrics)
            .await?;
        let medium = self
            .evaluate_timeframe(pair, &market_data.medium_interval, metrics)
            .await?;

        let aggregator = MultiTimeframeAggregator::new(
            &self.settings.thresholds,
            &self.settings.runner.gates,
        );
        let decision = aggregator.aggregate(pair, &short, &medium);
        metrics.increment_evaluated();

        match &decision {
            Decision::Emit { signal, gates } => {
                metrics.increment_signals();
                info!(
                    direction = %signal.direction,
                    confidence = signal.confidence,
                    volatility_ok = gates.volatility,
                    "Signal accepted"
                );
            }
            Decision::BelowMinimum {
                direction,
                confidence,
                gates,
            } => debug!(
                direction = %direction,
                confidence,
                gates = ?gates,
                "Timeframes agree but confidence is below minimum"
            ),
            Decision::NoAgreement { short, medium } => debug!(
                short = %short,
                medium = %medium,
                "Timeframes do not agree"
            ),
        }

        Ok(PairEvaluation {
            pair: pair.to_string(),
            short,
            medium,
            decision,
        })
    }

    async fn evaluate_timeframe(
        &self,
        pair: &str,
        interval: &str,
        metrics: &MetricsCollector,
    ) -> std::result::Result<EvaluationResult, FetchError> {
        metrics.increment_requests();
        let candles = self
            .source
            .fetch_candles(pair, interval, self.settings.runner.market_data.candle_limit)
            .await
            .map_err(|e| {
                metrics.increment_fetch_failures();
                e
            })?;

        let params = IndicatorParams::new(&self.settings.thresholds, &self.settings.runner.indicators);
        let snapshot = IndicatorSnapshot::build(&candles, &params);
        let result = evaluate_primary(&snapshot, &self.settings.thresholds, &self.settings.weights);

        if result.last.is_none() {
            debug!(
                timeframe = interval,
                candles = candles.len(),
                warm_up = params.warm_up(),
                "Insufficient history, holding"
            );
        } else {
            debug!(
                timeframe = interval,
                direction = %result.direction,
                score = result.score,
                "Timeframe evaluated"
            );
        }
        Ok(result)
    }

    /// Send one alert per signal; failures are logged and counted only
    async fn notify_all(&self, signals: &[EmittedSignal], metrics: &MetricsCollector) {
        if signals.is_empty() {
            return;
        }

        for signal in signals {
            log_signal!(
                "{} {} at {:.1}%",
                signal.pair,
                signal.direction,
                signal.confidence * 100.0
            );
        }

        let telegram = &self.settings.runner.telegram;
        let labels = AlertLabels::new(
            telegram.alert_headline.as_str(),
            telegram.confidence_label.as_str(),
        );
        let messages = signals
            .iter()
            .map(|signal| Message::signal_alert(signal, &labels))
            .collect();
        let result = self.sink.send_batch(messages).await;

        for (index, error) in &result.failed {
            metrics.increment_notification_failures();
            let pair = signals.get(*index).map_or("-", |s| s.pair.as_str());
            log_warning!("Notification for {} failed: {}", pair, error);
        }

        if result.is_complete_success() {
            log_success!(
                "Dispatched {} alerts via {}",
                result.succeeded,
                self.sink.metadata().name
            );
        } else {
            log_warning!(
                "Delivered {}/{} alerts ({:.0}%)",
                result.succeeded,
                result.total,
                result.success_rate()
            );
        }
    }
}
