//! Whole-run scenarios over in-memory collaborators

use config::FetchFailurePolicy;
use e2e_tests::*;
use message_sink::test_utils::CollectorSink;
use mtf_signals::{Decision, SignalRunner, StrategyError};
use state_store::{InMemoryStateStore, RunState};
use strategy_shared::MockCandleSource;
use types::{Direction, EmittedSignal};

fn runner(
    settings: config::Settings,
    source: MockCandleSource,
) -> SignalRunner<MockCandleSource, CollectorSink, InMemoryStateStore> {
    SignalRunner::new(
        settings,
        source,
        CollectorSink::new(),
        InMemoryStateStore::new(),
    )
}

#[tokio::test]
async fn agreeing_uptrend_emits_buy_with_mean_confidence() {
    let source = source_with(&[("ABCUSDT", uptrend(HISTORY), uptrend(HISTORY))]);
    let runner = runner(scenario_settings(&["ABCUSDT"]), source);

    let report = runner.run().await.unwrap();

    assert_eq!(report.signals.len(), 1);
    let signal = &report.signals[0];
    assert_eq!(signal.pair, "ABCUSDT");
    assert_eq!(signal.direction, Direction::Buy);
    assert!((signal.confidence - 0.85).abs() < 1e-9);
    assert_eq!(signal.meta.short.direction, Direction::Buy);
    assert_eq!(signal.meta.medium.direction, Direction::Buy);

    let messages = runner.sink().received_messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].text.contains("ABCUSDT: BUY"));
    assert!(messages[0].text.contains("Confidence: 85.0%"));

    assert_eq!(runner.store().save_count(), 1);
    assert_eq!(runner.store().snapshot().last_signals, report.signals);
}

#[tokio::test]
async fn disagreeing_timeframes_emit_nothing() {
    let source = source_with(&[("ABCUSDT", uptrend(HISTORY), downtrend(HISTORY))]);
    let runner = runner(scenario_settings(&["ABCUSDT"]), source);

    let report = runner.run().await.unwrap();

    assert!(report.signals.is_empty());
    assert_eq!(
        report.evaluations[0].decision,
        Decision::NoAgreement {
            short: Direction::Buy,
            medium: Direction::Sell
        }
    );
    assert_eq!(runner.sink().message_count(), 0);
    assert_eq!(runner.store().save_count(), 1);
    assert!(runner.store().snapshot().last_signals.is_empty());
}

#[tokio::test]
async fn history_shorter_than_slow_warm_up_holds() {
    let source = source_with(&[("NEWUSDT", uptrend(15), uptrend(15))]);
    let runner = runner(scenario_settings(&["NEWUSDT"]), source);

    let report = runner.run().await.unwrap();

    let evaluation = &report.evaluations[0];
    assert_eq!(evaluation.short.direction, Direction::Hold);
    assert_eq!(evaluation.short.score, 0.0);
    assert!(evaluation.short.last.is_none());
    assert!(report.signals.is_empty());
}

#[tokio::test]
async fn low_volatility_halves_confidence_below_minimum() {
    let mut settings = scenario_settings(&["ABCUSDT"]);
    settings.thresholds.atr_low_cut = 50.0;
    let source = source_with(&[("ABCUSDT", uptrend(HISTORY), uptrend(HISTORY))]);
    let runner = runner(settings, source);

    let report = runner.run().await.unwrap();

    match &report.evaluations[0].decision {
        Decision::BelowMinimum {
            confidence, gates, ..
        } => {
            assert!((confidence - 0.425).abs() < 1e-9);
            assert!(!gates.volatility);
        }
        other => panic!("expected below-minimum decision, got {:?}", other),
    }
    assert!(report.signals.is_empty());
}

#[tokio::test]
async fn fetch_failure_aborts_run_without_side_effects() {
    let source = source_with(&[("ABCUSDT", uptrend(HISTORY), uptrend(HISTORY))])
        .with_failing_pair("BADUSDT");
    let runner = runner(scenario_settings(&["ABCUSDT", "BADUSDT"]), source);

    let err = runner.run().await.unwrap_err();

    assert!(matches!(err, StrategyError::Fetch(_)));
    assert_eq!(runner.sink().message_count(), 0);
    assert_eq!(runner.store().save_count(), 0);
}

#[tokio::test]
async fn skip_pair_policy_continues_past_failures() {
    let mut settings = scenario_settings(&["BADUSDT", "ABCUSDT"]);
    settings.runner.fetch.policy = FetchFailurePolicy::SkipPair;
    let source = source_with(&[("ABCUSDT", downtrend(HISTORY), downtrend(HISTORY))])
        .with_failing_pair("BADUSDT");
    let runner = runner(settings, source);

    let report = runner.run().await.unwrap();

    assert_eq!(report.skipped_pairs, vec!["BADUSDT".to_string()]);
    assert_eq!(report.stats.pairs_skipped, 1);
    assert_eq!(report.signals.len(), 1);
    assert_eq!(report.signals[0].direction, Direction::Sell);
    assert_eq!(runner.sink().message_count(), 1);
    assert_eq!(runner.store().save_count(), 1);
}

#[tokio::test]
async fn notification_failure_still_persists_state() {
    let source = source_with(&[("ABCUSDT", uptrend(HISTORY), uptrend(HISTORY))]);
    let runner = runner(scenario_settings(&["ABCUSDT"]), source);
    runner.sink().fail_all_sends(true);

    let report = runner.run().await.unwrap();

    assert_eq!(report.signals.len(), 1);
    assert_eq!(report.metrics.notifications_failed, 1);
    assert_eq!(runner.sink().message_count(), 0);
    assert_eq!(runner.store().snapshot().last_signals, report.signals);
}

#[tokio::test]
async fn previous_signals_are_replaced_not_merged() {
    let stale = EmittedSignal {
        pair: "OLDUSDT".to_string(),
        direction: Direction::Sell,
        confidence: 0.7,
        meta: types::SignalMeta {
            short: types::EvaluationResult::insufficient_data(),
            medium: types::EvaluationResult::insufficient_data(),
        },
    };
    let store = InMemoryStateStore::with_state(RunState::default().with_signals(vec![stale]));
    let source = source_with(&[("ABCUSDT", uptrend(HISTORY), uptrend(HISTORY))]);
    let runner = SignalRunner::new(
        scenario_settings(&["ABCUSDT"]),
        source,
        CollectorSink::new(),
        store,
    );

    runner.run().await.unwrap();

    let pairs: Vec<String> = runner
        .store()
        .snapshot()
        .last_signals
        .into_iter()
        .map(|s| s.pair)
        .collect();
    assert_eq!(pairs, vec!["ABCUSDT".to_string()]);
}

#[tokio::test]
async fn identical_inputs_give_identical_decisions() {
    let build = || {
        runner(
            scenario_settings(&["ABCUSDT", "XYZUSDT"]),
            source_with(&[
                ("ABCUSDT", uptrend(HISTORY), uptrend(HISTORY)),
                ("XYZUSDT", trend(50.0, 0.25, HISTORY), downtrend(HISTORY)),
            ]),
        )
    };

    let first = build().run().await.unwrap();
    let second = build().run().await.unwrap();

    assert_eq!(first.evaluations, second.evaluations);
    assert_eq!(first.signals, second.signals);
}
