//! Integration tests for Calibench
//!
//! These tests verify the end-to-end behavior of the benchmarking engine.

use calibench::{
    BenchConfig, BenchSummary, CaseRegistry, Event, EventLog, JsonSink, NullSink, PhaseKind,
    RunSample, check, compute_summary, derive_run_count, rank_summaries, run_session, run_tests,
};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

fn counter() -> Rc<Cell<u32>> {
    Rc::new(Cell::new(0))
}

fn counting(calls: &Rc<Cell<u32>>, result: u32) -> impl Fn() -> u32 + 'static {
    let calls = Rc::clone(calls);
    move || {
        calls.set(calls.get() + 1);
        result
    }
}

/// Summary invariants hold for a spread of sample shapes
#[test]
fn test_summary_invariants() {
    let shapes: Vec<Vec<f64>> = vec![
        vec![0.5],
        vec![1e-9, 1e-9, 1e-9],
        vec![0.1, 0.2, 0.3, 0.4],
        vec![3.0, 1.0, 2.0, 100.0, 0.001],
        (1..=50).map(|i| i as f64 * 1e-6).collect(),
    ];

    for elapsed in shapes {
        let samples: Vec<RunSample> = elapsed.iter().map(|&e| RunSample::new(e, 0)).collect();
        let summary = compute_summary(&samples);
        let expected_mean = elapsed.iter().sum::<f64>() / elapsed.len() as f64;

        assert!(summary.min <= summary.mean, "{:?}", summary);
        assert!(summary.mean <= summary.max, "{:?}", summary);
        assert!(summary.variance >= 0.0);
        assert!((summary.mean - expected_mean).abs() <= expected_mean.abs() * 1e-12);
        if elapsed.len() == 1 {
            assert_eq!(summary.variance, 0.0);
        }
    }
}

/// Calibration arithmetic matches the documented examples
#[test]
fn test_calibration_examples() {
    let config = BenchConfig::default()
        .with_run_bounds(10, 100)
        .with_max_bench_time(10.0);

    // raw 5 → raised to min_runs
    assert_eq!(derive_run_count(2.0, &config), 10);
    // raw 1000 → lowered to max_runs
    assert_eq!(derive_run_count(0.01, &config), 100);
    // instantaneous callable
    assert_eq!(derive_run_count(0.0, &config), 100);
}

/// A fixed run count ignores warmup timing but still runs warmup
#[test]
fn test_fixed_run_override() {
    let calls = counter();
    let registry = CaseRegistry::new()
        .with("slow_start", counting(&calls, 0))
        .unwrap();
    let config = BenchConfig {
        n_warmup: 10,
        min_runs: 10,
        max_runs: 100,
        n_runs_fixed: 6,
        max_bench_time: 10.0,
        compare: false,
        color: false,
    };
    let mut log = EventLog::new();

    let outcome = run_session(&registry, &config, &mut log);

    assert_eq!(outcome.cases[0].n_runs, 6);
    assert_eq!(outcome.cases[0].measured.sample_count, 6);
    assert_eq!(outcome.cases[0].warmup.sample_count, 10);
    assert_eq!(calls.get(), 16);
    assert_eq!(log.summaries(PhaseKind::Warmup).len(), 1);
}

/// Time-budget calibration against a sleeping callable
#[test]
fn test_calibration_respects_budget() {
    let registry = CaseRegistry::new()
        .with("sleep_1ms", || {
            std::thread::sleep(Duration::from_millis(1));
            0
        })
        .unwrap();
    let config = BenchConfig::default()
        .with_warmup(2)
        .with_run_bounds(2, 20)
        .with_max_bench_time(0.01);

    let outcome = run_session(&registry, &config, &mut NullSink);
    let case = &outcome.cases[0];
    let n_runs = case.n_runs;

    assert!((2..=20).contains(&n_runs), "n_runs = {}", n_runs);
    assert_eq!(n_runs, derive_run_count(case.warmup.mean, &config));
    assert!(case.warmup.min >= 0.001);
    assert_eq!(case.measured.sample_count, n_runs);
    assert!(case.measured.min >= 0.001);
}

/// Ranking picks the minimum mean and reports slow-down factors
#[test]
fn test_comparison_ranking() {
    let summaries: Vec<BenchSummary> = [5.0, 1.0, 3.0]
        .iter()
        .map(|&mean| BenchSummary {
            mean,
            min: mean,
            max: mean,
            sample_count: 1,
            ..Default::default()
        })
        .collect();

    let ranking = rank_summaries(&summaries).unwrap();

    assert_eq!(ranking.fastest, 1);
    let factors: Vec<f64> = ranking.slow_downs.iter().map(|s| s.factor).collect();
    assert_eq!(factors, vec![5.0, 3.0]);
}

/// A failing first case stops the comparison batch
#[test]
fn test_batch_short_circuit() {
    let calls = [counter(), counter(), counter()];
    let registry = CaseRegistry::new()
        .with("fails", counting(&calls[0], 2))
        .unwrap()
        .with("never_1", counting(&calls[1], 0))
        .unwrap()
        .with("never_2", counting(&calls[2], 0))
        .unwrap();
    let config = BenchConfig::default()
        .with_warmup(1)
        .with_fixed_runs(3)
        .with_compare(true);
    let mut log = EventLog::new();

    let outcome = run_session(&registry, &config, &mut log);

    assert!(outcome.aborted);
    assert_eq!(outcome.cases.len(), 1);
    assert_eq!(outcome.cases[0].measured.failed_count, 3);
    assert_eq!(calls[1].get(), 0);
    assert_eq!(calls[2].get(), 0);
    assert!(outcome.ranking.is_none());
    assert!(log.batch_summary().is_none());
    assert_eq!(outcome.exit_code(), 1);
}

/// Without compare mode a failing case does not affect its siblings
#[test]
fn test_independent_cases_all_measured() {
    let calls = [counter(), counter()];
    let registry = CaseRegistry::new()
        .with("fails", counting(&calls[0], 1))
        .unwrap()
        .with("passes", counting(&calls[1], 0))
        .unwrap();
    let config = BenchConfig::default().with_warmup(1).with_fixed_runs(4);

    let outcome = run_session(&registry, &config, &mut NullSink);

    assert_eq!(outcome.cases.len(), 2);
    assert_eq!(calls[1].get(), 5);
    assert_eq!(outcome.failure_count(), 1);
}

/// End-to-end compare session rendered as JSON Lines
#[test]
fn test_compare_session_json_output() {
    let registry = CaseRegistry::new()
        .with("sleepy", || {
            std::thread::sleep(Duration::from_millis(2));
            0
        })
        .unwrap()
        .with("noop", || 0)
        .unwrap();
    let config = BenchConfig::default()
        .with_warmup(1)
        .with_fixed_runs(3)
        .with_compare(true)
        .with_color(false);
    let names: Vec<String> = registry.names().map(str::to_string).collect();
    let mut sink = JsonSink::start(Vec::new(), &config.resolved(), &names, false).unwrap();

    let outcome = run_session(&registry, &config, &mut sink);

    assert_eq!(outcome.ranking.as_ref().unwrap().fastest, 1);
    assert_eq!(outcome.fastest().unwrap().name, "noop");

    let out = String::from_utf8(sink.into_inner()).unwrap();
    let events: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    // header + 2 cases × (start, summary) × 2 phases + batch
    assert_eq!(events.len(), 1 + 2 * 4 + 1);
    let batch = events.last().unwrap();
    assert_eq!(batch["event"], "batch-summary");
    assert_eq!(batch["ranking"]["fastest"], 1);
    assert_eq!(batch["cases"][1], "noop");
    // An infinite factor (zero fastest mean) serializes as null
    let factor = batch["ranking"]["slow_downs"][0]["factor"].as_f64();
    assert!(factor.is_none_or(|f| f > 1.0));
}

/// Events for one case arrive in phase order
#[test]
fn test_event_order_for_one_case() {
    let registry = CaseRegistry::new().with("ordered", || 0).unwrap();
    let config = BenchConfig::default().with_warmup(1).with_fixed_runs(1);
    let mut log = EventLog::new();

    run_session(&registry, &config, &mut log);

    let phases: Vec<(PhaseKind, &str)> = log
        .events()
        .iter()
        .filter_map(|e| match e {
            Event::PhaseStart { kind, .. } => Some((*kind, "start")),
            Event::PhaseSummary { kind, .. } => Some((*kind, "summary")),
            _ => None,
        })
        .collect();
    assert_eq!(
        phases,
        vec![
            (PhaseKind::Warmup, "start"),
            (PhaseKind::Warmup, "summary"),
            (PhaseKind::Measured, "start"),
            (PhaseKind::Measured, "summary"),
        ]
    );
}

/// Test mode tallies failed cases and never times anything
#[test]
fn test_check_run_reports_failed_cases() {
    fn add(x: i32, y: i32) -> i32 {
        x + y
    }

    let registry = CaseRegistry::new()
        .with("foo", || check::assert_eq(2, add(1, 1), "1 + 1 == 2"))
        .unwrap()
        .with("foobar", || check::assert_neq(2, add(1, 1), "1 + 1 != 2"))
        .unwrap()
        .with("bar", || {
            check::assert_gt(2, add(0, 1), "0 + 1 < 2") + check::assert_gt(1, add(0, 1), "0 + 1 < 1")
        })
        .unwrap();
    let mut log = EventLog::new();

    assert_eq!(run_tests(&registry, &mut log), 2);
    assert_eq!(log.events().len(), 4);
    assert!(log.summaries(PhaseKind::Measured).is_empty());
    assert_eq!(
        log.events().last(),
        Some(&Event::TestSummary {
            passed: 1,
            failed: 2
        })
    );
}
