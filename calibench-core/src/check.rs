//! Checks - Pass/Fail Test Runs
//!
//! A case doubles as a plain correctness test: it is called once and passes
//! when it returns `0`. The `assert_*` helpers return `1` on a failed check
//! and `0` otherwise, so a test body sums them into its return value:
//!
//! ```ignore
//! let registry = CaseRegistry::new().with("add", || {
//!     let mut failures = 0;
//!     failures += check::assert_eq(2, 1 + 1, "1 + 1 == 2");
//!     failures += check::assert_gt(2, 0 + 1, "0 + 1 < 2");
//!     failures
//! })?;
//! let failed_cases = check::run_tests(&registry, &mut NullSink);
//! ```
//!
//! Unlike a benchmark phase there is no timing loop: each case runs exactly
//! once and every case runs, regardless of earlier failures.

use crate::events::{Event, ReportSink};
use crate::registry::CaseRegistry;
use std::fmt::Debug;

fn report(passed: bool, what: &str, expected: &dyn Debug, actual: &dyn Debug) -> u32 {
    if passed {
        tracing::debug!(check = what, "check passed");
        0
    } else {
        tracing::warn!(
            check = what,
            expected = ?expected,
            actual = ?actual,
            "check failed"
        );
        1
    }
}

/// `1` unless `expected == actual`
pub fn assert_eq<T: PartialEq + Debug>(expected: T, actual: T, what: &str) -> u32 {
    report(expected == actual, what, &expected, &actual)
}

/// `1` unless `expected != actual`
pub fn assert_neq<T: PartialEq + Debug>(expected: T, actual: T, what: &str) -> u32 {
    report(expected != actual, what, &expected, &actual)
}

/// `1` unless `bound > actual`
pub fn assert_gt<T: PartialOrd + Debug>(bound: T, actual: T, what: &str) -> u32 {
    report(bound > actual, what, &bound, &actual)
}

/// Call every case once as a test.
///
/// Emits one `TestResult` per case and a final `TestSummary`.
///
/// # Returns
/// The number of failed cases.
pub fn run_tests(registry: &CaseRegistry, sink: &mut dyn ReportSink) -> u64 {
    let mut passed = 0u64;
    let mut failed = 0u64;

    for case in registry {
        let failures = case.call();
        if failures > 0 {
            failed += 1;
            tracing::warn!(case = case.name(), failures, "test failed");
        } else {
            passed += 1;
        }
        sink.emit(Event::TestResult {
            case: case.name().to_string(),
            failures,
        });
    }

    tracing::info!(passed, failed, "tests complete");
    sink.emit(Event::TestSummary { passed, failed });
    failed
}
