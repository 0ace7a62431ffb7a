//! Factorial benchmarks
//!
//! Run with: `cargo run --release --example factorial -- --compare`
//!
//! Without `--compare` every case is measured independently. With it, the
//! cases are ranked by mean runtime and the first failing case aborts the
//! batch. `checked_factorial_25` overflows `u64` and reports a failure on
//! every call, so pass a filter such as `factorial_1` to skip it.

use calibench::prelude::*;
use std::hint::black_box;

fn factorial(n: u64) -> u64 {
    (1..=n).fold(1u64, |acc, k| acc.wrapping_mul(k))
}

fn checked_factorial(n: u64) -> Option<u64> {
    (1..=n).try_fold(1u64, |acc, k| acc.checked_mul(k))
}

fn main() -> anyhow::Result<()> {
    let registry = CaseRegistry::new()
        .with("factorial_100", || {
            black_box(factorial(black_box(100)));
            0
        })?
        .with("factorial_1000", || {
            black_box(factorial(black_box(1_000)));
            0
        })?
        .with("factorial_10000", || {
            black_box(factorial(black_box(10_000)));
            0
        })?
        .with("checked_factorial_25", || {
            match black_box(checked_factorial(black_box(25))) {
                Some(_) => 0,
                None => 1,
            }
        })?;

    std::process::exit(calibench::run(registry)?);
}
