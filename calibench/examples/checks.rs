//! Pass/fail checks
//!
//! Run with: `cargo run --example checks -- --test`
//!
//! Each case sums the results of its `check` helpers; a non-zero total marks
//! it failed. `foo` passes while `foobar` and `bar` fail, so the process
//! exits with status 2.

use calibench::prelude::*;

fn add(x: i32, y: i32) -> i32 {
    x + y
}

fn foo() -> u32 {
    check::assert_eq(2, add(1, 1), "1 + 1 == 2")
}

fn bar() -> u32 {
    let mut failures = 0;
    failures += check::assert_gt(2, add(0, 1), "0 + 1 < 2");
    failures += check::assert_gt(1, add(0, 1), "0 + 1 < 1 (will fail)");
    failures
}

fn foobar() -> u32 {
    check::assert_neq(2, add(1, 1), "1 + 1 != 2 (will fail)")
}

fn main() -> anyhow::Result<()> {
    let registry = CaseRegistry::new()
        .with("foo", foo)?
        .with("foobar", foobar)?
        .with("bar", bar)?;

    std::process::exit(calibench::run(registry)?);
}
