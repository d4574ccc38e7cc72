//! Synthetic record generators shared by tests and benches.

use rand::prelude::*;

use crate::record::Record;

/// The two-branch sales dataset used across the docs and tests.
///
/// Branch A is perfectly collinear (`sales = 2 * period`); branch B is noisy.
pub fn two_branch_sales() -> Vec<Record> {
    let mut records = Vec::new();
    for period in 1..=6 {
        records.push(
            Record::new()
                .with_field("branch", "A")
                .with_field("period", period as f64)
                .with_field("sales", (2 * period) as f64),
        );
    }
    let b_periods = [2.0, 4.0, 6.0, 8.0, 9.0, 10.0];
    let b_sales = [3.0, 5.0, 7.0, 12.0, 14.0, 16.0];
    for (&period, &sales) in b_periods.iter().zip(b_sales.iter()) {
        records.push(
            Record::new()
                .with_field("branch", "B")
                .with_field("period", period)
                .with_field("sales", sales),
        );
    }
    records
}

/// Generate records for `n_groups` groups with `per_group` members each.
///
/// Each group follows its own random line `y = a + b*x` plus uniform noise,
/// deterministically from `seed`.
pub fn random_grouped_records(n_groups: usize, per_group: usize, seed: u64) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::with_capacity(n_groups * per_group);

    for g in 0..n_groups {
        let slope: f64 = rng.gen_range(-2.0..2.0);
        let intercept: f64 = rng.gen_range(-10.0..10.0);
        for i in 0..per_group {
            let x = i as f64;
            let noise: f64 = rng.gen_range(-0.5..0.5);
            records.push(
                Record::new()
                    .with_field("key", format!("g{g}"))
                    .with_field("x", x)
                    .with_field("y", intercept + slope * x + noise),
            );
        }
    }
    records
}
