//! Seeded column generators for tests and benchmarks.
//!
//! Every generator takes a row count and a seed and produces the same column
//! for the same arguments. Each one is shaped so the engine, with its default
//! configuration, classifies it as the type named by the generator.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::column::{CellValue, Column};
use crate::dataset::Dataset;
use crate::types::ColumnType;

const WORDS: [&str; 6] = ["north", "south", "east", "west", "central", "remote"];

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid base date")
}

/// Whole numbers between -10 000 and 10 000.
pub fn integer_column(name: &str, rows: usize, seed: u64) -> Column {
    let mut rng = StdRng::seed_from_u64(seed);
    Column::from_values(
        name,
        (0..rows).map(|_| rng.random_range(-10_000i64..10_000).to_string()),
    )
}

/// Decimals with a nonzero fractional part.
pub fn float_column(name: &str, rows: usize, seed: u64) -> Column {
    let mut rng = StdRng::seed_from_u64(seed);
    Column::from_values(
        name,
        (0..rows).map(|_| {
            let whole = rng.random_range(0..1_000);
            let frac = rng.random_range(1..1_000);
            format!("{whole}.{frac:03}")
        }),
    )
}

/// `"True"` and `"False"`; both appear whenever `rows >= 2`.
pub fn boolean_column(name: &str, rows: usize, seed: u64) -> Column {
    let mut rng = StdRng::seed_from_u64(seed);
    Column::from_values(
        name,
        (0..rows).map(|i| {
            let flag = match i {
                0 => true,
                1 => false,
                _ => rng.random_bool(0.5),
            };
            if flag {
                "True"
            } else {
                "False"
            }
        }),
    )
}

/// Values like `"42%"` or `"12.5%"`.
pub fn percentage_column(name: &str, rows: usize, seed: u64) -> Column {
    let mut rng = StdRng::seed_from_u64(seed);
    Column::from_values(
        name,
        (0..rows).map(|_| {
            if rng.random_bool(0.5) {
                format!("{}%", rng.random_range(0..100))
            } else {
                format!("{}.5%", rng.random_range(0..100))
            }
        }),
    )
}

/// Dollar amounts, with an occasional `EUR` suffix.
pub fn currency_column(name: &str, rows: usize, seed: u64) -> Column {
    let mut rng = StdRng::seed_from_u64(seed);
    Column::from_values(
        name,
        (0..rows).map(|_| {
            let amount = format!(
                "{}.{:02}",
                rng.random_range(1..5_000),
                rng.random_range(0..100)
            );
            if rng.random_bool(0.9) {
                format!("${amount}")
            } else {
                format!("{amount} EUR")
            }
        }),
    )
}

/// `YYYY-MM-DD` dates within a few years of 2020-01-01.
pub fn date_column(name: &str, rows: usize, seed: u64) -> Column {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = base_date();
    Column::from_values(
        name,
        (0..rows).map(|_| {
            let date = base + Duration::days(rng.random_range(0..2_000));
            date.format("%Y-%m-%d").to_string()
        }),
    )
}

/// `YYYY-MM-DD HH:MM:SS` timestamps whose time of day is never midnight.
pub fn timestamp_column(name: &str, rows: usize, seed: u64) -> Column {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = base_date();
    Column::from_values(
        name,
        (0..rows).map(|_| {
            let date = base + Duration::days(rng.random_range(0..2_000));
            format!(
                "{} {:02}:{:02}:{:02}",
                date.format("%Y-%m-%d"),
                rng.random_range(1..24),
                rng.random_range(0..60),
                rng.random_range(0..60)
            )
        }),
    )
}

/// Unique codes like `"CUST-000042"`, shuffled.
pub fn id_column(name: &str, rows: usize, seed: u64) -> Column {
    let mut rng = StdRng::seed_from_u64(seed);
    let offset = rng.random_range(0..1_000_000usize);
    Column::from_values(
        name,
        (0..rows).map(|i| format!("CUST-{:06}", (i + offset) % 1_000_000)),
    )
}

/// A handful of repeated words; reads as free text once `rows >= 10`.
pub fn text_column(name: &str, rows: usize, seed: u64) -> Column {
    let mut rng = StdRng::seed_from_u64(seed);
    Column::from_values(
        name,
        (0..rows).map(|_| WORDS[rng.random_range(0..WORDS.len())]),
    )
}

/// Replaces roughly `null_fraction` of the cells with nulls, keeping the first
/// cell so the column never becomes empty.
pub fn with_nulls(column: Column, null_fraction: f64, seed: u64) -> Column {
    let mut rng = StdRng::seed_from_u64(seed);
    let name = column.name().to_string();
    let values = column
        .values()
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if i > 0 && rng.random_bool(null_fraction) {
                CellValue::Null
            } else {
                v.clone()
            }
        })
        .collect();
    Column::new(name, values)
}

/// One column per non-default type, paired with the type it should receive.
pub fn typed_columns(rows: usize, seed: u64) -> Vec<(Column, ColumnType)> {
    vec![
        (boolean_column("is_active", rows, seed), ColumnType::Boolean),
        (
            percentage_column("discount", rows, seed),
            ColumnType::Percentage,
        ),
        (currency_column("price", rows, seed), ColumnType::Currency),
        (integer_column("quantity", rows, seed), ColumnType::Integer),
        (float_column("weight", rows, seed), ColumnType::Float),
        (
            timestamp_column("created_at", rows, seed),
            ColumnType::Timestamp,
        ),
        (date_column("ship_date", rows, seed), ColumnType::Date),
        (id_column("customer_id", rows, seed), ColumnType::Id),
        (text_column("region", rows, seed), ColumnType::String),
    ]
}

/// A dataset holding every column of [`typed_columns`].
pub fn mixed_dataset(rows: usize, seed: u64) -> Dataset {
    typed_columns(rows, seed)
        .into_iter()
        .map(|(column, _)| column)
        .collect()
}
