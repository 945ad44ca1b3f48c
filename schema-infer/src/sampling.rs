//! Deterministic sampling of a column's non-null values.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::column::{CellValue, Column};
use crate::error::{InferenceError, Result};

/// Rendered values drawn from one column, in draw order.
///
/// Draw order matters: the temporal rules stop scanning at the first value
/// they cannot parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    values: Vec<String>,
}

impl Sample {
    /// Draws `min(sample_size, non_null_count)` values without replacement.
    ///
    /// The generator is seeded with `seed`, so the same column always yields
    /// the same sample. Fails with [`InferenceError::EmptyColumn`] when the
    /// column has no non-null values.
    pub fn draw(column: &Column, sample_size: usize, seed: u64) -> Result<Self> {
        let cells: Vec<&CellValue> = column.values().iter().filter(|v| !v.is_null()).collect();
        if cells.is_empty() {
            return Err(InferenceError::empty_column(column.name()));
        }
        if sample_size == 0 {
            return Err(InferenceError::sampling(
                column.name(),
                "sample size must be positive",
            ));
        }

        let amount = sample_size.min(cells.len());
        let mut rng = StdRng::seed_from_u64(seed);
        let values = rand::seq::index::sample(&mut rng, cells.len(), amount)
            .into_iter()
            .filter_map(|i| cells[i].render())
            .collect::<Vec<_>>();

        if values.len() != amount {
            return Err(InferenceError::sampling(
                column.name(),
                format!("expected {amount} rendered values, got {}", values.len()),
            ));
        }

        Ok(Self { values })
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}
