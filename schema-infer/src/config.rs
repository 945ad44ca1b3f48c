//! Configuration for the type inference engine.
//!
//! An [`InferenceConfig`] is built once, validated when the engine is
//! constructed and never mutated afterwards. It deserializes from JSON with
//! every missing key falling back to its default:
//!
//! ```rust
//! use schema_infer::InferenceConfig;
//!
//! let config = InferenceConfig::from_json(r#"{"sample_size": 250}"#).unwrap();
//! assert_eq!(config.sample_size, 250);
//! assert_eq!(config.date_threshold, 0.8);
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{InferenceError, Result};

/// Default number of non-null values sampled per column.
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

/// Default fraction of the sample that must parse for the temporal rules.
pub const DEFAULT_DATE_THRESHOLD: f64 = 0.8;

/// Default distinct-over-total ratio at which a column reads as an identifier.
pub const DEFAULT_CARDINALITY_THRESHOLD: f64 = 0.8;

/// Default sampler seed.
pub const DEFAULT_SEED: u64 = 0;

/// Tokens recognised by the boolean rule, compared case-sensitively.
pub const DEFAULT_BOOLEAN_TOKENS: [&str; 10] = [
    "0", "1", "True", "False", "true", "false", "Sí", "No", "si", "no",
];

/// Symbols recognised by the currency rule.
pub const DEFAULT_CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// What schema inference does with a column that has no non-null values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyColumnPolicy {
    /// Propagate the empty column error
    #[default]
    Fail,
    /// Record the column as `String`
    String,
    /// Leave the column out of the schema
    Skip,
}

/// Configuration for the type inference engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Number of non-null values to sample (default: 100)
    pub sample_size: usize,
    /// Values the boolean rule accepts
    pub boolean_tokens: BTreeSet<String>,
    /// Characters the currency rule accepts as symbols
    pub currency_symbols: BTreeSet<char>,
    /// Fraction of the sample the temporal rules need (default: 0.8)
    pub date_threshold: f64,
    /// Distinct ratio for the identifier rule (default: 0.8)
    pub cardinality_threshold: f64,
    /// Seed of the sampler's random generator (default: 0)
    pub seed: u64,
    /// Handling of all-null columns during schema inference
    pub empty_columns: EmptyColumnPolicy,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            boolean_tokens: DEFAULT_BOOLEAN_TOKENS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            currency_symbols: DEFAULT_CURRENCY_SYMBOLS.into_iter().collect(),
            date_threshold: DEFAULT_DATE_THRESHOLD,
            cardinality_threshold: DEFAULT_CARDINALITY_THRESHOLD,
            seed: DEFAULT_SEED,
            empty_columns: EmptyColumnPolicy::default(),
        }
    }
}

impl InferenceConfig {
    /// Parses a configuration from JSON; absent keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every field is in range.
    pub fn validate(&self) -> Result<()> {
        if self.sample_size == 0 {
            return Err(InferenceError::invalid_config(
                "sample_size must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.date_threshold) {
            return Err(InferenceError::invalid_config(format!(
                "date_threshold must be within [0, 1], got {}",
                self.date_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.cardinality_threshold) {
            return Err(InferenceError::invalid_config(format!(
                "cardinality_threshold must be within [0, 1], got {}",
                self.cardinality_threshold
            )));
        }
        if self.boolean_tokens.is_empty() {
            return Err(InferenceError::invalid_config(
                "boolean_tokens must not be empty",
            ));
        }
        Ok(())
    }
}
