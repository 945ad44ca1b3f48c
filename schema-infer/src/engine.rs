//! Column type inference engine.
//!
//! The engine samples a column, runs the [`cascade`](crate::cascade) over the
//! sample and reports the decision to its observer. It holds no mutable state,
//! so one engine can classify any number of columns from any number of
//! threads.
//!
//! # Example
//!
//! ```rust
//! use schema_infer::{Column, ColumnType, TypeInferenceEngine};
//!
//! let engine = TypeInferenceEngine::builder()
//!     .sample_size(50)
//!     .date_threshold(0.9)
//!     .build()
//!     .unwrap();
//!
//! let column = Column::from_values("discount", vec!["10%", "25%", "99%"]);
//! assert_eq!(engine.infer(&column).unwrap(), ColumnType::Percentage);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::cascade::{classify, SampleContext};
use crate::column::Column;
use crate::config::{EmptyColumnPolicy, InferenceConfig};
use crate::dataset::{Dataset, InferredSchema};
use crate::error::Result;
use crate::observer::{InferenceEvent, InferenceObserver, TracingObserver};
use crate::sampling::Sample;
use crate::types::ColumnType;

/// Detailed outcome of classifying one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInferenceResult {
    /// Column name
    pub column: String,
    /// The inferred type
    pub inferred_type: ColumnType,
    /// 1-based position of the matching rule in the cascade
    pub rule_position: usize,
    /// Number of values in the sample
    pub samples_analyzed: usize,
    /// Null cells in the full column
    pub null_count: usize,
    /// Distinct non-null values in the full column
    pub distinct_count: usize,
    /// Rows in the full column, nulls included
    pub total_rows: usize,
}

/// Builder for TypeInferenceEngine
pub struct TypeInferenceEngineBuilder {
    config: InferenceConfig,
    observer: Option<Arc<dyn InferenceObserver>>,
}

impl TypeInferenceEngineBuilder {
    /// Replace the whole configuration
    pub fn config(mut self, config: InferenceConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of non-null values sampled per column
    pub fn sample_size(mut self, size: usize) -> Self {
        self.config.sample_size = size;
        self
    }

    /// Set the tokens the boolean rule accepts
    pub fn boolean_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.boolean_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Set the symbols the currency rule accepts
    pub fn currency_symbols<I: IntoIterator<Item = char>>(mut self, symbols: I) -> Self {
        self.config.currency_symbols = symbols.into_iter().collect();
        self
    }

    /// Set the fraction of the sample the temporal rules need
    pub fn date_threshold(mut self, threshold: f64) -> Self {
        self.config.date_threshold = threshold;
        self
    }

    /// Set the distinct ratio at which a column becomes an identifier
    pub fn cardinality_threshold(mut self, threshold: f64) -> Self {
        self.config.cardinality_threshold = threshold;
        self
    }

    /// Set the sampler seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set how schema inference treats all-null columns
    pub fn empty_columns(mut self, policy: EmptyColumnPolicy) -> Self {
        self.config.empty_columns = policy;
        self
    }

    /// Report decisions to `observer` instead of `tracing`
    pub fn observer(mut self, observer: impl InferenceObserver + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Validate the configuration and build the engine
    pub fn build(self) -> Result<TypeInferenceEngine> {
        self.config.validate()?;
        let observer: Arc<dyn InferenceObserver> = match self.observer {
            Some(observer) => observer,
            None => Arc::new(TracingObserver::default()),
        };
        Ok(TypeInferenceEngine {
            config: self.config,
            observer,
        })
    }
}

/// Main type inference engine
#[derive(Clone)]
pub struct TypeInferenceEngine {
    config: InferenceConfig,
    observer: Arc<dyn InferenceObserver>,
}

impl TypeInferenceEngine {
    /// Create a new builder for TypeInferenceEngine
    pub fn builder() -> TypeInferenceEngineBuilder {
        TypeInferenceEngineBuilder {
            config: InferenceConfig::default(),
            observer: None,
        }
    }

    /// Create a TypeInferenceEngine with default configuration
    pub fn new() -> Self {
        Self {
            config: InferenceConfig::default(),
            observer: Arc::new(TracingObserver::default()),
        }
    }

    /// Create an engine from a configuration, validating it first
    pub fn with_config(config: InferenceConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Infer the type of one column.
    pub fn infer(&self, column: &Column) -> Result<ColumnType> {
        self.infer_detailed(column)
            .map(|result| result.inferred_type)
    }

    /// Infer the type of one column, keeping the counts behind the decision.
    #[instrument(skip(self, column), fields(column = column.name()))]
    pub fn infer_detailed(&self, column: &Column) -> Result<TypeInferenceResult> {
        let sample = match Sample::draw(column, self.config.sample_size, self.config.seed) {
            Ok(sample) => sample,
            Err(error) => {
                self.observer.on_event(&InferenceEvent::Failed {
                    column: column.name(),
                    error: &error,
                });
                return Err(error);
            }
        };

        self.observer.on_event(&InferenceEvent::Sampled {
            column: column.name(),
            sample_size: sample.values().len(),
            non_null: column.non_null_count(),
            total_rows: column.total_rows(),
        });

        let ctx = SampleContext::new(&sample, column, &self.config);
        let (inferred_type, position) = classify(&ctx);

        self.observer.on_event(&InferenceEvent::RuleMatched {
            column: column.name(),
            column_type: inferred_type,
            position,
        });

        Ok(TypeInferenceResult {
            column: column.name().to_string(),
            inferred_type,
            rule_position: position,
            samples_analyzed: sample.values().len(),
            null_count: column.null_count(),
            distinct_count: ctx.column_distinct(),
            total_rows: column.total_rows(),
        })
    }

    /// Infer the type of every column of a dataset, in column order.
    ///
    /// All-null columns follow the configured [`EmptyColumnPolicy`]; any other
    /// error aborts the whole schema.
    #[instrument(skip(self, dataset), fields(columns = dataset.len()))]
    pub fn infer_schema(&self, dataset: &Dataset) -> Result<InferredSchema> {
        let mut schema = InferredSchema::default();
        for column in dataset.columns() {
            match self.infer(column) {
                Ok(column_type) => schema.push(column.name(), column_type),
                Err(error) if error.is_empty_column() => match self.config.empty_columns {
                    EmptyColumnPolicy::Fail => return Err(error),
                    EmptyColumnPolicy::String => {
                        debug!(column = column.name(), "Empty column recorded as string");
                        schema.push(column.name(), ColumnType::String);
                    }
                    EmptyColumnPolicy::Skip => {
                        debug!(column = column.name(), "Empty column skipped");
                    }
                },
                Err(error) => return Err(error),
            }
        }
        Ok(schema)
    }
}

impl Default for TypeInferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypeInferenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeInferenceEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
