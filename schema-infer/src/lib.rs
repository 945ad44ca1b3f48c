//! # schema-infer - Column Type Inference for Tabular Data
//!
//! schema-infer assigns every column of a tabular dataset a semantic type
//! (boolean, currency, percentage, integer, float, timestamp, date,
//! identifier or free text) without a user-supplied schema. Downstream
//! analyses use the result to decide which statistical treatment applies to
//! each column.
//!
//! ## Quick Start
//!
//! ```rust
//! use schema_infer::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let engine = TypeInferenceEngine::builder()
//!     .observer(NoopObserver)
//!     .build()?;
//!
//! let dataset = Dataset::default()
//!     .with_column(Column::from_values("active", vec!["True", "False", "True"]))
//!     .with_column(Column::from_values("price", vec!["$100", "$250", "$99"]))
//!     .with_column(Column::from_values("signup", vec!["2023-01-01", "2023-02-15"]));
//!
//! let schema = engine.infer_schema(&dataset)?;
//! assert_eq!(schema.get("active"), Some(ColumnType::Boolean));
//! assert_eq!(schema.get("price"), Some(ColumnType::Currency));
//! assert_eq!(schema.get("signup"), Some(ColumnType::Date));
//! assert_eq!(
//!     schema.to_json()?,
//!     r#"{"schema":{"active":"boolean","price":"currency","signup":"date"}}"#
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## How a column is classified
//!
//! 1. A sample of at most `sample_size` non-null values is drawn with a fixed
//!    seed, so the same column always yields the same type.
//! 2. The [`cascade`] runs nine rules in a fixed order and stops at the first
//!    that accepts the sample: Boolean, Percentage, Currency, Integer, Float,
//!    Timestamp, Date, Id, String.
//! 3. The decision is reported to an [`observer::InferenceObserver`]. The
//!    default observer writes `tracing` events.
//!
//! A column with no non-null values fails with
//! [`InferenceError::EmptyColumn`]. Rule non-matches are never errors.
//!
//! ## Architecture
//!
//! - **`engine`**: `TypeInferenceEngine`, its builder and schema inference
//! - **`cascade`**: the ordered rules and the cardinality heuristic
//! - **`sampling`**: deterministic sampling of non-null values
//! - **`column`** / **`dataset`**: input types and the Arrow adapter
//! - **`temporal`** / **`numeric`**: value parsers shared by the rules
//! - **`config`**: `InferenceConfig`, defaults and validation
//! - **`observer`** / **`logging`**: decision reporting and subscriber setup

pub mod cascade;
pub mod column;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod logging;
pub mod numeric;
pub mod observer;
pub mod prelude;
pub mod sampling;
pub mod temporal;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;

pub use column::{CellValue, Column};
pub use config::{EmptyColumnPolicy, InferenceConfig};
pub use dataset::{Dataset, InferredSchema};
pub use engine::{TypeInferenceEngine, TypeInferenceEngineBuilder, TypeInferenceResult};
pub use error::{InferenceError, Result};
pub use types::ColumnType;
