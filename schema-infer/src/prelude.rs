//! Prelude for commonly used types and traits in schema-infer.

pub use crate::column::{CellValue, Column};
pub use crate::config::{EmptyColumnPolicy, InferenceConfig};
pub use crate::dataset::{Dataset, InferredSchema};
pub use crate::engine::{TypeInferenceEngine, TypeInferenceResult};
pub use crate::error::{InferenceError, Result};
pub use crate::observer::{InferenceEvent, InferenceObserver, NoopObserver, TracingObserver};
pub use crate::types::ColumnType;
