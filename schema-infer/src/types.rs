//! The closed set of semantic column types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// Semantic type assigned to a column.
///
/// Exactly one variant is produced per column; `String` is the universal
/// fallback, so there is no "unknown" or mixed result. Serializes as the
/// lowercase tag (`"integer"`, `"timestamp"`, `"id"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Two-valued columns drawn from the boolean token set
    Boolean,
    /// Amounts carrying a currency symbol or ISO code
    Currency,
    /// Numbers suffixed with `%`
    Percentage,
    /// Integral numbers
    Integer,
    /// Non-integral numbers
    Float,
    /// Date/time values with a time-of-day component
    Timestamp,
    /// Calendar dates without a time of day
    Date,
    /// High-cardinality identifier columns
    Id,
    /// Free text
    String,
}

impl ColumnType {
    /// Every variant, in declaration order.
    pub const ALL: [ColumnType; 9] = [
        ColumnType::Boolean,
        ColumnType::Currency,
        ColumnType::Percentage,
        ColumnType::Integer,
        ColumnType::Float,
        ColumnType::Timestamp,
        ColumnType::Date,
        ColumnType::Id,
        ColumnType::String,
    ];

    /// Lowercase tag used when the type is serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Boolean => "boolean",
            ColumnType::Currency => "currency",
            ColumnType::Percentage => "percentage",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Date => "date",
            ColumnType::Id => "id",
            ColumnType::String => "string",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = InferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| InferenceError::Serialization(format!("unknown column type '{s}'")))
    }
}
