//! Raw column input to the inference engine.
//!
//! A [`Column`] is a named sequence of nullable [`CellValue`]s. Cells are
//! rendered to strings before any rule looks at them, so a column loaded as
//! native integers and one loaded as text classify the same way.

use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Date32Array, Float32Array, Float64Array, Int16Array, Int32Array,
    Int64Array, Int8Array, LargeStringArray, StringArray, StringViewArray,
    TimestampMicrosecondArray, TimestampMillisecondArray, TimestampNanosecondArray,
    TimestampSecondArray, UInt16Array, UInt32Array, UInt64Array, UInt8Array,
};
use arrow::datatypes::{DataType, TimeUnit};
use serde::{Deserialize, Serialize};

use crate::error::{InferenceError, Result};

/// One raw cell of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing value
    Null,
    /// Native boolean
    Boolean(bool),
    /// Native integer
    Integer(i64),
    /// Native float; NaN counts as missing
    Float(f64),
    /// Text as read from the source
    Text(String),
}

impl CellValue {
    /// Returns true for `Null` and for NaN floats.
    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Renders the cell to the string form the cascade tests against.
    ///
    /// Booleans render as `True`/`False` and floats always keep a decimal
    /// point (`1.0`), so native values line up with the default token sets.
    pub fn render(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Boolean(true) => Some("True".to_string()),
            CellValue::Boolean(false) => Some("False".to_string()),
            CellValue::Integer(v) => Some(v.to_string()),
            CellValue::Float(v) if v.is_nan() => None,
            CellValue::Float(v) => Some(format!("{v:?}")),
            CellValue::Text(s) => Some(s.clone()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Integer(i64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

/// A named, immutable sequence of nullable cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    values: Vec<CellValue>,
}

impl Column {
    /// Creates a column from already-built cells.
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Creates a column from anything convertible into cells.
    ///
    /// ```rust
    /// use schema_infer::Column;
    ///
    /// let column = Column::from_values("score", vec![Some("1.5"), None, Some("2.25")]);
    /// assert_eq!(column.total_rows(), 3);
    /// assert_eq!(column.null_count(), 1);
    /// ```
    pub fn from_values<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        Self::new(name, values.into_iter().map(Into::into).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    /// Number of rows, nulls included.
    pub fn total_rows(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    pub fn non_null_count(&self) -> usize {
        self.total_rows() - self.null_count()
    }

    /// Rendered strings of the non-null cells, in row order.
    pub fn rendered(&self) -> impl Iterator<Item = String> + '_ {
        self.values.iter().filter_map(CellValue::render)
    }

    /// Number of distinct non-null rendered values across the whole column.
    pub fn distinct_count(&self) -> usize {
        self.rendered().collect::<HashSet<_>>().len()
    }

    /// Builds a column from an Arrow array, preserving nulls.
    ///
    /// Dates render as `YYYY-MM-DD` and timestamps as `YYYY-MM-DD HH:MM:SS`
    /// (fractional seconds kept when present). Any physical type outside
    /// strings, integers, floats, booleans, dates and timestamps fails with
    /// [`InferenceError::UnsupportedType`].
    pub fn from_arrow(name: impl Into<String>, array: &dyn Array) -> Result<Self> {
        let name = name.into();
        let values = match array.data_type() {
            DataType::Utf8 => collect_cells::<StringArray>(&name, array, |a, i| {
                CellValue::Text(a.value(i).to_string())
            })?,
            DataType::LargeUtf8 => collect_cells::<LargeStringArray>(&name, array, |a, i| {
                CellValue::Text(a.value(i).to_string())
            })?,
            DataType::Utf8View => collect_cells::<StringViewArray>(&name, array, |a, i| {
                CellValue::Text(a.value(i).to_string())
            })?,
            DataType::Boolean => {
                collect_cells::<BooleanArray>(&name, array, |a, i| CellValue::Boolean(a.value(i)))?
            }
            DataType::Int8 => collect_cells::<Int8Array>(&name, array, |a, i| {
                CellValue::Integer(i64::from(a.value(i)))
            })?,
            DataType::Int16 => collect_cells::<Int16Array>(&name, array, |a, i| {
                CellValue::Integer(i64::from(a.value(i)))
            })?,
            DataType::Int32 => collect_cells::<Int32Array>(&name, array, |a, i| {
                CellValue::Integer(i64::from(a.value(i)))
            })?,
            DataType::Int64 => {
                collect_cells::<Int64Array>(&name, array, |a, i| CellValue::Integer(a.value(i)))?
            }
            DataType::UInt8 => collect_cells::<UInt8Array>(&name, array, |a, i| {
                CellValue::Integer(i64::from(a.value(i)))
            })?,
            DataType::UInt16 => collect_cells::<UInt16Array>(&name, array, |a, i| {
                CellValue::Integer(i64::from(a.value(i)))
            })?,
            DataType::UInt32 => collect_cells::<UInt32Array>(&name, array, |a, i| {
                CellValue::Integer(i64::from(a.value(i)))
            })?,
            // u64 above i64::MAX keeps its exact digits as text
            DataType::UInt64 => collect_cells::<UInt64Array>(&name, array, |a, i| {
                let v = a.value(i);
                i64::try_from(v).map_or_else(|_| CellValue::Text(v.to_string()), CellValue::Integer)
            })?,
            DataType::Float32 => collect_cells::<Float32Array>(&name, array, |a, i| {
                CellValue::Float(f64::from(a.value(i)))
            })?,
            DataType::Float64 => {
                collect_cells::<Float64Array>(&name, array, |a, i| CellValue::Float(a.value(i)))?
            }
            DataType::Date32 => {
                collect_cells::<Date32Array>(&name, array, |a, i| render_date(a.value_as_date(i)))?
            }
            DataType::Timestamp(TimeUnit::Second, _) => {
                collect_cells::<TimestampSecondArray>(&name, array, |a, i| {
                    render_datetime(a.value_as_datetime(i))
                })?
            }
            DataType::Timestamp(TimeUnit::Millisecond, _) => {
                collect_cells::<TimestampMillisecondArray>(&name, array, |a, i| {
                    render_datetime(a.value_as_datetime(i))
                })?
            }
            DataType::Timestamp(TimeUnit::Microsecond, _) => {
                collect_cells::<TimestampMicrosecondArray>(&name, array, |a, i| {
                    render_datetime(a.value_as_datetime(i))
                })?
            }
            DataType::Timestamp(TimeUnit::Nanosecond, _) => {
                collect_cells::<TimestampNanosecondArray>(&name, array, |a, i| {
                    render_datetime(a.value_as_datetime(i))
                })?
            }
            other => return Err(InferenceError::unsupported_type(name, other)),
        };

        Ok(Self { name, values })
    }

    /// Shorthand for [`Column::from_arrow`] over a shared array reference.
    pub fn from_array_ref(name: impl Into<String>, array: &ArrayRef) -> Result<Self> {
        Self::from_arrow(name, Arc::as_ref(array))
    }
}

fn collect_cells<A: Array + 'static>(
    name: &str,
    array: &dyn Array,
    convert: impl Fn(&A, usize) -> CellValue,
) -> Result<Vec<CellValue>> {
    let typed = array.as_any().downcast_ref::<A>().ok_or_else(|| {
        InferenceError::sampling(
            name,
            format!(
                "array does not match its declared type {}",
                array.data_type()
            ),
        )
    })?;

    Ok((0..typed.len())
        .map(|i| {
            if typed.is_null(i) {
                CellValue::Null
            } else {
                convert(typed, i)
            }
        })
        .collect())
}

fn render_date(value: Option<chrono::NaiveDate>) -> CellValue {
    value.map_or(CellValue::Null, |d| {
        CellValue::Text(d.format("%Y-%m-%d").to_string())
    })
}

fn render_datetime(value: Option<chrono::NaiveDateTime>) -> CellValue {
    value.map_or(CellValue::Null, |dt| {
        CellValue::Text(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_matches_tabular_conventions() {
        assert_eq!(CellValue::Boolean(true).render().as_deref(), Some("True"));
        assert_eq!(CellValue::Boolean(false).render().as_deref(), Some("False"));
        assert_eq!(CellValue::Integer(-42).render().as_deref(), Some("-42"));
        assert_eq!(CellValue::Float(1.0).render().as_deref(), Some("1.0"));
        assert_eq!(CellValue::Float(2.5).render().as_deref(), Some("2.5"));
        assert_eq!(
            CellValue::Text("abc".into()).render().as_deref(),
            Some("abc")
        );
        assert_eq!(CellValue::Null.render(), None);
        assert_eq!(CellValue::Float(f64::NAN).render(), None);
    }

    #[test]
    fn test_nan_counts_as_null() {
        let column = Column::from_values("x", vec![1.5, f64::NAN, 2.5]);
        assert_eq!(column.total_rows(), 3);
        assert_eq!(column.null_count(), 1);
        assert_eq!(column.non_null_count(), 2);
    }

    #[test]
    fn test_distinct_count_ignores_nulls() {
        let column = Column::from_values(
            "city",
            vec![Some("Madrid"), None, Some("Lima"), Some("Madrid"), None],
        );
        assert_eq!(column.distinct_count(), 2);
        assert_eq!(column.rendered().count(), 3);
    }

    #[test]
    fn test_from_arrow_strings_and_nulls() {
        let array = StringArray::from(vec![Some("a"), None, Some("c")]);
        let column = Column::from_arrow("letters", &array).unwrap();

        assert_eq!(column.name(), "letters");
        assert_eq!(
            column.values(),
            &[
                CellValue::Text("a".into()),
                CellValue::Null,
                CellValue::Text("c".into())
            ]
        );
    }

    #[test]
    fn test_from_arrow_numeric_and_boolean() {
        let ints = Int32Array::from(vec![Some(1), None, Some(3)]);
        let column = Column::from_arrow("ints", &ints).unwrap();
        assert_eq!(column.values()[0], CellValue::Integer(1));
        assert!(column.values()[1].is_null());

        let floats = Float64Array::from(vec![1.25, 2.5]);
        let column = Column::from_arrow("floats", &floats).unwrap();
        assert_eq!(column.values()[1], CellValue::Float(2.5));

        let bools = BooleanArray::from(vec![true, false]);
        let column = Column::from_arrow("flags", &bools).unwrap();
        assert_eq!(column.rendered().collect::<Vec<_>>(), vec!["True", "False"]);

        let big = UInt64Array::from(vec![u64::MAX]);
        let column = Column::from_arrow("big", &big).unwrap();
        assert_eq!(column.values()[0], CellValue::Text(u64::MAX.to_string()));
    }

    #[test]
    fn test_from_arrow_temporal() {
        // 19358 days after the epoch is 2023-01-01
        let dates = Date32Array::from(vec![Some(19358), None]);
        let column = Column::from_arrow("day", &dates).unwrap();
        assert_eq!(column.values()[0], CellValue::Text("2023-01-01".into()));
        assert!(column.values()[1].is_null());

        let stamps = TimestampSecondArray::from(vec![1_672_579_800]);
        let column = Column::from_arrow("at", &stamps).unwrap();
        assert_eq!(
            column.values()[0],
            CellValue::Text("2023-01-01 13:30:00".into())
        );
    }

    #[test]
    fn test_from_arrow_rejects_unsupported_types() {
        let array = arrow::array::BinaryArray::from(vec![b"ab".as_ref()]);
        let err = Column::from_arrow("blob", &array).unwrap_err();
        assert!(matches!(err, InferenceError::UnsupportedType { .. }));
    }
}
