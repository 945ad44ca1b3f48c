//! Multi-column input and the schema inferred from it.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use arrow::record_batch::RecordBatch;

use crate::column::Column;
use crate::error::Result;
use crate::types::ColumnType;

/// An ordered collection of columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Appends a column, builder style.
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn push(&mut self, column: Column) {
        self.columns.push(column);
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// First column with the given name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Converts every field of an Arrow record batch into a column.
    pub fn from_record_batch(batch: &RecordBatch) -> Result<Self> {
        let schema = batch.schema();
        let columns = schema
            .fields()
            .iter()
            .zip(batch.columns())
            .map(|(field, array)| Column::from_array_ref(field.name().as_str(), array))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { columns })
    }
}

impl FromIterator<Column> for Dataset {
    fn from_iter<T: IntoIterator<Item = Column>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Column types in dataset order.
///
/// Serializes as a JSON object whose keys keep the dataset's column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferredSchema {
    entries: Vec<(String, ColumnType)>,
}

impl InferredSchema {
    pub fn push(&mut self, column: impl Into<String>, column_type: ColumnType) {
        self.entries.push((column.into(), column_type));
    }

    /// Type of the first column with the given name.
    pub fn get(&self, column: &str) -> Option<ColumnType> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, ty)| *ty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.entries.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the `{"schema": {"column": "type", ...}}` document.
    pub fn to_json(&self) -> Result<String> {
        #[derive(Serialize)]
        struct SchemaDocument<'a> {
            schema: &'a InferredSchema,
        }

        Ok(serde_json::to_string(&SchemaDocument { schema: self })?)
    }
}

impl Serialize for InferredSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, ty) in &self.entries {
            map.serialize_entry(name, ty)?;
        }
        map.end()
    }
}
