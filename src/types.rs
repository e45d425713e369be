//! Core data model types.
//!
//! Ingestion produces an in-memory [`DataSet`]: a [`Schema`] (the header's column names) plus
//! row-major [`Value`] storage. Every row holds exactly one value per schema column, so all
//! records read from one source share the same column set.

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

/// Kind of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Missing/empty value.
    Null,
    /// Finite 64-bit float.
    Number,
    /// UTF-8 string.
    String,
}

/// A single loosely-typed cell value.
///
/// Serializes as a bare JSON `null`, number, or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// Numeric value. Ingestion only ever produces finite numbers.
    Number(f64),
    /// Anything non-empty that did not parse as a number.
    Utf8(String),
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Number(_) => ValueKind::Number,
            Value::Utf8(_) => ValueKind::String,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the number if this is a [`Value::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string if this is a [`Value::Utf8`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Infer a value from a raw cell.
    ///
    /// The cell is trimmed; empty becomes [`Value::Null`], a complete decimal or exponential
    /// number with a finite result becomes [`Value::Number`], anything else is kept as a string.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Value::Number(v),
            _ => Value::Utf8(trimmed.to_owned()),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<Option<f64>> for Value {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Value::Null, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Utf8(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Utf8(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Number(v) => write!(f, "{v}"),
            Value::Utf8(s) => f.write_str(s),
        }
    }
}

/// Ordered list of unique column names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Column names in header order.
    pub columns: Vec<String>,
}

impl Schema {
    /// Create a new schema from column names.
    ///
    /// # Panics
    ///
    /// Panics if a column name appears more than once.
    pub fn new(columns: Vec<String>) -> Self {
        for (i, name) in columns.iter().enumerate() {
            assert!(
                !columns[..i].contains(name),
                "duplicate column name '{name}' in schema"
            );
        }
        Self { columns }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.as_str())
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] columns. Row order is
/// the order rows appeared in the source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    ///
    /// # Panics
    ///
    /// Panics if any row's length differs from the schema column count.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        let expected_len = schema.len();
        for (i, row) in rows.iter().enumerate() {
            assert!(
                row.len() == expected_len,
                "row {i} length {} does not match schema length {expected_len}",
                row.len()
            );
        }
        Self { schema, rows }
    }

    /// An empty dataset that keeps `schema`.
    pub fn empty(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows as named [`Record`] views.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|row| Record {
            schema: &self.schema,
            values: row.as_slice(),
        })
    }

    /// Record view of row `idx`.
    pub fn record(&self, idx: usize) -> Option<Record<'_>> {
        self.rows.get(idx).map(|row| Record {
            schema: &self.schema,
            values: row.as_slice(),
        })
    }

    /// Iterate the values of a single column, in row order.
    ///
    /// Yields nothing if the column does not exist.
    pub fn column_values(&self, column: &str) -> impl Iterator<Item = &Value> {
        let idx = self.schema.index_of(column);
        self.rows
            .iter()
            .filter_map(move |row| idx.and_then(|i| row.get(i)))
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// A copy of the first `n` rows.
    pub fn head(&self, n: usize) -> Self {
        Self {
            schema: self.schema.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

/// Serializes as a JSON array of objects (column name to value, in header order).
impl Serialize for DataSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for record in self.records() {
            seq.serialize_element(&record)?;
        }
        seq.end()
    }
}

/// Borrowed view of one row, keyed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    schema: &'a Schema,
    values: &'a [Value],
}

impl<'a> Record<'a> {
    /// Value of `column`, or `None` if the column is not in the schema.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.schema.index_of(column).and_then(|i| self.values.get(i))
    }

    /// Iterate `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> {
        let values = self.values;
        self.schema.column_names().zip(values.iter())
    }

    /// Raw values in schema order.
    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    /// Number of fields whose value is [`Value::Null`].
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
