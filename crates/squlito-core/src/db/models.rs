//! Data structures returned by the database layer.

use indexmap::IndexMap;
use rusqlite::types::ValueRef;

/// A single cell value as read from SQLite.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Boolean(bool),
    Blob(Vec<u8>),
}

impl From<ValueRef<'_>> for SqlValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => SqlValue::Null,
            ValueRef::Integer(i) => SqlValue::Integer(i),
            ValueRef::Real(f) => SqlValue::Real(f),
            ValueRef::Text(bytes) => SqlValue::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => SqlValue::Blob(bytes.to_vec()),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Boolean(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// One result row keyed by column name, in select-list order.
///
/// Duplicate column names in a result set collapse to the last value.
pub type Row = IndexMap<String, SqlValue>;

/// A user-defined table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
}

/// Column metadata from `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub cid: i64,
    pub name: String,
    pub decl_type: String,
    pub not_null: bool,
    pub default_value: Option<String>,
    pub primary_key: bool,
}

/// One bounded slice of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePage {
    /// Row count of the whole table at call time
    pub total_rows: usize,
    /// Offset actually applied
    pub offset: usize,
    /// Limit actually applied
    pub limit: usize,
    pub rows: Vec<Row>,
}

/// Result of an ad-hoc statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryRowsResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    /// More rows were available than the cap allowed
    pub truncated: bool,
}

/// Build a row from `(column, value)` pairs.
pub fn row_from<I, K, V>(pairs: I) -> Row
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<SqlValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
