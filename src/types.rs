//! # Typed Column Values
//!
//! Owned, tagged representation of one column's value as returned by (or
//! bound into) a SQLite statement. Exactly one case is active, values are
//! immutable once constructed, and SQL `NULL` is an explicit variant rather
//! than an implicit empty string.
//!
//! The variant set matches SQLite's storage classes:
//!
//! - **Null**: SQL NULL, absence of a value
//! - **Int**: 64-bit signed integer
//! - **Real**: 64-bit floating point
//! - **Text**: owned UTF-8 string
//! - **Blob**: owned binary data
//!
//! The monitoring schema never writes blobs, but a SQLite column is
//! dynamically typed and can physically hold one, so the variant is carried
//! for totality; the renderer shows a hex preview.
//!
//! Conversions to and from rusqlite are lossless: `Value` implements
//! [`ToSql`] for binding and is built from a [`ValueRef`] when a row is
//! materialized.

use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};

/// One column's value: exactly one case active, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// True for `Null`; existence checks treat `Null` as absent.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<ValueRef<'_>> for Value {
    fn from(v: ValueRef<'_>) -> Self {
        match v {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Int(i),
            ValueRef::Real(f) => Value::Real(f),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
            Value::Int(i) => ToSqlOutput::Owned(SqlValue::Integer(*i)),
            Value::Real(f) => ToSqlOutput::Owned(SqlValue::Real(*f)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}
