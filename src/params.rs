//! Query parameter collections and bind-type inference.
//!
//! # Responsibility
//! - Carry statement parameters in positional or named form.
//! - Infer a driver bind type per value at bind time.
//!
//! # Invariants
//! - Positional values bind at 1-based indices in collection order.
//! - Integers bind as integer, booleans as boolean, everything else
//!   (text, floats, null) as generic.

use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::ToSql;

/// Driver-facing type hint inferred from a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindType {
    Integer,
    Boolean,
    Generic,
}

/// One scalar statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Integer(i64),
    Boolean(bool),
    Text(String),
    Real(f64),
    Null,
}

impl ParamValue {
    /// Classifies this value for the driver bind.
    pub fn bind_type(&self) -> BindType {
        match self {
            Self::Integer(_) => BindType::Integer,
            Self::Boolean(_) => BindType::Boolean,
            Self::Text(_) | Self::Real(_) | Self::Null => BindType::Generic,
        }
    }
}

impl ToSql for ParamValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Integer(value) => ToSqlOutput::Owned(Value::Integer(*value)),
            // SQLite has no boolean storage class; booleans travel as 0/1.
            Self::Boolean(value) => ToSqlOutput::Owned(Value::Integer(i64::from(*value))),
            Self::Text(value) => ToSqlOutput::Borrowed(ValueRef::Text(value.as_bytes())),
            Self::Real(value) => ToSqlOutput::Owned(Value::Real(*value)),
            Self::Null => ToSqlOutput::Owned(Value::Null),
        })
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T> From<Option<T>> for ParamValue
where
    T: Into<ParamValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Self::Null,
        }
    }
}

/// Ordered parameter collection for one statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Params {
    #[default]
    None,
    /// Bound at positions 1..=n in collection order.
    Positional(Vec<ParamValue>),
    /// Bound by name; a missing `:`/`@`/`$` prefix defaults to `:`.
    Named(Vec<(String, ParamValue)>),
}

impl Params {
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }

    pub fn named<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        Self::Named(
            entries
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Positional(values) => values.len(),
            Self::Named(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{BindType, ParamValue, Params};

    #[test]
    fn integers_bind_as_integer() {
        assert_eq!(ParamValue::from(7i64).bind_type(), BindType::Integer);
        assert_eq!(ParamValue::from(7i32).bind_type(), BindType::Integer);
    }

    #[test]
    fn booleans_bind_as_boolean() {
        assert_eq!(ParamValue::from(true).bind_type(), BindType::Boolean);
        assert_eq!(ParamValue::from(false).bind_type(), BindType::Boolean);
    }

    #[test]
    fn text_float_and_null_bind_as_generic() {
        assert_eq!(ParamValue::from("hello").bind_type(), BindType::Generic);
        assert_eq!(ParamValue::from(1.5f64).bind_type(), BindType::Generic);
        assert_eq!(ParamValue::Null.bind_type(), BindType::Generic);
        assert_eq!(ParamValue::from(None::<i64>).bind_type(), BindType::Generic);
    }

    #[test]
    fn option_flattens_to_inner_or_null() {
        assert_eq!(ParamValue::from(Some(3i64)), ParamValue::Integer(3));
        assert_eq!(ParamValue::from(None::<&str>), ParamValue::Null);
    }

    #[test]
    fn collection_length_counts_entries() {
        assert!(Params::None.is_empty());
        assert_eq!(Params::positional([1i64, 2, 3]).len(), 3);
        assert_eq!(Params::named([("id", 1i64)]).len(), 1);
    }
}
