use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A single column value as sent to, or read from, the database.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Byte blob
    Bytes(Vec<u8>),

    /// Arbitrary-precision decimal
    Decimal(Decimal),

    /// 64-bit float
    F64(f64),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// JSON document
    Json(serde_json::Value),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),

    /// List of strings
    StringArray(Vec<String>),

    /// Instant in UTC
    Timestamp(DateTime<Utc>),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(&**v),
            _ => None,
        }
    }

    /// The variant name, used in conversion errors.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::Bytes(_) => "Bytes",
            Self::Decimal(_) => "Decimal",
            Self::F64(_) => "F64",
            Self::I32(_) => "I32",
            Self::I64(_) => "I64",
            Self::Json(_) => "Json",
            Self::Null => "Null",
            Self::String(_) => "String",
            Self::StringArray(_) => "StringArray",
            Self::Timestamp(_) => "Timestamp",
        }
    }

    /// Returns `true` if the value can be stored in a column of type `ty`.
    pub fn is_a(&self, ty: super::Type) -> bool {
        use super::Type;

        match self {
            Self::Null => true,
            Self::Bool(_) => ty == Type::Bool,
            Self::Bytes(_) => ty == Type::Bytes,
            Self::Decimal(_) => ty == Type::Decimal,
            Self::F64(_) => ty == Type::F64,
            Self::I32(_) => matches!(ty, Type::I32 | Type::I64),
            Self::I64(_) => ty == Type::I64,
            Self::Json(_) => ty == Type::Json,
            Self::String(_) => ty == Type::String,
            Self::StringArray(_) => ty == Type::StringArray,
            Self::Timestamp(_) => ty == Type::Timestamp,
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I32(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(src: Vec<u8>) -> Self {
        Self::Bytes(src)
    }
}

impl From<Vec<String>> for Value {
    fn from(src: Vec<String>) -> Self {
        Self::StringArray(src)
    }
}

impl From<serde_json::Value> for Value {
    fn from(src: serde_json::Value) -> Self {
        Self::Json(src)
    }
}

impl From<Decimal> for Value {
    fn from(src: Decimal) -> Self {
        Self::Decimal(src)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(src: DateTime<Utc>) -> Self {
        Self::Timestamp(src)
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Value::from(value),
            None => Value::Null,
        }
    }
}
