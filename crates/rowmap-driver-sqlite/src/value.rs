use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use rowmap_core::{
    stmt::{self, Value as CoreValue},
    Error, Result,
};
use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this SQLite driver value into the core rowmap value.
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Converts a SQLite value within a row to a rowmap value of type `ty`.
    pub fn from_sql(row: &Row, index: usize, ty: stmt::Type) -> Result<Self> {
        let value: SqlValue = row.get(index).map_err(Error::driver_operation_failed)?;

        let core_value = match value {
            SqlValue::Null => CoreValue::Null,
            SqlValue::Integer(value) => match ty {
                stmt::Type::Bool => CoreValue::Bool(value != 0),
                stmt::Type::I32 => match i32::try_from(value) {
                    Ok(value) => CoreValue::I32(value),
                    Err(_) => return Err(Error::type_conversion(CoreValue::I64(value), "I32")),
                },
                stmt::Type::I64 => CoreValue::I64(value),
                stmt::Type::F64 => CoreValue::F64(value as f64),
                stmt::Type::Decimal => CoreValue::Decimal(value.into()),
                _ => return Err(Error::type_conversion(CoreValue::I64(value), type_name(ty))),
            },
            // A decimal that came back as REAL was already rounded by SQLite's
            // NUMERIC affinity; decimal columns must be declared TEXT.
            SqlValue::Real(value) => match ty {
                stmt::Type::F64 => CoreValue::F64(value),
                _ => return Err(Error::type_conversion(CoreValue::F64(value), type_name(ty))),
            },
            SqlValue::Text(value) => match ty {
                stmt::Type::String => CoreValue::String(value),
                stmt::Type::Bytes => CoreValue::Bytes(value.into_bytes()),
                stmt::Type::Json => CoreValue::Json(serde_json::from_str(&value)?),
                stmt::Type::StringArray => CoreValue::StringArray(serde_json::from_str(&value)?),
                stmt::Type::Decimal => match value.parse() {
                    Ok(decimal) => CoreValue::Decimal(decimal),
                    Err(_) => return Err(Error::type_conversion(value.into(), "Decimal")),
                },
                stmt::Type::Timestamp => match parse_timestamp(&value) {
                    Some(timestamp) => CoreValue::Timestamp(timestamp),
                    None => return Err(Error::type_conversion(value.into(), "Timestamp")),
                },
                _ => return Err(Error::type_conversion(value.into(), type_name(ty))),
            },
            SqlValue::Blob(value) => match ty {
                stmt::Type::Bytes => CoreValue::Bytes(value),
                stmt::Type::String => match String::from_utf8(value) {
                    Ok(value) => CoreValue::String(value),
                    Err(err) => {
                        return Err(Error::type_conversion(err.into_bytes().into(), "String"))
                    }
                },
                _ => return Err(Error::type_conversion(value.into(), type_name(ty))),
            },
        };

        Ok(Value(core_value))
    }
}

/// Accepts RFC 3339 (what rowmap writes) and SQLite's own
/// `CURRENT_TIMESTAMP` format, which is UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn type_name(ty: stmt::Type) -> &'static str {
    match ty {
        stmt::Type::Bool => "Bool",
        stmt::Type::I32 => "I32",
        stmt::Type::I64 => "I64",
        stmt::Type::F64 => "F64",
        stmt::Type::String => "String",
        stmt::Type::Bytes => "Bytes",
        stmt::Type::Json => "Json",
        stmt::Type::Decimal => "Decimal",
        stmt::Type::Timestamp => "Timestamp",
        stmt::Type::StringArray => "StringArray",
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use stmt::Value;

        match &self.0 {
            Value::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            Value::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            Value::I32(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v as i64))),
            Value::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            Value::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            Value::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            Value::Bytes(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Blob(&v[..]))),
            Value::Json(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(v.to_string()))),
            Value::Decimal(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(v.to_string()))),
            Value::Timestamp(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(
                v.to_rfc3339_opts(SecondsFormat::Micros, true),
            ))),
            Value::StringArray(v) => {
                let json = serde_json::to_string(v)
                    .map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))?;
                Ok(ToSqlOutput::Owned(SqlValue::Text(json)))
            }
            Value::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
        }
    }
}
