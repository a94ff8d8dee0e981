use chrono::{DateTime, NaiveDateTime, Utc};
use rowmap_core::{
    stmt::{self, Value as CoreValue},
    Error, Result,
};
use rust_decimal::Decimal;
use tokio_postgres::{
    types::{private::BytesMut, to_sql_checked, IsNull, ToSql, Type},
    Row,
};

type BoxError = Box<dyn std::error::Error + Sync + Send>;

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> std::result::Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        match &self.0 {
            stmt::Value::Bool(value) => value.to_sql(ty, out),
            stmt::Value::I32(value) => match *ty {
                Type::INT2 => i16::try_from(*value)?.to_sql(ty, out),
                Type::INT8 => (*value as i64).to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            stmt::Value::I64(value) => match *ty {
                Type::INT2 => i16::try_from(*value)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*value)?.to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            stmt::Value::F64(value) => match *ty {
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            stmt::Value::String(value) => value.to_sql(ty, out),
            stmt::Value::Bytes(value) => value.to_sql(ty, out),
            stmt::Value::Json(value) => value.to_sql(ty, out),
            stmt::Value::Decimal(value) => value.to_sql(ty, out),
            stmt::Value::Timestamp(value) => match *ty {
                Type::TIMESTAMP => value.naive_utc().to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            stmt::Value::StringArray(value) => value.to_sql(ty, out),
            stmt::Value::Null => Ok(IsNull::Yes),
        }
    }

    // Conversion depends on the value variant; mismatches are reported by
    // `to_sql`.
    fn accepts(_: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

/// Converts a PostgreSQL value within a row to a rowmap value of the
/// expected type.
pub(crate) fn from_row(row: &Row, index: usize, expected_ty: stmt::Type) -> Result<CoreValue> {
    let column_ty = row.columns()[index].type_().clone();

    // NOTE: the inner representation of the PostgreSQL type enum is not
    // accessible, so each type is matched by hand.
    let value = match column_ty {
        Type::BOOL => get::<bool>(row, index)?.map(CoreValue::Bool),
        Type::INT2 => get::<i16>(row, index)?.map(|v| widen(v as i64, expected_ty)),
        Type::INT4 => get::<i32>(row, index)?.map(|v| widen(v as i64, expected_ty)),
        Type::INT8 => get::<i64>(row, index)?.map(|v| widen(v, expected_ty)),
        Type::FLOAT4 => get::<f32>(row, index)?.map(|v| CoreValue::F64(v as f64)),
        Type::FLOAT8 => get::<f64>(row, index)?.map(CoreValue::F64),
        Type::NUMERIC => get::<Decimal>(row, index)?.map(CoreValue::Decimal),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
            get::<String>(row, index)?.map(CoreValue::String)
        }
        Type::BYTEA => get::<Vec<u8>>(row, index)?.map(CoreValue::Bytes),
        Type::JSON | Type::JSONB => get::<serde_json::Value>(row, index)?.map(CoreValue::Json),
        Type::TIMESTAMPTZ => get::<DateTime<Utc>>(row, index)?.map(CoreValue::Timestamp),
        Type::TIMESTAMP => {
            get::<NaiveDateTime>(row, index)?.map(|v| CoreValue::Timestamp(v.and_utc()))
        }
        Type::TEXT_ARRAY | Type::VARCHAR_ARRAY => {
            get::<Vec<String>>(row, index)?.map(CoreValue::StringArray)
        }
        ty => {
            return Err(Error::invalid_result(format!(
                "unsupported PostgreSQL column type `{ty}` at position {index}"
            )))
        }
    };

    let value = value.unwrap_or(CoreValue::Null);

    if !value.is_a(expected_ty) {
        return Err(Error::type_conversion(value, expected_name(expected_ty)));
    }

    Ok(value)
}

fn get<'a, T: tokio_postgres::types::FromSql<'a>>(row: &'a Row, index: usize) -> Result<Option<T>> {
    row.try_get::<usize, Option<T>>(index)
        .map_err(Error::driver_operation_failed)
}

/// Integer columns of any width decode into the field's integer type.
fn widen(value: i64, expected_ty: stmt::Type) -> CoreValue {
    match expected_ty {
        stmt::Type::I32 => match i32::try_from(value) {
            Ok(value) => CoreValue::I32(value),
            Err(_) => CoreValue::I64(value),
        },
        stmt::Type::F64 => CoreValue::F64(value as f64),
        stmt::Type::Decimal => CoreValue::Decimal(value.into()),
        _ => CoreValue::I64(value),
    }
}

fn expected_name(ty: stmt::Type) -> &'static str {
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
