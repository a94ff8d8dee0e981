use crate::{Error, Result};

use chrono::{DateTime, Utc};
use rowmap_core::stmt::{Type, Value};
use rust_decimal::Decimal;

/// A Rust type that can be stored in a single column.
pub trait Primitive: Sized + Send + Sync + 'static {
    const TYPE: Type;
    const NULLABLE: bool = false;

    fn to_value(&self) -> Value;

    fn load(value: Value) -> Result<Self>;

    /// True for the type's zero value. Zero-valued columns that have a
    /// database default are left out of an inferred insert.
    fn is_zero(&self) -> bool;
}

macro_rules! impl_primitive {
    ( $( $ty:ty => $variant:ident, $name:literal, |$v:ident| $zero:expr ;)* ) => {
        $(
            impl Primitive for $ty {
                const TYPE: Type = Type::$variant;

                fn to_value(&self) -> Value {
                    Value::from(self.clone())
                }

                fn load(value: Value) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        value => Err(Error::type_conversion(value, $name)),
                    }
                }

                fn is_zero(&self) -> bool {
                    let $v = self;
                    $zero
                }
            }
        )*
    };
}

impl_primitive! {
    bool => Bool, "bool", |v| !*v;
    String => String, "String", |v| v.is_empty();
    Vec<u8> => Bytes, "Vec<u8>", |v| v.is_empty();
    Vec<String> => StringArray, "Vec<String>", |v| v.is_empty();
    serde_json::Value => Json, "serde_json::Value", |v| v.is_null();
    Decimal => Decimal, "Decimal", |v| v.is_zero();
    DateTime<Utc> => Timestamp, "DateTime<Utc>", |v| *v == DateTime::<Utc>::default();
}

impl Primitive for i32 {
    const TYPE: Type = Type::I32;

    fn to_value(&self) -> Value {
        Value::I32(*self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::I32(v) => Ok(v),
            Value::I64(v) => i32::try_from(v).map_err(|_| Error::type_conversion(Value::I64(v), "i32")),
            value => Err(Error::type_conversion(value, "i32")),
        }
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl Primitive for i64 {
    const TYPE: Type = Type::I64;

    fn to_value(&self) -> Value {
        Value::I64(*self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::I64(v) => Ok(v),
            Value::I32(v) => Ok(v.into()),
            value => Err(Error::type_conversion(value, "i64")),
        }
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl Primitive for f64 {
    const TYPE: Type = Type::F64;

    fn to_value(&self) -> Value {
        Value::F64(*self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::F64(v) => Ok(v),
            Value::I32(v) => Ok(v.into()),
            value => Err(Error::type_conversion(value, "f64")),
        }
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

impl<T: Primitive> Primitive for Option<T> {
    const TYPE: Type = T::TYPE;
    const NULLABLE: bool = true;

    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => Ok(Some(T::load(value)?)),
        }
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }
}
