//! Relation caches and the operations behind generated relation methods.
//!
//! A relation cache holds detached copies of related rows (copies with their
//! own caches cleared) behind `Arc`, so loaded rows never form reference
//! cycles.

mod belongs_to;
pub use belongs_to::{BelongsTo, BelongsToDef};

mod has_many;
pub use has_many::{HasMany, HasManyDef};

use crate::{engine::key_filter, err, Db, Model, Result};

use chrono::{DateTime, Utc};
use rowmap_core::stmt::{Assignment, Update, Value};
use rust_decimal::Decimal;

use std::collections::HashSet;

/// Hashable form of a non-null relation key, used to match owners with
/// related rows in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Key {
    Bool(bool),
    /// `I32` and `I64` columns compare by value
    Int(i64),
    F64(u64),
    Decimal(Decimal),
    String(String),
    Bytes(Vec<u8>),
    StringArray(Vec<String>),
    Timestamp(DateTime<Utc>),
    Json(String),
}

impl Key {
    fn new(value: Value) -> Option<Key> {
        Some(match value {
            Value::Null => return None,
            Value::Bool(v) => Key::Bool(v),
            Value::I32(v) => Key::Int(v.into()),
            Value::I64(v) => Key::Int(v),
            Value::F64(v) => Key::F64(v.to_bits()),
            Value::Decimal(v) => Key::Decimal(v),
            Value::String(v) => Key::String(v),
            Value::Bytes(v) => Key::Bytes(v),
            Value::StringArray(v) => Key::StringArray(v),
            Value::Timestamp(v) => Key::Timestamp(v),
            Value::Json(v) => Key::Json(v.to_string()),
        })
    }
}

/// Distinct non-null values of column `index` across `rows`, in first-seen
/// order.
fn distinct_keys<M: Model>(rows: &[M], index: usize) -> Vec<Value> {
    let mut seen = HashSet::new();

    rows.iter()
        .map(|row| row.field(index))
        .filter(|value| Key::new(value.clone()).is_some_and(|key| seen.insert(key)))
        .collect()
}

/// Points the relation column `column` of the stored `row` at `value`,
/// without running hooks or touching timestamps.
async fn write_key<M: Model>(db: &Db, row: &M, column: usize, value: Value) -> Result<()> {
    let table = M::TABLE;

    db.run(Update {
        table,
        assignments: vec![Assignment::new(column, value)],
        filter: key_filter(row),
        returning: vec![],
    })
    .await
    .map_err(|e| e.context(err!("unable to update {}", table.name)))?;

    Ok(())
}
