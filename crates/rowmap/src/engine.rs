//! CRUD operations, generic over [`Model`].
//!
//! Every operation builds a statement from the model's table descriptor,
//! runs it through [`Db::run`] (or a cached [`Shape`](crate::cache::Shape)),
//! and binds returned columns back onto the row.

mod columns;
pub use columns::Columns;

mod delete;
mod find;
mod insert;
mod select;
mod timestamps;
mod update;

mod upsert;
pub use upsert::Upsert;

use crate::Model;

use rowmap_core::{
    schema::Table,
    stmt::{BinaryOp, Expr, ExprBinaryOp, Value},
};

/// `pk1 = $a AND pk2 = $b` for the key of `row`.
pub(crate) fn key_filter<M: Model>(row: &M) -> Expr {
    key_filter_from_values(M::TABLE, row.primary_key())
}

fn key_filter_from_values(table: &'static Table, key: Vec<Value>) -> Expr {
    Expr::and_from_vec(
        table
            .primary_key
            .iter()
            .zip(key)
            .map(|(index, value)| Expr::eq(Expr::column(*index), value))
            .collect(),
    )
}

/// `(pk = $1) OR (pk = $2) ...` for every row of `rows`.
fn keys_filter<M: Model>(rows: &[M]) -> Expr {
    Expr::or_from_vec(rows.iter().map(key_filter).collect())
}

/// Key filter for cached statements: one placeholder per key column,
/// regardless of the values later bound to them.
fn key_placeholder_filter(table: &'static Table) -> Expr {
    Expr::and_from_vec(
        table
            .primary_key
            .iter()
            .map(|index| {
                ExprBinaryOp {
                    lhs: Box::new(Expr::column(*index)),
                    op: BinaryOp::Eq,
                    rhs: Box::new(Expr::Value(Value::Null)),
                }
                .into()
            })
            .collect(),
    )
}

/// Columns at `indices` that are set to a non-zero value on `row`.
fn non_zero<M: Model>(row: &M, indices: impl Iterator<Item = usize>) -> Vec<usize> {
    indices.filter(|index| !row.is_zero(*index)).collect()
}
