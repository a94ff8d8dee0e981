use super::{
    columns::{returning_columns, with_timestamps},
    non_zero, Columns,
};
use crate::{
    cache::{Shape, ShapeKey, ShapeKind},
    err, Db, Error, HookPoint, Model, Result,
};

use rowmap_core::{
    driver::Rows,
    stmt::{Insert, Statement, Value, ValueRecord},
};

use std::any::TypeId;

impl Db {
    /// Inserts `row`, writing the columns chosen by `columns`.
    ///
    /// Unset `created_at` / `updated_at` fields are filled first and always
    /// written. Columns the
    /// database fills in (defaults not written, generated columns) are read
    /// back onto `row`.
    pub async fn insert<M: Model>(&self, row: &mut M, columns: Columns) -> Result<()> {
        let table = M::TABLE;

        self.run_hooks(HookPoint::BeforeInsert, row).await?;
        self.touch_for_insert(row)?;

        let shape = self.insert_shape(row, columns)?;
        let params = shape.params.iter().map(|index| row.field(*index)).collect();

        tracing::debug!(table = table.name, "insert");

        let rows = self
            .exec_sql(shape.sql.clone(), params, shape.ret.clone())
            .await
            .map_err(|e| e.context(err!("unable to insert into {}", table.name)))?;

        if let Rows::Values(records) = rows {
            let record = records.into_iter().next().ok_or_else(|| {
                Error::invalid_result(format!("insert into {} returned no row", table.name))
            })?;
            row.load_columns(&shape.returning, record)?;
        }

        self.run_hooks(HookPoint::AfterInsert, row).await
    }

    fn insert_shape<M: Model>(&self, row: &M, columns: Columns) -> Result<std::sync::Arc<Shape>> {
        let table = M::TABLE;

        let non_zero_defaults = if columns.reads_zero_values() {
            non_zero(row, table.columns_with_default().map(|column| column.index))
        } else {
            vec![]
        };

        let key = ShapeKey {
            dialect: self.capability().dialect,
            model: TypeId::of::<M>(),
            kind: ShapeKind::Insert,
            insert: columns.clone(),
            update: Columns::None,
            conflict: None,
            non_zero_defaults,
            timestamps: !self.scope.skip_timestamps,
        };

        self.statement_cache().get_or_build(key, || {
            let mut written = columns.insert_columns(row)?;
            if !self.scope.skip_timestamps {
                written = with_timestamps(table, written, true);
            }
            let returning = returning_columns(table, &written);

            let stmt = Statement::from(Insert {
                table,
                columns: written.clone(),
                rows: vec![ValueRecord::from_vec(vec![Value::Null; written.len()])],
                on_conflict: None,
                returning: returning.clone(),
            });

            Ok(self.shape(&stmt, written, returning))
        })
    }

    /// Serializes a statement whose values are all placeholders.
    pub(super) fn shape(&self, stmt: &Statement, params: Vec<usize>, returning: Vec<usize>) -> Shape {
        let mut placeholders = 0usize;
        let sql = self.shared.serializer.serialize(stmt, &mut placeholders);
        debug_assert_eq!(placeholders, params.len());

        Shape {
            sql: sql.into(),
            params,
            returning,
            ret: stmt.returning_types(),
        }
    }
}
