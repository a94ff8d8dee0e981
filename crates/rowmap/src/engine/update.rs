use super::{columns::with_timestamps, key_placeholder_filter, keys_filter, Columns};
use crate::{
    cache::{ShapeKey, ShapeKind},
    err, Assignments, Db, Error, HookPoint, Model, Result,
};

use rowmap_core::stmt::{Assignment, Expr, Statement, Update, Value};

use std::any::TypeId;

impl Db {
    /// Writes `row` back by primary key and returns the number of rows
    /// updated.
    ///
    /// `updated_at` is refreshed first and written even when `columns` leaves
    /// it out. A key that no longer exists updates
    /// nothing and returns 0.
    pub async fn update<M: Model>(&self, row: &mut M, columns: Columns) -> Result<u64> {
        let table = M::TABLE;

        self.run_hooks(HookPoint::BeforeUpdate, row).await?;
        self.touch_for_update(row)?;

        let key = ShapeKey {
            dialect: self.capability().dialect,
            model: TypeId::of::<M>(),
            kind: ShapeKind::Update,
            insert: Columns::None,
            update: columns.clone(),
            conflict: None,
            non_zero_defaults: vec![],
            timestamps: !self.scope.skip_timestamps,
        };

        let shape = self.statement_cache().get_or_build(key, || {
            let mut set = columns.update_columns(table, "update")?;
            if !self.scope.skip_timestamps {
                set = with_timestamps(table, set, false);
            }

            let stmt = Statement::from(Update {
                table,
                assignments: set
                    .iter()
                    .map(|index| Assignment::new(*index, Value::Null))
                    .collect(),
                filter: key_placeholder_filter(table),
                returning: vec![],
            });

            let params = set.into_iter().chain(table.primary_key.iter().copied()).collect();
            Ok(self.shape(&stmt, params, vec![]))
        })?;

        let params = shape.params.iter().map(|index| row.field(*index)).collect();

        tracing::debug!(table = table.name, "update");

        let count = self
            .exec_sql(shape.sql.clone(), params, None)
            .await
            .and_then(|rows| rows.into_count())
            .map_err(|e| e.context(err!("unable to update {} row", table.name)))?;

        self.run_hooks(HookPoint::AfterUpdate, row).await?;

        Ok(count)
    }

    /// Applies `assignments` to every row of `rows`, matched by primary key,
    /// in one statement. Rows that no longer exist are not counted.
    pub async fn update_all<M: Model>(&self, rows: &[M], assignments: Assignments<M>) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        self.update_where::<M>(keys_filter(rows), assignments).await
    }

    pub(crate) async fn update_where<M: Model>(
        &self,
        filter: Expr,
        assignments: Assignments<M>,
    ) -> Result<u64> {
        let table = M::TABLE;

        if assignments.is_empty() {
            return Err(Error::validation_empty_columns("update all", table.name));
        }

        tracing::debug!(table = table.name, "update all");

        self.run(Update {
            table,
            assignments: assignments.untyped,
            filter,
            returning: vec![],
        })
        .await
        .and_then(|rows| rows.into_count())
        .map_err(|e| e.context(err!("unable to update all for {}", table.name)))
    }
}
