use super::{
    columns::{returning_columns, with_timestamps},
    non_zero, Columns,
};
use crate::{
    cache::{ShapeKey, ShapeKind},
    err, Db, HookPoint, Model, Result,
};

use rowmap_core::{
    driver::Rows,
    stmt::{ConflictAction, Insert, OnConflict, Statement, Value, ValueRecord},
};

use std::any::TypeId;

/// Options for [`Db::upsert`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Upsert {
    update_on_conflict: bool,
    conflict_columns: Vec<&'static str>,
    update: Columns,
    insert: Columns,
}

impl Upsert {
    /// Update on conflict with the primary key; infer both column lists.
    pub fn new() -> Upsert {
        Upsert {
            update_on_conflict: true,
            conflict_columns: vec![],
            update: Columns::Infer,
            insert: Columns::Infer,
        }
    }

    /// When false, a conflicting row is left untouched (`DO NOTHING`).
    pub fn update_on_conflict(mut self, update: bool) -> Upsert {
        self.update_on_conflict = update;
        self
    }

    /// Conflict target. Defaults to the primary key.
    pub fn conflict_columns(mut self, names: impl IntoIterator<Item = &'static str>) -> Upsert {
        self.conflict_columns = names.into_iter().collect();
        self
    }

    /// Columns overwritten on conflict, resolved like an update.
    pub fn update_columns(mut self, columns: Columns) -> Upsert {
        self.update = columns;
        self
    }

    /// Columns written by the insert.
    pub fn insert_columns(mut self, columns: Columns) -> Upsert {
        self.insert = columns;
        self
    }
}

impl Default for Upsert {
    fn default() -> Self {
        Upsert::new()
    }
}

impl Db {
    /// Inserts `row`, or resolves a conflict with an existing row as
    /// configured by `opts`, in one statement.
    ///
    /// `created_at` is filled when unset and `updated_at` is always
    /// refreshed. Returned columns are read back onto `row`. When the
    /// database returns no row (the conflict was ignored or the update
    /// matched nothing) the call still succeeds and `row` keeps its values.
    pub async fn upsert<M: Model>(&self, row: &mut M, opts: Upsert) -> Result<()> {
        let table = M::TABLE;

        self.run_hooks(HookPoint::BeforeUpsert, row).await?;
        self.touch_for_upsert(row)?;

        let target = if opts.conflict_columns.is_empty() {
            table.primary_key.to_vec()
        } else {
            table.resolve(&opts.conflict_columns)?
        };

        let non_zero_defaults = if opts.insert.reads_zero_values() {
            non_zero(&*row, table.columns_with_default().map(|column| column.index))
        } else {
            vec![]
        };

        let key = ShapeKey {
            dialect: self.capability().dialect,
            model: TypeId::of::<M>(),
            kind: ShapeKind::Upsert,
            insert: opts.insert.clone(),
            update: opts.update.clone(),
            conflict: Some((opts.update_on_conflict, target.clone())),
            non_zero_defaults,
            timestamps: !self.scope.skip_timestamps,
        };

        let shape = self.statement_cache().get_or_build(key, || {
            let mut written = opts.insert.insert_columns(&*row)?;
            if !self.scope.skip_timestamps {
                written = with_timestamps(table, written, true);
            }
            let returning = returning_columns(table, &written);

            let action = if opts.update_on_conflict {
                let mut set = opts.update.update_columns(table, "upsert")?;
                if !self.scope.skip_timestamps {
                    set = with_timestamps(table, set, false);
                }
                ConflictAction::DoUpdate(set)
            } else {
                ConflictAction::DoNothing
            };

            let stmt = Statement::from(Insert {
                table,
                columns: written.clone(),
                rows: vec![ValueRecord::from_vec(vec![Value::Null; written.len()])],
                on_conflict: Some(OnConflict { target, action }),
                returning: returning.clone(),
            });

            Ok(self.shape(&stmt, written, returning))
        })?;

        let params = shape.params.iter().map(|index| row.field(*index)).collect();

        tracing::debug!(table = table.name, "upsert");

        let rows = self
            .exec_sql(shape.sql.clone(), params, shape.ret.clone())
            .await
            .map_err(|e| e.context(err!("unable to upsert for {}", table.name)))?;

        if let Rows::Values(records) = rows {
            match records.into_iter().next() {
                Some(record) => row.load_columns(&shape.returning, record)?,
                None if opts.update_on_conflict => {
                    tracing::warn!(
                        table = table.name,
                        "upsert updated an existing row but returned no columns"
                    );
                }
                None => {}
            }
        }

        self.run_hooks(HookPoint::AfterUpsert, row).await
    }
}
