use crate::{Db, Model, Result};

use chrono::{DateTime, SubsecRound, Utc};
use rowmap_core::{schema::Column, stmt::Value};

/// Current time at the precision both databases store (microseconds).
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl Db {
    /// Insert: `created_at` and `updated_at` are filled when unset.
    pub(super) fn touch_for_insert<M: Model>(&self, row: &mut M) -> Result<()> {
        self.touch(row, |column, row| row.is_zero(column.index))
    }

    /// Upsert: `created_at` is filled when unset, `updated_at` always.
    pub(super) fn touch_for_upsert<M: Model>(&self, row: &mut M) -> Result<()> {
        self.touch(row, |column, row| {
            column.is_updated_at() || row.is_zero(column.index)
        })
    }

    /// Update: `updated_at` is refreshed.
    pub(super) fn touch_for_update<M: Model>(&self, row: &mut M) -> Result<()> {
        self.touch(row, |column, _| column.is_updated_at())
    }

    fn touch<M: Model>(&self, row: &mut M, set: impl Fn(&Column, &M) -> bool) -> Result<()> {
        if self.scope.skip_timestamps {
            return Ok(());
        }

        let now = now();
        let table = M::TABLE;

        for column in [table.created_at(), table.updated_at()].into_iter().flatten() {
            if set(column, &*row) {
                row.set_field(column.index, Value::Timestamp(now))?;
            }
        }

        Ok(())
    }
}
