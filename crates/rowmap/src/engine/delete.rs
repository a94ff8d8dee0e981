use super::{key_filter, keys_filter};
use crate::{err, Db, HookPoint, Model, Result};

use rowmap_core::stmt::{Delete, Expr};

impl Db {
    /// Deletes `row` by primary key and returns the number of rows deleted.
    pub async fn delete<M: Model>(&self, row: &mut M) -> Result<u64> {
        let table = M::TABLE;

        self.run_hooks(HookPoint::BeforeDelete, row).await?;

        tracing::debug!(table = table.name, "delete");

        let count = self
            .run(Delete {
                table,
                filter: key_filter(row),
            })
            .await
            .and_then(|rows| rows.into_count())
            .map_err(|e| e.context(err!("unable to delete from {}", table.name)))?;

        self.run_hooks(HookPoint::AfterDelete, row).await?;

        Ok(count)
    }

    /// Deletes every row of `rows` by primary key in one statement.
    ///
    /// Delete hooks run for each row. Rows that no longer exist are not
    /// counted.
    pub async fn delete_all<M: Model>(&self, rows: &mut [M]) -> Result<u64> {
        let table = M::TABLE;

        if rows.is_empty() {
            return Ok(0);
        }

        self.run_hooks_all(HookPoint::BeforeDelete, rows).await?;

        tracing::debug!(table = table.name, rows = rows.len(), "delete all");

        let count = self
            .run(Delete {
                table,
                filter: keys_filter(rows),
            })
            .await
            .and_then(|rows| rows.into_count())
            .map_err(|e| e.context(err!("unable to delete all from {}", table.name)))?;

        self.run_hooks_all(HookPoint::AfterDelete, rows).await?;

        Ok(count)
    }

    pub(crate) async fn delete_where<M: Model>(&self, filter: Expr) -> Result<u64> {
        let table = M::TABLE;

        tracing::debug!(table = table.name, "delete all");

        self.run(Delete { table, filter })
            .await
            .and_then(|rows| rows.into_count())
            .map_err(|e| e.context(err!("unable to delete all from {}", table.name)))
    }
}
