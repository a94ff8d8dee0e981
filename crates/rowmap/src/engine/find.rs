use super::{key_filter_from_values, keys_filter};
use crate::{err, Db, Model, Result, Select};

use rowmap_core::stmt::{Query, Value};

impl Db {
    /// Loads the row with primary key `key`.
    ///
    /// `key` must hold one value per primary key column, in key order.
    /// Fails with a "record not found" error (see
    /// [`Error::is_record_not_found`](crate::Error::is_record_not_found)) when no row matches.
    pub async fn find_by_key<M: Model>(&self, key: Vec<Value>) -> Result<M> {
        let table = M::TABLE;
        table.check_key_arity(key.len())?;

        let query = Query::filter(table, key_filter_from_values(table, key));
        self.select_one(Select::<M>::from_untyped(query)).await
    }

    /// True if a row with primary key `key` exists.
    pub async fn exists<M: Model>(&self, key: Vec<Value>) -> Result<bool> {
        let table = M::TABLE;
        table.check_key_arity(key.len())?;

        let query = Query::filter(table, key_filter_from_values(table, key));
        self.select_exists(Select::<M>::from_untyped(query)).await
    }

    /// Overwrites `row` with its stored state. Relation caches are cleared.
    pub async fn reload<M: Model>(&self, row: &mut M) -> Result<()> {
        let fresh = self
            .find_by_key::<M>(row.primary_key())
            .await
            .map_err(|e| e.context(err!("unable to reload {}", M::TABLE.name)))?;

        *row = fresh;
        Ok(())
    }

    /// Replaces `rows` with the stored state of the same keys.
    ///
    /// Rows deleted in the meantime drop out, and the order of the result is
    /// the database's.
    pub async fn reload_all<M: Model>(&self, rows: &mut Vec<M>) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let query = Query::filter(M::TABLE, keys_filter(rows));

        *rows = self
            .select_rows(Select::<M>::from_untyped(query))
            .await
            .map_err(|e| e.context(err!("unable to reload all in {}", M::TABLE.name)))?;

        Ok(())
    }
}
