use crate::{err, Db, Error, HookPoint, Model, Result, Select};

use rowmap_core::stmt::{Query, Returning, Value};

impl Db {
    pub(crate) async fn select_rows<M: Model>(&self, select: Select<M>) -> Result<Vec<M>> {
        let table = M::TABLE;
        let Select {
            untyped: mut query,
            columns,
            ..
        } = select;

        let columns = match columns {
            Some(names) => table.resolve(&names)?,
            None => (0..table.columns.len()).collect(),
        };
        query.returning = Returning::Columns(columns.clone());

        self.load_rows(query, &columns).await
    }

    /// Runs `query` and binds each returned record to a fresh row.
    pub(crate) async fn load_rows<M: Model>(&self, query: Query, columns: &[usize]) -> Result<Vec<M>> {
        let table = M::TABLE;

        tracing::debug!(table = table.name, "select");

        let records = self
            .run(query)
            .await
            .and_then(|rows| rows.into_values())
            .map_err(|e| e.context(err!("unable to select from {}", table.name)))?;

        let mut rows = Vec::with_capacity(records.len());

        for record in records {
            let mut row = M::default();
            row.load_columns(columns, record)
                .map_err(|e| e.context(err!("unable to bind {} row", table.name)))?;
            self.run_hooks(HookPoint::AfterSelect, &mut row).await?;
            rows.push(row);
        }

        Ok(rows)
    }

    pub(crate) async fn select_one<M: Model>(&self, select: Select<M>) -> Result<M> {
        self.select_first(select)
            .await?
            .ok_or_else(|| Error::record_not_found(format!("table={}", M::TABLE.name)))
    }

    pub(crate) async fn select_first<M: Model>(&self, select: Select<M>) -> Result<Option<M>> {
        Ok(self.select_rows(select.limit(1)).await?.into_iter().next())
    }

    pub(crate) async fn select_count<M: Model>(&self, select: Select<M>) -> Result<u64> {
        let mut query = select.untyped;
        query.returning = Returning::Count;

        match self.scalar::<M>(query).await? {
            Value::I64(count) => Ok(u64::try_from(count)?),
            value => Err(Error::type_conversion(value, "u64")),
        }
    }

    pub(crate) async fn select_exists<M: Model>(&self, select: Select<M>) -> Result<bool> {
        let mut query = select.untyped;
        query.returning = Returning::Exists;

        match self.scalar::<M>(query).await? {
            Value::Bool(exists) => Ok(exists),
            value => Err(Error::type_conversion(value, "bool")),
        }
    }

    /// Runs an aggregate query returning a single value.
    async fn scalar<M: Model>(&self, query: Query) -> Result<Value> {
        let table = M::TABLE;

        tracing::debug!(table = table.name, returning = ?query.returning, "select");

        let records = self
            .run(query)
            .await
            .and_then(|rows| rows.into_values())
            .map_err(|e| e.context(err!("unable to select from {}", table.name)))?;

        records
            .into_iter()
            .next()
            .and_then(|mut record| (!record.is_empty()).then(|| record.take(0)))
            .ok_or_else(|| Error::invalid_result("aggregate query returned no value"))
    }
}
