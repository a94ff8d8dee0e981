use super::{Assignments, Filter};
use crate::{Db, Model, Result};

use rowmap_core::stmt::{self, OrderBy};

use std::{fmt, marker::PhantomData};

/// A query over the rows of `M`.
///
/// Nothing is sent to the database until one of the terminal methods
/// (`all`, `one`, `first`, `count`, `exists`, `delete`, `update_all`) is
/// awaited.
pub struct Select<M> {
    pub(crate) untyped: stmt::Query,

    /// Column names for a partial select; resolved when the query runs.
    pub(crate) columns: Option<Vec<&'static str>>,

    _p: PhantomData<fn() -> M>,
}

impl<M: Model> Select<M> {
    /// Selects every row.
    pub fn new() -> Self {
        Self::from_untyped(stmt::Query::new(M::TABLE))
    }

    pub fn from_untyped(untyped: stmt::Query) -> Self {
        Self {
            untyped,
            columns: None,
            _p: PhantomData,
        }
    }

    pub fn from_filter(filter: Filter<M>) -> Self {
        Self::from_untyped(stmt::Query::filter(M::TABLE, filter))
    }

    /// Adds `filter` with AND. Same as [`and`](Self::and).
    pub fn filter(self, filter: Filter<M>) -> Self {
        self.and(filter)
    }

    pub fn and(mut self, filter: Filter<M>) -> Self {
        self.untyped.and(filter);
        self
    }

    pub fn or(mut self, filter: Filter<M>) -> Self {
        self.untyped.or(filter);
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.untyped.order_by.push(order_by);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.untyped.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.untyped.offset = Some(offset);
        self
    }

    /// Only loads the named columns; the others keep their default value.
    pub fn columns(mut self, names: &[&'static str]) -> Self {
        self.columns = Some(names.to_vec());
        self
    }

    pub async fn all(self, db: &Db) -> Result<Vec<M>> {
        db.select_rows(self).await
    }

    /// Returns the first matching row, or a "record not found" error.
    pub async fn one(self, db: &Db) -> Result<M> {
        db.select_one(self).await
    }

    pub async fn first(self, db: &Db) -> Result<Option<M>> {
        db.select_first(self).await
    }

    pub async fn count(self, db: &Db) -> Result<u64> {
        db.select_count(self).await
    }

    pub async fn exists(self, db: &Db) -> Result<bool> {
        db.select_exists(self).await
    }

    /// Deletes every matching row without loading it. Hooks do not run.
    pub async fn delete(self, db: &Db) -> Result<u64> {
        db.delete_where::<M>(self.into_filter()).await
    }

    /// Updates every matching row without loading it. Hooks do not run.
    pub async fn update_all(self, db: &Db, assignments: Assignments<M>) -> Result<u64> {
        db.update_where::<M>(self.into_filter(), assignments).await
    }

    pub(crate) fn into_filter(self) -> stmt::Expr {
        self.untyped.filter.unwrap_or(stmt::Expr::true_())
    }
}

impl<M: Model> Default for Select<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for Select<M> {
    fn clone(&self) -> Self {
        Self {
            untyped: self.untyped.clone(),
            columns: self.columns.clone(),
            _p: PhantomData,
        }
    }
}

impl<M> fmt::Debug for Select<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("query", &self.untyped)
            .field("columns", &self.columns)
            .finish()
    }
}
