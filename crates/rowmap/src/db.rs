mod builder;
mod connect;
mod pool;
mod transaction;

pub use builder::Builder;
pub use connect::*;
pub use pool::*;
pub use transaction::Transaction;

use crate::{hooks::Hooks, Result, StatementCache};

use rowmap_core::{
    driver::{operation::QuerySql, Capability, Operation, Response, Rows},
    stmt::{Statement, Type, Value},
};
use rowmap_sql::Serializer;
use tokio::sync::Mutex;

use std::sync::Arc;

/// Shared state between all `Db` clones.
pub(crate) struct Shared {
    pub(crate) pool: Pool,
    pub(crate) cache: Arc<StatementCache>,
    pub(crate) hooks: Hooks,
    pub(crate) serializer: Serializer,
}

/// Per-handle flags.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Scope {
    pub(crate) skip_hooks: bool,
    pub(crate) skip_timestamps: bool,
}

/// A database handle.
///
/// Operations check a connection out of the pool for the duration of one
/// statement. A handle returned by [`Db::transaction`] instead pins a single
/// connection until the transaction ends. Cloning is cheap and clones share
/// the pool, statement cache, and hooks.
#[derive(Clone)]
pub struct Db {
    pub(crate) shared: Arc<Shared>,

    /// Pinned connection; set for transactions
    pub(crate) conn: Option<Arc<Mutex<PoolConnection>>>,

    pub(crate) scope: Scope,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Connects using the default configuration.
    pub async fn connect(url: &str) -> Result<Db> {
        Db::builder().connect(url).await
    }

    /// A handle on which hooks do not run.
    pub fn skip_hooks(&self) -> Db {
        let mut db = self.clone();
        db.scope.skip_hooks = true;
        db
    }

    /// A handle on which `created_at` / `updated_at` columns are left as is.
    pub fn skip_timestamps(&self) -> Db {
        let mut db = self.clone();
        db.scope.skip_timestamps = true;
        db
    }

    pub fn hooks(&self) -> &Hooks {
        &self.shared.hooks
    }

    pub fn statement_cache(&self) -> &Arc<StatementCache> {
        &self.shared.cache
    }

    pub fn capability(&self) -> &'static Capability {
        self.shared.pool.capability()
    }

    pub fn is_transaction(&self) -> bool {
        self.conn.is_some()
    }

    /// Runs a raw statement and returns the number of affected rows.
    pub async fn execute_sql(&self, sql: &str, params: Vec<Value>) -> Result<u64> {
        self.exec_sql(sql.into(), params, None)
            .await?
            .into_count()
    }

    /// Serializes and runs `stmt`.
    pub(crate) async fn run(&self, stmt: impl Into<Statement>) -> Result<Rows> {
        let stmt = stmt.into();
        let mut params = vec![];
        let sql = self.shared.serializer.serialize(&stmt, &mut params);
        self.exec_sql(sql.into(), params, stmt.returning_types())
            .await
    }

    pub(crate) async fn exec_sql(
        &self,
        sql: Arc<str>,
        params: Vec<Value>,
        ret: Option<Vec<Type>>,
    ) -> Result<Rows> {
        tracing::debug!(sql = %sql, params = params.len(), "exec");
        let response = self.exec(QuerySql { sql, params, ret }.into()).await?;
        Ok(response.rows)
    }

    pub(crate) async fn exec(&self, op: Operation) -> Result<Response> {
        match &self.conn {
            Some(conn) => conn.lock().await.exec(op).await,
            None => {
                let mut conn = self.shared.pool.get().await?;
                conn.exec(op).await
            }
        }
    }
}
