use super::{Connect, Db, Pool, PoolConfig, Scope, Shared, Timeouts};
use crate::{
    hooks::{Hook, HookPoint, Hooks},
    Model, Result, StatementCache,
};

use rowmap_core::driver::Driver;
use rowmap_sql::Serializer;

use std::sync::Arc;

#[derive(Default)]
pub struct Builder {
    pool: PoolConfig,

    /// Shared with other `Db`s when set
    statement_cache: Option<Arc<StatementCache>>,

    hooks: Hooks,
}

impl Builder {
    /// Caps the number of pooled connections.
    pub fn max_connections(&mut self, max: usize) -> &mut Self {
        self.pool.max_size = Some(max);
        self
    }

    pub fn timeouts(&mut self, timeouts: Timeouts) -> &mut Self {
        self.pool.timeouts = timeouts;
        self
    }

    /// Uses `cache` for write statements, e.g. to share one cache between
    /// databases or to pass [`StatementCache::disabled`].
    pub fn statement_cache(&mut self, cache: Arc<StatementCache>) -> &mut Self {
        self.statement_cache = Some(cache);
        self
    }

    /// Registers a hook. Hooks can also be added later through
    /// [`Db::hooks`].
    pub fn hook<M: Model>(&mut self, point: HookPoint, hook: impl Hook<M>) -> &mut Self {
        self.hooks.register::<M>(point, hook);
        self
    }

    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(Connect::new(url)?).await
    }

    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let serializer = Serializer::new(driver.capability().dialect);
        let pool = Pool::new(driver, self.pool.clone())?;

        // Fail early on an unreachable database rather than on first use.
        drop(pool.get().await?);

        Ok(Db {
            shared: Arc::new(Shared {
                pool,
                cache: self.statement_cache.take().unwrap_or_default(),
                hooks: std::mem::take(&mut self.hooks),
                serializer,
            }),
            conn: None,
            scope: Scope::default(),
        })
    }
}
