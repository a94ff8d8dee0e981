//! Callbacks run around engine operations.

use crate::{Db, Model, Result};

use async_trait::async_trait;

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

/// Where in an operation a hook runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    BeforeInsert,
    AfterInsert,
    BeforeUpdate,
    AfterUpdate,
    BeforeUpsert,
    AfterUpsert,
    BeforeDelete,
    AfterDelete,

    /// Runs for every row loaded by a query, find, reload, or eager load
    AfterSelect,
}

/// A callback registered for one model and hook point.
///
/// An error returned by a hook aborts the operation and is returned to the
/// caller as is. `Before*` hooks run before the statement is sent, so a
/// failing one prevents the write.
#[async_trait]
pub trait Hook<M: Model>: Send + Sync + 'static {
    async fn call(&self, db: &Db, row: &mut M) -> Result<()>;
}

#[async_trait]
impl<M, F> Hook<M> for F
where
    M: Model,
    F: Fn(&mut M) -> Result<()> + Send + Sync + 'static,
{
    async fn call(&self, _db: &Db, row: &mut M) -> Result<()> {
        self(row)
    }
}

type HookList<M> = Vec<Arc<dyn Hook<M>>>;

/// Registered hooks, in registration order per (model, hook point).
#[derive(Default)]
pub struct Hooks {
    hooks: RwLock<HashMap<(TypeId, HookPoint), Box<dyn Any + Send + Sync>>>,
}

impl Hooks {
    pub fn register<M: Model>(&self, point: HookPoint, hook: impl Hook<M>) {
        let mut hooks = self.hooks.write().unwrap_or_else(PoisonError::into_inner);

        let list = hooks
            .entry((TypeId::of::<M>(), point))
            .or_insert_with(|| Box::new(HookList::<M>::new()));

        if let Some(list) = list.downcast_mut::<HookList<M>>() {
            list.push(Arc::new(hook));
        }
    }

    /// Number of hooks registered for `M` at `point`.
    pub fn len<M: Model>(&self, point: HookPoint) -> usize {
        self.get::<M>(point).len()
    }

    /// Removes every hook registered for `M`.
    pub fn clear<M: Model>(&self) {
        self.hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(model, _), _| *model != TypeId::of::<M>());
    }

    fn get<M: Model>(&self, point: HookPoint) -> HookList<M> {
        self.hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(TypeId::of::<M>(), point))
            .and_then(|list| list.downcast_ref::<HookList<M>>())
            .cloned()
            .unwrap_or_default()
    }

    /// Runs the hooks for `M` at `point` in registration order, stopping at
    /// the first error.
    pub(crate) async fn run<M: Model>(&self, db: &Db, point: HookPoint, row: &mut M) -> Result<()> {
        // Cloned; no lock is held across `.await`.
        for hook in self.get::<M>(point) {
            hook.call(db, row).await?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hooks = self.hooks.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Hooks")
            .field("registered", &hooks.len())
            .finish()
    }
}

impl Db {
    /// Runs hooks unless this handle skips them.
    pub(crate) async fn run_hooks<M: Model>(&self, point: HookPoint, row: &mut M) -> Result<()> {
        if self.scope.skip_hooks {
            return Ok(());
        }
        self.shared.hooks.run(self, point, row).await
    }

    pub(crate) async fn run_hooks_all<M: Model>(
        &self,
        point: HookPoint,
        rows: &mut [M],
    ) -> Result<()> {
        for row in rows {
            self.run_hooks(point, row).await?;
        }
        Ok(())
    }
}
