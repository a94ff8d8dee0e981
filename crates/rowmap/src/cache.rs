use crate::{engine::Columns, Result};

use rowmap_core::{driver::Dialect, stmt::Type};

use std::{
    any::TypeId,
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, PoisonError, RwLock,
    },
};

/// Caches serialized write statements by shape.
///
/// Two writes of the same model with the same column policy (and, for
/// inferred policies, the same set of non-zero default columns) produce the
/// same SQL text and bind the same fields. The cache keeps that text and the
/// bindings so they are only computed once. Entries are pure functions of
/// their key, so evicting or disabling the cache never changes results.
#[derive(Debug)]
pub struct StatementCache {
    enabled: bool,
    shapes: RwLock<HashMap<ShapeKey, Arc<Shape>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ShapeKey {
    pub(crate) dialect: Dialect,
    pub(crate) model: TypeId,
    pub(crate) kind: ShapeKind,
    pub(crate) insert: Columns,
    pub(crate) update: Columns,

    /// Upsert only: whether conflicts update, and the conflict target
    pub(crate) conflict: Option<(bool, Vec<usize>)>,

    /// Default-bearing columns holding a non-zero value
    pub(crate) non_zero_defaults: Vec<usize>,

    /// Whether the engine writes the timestamp columns
    pub(crate) timestamps: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ShapeKind {
    Insert,
    Update,
    Upsert,
}

/// A serialized statement and its bindings to row fields.
#[derive(Debug)]
pub(crate) struct Shape {
    pub(crate) sql: Arc<str>,

    /// Field bound to each placeholder, in placeholder order
    pub(crate) params: Vec<usize>,

    /// Fields overwritten by the `RETURNING` columns, in column order
    pub(crate) returning: Vec<usize>,

    /// Types of the returned columns; `None` when the statement returns a count
    pub(crate) ret: Option<Vec<Type>>,
}

impl StatementCache {
    pub fn new() -> StatementCache {
        StatementCache {
            enabled: true,
            shapes: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// A cache that never stores anything; every write builds its statement.
    pub fn disabled() -> StatementCache {
        StatementCache {
            enabled: false,
            ..StatementCache::new()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn len(&self) -> usize {
        self.shapes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.shapes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Returns the shape for `key`, building and storing it on a miss.
    ///
    /// Concurrent misses on the same key may each build the shape; the first
    /// one stored wins.
    pub(crate) fn get_or_build(
        &self,
        key: ShapeKey,
        build: impl FnOnce() -> Result<Shape>,
    ) -> Result<Arc<Shape>> {
        if !self.enabled {
            return build().map(Arc::new);
        }

        let cached = self
            .shapes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();

        if let Some(shape) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(shape);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(kind = ?key.kind, dialect = ?key.dialect, "statement cache miss");

        let shape = Arc::new(build()?);

        Ok(self
            .shapes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(shape)
            .clone())
    }
}

impl Default for StatementCache {
    fn default() -> Self {
        StatementCache::new()
    }
}
