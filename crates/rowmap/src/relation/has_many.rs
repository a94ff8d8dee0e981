use super::{distinct_keys, write_key, BelongsTo, Key};
use crate::{Columns, Db, Filter, Model, Result, Select};

use rowmap_core::stmt::Expr;

use std::{collections::HashMap, fmt, sync::Arc};

/// Cache of the rows whose foreign key points at this row.
pub struct HasMany<T> {
    values: Option<Vec<Arc<T>>>,
}

impl<T> HasMany<T> {
    /// The related rows; empty when not loaded.
    pub fn get(&self) -> &[Arc<T>] {
        self.values.as_deref().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.get().iter().map(|value| &**value)
    }

    pub fn len(&self) -> usize {
        self.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.get().is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.values.is_some()
    }

    pub fn set(&mut self, values: Vec<Arc<T>>) {
        self.values = Some(values);
    }

    /// Appends `value`, marking the cache loaded.
    pub fn push(&mut self, value: Arc<T>) {
        self.values.get_or_insert_with(Vec::new).push(value);
    }

    pub fn retain(&mut self, mut f: impl FnMut(&T) -> bool) {
        if let Some(values) = &mut self.values {
            values.retain(|value| f(value));
        }
    }

    pub fn unload(&mut self) {
        self.values = None;
    }
}

impl<T> Default for HasMany<T> {
    fn default() -> Self {
        Self { values: None }
    }
}

impl<T> Clone for HasMany<T> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for HasMany<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.values {
            Some(values) => fmt.debug_list().entries(values).finish(),
            None => write!(fmt, "<not loaded>"),
        }
    }
}

/// A one-to-many relation from `M` to `T`: `T.references` points at
/// `M.key`.
pub struct HasManyDef<M, T> {
    /// Referenced column on `M`, usually its primary key
    pub key: usize,

    /// Foreign key column on `T`
    pub references: usize,

    pub cache: fn(&mut M) -> &mut HasMany<T>,

    /// `T`'s belongs-to cache pointing back at `M`, if declared
    pub inverse: Option<fn(&mut T) -> &mut BelongsTo<M>>,
}

impl<M: Model, T: Model> HasManyDef<M, T> {
    /// Query for the rows pointing at `owner`.
    pub fn query(&self, owner: &M) -> Select<T> {
        Select::<T>::from_filter(Filter::from_untyped(Expr::eq(
            Expr::column(self.references),
            owner.field(self.key),
        )))
    }

    /// Loads the related rows of every owner with one query.
    ///
    /// Every owner's cache is marked loaded, empty when nothing points at
    /// it. When the inverse is declared, each related row's belongs-to cache
    /// receives its owner.
    pub async fn load(&self, db: &Db, owners: &mut [M]) -> Result<()> {
        let keys = distinct_keys(&*owners, self.key);

        let mut related: Vec<T> = if keys.is_empty() {
            vec![]
        } else {
            Select::<T>::from_filter(Filter::from_untyped(Expr::in_list(
                Expr::column(self.references),
                keys,
            )))
            .all(db)
            .await?
        };

        if let Some(inverse) = self.inverse {
            let owners_by_key: HashMap<Key, Arc<M>> = owners
                .iter()
                .filter_map(|owner| {
                    Some((Key::new(owner.field(self.key))?, Arc::new(owner.detached())))
                })
                .collect();

            for row in &mut related {
                let owner = Key::new(row.field(self.references))
                    .and_then(|key| owners_by_key.get(&key).cloned());
                inverse(row).set(owner);
            }
        }

        let mut related_by_key: HashMap<Key, Vec<Arc<T>>> = HashMap::new();
        for row in related {
            if let Some(key) = Key::new(row.field(self.references)) {
                related_by_key.entry(key).or_default().push(Arc::new(row));
            }
        }

        for owner in owners.iter_mut() {
            let matching = Key::new(owner.field(self.key))
                .and_then(|key| related_by_key.get(&key).cloned())
                .unwrap_or_default();
            (self.cache)(owner).set(matching);
        }

        Ok(())
    }

    /// Points every row of `related` at `owner`.
    ///
    /// With `insert`, the rows are inserted with the foreign key already
    /// set; otherwise only their foreign key column is written. Both caches
    /// are updated.
    pub async fn add(&self, db: &Db, owner: &mut M, insert: bool, related: &mut [T]) -> Result<()> {
        let value = owner.field(self.key);

        for row in related.iter_mut() {
            row.set_field(self.references, value.clone())?;

            if insert {
                db.insert(row, Columns::Infer).await?;
            } else {
                write_key(db, &*row, self.references, value.clone()).await?;
            }
        }

        let owner_ref = Arc::new(owner.detached());
        let cache = (self.cache)(owner);

        for row in related.iter_mut() {
            cache.push(Arc::new(row.detached()));

            if let Some(inverse) = self.inverse {
                inverse(row).set(Some(owner_ref.clone()));
            }
        }

        Ok(())
    }
}
