use super::{distinct_keys, write_key, HasMany, Key};
use crate::{Columns, Db, Filter, Model, Result, Select};

use rowmap_core::stmt::{Expr, Value};

use std::{collections::HashMap, fmt, sync::Arc};

/// Cache of the row a foreign key points at.
pub struct BelongsTo<T> {
    /// `None` until loaded; `Some(None)` when loaded and absent
    value: Option<Option<Arc<T>>>,
}

impl<T> BelongsTo<T> {
    /// The related row, if loaded and present.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref().and_then(|value| value.as_deref())
    }

    pub fn is_loaded(&self) -> bool {
        self.value.is_some()
    }

    pub fn set(&mut self, value: Option<Arc<T>>) {
        self.value = Some(value);
    }

    pub fn unload(&mut self) {
        self.value = None;
    }
}

impl<T> Default for BelongsTo<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T> Clone for BelongsTo<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for BelongsTo<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(Some(t)) => t.fmt(fmt),
            Some(None) => write!(fmt, "<none>"),
            None => write!(fmt, "<not loaded>"),
        }
    }
}

/// A many-to-one relation from `M` to `T`: `M.key` references `T.references`.
pub struct BelongsToDef<M, T> {
    /// Foreign key column on `M`
    pub key: usize,

    /// Referenced column on `T`
    pub references: usize,

    pub cache: fn(&mut M) -> &mut BelongsTo<T>,

    /// `T`'s has-many cache pointing back at `M`, if declared
    pub inverse: Option<fn(&mut T) -> &mut HasMany<M>>,
}

impl<M: Model, T: Model> BelongsToDef<M, T> {
    /// Query for the row `owner` points at.
    pub fn query(&self, owner: &M) -> Select<T> {
        Select::<T>::from_filter(Filter::from_untyped(Expr::eq(
            Expr::column(self.references),
            owner.field(self.key),
        )))
    }

    /// Loads the related row of every owner with one query.
    ///
    /// Owners with a null key, or whose key matches nothing, are marked
    /// loaded and absent. When the inverse is declared, each related row's
    /// has-many cache receives the owners pointing at it.
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
            let mut owners_by_key: HashMap<Key, Vec<Arc<M>>> = HashMap::new();
            for owner in owners.iter() {
                if let Some(key) = Key::new(owner.field(self.key)) {
                    owners_by_key
                        .entry(key)
                        .or_default()
                        .push(Arc::new(owner.detached()));
                }
            }

            for row in &mut related {
                let matching = Key::new(row.field(self.references))
                    .and_then(|key| owners_by_key.get(&key).cloned())
                    .unwrap_or_default();
                inverse(row).set(matching);
            }
        }

        let related: HashMap<Key, Arc<T>> = related
            .into_iter()
            .filter_map(|row| Some((Key::new(row.field(self.references))?, Arc::new(row))))
            .collect();

        for owner in owners.iter_mut() {
            let found = Key::new(owner.field(self.key)).and_then(|key| related.get(&key).cloned());
            (self.cache)(owner).set(found);
        }

        Ok(())
    }

    /// Points `owner` at `related`, inserting `related` first when `insert`
    /// is set.
    ///
    /// Only the foreign key column is written, and both caches are updated.
    pub async fn set(&self, db: &Db, owner: &mut M, insert: bool, related: &mut T) -> Result<()> {
        if insert {
            db.insert(related, Columns::Infer).await?;
        }

        let value = related.field(self.references);
        write_key(db, &*owner, self.key, value.clone()).await?;
        owner.set_field(self.key, value)?;

        (self.cache)(owner).set(Some(Arc::new(related.detached())));

        if let Some(inverse) = self.inverse {
            inverse(related).push(Arc::new(owner.detached()));
        }

        Ok(())
    }

    /// Clears a nullable foreign key on `owner`.
    ///
    /// When given, `owner` is also dropped from `related`'s has-many cache.
    pub async fn remove(&self, db: &Db, owner: &mut M, related: Option<&mut T>) -> Result<()> {
        write_key(db, &*owner, self.key, Value::Null).await?;
        owner.set_field(self.key, Value::Null)?;

        (self.cache)(owner).set(None);

        if let (Some(inverse), Some(related)) = (self.inverse, related) {
            let key = owner.primary_key();
            inverse(related).retain(|row| row.primary_key() != key);
        }

        Ok(())
    }
}
