use super::{IntoExpr, Path};

use rowmap_core::stmt::Assignment;

use std::marker::PhantomData;

/// `SET` list for bulk updates of `M`.
pub struct Assignments<M> {
    pub(crate) untyped: Vec<Assignment>,
    _p: PhantomData<fn() -> M>,
}

impl<M> Assignments<M> {
    pub fn new() -> Self {
        Self {
            untyped: vec![],
            _p: PhantomData,
        }
    }

    /// Sets the column `path` to `value`. A later assignment to the same
    /// column replaces the earlier one.
    pub fn set<T>(mut self, path: Path<M, T>, value: impl IntoExpr<T>) -> Self {
        let assignment = Assignment::new(path.index(), value.into_expr().untyped);

        match self
            .untyped
            .iter_mut()
            .find(|existing| existing.column == assignment.column)
        {
            Some(existing) => *existing = assignment,
            None => self.untyped.push(assignment),
        }

        self
    }

    pub fn is_empty(&self) -> bool {
        self.untyped.is_empty()
    }

    pub fn len(&self) -> usize {
        self.untyped.len()
    }
}

impl<M> Default for Assignments<M> {
    fn default() -> Self {
        Self::new()
    }
}
