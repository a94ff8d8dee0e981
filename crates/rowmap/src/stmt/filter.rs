use rowmap_core::stmt;

use std::{fmt, marker::PhantomData};

/// A predicate over the rows of `M`.
///
/// Built from [`Path`](super::Path) comparisons and combined with `and`,
/// `or`, and `not`.
pub struct Filter<M> {
    pub(crate) untyped: stmt::Expr,
    _p: PhantomData<fn() -> M>,
}

impl<M> Filter<M> {
    pub fn from_untyped(untyped: impl Into<stmt::Expr>) -> Self {
        Self {
            untyped: untyped.into(),
            _p: PhantomData,
        }
    }

    /// Matches every row.
    pub fn all() -> Self {
        Self::from_untyped(stmt::Expr::true_())
    }

    /// Matches rows satisfying every filter. An empty list matches every row.
    pub fn and_all(filters: impl IntoIterator<Item = Filter<M>>) -> Self {
        Self::from_untyped(stmt::Expr::and_from_vec(
            filters.into_iter().map(|filter| filter.untyped).collect(),
        ))
    }

    /// Matches rows satisfying any filter. An empty list matches nothing.
    pub fn or_any(filters: impl IntoIterator<Item = Filter<M>>) -> Self {
        Self::from_untyped(stmt::Expr::or_from_vec(
            filters.into_iter().map(|filter| filter.untyped).collect(),
        ))
    }

    pub fn and(self, rhs: Filter<M>) -> Self {
        Self::from_untyped(stmt::Expr::and(self.untyped, rhs.untyped))
    }

    pub fn or(self, rhs: Filter<M>) -> Self {
        Self::from_untyped(stmt::Expr::or(self.untyped, rhs.untyped))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::from_untyped(stmt::Expr::not(self.untyped))
    }

    pub fn into_untyped(self) -> stmt::Expr {
        self.untyped
    }
}

impl<M> Clone for Filter<M> {
    fn clone(&self) -> Self {
        Self::from_untyped(self.untyped.clone())
    }
}

impl<M> fmt::Debug for Filter<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.untyped.fmt(f)
    }
}

impl<M> From<Filter<M>> for stmt::Expr {
    fn from(value: Filter<M>) -> Self {
        value.untyped
    }
}
