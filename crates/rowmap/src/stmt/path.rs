use super::{Expr, Filter, IntoExpr, Primitive};

use rowmap_core::stmt::{self, OrderBy};

use std::{fmt, marker::PhantomData};

/// A typed reference to column `T` of model `M`.
///
/// Generated field accessors (`Model::FIELDS.name()`) return paths.
pub struct Path<M, T> {
    index: usize,
    _p: PhantomData<fn() -> (M, T)>,
}

impl<M, T> Path<M, T> {
    pub const fn from_field_index(index: usize) -> Self {
        Self {
            index,
            _p: PhantomData,
        }
    }

    /// Column position in the model's table.
    pub const fn index(&self) -> usize {
        self.index
    }

    fn column(&self) -> stmt::Expr {
        stmt::Expr::column(self.index)
    }

    pub fn eq(self, rhs: impl IntoExpr<T>) -> Filter<M> {
        Filter::from_untyped(stmt::Expr::eq(self.column(), rhs.into_expr().untyped))
    }

    pub fn ne(self, rhs: impl IntoExpr<T>) -> Filter<M> {
        Filter::from_untyped(stmt::Expr::ne(self.column(), rhs.into_expr().untyped))
    }

    pub fn gt(self, rhs: impl IntoExpr<T>) -> Filter<M> {
        Filter::from_untyped(stmt::Expr::gt(self.column(), rhs.into_expr().untyped))
    }

    pub fn ge(self, rhs: impl IntoExpr<T>) -> Filter<M> {
        Filter::from_untyped(stmt::Expr::ge(self.column(), rhs.into_expr().untyped))
    }

    pub fn lt(self, rhs: impl IntoExpr<T>) -> Filter<M> {
        Filter::from_untyped(stmt::Expr::lt(self.column(), rhs.into_expr().untyped))
    }

    pub fn le(self, rhs: impl IntoExpr<T>) -> Filter<M> {
        Filter::from_untyped(stmt::Expr::le(self.column(), rhs.into_expr().untyped))
    }

    pub fn is_null(self) -> Filter<M> {
        Filter::from_untyped(stmt::Expr::is_null(self.column()))
    }

    pub fn is_not_null(self) -> Filter<M> {
        Filter::from_untyped(stmt::Expr::is_not_null(self.column()))
    }

    /// Matches rows whose column equals one of `values`. An empty list
    /// matches nothing.
    pub fn in_list(self, values: impl IntoIterator<Item = T>) -> Filter<M>
    where
        T: Primitive,
    {
        Filter::from_untyped(stmt::Expr::in_list(
            self.column(),
            values.into_iter().map(|value| value.to_value()),
        ))
    }

    pub fn asc(self) -> OrderBy {
        OrderBy::asc(self.index)
    }

    pub fn desc(self) -> OrderBy {
        OrderBy::desc(self.index)
    }
}

impl<M, T> IntoExpr<T> for Path<M, T> {
    fn into_expr(self) -> Expr<T> {
        Expr::from_untyped(self.column())
    }
}

impl<M, T> Clone for Path<M, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, T> Copy for Path<M, T> {}

impl<M, T> fmt::Debug for Path<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Path").field(&self.index).finish()
    }
}
