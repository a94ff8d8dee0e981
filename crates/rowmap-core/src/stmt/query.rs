use super::*;
use crate::schema::Table;

#[derive(Debug, Clone)]
pub struct Query {
    pub table: &'static Table,

    /// What the query produces
    pub returning: Returning,

    /// `WHERE` clause; `None` matches every row
    pub filter: Option<Expr>,

    pub order_by: Vec<OrderBy>,

    pub limit: Option<u64>,

    pub offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Returning {
    /// Return the listed columns, by position
    Columns(Vec<usize>),

    /// `SELECT COUNT(*)`
    Count,

    /// `SELECT EXISTS(..)`
    Exists,
}

impl Query {
    /// Selects every column of `table`.
    pub fn new(table: &'static Table) -> Self {
        Self {
            table,
            returning: Returning::Columns((0..table.columns.len()).collect()),
            filter: None,
            order_by: vec![],
            limit: None,
            offset: None,
        }
    }

    pub fn filter(table: &'static Table, filter: impl Into<Expr>) -> Self {
        let mut query = Self::new(table);
        query.filter = Some(filter.into());
        query
    }

    /// Adds `expr` to the filter with AND.
    pub fn and(&mut self, expr: impl Into<Expr>) {
        self.filter = Some(match self.filter.take() {
            Some(filter) => Expr::and(filter, expr),
            None => expr.into(),
        });
    }

    /// Adds `expr` to the filter with OR.
    pub fn or(&mut self, expr: impl Into<Expr>) {
        self.filter = Some(match self.filter.take() {
            Some(filter) => Expr::or(filter, expr),
            None => expr.into(),
        });
    }

    /// Types of the returned columns, used by drivers to decode rows.
    pub fn returning_types(&self) -> Vec<Type> {
        match &self.returning {
            Returning::Columns(columns) => columns
                .iter()
                .map(|index| self.table.columns[*index].ty)
                .collect(),
            Returning::Count => vec![Type::I64],
            Returning::Exists => vec![Type::Bool],
        }
    }
}
