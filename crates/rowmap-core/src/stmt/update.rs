use super::*;
use crate::schema::Table;

#[derive(Debug, Clone)]
pub struct Update {
    pub table: &'static Table,
    pub assignments: Vec<Assignment>,
    pub filter: Expr,
    pub returning: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Column position
    pub column: usize,
    pub value: Expr,
}

impl Assignment {
    pub fn new(column: usize, value: impl Into<Expr>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }
}
