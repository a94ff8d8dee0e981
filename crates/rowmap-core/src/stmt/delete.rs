use super::*;
use crate::schema::Table;

#[derive(Debug, Clone)]
pub struct Delete {
    pub table: &'static Table,
    pub filter: Expr,
}
