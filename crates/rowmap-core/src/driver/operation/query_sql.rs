use super::Operation;
use crate::stmt::{Type, Value};

use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct QuerySql {
    /// The serialized statement
    pub sql: Arc<str>,

    /// Values bound to the statement's placeholders, in order
    pub params: Vec<Value>,

    /// When `Some`, the statement returns rows with these column types.
    /// Otherwise, the driver returns the affected-row count.
    pub ret: Option<Vec<Type>>,
}

impl From<QuerySql> for Operation {
    fn from(value: QuerySql) -> Self {
        Self::QuerySql(value)
    }
}
