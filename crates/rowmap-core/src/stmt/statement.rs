use super::*;
use crate::schema::Table;

#[derive(Debug, Clone)]
pub enum Statement {
    Query(Query),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

impl Statement {
    pub fn table(&self) -> &'static Table {
        match self {
            Self::Query(stmt) => stmt.table,
            Self::Insert(stmt) => stmt.table,
            Self::Update(stmt) => stmt.table,
            Self::Delete(stmt) => stmt.table,
        }
    }

    /// Column types of the rows the statement returns, or `None` when it
    /// only reports an affected-row count.
    pub fn returning_types(&self) -> Option<Vec<Type>> {
        match self {
            Self::Query(stmt) => Some(stmt.returning_types()),
            Self::Insert(stmt) if !stmt.returning.is_empty() => Some(stmt.returning_types()),
            Self::Update(stmt) if !stmt.returning.is_empty() => Some(
                stmt.returning
                    .iter()
                    .map(|index| stmt.table.columns[*index].ty)
                    .collect(),
            ),
            _ => None,
        }
    }
}

impl From<Query> for Statement {
    fn from(value: Query) -> Self {
        Self::Query(value)
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
