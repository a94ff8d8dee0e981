use super::*;
use crate::schema::Table;

#[derive(Debug, Clone)]
pub struct Insert {
    pub table: &'static Table,

    /// Columns written, by position. Empty means `DEFAULT VALUES`.
    pub columns: Vec<usize>,

    /// One record per row, matching `columns`
    pub rows: Vec<ValueRecord>,

    pub on_conflict: Option<OnConflict>,

    /// Columns returned for every written row
    pub returning: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OnConflict {
    /// Conflict target columns
    pub target: Vec<usize>,
    pub action: ConflictAction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConflictAction {
    DoNothing,

    /// Overwrite the listed columns with the proposed row's values
    DoUpdate(Vec<usize>),
}

impl Insert {
    pub fn returning_types(&self) -> Vec<Type> {
        self.returning
            .iter()
            .map(|index| self.table.columns[*index].ty)
            .collect()
    }
}
