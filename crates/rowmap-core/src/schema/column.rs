use crate::stmt;

#[derive(Debug, PartialEq)]
pub struct Column {
    /// Position of the column in its table (and of the field in the row
    /// struct).
    pub index: usize,

    /// The name of the column in the database.
    pub name: &'static str,

    /// The column type, from rowmap's point of view.
    pub ty: stmt::Type,

    /// Whether or not the column is nullable
    pub nullable: bool,

    /// True if the column is part of the table's primary key
    pub primary_key: bool,

    /// True if the database fills the column when an insert omits it
    pub has_default: bool,

    /// True if the database computes the column; it is never written
    pub generated: bool,

    /// Set when the engine maintains the column as a timestamp
    pub auto: Option<AutoTimestamp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutoTimestamp {
    /// Filled on insert when unset
    CreatedAt,

    /// Refreshed on every write
    UpdatedAt,
}

impl Column {
    pub fn is_created_at(&self) -> bool {
        self.auto == Some(AutoTimestamp::CreatedAt)
    }

    pub fn is_updated_at(&self) -> bool {
        self.auto == Some(AutoTimestamp::UpdatedAt)
    }
}
