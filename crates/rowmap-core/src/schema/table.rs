use super::{Column, Relation};
use crate::{Error, Result};

/// Describes one table: its columns, key, and relations.
///
/// Tables are generated as constants by `#[derive(Model)]`, so every field
/// is `'static`.
#[derive(Debug)]
pub struct Table {
    /// Name of the table
    pub name: &'static str,

    /// The table's columns, in row struct field order
    pub columns: &'static [Column],

    /// `table.column` for every column, same order as `columns`
    pub qualified_columns: &'static [&'static str],

    /// Positions of the primary key columns
    pub primary_key: &'static [usize],

    pub relations: &'static [Relation],
}

impl Table {
    pub fn column(&self, index: usize) -> &'static Column {
        &self.columns[index]
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    /// Resolves column names to positions, failing on the first unknown
    /// name.
    pub fn resolve(&self, names: &[&str]) -> Result<Vec<usize>> {
        names
            .iter()
            .map(|name| {
                self.column_index(name)
                    .ok_or_else(|| Error::validation_unknown_column(self.name, *name))
            })
            .collect()
    }

    pub fn primary_key_columns(&self) -> impl ExactSizeIterator<Item = &'static Column> + '_ {
        self.primary_key.iter().map(|index| &self.columns[*index])
    }

    pub fn columns_without_default(&self) -> impl Iterator<Item = &'static Column> {
        self.columns
            .iter()
            .filter(|column| !column.has_default && !column.generated)
    }

    pub fn columns_with_default(&self) -> impl Iterator<Item = &'static Column> {
        self.columns
            .iter()
            .filter(|column| column.has_default && !column.generated)
    }

    pub fn generated_columns(&self) -> impl Iterator<Item = &'static Column> {
        self.columns.iter().filter(|column| column.generated)
    }

    pub fn created_at(&self) -> Option<&'static Column> {
        self.columns.iter().find(|column| column.is_created_at())
    }

    pub fn updated_at(&self) -> Option<&'static Column> {
        self.columns.iter().find(|column| column.is_updated_at())
    }

    /// Checks that a key has one value per primary key column.
    pub fn check_key_arity(&self, actual: usize) -> Result<()> {
        if actual != self.primary_key.len() {
            return Err(Error::validation_incomplete_key(
                self.name,
                self.primary_key.len(),
                actual,
            ));
        }
        Ok(())
    }
}
