use crate::Result;

use rowmap_core::{
    schema::Table,
    stmt::{Value, ValueRecord},
};

/// A row struct bound to a table.
///
/// Implemented by `#[derive(Model)]`. Field positions are column positions:
/// `field(i)` reads the value stored in `TABLE.columns[i]`. Relation cache
/// fields are not columns and are never read or written through this trait.
pub trait Model: Clone + Default + Send + Sync + Sized + 'static {
    /// Table the row struct maps to
    const TABLE: &'static Table;

    /// Reads the column at `index`.
    fn field(&self, index: usize) -> Value;

    /// Writes the column at `index`, converting `value` to the field type.
    fn set_field(&mut self, index: usize, value: Value) -> Result<()>;

    /// True if the column at `index` holds its type's zero value.
    fn is_zero(&self, index: usize) -> bool;

    /// Copies the row without its relation caches.
    fn detached(&self) -> Self;

    /// Overwrites the listed columns with the values of `record`.
    fn load_columns(&mut self, columns: &[usize], record: ValueRecord) -> Result<()> {
        for (index, value) in columns.iter().zip(record) {
            self.set_field(*index, value)?;
        }
        Ok(())
    }

    /// Values of the primary key columns, in key order.
    fn primary_key(&self) -> Vec<Value> {
        Self::TABLE
            .primary_key
            .iter()
            .map(|index| self.field(*index))
            .collect()
    }
}
