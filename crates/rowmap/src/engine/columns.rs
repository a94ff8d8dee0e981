use crate::{Error, Model, Result};

use rowmap_core::schema::{Column, Table};

/// Which columns an insert or update writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Columns {
    /// Insert: every column without a database default, plus the
    /// default-bearing columns set to a non-zero value.
    /// Update: every column except the primary key and `created_at`.
    #[default]
    Infer,

    /// Exactly the listed columns (never the primary key on update)
    Whitelist(Vec<&'static str>),

    /// `Infer` minus the listed columns
    Blacklist(Vec<&'static str>),

    /// `Infer` plus the listed columns
    Greylist(Vec<&'static str>),

    /// Insert: every column. Update: same as `Infer`.
    All,

    /// Nothing: `DEFAULT VALUES` on insert; an update with `None` fails.
    None,
}

impl Columns {
    pub fn whitelist(names: impl IntoIterator<Item = &'static str>) -> Columns {
        Columns::Whitelist(names.into_iter().collect())
    }

    pub fn blacklist(names: impl IntoIterator<Item = &'static str>) -> Columns {
        Columns::Blacklist(names.into_iter().collect())
    }

    pub fn greylist(names: impl IntoIterator<Item = &'static str>) -> Columns {
        Columns::Greylist(names.into_iter().collect())
    }

    /// True if the resolved insert columns depend on which fields of the
    /// row are zero.
    pub(crate) fn reads_zero_values(&self) -> bool {
        matches!(
            self,
            Columns::Infer | Columns::Blacklist(_) | Columns::Greylist(_)
        )
    }

    /// Columns written by an insert of `row`, in table order.
    pub(crate) fn insert_columns<M: Model>(&self, row: &M) -> Result<Vec<usize>> {
        let table = M::TABLE;
        let infer = |column: &Column| {
            !column.generated && (!column.has_default || !row.is_zero(column.index))
        };

        Ok(match self {
            Columns::Infer => select(table, infer),
            Columns::Whitelist(names) => {
                let listed = table.resolve(names)?;
                select(table, |column| listed.contains(&column.index))
            }
            Columns::Blacklist(names) => {
                let listed = table.resolve(names)?;
                select(table, |column| {
                    infer(column) && !listed.contains(&column.index)
                })
            }
            Columns::Greylist(names) => {
                let listed = table.resolve(names)?;
                select(table, |column| {
                    infer(column) || (!column.generated && listed.contains(&column.index))
                })
            }
            Columns::All => select(table, |column| !column.generated),
            Columns::None => vec![],
        })
    }

    /// Columns written by an update, in table order. `op` names the
    /// operation in the error returned when nothing is left to write.
    pub(crate) fn update_columns(&self, table: &'static Table, op: &'static str) -> Result<Vec<usize>> {
        let writable = |column: &Column| !column.primary_key && !column.generated;
        let infer = |column: &Column| writable(column) && !column.is_created_at();

        let columns = match self {
            Columns::Infer | Columns::All => select(table, infer),
            Columns::Whitelist(names) => {
                let listed = table.resolve(names)?;
                select(table, |column| {
                    writable(column) && listed.contains(&column.index)
                })
            }
            Columns::Blacklist(names) => {
                let listed = table.resolve(names)?;
                select(table, |column| {
                    infer(column) && !listed.contains(&column.index)
                })
            }
            Columns::Greylist(names) => {
                let listed = table.resolve(names)?;
                select(table, |column| {
                    infer(column) || (writable(column) && listed.contains(&column.index))
                })
            }
            Columns::None => vec![],
        };

        if columns.is_empty() {
            return Err(Error::validation_empty_columns(op, table.name));
        }

        Ok(columns)
    }
}

fn select(table: &'static Table, f: impl Fn(&Column) -> bool) -> Vec<usize> {
    table
        .columns
        .iter()
        .filter(|column| f(column))
        .map(|column| column.index)
        .collect()
}

/// Adds the timestamp columns the engine just set to `columns`, keeping
/// table order. `created_at` is only added for inserts.
pub(crate) fn with_timestamps(
    table: &'static Table,
    mut columns: Vec<usize>,
    created_at: bool,
) -> Vec<usize> {
    let touched = [table.created_at().filter(|_| created_at), table.updated_at()];

    for column in touched.into_iter().flatten() {
        if !columns.contains(&column.index) {
            columns.push(column.index);
        }
    }

    columns.sort_unstable();
    columns
}

/// Columns an insert writing `written` should read back: those the database
/// fills in.
pub(crate) fn returning_columns(table: &'static Table, written: &[usize]) -> Vec<usize> {
    select(table, |column| {
        (column.has_default || column.generated) && !written.contains(&column.index)
    })
}
