#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

mod flavor;
use flavor::Flavor;

mod ident;
use ident::{ColumnName, Ident};

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod expr;
mod statement;
mod value;

use rowmap_core::{driver::Dialect, schema::Table, stmt::Statement};

/// Serialize a statement to a SQL string
#[derive(Debug, Clone, Copy)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects and
    /// supported features.
    flavor: Flavor,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,

    /// Table the statement operates on; column references resolve against it
    table: &'static Table,
}

impl Serializer {
    pub fn new(dialect: Dialect) -> Serializer {
        Serializer {
            flavor: dialect.into(),
        }
    }

    /// Serializes `stmt`, pushing every bound value to `params` in
    /// placeholder order.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
            table: stmt.table(),
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }
}
