use super::{Comma, Params, ToSql};

use rowmap_core::stmt;

impl ToSql for &stmt::Value {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let placeholder = f.params.push(self);
        fmt!(f, placeholder);
    }
}

/// A parenthesized, comma-separated record of bound values
pub(super) struct Record<'a>(pub(super) &'a [stmt::Value]);

impl ToSql for Record<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, "(" Comma(self.0) ")");
    }
}
