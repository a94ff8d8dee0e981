use super::{Formatter, Params, ToSql};

/// A double-quoted identifier
pub(super) struct Ident<S>(pub(super) S);

/// A column of the statement's table, by position
pub(super) struct ColumnName(pub(super) usize);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push('"');
        for c in self.0.as_ref().chars() {
            if c == '"' {
                f.dst.push('"');
            }
            f.dst.push(c);
        }
        f.dst.push('"');
    }
}

impl ToSql for ColumnName {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let name = f.table.columns[self.0].name;
        Ident(name).to_sql(f);
    }
}

impl ToSql for &usize {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        ColumnName(*self).to_sql(f);
    }
}
