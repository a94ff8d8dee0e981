use super::{value::Record, ColumnName, Comma, Ident, Params, ToSql};

use rowmap_core::stmt::{self, ConflictAction, Direction, Returning};

impl ToSql for &stmt::Statement {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            stmt::Statement::Query(stmt) => stmt.to_sql(f),
            stmt::Statement::Insert(stmt) => stmt.to_sql(f),
            stmt::Statement::Update(stmt) => stmt.to_sql(f),
            stmt::Statement::Delete(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::Query {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table_name = Ident(self.table.name);

        match &self.returning {
            Returning::Columns(columns) => {
                fmt!(f, "SELECT " Comma(columns) " FROM " table_name Filter(self.filter.as_ref()) Paging(self));
            }
            // A paged count counts the rows of the page
            Returning::Count if self.limit.is_some() || self.offset.is_some() => {
                fmt!(f, "SELECT COUNT(*) FROM (SELECT 1 FROM " table_name Filter(self.filter.as_ref()) Paging(self) ") AS \"page\"");
            }
            Returning::Count => {
                fmt!(f, "SELECT COUNT(*) FROM " table_name Filter(self.filter.as_ref()));
            }
            Returning::Exists => {
                fmt!(f, "SELECT EXISTS(SELECT 1 FROM " table_name Filter(self.filter.as_ref()) " LIMIT 1)");
            }
        }
    }
}

/// ` ORDER BY .. LIMIT .. OFFSET ..`
struct Paging<'a>(&'a stmt::Query);

impl ToSql for Paging<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let query = self.0;

        if !query.order_by.is_empty() {
            fmt!(f, " ORDER BY " Comma(&query.order_by));
        }

        match (query.limit, query.offset) {
            (Some(limit), Some(offset)) => fmt!(f, " LIMIT " limit " OFFSET " offset),
            (Some(limit), None) => fmt!(f, " LIMIT " limit),
            // SQLite only accepts OFFSET after a LIMIT
            (None, Some(offset)) if f.serializer.is_sqlite() => {
                fmt!(f, " LIMIT -1 OFFSET " offset)
            }
            (None, Some(offset)) => fmt!(f, " OFFSET " offset),
            (None, None) => {}
        }
    }
}

impl ToSql for &stmt::OrderBy {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let direction = match self.direction {
            Direction::Asc => " ASC",
            Direction::Desc => " DESC",
        };
        fmt!(f, ColumnName(self.column) direction);
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table_name = Ident(self.table.name);

        fmt!(f, "INSERT INTO " table_name);

        if self.columns.is_empty() {
            fmt!(f, " DEFAULT VALUES");
        } else {
            let rows = Comma(self.rows.iter().map(|row| Record(&row.fields)));
            fmt!(f, " (" Comma(&self.columns) ") VALUES " rows);
        }

        if let Some(on_conflict) = &self.on_conflict {
            fmt!(f, " ON CONFLICT (" Comma(&on_conflict.target) ")");

            match &on_conflict.action {
                ConflictAction::DoNothing => fmt!(f, " DO NOTHING"),
                ConflictAction::DoUpdate(columns) => {
                    let assignments = Comma(columns.iter().map(|c| Excluded(*c)));
                    fmt!(f, " DO UPDATE SET " assignments);
                }
            }
        }

        fmt!(f, ReturningColumns(&self.returning));
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table_name = Ident(self.table.name);

        fmt!(f, "UPDATE " table_name " SET " Comma(&self.assignments) Filter(Some(&self.filter)) ReturningColumns(&self.returning));
    }
}

impl ToSql for &stmt::Assignment {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let value = &self.value;
        fmt!(f, ColumnName(self.column) " = " value);
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table_name = Ident(self.table.name);

        fmt!(f, "DELETE FROM " table_name Filter(Some(&self.filter)));
    }
}

/// ` WHERE <expr>`, omitted when the filter matches everything
struct Filter<'a>(Option<&'a stmt::Expr>);

impl ToSql for Filter<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self.0 {
            Some(expr) if !expr.is_true() => fmt!(f, " WHERE " expr),
            _ => {}
        }
    }
}

/// `"col" = EXCLUDED."col"`
struct Excluded(usize);

impl ToSql for Excluded {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, ColumnName(self.0) " = EXCLUDED." ColumnName(self.0));
    }
}

struct ReturningColumns<'a>(&'a [usize]);

impl ToSql for ReturningColumns<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        if !self.0.is_empty() {
            fmt!(f, " RETURNING " Comma(self.0));
        }
    }
}
