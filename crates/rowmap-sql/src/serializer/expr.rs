use super::{ColumnName, Comma, Delimited, Params, ToSql};

use rowmap_core::stmt;

impl ToSql for &stmt::Expr {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        use stmt::Expr::*;

        match self {
            And(expr) if expr.operands.is_empty() => fmt!(f, "TRUE"),
            And(expr) => {
                fmt!(f, Delimited(expr.operands.iter().map(Grouped), " AND "));
            }
            BinaryOp(expr) => {
                let rhs = &*expr.rhs;
                fmt!(f, &*expr.lhs " " expr.op " " rhs);
            }
            Column(index) => fmt!(f, ColumnName(*index)),
            // `x IN ()` is not valid SQL
            InList(expr) if expr.list.is_empty() => fmt!(f, "FALSE"),
            InList(expr) => {
                fmt!(f, &*expr.expr " IN (" Comma(&expr.list) ")");
            }
            IsNull(expr) => {
                if expr.negate {
                    fmt!(f, &*expr.expr " IS NOT NULL");
                } else {
                    fmt!(f, &*expr.expr " IS NULL");
                }
            }
            Not(expr) => {
                fmt!(f, "NOT " Grouped(&expr.expr));
            }
            Or(expr) if expr.operands.is_empty() => fmt!(f, "FALSE"),
            Or(expr) => {
                fmt!(f, Delimited(expr.operands.iter().map(Grouped), " OR "));
            }
            Value(value) => value.to_sql(f),
        }
    }
}

impl ToSql for stmt::BinaryOp {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        f.dst.push_str(match self {
            stmt::BinaryOp::Eq => "=",
            stmt::BinaryOp::Gt => ">",
            stmt::BinaryOp::Ge => ">=",
            stmt::BinaryOp::Lt => "<",
            stmt::BinaryOp::Le => "<=",
            stmt::BinaryOp::Ne => "<>",
        })
    }
}

/// Parenthesizes compound operands of AND / OR / NOT.
struct Grouped<'a>(&'a stmt::Expr);

impl ToSql for Grouped<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self.0 {
            stmt::Expr::And(_) | stmt::Expr::Or(_) | stmt::Expr::Not(_) => {
                fmt!(f, "(" self.0 ")")
            }
            expr => expr.to_sql(f),
        }
    }
}
