use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprOr {
    pub operands: Vec<Expr>,
}

impl Expr {
    pub fn or(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::or_from_vec(vec![lhs.into(), rhs.into()])
    }

    /// Disjunction of `operands`. Nested ORs are flattened. An empty list
    /// matches nothing and is serialized as `FALSE`.
    pub fn or_from_vec(operands: Vec<Expr>) -> Self {
        let mut flat = Vec::with_capacity(operands.len());

        for operand in operands {
            match operand {
                Expr::Or(or) => flat.extend(or.operands),
                expr => flat.push(expr),
            }
        }

        if flat.len() == 1 {
            if let Some(expr) = flat.pop() {
                return expr;
            }
        }

        ExprOr { operands: flat }.into()
    }
}

impl From<ExprOr> for Expr {
    fn from(value: ExprOr) -> Self {
        Self::Or(value)
    }
}
