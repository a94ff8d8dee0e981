use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprAnd {
    pub operands: Vec<Expr>,
}

impl Expr {
    /// Conjunction of two expressions. Nested ANDs are flattened and a
    /// literal `true` operand is dropped.
    pub fn and(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::and_from_vec(vec![lhs.into(), rhs.into()])
    }

    pub fn and_from_vec(operands: Vec<Expr>) -> Self {
        let mut flat = Vec::with_capacity(operands.len());

        for operand in operands {
            match operand {
                Expr::And(and) => flat.extend(and.operands),
                expr if expr.is_true() => {}
                expr => flat.push(expr),
            }
        }

        match flat.len() {
            0 => Expr::true_(),
            1 => flat.pop().unwrap_or_else(Expr::true_),
            _ => ExprAnd { operands: flat }.into(),
        }
    }
}

impl From<ExprAnd> for Expr {
    fn from(value: ExprAnd) -> Self {
        Self::And(value)
    }
}
