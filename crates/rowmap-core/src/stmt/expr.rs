use super::*;

/// A filter expression over the columns of a single table.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// AND a set of binary expressions
    And(ExprAnd),

    /// Binary expression
    BinaryOp(ExprBinaryOp),

    /// Reference to a column of the statement's table, by position
    Column(usize),

    /// In list
    InList(ExprInList),

    /// Whether an expression is (or is not) null
    IsNull(ExprIsNull),

    /// Negates a boolean expression
    Not(ExprNot),

    /// OR a set of binary expressions
    Or(ExprOr),

    /// Evaluates to a constant value reference, bound as a parameter
    Value(Value),
}

impl Expr {
    pub fn column(index: usize) -> Self {
        Self::Column(index)
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub const fn true_() -> Self {
        Self::Value(Value::Bool(true))
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Self::Value(Value::Bool(true)))
    }

    pub fn as_column(&self) -> Option<usize> {
        match self {
            Self::Column(index) => Some(*index),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Visits every bound value in the order the serializer emits
    /// placeholders for them.
    pub fn for_each_value(&self, f: &mut impl FnMut(&Value)) {
        match self {
            Self::And(expr) => expr.operands.iter().for_each(|e| e.for_each_value(f)),
            Self::Or(expr) => expr.operands.iter().for_each(|e| e.for_each_value(f)),
            Self::BinaryOp(expr) => {
                expr.lhs.for_each_value(f);
                expr.rhs.for_each_value(f);
            }
            Self::InList(expr) => {
                expr.expr.for_each_value(f);
                expr.list.iter().for_each(|v| f(v));
            }
            Self::IsNull(expr) => expr.expr.for_each_value(f),
            Self::Not(expr) => expr.expr.for_each_value(f),
            Self::Column(_) => {}
            Self::Value(value) => f(value),
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}
