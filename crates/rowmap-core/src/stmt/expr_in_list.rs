use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    pub expr: Box<Expr>,
    pub list: Vec<Value>,
}

impl Expr {
    /// `expr IN (list..)`. An empty list matches nothing.
    pub fn in_list(expr: impl Into<Expr>, list: impl IntoIterator<Item = Value>) -> Self {
        ExprInList {
            expr: Box::new(expr.into()),
            list: list.into_iter().collect(),
        }
        .into()
    }
}

impl From<ExprInList> for Expr {
    fn from(value: ExprInList) -> Self {
        Self::InList(value)
    }
}
