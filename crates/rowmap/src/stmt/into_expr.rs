use super::{Expr, Primitive};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Converts a Rust value into an expression of type `T`.
///
/// Nullable columns accept both `T` and `Option<T>`.
pub trait IntoExpr<T> {
    fn into_expr(self) -> Expr<T>;
}

impl<T> IntoExpr<T> for Expr<T> {
    fn into_expr(self) -> Self {
        self
    }
}

macro_rules! impl_into_expr {
    ( $( $ty:ty ),* ) => {
        $(
            impl IntoExpr<$ty> for $ty {
                fn into_expr(self) -> Expr<$ty> {
                    Expr::from_value(self.to_value())
                }
            }

            impl IntoExpr<$ty> for &$ty {
                fn into_expr(self) -> Expr<$ty> {
                    Expr::from_value(self.to_value())
                }
            }

            impl IntoExpr<Option<$ty>> for $ty {
                fn into_expr(self) -> Expr<Option<$ty>> {
                    Expr::from_value(self.to_value())
                }
            }

            impl IntoExpr<Option<$ty>> for &$ty {
                fn into_expr(self) -> Expr<Option<$ty>> {
                    Expr::from_value(self.to_value())
                }
            }

            impl IntoExpr<Option<$ty>> for Option<$ty> {
                fn into_expr(self) -> Expr<Option<$ty>> {
                    Expr::from_value(self.to_value())
                }
            }

            impl IntoExpr<Option<$ty>> for &Option<$ty> {
                fn into_expr(self) -> Expr<Option<$ty>> {
                    Expr::from_value(self.to_value())
                }
            }
        )*
    };
}

impl_into_expr!(
    bool,
    i32,
    i64,
    f64,
    String,
    Vec<u8>,
    Vec<String>,
    serde_json::Value,
    Decimal,
    DateTime<Utc>
);

impl IntoExpr<String> for &str {
    fn into_expr(self) -> Expr<String> {
        Expr::from_value(self.into())
    }
}

impl IntoExpr<Option<String>> for &str {
    fn into_expr(self) -> Expr<Option<String>> {
        Expr::from_value(self.into())
    }
}
