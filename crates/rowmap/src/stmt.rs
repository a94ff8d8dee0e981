mod assignments;
pub use assignments::Assignments;

mod expr;
pub use expr::Expr;

mod filter;
pub use filter::Filter;

mod into_expr;
pub use into_expr::IntoExpr;

mod path;
pub use path::Path;

mod primitive;
pub use primitive::Primitive;

mod select;
pub use select::Select;

pub use rowmap_core::stmt::{Direction, OrderBy, Type, Value, ValueRecord};
