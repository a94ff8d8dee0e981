mod column;
pub use column::{AutoTimestamp, Column};

mod relation;
pub use relation::{Relation, RelationKind};

mod table;
pub use table::Table;
