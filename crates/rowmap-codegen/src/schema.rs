mod auto;
pub(crate) use auto::Auto;

mod belongs_to;
pub(crate) use belongs_to::BelongsTo;

mod column;
pub(crate) use column::{Column, ColumnAttr};

mod error;
pub(crate) use error::ErrorSet;

mod field;
pub(crate) use field::{Field, FieldTy};

mod has_many;
pub(crate) use has_many::HasMany;

mod model;
pub(crate) use model::Model;

mod model_attr;
pub(crate) use model_attr::ModelAttr;

mod relation;
pub(crate) use relation::{relation_target, RelationAttr};
