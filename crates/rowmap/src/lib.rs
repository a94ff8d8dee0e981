mod cache;
pub use cache::StatementCache;

pub mod db;
pub use db::{Db, Transaction};

mod engine;
pub use engine::{Columns, Upsert};

pub mod hooks;
pub use hooks::{Hook, HookPoint, Hooks};

mod model;
pub use model::Model;

pub mod relation;
pub use relation::{BelongsTo, HasMany};

pub mod stmt;
pub use stmt::{Assignments, Filter, Path, Select};

pub use rowmap_core::{bail, driver, err, schema, Error, Result};

pub use rowmap_macros::Model;

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{
        relation::{BelongsTo, BelongsToDef, HasMany, HasManyDef},
        stmt::{IntoExpr, Path, Primitive},
        Db, Error, Filter, Model, Result, Select,
    };
    pub use rowmap_core::{
        schema::{AutoTimestamp, Column, Relation, RelationKind, Table},
        stmt::{Type, Value, ValueRecord},
    };
    pub use std::{default::Default, option::Option};
}
