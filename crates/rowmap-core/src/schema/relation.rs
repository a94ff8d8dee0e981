/// A foreign-key edge from one table to another.
#[derive(Debug)]
pub struct Relation {
    /// Name of the relation field on the row struct
    pub name: &'static str,

    pub kind: RelationKind,

    /// Column on this table.
    ///
    /// For `BelongsTo` this is the foreign key; for `HasMany` it is the
    /// referenced column (usually the primary key).
    pub key: usize,

    /// Column on the target table.
    pub references: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// Many-to-one: this row holds the foreign key
    BelongsTo,

    /// One-to-many: the target rows hold the foreign key
    HasMany,
}

impl Relation {
    pub fn is_belongs_to(&self) -> bool {
        matches!(self.kind, RelationKind::BelongsTo)
    }

    pub fn is_has_many(&self) -> bool {
        matches!(self.kind, RelationKind::HasMany)
    }
}
