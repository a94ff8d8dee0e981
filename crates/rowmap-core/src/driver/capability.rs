#[derive(Debug)]
pub struct Capability {
    /// SQL flavor spoken by the database
    pub dialect: Dialect,

    /// Supports `RETURNING` on INSERT / UPDATE / DELETE
    pub returning_from_mutation: bool,

    /// Supports `INSERT .. ON CONFLICT`
    pub on_conflict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Postgresql,
    Sqlite,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        dialect: Dialect::Sqlite,
        returning_from_mutation: true,
        on_conflict: true,
    };

    /// PostgreSQL capabilities
    pub const POSTGRESQL: Self = Self {
        dialect: Dialect::Postgresql,
        ..Self::SQLITE
    };
}
