/// The storage type of a column, independent of nullability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    I32,
    I64,
    F64,
    String,
    Bytes,
    Json,
    Decimal,
    Timestamp,

    /// A list of strings. PostgreSQL stores it as `text[]`, SQLite as JSON
    /// text.
    StringArray,
}

impl Type {
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self, Self::Timestamp)
    }
}
