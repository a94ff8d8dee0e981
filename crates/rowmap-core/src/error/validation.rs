use super::Error;

/// Error when the caller asks for an operation the table cannot satisfy.
#[derive(Debug)]
pub(super) struct ValidationError {
    pub(super) kind: ValidationErrorKind,
}

#[derive(Debug)]
pub(super) enum ValidationErrorKind {
    /// The column-selection policy produced nothing to write
    EmptyColumnList { op: &'static str, table: &'static str },

    /// A primary key lookup was given the wrong number of values
    IncompleteKey {
        table: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A column name does not belong to the table
    UnknownColumn { table: &'static str, column: Box<str> },
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.kind {
            ValidationErrorKind::EmptyColumnList { op, table } => {
                write!(f, "unable to {op} {table}, could not build column list")
            }
            ValidationErrorKind::IncompleteKey {
                table,
                expected,
                actual,
            } => write!(
                f,
                "primary key of {table} has {expected} column(s), {actual} value(s) given"
            ),
            ValidationErrorKind::UnknownColumn { table, column } => {
                write!(f, "column {column:?} does not exist on {table}")
            }
        }
    }
}

impl Error {
    pub fn validation_empty_columns(op: &'static str, table: &'static str) -> Error {
        Error::validation(ValidationErrorKind::EmptyColumnList { op, table })
    }

    pub fn validation_incomplete_key(table: &'static str, expected: usize, actual: usize) -> Error {
        Error::validation(ValidationErrorKind::IncompleteKey {
            table,
            expected,
            actual,
        })
    }

    pub fn validation_unknown_column(table: &'static str, column: impl Into<String>) -> Error {
        Error::validation(ValidationErrorKind::UnknownColumn {
            table,
            column: column.into().into(),
        })
    }

    fn validation(kind: ValidationErrorKind) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError { kind }))
    }

    pub fn is_validation(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Validation(_)))
    }
}
