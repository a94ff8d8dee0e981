use super::Serializer;

use rowmap_core::driver::Dialect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flavor {
    Postgresql,
    Sqlite,
}

impl From<Dialect> for Flavor {
    fn from(value: Dialect) -> Self {
        match value {
            Dialect::Postgresql => Flavor::Postgresql,
            Dialect::Sqlite => Flavor::Sqlite,
        }
    }
}

impl Serializer {
    pub fn sqlite() -> Serializer {
        Serializer {
            flavor: Flavor::Sqlite,
        }
    }

    pub fn postgresql() -> Serializer {
        Serializer {
            flavor: Flavor::Postgresql,
        }
    }

    pub(super) fn is_sqlite(&self) -> bool {
        self.flavor == Flavor::Sqlite
    }
}
