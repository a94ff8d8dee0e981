use std::{collections::HashMap, sync::Arc};

use tokio_postgres::{Client, Error, Statement};

/// Prepared statements of one connection, keyed by SQL text.
#[derive(Debug, Default)]
pub(crate) struct StatementCache {
    map: HashMap<Arc<str>, Statement>,
}

impl StatementCache {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn prepare(
        &mut self,
        client: &Client,
        query: &Arc<str>,
    ) -> Result<Statement, Error> {
        if let Some(statement) = self.map.get(query) {
            return Ok(statement.clone());
        }

        let statement = client.prepare(query).await?;
        self.map.insert(query.clone(), statement.clone());
        Ok(statement)
    }
}
