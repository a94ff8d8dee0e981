use super::Db;
use crate::{err, Result};

use rowmap_core::driver::operation::Transaction as TransactionOp;
use tokio::sync::Mutex;

use std::{ops::Deref, sync::Arc};

/// An open database transaction.
///
/// Dereferences to a [`Db`] whose operations all run on the transaction's
/// connection. Dropping the transaction without calling
/// [`commit`](Self::commit) or [`rollback`](Self::rollback) rolls it back.
pub struct Transaction {
    db: Db,
    done: bool,
}

impl Transaction {
    async fn exec(&self, op: TransactionOp) -> Result<()> {
        self.db.exec(op.into()).await?;
        Ok(())
    }

    pub async fn commit(mut self) -> Result<()> {
        self.done = true;
        self.exec(TransactionOp::Commit)
            .await
            .map_err(|e| e.context(err!("unable to commit transaction")))
    }

    pub async fn rollback(mut self) -> Result<()> {
        self.done = true;
        self.exec(TransactionOp::Rollback)
            .await
            .map_err(|e| e.context(err!("unable to roll back transaction")))
    }
}

impl Deref for Transaction {
    type Target = Db;

    fn deref(&self) -> &Self::Target {
        &self.db
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if self.done {
            return;
        }

        let Some(conn) = self.db.conn.take() else {
            return;
        };

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("transaction dropped outside of a runtime; connection discarded");
            return;
        };

        tracing::warn!("transaction dropped without commit or rollback; rolling back");

        handle.spawn(async move {
            let mut conn = conn.lock().await;
            if let Err(err) = conn.exec(TransactionOp::Rollback.into()).await {
                tracing::error!(%err, "rollback of dropped transaction failed");
            }
        });
    }
}

impl Db {
    /// Starts a transaction on a dedicated connection.
    ///
    /// Nested transactions are not supported.
    pub async fn transaction(&self) -> Result<Transaction> {
        if self.conn.is_some() {
            return Err(err!("nested transactions are not supported"));
        }

        let conn = self.shared.pool.get().await?;

        let mut tx = Transaction {
            db: Db {
                shared: self.shared.clone(),
                conn: Some(Arc::new(Mutex::new(conn))),
                scope: self.scope,
            },
            done: false,
        };

        if let Err(err) = tx.exec(TransactionOp::Start).await {
            tx.done = true;
            return Err(err.context(err!("unable to begin transaction")));
        }

        Ok(tx)
    }
}
