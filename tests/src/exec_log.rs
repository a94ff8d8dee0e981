use crate::logging_driver::DriverOp;
use rowmap_core::driver::{operation::Transaction, Operation, Response};
use std::sync::{Arc, Mutex};

/// Test-side view of the operations a [`LoggingDriver`](crate::LoggingDriver)
/// recorded.
#[derive(Clone)]
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }

    /// Remove and return the first operation from the log
    pub fn pop(&self) -> Option<(Operation, Option<Response>)> {
        let mut ops = self.ops.lock().unwrap();
        if ops.is_empty() {
            None
        } else {
            let op = ops.remove(0);
            Some((op.operation, op.response))
        }
    }

    /// SQL text of every logged statement, in execution order
    pub fn sql(&self) -> Vec<String> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter_map(|op| match &op.operation {
                Operation::QuerySql(query) => Some(query.sql.to_string()),
                Operation::Transaction(_) => None,
            })
            .collect()
    }

    /// Number of logged statements whose SQL starts with `prefix`
    pub fn count_sql(&self, prefix: &str) -> usize {
        self.sql().iter().filter(|sql| sql.starts_with(prefix)).count()
    }

    pub fn has_transaction(&self, op: Transaction) -> bool {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .any(|logged| matches!(logged.operation, Operation::Transaction(t) if t == op))
    }

    /// Escape hatch for assertions the helpers do not cover
    pub fn with_ops<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[DriverOp]) -> R,
    {
        let ops = self.ops.lock().unwrap();
        f(&ops)
    }
}
