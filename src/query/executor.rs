//! Query execution at the store boundary.
//!
//! Runs an untrusted SQL string and turns whatever happens into an
//! `ExecutionOutcome`. No error crosses this boundary.

use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::db::{DatabaseClient, ResultSet};
use crate::error::QuillError;

/// Tagged result of one execution attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "lowercase")]
pub enum ExecutionOutcome {
    /// The statement ran and every row was fetched.
    Success(ResultSet),
    /// The store rejected the statement; carries its diagnostic verbatim.
    Failure(String),
}

impl ExecutionOutcome {
    /// Returns true for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the result set, if any.
    pub fn result_set(&self) -> Option<&ResultSet> {
        match self {
            Self::Success(result) => Some(result),
            Self::Failure(_) => None,
        }
    }

    /// Returns the failure message, if any.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }
}

/// Executes SQL strings against a database client.
///
/// The executor does not inspect the statement: reads, writes, and DDL are all
/// passed through. Generated SQL is untrusted and cannot be parameterized, so
/// whatever the model produced is what runs.
pub struct QueryExecutor<'a> {
    db: &'a dyn DatabaseClient,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new query executor.
    pub fn new(db: &'a dyn DatabaseClient) -> Self {
        Self { db }
    }

    /// Runs one statement and reports the outcome.
    pub async fn execute(&self, sql: &str) -> ExecutionOutcome {
        let start = Instant::now();
        let result = self.db.execute_query(sql).await;
        let elapsed = start.elapsed();

        match result {
            Ok(result_set) => {
                info!(
                    rows = result_set.row_count(),
                    columns = result_set.columns.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Query succeeded on {}",
                    self.db.location()
                );
                ExecutionOutcome::Success(result_set)
            }
            Err(QuillError::Store(message)) => {
                warn!("Query failed on {}: {}", self.db.location(), message);
                ExecutionOutcome::Failure(message)
            }
            Err(other) => {
                warn!("Query failed on {}: {}", self.db.location(), other);
                ExecutionOutcome::Failure(other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ColumnInfo, MockDatabaseClient, Value};

    #[tokio::test]
    async fn test_execute_success() {
        let mock_db = MockDatabaseClient::new().with_result(ResultSet::with_data(
            vec![ColumnInfo::new("COUNT(*)", "INTEGER")],
            vec![vec![Value::Int(4)]],
        ));
        let executor = QueryExecutor::new(&mock_db);

        let outcome = executor.execute("SELECT COUNT(*) FROM STUDENT;").await;

        assert!(outcome.is_success());
        let result = outcome.result_set().unwrap();
        assert_eq!(result.column_names(), vec!["COUNT(*)"]);
        assert_eq!(result.rows, vec![vec![Value::Int(4)]]);
        assert!(outcome.failure_message().is_none());
    }

    #[tokio::test]
    async fn test_store_error_becomes_failure_verbatim() {
        let mock_db = MockDatabaseClient::new().with_error("no such column: FRM");
        let executor = QueryExecutor::new(&mock_db);

        let outcome = executor.execute("SELECT FRM STUDENT").await;

        assert_eq!(
            outcome,
            ExecutionOutcome::Failure("no such column: FRM".to_string())
        );
        assert!(outcome.result_set().is_none());
    }

    #[tokio::test]
    async fn test_write_statements_pass_through() {
        let mock_db = MockDatabaseClient::new();
        let executor = QueryExecutor::new(&mock_db);

        let outcome = executor
            .execute("DELETE FROM STUDENT WHERE MARKS < 40")
            .await;

        assert!(outcome.is_success());
        assert_eq!(
            mock_db.executed(),
            vec!["DELETE FROM STUDENT WHERE MARKS < 40"]
        );
    }

    #[test]
    fn test_outcome_serialization() {
        let failure = ExecutionOutcome::Failure("boom".to_string());
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["result"], "boom");
    }
}
