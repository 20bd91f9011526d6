//! Database layer for Quill.
//!
//! Provides a trait-based interface over the store so the executor can be
//! exercised against a real SQLite file or an in-memory mock.

mod mock;
pub mod schema;
mod sqlite;
mod statement;
mod types;

pub use mock::MockDatabaseClient;
pub use schema::{StudentRecord, Table, DEMO_STUDENTS};
pub use sqlite::SqliteClient;
pub use types::{ColumnInfo, ResultSet, Row, Value};

use crate::error::Result;
use async_trait::async_trait;

/// Trait defining the interface for database clients.
///
/// Implementations own no live connection between calls: each
/// `execute_query` acquires and releases whatever it needs.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Executes one SQL statement and returns every row it produces.
    ///
    /// Store faults are returned as `QuillError::Store` with the store's
    /// diagnostic text.
    async fn execute_query(&self, sql: &str) -> Result<ResultSet>;

    /// Returns a display string naming the database (for logs and headers).
    fn location(&self) -> String;
}
