//! Mock database client for testing.
//!
//! Returns scripted results without touching the filesystem.

use super::{DatabaseClient, ResultSet};
use crate::error::{QuillError, Result};
use async_trait::async_trait;
use std::sync::Mutex;

/// A mock database client that replays predefined results.
///
/// Each call pops the next scripted response; once the script runs out every
/// call returns an empty result set. Executed statements are recorded.
#[derive(Debug, Default)]
pub struct MockDatabaseClient {
    responses: Mutex<Vec<std::result::Result<ResultSet, String>>>,
    executed: Mutex<Vec<String>>,
}

impl MockDatabaseClient {
    /// Creates a new mock client with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful result.
    pub fn with_result(self, result: ResultSet) -> Self {
        self.push(Ok(result));
        self
    }

    /// Queues a store failure with the given message.
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()));
        self
    }

    /// Returns the statements executed so far, oldest first.
    pub fn executed(&self) -> Vec<String> {
        self.executed
            .lock()
            .map(|executed| executed.clone())
            .unwrap_or_default()
    }

    fn push(&self, response: std::result::Result<ResultSet, String>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(0, response);
        }
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn execute_query(&self, sql: &str) -> Result<ResultSet> {
        self.executed
            .lock()
            .map_err(|_| QuillError::internal("mock database lock poisoned"))?
            .push(sql.to_string());

        let next = self
            .responses
            .lock()
            .map_err(|_| QuillError::internal("mock database lock poisoned"))?
            .pop();

        match next {
            Some(Ok(result)) => Ok(result),
            Some(Err(message)) => Err(QuillError::store(message)),
            None => Ok(ResultSet::new()),
        }
    }

    fn location(&self) -> String {
        "mock".to_string()
    }
}
