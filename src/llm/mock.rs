//! Mock LLM client for testing.
//!
//! Provides deterministic SQL for common questions about the `STUDENT` table.

use async_trait::async_trait;

use crate::error::{QuillError, Result};
use crate::llm::{LlmClient, SqlPrompt};

/// Mock LLM client that returns canned responses based on input patterns.
///
/// Used for tests and offline demos without making real API calls.
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    /// Custom response mappings (pattern -> response).
    custom_responses: Vec<(String, String)>,
    /// When set, every call fails with this message.
    failure: Option<String>,
}

impl MockLlmClient {
    /// Creates a new mock client with default responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a custom response mapping.
    ///
    /// When the question contains `pattern`, the mock will return `response`.
    /// Custom mappings are checked before the built-in ones.
    pub fn with_response(
        mut self,
        pattern: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.custom_responses
            .push((pattern.into(), response.into()));
        self
    }

    /// Makes every call fail with an LLM error.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Generates a mock response based on the question.
    fn mock_response(&self, input: &str) -> String {
        let input_lower = input.to_lowercase();

        for (pattern, response) in &self.custom_responses {
            if input_lower.contains(&pattern.to_lowercase()) {
                return response.clone();
            }
        }

        if input_lower.contains("how many") || input_lower.contains("count") {
            return "SELECT COUNT(*) FROM STUDENT;".to_string();
        }

        if input_lower.contains("top") || input_lower.contains("highest") {
            return "SELECT NAME, MARKS FROM STUDENT ORDER BY MARKS DESC LIMIT 3;".to_string();
        }

        if input_lower.contains("section b") {
            return "SELECT * FROM STUDENT WHERE SECTION = 'B';".to_string();
        }

        if input_lower.contains("million") {
            return "SELECT * FROM STUDENT WHERE MARKS > 1000000;".to_string();
        }

        if input_lower.contains("all students") || input_lower.contains("everyone") {
            return "SELECT * FROM STUDENT;".to_string();
        }

        "I don't understand that question. Could you please rephrase it?".to_string()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, prompt: &SqlPrompt) -> Result<String> {
        if let Some(message) = &self.failure {
            return Err(QuillError::llm(message.clone()));
        }

        Ok(self.mock_response(&prompt.question))
    }
}
