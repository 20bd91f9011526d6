//! Question-to-SQL synthesis.
//!
//! Wraps an LLM client with the fixed instruction text. The reply is treated
//! as an already-formed SQL statement: surrounding whitespace is trimmed and
//! nothing else is touched. Stray prose or code fences reach the store as-is
//! and come back as a syntax failure.

use tracing::info;

use crate::db::Table;
use crate::error::{QuillError, Result};
use crate::llm::{build_instructions, LlmClient, SqlPrompt};

/// Turns natural-language questions into SQL strings.
pub struct QuerySynthesizer {
    client: Box<dyn LlmClient>,
    instructions: String,
}

impl QuerySynthesizer {
    /// Creates a synthesizer using the instruction text for `table`.
    pub fn new(client: Box<dyn LlmClient>, table: &Table) -> Self {
        Self::with_instructions(client, build_instructions(table))
    }

    /// Creates a synthesizer with explicit instruction text.
    pub fn with_instructions(client: Box<dyn LlmClient>, instructions: impl Into<String>) -> Self {
        Self {
            client,
            instructions: instructions.into(),
        }
    }

    /// Returns the instruction text sent with every question.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Asks the model for the SQL answering `question`.
    pub async fn synthesize(&self, question: &str) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(QuillError::config("Question must not be empty"));
        }

        let prompt = SqlPrompt::new(self.instructions.as_str(), question);
        let reply = self.client.complete(&prompt).await?;
        let sql = reply.trim().to_string();

        info!("Generated SQL for {:?}: {}", question, sql);
        Ok(sql)
    }
}
