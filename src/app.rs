//! Request flow for Quill.
//!
//! One question produces one synthesis call followed by one execution, strictly
//! in sequence. `App` owns the pieces and writes rendered output to any
//! `Write`, so the same flow serves the one-shot CLI, the interactive loop,
//! and tests.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::db::DatabaseClient;
use crate::error::{QuillError, Result};
use crate::output::OutputFormatter;
use crate::query::{ExecutionOutcome, QueryExecutor, QuerySynthesizer};

/// Words that end the interactive loop.
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "\\q"];

/// Generated SQL together with what running it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    /// The SQL returned by the synthesizer, as executed.
    pub sql: String,
    /// The execution outcome.
    pub outcome: ExecutionOutcome,
}

/// The question-to-table pipeline.
pub struct App {
    db: Box<dyn DatabaseClient>,
    synthesizer: Option<QuerySynthesizer>,
    formatter: OutputFormatter,
    show_sql: bool,
    prompt: bool,
}

impl App {
    /// Creates an app that can execute SQL but not answer questions.
    pub fn new(db: Box<dyn DatabaseClient>, formatter: OutputFormatter) -> Self {
        Self {
            db,
            synthesizer: None,
            formatter,
            show_sql: true,
            prompt: false,
        }
    }

    /// Adds the synthesizer used for natural-language questions.
    pub fn with_synthesizer(mut self, synthesizer: QuerySynthesizer) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    /// Controls whether generated SQL is printed before the result.
    pub fn with_show_sql(mut self, show_sql: bool) -> Self {
        self.show_sql = show_sql;
        self
    }

    /// Controls whether the interactive loop prints a prompt.
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// Generates SQL for `question` and executes it.
    ///
    /// Fails only when no SQL could be generated; store failures are part of
    /// the returned answer.
    pub async fn ask(&self, question: &str) -> Result<Answer> {
        let synthesizer = self
            .synthesizer
            .as_ref()
            .ok_or_else(|| QuillError::internal("No LLM client configured"))?;

        let sql = synthesizer.synthesize(question).await?;
        let outcome = self.run_sql(&sql).await;
        Ok(Answer { sql, outcome })
    }

    /// Executes SQL directly.
    pub async fn run_sql(&self, sql: &str) -> ExecutionOutcome {
        QueryExecutor::new(self.db.as_ref()).execute(sql).await
    }

    /// Answers a question and writes the rendered result.
    ///
    /// Returns whether the query succeeded. Synthesis errors are rendered in
    /// the error style rather than returned; only output errors propagate.
    pub async fn handle_question<W: Write>(&self, question: &str, out: &mut W) -> Result<bool> {
        match self.ask(question).await {
            Ok(answer) => {
                if self.show_sql {
                    writeln!(out, "{}\n", self.formatter.format_sql(&answer.sql))?;
                }
                self.write_outcome(&answer.outcome, out)
            }
            Err(e) => {
                warn!("Could not generate SQL: {}", e);
                writeln!(out, "{}", self.formatter.format_error(e.category(), e.message()))?;
                Ok(false)
            }
        }
    }

    /// Executes SQL directly and writes the rendered result.
    pub async fn handle_sql<W: Write>(&self, sql: &str, out: &mut W) -> Result<bool> {
        let outcome = self.run_sql(sql).await;
        self.write_outcome(&outcome, out)
    }

    /// Reads questions line by line until EOF or an exit command.
    ///
    /// Each line is handled to completion before the next is read. Returns
    /// whether the last question succeeded.
    pub async fn run_interactive<R: BufRead, W: Write>(
        &self,
        mut input: R,
        out: &mut W,
    ) -> Result<bool> {
        let mut last_ok = true;
        let mut line = String::new();

        loop {
            if self.prompt {
                write!(out, "quill> ")?;
                out.flush()?;
            }

            line.clear();
            if input.read_line(&mut line)? == 0 {
                debug!("End of input");
                break;
            }

            let question = line.trim();
            if question.is_empty() {
                continue;
            }
            if EXIT_COMMANDS.contains(&question.to_lowercase().as_str()) {
                break;
            }

            last_ok = self.handle_question(question, out).await?;
            writeln!(out)?;
        }

        Ok(last_ok)
    }

    fn write_outcome<W: Write>(&self, outcome: &ExecutionOutcome, out: &mut W) -> Result<bool> {
        let rendered = self.formatter.format_outcome(outcome)?;
        if !rendered.is_empty() {
            writeln!(out, "{}", rendered)?;
        }
        Ok(outcome.is_success())
    }
}
