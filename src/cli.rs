//! Command-line argument parsing for Quill.

use clap::Parser;
use quill_sql::config::Config;
use quill_sql::error::{QuillError, Result};
use quill_sql::llm::LlmProvider;
use quill_sql::output::OutputFormat;
use std::path::PathBuf;

/// Ask a SQLite database questions in plain English.
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Question to answer. Without one, questions are read from stdin, one per line.
    #[arg(value_name = "QUESTION")]
    pub question: Option<String>,

    /// Execute this SQL directly instead of generating it
    #[arg(long, value_name = "SQL", conflicts_with = "question")]
    pub sql: Option<String>,

    /// SQLite database file (created if missing)
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// LLM provider to use: gemini or mock
    #[arg(long, value_name = "PROVIDER")]
    pub llm: Option<String>,

    /// Model name for the LLM provider
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Create the STUDENT table with demo rows if it is empty
    #[arg(long)]
    pub seed: bool,

    /// Output format: table, json, or csv
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    pub output: String,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Do not print the generated SQL
    #[arg(long)]
    pub hide_sql: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Parses the output format from the --output argument.
    pub fn parse_output_format(&self) -> Result<OutputFormat> {
        self.output.parse().map_err(QuillError::config)
    }

    /// Applies command-line overrides on top of file and environment config.
    pub fn apply_to(&self, config: &mut Config) -> Result<()> {
        if let Some(db) = &self.db {
            config.database = db.clone();
        }
        if let Some(llm) = &self.llm {
            llm.parse::<LlmProvider>().map_err(QuillError::config)?;
            config.llm.set_provider(llm);
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        Ok(())
    }

    /// Returns true when the only requested work is seeding.
    pub fn is_seed_only(&self) -> bool {
        self.seed && self.question.is_none() && self.sql.is_none()
    }

    /// Returns true when SQL is generated, so an LLM client is needed.
    pub fn needs_llm(&self) -> bool {
        self.sql.is_none() && !self.is_seed_only()
    }
}
