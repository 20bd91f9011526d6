//! Quill - ask a SQLite database questions in plain English.

mod cli;
mod logging;

use std::io::{self, IsTerminal, Write};

use cli::Cli;
use quill_sql::app::App;
use quill_sql::config::Config;
use quill_sql::db::{SqliteClient, Table};
use quill_sql::error::{QuillError, Result};
use quill_sql::llm::create_client;
use quill_sql::output::OutputFormatter;
use quill_sql::query::QuerySynthesizer;
use tracing::{error, info};

fn main() {
    // Credentials may live in a .env file next to the database.
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();

    match &cli.log_file {
        Some(path) => logging::init_file_logging(path),
        None => logging::init_stderr_logging(),
    }

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{}: {}", e.category(), e);
            eprintln!("{}: {}", e.category(), e.message());
            std::process::exit(1);
        }
    }
}

/// Runs one invocation and reports whether the final request succeeded.
fn run(cli: Cli) -> Result<bool> {
    // Precedence: CLI arguments, then environment, then config file.
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    cli.apply_to(&mut config)?;

    let format = cli.parse_output_format()?;
    let color =
        !cli.no_color && std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| QuillError::internal(format!("Failed to start runtime: {e}")))?;

    runtime.block_on(dispatch(cli, config, OutputFormatter::new(format, color)))
}

async fn dispatch(cli: Cli, config: Config, formatter: OutputFormatter) -> Result<bool> {
    let db = SqliteClient::new(&config.database);
    info!("Database: {}", db.path().display());

    if cli.seed {
        let inserted = db.seed_demo_data().await?;
        info!("Inserted {} demo rows", inserted);
        if cli.is_seed_only() {
            println!(
                "Inserted {} demo rows into STUDENT in {}",
                inserted,
                db.path().display()
            );
            return Ok(true);
        }
    }

    let mut app = App::new(Box::new(db), formatter)
        .with_show_sql(!cli.hide_sql)
        .with_prompt(io::stdin().is_terminal());

    if cli.needs_llm() {
        let provider = config.llm.provider()?;
        let model = config.llm.model()?;
        let api_key = provider
            .api_key_env()
            .and_then(|var| std::env::var(var).ok());

        info!("LLM: {} ({})", provider, model);
        let client = create_client(provider, api_key, &model, config.llm.timeout_secs)?;
        app = app.with_synthesizer(QuerySynthesizer::new(client, &Table::student()));
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let ok = if let Some(sql) = &cli.sql {
        app.handle_sql(sql, &mut out).await?
    } else if let Some(question) = &cli.question {
        app.handle_question(question, &mut out).await?
    } else {
        let stdin = io::stdin();
        app.run_interactive(stdin.lock(), &mut out).await?
    };

    out.flush()?;
    Ok(ok)
}
