//! End-to-end tests of the `quill` binary.

use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

/// Runs `quill` inside `dir` with an isolated config and environment.
fn quill(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_quill"))
        .current_dir(dir)
        .arg("--config")
        .arg(dir.join("config.toml"))
        .arg("--db")
        .arg(dir.join("student.db"))
        .args(args)
        .env_remove("QUILL_DATABASE")
        .env_remove("QUILL_LLM_PROVIDER")
        .env_remove("QUILL_LLM_MODEL")
        .env_remove("GOOGLE_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run quill")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_seed_only() {
    let dir = tempfile::tempdir().unwrap();

    let output = quill(dir.path(), &["--seed"]);

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Inserted 6 demo rows into STUDENT"));

    // Seeding an already populated table inserts nothing.
    let output = quill(dir.path(), &["--seed"]);
    assert!(stdout(&output).starts_with("Inserted 0 demo rows"));
}

#[test]
fn test_question_with_mock_provider() {
    let dir = tempfile::tempdir().unwrap();

    let output = quill(
        dir.path(),
        &["--seed", "--llm", "mock", "--no-color", "How many students are there?"],
    );
    let text = stdout(&output);

    assert!(output.status.success());
    assert!(text.starts_with("Generated SQL:\n  SELECT COUNT(*) FROM STUDENT;\n"));
    assert!(text.contains("│ COUNT(*) │"));
    assert!(text.contains("│ 6        │"));
}

#[test]
fn test_direct_sql_failure_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();

    let output = quill(dir.path(), &["--seed", "--no-color", "--sql", "SELECT FRM STUDENT"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("SQL Error: "));
}

#[test]
fn test_no_data_exits_zero() {
    let dir = tempfile::tempdir().unwrap();

    let output = quill(
        dir.path(),
        &[
            "--seed",
            "--no-color",
            "--sql",
            "SELECT * FROM STUDENT WHERE MARKS > 1000000;",
        ],
    );

    assert!(output.status.success());
    assert_eq!(stdout(&output), "No data found for the given query.\n");
}

#[test]
fn test_missing_api_key_is_reported() {
    let dir = tempfile::tempdir().unwrap();

    let output = quill(dir.path(), &["--llm", "gemini", "How many students?"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("GOOGLE_API_KEY"));
}

#[test]
fn test_interactive_questions_from_stdin() {
    use std::io::Write;
    use std::process::Stdio;

    let dir = tempfile::tempdir().unwrap();
    assert!(quill(dir.path(), &["--seed"]).status.success());

    let mut child = Command::new(env!("CARGO_BIN_EXE_quill"))
        .current_dir(dir.path())
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .arg("--db")
        .arg(dir.path().join("student.db"))
        .args(["--llm", "mock", "--no-color", "--hide-sql", "--output", "csv"])
        .env_remove("QUILL_LLM_PROVIDER")
        .env_remove("QUILL_LLM_MODEL")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to run quill");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"how many students?\nquit\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "COUNT(*)\n6\n\n\n");
}
