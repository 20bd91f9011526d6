//! Execution tests against a real SQLite file.

use pretty_assertions::assert_eq;
use quill_sql::db::{SqliteClient, Value, DEMO_STUDENTS};
use quill_sql::output::{OutputFormat, OutputFormatter, NO_DATA_MESSAGE};
use quill_sql::query::{ExecutionOutcome, QueryExecutor};
use tempfile::TempDir;

/// Creates a seeded database in a fresh temporary directory.
async fn seeded_client() -> (TempDir, SqliteClient) {
    let dir = tempfile::tempdir().unwrap();
    let client = SqliteClient::new(dir.path().join("student.db"));
    client.seed_demo_data().await.unwrap();
    (dir, client)
}

#[tokio::test]
async fn test_count_returns_single_cell() {
    let (_dir, client) = seeded_client().await;

    let outcome = QueryExecutor::new(&client)
        .execute("SELECT COUNT(*) FROM STUDENT;")
        .await;

    let result = outcome.result_set().expect("count should succeed");
    assert_eq!(result.column_names(), vec!["COUNT(*)"]);
    assert_eq!(
        result.rows,
        vec![vec![Value::Int(DEMO_STUDENTS.len() as i64)]]
    );
}

#[tokio::test]
async fn test_rows_keep_store_order_and_width() {
    let (_dir, client) = seeded_client().await;

    let outcome = QueryExecutor::new(&client)
        .execute("SELECT NAME, MARKS FROM STUDENT ORDER BY MARKS DESC LIMIT 3;")
        .await;

    let result = outcome.result_set().unwrap();
    assert_eq!(result.column_names(), vec!["NAME", "MARKS"]);
    let names: Vec<String> = result.rows.iter().map(|r| r[0].to_display_string()).collect();
    assert_eq!(names, vec!["Asha", "Sana", "Meera"]);
    for row in &result.rows {
        assert_eq!(row.len(), result.columns.len());
    }
}

#[tokio::test]
async fn test_no_matching_rows_is_success_and_renders_no_data() {
    let (_dir, client) = seeded_client().await;

    let outcome = QueryExecutor::new(&client)
        .execute("SELECT * FROM STUDENT WHERE MARKS > 1000000;")
        .await;

    assert!(outcome.is_success());
    let result = outcome.result_set().unwrap();
    assert!(result.rows.is_empty());
    assert_eq!(
        result.column_names(),
        vec!["NAME", "CLASS", "SECTION", "MARKS"]
    );

    let formatter = OutputFormatter::new(OutputFormat::Table, false);
    assert_eq!(formatter.format_outcome(&outcome).unwrap(), NO_DATA_MESSAGE);
}

#[tokio::test]
async fn test_syntax_error_is_failure_with_message() {
    let (_dir, client) = seeded_client().await;

    let outcome = QueryExecutor::new(&client)
        .execute("SELECT FRM STUDENT")
        .await;

    let message = outcome.failure_message().expect("should fail");
    assert!(!message.is_empty());

    let formatter = OutputFormatter::new(OutputFormat::Table, false);
    let rendered = formatter.format_outcome(&outcome).unwrap();
    assert_eq!(rendered, format!("SQL Error: {message}"));
}

#[tokio::test]
async fn test_failure_does_not_affect_next_execution() {
    let (_dir, client) = seeded_client().await;
    let executor = QueryExecutor::new(&client);

    let first = executor.execute("SELECT COUNT(*) FROM STUDENT;").await;
    let broken = executor.execute("SELEC nonsense").await;
    let second = executor.execute("SELECT COUNT(*) FROM STUDENT;").await;

    assert!(matches!(broken, ExecutionOutcome::Failure(_)));
    assert_eq!(
        first.result_set().unwrap().rows,
        second.result_set().unwrap().rows
    );
}

#[tokio::test]
async fn test_writes_persist_between_executions() {
    let (_dir, client) = seeded_client().await;
    let executor = QueryExecutor::new(&client);

    let insert = executor
        .execute("INSERT INTO STUDENT VALUES ('Zoya', '12', 'C', 99);")
        .await;
    assert!(insert.is_success());

    let outcome = executor
        .execute("SELECT NAME FROM STUDENT WHERE SECTION = 'C';")
        .await;
    assert_eq!(
        outcome.result_set().unwrap().rows,
        vec![vec![Value::String("Zoya".to_string())]]
    );
}

#[tokio::test]
async fn test_missing_database_file_is_created_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.db");
    let client = SqliteClient::new(&path);

    let outcome = QueryExecutor::new(&client)
        .execute("SELECT * FROM STUDENT;")
        .await;

    assert!(path.exists());
    assert_eq!(outcome.failure_message(), Some("no such table: STUDENT"));
}

#[tokio::test]
async fn test_empty_sql_is_success_without_rows() {
    let (_dir, client) = seeded_client().await;
    let executor = QueryExecutor::new(&client);
    let formatter = OutputFormatter::new(OutputFormat::Table, false);

    for sql in ["", "   \n\t", "-- nothing to run", "/* still nothing */ ;"] {
        let outcome = executor.execute(sql).await;
        let result = outcome.result_set().expect("blank SQL should succeed");
        assert!(result.columns.is_empty(), "columns for {sql:?}");
        assert!(result.rows.is_empty(), "rows for {sql:?}");
        assert_eq!(formatter.format_outcome(&outcome).unwrap(), NO_DATA_MESSAGE);
    }
}

#[tokio::test]
async fn test_second_statement_is_failure_and_not_run() {
    let (_dir, client) = seeded_client().await;
    let executor = QueryExecutor::new(&client);

    let outcome = executor
        .execute("DELETE FROM STUDENT; SELECT COUNT(*) FROM STUDENT;")
        .await;
    assert_eq!(
        outcome.failure_message(),
        Some("You can only execute one statement at a time.")
    );

    let count = executor.execute("SELECT COUNT(*) FROM STUDENT;").await;
    assert_eq!(
        count.result_set().unwrap().rows,
        vec![vec![Value::Int(DEMO_STUDENTS.len() as i64)]]
    );
}
