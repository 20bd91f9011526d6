//! Question-to-output tests using the mock LLM and a real SQLite file.

use pretty_assertions::assert_eq;
use quill_sql::app::App;
use quill_sql::db::{SqliteClient, Table, Value};
use quill_sql::llm::MockLlmClient;
use quill_sql::output::{OutputFormat, OutputFormatter, NO_DATA_MESSAGE};
use quill_sql::query::{ExecutionOutcome, QuerySynthesizer};
use tempfile::TempDir;

async fn seeded_app(llm: MockLlmClient, format: OutputFormat) -> (TempDir, App) {
    let dir = tempfile::tempdir().unwrap();
    let db = SqliteClient::new(dir.path().join("student.db"));
    db.seed_demo_data().await.unwrap();

    let app = App::new(Box::new(db), OutputFormatter::new(format, false))
        .with_synthesizer(QuerySynthesizer::new(Box::new(llm), &Table::student()));
    (dir, app)
}

#[tokio::test]
async fn test_question_to_count() {
    let (_dir, app) = seeded_app(MockLlmClient::new(), OutputFormat::Table).await;

    let answer = app.ask("How many students are there?").await.unwrap();

    assert_eq!(answer.sql, "SELECT COUNT(*) FROM STUDENT;");
    let result = answer.outcome.result_set().unwrap();
    assert_eq!(result.rows, vec![vec![Value::Int(6)]]);
}

#[tokio::test]
async fn test_section_question_renders_table() {
    let (_dir, app) = seeded_app(MockLlmClient::new(), OutputFormat::Table).await;
    let mut out = Vec::new();

    let ok = app
        .handle_question("Show students in section B", &mut out)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(ok);
    assert!(text.contains("SELECT * FROM STUDENT WHERE SECTION = 'B';"));
    assert!(text.contains("│ NAME  │ CLASS        │ SECTION │ MARKS │"));
    assert!(text.contains("│ Ravi  │ Data Science │ B       │ 64    │"));
    assert!(text.contains("(3 rows, "));
}

#[tokio::test]
async fn test_impossible_filter_reports_no_data() {
    let (_dir, app) = seeded_app(MockLlmClient::new(), OutputFormat::Table)
        .await;
    let app = app.with_show_sql(false);
    let mut out = Vec::new();

    let ok = app
        .handle_question("Who scored over a million?", &mut out)
        .await
        .unwrap();

    assert!(ok);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("{NO_DATA_MESSAGE}\n")
    );
}

#[tokio::test]
async fn test_fenced_reply_is_executed_verbatim_and_fails() {
    let fenced = "```sql\nSELECT COUNT(*) FROM STUDENT;\n```";
    let llm = MockLlmClient::new().with_response("fenced", fenced);
    let (_dir, app) = seeded_app(llm, OutputFormat::Table).await;

    let answer = app.ask("give me a fenced answer").await.unwrap();

    assert_eq!(answer.sql, fenced);
    assert!(matches!(answer.outcome, ExecutionOutcome::Failure(_)));
}

#[tokio::test]
async fn test_non_sql_reply_fails_in_store() {
    let (_dir, app) = seeded_app(MockLlmClient::new(), OutputFormat::Table).await;
    let mut out = Vec::new();

    let ok = app
        .handle_question("What is the meaning of life?", &mut out)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(!ok);
    assert!(text.contains("SQL Error: "));
}

#[tokio::test]
async fn test_json_output_for_rows() {
    let (_dir, app) = seeded_app(MockLlmClient::new(), OutputFormat::Json).await;
    let app = app.with_show_sql(false);
    let mut out = Vec::new();

    app.handle_question("Who has the highest marks?", &mut out)
        .await
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(parsed["status"], "rows");
    assert_eq!(parsed["headers"], serde_json::json!(["NAME", "MARKS"]));
    assert_eq!(parsed["rows"][0], serde_json::json!(["Asha", 91]));
}

#[tokio::test]
async fn test_csv_output_for_rows() {
    let (_dir, app) = seeded_app(MockLlmClient::new(), OutputFormat::Csv).await;
    let app = app.with_show_sql(false);
    let mut out = Vec::new();

    app.handle_question("top students", &mut out).await.unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "NAME,MARKS\nAsha,91\nSana,88\nMeera,78\n\n"
    );
}

#[tokio::test]
async fn test_llm_failure_leaves_database_untouched() {
    let (_dir, app) = seeded_app(
        MockLlmClient::new().failing("model unavailable"),
        OutputFormat::Table,
    )
    .await;
    let mut out = Vec::new();

    let ok = app.handle_question("How many?", &mut out).await.unwrap();
    assert!(!ok);

    let outcome = app.run_sql("SELECT COUNT(*) FROM STUDENT;").await;
    assert_eq!(outcome.result_set().unwrap().rows, vec![vec![Value::Int(6)]]);
}
