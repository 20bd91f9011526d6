//! SQLite database client implementation.
//!
//! Provides the `SqliteClient` struct that implements the `DatabaseClient` trait
//! for a single SQLite file using sqlx. Every call opens its own connection and
//! closes it before returning; nothing is pooled or shared between calls.

use crate::db::schema::{Table, DEMO_STUDENTS};
use crate::db::statement;
use crate::db::{ColumnInfo, DatabaseClient, ResultSet, Row, Value};
use crate::error::{QuillError, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column as SqlxColumn, Connection, Executor, Row as SqlxRow, TypeInfo, ValueRef};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

/// SQLite client bound to one database file.
#[derive(Debug, Clone)]
pub struct SqliteClient {
    path: PathBuf,
}

impl SqliteClient {
    /// Creates a client for the database at `path`.
    ///
    /// Nothing is opened until a statement is executed. The file is created
    /// on first use if it does not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the database file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a fresh connection to the database file.
    async fn open(&self) -> Result<SqliteConnection> {
        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true);

        debug!("Opening SQLite connection to {}", self.path.display());
        SqliteConnection::connect_with(&options)
            .await
            .map_err(store_error)
    }

    /// Closes a connection, logging rather than failing if the close errors.
    async fn release(&self, conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            warn!(
                "Failed to close SQLite connection to {}: {}",
                self.path.display(),
                e
            );
        } else {
            debug!("Closed SQLite connection to {}", self.path.display());
        }
    }

    /// Creates the `STUDENT` table and fills it with demo rows.
    ///
    /// Rows are only inserted when the table is empty, so repeated seeding is
    /// harmless. Returns the number of rows inserted.
    pub async fn seed_demo_data(&self) -> Result<usize> {
        let mut conn = self.open().await?;
        let result = seed(&mut conn).await;
        self.release(conn).await;
        result
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn execute_query(&self, sql: &str) -> Result<ResultSet> {
        let mut conn = self.open().await?;
        let result = run_statement(&mut conn, sql).await;
        self.release(conn).await;
        result
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Message for input holding more than one statement.
const MULTIPLE_STATEMENTS: &str = "You can only execute one statement at a time.";

/// Runs one statement on an open connection and collects every row.
///
/// Input with anything but whitespace or comments after the first statement
/// is rejected before any of it runs. Input with no statement at all succeeds
/// with an empty result.
async fn run_statement(conn: &mut SqliteConnection, sql: &str) -> Result<ResultSet> {
    let (sql, rest) = statement::split_first(sql);
    if !statement::is_blank(rest) {
        return Err(QuillError::store(MULTIPLE_STATEMENTS));
    }
    if statement::is_blank(sql) {
        debug!("Nothing to execute");
        return Ok(ResultSet::new());
    }

    let start = Instant::now();

    let fetched: Vec<SqliteRow> = sqlx::query(sql)
        .fetch_all(&mut *conn)
        .await
        .map_err(store_error)?;

    let execution_time = start.elapsed();

    // Column metadata comes from the first row when there is one. An empty
    // result still has a shape, which the prepared statement can describe.
    // Statements without result columns (DDL, DML) describe as empty.
    let columns: Vec<ColumnInfo> = match fetched.first() {
        Some(first_row) => columns_of(first_row.columns()),
        None => match (&mut *conn).describe(sql).await {
            Ok(described) => columns_of(described.columns()),
            Err(e) => {
                debug!("No column metadata for empty result: {}", e);
                Vec::new()
            }
        },
    };

    let rows: Vec<Row> = fetched.iter().map(convert_row).collect();
    if let Some(row) = rows.iter().find(|row| row.len() != columns.len()) {
        return Err(QuillError::store(format!(
            "Row has {} values but the result has {} columns",
            row.len(),
            columns.len()
        )));
    }

    debug!(
        "Statement returned {} rows in {:?}",
        rows.len(),
        execution_time
    );

    Ok(ResultSet::with_data(columns, rows).with_execution_time(execution_time))
}

/// Creates the demo table and inserts rows if it has none.
async fn seed(conn: &mut SqliteConnection) -> Result<usize> {
    let table = Table::student();

    sqlx::query(&table.create_statement())
        .execute(&mut *conn)
        .await
        .map_err(store_error)?;

    let count_sql = format!("SELECT COUNT(*) FROM {}", table.name);
    let existing: i64 = sqlx::query_scalar(&count_sql)
        .fetch_one(&mut *conn)
        .await
        .map_err(store_error)?;

    if existing > 0 {
        debug!("{} already holds {} rows, not seeding", table.name, existing);
        return Ok(0);
    }

    let insert_sql = table.insert_statement();
    for student in DEMO_STUDENTS {
        sqlx::query(&insert_sql)
            .bind(student.name)
            .bind(student.class)
            .bind(student.section)
            .bind(student.marks)
            .execute(&mut *conn)
            .await
            .map_err(store_error)?;
    }

    Ok(DEMO_STUDENTS.len())
}

fn columns_of(columns: &[sqlx::sqlite::SqliteColumn]) -> Vec<ColumnInfo> {
    columns
        .iter()
        .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
        .collect()
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    (0..row.len()).map(|i| convert_value(row, i)).collect()
}

/// Converts a single value using the storage class it actually holds.
///
/// SQLite is dynamically typed, so the declared column type is only a hint;
/// the value's own type decides how it is decoded.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    let type_name = match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(raw) => raw.type_info().name().to_uppercase(),
        Err(_) => return Value::Null,
    };

    match type_name.as_str() {
        "INTEGER" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "REAL" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bytes)
            .unwrap_or(Value::Null),

        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}

/// Maps a sqlx error to a store error carrying SQLite's own diagnostic.
fn store_error(error: sqlx::Error) -> QuillError {
    match error.as_database_error() {
        Some(db_error) => QuillError::store(db_error.message()),
        None => QuillError::store(error.to_string()),
    }
}
