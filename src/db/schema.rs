//! The fixed table Quill answers questions about.
//!
//! There is no introspection: the `STUDENT` table is described here once and
//! shared by the prompt builder and the demo seeding code.

use std::fmt::Write;

/// A column of the fixed table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub data_type: &'static str,
}

/// A table with a fixed set of columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub columns: Vec<Column>,
}

/// One row of demo data for the `STUDENT` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentRecord {
    pub name: &'static str,
    pub class: &'static str,
    pub section: &'static str,
    pub marks: i64,
}

/// Rows inserted by `--seed`.
pub const DEMO_STUDENTS: &[StudentRecord] = &[
    StudentRecord {
        name: "Asha",
        class: "Data Science",
        section: "A",
        marks: 91,
    },
    StudentRecord {
        name: "Ravi",
        class: "Data Science",
        section: "B",
        marks: 64,
    },
    StudentRecord {
        name: "Meera",
        class: "DevOps",
        section: "A",
        marks: 78,
    },
    StudentRecord {
        name: "Karan",
        class: "DevOps",
        section: "B",
        marks: 35,
    },
    StudentRecord {
        name: "Nikhil",
        class: "10",
        section: "A",
        marks: 75,
    },
    StudentRecord {
        name: "Sana",
        class: "12",
        section: "B",
        marks: 88,
    },
];

impl Table {
    /// Returns the `STUDENT` table definition.
    pub fn student() -> Self {
        Self {
            name: "STUDENT",
            columns: vec![
                Column {
                    name: "NAME",
                    data_type: "VARCHAR(25)",
                },
                Column {
                    name: "CLASS",
                    data_type: "VARCHAR(25)",
                },
                Column {
                    name: "SECTION",
                    data_type: "VARCHAR(25)",
                },
                Column {
                    name: "MARKS",
                    data_type: "INT",
                },
            ],
        }
    }

    /// Formats the table for inclusion in an LLM prompt.
    ///
    /// Type names are shortened to their base name (`VARCHAR(25)` becomes
    /// `VARCHAR`), which is all the model needs.
    pub fn format_for_llm(&self) -> String {
        let mut output = format!(
            "The SQL database is named {} and contains the following columns:\n",
            self.name
        );
        for column in &self.columns {
            let base_type = column
                .data_type
                .split('(')
                .next()
                .unwrap_or(column.data_type);
            let _ = writeln!(output, "- {} ({})", column.name, base_type);
        }
        output
    }

    /// Returns the `CREATE TABLE IF NOT EXISTS` statement for this table.
    pub fn create_statement(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.data_type))
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE IF NOT EXISTS {} ({})", self.name, columns)
    }

    /// Returns a parameterized `INSERT` statement covering every column.
    pub fn insert_statement(&self) -> String {
        let names = self
            .columns
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; self.columns.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.name, names, placeholders
        )
    }
}
