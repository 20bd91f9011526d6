//! Prompt construction for LLM requests.
//!
//! The instruction text is fixed: it describes the `STUDENT` table, the output
//! rules, and a set of worked examples. Only the question varies per request.

use crate::db::Table;

/// Instruction template; `{schema}` is replaced with the table description.
const INSTRUCTION_TEMPLATE: &str = r#"You are an expert in converting English questions into SQL queries.
{schema}
Your task is to generate only the SQL query, without any explanations.

RULES:
1. Do not wrap the output in ``` code fences.
2. Do not include the word SQL in the output.
3. Output only the pure SQL query.

EXAMPLES:
{examples}
Now, given the following question, generate a SQL query without explanations, without code fences, and without the word SQL in the output."#;

/// Worked question/answer pairs shown to the model.
const EXAMPLES: &[(&str, &str)] = &[
    (
        "How many students are in the database?",
        "SELECT COUNT(*) FROM STUDENT;",
    ),
    (
        "List students who have scored more than 80 marks.",
        "SELECT NAME FROM STUDENT WHERE MARKS > 80;",
    ),
    (
        "Show all students whose names contain the letter 'a'.",
        "SELECT * FROM STUDENT WHERE NAME LIKE '%a%';",
    ),
    (
        "Retrieve the top 3 students with the highest marks.",
        "SELECT NAME, MARKS FROM STUDENT ORDER BY MARKS DESC LIMIT 3;",
    ),
    (
        "Find students who have the same marks.",
        "SELECT MARKS, COUNT(*) FROM STUDENT GROUP BY MARKS HAVING COUNT(*) > 1;",
    ),
    (
        "Retrieve students from Class 10.",
        "SELECT * FROM STUDENT WHERE CLASS = '10';",
    ),
    (
        "Find students in Section B.",
        "SELECT * FROM STUDENT WHERE SECTION = 'B';",
    ),
    (
        "Get the student with the lowest marks.",
        "SELECT NAME, MARKS FROM STUDENT ORDER BY MARKS ASC LIMIT 1;",
    ),
    (
        "Retrieve students who scored exactly 75 marks.",
        "SELECT * FROM STUDENT WHERE MARKS = 75;",
    ),
    (
        "Count students who scored below 50.",
        "SELECT COUNT(*) FROM STUDENT WHERE MARKS < 50;",
    ),
    (
        "Retrieve students whose names end with 'n'.",
        "SELECT * FROM STUDENT WHERE NAME LIKE '%n';",
    ),
    (
        "Show students ordered by their names alphabetically.",
        "SELECT * FROM STUDENT ORDER BY NAME ASC;",
    ),
    (
        "Find the second highest marks in the database.",
        "SELECT DISTINCT MARKS FROM STUDENT ORDER BY MARKS DESC LIMIT 1 OFFSET 1;",
    ),
    (
        "Show all students except those in Class 12.",
        "SELECT * FROM STUDENT WHERE CLASS <> '12';",
    ),
    (
        "Retrieve students with marks between 60 and 90.",
        "SELECT * FROM STUDENT WHERE MARKS BETWEEN 60 AND 90;",
    ),
    (
        "Get students who have names with exactly 5 letters.",
        "SELECT * FROM STUDENT WHERE LENGTH(NAME) = 5;",
    ),
    (
        "Find students whose names contain either 'a' or 'e'.",
        "SELECT * FROM STUDENT WHERE NAME LIKE '%a%' OR NAME LIKE '%e%';",
    ),
    (
        "List students along with their class and section.",
        "SELECT NAME, CLASS, SECTION FROM STUDENT;",
    ),
    (
        "Find the total number of students in each section.",
        "SELECT SECTION, COUNT(*) FROM STUDENT GROUP BY SECTION;",
    ),
];

/// Builds the fixed instruction text for the given table.
pub fn build_instructions(table: &Table) -> String {
    let examples = EXAMPLES
        .iter()
        .map(|(question, answer)| format!("Q: {question}\nA: {answer}\n"))
        .collect::<Vec<_>>()
        .join("\n");

    INSTRUCTION_TEMPLATE
        .replace("{schema}", &table.format_for_llm())
        .replace("{examples}", &examples)
}
