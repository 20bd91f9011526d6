//! Statement boundaries.
//!
//! SQLite runs one statement per execution. `split_first` finds where the
//! first statement ends, ignoring semicolons inside string literals, quoted
//! identifiers, comments, and `CREATE TRIGGER` bodies.

/// Splits `sql` after its first statement.
///
/// The first slice keeps the terminating semicolon. When no statement
/// boundary is found (including unterminated literals, which SQLite itself
/// will reject) the whole input is the first statement.
pub fn split_first(sql: &str) -> (&str, &str) {
    let bytes = sql.as_bytes();
    let mut trigger = TriggerTracker::default();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' | b'`' => {
                i = skip_quoted(bytes, i + 1, bytes[i]);
                trigger.other_token();
            }
            b'[' => {
                i = skip_past(bytes, i + 1, b']');
                trigger.other_token();
            }
            b'-' if bytes.get(i + 1) == Some(&b'-') => i = skip_line_comment(bytes, i + 2),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(bytes, i + 2),
            b';' => {
                if trigger.semicolon_ends_statement() {
                    return sql.split_at(i + 1);
                }
                i += 1;
            }
            b if is_word_byte(b) => {
                let start = i;
                while i < bytes.len() && is_word_byte(bytes[i]) {
                    i += 1;
                }
                trigger.word(&sql[start..i]);
            }
            b if b.is_ascii_whitespace() => i += 1,
            _ => {
                trigger.other_token();
                i += 1;
            }
        }
    }

    (sql, "")
}

/// Returns true if `sql` holds only whitespace, comments, and semicolons.
pub fn is_blank(sql: &str) -> bool {
    let bytes = sql.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'-' if bytes.get(i + 1) == Some(&b'-') => i = skip_line_comment(bytes, i + 2),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(bytes, i + 2),
            b';' => i += 1,
            b if b.is_ascii_whitespace() => i += 1,
            _ => return false,
        }
    }

    true
}

/// Tracks whether the current statement is a trigger definition, whose body
/// holds semicolons up to the closing `END`.
#[derive(Default)]
struct TriggerTracker {
    leading: Vec<String>,
    in_trigger: bool,
    after_end: bool,
}

impl TriggerTracker {
    fn word(&mut self, word: &str) {
        if self.leading.len() < 3 {
            self.leading.push(word.to_ascii_uppercase());
            let lead: Vec<&str> = self.leading.iter().map(String::as_str).collect();
            self.in_trigger = matches!(
                lead.as_slice(),
                ["CREATE", "TRIGGER", ..] | ["CREATE", "TEMP" | "TEMPORARY", "TRIGGER"]
            );
        }
        self.after_end = word.eq_ignore_ascii_case("END");
    }

    fn other_token(&mut self) {
        self.after_end = false;
    }

    fn semicolon_ends_statement(&self) -> bool {
        !self.in_trigger || self.after_end
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

/// Skips a quoted run starting after the opening quote. A doubled quote is an
/// escaped quote.
fn skip_quoted(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    while i < bytes.len() {
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

fn skip_past(bytes: &[u8], from: usize, end: u8) -> usize {
    bytes[from.min(bytes.len())..]
        .iter()
        .position(|&b| b == end)
        .map_or(bytes.len(), |pos| from + pos + 1)
}

fn skip_line_comment(bytes: &[u8], from: usize) -> usize {
    skip_past(bytes, from, b'\n')
}

fn skip_block_comment(bytes: &[u8], mut i: usize) -> usize {
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return i + 2;
        }
        i += 1;
    }
    bytes.len()
}
