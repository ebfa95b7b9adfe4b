//! Delimited-text parser
//!
//! Parses the comma-delimited catalog export: fields may be wrapped in
//! double quotes, a doubled quote inside a quoted field is an escaped
//! quote, and quoted fields may contain embedded newlines.

/// Parse a delimited payload into rows of cell strings.
///
/// Rows have arbitrary width; blank lines between records are skipped.
pub fn parse_delimited(input: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // doubled quote is an escaped quote
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else {
            match ch {
                '"' => in_quotes = true,
                ',' => {
                    row.push(std::mem::take(&mut field));
                }
                '\r' => {}
                '\n' => {
                    if row.is_empty() && field.trim().is_empty() {
                        // blank line, not a record
                        field.clear();
                    } else {
                        row.push(std::mem::take(&mut field));
                        rows.push(std::mem::take(&mut row));
                    }
                }
                _ => field.push(ch),
            }
        }
    }

    // final record without a trailing newline
    if !row.is_empty() || !field.trim().is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
