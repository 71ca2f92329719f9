//! # Fixed-Width Table Renderer
//!
//! Renders a row sequence as a column-aligned text table in a single
//! forward pass.
//!
//! ## Output Format
//!
//! ```text
//! season            crop              plantings
//! ------------------------------------------------------
//! Summer            Maize             3
//! Summer            Sunflower         1
//! ```
//!
//! ## Width Policy
//!
//! Every column is a fixed 18 characters wide. Widths are NOT adapted to
//! content: a value longer than the column simply breaks alignment for
//! that row rather than being truncated. This keeps rendering a single
//! pass over a cursor that cannot be rewound, and makes the output for a
//! given result set byte-for-byte reproducible.
//!
//! ## Value Formatting
//!
//! - NULL prints as the literal `NULL`
//! - Reals print with trailing zeros trimmed (`3.50` → `3.5`, `3.0` → `3`)
//! - Text prints as-is
//! - Blobs print as a hex preview with a length limit
//!
//! A sequence that yields zero rows renders exactly the sentinel line
//! `(no rows)` with no header.

use std::fmt::Write;

use crate::database::{Row, RowCursor};
use crate::error::AimsError;
use crate::types::Value;

/// Fixed width of every rendered column, in characters.
pub const COLUMN_WIDTH: usize = 18;

/// The single line emitted for an empty result.
pub const NO_ROWS_SENTINEL: &str = "(no rows)";

const BLOB_PREVIEW_BYTES: usize = 16;

/// Consumes the cursor and renders header, separator, and one line per
/// row. The cursor cannot be rendered twice; an empty sequence yields the
/// `(no rows)` sentinel instead of a header.
pub fn render_rows(cursor: &mut RowCursor<'_>) -> Result<String, AimsError> {
    let mut output = String::new();
    let mut header_written = false;

    while let Some(row) = cursor.advance()? {
        if !header_written {
            write_header(&mut output, row.columns());
            header_written = true;
        }
        write_row(&mut output, &row);
    }

    if !header_written {
        output.push_str(NO_ROWS_SENTINEL);
        output.push('\n');
    }

    Ok(output)
}

fn write_header(output: &mut String, columns: &[String]) {
    for name in columns {
        let _ = write!(output, "{:<width$}", name, width = COLUMN_WIDTH);
    }
    output.push('\n');
    for _ in columns {
        output.push_str(&"-".repeat(COLUMN_WIDTH));
    }
    output.push('\n');
}

fn write_row(output: &mut String, row: &Row) {
    for index in 0..row.column_count() {
        let cell = match row.get(index) {
            Some(value) => format_value(value),
            None => String::new(),
        };
        let _ = write!(output, "{:<width$}", cell, width = COLUMN_WIDTH);
    }
    output.push('\n');
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Int(i) => i.to_string(),
        Value::Real(f) => format_real(*f),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format_blob(b),
    }
}

fn format_real(f: f64) -> String {
    let formatted = format!("{:.6}", f);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn format_blob(bytes: &[u8]) -> String {
    let preview: String = bytes
        .iter()
        .take(BLOB_PREVIEW_BYTES)
        .map(|b| format!("{:02X}", b))
        .collect();
    if bytes.len() <= BLOB_PREVIEW_BYTES {
        format!("x'{}'", preview)
    } else {
        format!("x'{}'... ({} bytes)", preview, bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    fn render(sql: &str) -> String {
        let db = Database::open_in_memory().unwrap();
        let mut stmt = db.prepare(sql).unwrap();
        let mut cursor = stmt.query(&[]).unwrap();
        render_rows(&mut cursor).unwrap()
    }

    #[test]
    fn empty_result_renders_only_the_sentinel() {
        let output = render("SELECT 1 AS x WHERE 0");
        assert_eq!(output, "(no rows)\n");
    }

    #[test]
    fn header_comes_from_the_statement_aliases() {
        let output = render("SELECT 1 AS id, 'Maize' AS crop");
        let mut lines = output.lines();
        assert_eq!(lines.next().unwrap(), format!("{:<18}{:<18}", "id", "crop"));
        assert_eq!(lines.next().unwrap(), "-".repeat(36));
        assert_eq!(lines.next().unwrap(), format!("{:<18}{:<18}", "1", "Maize"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn null_prints_as_the_null_literal() {
        let output = render("SELECT NULL AS missing");
        assert!(output.contains("NULL"));
    }

    #[test]
    fn long_values_break_alignment_instead_of_truncating() {
        let long = "a-value-well-beyond-eighteen-characters";
        let output = render(&format!("SELECT '{long}' AS v, 2 AS n"));
        let data_line = output.lines().nth(2).unwrap();
        assert!(data_line.starts_with(long));
        assert!(data_line.len() > 2 * COLUMN_WIDTH);
    }

    #[test]
    fn reals_trim_trailing_zeros() {
        assert_eq!(format_real(3.5), "3.5");
        assert_eq!(format_real(3.0), "3");
        assert_eq!(format_real(0.0), "0");
        assert_eq!(format_real(1.23456), "1.23456");
    }

    #[test]
    fn blob_renders_as_hex_preview() {
        assert_eq!(format_value(&Value::Blob(vec![0xDE, 0xAD])), "x'DEAD'");
        let long: Vec<u8> = (0..32).collect();
        let rendered = format_value(&Value::Blob(long));
        assert!(rendered.contains("..."));
        assert!(rendered.contains("32 bytes"));
    }

    #[test]
    fn rendering_consumes_the_cursor() {
        let db = Database::open_in_memory().unwrap();
        let mut stmt = db.prepare("SELECT 1 AS x").unwrap();
        let mut cursor = stmt.query(&[]).unwrap();
        let first = render_rows(&mut cursor).unwrap();
        assert!(first.contains('1'));
        // The sequence is forward-only: nothing is left to render.
        assert!(cursor.advance().unwrap().is_none());
    }
}
