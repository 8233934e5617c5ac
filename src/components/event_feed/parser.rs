use super::models::{Column, EventRecord};
use tracing::debug;

/// Split delimited text into rows of cells.
///
/// Commas and line breaks only separate cells while outside double quotes; a
/// doubled quote inside a quoted cell is a literal quote. Cells are trimmed,
/// so CRLF line endings need no special case.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cell.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => row.push(finish_cell(&mut cell)),
            '\n' if !in_quotes => {
                row.push(finish_cell(&mut cell));
                rows.push(std::mem::take(&mut row));
            }
            _ => cell.push(ch),
        }
    }

    // Last row without a trailing newline
    if !cell.is_empty() || !row.is_empty() {
        row.push(finish_cell(&mut cell));
        rows.push(row);
    }

    rows
}

fn finish_cell(cell: &mut String) -> String {
    let value = cell.trim().to_string();
    cell.clear();
    value
}

/// Parse the feed into records, one per non-header row.
///
/// The first row names the columns. Columns that are not part of the event
/// schema are dropped, blank lines are skipped, and short rows leave the
/// missing cells empty.
pub fn parse_feed(text: &str) -> Vec<EventRecord> {
    let mut rows = parse_rows(text).into_iter();

    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let columns: Vec<Option<Column>> = header.iter().map(|h| Column::from_header(h)).collect();

    let records: Vec<EventRecord> = rows
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .map(|row| {
            let mut record = EventRecord::default();
            for (idx, column) in columns.iter().enumerate() {
                if let Some(column) = column {
                    record.set(*column, row.get(idx).cloned().unwrap_or_default());
                }
            }
            record
        })
        .collect();

    debug!("Parsed {} feed records", records.len());
    records
}
