use std::fs;
use std::path::Path;

use crate::error::ReadFailure;
use crate::models::table::zip_row;
use crate::models::{ParsedTable, Row, TypedValue};
use crate::services::delimiter;
use crate::services::value_coercer;

pub const CONTENT_HEADER: &str = "Content";

/// Reads free-form text, splitting columns when the first line has a
/// recognisable delimiter and falling back to one row per line otherwise.
pub fn parse(path: &Path, file_name: &str) -> Result<ParsedTable, ReadFailure> {
    let content = fs::read_to_string(path)?;
    let (headers, rows) = parse_content(&content);
    tracing::debug!(file = file_name, headers = headers.len(), rows = rows.len(), "parsed text file");
    Ok(ParsedTable::new(file_name, headers, rows))
}

pub fn parse_content(content: &str) -> (Vec<String>, Vec<Row>) {
    let mut lines = content.lines();
    let Some(first) = lines.next() else {
        return (vec![CONTENT_HEADER.to_string()], Vec::new());
    };

    let Some(delimiter) = delimiter::detect(first) else {
        let rows = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                Row::from([(
                    CONTENT_HEADER.to_string(),
                    TypedValue::String(line.to_string()),
                )])
            })
            .collect();
        return (vec![CONTENT_HEADER.to_string()], rows);
    };

    let headers: Vec<String> = delimiter
        .split(first)
        .into_iter()
        .map(str::to_string)
        .collect();
    let rows = lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            zip_row(
                &headers,
                delimiter.split(line).into_iter().map(value_coercer::coerce),
            )
        })
        .collect();

    (headers, rows)
}
