use std::fs;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::ReadFailure;
use crate::models::table::zip_row;
use crate::models::{ParsedTable, Row};
use crate::services::value_coercer;

/// Quote-aware delimited text reader. The first record is the header row.
///
/// Inside a quoted field both `""` and `\"` stand for a literal quote; the
/// escape byte is dropped before whatever character follows it.
#[derive(Debug, Clone, Copy)]
pub struct DelimitedTextParser {
    delimiter: u8,
    quote: u8,
    escape: Option<u8>,
}

impl Default for DelimitedTextParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            escape: Some(b'\\'),
        }
    }
}

impl DelimitedTextParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_escape(mut self, escape: Option<u8>) -> Self {
        self.escape = escape;
        self
    }

    pub fn parse_file(&self, path: &Path, file_name: &str) -> Result<ParsedTable, ReadFailure> {
        let content = fs::read_to_string(path)?;
        let (headers, rows) = self.parse_content(&content)?;
        tracing::debug!(file = file_name, headers = headers.len(), rows = rows.len(), "parsed delimited text");
        Ok(ParsedTable::new(file_name, headers, rows))
    }

    pub fn parse_content(&self, content: &str) -> Result<(Vec<String>, Vec<Row>), ReadFailure> {
        let prepared = prepare_records(content, self.quote, self.escape)?;

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .quote(self.quote)
            .escape(self.escape)
            .flexible(true)
            .from_reader(prepared.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(zip_row(&headers, record.iter().map(value_coercer::coerce)));
        }

        Ok((headers, rows))
    }
}

/// Validates quoting and rewrites blank lines outside quoted fields as an
/// empty quoted field, so each one still yields a record with a single empty
/// value instead of being skipped by the reader.
fn prepare_records(content: &str, quote: u8, escape: Option<u8>) -> Result<String, ReadFailure> {
    let mut prepared = String::with_capacity(content.len());
    let mut in_quotes = false;
    let mut opened_on = 0;

    for (index, line) in content.split_inclusive('\n').enumerate() {
        let line_number = index + 1;
        if !in_quotes && line.trim_end_matches(['\r', '\n']).is_empty() {
            let quote = char::from(quote);
            prepared.push(quote);
            prepared.push(quote);
            prepared.push_str(line);
            continue;
        }

        let mut escaped = false;
        for byte in line.bytes() {
            if escaped {
                escaped = false;
            } else if in_quotes && Some(byte) == escape {
                escaped = true;
            } else if byte == quote {
                if !in_quotes {
                    opened_on = line_number;
                }
                in_quotes = !in_quotes;
            }
        }
        prepared.push_str(line);
    }

    if in_quotes {
        return Err(ReadFailure::Malformed(format!(
            "unterminated quoted field starting on line {opened_on}"
        )));
    }
    Ok(prepared)
}
