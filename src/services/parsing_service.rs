use std::path::Path;

use crate::error::ReporterError;
use crate::models::ParsedTable;
use crate::services::csv_service::DelimitedTextParser;
use crate::services::report_file_service::file_extension;
use crate::services::{spreadsheet_service, text_service};

/// Parsing strategy selected from a file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Workbook,
    Delimited,
    FreeText,
}

impl FileFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "xlsx" | "xls" => Some(Self::Workbook),
            "csv" => Some(Self::Delimited),
            "txt" => Some(Self::FreeText),
            _ => None,
        }
    }
}

/// Turns a file on disk into a [`ParsedTable`], picking the reader by extension.
#[derive(Debug, Clone, Default)]
pub struct TabularFileParser {
    csv: DelimitedTextParser,
}

impl TabularFileParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&self, path: &Path, file_name: &str) -> Result<ParsedTable, ReporterError> {
        if !path.exists() {
            return Err(ReporterError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let extension = file_extension(file_name);
        let Some(format) = FileFormat::from_extension(&extension) else {
            return Err(ReporterError::UnsupportedFormat { extension });
        };

        tracing::debug!(file = file_name, ?format, "parsing file");
        let parsed = match format {
            FileFormat::Workbook => spreadsheet_service::parse(path, file_name),
            FileFormat::Delimited => self.csv.parse_file(path, file_name),
            FileFormat::FreeText => text_service::parse(path, file_name),
        };
        parsed.map_err(|source| {
            tracing::warn!(file = file_name, error = %source, "failed to parse file");
            ReporterError::read(file_name, source)
        })
    }
}
