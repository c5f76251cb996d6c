use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ReporterError {
    #[error("Access denied: path outside of allowed directory: {path}")]
    PathSecurity { path: String },

    #[error("Not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Error reading file {file_name}: {source}")]
    Read {
        file_name: String,
        #[source]
        source: ReadFailure,
    },

    #[error("Cannot read directory {}: {source}", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Underlying cause of a failed parse.
#[derive(Debug, thiserror::Error)]
pub enum ReadFailure {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("{0}")]
    Malformed(String),
}

impl ReporterError {
    pub fn read(file_name: impl Into<String>, source: impl Into<ReadFailure>) -> Self {
        Self::Read {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    pub fn access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Access {
            path: path.into(),
            source,
        }
    }
}

impl Serialize for ReporterError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
