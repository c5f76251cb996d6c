use std::fs;
use std::path::PathBuf;

use crate::config::StorageConfig;
use crate::error::ReporterError;
use crate::models::FileDescriptor;
use crate::scope_path::PathSandbox;

/// Text after the last `.`, lowercased. A name without a dot is its own extension.
pub fn file_extension(file_name: &str) -> String {
    file_name
        .rsplit('.')
        .next()
        .unwrap_or(file_name)
        .to_lowercase()
}

/// Scans a report's storage directory for files with an allowed extension.
#[derive(Debug, Clone)]
pub struct ReportFileScanner {
    sandbox: PathSandbox,
    config: StorageConfig,
}

impl ReportFileScanner {
    pub fn new(sandbox: PathSandbox, config: &StorageConfig) -> Self {
        Self {
            sandbox,
            config: config.clone(),
        }
    }

    pub fn list_report_files(&self, logical: &str) -> Result<Vec<String>, ReporterError> {
        let mut names: Vec<String> = self
            .matching_files(logical)?
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        names.sort();
        Ok(names)
    }

    pub fn scan_file_details(&self, logical: &str) -> Result<Vec<FileDescriptor>, ReporterError> {
        let mut details = Vec::new();
        for (name, path) in self.matching_files(logical)? {
            let metadata = fs::metadata(&path).map_err(|e| ReporterError::access(&path, e))?;
            let modified = metadata
                .modified()
                .map_err(|e| ReporterError::access(&path, e))?;
            details.push(FileDescriptor {
                extension: file_extension(&name),
                name,
                size: metadata.len(),
                last_modified: chrono::DateTime::<chrono::Local>::from(modified).naive_local(),
            });
        }
        details.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(details)
    }

    fn matching_files(&self, logical: &str) -> Result<Vec<(String, PathBuf)>, ReporterError> {
        let dir = self.sandbox.resolve(logical)?;
        if !dir.is_dir() {
            return Err(ReporterError::NotFound { path: dir });
        }

        let entries = fs::read_dir(&dir).map_err(|e| ReporterError::access(&dir, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ReporterError::access(&dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if self.is_allowed(&name) {
                files.push((name, path));
            }
        }
        tracing::debug!(count = files.len(), path = %dir.display(), "scanned report files");
        Ok(files)
    }

    fn is_allowed(&self, file_name: &str) -> bool {
        self.config.is_allowed_extension(&file_extension(file_name))
    }
}
