use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::error::ReporterError;
use crate::models::FolderItem;
use crate::scope_path::{logical_child, PathSandbox};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(time: SystemTime) -> String {
    chrono::DateTime::<chrono::Local>::from(time)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Read-only listing of directories under the sandbox base.
#[derive(Debug, Clone)]
pub struct DirectoryBrowser {
    sandbox: PathSandbox,
}

impl DirectoryBrowser {
    pub fn new(sandbox: PathSandbox) -> Self {
        Self { sandbox }
    }

    pub fn list_folders(&self, logical: &str) -> Result<Vec<FolderItem>, ReporterError> {
        let resolved = self.sandbox.resolve(logical)?;
        tracing::debug!(path = %resolved.display(), "browsing folders");
        list(&resolved, logical)
    }

    pub fn is_valid_path(&self, logical: &str) -> bool {
        match self.sandbox.resolve(logical) {
            Ok(resolved) => resolved.is_dir(),
            Err(e) => {
                tracing::debug!(path = logical, error = %e, "path validation failed");
                false
            }
        }
    }
}

/// Lists the immediate children of `dir`, directories first.
///
/// A missing or non-directory `dir` yields an empty listing. Attribute reads
/// that fail for a single child fall back to zero size and an empty
/// timestamp; only failing to open `dir` itself is an error.
pub fn list(dir: &Path, logical: &str) -> Result<Vec<FolderItem>, ReporterError> {
    if !dir.exists() {
        tracing::warn!(path = %dir.display(), "path does not exist");
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        tracing::warn!(path = %dir.display(), "path is not a directory");
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|e| {
        tracing::error!(path = %dir.display(), error = %e, "error reading directory");
        ReporterError::access(dir, e)
    })?;

    let mut items = entries.fold(Vec::new(), |mut items, entry| {
        match entry {
            Ok(entry) => items.push(folder_item(&entry.path(), logical)),
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "skipping unreadable entry")
            }
        }
        items
    });

    items.sort_by(|a, b| {
        b.is_directory
            .cmp(&a.is_directory)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    tracing::debug!(count = items.len(), path = %dir.display(), "listed folder items");
    Ok(items)
}

fn folder_item(path: &Path, logical_parent: &str) -> FolderItem {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let is_directory = path.is_dir();
    let has_subfolders = is_directory && has_subdirectories(path);

    let (size, last_modified) = match fs::metadata(path) {
        Ok(metadata) => (
            metadata.len(),
            metadata.modified().map(format_timestamp).unwrap_or_default(),
        ),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "could not read attributes");
            (0, String::new())
        }
    };

    FolderItem {
        path: logical_child(logical_parent, &name),
        name,
        is_directory,
        has_subfolders,
        size,
        last_modified,
    }
}

/// True as soon as one child directory is found.
pub fn has_subdirectories(path: &Path) -> bool {
    match fs::read_dir(path) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .any(|entry| entry.path().is_dir()),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "could not check subdirectories");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use std::fs::File;
    use tempfile::TempDir;

    fn browser(base: &Path) -> DirectoryBrowser {
        DirectoryBrowser::new(PathSandbox::new(&StorageConfig::new(base, "csv")))
    }

    #[test]
    fn test_directories_sort_before_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        File::create(dir.path().join("c.txt")).unwrap();

        let items = browser(dir.path()).list_folders("/").unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c.txt"]);
        assert!(items[0].is_directory);
        assert!(items[1].is_directory);
        assert!(!items[2].is_directory);
    }

    #[test]
    fn test_names_sort_case_insensitively() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("Beta.csv")).unwrap();
        File::create(dir.path().join("alpha.csv")).unwrap();
        File::create(dir.path().join("Gamma.csv")).unwrap();

        let items = browser(dir.path()).list_folders("/").unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["alpha.csv", "Beta.csv", "Gamma.csv"]);
    }

    #[test]
    fn test_has_subfolders_only_counts_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("parent/child")).unwrap();
        fs::create_dir(dir.path().join("files_only")).unwrap();
        File::create(dir.path().join("files_only/report.csv")).unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();

        let items = browser(dir.path()).list_folders("/").unwrap();
        let by_name = |name: &str| items.iter().find(|i| i.name == name).unwrap();
        assert!(by_name("parent").has_subfolders);
        assert!(!by_name("files_only").has_subfolders);
        assert!(!by_name("empty").has_subfolders);
    }

    #[test]
    fn test_listing_is_idempotent() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("x/y")).unwrap();
        fs::write(dir.path().join("data.csv"), "a,b\n1,2\n").unwrap();

        let b = browser(dir.path());
        assert_eq!(b.list_folders("/").unwrap(), b.list_folders("/").unwrap());
    }

    #[test]
    fn test_populates_logical_paths_and_metadata() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sales")).unwrap();
        fs::write(dir.path().join("sales/q1.csv"), "hello world").unwrap();

        let b = browser(dir.path());
        let items = b.list_folders("/sales").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].path, "/sales/q1.csv");
        assert_eq!(items[0].size, 11);
        assert_eq!(items[0].last_modified.len(), "2024-01-01 00:00:00".len());

        let items = b.list_folders("/sales/").unwrap();
        assert_eq!(items[0].path, "/sales/q1.csv");

        let root = b.list_folders("/").unwrap();
        assert_eq!(root[0].path, "/sales");
    }

    #[test]
    fn test_missing_or_file_path_yields_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("plain.txt"), "x").unwrap();

        let b = browser(dir.path());
        assert!(b.list_folders("/does/not/exist").unwrap().is_empty());
        assert!(b.list_folders("/plain.txt").unwrap().is_empty());
    }

    #[test]
    fn test_escape_is_rejected() {
        let dir = TempDir::new().unwrap();
        let result = browser(dir.path()).list_folders("/../../etc");
        assert!(matches!(result, Err(ReporterError::PathSecurity { .. })));
    }

    #[test]
    fn test_sibling_prefix_is_rejected() {
        let parent = TempDir::new().unwrap();
        let base = parent.path().join("base");
        fs::create_dir(&base).unwrap();
        fs::create_dir(parent.path().join("base-evil")).unwrap();

        let b = browser(&base);
        assert!(matches!(
            b.list_folders("/../base-evil"),
            Err(ReporterError::PathSecurity { .. })
        ));
        assert!(!b.is_valid_path("/../base-evil"));
    }

    #[test]
    fn test_is_valid_path() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("reports")).unwrap();
        fs::write(dir.path().join("file.csv"), "a").unwrap();

        let b = browser(dir.path());
        assert!(b.is_valid_path("/"));
        assert!(b.is_valid_path("/reports"));
        assert!(!b.is_valid_path("/file.csv"));
        assert!(!b.is_valid_path("/missing"));
        assert!(!b.is_valid_path("/../.."));
    }
}
