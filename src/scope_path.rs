use std::path::{Component, Path, PathBuf};

use crate::config::StorageConfig;
use crate::error::ReporterError;

pub fn normalize(path: &str) -> String {
    let mut normalized = path.replace('\\', "/");
    while normalized.ends_with('/') && normalized.len() > 1 {
        normalized.pop();
    }
    normalized
}

/// Collapses `.` and `..` segments without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

/// Component-wise containment, so `/base-evil` is not inside `/base`.
pub fn is_within_scope(path: &Path, root: &Path) -> bool {
    normalize_lexically(path).starts_with(normalize_lexically(root))
}

/// Appends `child` to a logical (slash-rooted) directory path.
pub fn logical_child(parent: &str, child: &str) -> String {
    if parent == "/" {
        format!("/{child}")
    } else if parent.ends_with('/') {
        format!("{parent}{child}")
    } else {
        format!("{parent}/{child}")
    }
}

/// Maps logical paths onto the configured base directory.
#[derive(Debug, Clone)]
pub struct PathSandbox {
    base: PathBuf,
}

impl PathSandbox {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            base: normalize_lexically(&config.base_path),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn resolve(&self, logical: &str) -> Result<PathBuf, ReporterError> {
        if logical == "/" {
            return Ok(self.base.clone());
        }

        let cleaned = normalize(logical);
        let relative = cleaned.strip_prefix('/').unwrap_or(&cleaned);

        let mut joined = self.base.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::RootDir | Component::Prefix(_) => {}
                other => joined.push(other),
            }
        }
        let resolved = normalize_lexically(&joined);

        if !is_within_scope(&resolved, &self.base) {
            tracing::warn!(path = logical, "rejected path outside of base directory");
            return Err(ReporterError::PathSecurity {
                path: logical.to_string(),
            });
        }
        Ok(resolved)
    }
}
