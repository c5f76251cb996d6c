use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ReporterError;

pub const DEFAULT_ALLOWED_EXTENSIONS: &str = "xlsx,xls,csv,txt";

const BASE_PATH_VAR: &str = "REPORTER_BASE_PATH";
const ALLOWED_EXTENSIONS_VAR: &str = "REPORTER_ALLOWED_EXTENSIONS";

/// Storage settings handed to every component at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    /// Absolute directory all logical paths are resolved against.
    pub base_path: PathBuf,

    /// Lowercase extensions (without the dot) that count as report files.
    #[serde(
        default = "default_allowed_extensions",
        deserialize_with = "deserialize_extension_list"
    )]
    pub allowed_extensions: Vec<String>,
}

fn default_allowed_extensions() -> Vec<String> {
    parse_extension_list(DEFAULT_ALLOWED_EXTENSIONS)
}

fn deserialize_extension_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ExtensionList {
        Joined(String),
        Items(Vec<String>),
    }

    Ok(match ExtensionList::deserialize(deserializer)? {
        ExtensionList::Joined(joined) => parse_extension_list(&joined),
        ExtensionList::Items(items) => parse_extension_list(&items.join(",")),
    })
}

pub fn parse_extension_list(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

impl StorageConfig {
    pub fn new(base_path: impl Into<PathBuf>, allowed_extensions: &str) -> Self {
        Self {
            base_path: base_path.into(),
            allowed_extensions: parse_extension_list(allowed_extensions),
        }
    }

    pub fn from_env() -> Result<Self, ReporterError> {
        let base_path = std::env::var(BASE_PATH_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ReporterError::InvalidConfig(format!("{BASE_PATH_VAR} is not set")))?;
        let allowed = std::env::var(ALLOWED_EXTENSIONS_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ALLOWED_EXTENSIONS.to_string());

        let config = Self::new(base_path.trim(), &allowed);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReporterError> {
        if self.base_path.as_os_str().is_empty() {
            return Err(ReporterError::InvalidConfig(
                "base path cannot be empty".to_string(),
            ));
        }
        if !self.base_path.is_absolute() {
            return Err(ReporterError::InvalidConfig(format!(
                "base path must be absolute: {}",
                self.base_path.display()
            )));
        }
        Ok(())
    }

    pub fn is_allowed_extension(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed == extension)
    }
}
