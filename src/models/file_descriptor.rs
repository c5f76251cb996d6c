use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A report file found directly under a report's storage path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub name: String,
    pub size: u64,
    pub last_modified: NaiveDateTime,
    pub extension: String,
}
