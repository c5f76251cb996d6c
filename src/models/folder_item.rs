use serde::{Deserialize, Serialize};

/// One child of a browsed directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderItem {
    pub name: String,
    pub path: String,
    pub is_directory: bool,
    pub has_subfolders: bool,
    pub size: u64,
    pub last_modified: String,
}
