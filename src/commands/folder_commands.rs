use crate::error::ReporterError;
use crate::models::FolderItem;
use crate::state::ReporterState;

pub fn list_folders(state: &ReporterState, path: &str) -> Result<Vec<FolderItem>, ReporterError> {
    state.browser.list_folders(path)
}

pub fn is_valid_path(state: &ReporterState, path: &str) -> bool {
    state.browser.is_valid_path(path)
}
