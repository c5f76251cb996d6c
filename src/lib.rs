//! Sandboxed, read-only browsing of a report storage tree and conversion of
//! the workbooks, CSV files and text files found there into typed tables.

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod scope_path;
pub mod services;
pub mod state;

pub use commands::file_commands::{list_report_files, parse_file, scan_file_details};
pub use commands::folder_commands::{is_valid_path, list_folders};
pub use config::StorageConfig;
pub use error::{ReadFailure, ReporterError};
pub use models::{FileDescriptor, FolderItem, ParsedTable, Row, TypedValue};
pub use scope_path::PathSandbox;
pub use state::ReporterState;
