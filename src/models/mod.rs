pub mod file_descriptor;
pub mod folder_item;
pub mod table;

pub use file_descriptor::FileDescriptor;
pub use folder_item::FolderItem;
pub use table::{ParsedTable, Row, TypedValue};
