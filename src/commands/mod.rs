pub mod file_commands;
pub mod folder_commands;
