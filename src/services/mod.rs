pub mod csv_service;
pub mod delimiter;
pub mod folder_service;
pub mod parsing_service;
pub mod report_file_service;
pub mod spreadsheet_service;
pub mod text_service;
pub mod value_coercer;
