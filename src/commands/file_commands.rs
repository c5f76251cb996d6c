use crate::error::ReporterError;
use crate::models::{FileDescriptor, ParsedTable};
use crate::scope_path::logical_child;
use crate::state::ReporterState;

pub fn parse_file(
    state: &ReporterState,
    report_path: &str,
    file_name: &str,
) -> Result<ParsedTable, ReporterError> {
    let resolved = state.sandbox.resolve(&logical_child(report_path, file_name))?;
    state.parser.parse(&resolved, file_name)
}

pub fn list_report_files(
    state: &ReporterState,
    report_path: &str,
) -> Result<Vec<String>, ReporterError> {
    state.report_files.list_report_files(report_path)
}

pub fn scan_file_details(
    state: &ReporterState,
    report_path: &str,
) -> Result<Vec<FileDescriptor>, ReporterError> {
    state.report_files.scan_file_details(report_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use crate::models::TypedValue;
    use std::fs;
    use tempfile::TempDir;

    fn state(dir: &TempDir) -> ReporterState {
        ReporterState::new(StorageConfig::new(dir.path(), "xlsx,xls,csv,txt")).unwrap()
    }

    fn seed_report(dir: &TempDir) {
        let report = dir.path().join("finance/q1");
        fs::create_dir_all(&report).unwrap();
        fs::write(report.join("ledger.csv"), "id,value\n1,54401E143\n2,3.14\n3,true").unwrap();
        fs::write(report.join("notes.txt"), "a\tb\tc\n1\t2\t3").unwrap();
        fs::write(report.join("deck.pdf"), "%PDF-1.4").unwrap();
    }

    #[test]
    fn test_parse_file_csv() {
        let dir = TempDir::new().unwrap();
        seed_report(&dir);

        let table = parse_file(&state(&dir), "/finance/q1", "ledger.csv").unwrap();
        assert_eq!(table.headers, vec!["id", "value"]);
        assert_eq!(table.total_rows, 3);
        assert_eq!(table.rows[0]["id"], TypedValue::Integer(1));
        assert_eq!(table.rows[0]["value"], TypedValue::from("54401E143"));
        assert_eq!(table.rows[2]["value"], TypedValue::Boolean(true));
    }

    #[test]
    fn test_parse_file_text() {
        let dir = TempDir::new().unwrap();
        seed_report(&dir);

        let table = parse_file(&state(&dir), "/finance/q1/", "notes.txt").unwrap();
        assert_eq!(table.headers, vec!["a", "b", "c"]);
        assert_eq!(table.rows[0]["b"], TypedValue::Integer(2));
    }

    #[test]
    fn test_parse_file_unsupported() {
        let dir = TempDir::new().unwrap();
        seed_report(&dir);

        let result = parse_file(&state(&dir), "/finance/q1", "deck.pdf");
        assert!(matches!(result, Err(ReporterError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_parse_file_missing() {
        let dir = TempDir::new().unwrap();
        seed_report(&dir);

        let result = parse_file(&state(&dir), "/finance/q1", "absent.csv");
        assert!(matches!(result, Err(ReporterError::NotFound { .. })));
    }

    #[test]
    fn test_parse_file_cannot_climb_out() {
        let parent = TempDir::new().unwrap();
        let base = parent.path().join("nas");
        fs::create_dir(&base).unwrap();
        fs::write(parent.path().join("secret.csv"), "k\nv\n").unwrap();
        let state = ReporterState::new(StorageConfig::new(&base, "csv")).unwrap();

        let result = parse_file(&state, "/", "../secret.csv");
        assert!(matches!(result, Err(ReporterError::PathSecurity { .. })));
    }

    #[test]
    fn test_report_file_listing() {
        let dir = TempDir::new().unwrap();
        seed_report(&dir);
        let state = state(&dir);

        assert_eq!(
            list_report_files(&state, "/finance/q1").unwrap(),
            vec!["ledger.csv", "notes.txt"]
        );
        let details = scan_file_details(&state, "/finance/q1").unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].extension, "csv");
        assert_eq!(details[1].name, "notes.txt");
    }
}
