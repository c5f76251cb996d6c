use crate::config::StorageConfig;
use crate::error::ReporterError;
use crate::scope_path::PathSandbox;
use crate::services::folder_service::DirectoryBrowser;
use crate::services::parsing_service::TabularFileParser;
use crate::services::report_file_service::ReportFileScanner;

/// Components wired from one immutable [`StorageConfig`].
///
/// Holds no per-request data, so a single instance can be shared across
/// threads and called concurrently.
#[derive(Debug, Clone)]
pub struct ReporterState {
    pub config: StorageConfig,
    pub sandbox: PathSandbox,
    pub browser: DirectoryBrowser,
    pub report_files: ReportFileScanner,
    pub parser: TabularFileParser,
}

impl ReporterState {
    pub fn new(config: StorageConfig) -> Result<Self, ReporterError> {
        config.validate()?;
        let sandbox = PathSandbox::new(&config);
        Ok(Self {
            browser: DirectoryBrowser::new(sandbox.clone()),
            report_files: ReportFileScanner::new(sandbox.clone(), &config),
            parser: TabularFileParser::new(),
            sandbox,
            config,
        })
    }

    pub fn from_env() -> Result<Self, ReporterError> {
        Self::new(StorageConfig::from_env()?)
    }
}
