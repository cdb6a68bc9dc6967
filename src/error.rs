use medreport_core::ReportError;
use medreport_layout::LayoutError;
use thiserror::Error;

/// Errors surfaced by the library facade and the CLI.
#[derive(Error, Debug)]
pub enum MedReportError {
    #[error("Report generation failed: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LayoutError> for MedReportError {
    fn from(e: LayoutError) -> Self {
        MedReportError::Report(ReportError::Layout(e))
    }
}

impl From<serde_json::Error> for MedReportError {
    fn from(e: serde_json::Error) -> Self {
        MedReportError::Report(ReportError::Json(e))
    }
}
