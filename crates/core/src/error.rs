//! Error types for record ingestion and report generation.

use medreport_layout::LayoutError;
use medreport_render_core::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    /// The input cannot be turned into a report at all.
    #[error("Invalid report input: {0}")]
    InvalidInput(String),
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    /// The drawing backend rejected an operation.
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}
