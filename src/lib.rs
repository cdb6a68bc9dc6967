//! # medreport
//!
//! Turns an AI medical analysis into a paginated, styled PDF report.
//!
//! ```no_run
//! use medreport::{generate, AnalysisRecord, EntityCategory};
//!
//! let record = AnalysisRecord::new("Jane Doe", "2024-03-01")
//!     .with_confidence(92.0)
//!     .with_entities(EntityCategory::Symptoms, ["fever"]);
//! let pdf: Vec<u8> = generate(&record)?;
//! # Ok::<(), medreport::ReportError>(())
//! ```
//!
//! Layout runs against the [`Canvas`](medreport_render_core::Canvas) trait;
//! [`generate_with`] renders through lopdf, [`summarize`] does a dry run
//! that only records draw calls.

pub mod config;
pub mod error;

pub use config::ReportConfig;
pub use error::MedReportError;
pub use medreport_core::{
    generate_into, AnalysisRecord, ConfidenceLevel, DoctorReview, EntityCategory,
    GenerationSummary, Palette, Recommendation, ReportError, ReportOptions, SectionSummary,
    Urgency,
};
pub use medreport_layout::LayoutConfig;

use medreport_render_core::RecordingCanvas;
use medreport_render_lopdf::{DocumentInfo, LopdfCanvas};
use std::path::{Path, PathBuf};

/// Renders `record` with the default configuration.
pub fn generate(record: &AnalysisRecord) -> Result<Vec<u8>, ReportError> {
    generate_with(record, &ReportConfig::default())
}

/// Renders `record` to PDF bytes.
pub fn generate_with(record: &AnalysisRecord, config: &ReportConfig) -> Result<Vec<u8>, ReportError> {
    // A pinned `generated_at` leaves the date out so the bytes stay stable.
    let creation_date = match config.report.generated_at {
        Some(_) => None,
        None => Some(chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string()),
    };
    let info = DocumentInfo {
        title: format!("{} - {}", config.report.title, record.patient_label),
        subject: Some(format!("Analysis of {}", record.date_label)),
        creation_date,
        ..DocumentInfo::default()
    };
    let mut canvas = LopdfCanvas::new(config.layout.page.size(), info);
    generate_into(record, &config.layout, &config.report, &mut canvas)?;
    Ok(canvas.finish(config.compress)?)
}

/// Lays `record` out without producing a PDF.
pub fn summarize(record: &AnalysisRecord, config: &ReportConfig) -> Result<GenerationSummary, ReportError> {
    let mut canvas = RecordingCanvas::new(config.layout.page.size());
    generate_into(record, &config.layout, &config.report, &mut canvas)
}

/// `<label>_Medical_Report.pdf`, with characters that are unsafe in file
/// names replaced by `_`. A blank label becomes `Patient`.
pub fn report_file_name(label: &str) -> String {
    let label = label.trim();
    let stem: String = if label.is_empty() {
        "Patient".to_string()
    } else {
        label
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect()
    };
    format!("{}_Medical_Report.pdf", stem)
}

/// Renders `record` into `dir` and returns the path of the written file.
pub fn generate_to_file(
    record: &AnalysisRecord,
    dir: impl AsRef<Path>,
    config: &ReportConfig,
) -> Result<PathBuf, MedReportError> {
    let bytes = generate_with(record, config)?;
    let path = dir.as_ref().join(report_file_name(&record.patient_label));
    std::fs::write(&path, bytes)?;
    log::info!("Wrote {}", path.display());
    Ok(path)
}
