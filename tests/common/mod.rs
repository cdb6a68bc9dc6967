pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use medreport::{generate_with, AnalysisRecord, ReportConfig};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of a single page, 1-based
    pub fn page_text(&self, page: usize) -> String {
        self.doc.extract_text(&[page as u32]).unwrap_or_default()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Test configuration: fixed timestamp, uncompressed streams
pub fn test_config() -> ReportConfig {
    let mut config = ReportConfig::default();
    config.report.generated_at = Some("01/02/2024, 10:00:00 AM".to_string());
    config.compress = false;
    config
}

/// Generate a PDF for a record with the test configuration
pub fn generate_pdf(record: &AnalysisRecord) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    generate_pdf_with(record, &test_config())
}

pub fn generate_pdf_with(
    record: &AnalysisRecord,
    config: &ReportConfig,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let bytes = generate_with(record, config)?;
    GeneratedPdf::from_bytes(bytes)
}

/// Generate a PDF from backend report JSON
#[allow(dead_code)]
pub fn generate_pdf_from_json(json: &serde_json::Value) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let record = AnalysisRecord::from_value(json.clone())?;
    generate_pdf(&record)
}
