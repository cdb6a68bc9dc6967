use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Invalid color: alpha {0} is outside 0.0..=1.0")]
    InvalidColor(f32),
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("Page index {index} is out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}
