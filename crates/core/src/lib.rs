//! # medreport-core
//!
//! The medical analysis record model and the report layout engine.
//!
//! - **record**: the typed `AnalysisRecord` and confidence normalization
//! - **ingest**: building records from the analysis JSON the backend serves
//! - **theme**: the report palette and confidence thresholds
//! - **generator**: lays a record out onto any `Canvas`
//! - **error**: error types for ingestion and generation
//!
//! Nothing here touches the filesystem or picks an output format; the
//! generator only talks to the `Canvas` it is handed.

// Re-export foundation crates
pub use medreport_layout as layout;
pub use medreport_render_core as render;
pub use medreport_types as types;

pub mod error;
pub mod generator;
pub mod ingest;
pub mod options;
pub mod record;
pub mod theme;

pub use error::ReportError;
pub use generator::{generate_into, GenerationSummary, SectionSummary};
pub use options::ReportOptions;
pub use record::{
    clamp_confidence, AnalysisRecord, DoctorReview, EntityCategory, Recommendation, Urgency,
};
pub use theme::{ConfidenceLevel, Palette};
