use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),
}

pub mod algorithms;
pub mod config;
pub mod cursor;

pub use self::algorithms::pagination::{check_fit, plan_table, BreakAnalysis, TablePlan};
pub use self::config::{FontSizes, LayoutConfig};
pub use self::cursor::PageCursor;

// Re-export geometry types so dependents do not need the types crate directly
pub use medreport_types::{Margins, PageSize, Point, Rect, Size};
