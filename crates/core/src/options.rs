use crate::theme::Palette;
use serde::{Deserialize, Serialize};

/// Report text and appearance that is not geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    pub title: String,
    pub disclaimer: String,
    pub watermark_text: String,
    /// Opacity of the watermark in `0..=1`.
    pub watermark_opacity: f32,
    /// Fixed "Generated on" timestamp; the local time of generation when unset.
    pub generated_at: Option<String>,
    pub palette: Palette,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "AI Medical Report".to_string(),
            disclaimer: "AI-generated analysis - please consult a doctor before making decisions."
                .to_string(),
            watermark_text: "CONFIDENTIAL".to_string(),
            watermark_opacity: 0.3,
            generated_at: None,
            palette: Palette::default(),
        }
    }
}

impl ReportOptions {
    pub fn generated_at(mut self, timestamp: impl Into<String>) -> Self {
        self.generated_at = Some(timestamp.into());
        self
    }

    pub(crate) fn timestamp(&self) -> String {
        match &self.generated_at {
            Some(ts) => ts.clone(),
            None => chrono::Local::now()
                .format("%m/%d/%Y, %I:%M:%S %p")
                .to_string(),
        }
    }
}
