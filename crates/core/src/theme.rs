//! Report colors and the confidence thresholds that pick between them.

use crate::record::EntityCategory;
use medreport_types::Color;
use serde::{Deserialize, Serialize};

/// Scores at or above this are shown as high confidence.
pub const HIGH_CONFIDENCE: f32 = 85.0;
/// Scores at or above this (and below [`HIGH_CONFIDENCE`]) are moderate.
pub const MODERATE_CONFIDENCE: f32 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Moderate,
    Low,
}

impl ConfidenceLevel {
    /// Both thresholds are inclusive: 85.0 is high, 70.0 is moderate.
    pub fn from_score(score: f32) -> Self {
        if score >= HIGH_CONFIDENCE {
            ConfidenceLevel::High
        } else if score >= MODERATE_CONFIDENCE {
            ConfidenceLevel::Moderate
        } else {
            ConfidenceLevel::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub gray: Color,
    pub light_gray: Color,
    pub dark_gray: Color,
    pub subtle_blue: Color,
    /// Stripe behind every second warning row.
    pub warning_stripe: Color,
    pub watermark: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color::rgb(44, 102, 255),
            secondary: Color::rgb(99, 102, 241),
            success: Color::rgb(16, 185, 129),
            warning: Color::rgb(251, 191, 36),
            danger: Color::rgb(239, 68, 68),
            gray: Color::rgb(107, 114, 128),
            light_gray: Color::rgb(243, 244, 246),
            dark_gray: Color::rgb(31, 41, 55),
            subtle_blue: Color::rgb(240, 248, 255),
            warning_stripe: Color::rgb(255, 238, 238),
            watermark: Color::gray(200),
        }
    }
}

impl Palette {
    pub fn confidence(&self, level: ConfidenceLevel) -> Color {
        match level {
            ConfidenceLevel::High => self.success,
            ConfidenceLevel::Moderate => self.warning,
            ConfidenceLevel::Low => self.danger,
        }
    }

    pub fn category(&self, category: EntityCategory) -> Color {
        match category {
            EntityCategory::Symptoms => self.danger,
            EntityCategory::Diagnoses => self.warning,
            EntityCategory::Medications => self.secondary,
            EntityCategory::Tests => self.primary,
            EntityCategory::Vitals => self.success,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(ConfidenceLevel::from_score(100.0), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(85.0), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(84.9), ConfidenceLevel::Moderate);
        assert_eq!(ConfidenceLevel::from_score(70.0), ConfidenceLevel::Moderate);
        assert_eq!(ConfidenceLevel::from_score(69.9), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(0.0), ConfidenceLevel::Low);
    }

    #[test]
    fn level_colors() {
        let palette = Palette::default();
        assert_eq!(palette.confidence(ConfidenceLevel::High), Color::rgb(16, 185, 129));
        assert_eq!(palette.confidence(ConfidenceLevel::Moderate), Color::rgb(251, 191, 36));
        assert_eq!(palette.confidence(ConfidenceLevel::Low), Color::rgb(239, 68, 68));
    }

    #[test]
    fn palette_overrides_from_json() {
        let palette: Palette = serde_json::from_str(r##"{"primary": "#000000"}"##).unwrap();
        assert_eq!(palette.primary, Color::BLACK);
        assert_eq!(palette.danger, Palette::default().danger);
    }
}
