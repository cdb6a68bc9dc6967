//! Building an [`AnalysisRecord`] from the report JSON served by the backend.
//!
//! Every field of the raw shape is optional; defaults are applied here so the
//! generator never has to deal with missing data.

use crate::error::ReportError;
use crate::record::{
    clamp_confidence, AnalysisRecord, DoctorReview, EntityCategory, Recommendation, Urgency,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_PATIENT_LABEL: &str = "Patient Report";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawReport {
    name: Option<String>,
    date: Option<String>,
    confidence: Option<f64>,
    #[serde(alias = "ai_analysis")]
    analysis: Option<RawAnalysis>,
    doctor_review: Option<RawReview>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAnalysis {
    entities: Option<BTreeMap<String, Option<Vec<String>>>>,
    recommendations: Option<Vec<RawRecommendation>>,
    warnings: Option<Vec<String>>,
    confidence_score: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecommendation {
    test: Option<String>,
    reason: Option<String>,
    urgency: Option<String>,
    confidence: Option<f64>,
    explanation: Option<String>,
    contraindications: Option<Vec<String>>,
}

/// `reviewed_by` carries the doctor's database id and is never shown.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawReview {
    reviewer: Option<String>,
    doctor_info: Option<RawDoctorInfo>,
    notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDoctorInfo {
    name: Option<String>,
    specialization: Option<String>,
}

impl AnalysisRecord {
    /// Parses the backend report JSON.
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ReportError> {
        let Some(object) = value.as_object() else {
            return Err(ReportError::InvalidInput(
                "report must be a JSON object".to_string(),
            ));
        };
        let has_analysis = ["analysis", "ai_analysis"]
            .iter()
            .any(|key| object.get(*key).is_some_and(Value::is_object));
        if !has_analysis {
            return Err(ReportError::InvalidInput(
                "No analysis data available".to_string(),
            ));
        }

        let raw: RawReport = serde_json::from_value(value)?;
        Ok(raw.into_record())
    }
}

impl RawReport {
    fn into_record(self) -> AnalysisRecord {
        let analysis = self.analysis.unwrap_or_default();

        let patient_label = non_blank(self.name)
            .unwrap_or_else(|| DEFAULT_PATIENT_LABEL.to_string());
        let date_label = non_blank(self.date).unwrap_or_else(today_label);
        // The report-level score wins over the one inside the analysis.
        let raw_score = self.confidence.or(analysis.confidence_score).unwrap_or(0.0);
        let confidence_score = overall_score(raw_score);

        let mut entities = HashMap::new();
        for (key, items) in analysis.entities.unwrap_or_default() {
            match EntityCategory::from_key(&key) {
                Some(category) => {
                    entities.insert(category, items.unwrap_or_default());
                }
                None => log::debug!("Ignoring entity group '{}'", key),
            }
        }

        let recommendations = analysis
            .recommendations
            .unwrap_or_default()
            .into_iter()
            .map(RawRecommendation::into_recommendation)
            .collect();

        let review = self.doctor_review.map(RawReview::into_review);

        AnalysisRecord {
            patient_label,
            date_label,
            confidence_score,
            entities,
            recommendations,
            warnings: analysis.warnings.unwrap_or_default(),
            review,
        }
    }
}

impl RawRecommendation {
    fn into_recommendation(self) -> Recommendation {
        Recommendation {
            test: self.test.unwrap_or_default(),
            reason: self.reason.unwrap_or_default(),
            urgency: self.urgency.as_deref().map(Urgency::parse).unwrap_or_default(),
            confidence: clamp_confidence(self.confidence.unwrap_or(0.0) as f32),
            explanation: non_blank(self.explanation),
            contraindications: self.contraindications.unwrap_or_default(),
        }
    }
}

impl RawReview {
    fn into_review(self) -> DoctorReview {
        let from_info = self.doctor_info.and_then(|info| {
            let name = non_blank(info.name)?;
            Some(match non_blank(info.specialization) {
                Some(specialization) => {
                    format!("Dr. {} - {}", name.trim(), specialization.trim())
                }
                None => format!("Dr. {}", name.trim()),
            })
        });
        DoctorReview {
            reviewer: from_info.or_else(|| non_blank(self.reviewer)),
            notes: non_blank(self.notes),
        }
    }
}

/// The backend stores the overall score as a percentage times 100, so a
/// value above 100 is read as basis points. Lower values are percentages.
fn overall_score(raw: f64) -> f32 {
    let raw = raw as f32;
    if raw > 100.0 {
        clamp_confidence(raw / 100.0)
    } else {
        clamp_confidence(raw)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn today_label() -> String {
    chrono::Local::now().format("%m/%d/%Y").to_string()
}
