//! The typed analysis record the report is generated from.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The fixed set of extracted entity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityCategory {
    Symptoms,
    Diagnoses,
    Medications,
    Tests,
    Vitals,
}

impl EntityCategory {
    /// Categories in the order they appear in a report.
    pub const ALL: [EntityCategory; 5] = [
        EntityCategory::Symptoms,
        EntityCategory::Diagnoses,
        EntityCategory::Medications,
        EntityCategory::Tests,
        EntityCategory::Vitals,
    ];

    pub fn key(self) -> &'static str {
        match self {
            EntityCategory::Symptoms => "symptoms",
            EntityCategory::Diagnoses => "diagnoses",
            EntityCategory::Medications => "medications",
            EntityCategory::Tests => "tests",
            EntityCategory::Vitals => "vitals",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityCategory::Symptoms => "Symptoms",
            EntityCategory::Diagnoses => "Diagnoses",
            EntityCategory::Medications => "Medications",
            EntityCategory::Tests => "Tests",
            EntityCategory::Vitals => "Vitals",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(key.trim()))
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    #[default]
    Routine,
}

impl Urgency {
    /// Case-insensitive. The recommender's `urgent` and `emergent` levels
    /// count as `High`; anything unrecognized is `Routine`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Urgency::Low,
            "medium" | "moderate" => Urgency::Medium,
            "high" | "urgent" | "emergent" => Urgency::High,
            _ => Urgency::Routine,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Routine => "routine",
        }
    }

    /// Upper-cased form shown in the recommendations table.
    pub fn label(self) -> String {
        self.as_str().to_ascii_uppercase()
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recommendation {
    pub test: String,
    pub reason: String,
    pub urgency: Urgency,
    /// Percentage in `0..=100`.
    pub confidence: f32,
    pub explanation: Option<String>,
    pub contraindications: Vec<String>,
}

impl Recommendation {
    pub fn new(test: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            test: test.into(),
            reason: reason.into(),
            ..Self::default()
        }
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// Percentage in `0..=100`; out-of-range values are clamped.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = clamp_confidence(confidence);
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn with_contraindications<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contraindications = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_details(&self) -> bool {
        self.explanation.as_deref().is_some_and(|e| !e.trim().is_empty())
            || !self.contraindications.is_empty()
    }
}

/// Present when a doctor reviewed or edited the analysis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DoctorReview {
    pub reviewer: Option<String>,
    pub notes: Option<String>,
}

impl DoctorReview {
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    pub fn reviewer(&self) -> Option<&str> {
        self.reviewer.as_deref().map(str::trim).filter(|r| !r.is_empty())
    }
}

/// Everything a report is generated from. The generator only reads it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub patient_label: String,
    pub date_label: String,
    /// Percentage in `0..=100`.
    pub confidence_score: f32,
    pub entities: HashMap<EntityCategory, Vec<String>>,
    pub recommendations: Vec<Recommendation>,
    pub warnings: Vec<String>,
    pub review: Option<DoctorReview>,
}

impl AnalysisRecord {
    pub fn new(patient_label: impl Into<String>, date_label: impl Into<String>) -> Self {
        Self {
            patient_label: patient_label.into(),
            date_label: date_label.into(),
            ..Self::default()
        }
    }

    /// Percentage in `0..=100`; out-of-range values are clamped.
    pub fn with_confidence(mut self, score: f32) -> Self {
        self.confidence_score = clamp_confidence(score);
        self
    }

    pub fn with_entities<I, S>(mut self, category: EntityCategory, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities
            .insert(category, items.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_recommendation(mut self, recommendation: Recommendation) -> Self {
        self.recommendations.push(recommendation);
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_review(mut self, review: DoctorReview) -> Self {
        self.review = Some(review);
        self
    }

    /// Items of one category; empty when the category is absent.
    pub fn entities(&self, category: EntityCategory) -> &[String] {
        self.entities.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_entities(&self) -> bool {
        EntityCategory::ALL
            .iter()
            .any(|c| !self.entities(*c).is_empty())
    }
}

/// Clamps a percentage onto `0..=100`. Non-finite input yields 0.
pub fn clamp_confidence(raw: f32) -> f32 {
    if !raw.is_finite() {
        return 0.0;
    }
    raw.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_keep_declared_order() {
        let labels: Vec<_> = EntityCategory::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            ["Symptoms", "Diagnoses", "Medications", "Tests", "Vitals"]
        );
        assert_eq!(EntityCategory::from_key(" Vitals"), Some(EntityCategory::Vitals));
        assert_eq!(EntityCategory::from_key("allergies"), None);
    }

    #[test]
    fn urgency_parsing() {
        assert_eq!(Urgency::parse("HIGH"), Urgency::High);
        assert_eq!(Urgency::parse("urgent"), Urgency::High);
        assert_eq!(Urgency::parse("emergent"), Urgency::High);
        assert_eq!(Urgency::parse(" low "), Urgency::Low);
        assert_eq!(Urgency::parse("medium"), Urgency::Medium);
        assert_eq!(Urgency::parse("whenever"), Urgency::Routine);
        assert_eq!(Urgency::parse(""), Urgency::Routine);
        assert_eq!(Urgency::Medium.label(), "MEDIUM");
    }

    #[test]
    fn confidence_is_a_percentage() {
        assert_eq!(clamp_confidence(0.92), 0.92);
        assert_eq!(clamp_confidence(1.0), 1.0);
        assert_eq!(clamp_confidence(0.0), 0.0);
        assert_eq!(clamp_confidence(85.0), 85.0);
        assert_eq!(clamp_confidence(9200.0), 100.0);
        assert_eq!(clamp_confidence(-3.0), 0.0);
        assert_eq!(clamp_confidence(f32::NAN), 0.0);
        assert_eq!(clamp_confidence(f32::INFINITY), 0.0);

        assert_eq!(AnalysisRecord::new("p", "d").with_confidence(1.0).confidence_score, 1.0);
        assert_eq!(Recommendation::new("CBC", "x").with_confidence(0.4).confidence, 0.4);
    }

    #[test]
    fn missing_category_reads_as_empty() {
        let record = AnalysisRecord::new("A", "B")
            .with_entities(EntityCategory::Symptoms, Vec::<String>::new());
        assert!(record.entities(EntityCategory::Vitals).is_empty());
        assert!(!record.has_entities());

        let record = record.with_entities(EntityCategory::Tests, ["CBC"]);
        assert!(record.has_entities());
        assert_eq!(record.entities(EntityCategory::Tests), ["CBC".to_string()]);
    }

    #[test]
    fn recommendation_details() {
        assert!(!Recommendation::new("CBC", "x").has_details());
        assert!(!Recommendation::new("CBC", "x").with_explanation("  ").has_details());
        assert!(Recommendation::new("CBC", "x").with_explanation("why").has_details());
        assert!(
            Recommendation::new("CBC", "x")
                .with_contraindications(["pregnancy"])
                .has_details()
        );
    }
}
