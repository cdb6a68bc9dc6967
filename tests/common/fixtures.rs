#![allow(dead_code)]

use medreport::{AnalysisRecord, DoctorReview, EntityCategory, Recommendation, Urgency};
use serde_json::{json, Value};

/// A record with nothing but the fixed labels
pub fn empty_record() -> AnalysisRecord {
    AnalysisRecord::new("Patient Report", "01/02/2024")
}

/// One symptom, two recommendations, score 92
pub fn fever_record() -> AnalysisRecord {
    AnalysisRecord::new("Jane Doe", "2024-03-01")
        .with_confidence(92.0)
        .with_entities(EntityCategory::Symptoms, ["fever"])
        .with_recommendation(
            Recommendation::new("Complete Blood Count", "Suspected infection")
                .with_urgency(Urgency::High)
                .with_confidence(88.0),
        )
        .with_recommendation(
            Recommendation::new("Chest X-Ray", "Persistent cough")
                .with_urgency(Urgency::Low)
                .with_confidence(55.0),
        )
}

/// Every category filled, with warnings and a doctor review
pub fn full_record() -> AnalysisRecord {
    AnalysisRecord::new("John Smith", "2024-05-17")
        .with_confidence(76.5)
        .with_entities(EntityCategory::Symptoms, ["headache", "nausea", "blurred vision"])
        .with_entities(EntityCategory::Diagnoses, ["migraine"])
        .with_entities(EntityCategory::Medications, ["ibuprofen 400mg", "sumatriptan"])
        .with_entities(EntityCategory::Tests, ["MRI brain"])
        .with_entities(EntityCategory::Vitals, ["BP 135/85", "HR 78"])
        .with_recommendation(
            Recommendation::new("MRI with contrast", "Rule out structural causes")
                .with_urgency(Urgency::Medium)
                .with_confidence(70.0)
                .with_explanation("Visual symptoms with headache warrant imaging")
                .with_contraindications(["pacemaker", "contrast allergy"]),
        )
        .with_warning("Possible medication overuse headache")
        .with_review(DoctorReview {
            reviewer: Some("Dr. Adams".to_string()),
            notes: Some("Agree with imaging. Follow up in two weeks.".to_string()),
        })
}

/// A record with `count` symptoms, enough to span several pages
pub fn long_record(count: usize) -> AnalysisRecord {
    let items: Vec<String> = (1..=count).map(|i| format!("Observed symptom number {}", i)).collect();
    AnalysisRecord::new("Long Case", "2024-01-01")
        .with_confidence(64.0)
        .with_entities(EntityCategory::Symptoms, items)
        .with_warning("Review all symptoms with a specialist")
}

/// Report JSON as the backend serves it; overall scores are stored as basis points
pub fn backend_report_json() -> Value {
    json!({
        "name": "Maria Garcia",
        "date": "2024-06-10",
        "confidence": 8500,
        "ai_analysis": {
            "entities": {
                "symptoms": ["chest pain", "shortness of breath"],
                "diagnoses": [],
                "vitals": ["SpO2 94%"],
                "functional_impact": ["reduced exercise tolerance"]
            },
            "recommendations": [
                {
                    "test": "ECG",
                    "reason": "Chest pain evaluation",
                    "urgency": "emergent",
                    "confidence": 93,
                    "contraindications": []
                },
                {
                    "test": "Troponin",
                    "reason": "Rule out myocardial injury",
                    "urgency": "urgent",
                    "confidence": 88,
                    "explanation": "Serial troponins detect evolving infarction",
                    "contraindications": []
                }
            ],
            "warnings": ["Seek emergency care if pain worsens"],
            "confidence_score": 8500
        },
        "doctor_review": {
            "reviewed_by": "65f0c1a2b3c4d5e6f7a8b9c0",
            "reviewed_at": "2024-06-11T09:30:00Z",
            "notes": "Sent to emergency department.",
            "doctor_info": {"name": "Lee", "specialization": "Emergency Medicine"}
        }
    })
}
