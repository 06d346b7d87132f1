//! Screening submission wire model.
//!
//! The backend accepts one JSON document per finalized screening. The triage
//! level travels on the wire for display, but it is a derived field: parsing
//! recomputes it from the embedded vitals, pain and symptoms and rejects a
//! document whose stored level disagrees.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use klinik_core::{ScreeningDraft, ScreeningRecord, Symptom, TriageLevel};

use crate::vitals::VitalSignsForm;
use crate::{from_json, parse_uuid, WireError, WireResult};

/// Wire representation of a screening submission.
///
/// This is the exact structure serialised to/from JSON.
/// All fields use `#[serde(deny_unknown_fields)]` for strict validation.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ScreeningWire {
    pub patient_id: String,

    pub chief_complaint: String,

    pub pain_scale: u8,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symptoms: Vec<String>,

    pub vital_signs: VitalSignsForm,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_medications: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,

    pub triage_level: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Parse a screening submission from JSON text.
///
/// # Errors
///
/// Returns [`WireError`] if:
/// - the JSON does not match the wire schema (with a field path),
/// - the patient id is not a valid UUID,
/// - the vitals or screening fields fail validation ([`WireError::Validation`]
///   carrying the per-field map),
/// - the stored triage level is unknown or disagrees with the level derived
///   from the embedded data.
pub fn parse(json_text: &str) -> WireResult<ScreeningRecord> {
    let wire: ScreeningWire = from_json("Screening submission", json_text)?;
    wire_to_domain(wire)
}

/// Render a finalized screening record as JSON text.
///
/// # Errors
///
/// Returns [`WireError`] if serialisation fails.
pub fn render(record: &ScreeningRecord) -> WireResult<String> {
    let wire = domain_to_wire(record);
    serde_json::to_string_pretty(&wire)
        .map_err(|e| WireError::Translation(format!("Failed to serialise screening: {e}")))
}

fn wire_to_domain(wire: ScreeningWire) -> WireResult<ScreeningRecord> {
    let patient_id = parse_uuid("patient_id", &wire.patient_id)?;
    let vitals = wire.vital_signs.parse().map_err(WireError::Validation)?;

    let mut draft = ScreeningDraft::new(patient_id);
    draft.set_chief_complaint(&wire.chief_complaint);
    draft.set_pain_scale(wire.pain_scale);
    draft.set_symptoms(
        wire.symptoms
            .iter()
            .map(|label| Symptom::from_label(label))
            .collect(),
    );
    draft.set_vitals(vitals);
    if let Some(text) = wire.medical_history {
        draft.set_medical_history(text);
    }
    if let Some(text) = wire.current_medications {
        draft.set_current_medications(text);
    }
    if let Some(text) = wire.allergies {
        draft.set_allergies(text);
    }
    if let Some(text) = wire.notes {
        draft.set_notes(text);
    }

    let record = draft.finalize(Utc::now()).map_err(WireError::Validation)?;

    // The stored level is display-only; the derived one is authoritative.
    let stored = TriageLevel::parse(&wire.triage_level).ok_or_else(|| {
        WireError::InvalidInput(format!("Unknown triage level '{}'", wire.triage_level))
    })?;
    if stored != record.triage_level() {
        return Err(WireError::Translation(format!(
            "Stored triage level '{stored}' does not match derived level '{}'",
            record.triage_level()
        )));
    }

    Ok(record)
}

fn domain_to_wire(record: &ScreeningRecord) -> ScreeningWire {
    ScreeningWire {
        patient_id: record.patient_id().to_string(),
        chief_complaint: record.chief_complaint().as_str().to_owned(),
        pain_scale: record.pain_scale().value(),
        symptoms: record
            .symptoms()
            .iter()
            .map(|symptom| symptom.label().to_owned())
            .collect(),
        vital_signs: VitalSignsForm::from_vitals(record.vitals()),
        medical_history: record.medical_history().map(str::to_owned),
        current_medications: record.current_medications().map(str::to_owned),
        allergies: record.allergies().map(str::to_owned),
        triage_level: record.triage_level().as_str().to_owned(),
        notes: record.notes().map(str::to_owned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json(triage_level: &str) -> String {
        format!(
            r#"{{
  "patient_id": "a4f91c6d-3b2e-4c5f-9d7a-1e8b6c0a9f12",
  "chief_complaint": "Demam tinggi sejak kemarin",
  "pain_scale": 2,
  "symptoms": ["Demam", "Batuk"],
  "vital_signs": {{
    "blood_pressure_systolic": "110",
    "blood_pressure_diastolic": "70",
    "temperature": "38.4",
    "pulse": "88",
    "respiratory_rate": "18",
    "oxygen_saturation": "98",
    "weight": "",
    "height": ""
  }},
  "triage_level": "{triage_level}"
}}"#
        )
    }

    #[test]
    fn parses_a_valid_submission() {
        let record = parse(&sample_json("yellow")).expect("submission is valid");
        assert_eq!(record.triage_level(), TriageLevel::Yellow);
        assert_eq!(record.chief_complaint().as_str(), "Demam tinggi sejak kemarin");
        assert!(record.symptoms().contains(&Symptom::Fever));
    }

    #[test]
    fn round_trips_through_json() {
        let record = parse(&sample_json("yellow")).expect("submission is valid");
        let output = render(&record).expect("render screening");
        let reparsed = parse(&output).expect("reparse rendered screening");
        assert_eq!(record.triage_level(), reparsed.triage_level());
        assert_eq!(record.vitals(), reparsed.vitals());
        assert_eq!(record.symptoms(), reparsed.symptoms());
    }

    #[test]
    fn rejects_a_stored_level_that_disagrees() {
        // The embedded data derives yellow; a green claim must not pass.
        let err = parse(&sample_json("green")).expect_err("stored level is wrong");
        match err {
            WireError::Translation(msg) => {
                assert!(msg.contains("green"));
                assert!(msg.contains("yellow"));
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_an_unknown_level_label() {
        let err = parse(&sample_json("purple")).expect_err("no such level");
        match err {
            WireError::InvalidInput(msg) => assert!(msg.contains("purple")),
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn strict_validation_rejects_unknown_keys() {
        let input = sample_json("yellow").replace(
            "\"pain_scale\": 2,",
            "\"pain_scale\": 2,\n  \"unexpected_key\": true,",
        );

        let err = parse(&input).expect_err("should reject unknown key");
        match err {
            WireError::Translation(msg) => assert!(msg.contains("unexpected_key")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_an_invalid_patient_id() {
        let input = sample_json("yellow")
            .replace("a4f91c6d-3b2e-4c5f-9d7a-1e8b6c0a9f12", "not-a-valid-uuid");

        let err = parse(&input).expect_err("should reject invalid patient_id");
        match err {
            WireError::InvalidUuid(msg) => assert!(msg.contains("patient_id")),
            other => panic!("expected InvalidUuid error, got {other:?}"),
        }
    }

    #[test]
    fn surfaces_vitals_errors_as_a_field_map() {
        let input = sample_json("yellow").replace(
            "\"oxygen_saturation\": \"98\"",
            "\"oxygen_saturation\": \"\"",
        );

        let err = parse(&input).expect_err("missing oxygen saturation");
        match err {
            WireError::Validation(errors) => {
                assert!(errors.messages("oxygen_saturation").is_some());
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }
}
