//! Screening record assembly.
//!
//! One nursing intake pass for one patient visit. A [`ScreeningDraft`] is the
//! mutable record the nurse fills in while screening; [`ScreeningDraft::finalize`]
//! validates the draft, derives the triage level and produces an immutable
//! [`ScreeningRecord`] ready for submission. The triage level is always
//! recomputed from the current vitals, pain and symptoms; it is never entered
//! by a human.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use klinik_types::{NonEmptyText, PainScale};
use uuid::Uuid;

use crate::error::{KlinikError, KlinikResult};
use crate::triage::{classify, Symptom, TriageLevel};
use crate::validation::FieldErrors;
use crate::vitals::VitalSigns;

/// A screening in progress.
///
/// Mutable only while the nurse conducting the screening is filling it in.
/// Nothing here is validated yet; validation happens at [`Self::finalize`].
#[derive(Clone, Debug)]
pub struct ScreeningDraft {
    patient_id: Uuid,
    chief_complaint: String,
    pain_scale: u8,
    symptoms: BTreeSet<Symptom>,
    vitals: Option<VitalSigns>,
    medical_history: Option<String>,
    current_medications: Option<String>,
    allergies: Option<String>,
    notes: Option<String>,
}

impl ScreeningDraft {
    /// Starts a fresh draft for the given patient.
    pub fn new(patient_id: Uuid) -> Self {
        Self {
            patient_id,
            chief_complaint: String::new(),
            pain_scale: 0,
            symptoms: BTreeSet::new(),
            vitals: None,
            medical_history: None,
            current_medications: None,
            allergies: None,
            notes: None,
        }
    }

    pub fn patient_id(&self) -> Uuid {
        self.patient_id
    }

    pub fn set_chief_complaint(&mut self, text: impl Into<String>) {
        self.chief_complaint = text.into();
    }

    pub fn set_pain_scale(&mut self, value: u8) {
        self.pain_scale = value;
    }

    pub fn set_symptoms(&mut self, symptoms: BTreeSet<Symptom>) {
        self.symptoms = symptoms;
    }

    pub fn add_symptom(&mut self, symptom: Symptom) {
        self.symptoms.insert(symptom);
    }

    pub fn set_vitals(&mut self, vitals: VitalSigns) {
        self.vitals = Some(vitals);
    }

    pub fn set_medical_history(&mut self, text: impl Into<String>) {
        self.medical_history = Some(text.into());
    }

    pub fn set_current_medications(&mut self, text: impl Into<String>) {
        self.current_medications = Some(text.into());
    }

    pub fn set_allergies(&mut self, text: impl Into<String>) {
        self.allergies = Some(text.into());
    }

    pub fn set_notes(&mut self, text: impl Into<String>) {
        self.notes = Some(text.into());
    }

    /// The triage level the draft would currently receive.
    ///
    /// Recomputed on every call from the draft's current vitals, pain and
    /// symptoms, so it always reflects the latest edits. Returns `None` while
    /// vitals are missing or the pain rating is out of range: the draft is in
    /// "incomplete" mode and cannot be classified yet.
    pub fn triage_preview(&self) -> Option<TriageLevel> {
        self.triage_level().ok()
    }

    /// Classifies the draft, reporting why when it cannot be classified.
    ///
    /// # Errors
    ///
    /// * [`KlinikError::VitalsIncomplete`] - vitals have not been recorded.
    /// * [`KlinikError::Validation`] - the pain rating is outside 0-10.
    pub fn triage_level(&self) -> KlinikResult<TriageLevel> {
        let Some(vitals) = self.vitals.as_ref() else {
            return Err(KlinikError::VitalsIncomplete);
        };
        let pain = PainScale::new(self.pain_scale).map_err(|_| {
            let mut errors = FieldErrors::new();
            errors.push("pain_scale", "pain scale must be between 0 and 10");
            KlinikError::Validation(errors)
        })?;
        Ok(classify(vitals, pain, &self.symptoms))
    }

    /// Validates the draft and assembles the final, immutable record.
    ///
    /// On success the derived triage level is embedded in the returned
    /// [`ScreeningRecord`]. On failure every violated field is reported in a
    /// [`FieldErrors`] map so the form can render messages next to each input.
    ///
    /// # Errors
    ///
    /// * `chief_complaint` - empty or whitespace-only.
    /// * `pain_scale` - outside 0-10.
    /// * `vital_signs` - not recorded yet.
    pub fn finalize(self, recorded_at: DateTime<Utc>) -> Result<ScreeningRecord, FieldErrors> {
        let mut errors = FieldErrors::new();

        let chief_complaint = match NonEmptyText::new(&self.chief_complaint) {
            Ok(text) => Some(text),
            Err(_) => {
                errors.push("chief_complaint", "chief complaint is required");
                None
            }
        };

        let pain_scale = match PainScale::new(self.pain_scale) {
            Ok(pain) => Some(pain),
            Err(_) => {
                errors.push("pain_scale", "pain scale must be between 0 and 10");
                None
            }
        };

        if self.vitals.is_none() {
            errors.push("vital_signs", "vital signs must be recorded before submitting");
        }

        let (Some(chief_complaint), Some(pain_scale), Some(vitals)) =
            (chief_complaint, pain_scale, self.vitals)
        else {
            return Err(errors);
        };

        let triage_level = classify(&vitals, pain_scale, &self.symptoms);

        Ok(ScreeningRecord {
            patient_id: self.patient_id,
            chief_complaint,
            pain_scale,
            symptoms: self.symptoms,
            vitals,
            medical_history: self.medical_history,
            current_medications: self.current_medications,
            allergies: self.allergies,
            notes: self.notes,
            triage_level,
            recorded_at,
        })
    }
}

/// A finalized screening record.
///
/// Immutable once assembled: every field is read-only, and the triage level
/// was derived during finalization from the vitals, pain and symptoms it
/// carries.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreeningRecord {
    patient_id: Uuid,
    chief_complaint: NonEmptyText,
    pain_scale: PainScale,
    symptoms: BTreeSet<Symptom>,
    vitals: VitalSigns,
    medical_history: Option<String>,
    current_medications: Option<String>,
    allergies: Option<String>,
    notes: Option<String>,
    triage_level: TriageLevel,
    recorded_at: DateTime<Utc>,
}

impl ScreeningRecord {
    pub fn patient_id(&self) -> Uuid {
        self.patient_id
    }

    pub fn chief_complaint(&self) -> &NonEmptyText {
        &self.chief_complaint
    }

    pub fn pain_scale(&self) -> PainScale {
        self.pain_scale
    }

    pub fn symptoms(&self) -> &BTreeSet<Symptom> {
        &self.symptoms
    }

    pub fn vitals(&self) -> &VitalSigns {
        &self.vitals
    }

    pub fn medical_history(&self) -> Option<&str> {
        self.medical_history.as_deref()
    }

    pub fn current_medications(&self) -> Option<&str> {
        self.current_medications.as_deref()
    }

    pub fn allergies(&self) -> Option<&str> {
        self.allergies.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// The derived urgency classification.
    pub fn triage_level(&self) -> TriageLevel {
        self.triage_level
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_vitals() -> VitalSigns {
        VitalSigns::new(120, 80, 36.5, 70, 16, 99).expect("normal vitals are valid")
    }

    fn complete_draft() -> ScreeningDraft {
        let mut draft = ScreeningDraft::new(Uuid::new_v4());
        draft.set_chief_complaint("Demam sejak dua hari");
        draft.set_pain_scale(2);
        draft.set_vitals(normal_vitals());
        draft
    }

    #[test]
    fn finalize_embeds_the_derived_level() {
        let mut draft = complete_draft();
        draft.add_symptom(Symptom::Fever);

        let record = draft.finalize(Utc::now()).expect("draft is complete");
        assert_eq!(record.triage_level(), TriageLevel::Yellow);
        assert_eq!(record.chief_complaint().as_str(), "Demam sejak dua hari");
    }

    #[test]
    fn finalize_rejects_blank_chief_complaint() {
        let mut draft = complete_draft();
        draft.set_chief_complaint("   ");

        let err = draft.finalize(Utc::now()).expect_err("blank complaint");
        assert!(err.messages("chief_complaint").is_some());
    }

    #[test]
    fn finalize_rejects_missing_vitals() {
        let mut draft = ScreeningDraft::new(Uuid::new_v4());
        draft.set_chief_complaint("Nyeri kepala");

        let err = draft.finalize(Utc::now()).expect_err("no vitals recorded");
        assert!(err.messages("vital_signs").is_some());
    }

    #[test]
    fn finalize_rejects_out_of_range_pain() {
        let mut draft = complete_draft();
        draft.set_pain_scale(11);

        let err = draft.finalize(Utc::now()).expect_err("pain out of range");
        assert!(err.messages("pain_scale").is_some());
    }

    #[test]
    fn finalize_reports_all_violations_together() {
        let mut draft = ScreeningDraft::new(Uuid::new_v4());
        draft.set_pain_scale(12);

        let err = draft.finalize(Utc::now()).expect_err("several violations");
        assert_eq!(err.len(), 3);
        assert!(err.messages("chief_complaint").is_some());
        assert!(err.messages("pain_scale").is_some());
        assert!(err.messages("vital_signs").is_some());
    }

    #[test]
    fn preview_is_unavailable_until_vitals_arrive() {
        let mut draft = ScreeningDraft::new(Uuid::new_v4());
        draft.set_chief_complaint("Sesak");
        assert_eq!(draft.triage_preview(), None);

        draft.set_vitals(normal_vitals());
        assert_eq!(draft.triage_preview(), Some(TriageLevel::Green));
    }

    #[test]
    fn preview_tracks_every_edit() {
        let mut draft = complete_draft();
        assert_eq!(draft.triage_preview(), Some(TriageLevel::Green));

        draft.set_pain_scale(6);
        assert_eq!(draft.triage_preview(), Some(TriageLevel::Yellow));

        draft.add_symptom(Symptom::ChestPain);
        assert_eq!(draft.triage_preview(), Some(TriageLevel::Red));
    }

    #[test]
    fn preview_is_unavailable_while_pain_is_out_of_range() {
        let mut draft = complete_draft();
        draft.set_pain_scale(99);
        assert_eq!(draft.triage_preview(), None);
    }

    #[test]
    fn triage_level_names_the_reason_the_draft_cannot_classify() {
        let mut draft = ScreeningDraft::new(Uuid::new_v4());
        draft.set_chief_complaint("Sesak");
        assert!(matches!(
            draft.triage_level(),
            Err(KlinikError::VitalsIncomplete)
        ));

        draft.set_vitals(normal_vitals());
        draft.set_pain_scale(99);
        match draft.triage_level() {
            Err(KlinikError::Validation(errors)) => {
                assert!(errors.messages("pain_scale").is_some());
            }
            other => panic!("expected a validation error, got {other:?}"),
        }

        draft.set_pain_scale(2);
        assert!(matches!(draft.triage_level(), Ok(TriageLevel::Green)));
    }
}
