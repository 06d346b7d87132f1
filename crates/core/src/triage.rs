//! Rule-based triage classification.
//!
//! Derives a clinical urgency level from intake data, deterministically and
//! without side effects. Tiers are evaluated in priority order (red before
//! yellow before green); a patient matching criteria from more than one tier
//! always receives the most urgent one. The thresholds live in
//! [`crate::constants`].

use std::collections::BTreeSet;
use std::fmt;

use klinik_types::PainScale;

use crate::constants::{
    RED_OXYGEN_SATURATION_UNDER, RED_PAIN_MIN, RED_PULSE_OVER, RED_TEMPERATURE_MIN,
    YELLOW_PAIN_MIN, YELLOW_PULSE_OVER, YELLOW_TEMPERATURE_MIN,
};
use crate::vitals::VitalSigns;

/// Clinical urgency derived from vitals, pain and symptoms.
///
/// Ordering follows urgency: `Green < Yellow < Red`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TriageLevel {
    /// Routine: no urgent or emergency criteria met.
    Green,
    /// Urgent: should be seen soon.
    Yellow,
    /// Emergency: immediate attention.
    Red,
}

impl TriageLevel {
    /// Wire label for this level.
    pub fn as_str(self) -> &'static str {
        match self {
            TriageLevel::Green => "green",
            TriageLevel::Yellow => "yellow",
            TriageLevel::Red => "red",
        }
    }

    /// Parse a wire label back into a level.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "green" => Some(TriageLevel::Green),
            "yellow" => Some(TriageLevel::Yellow),
            "red" => Some(TriageLevel::Red),
            _ => None,
        }
    }
}

impl fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Symptom labels offered on the screening form.
///
/// Wire labels are the Indonesian strings the backend stores. Labels outside
/// the predefined set are carried through as [`Symptom::Other`] and never
/// trigger a triage tier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symptom {
    /// "Demam"
    Fever,
    /// "Batuk"
    Cough,
    /// "Pilek"
    RunnyNose,
    /// "Sakit kepala"
    Headache,
    /// "Mual"
    Nausea,
    /// "Muntah"
    Vomiting,
    /// "Diare"
    Diarrhea,
    /// "Nyeri dada"
    ChestPain,
    /// "Sesak napas"
    ShortnessOfBreath,
    /// "Pusing"
    Dizziness,
    /// "Lemas"
    Fatigue,
    /// "Nyeri perut"
    AbdominalPain,
    /// A label outside the predefined set, preserved verbatim.
    Other(String),
}

impl Symptom {
    /// The wire label stored by the backend.
    pub fn label(&self) -> &str {
        match self {
            Symptom::Fever => "Demam",
            Symptom::Cough => "Batuk",
            Symptom::RunnyNose => "Pilek",
            Symptom::Headache => "Sakit kepala",
            Symptom::Nausea => "Mual",
            Symptom::Vomiting => "Muntah",
            Symptom::Diarrhea => "Diare",
            Symptom::ChestPain => "Nyeri dada",
            Symptom::ShortnessOfBreath => "Sesak napas",
            Symptom::Dizziness => "Pusing",
            Symptom::Fatigue => "Lemas",
            Symptom::AbdominalPain => "Nyeri perut",
            Symptom::Other(label) => label,
        }
    }

    /// Parse a wire label; unrecognised labels become [`Symptom::Other`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "Demam" => Symptom::Fever,
            "Batuk" => Symptom::Cough,
            "Pilek" => Symptom::RunnyNose,
            "Sakit kepala" => Symptom::Headache,
            "Mual" => Symptom::Nausea,
            "Muntah" => Symptom::Vomiting,
            "Diare" => Symptom::Diarrhea,
            "Nyeri dada" => Symptom::ChestPain,
            "Sesak napas" => Symptom::ShortnessOfBreath,
            "Pusing" => Symptom::Dizziness,
            "Lemas" => Symptom::Fatigue,
            "Nyeri perut" => Symptom::AbdominalPain,
            other => Symptom::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a patient's urgency from intake data.
///
/// Pure and deterministic: identical inputs always yield the identical level.
/// Because [`VitalSigns`] is complete by construction, an absent reading can
/// never reach this function as a zero and spuriously trigger a tier.
///
/// # Tiers
///
/// * **Red** - pain ≥ 8, chest pain, shortness of breath, temperature
///   ≥ 39.0 °C, pulse > 120 bpm, or SpO2 < 95 %.
/// * **Yellow** - no red criterion and: pain ≥ 5, fever or vomiting reported,
///   temperature ≥ 38.0 °C, or pulse > 100 bpm.
/// * **Green** - otherwise.
pub fn classify(vitals: &VitalSigns, pain: PainScale, symptoms: &BTreeSet<Symptom>) -> TriageLevel {
    let red = pain.value() >= RED_PAIN_MIN
        || symptoms.contains(&Symptom::ChestPain)
        || symptoms.contains(&Symptom::ShortnessOfBreath)
        || vitals.temperature() >= RED_TEMPERATURE_MIN
        || vitals.pulse() > RED_PULSE_OVER
        || vitals.oxygen_saturation() < RED_OXYGEN_SATURATION_UNDER;
    if red {
        return TriageLevel::Red;
    }

    let yellow = pain.value() >= YELLOW_PAIN_MIN
        || symptoms.contains(&Symptom::Fever)
        || symptoms.contains(&Symptom::Vomiting)
        || vitals.temperature() >= YELLOW_TEMPERATURE_MIN
        || vitals.pulse() > YELLOW_PULSE_OVER;
    if yellow {
        TriageLevel::Yellow
    } else {
        TriageLevel::Green
    }
}
