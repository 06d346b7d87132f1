//! Vital-sign form parsing.
//!
//! The intake form submits every measurement as a string, exactly as HTML
//! inputs post them: untouched fields arrive as empty strings. [`VitalSignsForm`]
//! is that raw shape; [`VitalSignsForm::parse`] is the explicit
//! parse-and-validate step that turns it into a typed [`VitalSigns`] or a
//! per-field error map. Empty and malformed values are reported, never
//! coerced to zero.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use klinik_core::{FieldErrors, VitalSigns};

/// Raw vitals exactly as the intake form submits them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VitalSignsForm {
    #[serde(default)]
    pub blood_pressure_systolic: String,
    #[serde(default)]
    pub blood_pressure_diastolic: String,
    #[serde(default)]
    pub temperature: String,
    #[serde(default)]
    pub pulse: String,
    #[serde(default)]
    pub respiratory_rate: String,
    #[serde(default)]
    pub oxygen_saturation: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub height: String,
}

impl VitalSignsForm {
    /// Parses and validates the form into a typed [`VitalSigns`].
    ///
    /// # Errors
    ///
    /// Returns a [`FieldErrors`] map naming every offending field:
    /// - required field empty or whitespace-only → "is required"
    /// - non-numeric content → "must be a number" / "must be a whole number"
    /// - plausibility violations from [`VitalSigns::new`] (range messages)
    pub fn parse(&self) -> Result<VitalSigns, FieldErrors> {
        let mut errors = FieldErrors::new();

        let systolic = required(
            &mut errors,
            "blood_pressure_systolic",
            &self.blood_pressure_systolic,
        );
        let diastolic = required(
            &mut errors,
            "blood_pressure_diastolic",
            &self.blood_pressure_diastolic,
        );
        let temperature: Option<f32> = required(&mut errors, "temperature", &self.temperature);
        let pulse = required(&mut errors, "pulse", &self.pulse);
        let respiratory_rate = required(&mut errors, "respiratory_rate", &self.respiratory_rate);
        let oxygen_saturation: Option<u8> =
            required(&mut errors, "oxygen_saturation", &self.oxygen_saturation);
        let weight: Option<f32> = optional(&mut errors, "weight", &self.weight);
        let height: Option<f32> = optional(&mut errors, "height", &self.height);

        let (
            Some(systolic),
            Some(diastolic),
            Some(temperature),
            Some(pulse),
            Some(respiratory_rate),
            Some(oxygen_saturation),
        ) = (
            systolic,
            diastolic,
            temperature,
            pulse,
            respiratory_rate,
            oxygen_saturation,
        )
        else {
            return Err(errors);
        };
        if !errors.is_empty() {
            // Required readings parsed, but an optional one was malformed.
            return Err(errors);
        }

        let vitals = VitalSigns::new(
            systolic,
            diastolic,
            temperature,
            pulse,
            respiratory_rate,
            oxygen_saturation,
        )?;
        vitals.with_body_measurements(weight, height)
    }

    /// Renders typed vitals back into the all-string form shape the backend
    /// stores and returns.
    pub fn from_vitals(vitals: &VitalSigns) -> Self {
        Self {
            blood_pressure_systolic: vitals.systolic().to_string(),
            blood_pressure_diastolic: vitals.diastolic().to_string(),
            temperature: vitals.temperature().to_string(),
            pulse: vitals.pulse().to_string(),
            respiratory_rate: vitals.respiratory_rate().to_string(),
            oxygen_saturation: vitals.oxygen_saturation().to_string(),
            weight: vitals.weight().map(|w| w.to_string()).unwrap_or_default(),
            height: vitals.height().map(|h| h.to_string()).unwrap_or_default(),
        }
    }
}

fn required<T: FromStr>(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        // Missing is missing, not zero.
        errors.push(field, "is required");
        return None;
    }
    match trimmed.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(field, "must be a number");
            None
        }
    }
}

fn optional<T: FromStr>(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(field, "must be a number");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> VitalSignsForm {
        VitalSignsForm {
            blood_pressure_systolic: "120".into(),
            blood_pressure_diastolic: "80".into(),
            temperature: "36.5".into(),
            pulse: "70".into(),
            respiratory_rate: "16".into(),
            oxygen_saturation: "99".into(),
            weight: String::new(),
            height: String::new(),
        }
    }

    #[test]
    fn parses_a_complete_form() {
        let vitals = complete_form().parse().expect("form is complete");
        assert_eq!(vitals.systolic(), 120);
        assert_eq!(vitals.temperature(), 36.5);
        assert_eq!(vitals.oxygen_saturation(), 99);
        assert!(vitals.weight().is_none());
    }

    #[test]
    fn empty_oxygen_saturation_is_required_not_zero() {
        // The unsafe coercion would read "" as 0% and force a red triage;
        // the parser must report the field instead.
        let mut form = complete_form();
        form.oxygen_saturation = String::new();

        let err = form.parse().expect_err("missing required reading");
        assert_eq!(
            err.messages("oxygen_saturation"),
            Some(&["is required".to_string()][..])
        );
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut form = complete_form();
        form.pulse = "   ".into();

        let err = form.parse().expect_err("whitespace is not a reading");
        assert_eq!(err.messages("pulse"), Some(&["is required".to_string()][..]));
    }

    #[test]
    fn non_numeric_input_is_reported_per_field() {
        let mut form = complete_form();
        form.temperature = "febrile".into();
        form.pulse = "7O".into(); // letter O typo

        let err = form.parse().expect_err("malformed numbers");
        assert_eq!(
            err.messages("temperature"),
            Some(&["must be a number".to_string()][..])
        );
        assert_eq!(
            err.messages("pulse"),
            Some(&["must be a number".to_string()][..])
        );
    }

    #[test]
    fn implausible_values_fail_the_range_check() {
        let mut form = complete_form();
        form.oxygen_saturation = "150".into();

        let err = form.parse().expect_err("150% is implausible");
        assert!(err.messages("oxygen_saturation").is_some());
    }

    #[test]
    fn optional_fields_parse_when_present() {
        let mut form = complete_form();
        form.weight = "70.5".into();
        form.height = "175".into();

        let vitals = form.parse().expect("optional fields are valid");
        assert_eq!(vitals.weight(), Some(70.5));
        assert_eq!(vitals.height(), Some(175.0));
    }

    #[test]
    fn malformed_optional_field_is_still_an_error() {
        let mut form = complete_form();
        form.weight = "heavy".into();

        let err = form.parse().expect_err("weight is malformed");
        assert_eq!(
            err.messages("weight"),
            Some(&["must be a number".to_string()][..])
        );
    }

    #[test]
    fn non_finite_optional_field_is_rejected() {
        // "NaN" and "inf" parse as valid f32 values, so the plausibility
        // check has to catch them; they must never reach the backend.
        let mut form = complete_form();
        form.weight = "NaN".into();
        form.height = "inf".into();

        let err = form.parse().expect_err("non-finite measurements");
        assert_eq!(
            err.messages("weight"),
            Some(&["must be greater than 0 and at most 500 kg".to_string()][..])
        );
        assert_eq!(
            err.messages("height"),
            Some(&["must be greater than 0 and at most 300 cm".to_string()][..])
        );
    }

    #[test]
    fn round_trips_through_the_form_shape() {
        let mut form = complete_form();
        form.weight = "70.5".into();
        let vitals = form.parse().expect("form is valid");

        let rendered = VitalSignsForm::from_vitals(&vitals);
        let reparsed = rendered.parse().expect("rendered form is valid");
        assert_eq!(vitals, reparsed);
    }
}
