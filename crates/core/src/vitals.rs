//! Vital-sign measurements.
//!
//! A [`VitalSigns`] value is a snapshot of the physiological readings taken at
//! intake. It is immutable once constructed: re-measuring a patient produces a
//! new `VitalSigns`, it never mutates a previous one. Construction goes through
//! [`VitalSigns::new`], which range-checks every reading, so a value of this
//! type always carries a complete, plausible set of required measurements.
//! A missing reading therefore cannot masquerade as a zero anywhere downstream.

use crate::validation::FieldErrors;

// Plausible physiological ranges, inclusive. Readings outside these are
// treated as data-entry mistakes, not clinical findings.
const SYSTOLIC_MIN: u16 = 40;
const SYSTOLIC_MAX: u16 = 300;
const DIASTOLIC_MIN: u16 = 20;
const DIASTOLIC_MAX: u16 = 200;
const TEMPERATURE_MIN: f32 = 25.0;
const TEMPERATURE_MAX: f32 = 45.0;
const PULSE_MIN: u16 = 1;
const PULSE_MAX: u16 = 250;
const RESPIRATORY_RATE_MIN: u16 = 1;
const RESPIRATORY_RATE_MAX: u16 = 80;
const OXYGEN_SATURATION_MAX: u8 = 100;
const WEIGHT_MAX_KG: f32 = 500.0;
const HEIGHT_MAX_CM: f32 = 300.0;

/// One snapshot of physiological measurements.
#[derive(Clone, Debug, PartialEq)]
pub struct VitalSigns {
    systolic: u16,
    diastolic: u16,
    temperature: f32,
    pulse: u16,
    respiratory_rate: u16,
    oxygen_saturation: u8,
    weight: Option<f32>,
    height: Option<f32>,
}

impl VitalSigns {
    /// Creates a new `VitalSigns` from the required readings.
    ///
    /// # Arguments
    ///
    /// * `systolic` - Systolic blood pressure in mmHg.
    /// * `diastolic` - Diastolic blood pressure in mmHg.
    /// * `temperature` - Body temperature in °C.
    /// * `pulse` - Pulse in beats per minute.
    /// * `respiratory_rate` - Breaths per minute.
    /// * `oxygen_saturation` - SpO2 as a whole percentage, 0-100.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldErrors`] map naming every reading outside its
    /// plausible range. Field names match the wire contract
    /// (`blood_pressure_systolic`, `pulse`, ...), so the map can be rendered
    /// directly against the intake form.
    pub fn new(
        systolic: u16,
        diastolic: u16,
        temperature: f32,
        pulse: u16,
        respiratory_rate: u16,
        oxygen_saturation: u8,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        if !(SYSTOLIC_MIN..=SYSTOLIC_MAX).contains(&systolic) {
            errors.push(
                "blood_pressure_systolic",
                format!("must be between {SYSTOLIC_MIN} and {SYSTOLIC_MAX} mmHg"),
            );
        }
        if !(DIASTOLIC_MIN..=DIASTOLIC_MAX).contains(&diastolic) {
            errors.push(
                "blood_pressure_diastolic",
                format!("must be between {DIASTOLIC_MIN} and {DIASTOLIC_MAX} mmHg"),
            );
        }
        if !(TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&temperature) {
            errors.push(
                "temperature",
                format!("must be between {TEMPERATURE_MIN} and {TEMPERATURE_MAX} °C"),
            );
        }
        if !(PULSE_MIN..=PULSE_MAX).contains(&pulse) {
            errors.push(
                "pulse",
                format!("must be between {PULSE_MIN} and {PULSE_MAX} bpm"),
            );
        }
        if !(RESPIRATORY_RATE_MIN..=RESPIRATORY_RATE_MAX).contains(&respiratory_rate) {
            errors.push(
                "respiratory_rate",
                format!(
                    "must be between {RESPIRATORY_RATE_MIN} and {RESPIRATORY_RATE_MAX} breaths/min"
                ),
            );
        }
        if oxygen_saturation > OXYGEN_SATURATION_MAX {
            errors.push(
                "oxygen_saturation",
                format!("must be between 0 and {OXYGEN_SATURATION_MAX} %"),
            );
        }

        errors.into_result(Self {
            systolic,
            diastolic,
            temperature,
            pulse,
            respiratory_rate,
            oxygen_saturation,
            weight: None,
            height: None,
        })
    }

    /// Attaches the optional body measurements.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldErrors`] map if a provided weight or height is
    /// non-positive or implausibly large.
    pub fn with_body_measurements(
        mut self,
        weight: Option<f32>,
        height: Option<f32>,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        // NaN compares false against both bounds, so non-finite values need
        // their own rejection or they would slip through the range guard.
        if let Some(weight) = weight {
            if !weight.is_finite() || weight <= 0.0 || weight > WEIGHT_MAX_KG {
                errors.push(
                    "weight",
                    format!("must be greater than 0 and at most {WEIGHT_MAX_KG} kg"),
                );
            }
        }
        if let Some(height) = height {
            if !height.is_finite() || height <= 0.0 || height > HEIGHT_MAX_CM {
                errors.push(
                    "height",
                    format!("must be greater than 0 and at most {HEIGHT_MAX_CM} cm"),
                );
            }
        }

        self.weight = weight;
        self.height = height;
        errors.into_result(self)
    }

    /// Systolic blood pressure in mmHg.
    pub fn systolic(&self) -> u16 {
        self.systolic
    }

    /// Diastolic blood pressure in mmHg.
    pub fn diastolic(&self) -> u16 {
        self.diastolic
    }

    /// Body temperature in °C.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Pulse in beats per minute.
    pub fn pulse(&self) -> u16 {
        self.pulse
    }

    /// Breaths per minute.
    pub fn respiratory_rate(&self) -> u16 {
        self.respiratory_rate
    }

    /// Oxygen saturation as a whole percentage.
    pub fn oxygen_saturation(&self) -> u8 {
        self.oxygen_saturation
    }

    /// Weight in kg, when measured.
    pub fn weight(&self) -> Option<f32> {
        self.weight
    }

    /// Height in cm, when measured.
    pub fn height(&self) -> Option<f32> {
        self.height
    }
}
