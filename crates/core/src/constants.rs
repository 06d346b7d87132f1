//! Constants used throughout the klinik core crate.
//!
//! Triage thresholds mirror the clinic's nursing protocol. Red is always
//! evaluated before yellow: a patient matching both tiers is red.

/// Pain scale rating at or above which the patient is classified red.
pub const RED_PAIN_MIN: u8 = 8;

/// Body temperature (°C) at or above which the patient is classified red.
pub const RED_TEMPERATURE_MIN: f32 = 39.0;

/// Pulse (bpm) strictly above which the patient is classified red.
pub const RED_PULSE_OVER: u16 = 120;

/// Oxygen saturation (%) strictly below which the patient is classified red.
pub const RED_OXYGEN_SATURATION_UNDER: u8 = 95;

/// Pain scale rating at or above which the patient is classified yellow.
pub const YELLOW_PAIN_MIN: u8 = 5;

/// Body temperature (°C) at or above which the patient is classified yellow.
pub const YELLOW_TEMPERATURE_MIN: f32 = 38.0;

/// Pulse (bpm) strictly above which the patient is classified yellow.
pub const YELLOW_PULSE_OVER: u16 = 100;
