//! Wire/boundary support for the clinic backend REST API.
//!
//! This crate is responsible for translating between the backend's JSON
//! contracts and the `klinik-core` domain types. Clinical meaning lives in
//! `klinik_core`; this crate handles formats and parsing only.
//!
//! Form inputs reach us as strings. The parsers here perform the explicit
//! parse-and-validate step the domain requires: an empty or malformed numeric
//! field becomes a per-field validation error, never a silent zero. A missing
//! oxygen-saturation reading must surface as "required", not be read as 0%
//! (which would always force a red triage).

pub mod appointment;
pub mod queue;
pub mod screening;
pub mod validation;
pub mod vitals;

use thiserror::Error;

pub use vitals::VitalSignsForm;

/// Errors returned by the wire/boundary crate.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("validation failed: {0}")]
    Validation(klinik_core::FieldErrors),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("invalid UUID: {0}")]
    InvalidUuid(String),
}

/// Type alias for Results that can fail with a [`WireError`].
pub type WireResult<T> = Result<T, WireError>;

/// Deserialize a JSON document into a wire struct, surfacing a best-effort
/// path (e.g. `vital_signs.pulse`) to the failing field on mismatch.
pub(crate) fn from_json<'de, T: serde::Deserialize<'de>>(
    what: &str,
    json_text: &'de str,
) -> WireResult<T> {
    let deserializer = &mut serde_json::Deserializer::from_str(json_text);
    match serde_path_to_error::deserialize::<_, T>(deserializer) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() {
                "<root>"
            } else {
                path.as_str()
            };
            Err(WireError::Translation(format!(
                "{what} schema mismatch at {path}: {source}"
            )))
        }
    }
}

pub(crate) fn parse_uuid(field: &str, raw: &str) -> WireResult<uuid::Uuid> {
    uuid::Uuid::parse_str(raw)
        .map_err(|_| WireError::InvalidUuid(format!("Invalid UUID in {field}: {raw}")))
}

pub(crate) fn parse_timestamp(field: &str, raw: &str) -> WireResult<chrono::DateTime<chrono::Utc>> {
    raw.parse::<chrono::DateTime<chrono::Utc>>()
        .map_err(|e| WireError::Translation(format!("Invalid timestamp in {field}: {e}")))
}
