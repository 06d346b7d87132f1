//! Backend validation-error responses.
//!
//! The backend reports validation failures as `{ "field": ["message", ...] }`.
//! Local validation already produces [`FieldErrors`] in that shape; this
//! module converts between the JSON body and the domain type so UI code can
//! render local and remote failures through one path.

use klinik_core::FieldErrors;

use crate::{from_json, WireError, WireResult};

/// Parse a backend validation-error body.
///
/// # Errors
///
/// Returns [`WireError`] if the body is not a JSON object mapping field names
/// to arrays of message strings.
pub fn parse_error_body(json_text: &str) -> WireResult<FieldErrors> {
    from_json("Validation error body", json_text)
}

/// Render a local error map in the backend's response shape.
///
/// # Errors
///
/// Returns [`WireError`] if serialisation fails.
pub fn render_errors(errors: &FieldErrors) -> WireResult<String> {
    serde_json::to_string(errors)
        .map_err(|e| WireError::Translation(format!("Failed to serialise field errors: {e}")))
}
