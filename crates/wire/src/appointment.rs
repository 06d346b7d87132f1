//! Appointment wire models.
//!
//! Appointments carry their own six-value status vocabulary
//! (`scheduled`/`confirmed`/`in_progress`/`completed`/`cancelled`/`no_show`),
//! independent of the queue vocabulary in [`crate::queue`]. An appointment may
//! generate a queue entry on the day of the visit, but the two records are
//! never unified.

use serde::{Deserialize, Serialize};

use klinik_core::{Appointment, AppointmentStatus, Priority};

use crate::{from_json, parse_timestamp, parse_uuid, WireError, WireResult};

/// Wire representation of an appointment.
///
/// This is the exact structure serialised to/from JSON.
/// All fields use `#[serde(deny_unknown_fields)]` for strict validation.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct AppointmentWire {
    pub id: String,

    pub patient_id: String,

    pub doctor_id: String,

    pub appointment_time: String,

    pub status: String,

    pub priority: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Parse an appointment from JSON text.
///
/// # Errors
///
/// Returns [`WireError`] if the JSON does not match the wire schema, an
/// identifier is not a valid UUID, the timestamp is malformed, or the status
/// or priority label is unknown.
pub fn parse(json_text: &str) -> WireResult<Appointment> {
    let wire: AppointmentWire = from_json("Appointment", json_text)?;
    wire_to_domain(wire)
}

/// Render an appointment as JSON text.
///
/// # Errors
///
/// Returns [`WireError`] if serialisation fails.
pub fn render(appointment: &Appointment) -> WireResult<String> {
    serde_json::to_string_pretty(&domain_to_wire(appointment))
        .map_err(|e| WireError::Translation(format!("Failed to serialise appointment: {e}")))
}

fn wire_to_domain(wire: AppointmentWire) -> WireResult<Appointment> {
    let id = parse_uuid("id", &wire.id)?;
    let patient_id = parse_uuid("patient_id", &wire.patient_id)?;
    let doctor_id = parse_uuid("doctor_id", &wire.doctor_id)?;
    let scheduled_at = parse_timestamp("appointment_time", &wire.appointment_time)?;

    let status = AppointmentStatus::parse(&wire.status).ok_or_else(|| {
        WireError::InvalidInput(format!("Unknown appointment status '{}'", wire.status))
    })?;
    let priority = Priority::parse(&wire.priority).ok_or_else(|| {
        WireError::InvalidInput(format!("Unknown priority '{}'", wire.priority))
    })?;

    Ok(Appointment::from_parts(
        id,
        patient_id,
        doctor_id,
        scheduled_at,
        status,
        priority,
        wire.reason,
    ))
}

fn domain_to_wire(appointment: &Appointment) -> AppointmentWire {
    AppointmentWire {
        id: appointment.id.to_string(),
        patient_id: appointment.patient_id.to_string(),
        doctor_id: appointment.doctor_id.to_string(),
        appointment_time: appointment.scheduled_at.to_rfc3339(),
        status: appointment.status().as_str().to_owned(),
        priority: appointment.priority.as_str().to_owned(),
        reason: appointment.reason.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json(status: &str) -> String {
        format!(
            r#"{{
  "id": "7f4c2e9d-4b0a-4f3a-9a2c-0e9a6b5d1c88",
  "patient_id": "a4f91c6d-3b2e-4c5f-9d7a-1e8b6c0a9f12",
  "doctor_id": "5b2e1c0a-9f12-4c5f-8d7a-3e8b6c0a9f34",
  "appointment_time": "2026-09-02T10:00:00Z",
  "status": "{status}",
  "priority": "urgent",
  "reason": "Kontrol diabetes"
}}"#
        )
    }

    #[test]
    fn parses_a_valid_appointment() {
        let appointment = parse(&sample_json("confirmed")).expect("appointment is valid");
        assert_eq!(appointment.status(), AppointmentStatus::Confirmed);
        assert_eq!(appointment.priority, Priority::Urgent);
        assert_eq!(appointment.reason.as_deref(), Some("Kontrol diabetes"));
    }

    #[test]
    fn round_trips_an_appointment() {
        let appointment = parse(&sample_json("no_show")).expect("appointment is valid");
        let output = render(&appointment).expect("render appointment");
        let reparsed = parse(&output).expect("reparse appointment");
        assert_eq!(appointment, reparsed);
    }

    #[test]
    fn rejects_queue_vocabulary() {
        // "waiting" is a queue status, not an appointment status.
        let err = parse(&sample_json("waiting")).expect_err("wrong vocabulary");
        match err {
            WireError::InvalidInput(msg) => assert!(msg.contains("waiting")),
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn strict_validation_rejects_unknown_keys() {
        let input = sample_json("scheduled").replace(
            "\"priority\": \"urgent\",",
            "\"priority\": \"urgent\",\n  \"room\": 3,",
        );
        let err = parse(&input).expect_err("should reject unknown key");
        match err {
            WireError::Translation(msg) => assert!(msg.contains("room")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }
}
