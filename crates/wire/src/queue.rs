//! Queue entry wire models.
//!
//! Queue entries travel as flat JSON objects with string identifiers and
//! lowercase status/priority labels. The status vocabulary here is the queue's
//! own (`waiting`/`in_progress`/`completed`/`cancelled`) and is deliberately
//! separate from the appointment vocabulary in [`crate::appointment`].

use serde::{Deserialize, Serialize};

use klinik_core::{Priority, QueueEntry, QueueStatus, Symptom};

use crate::{from_json, parse_timestamp, parse_uuid, WireError, WireResult};

/// Wire representation of a queue entry.
///
/// This is the exact structure serialised to/from JSON.
/// All fields use `#[serde(deny_unknown_fields)]` for strict validation.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct QueueEntryWire {
    pub id: String,

    pub patient_id: String,

    pub doctor_id: String,

    pub appointment_time: String,

    pub status: String,

    pub priority: String,

    pub queue_number: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_wait_time: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Vec<String>>,
}

/// Parse one queue entry from JSON text.
///
/// # Errors
///
/// Returns [`WireError`] if the JSON does not match the wire schema, an
/// identifier is not a valid UUID, the timestamp is malformed, or the status
/// or priority label is unknown.
pub fn parse_entry(json_text: &str) -> WireResult<QueueEntry> {
    let wire: QueueEntryWire = from_json("Queue entry", json_text)?;
    wire_to_domain(wire)
}

/// Parse a JSON array of queue entries, e.g. the day's roster.
pub fn parse_entries(json_text: &str) -> WireResult<Vec<QueueEntry>> {
    let wires: Vec<QueueEntryWire> = from_json("Queue entry list", json_text)?;
    wires.into_iter().map(wire_to_domain).collect()
}

/// Render a queue entry as JSON text.
///
/// # Errors
///
/// Returns [`WireError`] if serialisation fails.
pub fn render_entry(entry: &QueueEntry) -> WireResult<String> {
    serde_json::to_string_pretty(&domain_to_wire(entry))
        .map_err(|e| WireError::Translation(format!("Failed to serialise queue entry: {e}")))
}

/// Render a list of queue entries as a JSON array.
pub fn render_entries(entries: &[QueueEntry]) -> WireResult<String> {
    let wires: Vec<QueueEntryWire> = entries.iter().map(domain_to_wire).collect();
    serde_json::to_string_pretty(&wires)
        .map_err(|e| WireError::Translation(format!("Failed to serialise queue entries: {e}")))
}

fn wire_to_domain(wire: QueueEntryWire) -> WireResult<QueueEntry> {
    let id = parse_uuid("id", &wire.id)?;
    let patient_id = parse_uuid("patient_id", &wire.patient_id)?;
    let doctor_id = parse_uuid("doctor_id", &wire.doctor_id)?;
    let appointment_time = parse_timestamp("appointment_time", &wire.appointment_time)?;

    let status = QueueStatus::parse(&wire.status)
        .ok_or_else(|| WireError::InvalidInput(format!("Unknown queue status '{}'", wire.status)))?;
    let priority = Priority::parse(&wire.priority).ok_or_else(|| {
        WireError::InvalidInput(format!("Unknown priority '{}'", wire.priority))
    })?;

    let symptoms = wire
        .symptoms
        .unwrap_or_default()
        .iter()
        .map(|label| Symptom::from_label(label))
        .collect();

    Ok(QueueEntry {
        id,
        patient_id,
        doctor_id,
        appointment_time,
        queue_number: wire.queue_number,
        status,
        priority,
        estimated_wait_minutes: wire.estimated_wait_time,
        symptoms,
    })
}

fn domain_to_wire(entry: &QueueEntry) -> QueueEntryWire {
    let symptoms = if entry.symptoms.is_empty() {
        None
    } else {
        Some(
            entry
                .symptoms
                .iter()
                .map(|symptom| symptom.label().to_owned())
                .collect(),
        )
    };

    QueueEntryWire {
        id: entry.id.to_string(),
        patient_id: entry.patient_id.to_string(),
        doctor_id: entry.doctor_id.to_string(),
        appointment_time: entry.appointment_time.to_rfc3339(),
        status: entry.status.as_str().to_owned(),
        priority: entry.priority.as_str().to_owned(),
        queue_number: entry.queue_number,
        estimated_wait_time: entry.estimated_wait_minutes,
        symptoms,
    }
}
