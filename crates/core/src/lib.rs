//! # Klinik Core
//!
//! Domain logic for the clinic intake and patient-flow system:
//! - rule-based triage classification (vitals + pain + symptoms → urgency level)
//! - screening record assembly and validation
//! - the day's patient queue state machine
//! - the appointment lifecycle
//!
//! **No API concerns**: HTTP clients, wire formats and binaries belong in
//! `klinik-wire` and `klinik-cli`. Everything here is synchronous, pure
//! computation; the only shared-state concern is [`queue::SharedQueue`],
//! which makes each queue transition a single critical section.

pub mod appointment;
pub mod constants;
pub mod error;
pub mod queue;
pub mod screening;
pub mod triage;
pub mod validation;
pub mod vitals;

pub use appointment::{Appointment, AppointmentStatus};
pub use error::{AppointmentError, KlinikError, KlinikResult, QueueError};
pub use queue::{Priority, Queue, QueueEntry, QueueStatus, SharedQueue};
pub use screening::{ScreeningDraft, ScreeningRecord};
pub use triage::{classify, Symptom, TriageLevel};
pub use validation::FieldErrors;
pub use vitals::VitalSigns;

// Re-export the validated primitives so downstream crates rarely need a
// direct klinik-types dependency.
pub use klinik_types::{NonEmptyText, PainScale};
