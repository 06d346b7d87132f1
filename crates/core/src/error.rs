use uuid::Uuid;

use crate::appointment::AppointmentStatus;
use crate::queue::QueueStatus;
use crate::validation::FieldErrors;

/// Errors raised by queue state transitions.
///
/// Every transition is validated against the state machine; an illegal request
/// is rejected with the offending states rather than silently applied.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("queue entry {0} not found")]
    UnknownEntry(Uuid),
    #[error("illegal queue transition from {from} to {to}")]
    IllegalTransition { from: QueueStatus, to: QueueStatus },
    #[error("doctor {0} already has a patient in progress")]
    DoctorBusy(Uuid),
}

/// Errors raised by appointment lifecycle transitions.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentError {
    #[error("illegal appointment transition from {from} to {to}")]
    IllegalTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum KlinikError {
    /// Malformed or missing user input, reported per field.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error(transparent)]
    Queue(#[from] QueueError),
    #[error(transparent)]
    Appointment(#[from] AppointmentError),
    /// Triage classification requested before all required vitals are present.
    #[error("vital signs incomplete: cannot classify yet")]
    VitalsIncomplete,
}

impl From<FieldErrors> for KlinikError {
    fn from(errors: FieldErrors) -> Self {
        KlinikError::Validation(errors)
    }
}

pub type KlinikResult<T> = std::result::Result<T, KlinikError>;
