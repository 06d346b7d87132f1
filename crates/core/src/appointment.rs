//! Appointment lifecycle.
//!
//! An appointment is a scheduled patient-doctor encounter whose lifecycle
//! spans days, unlike a queue entry which lives for one clinic day. An
//! appointment may generate a queue entry on the day of the visit, but the
//! two are independent records with independent status vocabularies; this
//! module must never be merged with [`crate::queue`].

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppointmentError;
use crate::queue::Priority;

/// Status of an appointment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppointmentStatus {
    /// Booked, not yet confirmed by the patient.
    Scheduled,
    /// Confirmed by the patient.
    Confirmed,
    /// Encounter underway.
    InProgress,
    /// Encounter finished.
    Completed,
    /// Called off before the encounter.
    Cancelled,
    /// Patient did not attend.
    NoShow,
}

impl AppointmentStatus {
    /// Wire label for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::InProgress => "in_progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        }
    }

    /// Parse a wire label back into a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(AppointmentStatus::Scheduled),
            "confirmed" => Some(AppointmentStatus::Confirmed),
            "in_progress" => Some(AppointmentStatus::InProgress),
            "completed" => Some(AppointmentStatus::Completed),
            "cancelled" => Some(AppointmentStatus::Cancelled),
            "no_show" => Some(AppointmentStatus::NoShow),
            _ => None,
        }
    }

    /// `completed`, `cancelled` and `no_show` admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled | AppointmentStatus::NoShow
        )
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Scheduled, Confirmed)
                | (Scheduled, InProgress)
                | (Scheduled, Cancelled)
                | (Scheduled, NoShow)
                | (Confirmed, InProgress)
                | (Confirmed, Cancelled)
                | (Confirmed, NoShow)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled patient-doctor encounter.
///
/// The status field is private: it only changes through the lifecycle methods
/// below, each of which validates the transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub priority: Priority,
    pub reason: Option<String>,
    status: AppointmentStatus,
}

impl Appointment {
    /// Books a new appointment in the `scheduled` state.
    pub fn new(
        id: Uuid,
        patient_id: Uuid,
        doctor_id: Uuid,
        scheduled_at: DateTime<Utc>,
        priority: Priority,
        reason: Option<String>,
    ) -> Self {
        Self {
            id,
            patient_id,
            doctor_id,
            scheduled_at,
            priority,
            reason,
            status: AppointmentStatus::Scheduled,
        }
    }

    /// Rehydrates an appointment fetched from the backend, which is
    /// authoritative for the stored status.
    pub fn from_parts(
        id: Uuid,
        patient_id: Uuid,
        doctor_id: Uuid,
        scheduled_at: DateTime<Utc>,
        status: AppointmentStatus,
        priority: Priority,
        reason: Option<String>,
    ) -> Self {
        Self {
            id,
            patient_id,
            doctor_id,
            scheduled_at,
            priority,
            reason,
            status,
        }
    }

    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    /// Patient confirms attendance.
    pub fn confirm(&mut self) -> Result<(), AppointmentError> {
        self.transition(AppointmentStatus::Confirmed)
    }

    /// Encounter begins.
    pub fn start(&mut self) -> Result<(), AppointmentError> {
        self.transition(AppointmentStatus::InProgress)
    }

    /// Encounter finished.
    pub fn complete(&mut self) -> Result<(), AppointmentError> {
        self.transition(AppointmentStatus::Completed)
    }

    /// Appointment called off.
    pub fn cancel(&mut self) -> Result<(), AppointmentError> {
        self.transition(AppointmentStatus::Cancelled)
    }

    /// Patient did not attend.
    pub fn mark_no_show(&mut self) -> Result<(), AppointmentError> {
        self.transition(AppointmentStatus::NoShow)
    }

    fn transition(&mut self, next: AppointmentStatus) -> Result<(), AppointmentError> {
        if !self.status.can_transition_to(next) {
            tracing::warn!(%self.id, from = %self.status, to = %next, "rejected appointment transition");
            return Err(AppointmentError::IllegalTransition {
                from: self.status,
                to: next,
            });
        }
        tracing::debug!(%self.id, from = %self.status, to = %next, "appointment transition");
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booked() -> Appointment {
        Appointment::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Utc::now(),
            Priority::Normal,
            Some("Kontrol rutin".to_owned()),
        )
    }

    #[test]
    fn happy_path_runs_to_completion() {
        let mut appointment = booked();
        assert_eq!(appointment.status(), AppointmentStatus::Scheduled);

        appointment.confirm().expect("scheduled can confirm");
        appointment.start().expect("confirmed can start");
        appointment.complete().expect("in progress can complete");
        assert_eq!(appointment.status(), AppointmentStatus::Completed);
    }

    #[test]
    fn walk_in_can_start_without_confirmation() {
        let mut appointment = booked();
        appointment.start().expect("scheduled can start directly");
        assert_eq!(appointment.status(), AppointmentStatus::InProgress);
    }

    #[test]
    fn no_show_requires_a_pre_encounter_state() {
        let mut appointment = booked();
        appointment.mark_no_show().expect("scheduled can no-show");

        let mut appointment = booked();
        appointment.start().expect("scheduled can start");
        let err = appointment
            .mark_no_show()
            .expect_err("an encounter underway cannot be a no-show");
        assert_eq!(
            err,
            AppointmentError::IllegalTransition {
                from: AppointmentStatus::InProgress,
                to: AppointmentStatus::NoShow,
            }
        );
    }

    #[test]
    fn terminal_states_admit_nothing() {
        let mut appointment = booked();
        appointment.cancel().expect("scheduled can cancel");

        assert!(appointment.confirm().is_err());
        assert!(appointment.start().is_err());
        assert!(appointment.complete().is_err());
        assert!(appointment.cancel().is_err());
        assert!(appointment.mark_no_show().is_err());
    }

    #[test]
    fn complete_requires_an_encounter_underway() {
        let mut appointment = booked();
        let err = appointment.complete().expect_err("nothing underway yet");
        assert_eq!(
            err,
            AppointmentError::IllegalTransition {
                from: AppointmentStatus::Scheduled,
                to: AppointmentStatus::Completed,
            }
        );
    }

    #[test]
    fn status_vocabulary_is_distinct_from_the_queue() {
        // Appointment statuses include states the queue has no counterpart
        // for; parsing them must stay independent.
        assert_eq!(
            AppointmentStatus::parse("no_show"),
            Some(AppointmentStatus::NoShow)
        );
        assert_eq!(
            AppointmentStatus::parse("scheduled"),
            Some(AppointmentStatus::Scheduled)
        );
        assert_eq!(AppointmentStatus::parse("waiting"), None);
    }
}
