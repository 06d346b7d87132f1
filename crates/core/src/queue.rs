//! The day's patient queue state machine.
//!
//! A [`QueueEntry`] is a patient's slot in the day's clinic flow, distinct
//! from the longer-lived appointment record. Entries progress
//! `waiting → in_progress → completed`, with `cancelled` reachable from the
//! two non-terminal states. The [`Queue`] validates every transition itself;
//! it never trusts the caller to only request legal ones.
//!
//! Calling order is FIFO by queue number. The priority tag is advisory and
//! deliberately does not reorder the queue.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::QueueError;
use crate::triage::Symptom;

/// Status of a queue entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueueStatus {
    /// Checked in, not yet called.
    Waiting,
    /// Currently with the doctor.
    InProgress,
    /// Consultation finished.
    Completed,
    /// Left the queue without being seen.
    Cancelled,
}

impl QueueStatus {
    /// Wire label for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            QueueStatus::Waiting => "waiting",
            QueueStatus::InProgress => "in_progress",
            QueueStatus::Completed => "completed",
            QueueStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a wire label back into a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "waiting" => Some(QueueStatus::Waiting),
            "in_progress" => Some(QueueStatus::InProgress),
            "completed" => Some(QueueStatus::Completed),
            "cancelled" => Some(QueueStatus::Cancelled),
            _ => None,
        }
    }

    /// `completed` and `cancelled` admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, QueueStatus::Completed | QueueStatus::Cancelled)
    }

    /// Whether the state machine permits moving from `self` to `next`.
    pub fn can_transition_to(self, next: QueueStatus) -> bool {
        matches!(
            (self, next),
            (QueueStatus::Waiting, QueueStatus::InProgress)
                | (QueueStatus::Waiting, QueueStatus::Cancelled)
                | (QueueStatus::InProgress, QueueStatus::Completed)
                | (QueueStatus::InProgress, QueueStatus::Cancelled)
        )
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory urgency tag on a queue entry. Displayed to staff; does not
/// reorder the queue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Priority {
    #[default]
    Normal,
    Urgent,
    Emergency,
}

impl Priority {
    /// Wire label for this priority.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::Urgent => "urgent",
            Priority::Emergency => "emergency",
        }
    }

    /// Parse a wire label back into a priority.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Priority::Normal),
            "urgent" => Some(Priority::Urgent),
            "emergency" => Some(Priority::Emergency),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A patient's slot in the day's clinic flow.
///
/// The queue number is assigned at check-in and never changes or gets reused
/// within the same day. The estimated wait is advisory, not authoritative.
#[derive(Clone, Debug, PartialEq)]
pub struct QueueEntry {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub appointment_time: DateTime<Utc>,
    pub queue_number: u32,
    pub status: QueueStatus,
    pub priority: Priority,
    pub estimated_wait_minutes: Option<u32>,
    pub symptoms: Vec<Symptom>,
}

/// The day's queue for one clinic.
///
/// Owns its entries; callers only ever receive shared references, so status
/// changes must go through the transition methods below.
#[derive(Debug, Default)]
pub struct Queue {
    entries: Vec<QueueEntry>,
    next_number: u32,
}

impl Queue {
    /// Creates an empty queue. Numbering starts at 1.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_number: 1,
        }
    }

    /// Rebuilds a queue from entries fetched from the backend.
    ///
    /// Numbering continues after the highest existing queue number, so numbers
    /// are never reused even across a reload.
    pub fn with_entries(entries: Vec<QueueEntry>) -> Self {
        let next_number = entries
            .iter()
            .map(|entry| entry.queue_number)
            .max()
            .map_or(1, |highest| highest + 1);
        Self {
            entries,
            next_number,
        }
    }

    /// Registers a patient and assigns the next queue number.
    pub fn check_in(
        &mut self,
        patient_id: Uuid,
        doctor_id: Uuid,
        appointment_time: DateTime<Utc>,
        priority: Priority,
    ) -> &QueueEntry {
        let queue_number = self.next_number;
        self.next_number += 1;

        let entry = QueueEntry {
            id: Uuid::new_v4(),
            patient_id,
            doctor_id,
            appointment_time,
            queue_number,
            status: QueueStatus::Waiting,
            priority,
            estimated_wait_minutes: None,
            symptoms: Vec::new(),
        };
        tracing::debug!(queue_number, %patient_id, "patient checked in");
        self.entries.push(entry);
        let index = self.entries.len() - 1;
        &self.entries[index]
    }

    /// All entries in check-in order.
    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    /// Looks up an entry by its identifier.
    pub fn entry(&self, id: Uuid) -> Option<&QueueEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Calls the next waiting patient.
    ///
    /// Selects the waiting entry with the lowest queue number (FIFO by
    /// registration order; priority does not reorder) and moves it to
    /// `in_progress`. Returns `None` without any transition when nobody is
    /// waiting.
    pub fn call_next(&mut self) -> Option<&QueueEntry> {
        let index = self.waiting_index(None)?;
        self.entries[index].status = QueueStatus::InProgress;
        let entry = &self.entries[index];
        tracing::debug!(queue_number = entry.queue_number, %entry.patient_id, "patient called");
        Some(entry)
    }

    /// Calls the next waiting patient assigned to the given doctor.
    ///
    /// Unlike [`Self::call_next`], this variant enforces the one-patient-in-
    /// progress-per-doctor invariant: it refuses with
    /// [`QueueError::DoctorBusy`] while that doctor already has an entry in
    /// progress. Returns `Ok(None)` when none of the doctor's patients are
    /// waiting.
    pub fn call_next_for(&mut self, doctor_id: Uuid) -> Result<Option<&QueueEntry>, QueueError> {
        let busy = self
            .entries
            .iter()
            .any(|entry| entry.doctor_id == doctor_id && entry.status == QueueStatus::InProgress);
        if busy {
            return Err(QueueError::DoctorBusy(doctor_id));
        }

        let Some(index) = self.waiting_index(Some(doctor_id)) else {
            return Ok(None);
        };
        self.entries[index].status = QueueStatus::InProgress;
        let entry = &self.entries[index];
        tracing::debug!(queue_number = entry.queue_number, %doctor_id, "patient called");
        Ok(Some(entry))
    }

    /// Marks an in-progress consultation as finished.
    ///
    /// # Errors
    ///
    /// Rejected with [`QueueError::IllegalTransition`] unless the entry is
    /// currently `in_progress`.
    pub fn complete(&mut self, id: Uuid) -> Result<(), QueueError> {
        self.transition(id, QueueStatus::Completed)
    }

    /// Removes a patient from the flow.
    ///
    /// # Errors
    ///
    /// Rejected with [`QueueError::IllegalTransition`] when the entry is
    /// already `completed` or `cancelled`.
    pub fn cancel(&mut self, id: Uuid) -> Result<(), QueueError> {
        self.transition(id, QueueStatus::Cancelled)
    }

    fn waiting_index(&self, doctor_id: Option<Uuid>) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.status == QueueStatus::Waiting)
            .filter(|(_, entry)| doctor_id.is_none_or(|doctor| entry.doctor_id == doctor))
            .min_by_key(|(_, entry)| entry.queue_number)
            .map(|(index, _)| index)
    }

    fn transition(&mut self, id: Uuid, next: QueueStatus) -> Result<(), QueueError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(QueueError::UnknownEntry(id))?;

        if !entry.status.can_transition_to(next) {
            tracing::warn!(%id, from = %entry.status, to = %next, "rejected queue transition");
            return Err(QueueError::IllegalTransition {
                from: entry.status,
                to: next,
            });
        }

        tracing::debug!(%id, from = %entry.status, to = %next, "queue transition");
        entry.status = next;
        Ok(())
    }
}

/// A cloneable handle to a queue shared between sessions.
///
/// Every operation takes the lock once, so select-and-transition steps like
/// [`Self::call_next`] are a single critical section: two sessions can never
/// both call the same patient.
#[derive(Clone, Debug, Default)]
pub struct SharedQueue {
    inner: Arc<Mutex<Queue>>,
}

impl SharedQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_queue(queue: Queue) -> Self {
        Self {
            inner: Arc::new(Mutex::new(queue)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Queue> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn check_in(
        &self,
        patient_id: Uuid,
        doctor_id: Uuid,
        appointment_time: DateTime<Utc>,
        priority: Priority,
    ) -> QueueEntry {
        self.lock()
            .check_in(patient_id, doctor_id, appointment_time, priority)
            .clone()
    }

    pub fn call_next(&self) -> Option<QueueEntry> {
        self.lock().call_next().cloned()
    }

    pub fn call_next_for(&self, doctor_id: Uuid) -> Result<Option<QueueEntry>, QueueError> {
        Ok(self.lock().call_next_for(doctor_id)?.cloned())
    }

    pub fn complete(&self, id: Uuid) -> Result<(), QueueError> {
        self.lock().complete(id)
    }

    pub fn cancel(&self, id: Uuid) -> Result<(), QueueError> {
        self.lock().cancel(id)
    }

    /// A point-in-time copy of every entry.
    pub fn snapshot(&self) -> Vec<QueueEntry> {
        self.lock().entries().to_vec()
    }
}
