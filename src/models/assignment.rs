//! Assignment model.
//!
//! An assignment places a worker at a building for a time range on one
//! calendar day to carry out a task. `Assignment` is the candidate as
//! submitted (form shape, unresolved references, clock times as text);
//! `ApprovedAssignment` is the normalized record a validator hands back
//! once every check has passed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Reference;

/// Lifecycle status of an assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// Scheduled, not started.
    #[default]
    Planned,
    /// Work under way.
    InProgress,
    /// Work finished.
    Completed,
    /// Called off.
    Cancelled,
}

impl AssignmentStatus {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "planned" => Ok(Self::Planned),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown assignment status '{other}'")),
        }
    }
}

/// A candidate assignment as submitted by a scheduler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Assignment {
    /// Identifier of the record being edited, as `_id`.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<Reference>,
    /// Identifier of the record being edited, as `id`. Both `None` for a
    /// new assignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Reference>,
    /// Worker reference, scalar or embedded.
    pub worker: Option<Reference>,
    /// Worker reference sent as `workerId`; used when `worker` does not resolve.
    #[serde(rename = "workerId", skip_serializing_if = "Option::is_none")]
    pub worker_fallback: Option<Reference>,
    /// Building reference, scalar or embedded.
    pub building: Option<Reference>,
    /// Building reference sent as `buildingId`; used when `building` does not resolve.
    #[serde(rename = "buildingId", skip_serializing_if = "Option::is_none")]
    pub building_fallback: Option<Reference>,
    /// Calendar day (`yyyy-MM-dd` or a full instant).
    pub date: String,
    /// Start time of day.
    pub start_time: String,
    /// End time of day.
    pub end_time: String,
    /// Work description.
    pub task: String,
    /// Free-text notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Lifecycle status.
    pub status: AssignmentStatus,
}

/// An assignment that passed validation, ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedAssignment {
    /// Identifier of the edited record, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resolved worker identifier.
    pub worker_id: String,
    /// Resolved building identifier.
    pub building_id: String,
    /// Combined start instant.
    pub start: NaiveDateTime,
    /// Combined end instant.
    pub end: NaiveDateTime,
    /// Work description (trimmed).
    pub task: String,
    /// Notes (trimmed, `None` if blank).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Lifecycle status.
    pub status: AssignmentStatus,
    /// Duration between start and end in hours.
    pub estimated_hours: f64,
}

impl Assignment {
    /// Creates a new candidate for a worker and building.
    pub fn new(worker: impl Into<Reference>, building: impl Into<Reference>) -> Self {
        Self {
            worker: Some(worker.into()),
            building: Some(building.into()),
            ..Default::default()
        }
    }

    /// Marks this candidate as an edit of an existing record.
    pub fn with_id(mut self, id: impl Into<Reference>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the calendar day.
    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Sets start and end times of day.
    pub fn between(mut self, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        self.start_time = start_time.into();
        self.end_time = end_time.into();
        self
    }

    /// Sets the task description.
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = task.into();
        self
    }

    /// Sets the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: AssignmentStatus) -> Self {
        self.status = status;
        self
    }

    /// Resolved identifier of the edited record, `_id` first, then `id`.
    pub fn record_id(&self) -> Option<String> {
        first_resolved(&[&self.object_id, &self.id])
    }

    /// Resolved worker identifier, `worker` first, then `workerId`.
    pub fn worker_id(&self) -> Option<String> {
        first_resolved(&[&self.worker, &self.worker_fallback])
    }

    /// Resolved building identifier, `building` first, then `buildingId`.
    pub fn building_id(&self) -> Option<String> {
        first_resolved(&[&self.building, &self.building_fallback])
    }
}

fn first_resolved(candidates: &[&Option<Reference>]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|r| r.as_ref())
        .find_map(Reference::resolve)
}

impl ApprovedAssignment {
    /// Duration in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}
