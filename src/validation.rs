//! Candidate assignment validation.
//!
//! Decides whether a candidate may be committed against a roster snapshot.
//! Each submission walks three stages in order and stops at the first
//! failure:
//!
//! 1. **Parsing**: worker and building references resolve, task and notes
//!    are within bounds, date and clock times combine into instants.
//! 2. **Duration check**: end after start, at least the configured minimum.
//! 3. **Overlap check**: no same-day shift of the same worker overlaps.
//!
//! A candidate that clears all three is returned as an
//! [`ApprovedAssignment`]. Rejections are values, never errors or panics.
//!
//! # Overlap Rule
//! Half-open intervals: `[a, b)` and `[c, d)` overlap iff `a < d && c < b`.
//! Back-to-back shifts do not conflict.
//!
//! # Staleness
//! The roster is whatever the caller fetched last. Two clients validating
//! against stale snapshots can both be approved; only a check at the
//! persistence layer closes that race.

use tracing::{debug, trace};

use crate::config::ValidatorConfig;
use crate::models::{ApprovedAssignment, Assignment, Roster, RosterEntry, ShiftWindow};
use crate::time::{day_key, parse_date, parse_time_of_day};

/// Message shown when date or clock input does not parse.
pub const INVALID_TIME_MESSAGE: &str = "Invalid date or time";
/// Message shown when end is not after start.
pub const END_BEFORE_START_MESSAGE: &str = "End time must be after start time";
/// Message shown on an overlap.
pub const CONFLICT_MESSAGE: &str = "Schedule conflicts with an existing shift for this worker";

/// A rejection reason, suitable for direct display.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending input field, for field-level errors.
    pub field: Option<&'static str>,
    /// Human-readable description.
    pub message: String,
    /// Ids of conflicting roster entries (overlap rejections only).
    pub conflicts: Vec<String>,
}

/// Categories of rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Worker reference missing or unresolvable.
    MissingWorker,
    /// Building reference missing or unresolvable.
    MissingBuilding,
    /// Task empty or too long.
    InvalidTask,
    /// Notes too long.
    InvalidNotes,
    /// Date or clock time does not parse.
    InvalidTime,
    /// End at or before start.
    EndBeforeStart,
    /// Shorter than the minimum duration.
    MinimumDuration,
    /// Overlaps an existing shift of the same worker.
    Conflict,
}

/// Stage of the validation pipeline a rejection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStage {
    /// Reference resolution, text bounds, date/time combination.
    Parsing,
    /// End after start, minimum length.
    DurationCheck,
    /// Same-worker, same-day overlap.
    OverlapCheck,
}

impl ValidationErrorKind {
    /// Stage that produces this kind.
    pub fn stage(&self) -> ValidationStage {
        match self {
            Self::MissingWorker
            | Self::MissingBuilding
            | Self::InvalidTask
            | Self::InvalidNotes
            | Self::InvalidTime => ValidationStage::Parsing,
            Self::EndBeforeStart | Self::MinimumDuration => ValidationStage::DurationCheck,
            Self::Conflict => ValidationStage::OverlapCheck,
        }
    }
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
            conflicts: Vec::new(),
        }
    }

    fn on_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    fn conflict(conflicts: Vec<String>) -> Self {
        Self {
            conflicts,
            ..Self::new(ValidationErrorKind::Conflict, CONFLICT_MESSAGE)
        }
    }
}

/// Result of validating one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// Safe to persist.
    Approved(ApprovedAssignment),
    /// Rejected with a reason.
    Rejected(ValidationError),
}

impl ValidationOutcome {
    /// Whether the candidate was approved.
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved(_))
    }

    /// The rejection, if any.
    pub fn rejection(&self) -> Option<&ValidationError> {
        match self {
            Self::Approved(_) => None,
            Self::Rejected(e) => Some(e),
        }
    }

    /// Converts to a `Result` for `?`-style callers.
    pub fn into_result(self) -> Result<ApprovedAssignment, ValidationError> {
        match self {
            Self::Approved(a) => Ok(a),
            Self::Rejected(e) => Err(e),
        }
    }
}

/// Finds roster entries that conflict with `candidate`.
///
/// An entry conflicts when it belongs to the same worker (either worker
/// field), starts on the same `yyyy-MM-dd` day as the candidate, is not the
/// entry identified by `exclude_id`, and overlaps under the half-open rule.
///
/// Entries whose start or end cannot be read never conflict.
pub fn find_overlaps<'a>(
    candidate: &ShiftWindow,
    roster: &'a Roster,
    exclude_id: Option<&str>,
) -> Vec<RosterEntry<'a>> {
    let candidate_day = candidate.day_key();

    roster
        .entries()
        .filter(|entry| entry.has_worker(&candidate.worker_id))
        .filter(|entry| {
            let Some((start, end)) = entry.interval() else {
                debug!(
                    entry_id = ?entry.id(),
                    "Skipping roster entry with unreadable start or end"
                );
                return false;
            };
            let same_day = day_key(&start) == candidate_day;
            let excluded = exclude_id.is_some() && entry.id().as_deref() == exclude_id;
            let overlaps = candidate.overlaps_range(start, end);
            trace!(
                entry_id = ?entry.id(),
                same_day,
                excluded,
                overlaps,
                "Compared roster entry"
            );
            same_day && !excluded && overlaps
        })
        .collect()
}

/// Validates candidate assignments against a roster snapshot.
///
/// Holds no state besides its configuration; one validator may be shared
/// across threads and calls.
#[derive(Debug, Clone, Default)]
pub struct ScheduleValidator {
    config: ValidatorConfig,
}

impl ScheduleValidator {
    /// Creates a validator with the given limits.
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates one candidate.
    ///
    /// If the candidate carries an `id`, the roster entry with that id is
    /// excluded from the overlap check.
    pub fn validate(&self, candidate: &Assignment, roster: &Roster) -> ValidationOutcome {
        match self.run(candidate, roster) {
            Ok(approved) => {
                debug!(
                    worker_id = %approved.worker_id,
                    start = %approved.start,
                    end = %approved.end,
                    "Assignment approved"
                );
                ValidationOutcome::Approved(approved)
            }
            Err(err) => {
                let worker_id = candidate.worker_id().unwrap_or_default();
                debug!(
                    worker_id = %worker_id,
                    stage = ?err.kind.stage(),
                    kind = ?err.kind,
                    reason = %err.message,
                    "Assignment rejected"
                );
                ValidationOutcome::Rejected(err)
            }
        }
    }

    /// Validates several candidates against the same snapshot.
    ///
    /// Candidates are checked independently; they are not compared with
    /// each other.
    pub fn validate_batch(
        &self,
        candidates: &[Assignment],
        roster: &Roster,
    ) -> Vec<ValidationOutcome> {
        candidates
            .iter()
            .map(|c| self.validate(c, roster))
            .collect()
    }

    fn run(
        &self,
        candidate: &Assignment,
        roster: &Roster,
    ) -> Result<ApprovedAssignment, ValidationError> {
        let (window, building_id) = self.parse(candidate)?;
        self.check_duration(&window)?;

        let record_id = candidate.record_id();
        let conflicts = find_overlaps(&window, roster, record_id.as_deref());
        if !conflicts.is_empty() {
            let ids = conflicts.iter().filter_map(|e| e.id()).collect();
            return Err(ValidationError::conflict(ids));
        }

        let notes = candidate
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(ApprovedAssignment {
            id: record_id,
            estimated_hours: window.hours(),
            worker_id: window.worker_id,
            building_id,
            start: window.start,
            end: window.end,
            task: candidate.task.trim().to_string(),
            notes,
            status: candidate.status,
        })
    }

    fn parse(&self, candidate: &Assignment) -> Result<(ShiftWindow, String), ValidationError> {
        let worker_id = candidate.worker_id().ok_or_else(|| {
            ValidationError::new(ValidationErrorKind::MissingWorker, "Please select a worker")
                .on_field("worker")
        })?;
        let building_id = candidate.building_id().ok_or_else(|| {
            ValidationError::new(ValidationErrorKind::MissingBuilding, "Please select a building")
                .on_field("building")
        })?;

        let task_len = candidate.task.trim().chars().count();
        if task_len == 0 {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidTask,
                "Task description is required",
            )
            .on_field("task"));
        }
        if task_len > self.config.max_task_len {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidTask,
                format!(
                    "Task description must be at most {} characters",
                    self.config.max_task_len
                ),
            )
            .on_field("task"));
        }

        let notes_len = candidate
            .notes
            .as_deref()
            .map_or(0, |n| n.trim().chars().count());
        if notes_len > self.config.max_notes_len {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidNotes,
                format!(
                    "Notes must be at most {} characters",
                    self.config.max_notes_len
                ),
            )
            .on_field("notes"));
        }

        let invalid_time = |field: &'static str| {
            ValidationError::new(ValidationErrorKind::InvalidTime, INVALID_TIME_MESSAGE)
                .on_field(field)
        };
        let day = parse_date(&candidate.date).ok_or_else(|| invalid_time("date"))?;
        let start = parse_time_of_day(&candidate.start_time)
            .ok_or_else(|| invalid_time("startTime"))?;
        let end =
            parse_time_of_day(&candidate.end_time).ok_or_else(|| invalid_time("endTime"))?;

        Ok((
            ShiftWindow::new(worker_id, day.and_time(start), day.and_time(end)),
            building_id,
        ))
    }

    fn check_duration(&self, window: &ShiftWindow) -> Result<(), ValidationError> {
        if window.end <= window.start {
            return Err(ValidationError::new(
                ValidationErrorKind::EndBeforeStart,
                END_BEFORE_START_MESSAGE,
            )
            .on_field("endTime"));
        }
        if window.duration_minutes() < self.config.min_duration_minutes {
            return Err(ValidationError::new(
                ValidationErrorKind::MinimumDuration,
                format!(
                    "Minimum duration is {} minutes",
                    self.config.min_duration_minutes
                ),
            )
            .on_field("endTime"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignmentStatus, Reference};
    use chrono::{NaiveDate, NaiveDateTime};
    use serde_json::{json, Value};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    fn at(d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap()
    }

    /// W1 works 09:00 to 11:00 on 2024-03-01.
    fn w1_roster() -> Roster {
        Roster::new(vec![json!({
            "_id": "s1",
            "worker": { "_id": "W1", "name": "Ana" },
            "building": "B1",
            "startDate": "2024-03-01T09:00:00",
            "endDate": "2024-03-01T11:00:00",
            "task": "Inspect roof"
        })])
    }

    fn candidate(worker: &str, date: &str, start: &str, end: &str) -> Assignment {
        Assignment::new(worker, "B1")
            .on(date)
            .between(start, end)
            .with_task("Fix leaking pipe")
    }

    fn validate(c: &Assignment, roster: &Roster) -> ValidationOutcome {
        ScheduleValidator::default().validate(c, roster)
    }

    fn rejection_kind(outcome: &ValidationOutcome) -> Option<ValidationErrorKind> {
        outcome.rejection().map(|e| e.kind)
    }

    #[test]
    fn test_scenario_overlap_rejected() {
        let outcome = validate(&candidate("W1", "2024-03-01", "10:00", "12:00"), &w1_roster());
        let err = outcome.rejection().unwrap();
        assert_eq!(err.kind, ValidationErrorKind::Conflict);
        assert_eq!(err.message, CONFLICT_MESSAGE);
        assert_eq!(err.conflicts, vec!["s1".to_string()]);
    }

    #[test]
    fn test_scenario_adjacent_approved() {
        let outcome = validate(&candidate("W1", "2024-03-01", "11:00", "12:00"), &w1_roster());
        assert!(outcome.is_approved());
    }

    #[test]
    fn test_scenario_different_day_approved() {
        let outcome = validate(&candidate("W1", "2024-03-02", "09:00", "11:00"), &w1_roster());
        assert!(outcome.is_approved());
    }

    #[test]
    fn test_scenario_different_worker_approved() {
        let outcome = validate(&candidate("W2", "2024-03-01", "09:00", "11:00"), &w1_roster());
        assert!(outcome.is_approved());
    }

    #[test]
    fn test_scenario_short_overlapping_shift_reports_duration() {
        let c = candidate("W1", "2024-03-01", "09:10", "09:30");
        let outcome = validate(&c, &w1_roster());
        assert_eq!(
            rejection_kind(&outcome),
            Some(ValidationErrorKind::MinimumDuration)
        );
        assert_eq!(outcome.rejection().unwrap().message, "Minimum duration is 30 minutes");

        // the overlap check flags it on its own as well
        let window = ShiftWindow::new("W1", at(1, 9, 10), at(1, 9, 30));
        assert_eq!(find_overlaps(&window, &w1_roster(), None).len(), 1);
    }

    #[test]
    fn test_edit_does_not_conflict_with_itself() {
        let roster = w1_roster();
        let edit = candidate("W1", "2024-03-01", "09:00", "11:30").with_id("s1");
        assert!(validate(&edit, &roster).is_approved());

        let window = ShiftWindow::new("W1", at(1, 9, 0), at(1, 11, 30));
        assert!(find_overlaps(&window, &roster, Some("s1")).is_empty());
    }

    #[test]
    fn test_edit_still_conflicts_with_siblings() {
        let roster = w1_roster().with_record(json!({
            "_id": "s2",
            "worker": "W1",
            "date": "2024-03-01",
            "startTime": "13:00",
            "endTime": "15:00"
        }));
        let edit = candidate("W1", "2024-03-01", "10:00", "14:00").with_id("s1");
        let err = validate(&edit, &roster).into_result().unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::Conflict);
        assert_eq!(err.conflicts, vec!["s2".to_string()]);
    }

    #[test]
    fn test_overlap_symmetry() {
        let a = Roster::new(vec![json!({
            "_id": "a", "worker": "W1",
            "startTime": "2024-03-01T10:00:00", "endTime": "2024-03-01T12:00:00"
        })]);
        let b = Roster::new(vec![json!({
            "_id": "b", "worker": "W1",
            "startTime": "2024-03-01T11:00:00", "endTime": "2024-03-01T13:00:00"
        })]);
        let wa = ShiftWindow::new("W1", at(1, 10, 0), at(1, 12, 0));
        let wb = ShiftWindow::new("W1", at(1, 11, 0), at(1, 13, 0));

        assert_eq!(find_overlaps(&wa, &b, None).len(), 1);
        assert_eq!(find_overlaps(&wb, &a, None).len(), 1);
    }

    #[test]
    fn test_adjacency_is_not_overlap() {
        let roster = Roster::new(vec![json!({
            "_id": "a", "worker": "W1",
            "startDate": "2024-03-01T09:00:00", "endDate": "2024-03-01T10:00:00"
        })]);
        let next = ShiftWindow::new("W1", at(1, 10, 0), at(1, 11, 0));
        assert!(find_overlaps(&next, &roster, None).is_empty());

        let before = ShiftWindow::new("W1", at(1, 8, 0), at(1, 9, 0));
        assert!(find_overlaps(&before, &roster, None).is_empty());
    }

    #[test]
    fn test_malformed_entries_are_ignored() {
        let roster = Roster::new(vec![
            json!({ "_id": "x1", "worker": "W1", "startDate": "nope", "endDate": "2024-03-01T11:00:00" }),
            json!({ "_id": "x2", "worker": "W1", "startDate": "2024-03-01T09:00:00", "endDate": {} }),
            json!({ "_id": "x3", "worker": "W1" }),
            json!(null),
            json!(["W1"]),
        ]);
        let window = ShiftWindow::new("W1", at(1, 8, 0), at(1, 18, 0));
        assert!(find_overlaps(&window, &roster, None).is_empty());

        let outcome = validate(&candidate("W1", "2024-03-01", "08:00", "18:00"), &roster);
        assert!(outcome.is_approved());
    }

    #[test]
    fn test_fallback_worker_field() {
        let roster = Roster::new(vec![json!({
            "_id": "f1",
            "worker": null,
            "workerId": { "id": "W1" },
            "startDate": "2024-03-01T09:00:00",
            "endDate": "2024-03-01T11:00:00"
        })]);
        let outcome = validate(&candidate("W1", "2024-03-01", "10:00", "12:00"), &roster);
        assert_eq!(rejection_kind(&outcome), Some(ValidationErrorKind::Conflict));
    }

    #[test]
    fn test_embedded_candidate_worker() {
        let c = Assignment::new(Reference::embedded("_id", "W1"), "B1")
            .on("2024-03-01")
            .between("10:00", "12:00")
            .with_task("Fix leaking pipe");
        let outcome = validate(&c, &w1_roster());
        assert_eq!(rejection_kind(&outcome), Some(ValidationErrorKind::Conflict));
    }

    #[test]
    fn test_minimum_duration_boundary() {
        let roster = Roster::default();
        let short = validate(&candidate("W1", "2024-03-01", "14:00", "14:15"), &roster);
        assert_eq!(
            rejection_kind(&short),
            Some(ValidationErrorKind::MinimumDuration)
        );

        let exact = validate(&candidate("W1", "2024-03-01", "14:00", "14:30"), &roster);
        assert!(exact.is_approved());
    }

    #[test]
    fn test_end_before_start() {
        let roster = Roster::default();
        for (start, end) in [("14:00", "13:00"), ("14:00", "14:00")] {
            let outcome = validate(&candidate("W1", "2024-03-01", start, end), &roster);
            let err = outcome.rejection().unwrap();
            assert_eq!(err.kind, ValidationErrorKind::EndBeforeStart);
            assert_eq!(err.message, END_BEFORE_START_MESSAGE);
        }
    }

    #[test]
    fn test_invalid_time_short_circuits() {
        // an unparseable time must not reach the overlap check
        let outcome = validate(&candidate("W1", "2024-03-01", "10:00", "noon"), &w1_roster());
        let err = outcome.rejection().unwrap();
        assert_eq!(err.kind, ValidationErrorKind::InvalidTime);
        assert_eq!(err.field, Some("endTime"));
        assert_eq!(err.kind.stage(), ValidationStage::Parsing);

        let outcome = validate(&candidate("W1", "03/01/2024x", "10:00", "12:00"), &w1_roster());
        let err = outcome.rejection().unwrap();
        assert_eq!(err.kind, ValidationErrorKind::InvalidTime);
        assert_eq!(err.field, Some("date"));

        let outcome = validate(&candidate("W1", "2024-03-01", "9h", "12:00"), &w1_roster());
        assert_eq!(outcome.rejection().unwrap().field, Some("startTime"));
    }

    #[test]
    fn test_edit_id_is_normalized_before_exclusion() {
        let roster = Roster::new(vec![json!({
            "_id": 7,
            "worker": "W1",
            "startDate": "2024-03-01T09:00:00",
            "endDate": "2024-03-01T11:00:00"
        })]);

        let padded = candidate("W1", "2024-03-01", "09:30", "11:30").with_id(" 7");
        let approved = validate(&padded, &roster).into_result().unwrap();
        assert_eq!(approved.id.as_deref(), Some("7"));

        let payload: Assignment = serde_json::from_value(json!({
            "_id": { "$oid": "7" },
            "id": "7",
            "worker": { "_id": "W1" },
            "workerId": "W1",
            "buildingId": "B1",
            "date": "2024-03-01",
            "startTime": "09:30",
            "endTime": "11:30",
            "task": "Fix leaking pipe"
        }))
        .unwrap();
        assert!(validate(&payload, &roster).is_approved());

        // a different record on the same slot still conflicts
        let other = candidate("W1", "2024-03-01", "09:30", "11:30").with_id(8_i64);
        assert_eq!(
            rejection_kind(&validate(&other, &roster)),
            Some(ValidationErrorKind::Conflict)
        );
    }

    #[test]
    fn test_overlaps_with_epoch_and_offset_instants() {
        let roster = Roster::new(vec![
            // 2024-03-01 09:00 to 11:00 UTC
            json!({
                "_id": "ms", "worker": "W1",
                "startDate": 1_709_283_600_000_i64, "endDate": 1_709_290_800_000_i64
            }),
            // 23:00 to 00:30 local; the UTC start would fall on March 2nd
            json!({
                "_id": "offset", "worker": "W1",
                "startDate": "2024-03-01T23:00:00-05:00", "endDate": "2024-03-02T00:30:00-05:00"
            }),
            json!({
                "_id": "zulu", "worker": "W1",
                "startTime": "2024-03-03T09:00:00Z", "endTime": "2024-03-03T11:00:00Z"
            }),
        ]);
        let ids = |window: ShiftWindow| -> Vec<String> {
            find_overlaps(&window, &roster, None)
                .iter()
                .filter_map(|e| e.id())
                .collect()
        };

        assert_eq!(ids(ShiftWindow::new("W1", at(1, 10, 0), at(1, 12, 0))), vec!["ms"]);
        assert_eq!(ids(ShiftWindow::new("W1", at(1, 22, 30), at(1, 23, 30))), vec!["offset"]);
        assert!(ids(ShiftWindow::new("W1", at(2, 4, 0), at(2, 6, 0))).is_empty());
        assert_eq!(ids(ShiftWindow::new("W1", at(3, 10, 0), at(3, 11, 0))), vec!["zulu"]);
    }

    #[test]
    fn test_missing_references() {
        let roster = Roster::default();
        let mut c = candidate("W1", "2024-03-01", "09:00", "10:00");
        c.worker = None;
        assert_eq!(
            rejection_kind(&validate(&c, &roster)),
            Some(ValidationErrorKind::MissingWorker)
        );

        let mut c = candidate("W1", "2024-03-01", "09:00", "10:00");
        c.building = Some(Reference::embedded("name", "Tower A"));
        let outcome = validate(&c, &roster);
        assert_eq!(
            rejection_kind(&outcome),
            Some(ValidationErrorKind::MissingBuilding)
        );
        assert_eq!(outcome.rejection().unwrap().field, Some("building"));
    }

    #[test]
    fn test_task_and_notes_bounds() {
        let roster = Roster::default();
        let validator =
            ScheduleValidator::new(ValidatorConfig::default().with_max_task_len(10).with_max_notes_len(5));

        let blank = candidate("W1", "2024-03-01", "09:00", "10:00").with_task("   ");
        assert_eq!(
            rejection_kind(&validator.validate(&blank, &roster)),
            Some(ValidationErrorKind::InvalidTask)
        );

        let long = candidate("W1", "2024-03-01", "09:00", "10:00").with_task("x".repeat(11));
        assert_eq!(
            rejection_kind(&validator.validate(&long, &roster)),
            Some(ValidationErrorKind::InvalidTask)
        );

        let notes = candidate("W1", "2024-03-01", "09:00", "10:00")
            .with_task("Short")
            .with_notes("too long");
        assert_eq!(
            rejection_kind(&validator.validate(&notes, &roster)),
            Some(ValidationErrorKind::InvalidNotes)
        );
    }

    #[test]
    fn test_approved_assignment_is_normalized() {
        let c = Assignment::new(Reference::embedded("value", "W1"), Reference::embedded("_id", "B9"))
            .with_id("s5")
            .on("2024-03-04")
            .between("08:00:59", "12:30")
            .with_task("  Replace windows  ")
            .with_notes("   ")
            .with_status(AssignmentStatus::InProgress);

        let approved = validate(&c, &w1_roster()).into_result().unwrap();
        assert_eq!(approved.id.as_deref(), Some("s5"));
        assert_eq!(approved.worker_id, "W1");
        assert_eq!(approved.building_id, "B9");
        assert_eq!(approved.start, at(4, 8, 0));
        assert_eq!(approved.end, at(4, 12, 30));
        assert_eq!(approved.task, "Replace windows");
        assert_eq!(approved.notes, None);
        assert_eq!(approved.status, AssignmentStatus::InProgress);
        assert!((approved.estimated_hours - 4.5).abs() < 1e-10);
        assert_eq!(approved.duration_minutes(), 270);
    }

    #[test]
    fn test_configured_minimum_duration() {
        let validator = ScheduleValidator::new(ValidatorConfig::default().with_min_duration_minutes(60));
        let outcome = validator.validate(
            &candidate("W1", "2024-03-05", "09:00", "09:45"),
            &Roster::default(),
        );
        assert_eq!(
            outcome.rejection().unwrap().message,
            "Minimum duration is 60 minutes"
        );
    }

    #[test]
    fn test_validate_batch_uses_own_exclusions() {
        let roster = w1_roster().with_record(json!({
            "_id": "s2", "worker": "W1",
            "startDate": "2024-03-01T12:00:00", "endDate": "2024-03-01T14:00:00"
        }));
        let candidates = vec![
            candidate("W1", "2024-03-01", "09:00", "12:00").with_id("s1"),
            candidate("W1", "2024-03-01", "10:00", "14:00").with_id("s2"),
            candidate("W1", "2024-03-01", "08:00", "09:00"),
        ];

        let outcomes = ScheduleValidator::default().validate_batch(&candidates, &roster);
        assert!(outcomes[0].is_approved());
        assert_eq!(
            outcomes[1].rejection().map(|e| e.conflicts.clone()),
            Some(vec!["s1".to_string()])
        );
        assert!(outcomes[2].is_approved());
    }

    #[test]
    fn test_roster_is_not_mutated() {
        let roster = w1_roster();
        let before = roster.clone();
        let _ = validate(&candidate("W1", "2024-03-01", "10:00", "12:00"), &roster);
        assert_eq!(roster, before);
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_rejection_log_names_worker() {
        let sink = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(sink.clone())
            .json()
            .with_max_level(Level::DEBUG)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            validate(&candidate("W1", "2024-03-01", "10:00", "12:00"), &w1_roster());
        });

        let text = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        let rejected: Value = text
            .lines()
            .filter_map(|l| serde_json::from_str::<Value>(l).ok())
            .find(|v| v["fields"]["message"] == "Assignment rejected")
            .unwrap();
        assert_eq!(rejected["fields"]["worker_id"], "W1");
        assert_eq!(rejected["fields"]["kind"], "Conflict");
    }

    #[test]
    fn test_rejection_displays_message() {
        let err = validate(&candidate("W1", "2024-03-01", "10:00", "12:00"), &w1_roster())
            .into_result()
            .unwrap_err();
        assert_eq!(err.to_string(), CONFLICT_MESSAGE);
    }
}
