//! Resolved shift windows.
//!
//! A `ShiftWindow` is what both a candidate and a roster entry reduce to
//! before comparison: one worker and one half-open interval of wall-clock
//! instants.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::time::day_key;

/// A worker's shift interval [start, end).
///
/// Half-open interval: includes start, excludes end. Back-to-back shifts
/// that touch at a boundary do not overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// Resolved worker identifier.
    pub worker_id: String,
    /// Shift start (inclusive).
    pub start: NaiveDateTime,
    /// Shift end (exclusive).
    pub end: NaiveDateTime,
}

impl ShiftWindow {
    /// Creates a new shift window.
    pub fn new(worker_id: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            worker_id: worker_id.into(),
            start,
            end,
        }
    }

    /// Length of the shift. Negative if end precedes start.
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Length in whole minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Length in hours, floored at zero.
    pub fn hours(&self) -> f64 {
        (self.duration().num_seconds().max(0) as f64) / 3600.0
    }

    /// `yyyy-MM-dd` key of the start instant.
    pub fn day_key(&self) -> String {
        day_key(&self.start)
    }

    /// Whether this window overlaps the interval [start, end).
    #[inline]
    pub fn overlaps_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start < end && start < self.end
    }

    /// Whether two windows overlap in time (worker is not compared).
    pub fn overlaps(&self, other: &Self) -> bool {
        self.overlaps_range(other.start, other.end)
    }
}
