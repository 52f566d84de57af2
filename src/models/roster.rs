//! Roster of persisted assignments.
//!
//! Roster records come straight from the data-fetching layer and carry
//! whatever shape their provenance gave them. The accessors here are the
//! only place that knows the field spellings:
//!
//! | Logical field | Tried in order |
//! |---------------|----------------|
//! | id | `_id`, `id` |
//! | worker | `worker`, then `workerId` (both collected, de-duplicated) |
//! | start | `startDate`, `startTime` (instant, or clock time on `date`) |
//! | end | `endDate`, `endTime` (instant, or clock time on `date`) |
//!
//! A roster is read-only from the validator's side; entries borrow it.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::reference::resolve_identifier;
use super::ShiftWindow;
use crate::error::RosterError;
use crate::time::{combine_values, instant_from_value};

const ID_FIELDS: [&str; 2] = ["_id", "id"];
const WORKER_FIELDS: [&str; 2] = ["worker", "workerId"];
const DATE_FIELD: &str = "date";

/// Snapshot of existing assignments, as fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    records: Vec<Value>,
}

/// Borrowed view over one roster record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterEntry<'a> {
    record: &'a Value,
}

impl Roster {
    /// Creates a roster from already-split records.
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Creates a roster from a JSON value, which must be an array.
    pub fn from_value(value: Value) -> Result<Self, RosterError> {
        match value {
            Value::Array(records) => Ok(Self { records }),
            other => Err(RosterError::NotAList(json_kind(&other))),
        }
    }

    /// Parses a roster from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, RosterError> {
        Self::from_value(serde_json::from_str(s)?)
    }

    /// Adds a record.
    pub fn with_record(mut self, record: Value) -> Self {
        self.records.push(record);
        self
    }

    /// All entries, in fetch order.
    pub fn entries(&self) -> impl Iterator<Item = RosterEntry<'_>> {
        self.records.iter().map(RosterEntry::new)
    }

    /// Entries assigned to the given worker.
    pub fn for_worker(&self, worker_id: &str) -> Vec<RosterEntry<'_>> {
        self.entries()
            .filter(|e| e.has_worker(worker_id))
            .collect()
    }

    /// Entries starting on the given calendar day.
    pub fn on_day(&self, day: NaiveDate) -> Vec<RosterEntry<'_>> {
        self.entries()
            .filter(|e| e.schedule_start().map(|s| s.date()) == Some(day))
            .collect()
    }

    /// Number of entries whose start or end cannot be read.
    pub fn malformed_count(&self) -> usize {
        self.entries().filter(|e| e.interval().is_none()).count()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the roster has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raw records.
    pub fn records(&self) -> &[Value] {
        &self.records
    }
}

impl From<Vec<Value>> for Roster {
    fn from(records: Vec<Value>) -> Self {
        Self::new(records)
    }
}

impl<'a> RosterEntry<'a> {
    /// Wraps a record.
    pub fn new(record: &'a Value) -> Self {
        Self { record }
    }

    /// The underlying record.
    pub fn record(&self) -> &'a Value {
        self.record
    }

    /// Resolved record identifier.
    pub fn id(&self) -> Option<String> {
        ID_FIELDS
            .iter()
            .filter_map(|key| self.record.get(key))
            .find_map(resolve_identifier)
    }

    /// Resolved worker identifiers from the primary and fallback fields.
    pub fn worker_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::with_capacity(WORKER_FIELDS.len());
        for id in WORKER_FIELDS
            .iter()
            .filter_map(|key| self.record.get(key))
            .filter_map(resolve_identifier)
        {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// Whether the record is assigned to `worker_id`.
    pub fn has_worker(&self, worker_id: &str) -> bool {
        self.worker_ids().iter().any(|id| id == worker_id)
    }

    /// Start instant, or `None` if no known field parses.
    pub fn schedule_start(&self) -> Option<NaiveDateTime> {
        self.instant("startDate", "startTime")
    }

    /// End instant, or `None` if no known field parses.
    pub fn schedule_end(&self) -> Option<NaiveDateTime> {
        self.instant("endDate", "endTime")
    }

    /// Start and end together.
    pub fn interval(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.schedule_start()?, self.schedule_end()?))
    }

    /// Resolved window for the given worker, if start and end both parse.
    pub fn window_for(&self, worker_id: &str) -> Option<ShiftWindow> {
        let (start, end) = self.interval()?;
        Some(ShiftWindow::new(worker_id, start, end))
    }

    fn instant(&self, date_field: &str, time_field: &str) -> Option<NaiveDateTime> {
        if let Some(instant) = self.record.get(date_field).and_then(instant_from_value) {
            return Some(instant);
        }
        let time = self.record.get(time_field)?;
        instant_from_value(time).or_else(|| {
            self.record
                .get(DATE_FIELD)
                .and_then(|date| combine_values(date, time))
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
