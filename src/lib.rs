//! Worker shift validation for property-maintenance scheduling.
//!
//! Decides whether a candidate work assignment (worker, building, day,
//! start and end time, task) may be committed against the roster of
//! assignments already on file. The crate is pure: no I/O, no shared
//! state, and the roster is only ever borrowed.
//!
//! # Modules
//!
//! - **`models`**: `Reference`, `Assignment`, `ApprovedAssignment`,
//!   `Roster`, `RosterEntry`, `ShiftWindow`
//! - **`time`**: date, clock and instant parsing; `combine_date_and_time`
//! - **`validation`**: `find_overlaps` and the `ScheduleValidator` pipeline
//! - **`config`**: `ValidatorConfig` limits
//! - **`error`**: `RosterError` for malformed roster input
//!
//! # Example
//!
//! ```
//! use crew_schedule::{Assignment, Roster, ScheduleValidator};
//! use serde_json::json;
//!
//! let roster = Roster::new(vec![json!({
//!     "_id": "s1",
//!     "worker": { "_id": "W1" },
//!     "startDate": "2024-03-01T09:00:00",
//!     "endDate": "2024-03-01T11:00:00"
//! })]);
//!
//! let candidate = Assignment::new("W1", "B1")
//!     .on("2024-03-01")
//!     .between("10:00", "12:00")
//!     .with_task("Repair gutter");
//!
//! let outcome = ScheduleValidator::default().validate(&candidate, &roster);
//! assert!(!outcome.is_approved());
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod time;
pub mod validation;

pub use config::ValidatorConfig;
pub use error::RosterError;
pub use models::{
    resolve_identifier, ApprovedAssignment, Assignment, AssignmentStatus, Reference, Roster,
    RosterEntry, ShiftWindow,
};
pub use time::combine_date_and_time;
pub use validation::{
    find_overlaps, ScheduleValidator, ValidationError, ValidationErrorKind, ValidationOutcome,
    ValidationStage,
};
