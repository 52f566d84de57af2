//! Shift scheduling domain models.
//!
//! Provides the data types a validator works over: references to workers
//! and buildings, candidate and approved assignments, resolved shift
//! windows, and the roster of persisted assignments.
//!
//! # Shapes
//!
//! | Type | Form |
//! |------|------|
//! | `Reference` | as submitted: bare id or embedded document |
//! | `Assignment` | as submitted: clock times as text |
//! | `RosterEntry` | as persisted: field names vary by provenance |
//! | `ShiftWindow` | resolved: one worker id, one `[start, end)` |
//! | `ApprovedAssignment` | resolved: ready to persist |

mod assignment;
mod reference;
mod roster;
mod window;

pub use assignment::{ApprovedAssignment, Assignment, AssignmentStatus};
pub use reference::{resolve_identifier, Reference};
pub use roster::{Roster, RosterEntry};
pub use window::ShiftWindow;
