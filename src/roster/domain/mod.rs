//! Domain model for class roster membership.
//!
//! Roster entries carry a removal lifecycle analogous to task deletion: a
//! removal marker opens a restore window, and the retention sweep strikes
//! entries whose marker has outlived it. Each entry additionally keeps an
//! append-only modification history, distinct from the removal marker.

mod error;
mod ids;
mod roster;

pub use error::RosterDomainError;
pub use ids::{ClassId, StudentId};
pub use roster::{
    ClassRoster, ModificationRecord, PersistedRosterData, RemovalState, RosterAction,
    StudentEntry,
};
