//! Assignment lifecycle management.
//!
//! This module implements the task side of the lifecycle core: creating
//! tasks, archiving and unarchiving them, adjusting student visibility while
//! archived, moving tasks to and out of the recycle bin, permanently
//! removing them together with their dependent submissions, and applying any
//! of those transitions to many tasks at once with per-item isolation. Every
//! successful transition appends one entry to the task's append-only
//! operation history, persisted atomically with the state change. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
