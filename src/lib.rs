//! Classtask: classroom assignment lifecycle core.
//!
//! This crate implements the server-side lifecycle machinery of a classroom
//! task-management system: teachers archive, soft-delete, restore, and
//! permanently remove assignments, individually or in batches, and a daily
//! retention sweep purges records whose restore window has elapsed.
//!
//! # Architecture
//!
//! Classtask follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, test doubles)
//!
//! # Modules
//!
//! - [`assignment`]: Task aggregate, transition engine, and batch operations
//! - [`roster`]: Class roster entries with an analogous removal lifecycle
//! - [`retention`]: Retention window math, expiry sweep, and daily schedule
//!
//! # Concurrency
//!
//! Each aggregate is read, mutated in memory, and written back whole; the
//! persistence layer's per-record write atomicity keeps state and history
//! consistent. Concurrent transitions on the same task are last-write-wins:
//! callers are expected to be a single teacher acting serially through a UI,
//! and no version counter guards against lost updates.

pub mod assignment;
pub mod retention;
pub mod roster;
