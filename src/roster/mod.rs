//! Class roster membership management.
//!
//! Roster entries mirror the task recycle-bin lifecycle on a sub-document:
//! removing a student sets a removal marker that opens a restore window, and
//! the retention sweep permanently strikes entries whose marker has outlived
//! it. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
