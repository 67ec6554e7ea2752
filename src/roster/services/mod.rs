//! Application services for class roster membership.

mod membership;

pub use membership::{RosterMembershipError, RosterMembershipResult, RosterMembershipService};
