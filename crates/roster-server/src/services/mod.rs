//! Business logic services

pub mod roster;

pub use roster::{Roster, RosterService};
