//! Pickup Roster Core Library
//!
//! Day-scoped attendance storage, the shared notion of "today", and the
//! background task that clears stale sign-ups at every local midnight.

pub mod clock;
pub mod error;
pub mod memory;
pub mod ports;
pub mod scheduler;
pub mod types;

pub use clock::{next_midnight, until_next_midnight, Clock, SystemClock};
pub use error::{Result, RosterError};
pub use memory::MemoryStore;
pub use ports::AttendanceStore;
pub use scheduler::ResetScheduler;
pub use types::{AddOutcome, AttendanceRecord, Day};
