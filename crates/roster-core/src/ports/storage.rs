//! Storage traits for persistence

use crate::types::{AddOutcome, Day};
use crate::Result;
use async_trait::async_trait;

/// Attendance store, partitioned by day
///
/// Implementations own all records and must keep each call atomic: the
/// existence check and insert in `add_if_absent` form one step, and a purge
/// never leaves a partially removed record behind.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Create the table and its (name, day) uniqueness constraint if missing.
    async fn ensure_schema(&self) -> Result<()>;

    /// Record `name` for `day` unless it is already there.
    async fn add_if_absent(&self, name: &str, day: &Day) -> Result<AddOutcome>;

    /// Names recorded for `day`, in arrival order.
    async fn list_for_day(&self, day: &Day) -> Result<Vec<String>>;

    /// Delete every record dated strictly before `day`. Returns how many went.
    async fn purge_before(&self, day: &Day) -> Result<u64>;
}
