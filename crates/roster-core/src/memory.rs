//! In-memory attendance store using DashMap

use crate::ports::AttendanceStore;
use crate::types::{AddOutcome, Day};
use crate::Result;
use async_trait::async_trait;
use dashmap::DashMap;

/// Non-durable [`AttendanceStore`]; contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    days: DashMap<Day, Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn add_if_absent(&self, name: &str, day: &Day) -> Result<AddOutcome> {
        // The entry guard locks the shard across the check and the push
        let mut names = self.days.entry(*day).or_default();
        if names.iter().any(|n| n == name) {
            return Ok(AddOutcome::AlreadyExists);
        }
        names.push(name.to_string());
        Ok(AddOutcome::Inserted)
    }

    async fn list_for_day(&self, day: &Day) -> Result<Vec<String>> {
        Ok(self
            .days
            .get(day)
            .map(|names| names.clone())
            .unwrap_or_default())
    }

    async fn purge_before(&self, day: &Day) -> Result<u64> {
        let mut removed = 0u64;
        self.days.retain(|d, names| {
            if d < day {
                removed += names.len() as u64;
                false
            } else {
                true
            }
        });
        Ok(removed)
    }
}
