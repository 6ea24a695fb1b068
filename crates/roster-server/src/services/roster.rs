//! Roster service: today's sign-ups on top of the attendance store

use roster_core::{AddOutcome, AttendanceRecord, AttendanceStore, Clock, Day, Result};
use std::sync::Arc;
use tracing::info;

/// Outcome of one sign-up request
#[derive(Debug, Clone)]
pub struct SignUp {
    pub record: AttendanceRecord,
    pub outcome: AddOutcome,
}

impl SignUp {
    pub fn message(&self) -> String {
        match self.outcome {
            AddOutcome::Inserted => {
                format!("{} has been added for today's game!", self.record.name)
            }
            AddOutcome::AlreadyExists => {
                format!("{} is already signed up for today!", self.record.name)
            }
        }
    }
}

/// Snapshot of one day's roster
#[derive(Debug, Clone)]
pub struct Roster {
    pub day: Day,
    pub names: Vec<String>,
}

pub struct RosterService {
    store: Arc<dyn AttendanceStore>,
    clock: Arc<dyn Clock>,
}

impl RosterService {
    pub fn new(store: Arc<dyn AttendanceStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn today(&self) -> Day {
        self.clock.today()
    }

    pub async fn sign_up(&self, name: &str) -> Result<SignUp> {
        let day = self.today();
        let outcome = self.store.add_if_absent(name, &day).await?;
        info!("Sign-up: name={:?}, day={}, outcome={:?}", name, day, outcome);

        Ok(SignUp {
            record: AttendanceRecord {
                name: name.to_string(),
                day,
            },
            outcome,
        })
    }

    pub async fn roster(&self) -> Result<Roster> {
        let day = self.today();
        let names = self.store.list_for_day(&day).await?;
        Ok(Roster { day, names })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone};
    use roster_core::MemoryStore;

    struct FixedClock(DateTime<Local>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            self.0
        }
    }

    fn service_at(y: i32, m: u32, d: u32) -> (Arc<MemoryStore>, RosterService) {
        let store = Arc::new(MemoryStore::new());
        let now = Local.with_ymd_and_hms(y, m, d, 18, 30, 0).earliest().unwrap();
        let service = RosterService::new(store.clone(), Arc::new(FixedClock(now)));
        (store, service)
    }

    #[tokio::test]
    async fn test_sign_up_uses_today() {
        let (store, service) = service_at(2024, 6, 1);

        let first = service.sign_up("Alice").await.unwrap();
        assert_eq!(first.outcome, AddOutcome::Inserted);
        assert_eq!(first.record.day.to_string(), "2024-06-01");
        assert_eq!(first.message(), "Alice has been added for today's game!");

        let second = service.sign_up("Alice").await.unwrap();
        assert_eq!(second.outcome, AddOutcome::AlreadyExists);
        assert_eq!(second.message(), "Alice is already signed up for today!");

        let stored = store.list_for_day(&"2024-06-01".parse().unwrap()).await.unwrap();
        assert_eq!(stored, vec!["Alice"]);
    }

    #[tokio::test]
    async fn test_roster_is_scoped_to_today() {
        let (store, service) = service_at(2024, 6, 2);
        store
            .add_if_absent("Yesterday", &"2024-06-01".parse().unwrap())
            .await
            .unwrap();

        service.sign_up("Alice").await.unwrap();
        service.sign_up("Bob").await.unwrap();

        let roster = service.roster().await.unwrap();
        assert_eq!(roster.day.to_string(), "2024-06-02");
        assert_eq!(roster.names, vec!["Alice", "Bob"]);
    }
}
