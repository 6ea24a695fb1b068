//! SQLite attendance store (embedded, no external dependencies)

use async_trait::async_trait;
use roster_core::{AddOutcome, AttendanceStore, Day, Result, RosterError};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the database file and make sure the schema exists.
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = Path::new(database_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(storage_error)?;

        tracing::info!("SQLite connection established, ensuring schema...");

        let db = Self { pool };
        db.ensure_schema().await?;

        tracing::info!("Database initialization complete");

        Ok(db)
    }

    /// Release every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl AttendanceStore for Database {
    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS attendance (
                name TEXT NOT NULL,
                day TEXT NOT NULL,
                UNIQUE(name, day)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }

    async fn add_if_absent(&self, name: &str, day: &Day) -> Result<AddOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (name, day) VALUES (?1, ?2)
            ON CONFLICT(name, day) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(day.to_string())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() > 0 => Ok(AddOutcome::Inserted),
            Ok(_) => Ok(AddOutcome::AlreadyExists),
            // Lost a race on the unique constraint
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Ok(AddOutcome::AlreadyExists)
            }
            Err(e) => Err(storage_error(e)),
        }
    }

    async fn list_for_day(&self, day: &Day) -> Result<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT name FROM attendance WHERE day = ?1
            ORDER BY rowid
            "#,
        )
        .bind(day.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(names)
    }

    async fn purge_before(&self, day: &Day) -> Result<u64> {
        let done = sqlx::query(
            r#"
            DELETE FROM attendance WHERE day < ?1
            "#,
        )
        .bind(day.to_string())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(done.rows_affected())
    }
}

fn storage_error(e: sqlx::Error) -> RosterError {
    RosterError::Storage(e.to_string())
}
