//! SQLite connection handling and schema setup.

use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use crate::error::StorageError;

/// A pooled SQLite connection
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Handle to the birthday database.
///
/// Owns its connection pool exclusively; holds no other state.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Open (or create) the database at `path` and make sure the schema exists.
    ///
    /// `:memory:` opens a private in-memory database backed by a single
    /// connection, so every checkout sees the same data.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let pool = if path == ":memory:" {
            Pool::builder()
                .max_size(1)
                .build(SqliteConnectionManager::memory())?
        } else {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        log::error!("Failed to create database directory: {}", e);
                        StorageError::Io(e)
                    })?;
                }
            }

            let manager = SqliteConnectionManager::file(path)
                .with_init(|c| c.execute_batch("PRAGMA busy_timeout=5000; PRAGMA journal_mode=WAL;"));
            Pool::builder()
                .max_size(4)
                .min_idle(Some(1))
                .build(manager)?
        };

        let db = Self { pool };
        db.init_tables()?;
        Ok(db)
    }

    /// Check out a connection
    pub fn conn(&self) -> Result<DbConn, StorageError> {
        Ok(self.pool.get()?)
    }

    fn init_tables(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS birthdays (
                user_id TEXT PRIMARY KEY,
                username TEXT NOT NULL,
                birthday TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_birthdays_birthday ON birthdays(birthday)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                guild_id TEXT PRIMARY KEY,
                notification_channel TEXT
            )",
            [],
        )?;

        log::info!("Database: birthdays and settings tables ready");
        Ok(())
    }
}
