use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::Connection;
use tracing::{debug, info};

use shared_config::AppConfig;

use crate::schema::SCHEMA;
use crate::{RepoError, RepoResult};

/// Shared SQLite connection.
///
/// The connection sits behind a mutex, so every call holds it exclusively
/// for the length of one statement or transaction.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> RepoResult<Self> {
        debug!("Opening database at {}", path.as_ref().display());
        let conn = Connection::open(path)?;
        Self::bootstrap(conn)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> RepoResult<Self> {
        debug!("Opening in-memory database");
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn)
    }

    pub fn from_config(config: &AppConfig) -> RepoResult<Self> {
        if config.is_in_memory() {
            Self::open_in_memory()
        } else {
            Self::open(&config.database_url)
        }
    }

    fn bootstrap(conn: Connection) -> RepoResult<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(SCHEMA)?;
        info!("Database schema ready");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking thread pool.
    pub async fn run<T, F>(&self, f: F) -> RepoResult<T>
    where
        F: FnOnce(&mut Connection) -> RepoResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| RepoError::Internal("database connection lock poisoned".to_string()))?;
            f(&mut *guard)
        })
        .await
        .map_err(|e| RepoError::Internal(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();

        let tables: Vec<String> = db
            .run(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name",
                )?;
                let names = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(names)
            })
            .await
            .unwrap();

        assert!(tables.contains(&"patients".to_string()));
        assert!(tables.contains(&"appointments".to_string()));
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let db = Database::open_in_memory().unwrap();

        let enabled: i64 = db
            .run(|conn| Ok(conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?))
            .await
            .unwrap();

        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_from_config_in_memory() {
        let config = AppConfig {
            database_url: ":memory:".to_string(),
            ..AppConfig::default()
        };
        assert!(Database::from_config(&config).is_ok());
    }
}
