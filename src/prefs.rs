use crate::config::Config;
use log::{error, warn};
use rusqlite::{Connection, OptionalExtension};
use std::fmt;
use std::fs;

pub const THEME_KEY: &str = "portfolio-theme";
pub const NAME_KEY: &str = "portfolio-preferred-name";
pub const GRID_KEY: &str = "portfolio-project-grid-visible";
pub const SORT_KEY: &str = "portfolio-project-sort";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefsError;

impl fmt::Display for PrefsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preference store error")
    }
}

impl std::error::Error for PrefsError {}

/// The local key-value preference store. Writes are fallible but never
/// fatal: callers log the failure and carry on without persistence, the way
/// a browser page shrugs off a full or locked localStorage.
pub struct Prefs {
    conn: Connection,
}

impl fmt::Debug for Prefs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Prefs {}")
    }
}

impl Prefs {
    const SCHEMA: &'static str =
        "CREATE TABLE IF NOT EXISTS prefs (key TEXT PRIMARY KEY, value TEXT NOT NULL);";

    pub fn open(config: &Config) -> Result<Self, PrefsError> {
        let conn = if config.should_cache() {
            let path = config.db_path();
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            match Connection::open(&path) {
                Ok(conn) => conn,
                Err(err) => {
                    // Degrade to a session-only store rather than refusing
                    // to start.
                    warn!("could not open {} ({err}), preferences will not persist", path.display());
                    Connection::open_in_memory().map_err(|_| PrefsError)?
                }
            }
        } else {
            Connection::open_in_memory().map_err(|_| PrefsError)?
        };

        conn.execute_batch(Self::SCHEMA).map_err(|_| PrefsError)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Self {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(Self::SCHEMA).unwrap();
        Self { conn }
    }

    /// Absence means "no preference set", never an error. Read failures are
    /// logged and collapse to absence as well.
    pub fn get(&self, key: &str) -> Option<String> {
        let result = self
            .conn
            .query_row("SELECT value FROM prefs WHERE key = ?1", [key], |row| row.get(0))
            .optional();

        match result {
            Ok(value) => value,
            Err(err) => {
                error!("failed to read preference {key}: {err}");
                None
            }
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO prefs (key, value) VALUES (?1, ?2)",
                [key, value],
            )
            .map(|_| ())
            .map_err(|err| {
                error!("failed to write preference {key}: {err}");
                PrefsError
            })
    }

    pub fn remove(&self, key: &str) -> Result<(), PrefsError> {
        self.conn
            .execute("DELETE FROM prefs WHERE key = ?1", [key])
            .map(|_| ())
            .map_err(|err| {
                error!("failed to remove preference {key}: {err}");
                PrefsError
            })
    }
}
