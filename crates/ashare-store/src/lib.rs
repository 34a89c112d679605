#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ashare-rs/ashare/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SQLite-backed starred-stocks watchlist store.
//!
//! Persists the stocks a user has starred in the web interface. One row per
//! (user, stock code) pair; the schema is created on open.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

use ashare_core::{AshareError, Result};

/// User id used when the caller doesn't identify one.
pub const DEFAULT_USER: &str = "default_user";

/// One starred stock as stored for a user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarredStock {
    /// The starred stock code.
    pub stock_code: String,
    /// Display name captured at star time.
    pub stock_name: String,
    /// Owning user id.
    pub user_id: String,
    /// When the stock was starred.
    pub created_at: DateTime<Utc>,
}

/// SQLite-backed store for starred stocks.
///
/// The connection is wrapped in a `Mutex`; every operation is a single
/// short statement, so callers use the store synchronously.
#[derive(Debug)]
pub struct StarredStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl StarredStore {
    /// Open (or create) the store at the given path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or schema creation
    /// fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn =
            Connection::open(path.as_ref()).map_err(|e| AshareError::Store(e.to_string()))?;
        let store = Self {
            conn: Mutex::new(conn),
            path: Some(path.as_ref().to_path_buf()),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Create an in-memory store.
    ///
    /// Useful for testing; data is lost when the store is dropped.
    ///
    /// # Errors
    /// Returns an error if schema creation fails.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| AshareError::Store(e.to_string()))?;
        let store = Self {
            conn: Mutex::new(conn),
            path: None,
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS starred_stocks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                stock_code TEXT NOT NULL,
                stock_name TEXT NOT NULL,
                user_id TEXT NOT NULL DEFAULT 'default_user',
                created_at TEXT NOT NULL,
                UNIQUE (user_id, stock_code)
            )",
            [],
        )
        .map_err(|e| AshareError::Store(e.to_string()))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_starred_stock_code
             ON starred_stocks(stock_code)",
            [],
        )
        .map_err(|e| AshareError::Store(e.to_string()))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_starred_user_id
             ON starred_stocks(user_id)",
            [],
        )
        .map_err(|e| AshareError::Store(e.to_string()))?;

        debug!("Starred-stocks schema initialized");
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| AshareError::Store(e.to_string()))
    }

    /// Star a stock for a user.
    ///
    /// Returns `Ok(false)` without modifying anything when the stock is
    /// already starred for that user.
    pub fn add(&self, stock_code: &str, stock_name: &str, user_id: &str) -> Result<bool> {
        if self.is_starred(stock_code, user_id)? {
            debug!(stock_code, user_id, "stock already starred");
            return Ok(false);
        }

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO starred_stocks (stock_code, stock_name, user_id, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![stock_code, stock_name, user_id, Utc::now().to_rfc3339()],
        )
        .map_err(|e| AshareError::Store(e.to_string()))?;

        info!(stock_code, stock_name, "added starred stock");
        Ok(true)
    }

    /// Unstar a stock for a user.
    ///
    /// Returns `Ok(false)` when the stock was not starred.
    pub fn remove(&self, stock_code: &str, user_id: &str) -> Result<bool> {
        let conn = self.lock()?;
        let affected = conn
            .execute(
                "DELETE FROM starred_stocks WHERE stock_code = ?1 AND user_id = ?2",
                params![stock_code, user_id],
            )
            .map_err(|e| AshareError::Store(e.to_string()))?;

        if affected > 0 {
            info!(stock_code, "removed starred stock");
        } else {
            debug!(stock_code, "stock not in starred list");
        }
        Ok(affected > 0)
    }

    /// List a user's starred stocks, most recently starred first.
    pub fn list(&self, user_id: &str) -> Result<Vec<StarredStock>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT stock_code, stock_name, user_id, created_at
                 FROM starred_stocks
                 WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC",
            )
            .map_err(|e| AshareError::Store(e.to_string()))?;

        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .map_err(|e| AshareError::Store(e.to_string()))?;

        let mut stocks = Vec::new();
        for row in rows {
            let (stock_code, stock_name, user_id, created_at) =
                row.map_err(|e| AshareError::Store(e.to_string()))?;
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| AshareError::Store(e.to_string()))?
                .with_timezone(&Utc);
            stocks.push(StarredStock {
                stock_code,
                stock_name,
                user_id,
                created_at,
            });
        }

        debug!(user_id, count = stocks.len(), "listed starred stocks");
        Ok(stocks)
    }

    /// Check whether a stock is starred by a user.
    pub fn is_starred(&self, stock_code: &str, user_id: &str) -> Result<bool> {
        let conn = self.lock()?;
        let id: Option<i64> = conn
            .query_row(
                "SELECT id FROM starred_stocks WHERE stock_code = ?1 AND user_id = ?2",
                params![stock_code, user_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| AshareError::Store(e.to_string()))?;
        Ok(id.is_some())
    }

    /// Remove every starred stock of a user.
    ///
    /// Returns the number of rows removed.
    pub fn clear_all(&self, user_id: &str) -> Result<usize> {
        let conn = self.lock()?;
        let removed = conn
            .execute(
                "DELETE FROM starred_stocks WHERE user_id = ?1",
                params![user_id],
            )
            .map_err(|e| AshareError::Store(e.to_string()))?;

        info!(user_id, removed, "cleared starred stocks");
        Ok(removed)
    }

    /// Count a user's starred stocks.
    pub fn count(&self, user_id: &str) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM starred_stocks WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .map_err(|e| AshareError::Store(e.to_string()))?;
        Ok(count as usize)
    }

    /// Copy the database file to a backup location.
    ///
    /// Without an explicit path the backup lands next to the database as
    /// `stocks_backup_<timestamp>.db`. In-memory stores cannot be backed up.
    pub fn backup(&self, backup_path: Option<&Path>) -> Result<PathBuf> {
        let Some(db_path) = &self.path else {
            return Err(AshareError::Store(
                "cannot back up an in-memory store".to_string(),
            ));
        };

        let target = match backup_path {
            Some(path) => path.to_path_buf(),
            None => {
                let stamp = Utc::now().format("%Y%m%d_%H%M%S");
                let name = format!("stocks_backup_{stamp}.db");
                db_path.parent().unwrap_or_else(|| Path::new(".")).join(name)
            }
        };

        std::fs::copy(db_path, &target).map_err(|e| AshareError::Store(e.to_string()))?;
        info!(target = %target.display(), "database backed up");
        Ok(target)
    }
}
