//! SQLite-backed medium.
//!
//! One `entries` table keyed by storage key. Every call is a synchronous
//! single-row statement.

use std::{path::Path, sync::Mutex};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use crate::{Error, Medium, Result, schema::SCHEMA};

pub struct SqliteMedium {
  conn: Mutex<Connection>,
}

impl SqliteMedium {
  /// Open (or create) a medium at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    if let Some(parent) = path.as_ref().parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent).map_err(|e| Error::Unavailable(e.to_string()))?;
    }
    Self::init(Connection::open(path)?)
  }

  /// Open an in-memory medium.
  pub fn open_in_memory() -> Result<Self> { Self::init(Connection::open_in_memory()?) }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn: Mutex::new(conn) })
  }

  fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> Result<T> {
    let conn = self.conn.lock().map_err(|_| Error::Poisoned)?;
    Ok(f(&conn)?)
  }
}

impl Medium for SqliteMedium {
  fn read(&self, key: &str) -> Result<Option<String>> {
    self.with_conn(|conn| {
      conn
        .query_row(
          "SELECT value FROM entries WHERE key = ?1",
          rusqlite::params![key],
          |row| row.get(0),
        )
        .optional()
    })
  }

  fn write(&self, key: &str, value: &str) -> Result<()> {
    let at = Utc::now().to_rfc3339();
    self.with_conn(|conn| {
      conn.execute(
        "INSERT INTO entries (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        rusqlite::params![key, value, at],
      )?;
      Ok(())
    })
  }

  fn delete(&self, key: &str) -> Result<()> {
    self.with_conn(|conn| {
      conn.execute("DELETE FROM entries WHERE key = ?1", rusqlite::params![key])?;
      Ok(())
    })
  }

  fn clear(&self) -> Result<()> {
    self.with_conn(|conn| {
      conn.execute("DELETE FROM entries", [])?;
      Ok(())
    })
  }
}
