//! Persistence of ghost replay records.
//!
//! Backends only know string keys and string values; [`ReplayStore`] owns the
//! key format and the JSON encoding of a record.

use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::error::Result;
use crate::text_generator::TextId;
use crate::timing::TypingProgress;

/// Prefix of every replay record key
pub const KEY_PREFIX: &str = "typing-progress-";

/// Abstract string-keyed persistent store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Process-local store; nothing survives a restart. Clones share the same map.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// SQLite-backed store; one row per key, last write wins
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS replay_records (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            [],
        )?;
        Ok(Self { conn })
    }

    /// Number of stored records
    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM replay_records", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM replay_records WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO replay_records (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

/// Replay records keyed by text identity.
///
/// Every failure degrades to "no record": reads return `None`, writes are
/// dropped. Both are logged.
pub struct ReplayStore {
    backend: Box<dyn KeyValueStore>,
}

impl ReplayStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    pub fn key_for(text_id: &TextId) -> String {
        format!("{KEY_PREFIX}{text_id}")
    }

    pub fn load(&self, text_id: &TextId) -> Option<Vec<TypingProgress>> {
        let key = Self::key_for(text_id);
        let raw = match self.backend.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(%key, %err, "replay record read failed");
                return None;
            }
        };

        match serde_json::from_str::<Vec<TypingProgress>>(&raw) {
            Ok(record) => {
                debug!(%key, steps = record.len(), "replay record loaded");
                Some(record)
            }
            Err(err) => {
                warn!(%key, %err, "replay record is not decodable, ignoring");
                None
            }
        }
    }

    /// Returns true if the record reached the backend
    pub fn save(&mut self, text_id: &TextId, record: &[TypingProgress]) -> bool {
        let key = Self::key_for(text_id);
        let encoded = match serde_json::to_string(record) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(%key, %err, "replay record could not be encoded");
                return false;
            }
        };

        match self.backend.set(&key, &encoded) {
            Ok(()) => {
                debug!(%key, steps = record.len(), "replay record saved");
                true
            }
            Err(err) => {
                warn!(%key, %err, "replay record write failed");
                false
            }
        }
    }
}

impl std::fmt::Debug for ReplayStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplayStore").finish_non_exhaustive()
    }
}
