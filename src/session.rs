//! Session-scoped persistence: one JSON blob under one well-known key.
//!
//! The blob is written wholesale on save and read wholesale on load; there
//! are no partial updates and no schema versioning. Each save records the
//! payload's SHA-256 so a log line can tie a later load back to the exact
//! bytes that were stored.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::logging::{log, obj, v_num, v_str, Domain, Level};

pub struct SessionStore {
    conn: Connection,
    storage_key: String,
}

fn payload_sha256(payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hex::encode(hasher.finalize())
}

impl SessionStore {
    pub fn open(cfg: &Config) -> Result<Self> {
        let conn = Connection::open(&cfg.sqlite_path)
            .with_context(|| format!("cannot open session store at {}", cfg.sqlite_path))?;
        Ok(Self {
            conn,
            storage_key: cfg.storage_key.clone(),
        })
    }

    pub fn init(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "BEGIN;
            CREATE TABLE IF NOT EXISTS session (
                key TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                content_sha256 TEXT NOT NULL,
                saved_at TEXT NOT NULL
            );
            COMMIT;",
        )?;
        Ok(())
    }

    /// Serialize and store the value under the configured key, replacing
    /// whatever was there. Returns the payload's content hash.
    pub fn save<T: Serialize>(&mut self, value: &T) -> Result<String> {
        let payload = serde_json::to_string(value)?;
        let hash = payload_sha256(&payload);
        self.conn.execute(
            "INSERT INTO session (key, payload, content_sha256, saved_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                content_sha256 = excluded.content_sha256,
                saved_at = excluded.saved_at",
            params![self.storage_key, payload, hash, crate::logging::ts_now()],
        )?;
        log(
            Level::Info,
            Domain::Session,
            "saved",
            obj(&[
                ("key", v_str(&self.storage_key)),
                ("content_sha256", v_str(&hash)),
                ("bytes", v_num(payload.len() as f64)),
            ]),
        );
        Ok(hash)
    }

    /// Read back the stored blob, if any.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        let row: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM session WHERE key = ?1",
                params![self.storage_key],
                |row| row.get(0),
            )
            .optional()?;
        match row {
            Some(payload) => {
                let value = serde_json::from_str(&payload)
                    .with_context(|| format!("stored blob under {} is not valid JSON", self.storage_key))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    pub fn clear(&mut self) -> Result<()> {
        self.conn
            .execute("DELETE FROM session WHERE key = ?1", params![self.storage_key])?;
        Ok(())
    }
}
