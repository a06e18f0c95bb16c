// Copyright 2026 The studyhub developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Persistent viewer preferences: the chosen theme and the last-viewed
//! topic, stored as a small key-value table in SQLite so they survive
//! restarts.

use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;

use rusqlite::Connection;
use rusqlite::params;

use studyhub_core::error::ErrorReport;
use studyhub_core::error::Fallible;

const THEME_KEY: &str = "theme";
const CURRENT_TOPIC_KEY: &str = "currentTopic";

/// The viewer color theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn key(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Unknown stored values fall back to the light theme.
    fn from_key(key: &str) -> Theme {
        match key {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Handle to the state database. Cloning shares the underlying connection.
#[derive(Clone)]
pub struct StateStore {
    conn: Arc<Mutex<Connection>>,
}

impl StateStore {
    pub fn open(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path).map_err(db_err)?;
        Self::init(&conn)?;
        Ok(StateStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// An in-memory store, used by tests and by `serve` when no state file
    /// is configured.
    pub fn open_in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        Self::init(&conn)?;
        Ok(StateStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn init(conn: &Connection) -> Fallible<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS state (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .map_err(db_err)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Fallible<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let result = conn.query_row("SELECT value FROM state WHERE key = ?1", params![key], |row| {
            row.get::<_, String>(0)
        });
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(db_err(e)),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Fallible<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO state (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .map_err(db_err)?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Fallible<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM state WHERE key = ?1", params![key])
            .map_err(db_err)?;
        Ok(())
    }

    pub fn theme(&self) -> Fallible<Theme> {
        let value = self.get(THEME_KEY)?;
        Ok(value.as_deref().map(Theme::from_key).unwrap_or(Theme::Light))
    }

    pub fn set_theme(&self, theme: Theme) -> Fallible<()> {
        self.set(THEME_KEY, theme.key())
    }

    pub fn current_topic(&self) -> Fallible<Option<String>> {
        self.get(CURRENT_TOPIC_KEY)
    }

    pub fn set_current_topic(&self, key: &str) -> Fallible<()> {
        self.set(CURRENT_TOPIC_KEY, key)
    }

    pub fn clear_current_topic(&self) -> Fallible<()> {
        self.remove(CURRENT_TOPIC_KEY)
    }
}

fn db_err(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::new(format!("State store error: {e}"))
}
