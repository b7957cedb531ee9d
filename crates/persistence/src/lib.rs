// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Fairway.
//!
//! Events are stored as a flat collection of top-level JSON documents keyed
//! by id. The [`EventRepository`] trait is the only contract the rest of the
//! system depends on; this crate ships an in-memory implementation and a
//! Diesel-backed `SQLite` one.
//!
//! ## `SQLite`
//!
//! - Migrations are embedded and run on open
//! - In-memory databases get a unique shared-cache name per instance
//! - File databases run in WAL mode
//! - A transition's changes are committed in one database transaction

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use fairway_domain::{Event, EventId};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod repository;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use repository::{EventRepository, InMemoryRepository};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `SQLite` event repository.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a repository over a fresh in-memory `SQLite` database.
    ///
    /// Each call receives its own database instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:fairway_mem_{db_id}?mode=memory&cache=shared");
        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        Ok(Self { conn })
    }

    /// Opens (or creates) a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;
        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        Ok(Self { conn })
    }

    /// Counts stored events of one kind, e.g. `"tour"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    #[cfg(test)]
    pub fn count_events_of_type(&mut self, event_type: &str) -> Result<i64, PersistenceError> {
        queries::count_events_of_type(&mut self.conn, event_type)
    }
}

impl EventRepository for Persistence {
    fn list(&mut self) -> Result<Vec<Event>, PersistenceError> {
        queries::list_events(&mut self.conn)
    }

    fn get(&mut self, event_id: &EventId) -> Result<Option<Event>, PersistenceError> {
        queries::get_event(&mut self.conn, event_id)
    }

    fn put(&mut self, event: &Event) -> Result<(), PersistenceError> {
        mutations::put_event(&mut self.conn, event, OffsetDateTime::now_utc())
    }

    fn delete(&mut self, event_id: &EventId) -> Result<bool, PersistenceError> {
        mutations::delete_event(&mut self.conn, event_id)
    }

    fn commit(&mut self, changed: &[Event], removed: &[EventId]) -> Result<(), PersistenceError> {
        mutations::commit_changes(&mut self.conn, changed, removed, OffsetDateTime::now_utc())
    }
}
