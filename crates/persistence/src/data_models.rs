// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use fairway_domain::Event;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::diesel_schema::events;
use crate::error::PersistenceError;

/// A stored event row.
///
/// `event_type`, `name` and `status` duplicate fields of the JSON body so
/// the table can be inspected and filtered without parsing documents.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EventRow {
    pub event_id: String,
    pub event_type: String,
    pub name: String,
    pub status: String,
    pub body_json: String,
    pub updated_at: String,
}

impl EventRow {
    /// Decodes the stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a valid event or describes a
    /// different event than the row's key columns.
    pub fn into_event(self) -> Result<Event, PersistenceError> {
        let event: Event = serde_json::from_str(&self.body_json)?;
        if event.id().as_str() != self.event_id {
            return Err(PersistenceError::InconsistentEvent {
                event_id: self.event_id,
                reason: format!("body describes event '{}'", event.id()),
            });
        }
        if event.kind().as_str() != self.event_type {
            return Err(PersistenceError::InconsistentEvent {
                event_id: self.event_id,
                reason: format!(
                    "row is typed '{}' but body is a {}",
                    self.event_type,
                    event.kind()
                ),
            });
        }
        Ok(event)
    }
}

/// Row written by a put.
#[derive(Debug, Insertable)]
#[diesel(table_name = events)]
pub struct NewEventRow<'a> {
    pub event_id: &'a str,
    pub event_type: &'static str,
    pub name: &'a str,
    pub status: &'static str,
    pub body_json: String,
    pub updated_at: String,
}

impl<'a> NewEventRow<'a> {
    /// Encodes an event for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the event or timestamp cannot be serialized.
    pub fn from_event(event: &'a Event, now: OffsetDateTime) -> Result<Self, PersistenceError> {
        Ok(Self {
            event_id: event.id().as_str(),
            event_type: event.kind().as_str(),
            name: event.name(),
            status: event.status().as_str(),
            body_json: serde_json::to_string(event)?,
            updated_at: now.format(&Rfc3339)?,
        })
    }
}
