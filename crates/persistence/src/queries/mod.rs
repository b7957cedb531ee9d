// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only event queries.

use diesel::prelude::*;
use fairway_domain::{Event, EventId};
use tracing::debug;

use crate::data_models::EventRow;
use crate::diesel_schema::events;
use crate::error::PersistenceError;

/// Loads every stored event in id order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_events(conn: &mut SqliteConnection) -> Result<Vec<Event>, PersistenceError> {
    let rows: Vec<EventRow> = events::table
        .order(events::event_id.asc())
        .select(EventRow::as_select())
        .load(conn)?;
    debug!(count = rows.len(), "Loaded events");
    rows.into_iter().map(EventRow::into_event).collect()
}

/// Loads one top-level event.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
pub fn get_event(
    conn: &mut SqliteConnection,
    event_id: &EventId,
) -> Result<Option<Event>, PersistenceError> {
    events::table
        .find(event_id.as_str())
        .select(EventRow::as_select())
        .first(conn)
        .optional()?
        .map(EventRow::into_event)
        .transpose()
}

/// Counts stored events of one type.
///
/// # Errors
///
/// Returns an error if the query fails.
#[cfg(test)]
pub fn count_events_of_type(
    conn: &mut SqliteConnection,
    event_type: &str,
) -> Result<i64, PersistenceError> {
    Ok(events::table
        .filter(events::event_type.eq(event_type))
        .count()
        .get_result(conn)?)
}
