// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event writes.

use diesel::prelude::*;
use fairway_domain::{Event, EventId};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::data_models::NewEventRow;
use crate::diesel_schema::events;
use crate::error::PersistenceError;

/// Inserts or replaces a top-level event.
///
/// # Errors
///
/// Returns an error if the event cannot be encoded or the write fails.
pub fn put_event(
    conn: &mut SqliteConnection,
    event: &Event,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let row: NewEventRow<'_> = NewEventRow::from_event(event, now)?;
    diesel::replace_into(events::table)
        .values(&row)
        .execute(conn)?;
    debug!(event_id = %event.id(), kind = %event.kind(), "Stored event");
    Ok(())
}

/// Deletes a top-level event. Returns whether a row was removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_event(
    conn: &mut SqliteConnection,
    event_id: &EventId,
) -> Result<bool, PersistenceError> {
    let deleted: usize =
        diesel::delete(events::table.filter(events::event_id.eq(event_id.as_str())))
            .execute(conn)?;
    debug!(event_id = %event_id, deleted, "Deleted event");
    Ok(deleted > 0)
}

/// Writes a transition's changes in one database transaction.
///
/// Either every put and delete lands or none does.
///
/// # Errors
///
/// Returns an error if any write fails; the transaction is rolled back.
pub fn commit_changes(
    conn: &mut SqliteConnection,
    changed: &[Event],
    removed: &[EventId],
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    conn.transaction::<(), PersistenceError, _>(|tx| {
        for event in changed {
            put_event(tx, event, now)?;
        }
        for event_id in removed {
            delete_event(tx, event_id)?;
        }
        Ok(())
    })?;
    info!(
        changed = changed.len(),
        removed = removed.len(),
        "Committed event changes"
    );
    Ok(())
}
