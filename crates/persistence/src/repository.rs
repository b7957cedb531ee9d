// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fairway::EventStore;
use fairway_domain::{Event, EventId};
use std::collections::BTreeMap;

use crate::error::PersistenceError;

/// Storage for top-level events.
///
/// Repositories store only top-level events; nested tournaments and rounds
/// travel inside their owner. Callers mutate through [`EventStore`] and hand
/// the resulting changes to [`Self::commit`].
pub trait EventRepository: Send {
    /// Lists every stored event.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn list(&mut self) -> Result<Vec<Event>, PersistenceError>;

    /// Fetches a top-level event by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&mut self, event_id: &EventId) -> Result<Option<Event>, PersistenceError>;

    /// Inserts or replaces a top-level event.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn put(&mut self, event: &Event) -> Result<(), PersistenceError>;

    /// Deletes a top-level event, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete(&mut self, event_id: &EventId) -> Result<bool, PersistenceError>;

    /// Writes one transition's changes. Puts come before deletes.
    ///
    /// The default runs the individual operations in sequence; backends
    /// with transactions override it to make the write-back atomic.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails.
    fn commit(&mut self, changed: &[Event], removed: &[EventId]) -> Result<(), PersistenceError> {
        for event in changed {
            self.put(event)?;
        }
        for event_id in removed {
            self.delete(event_id)?;
        }
        Ok(())
    }

    /// Loads every event into an indexed store.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or the stored events
    /// break containment.
    fn load_store(&mut self) -> Result<EventStore, PersistenceError> {
        let events: Vec<Event> = self.list()?;
        EventStore::from_events(events).map_err(|err| PersistenceError::InconsistentEvent {
            event_id: String::from("*"),
            reason: err.to_string(),
        })
    }
}

/// A repository kept in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    events: BTreeMap<EventId, Event>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with `events`. Later duplicates win.
    pub fn with_events(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events
                .into_iter()
                .map(|event| (event.id().clone(), event))
                .collect(),
        }
    }

    /// Number of stored events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventRepository for InMemoryRepository {
    fn list(&mut self) -> Result<Vec<Event>, PersistenceError> {
        Ok(self.events.values().cloned().collect())
    }

    fn get(&mut self, event_id: &EventId) -> Result<Option<Event>, PersistenceError> {
        Ok(self.events.get(event_id).cloned())
    }

    fn put(&mut self, event: &Event) -> Result<(), PersistenceError> {
        self.events.insert(event.id().clone(), event.clone());
        Ok(())
    }

    fn delete(&mut self, event_id: &EventId) -> Result<bool, PersistenceError> {
        Ok(self.events.remove(event_id).is_some())
    }
}
