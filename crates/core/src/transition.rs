// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::{Changes, EventStore};
use fairway_domain::{Event, EventId};
use fairway_notify::Notice;
use time::{Date, OffsetDateTime};

/// The clock a transition runs against.
///
/// Transitions never read the system clock; callers supply both the
/// instant (for timestamps) and the local calendar date (for status).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyContext {
    pub today: Date,
    pub now: OffsetDateTime,
}

impl ApplyContext {
    /// Creates a context.
    #[must_use]
    pub const fn new(today: Date, now: OffsetDateTime) -> Self {
        Self { today, now }
    }
}

/// How a command landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The store changed.
    Applied,
    /// The target event, player or team does not exist, or the request is
    /// not valid in the target's current state (for example declining an
    /// email that is not invited). Nothing changed.
    NotFound,
    /// The target exists but the command had no effect.
    Unchanged,
}

/// The result of a state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. `changed` and `removed` describe the single write-back the
/// caller must persist.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The store after the transition, with its change tracking reset.
    pub store: EventStore,
    /// Top-level events to put.
    pub changed: Vec<Event>,
    /// Top-level event ids to delete.
    pub removed: Vec<EventId>,
    /// Notifications for downstream consumers.
    pub notices: Vec<Notice>,
    pub outcome: Outcome,
}

impl Transition {
    /// Packages the mutated store. An `Applied` outcome that touched nothing
    /// is reported as `Unchanged`.
    pub(crate) fn finish(mut store: EventStore, notices: Vec<Notice>, outcome: Outcome) -> Self {
        let Changes { changed, removed } = store.take_changes();
        let outcome: Outcome =
            if outcome == Outcome::Applied && changed.is_empty() && removed.is_empty() {
                Outcome::Unchanged
            } else {
                outcome
            };
        Self {
            store,
            changed,
            removed,
            notices,
            outcome,
        }
    }

    /// Returns whether anything needs to be persisted.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty() || !self.removed.is_empty()
    }
}
