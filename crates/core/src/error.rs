// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fairway_domain::{DomainError, EventId, EventKind};

/// Errors that can occur during state transitions.
///
/// Absence is not an error: a transition that cannot find its target
/// reports `Outcome::NotFound` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// An id appears in more than one place in the event collection.
    ContainmentViolation(EventId),
    /// A new event reused an id that already exists.
    DuplicateId(EventId),
    /// A child was attached to an event that cannot hold it.
    InvalidParent {
        /// The requested parent.
        parent: EventId,
        /// What the parent actually is.
        kind: EventKind,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::ContainmentViolation(id) => {
                write!(f, "Event '{id}' appears in more than one place")
            }
            Self::DuplicateId(id) => write!(f, "Event id '{id}' is already in use"),
            Self::InvalidParent { parent, kind } => {
                write!(f, "Event '{parent}' is a {kind} and cannot hold this child")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
