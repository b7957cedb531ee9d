// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use fairway::CoreError;
use fairway_domain::DomainError;
use fairway_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// Absence is never an error here: handlers report it through their
/// response instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The repository could not be read or written.
    #[error("Storage failure: {message}")]
    Storage {
        /// A description of the failure.
        message: String,
    },
}

impl ApiError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn rule(rule: &str, message: String) -> Self {
        Self::DomainRuleViolation {
            rule: rule.to_string(),
            message,
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// Malformed values become `InvalidInput`; rules that depend on the
/// current state of an event become `DomainRuleViolation`.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidEmail(_) => ApiError::invalid("email", message),
        DomainError::InvalidName(_) => ApiError::invalid("name", message),
        DomainError::InvalidId(kind) => ApiError::invalid(&format!("{kind}Id"), message),
        DomainError::InvalidDateRange { .. } => ApiError::invalid("endDate", message),
        DomainError::InvalidHoleCount { .. } => ApiError::invalid("courseDetails.holes", message),
        DomainError::InvalidCoursePar { .. } => ApiError::invalid("courseDetails.par", message),
        DomainError::InvalidHoleNumber { .. } => ApiError::invalid("hole", message),
        DomainError::InvalidStrokeCount { .. } => ApiError::invalid("score", message),
        DomainError::InvalidMatchPoints(_) => ApiError::invalid("points", message),
        DomainError::InvalidTimeZone(_) => ApiError::invalid("timeZone", message),
        DomainError::DateConversion(_) => ApiError::invalid("date", message),
        DomainError::TeamNotFound(_) => ApiError::rule("team_exists", message),
        DomainError::DuplicateTeamName(_) => ApiError::rule("unique_team_name", message),
        DomainError::InvalidCaptain { .. } => ApiError::rule("captain_on_team", message),
        DomainError::PlayerNotEnrolled(_) => ApiError::rule("player_enrolled", message),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::DuplicateId(_) => ApiError::rule("unique_event_id", err.to_string()),
        CoreError::InvalidParent { .. } => ApiError::rule("valid_parent", err.to_string()),
        CoreError::ContainmentViolation(_) => ApiError::Storage {
            message: err.to_string(),
        },
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}
