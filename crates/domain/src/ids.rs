// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identifier newtypes.
//!
//! Identifiers are opaque strings. Fresh identifiers are UUID v4 strings;
//! they are generated at the API boundary so that state transitions stay
//! deterministic.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier.
            ///
            /// # Errors
            ///
            /// Returns an error if the identifier is empty after trimming.
            pub fn new(value: &str) -> Result<Self, DomainError> {
                let trimmed: &str = value.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::InvalidId($kind));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Generates a fresh random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a Tournament, Tour or Round.
    ///
    /// Tournament and round ids are unique across the whole event
    /// collection, nested or not.
    EventId,
    "event"
);

string_id!(
    /// Identifier of a joined player.
    PlayerId,
    "player"
);

string_id!(
    /// Identifier of a team within a tournament or tour.
    TeamId,
    "team"
);

/// A normalized email address.
///
/// Emails identify a player before they have joined an event, so they are
/// trimmed and lowercased on construction to make comparisons
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parses and normalizes an email address.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmail` unless the address has exactly one
    /// `@` with non-empty text on both sides and no whitespace.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let normalized: String = value.trim().to_lowercase();
        let mut parts = normalized.split('@');
        let local: &str = parts.next().unwrap_or_default();
        let domain: Option<&str> = parts.next();

        match (domain, parts.next()) {
            (Some(domain), None)
                if !local.is_empty()
                    && !domain.is_empty()
                    && !normalized.chars().any(char::is_whitespace) =>
            {
                Ok(Self(normalized))
            }
            _ => Err(DomainError::InvalidEmail(format!(
                "'{}' is not a valid email address",
                value.trim()
            ))),
        }
    }

    /// Returns the normalized address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
