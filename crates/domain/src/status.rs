// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date-driven event lifecycle.
//!
//! Status is never set by an operator; it is always derived from the event's
//! dates relative to "today". The caller decides what "today" is, usually by
//! converting the current instant into the club's time zone with
//! [`local_date`].

use crate::error::DomainError;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// Lifecycle status of a tournament, tour or round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Starts after today.
    #[default]
    Upcoming,
    /// Today falls within the event's dates.
    Active,
    /// Ended before today.
    Completed,
}

impl EventStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Returns whether moving from `self` to `next` completes the event.
    #[must_use]
    pub const fn completes_into(&self, next: Self) -> bool {
        !matches!(self, Self::Completed) && matches!(next, Self::Completed)
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives an event's status from its date range.
///
/// `start <= today <= end` is active, `end < today` is completed, anything
/// else is upcoming. Total over all inputs, including inverted ranges.
#[must_use]
pub fn derive_status(start: Date, end: Date, today: Date) -> EventStatus {
    if start <= today && today <= end {
        EventStatus::Active
    } else if end < today {
        EventStatus::Completed
    } else {
        EventStatus::Upcoming
    }
}

/// Resolves an IANA time zone name such as `America/Chicago`.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeZone` if the name is unknown.
pub fn parse_time_zone(name: &str) -> Result<Tz, DomainError> {
    name.parse::<Tz>()
        .map_err(|_| DomainError::InvalidTimeZone(name.to_string()))
}

/// Returns the calendar date of `now` as observed in `tz`.
///
/// # Errors
///
/// Returns `DomainError::DateConversion` if the local date cannot be
/// represented as a `time::Date`.
pub fn local_date(now: DateTime<Utc>, tz: Tz) -> Result<Date, DomainError> {
    let local = now.with_timezone(&tz).date_naive();
    let month_number: u8 = u8::try_from(local.month())
        .map_err(|e| DomainError::DateConversion(e.to_string()))?;
    let month: Month =
        Month::try_from(month_number).map_err(|e| DomainError::DateConversion(e.to_string()))?;
    let day: u8 =
        u8::try_from(local.day()).map_err(|e| DomainError::DateConversion(e.to_string()))?;
    Date::from_calendar_date(local.year(), month, day)
        .map_err(|e| DomainError::DateConversion(e.to_string()))
}
