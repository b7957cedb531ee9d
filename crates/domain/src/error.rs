// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ids::{PlayerId, TeamId};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An email address is empty or malformed.
    InvalidEmail(String),
    /// A display name is empty or invalid.
    InvalidName(String),
    /// An identifier is empty.
    InvalidId(&'static str),
    /// A date range ends before it starts.
    InvalidDateRange {
        /// The first day of the range.
        start_date: time::Date,
        /// The last day of the range.
        end_date: time::Date,
    },
    /// A course hole count is outside 1..=18.
    InvalidHoleCount {
        /// The rejected hole count.
        holes: u8,
    },
    /// A hole number falls outside the round's course.
    InvalidHoleNumber {
        /// The rejected hole number.
        hole: u8,
        /// The number of holes on the course.
        holes: u8,
    },
    /// Course par must be positive.
    InvalidCoursePar {
        /// The rejected par value.
        par: u16,
    },
    /// A per-hole score or par of zero.
    InvalidStrokeCount {
        /// The rejected value.
        value: u8,
    },
    /// Match points cannot be negative or non-finite.
    InvalidMatchPoints(String),
    /// The requested team does not exist in the event.
    TeamNotFound(TeamId),
    /// A team with this name already exists in the event.
    DuplicateTeamName(String),
    /// The captain must be a current member of the team.
    InvalidCaptain {
        /// The team being captained.
        team_id: TeamId,
        /// The player who is not on that team.
        player_id: PlayerId,
    },
    /// The player is not a participant of the event.
    PlayerNotEnrolled(PlayerId),
    /// A time zone name could not be resolved.
    InvalidTimeZone(String),
    /// A calendar date could not be converted between date libraries.
    DateConversion(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidId(kind) => write!(f, "Invalid {kind} id: must not be empty"),
            Self::InvalidDateRange {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "End date {end_date} must not be before start date {start_date}"
                )
            }
            Self::InvalidHoleCount { holes } => {
                write!(f, "Invalid hole count: {holes}. Must be between 1 and 18")
            }
            Self::InvalidHoleNumber { hole, holes } => {
                write!(f, "Invalid hole number: {hole}. Course has {holes} holes")
            }
            Self::InvalidCoursePar { par } => {
                write!(f, "Invalid course par: {par}. Must be greater than 0")
            }
            Self::InvalidStrokeCount { value } => {
                write!(f, "Invalid stroke count: {value}. Must be greater than 0")
            }
            Self::InvalidMatchPoints(msg) => write!(f, "Invalid match points: {msg}"),
            Self::TeamNotFound(team_id) => write!(f, "Team '{team_id}' not found"),
            Self::DuplicateTeamName(name) => write!(f, "Team '{name}' already exists"),
            Self::InvalidCaptain { team_id, player_id } => {
                write!(
                    f,
                    "Player '{player_id}' cannot captain team '{team_id}': not a team member"
                )
            }
            Self::PlayerNotEnrolled(player_id) => {
                write!(f, "Player '{player_id}' is not enrolled in this event")
            }
            Self::InvalidTimeZone(name) => write!(f, "Unknown time zone '{name}'"),
            Self::DateConversion(msg) => write!(f, "Date conversion failed: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
