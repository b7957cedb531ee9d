// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::scoring::HoleEntry;
use fairway_domain::{
    CourseDetails, Email, EventId, Highlight, MatchResult, Player, PlayerGroup, PlayerId,
    PointsSystem, Team, TeamId,
};
use time::Date;

/// Descriptive fields of a new tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentDetails {
    pub name: String,
    pub format: String,
    pub start_date: Date,
    pub end_date: Date,
    pub location: String,
    pub is_team_event: bool,
    pub scoring_type: String,
}

/// Descriptive fields of a new tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourDetails {
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub points_system: PointsSystem,
}

/// Descriptive fields of a new round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundDetails {
    pub name: String,
    pub date: Date,
    pub format: String,
    pub course_details: Option<CourseDetails>,
}

/// Partial update of an event's descriptive fields.
///
/// Fields that do not apply to the target's kind are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailsPatch {
    pub name: Option<String>,
    pub format: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    /// Rounds only.
    pub date: Option<Date>,
    /// Rounds only.
    pub course_details: Option<CourseDetails>,
    /// Tours only.
    pub points_system: Option<PointsSystem>,
    /// Tournaments only.
    pub is_team_event: Option<bool>,
    /// Tournaments only.
    pub scoring_type: Option<String>,
}

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes. Every id a command
/// introduces is chosen by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a tournament, standalone or inside a tour.
    CreateTournament {
        id: EventId,
        /// Enrolled as the first player.
        creator: Player,
        details: TournamentDetails,
        tour_id: Option<EventId>,
    },
    /// Create a tour.
    CreateTour {
        id: EventId,
        /// Enrolled as the first player.
        creator: Player,
        details: TourDetails,
    },
    /// Create a round, standalone or inside a tournament or tour.
    CreateRound {
        id: EventId,
        parent: Option<EventId>,
        /// Enrolled in standalone rounds only.
        creator: Option<Player>,
        details: RoundDetails,
    },
    /// Change descriptive fields of any event.
    UpdateDetails { event_id: EventId, patch: DetailsPatch },
    /// Delete an event wherever it lives.
    DeleteEvent { event_id: EventId },
    /// Invite emails to an event.
    Invite { event_id: EventId, emails: Vec<Email> },
    /// Accept an invitation.
    Accept { event_id: EventId, player: Player },
    /// Decline an invitation.
    Decline { event_id: EventId, email: Email },
    /// Remove a player from an event.
    RemovePlayer {
        event_id: EventId,
        player_id: PlayerId,
    },
    /// Add a team to a tournament or tour.
    CreateTeam { event_id: EventId, team: Team },
    /// Delete a team; its players become unassigned.
    DeleteTeam { event_id: EventId, team_id: TeamId },
    /// Move a player onto a team, or off all teams with `None`.
    AssignTeam {
        event_id: EventId,
        player_id: PlayerId,
        team_id: Option<TeamId>,
    },
    /// Set or clear a team's captain.
    SetCaptain {
        event_id: EventId,
        team_id: TeamId,
        captain: Option<PlayerId>,
    },
    /// Record one hole for a player.
    RecordHoleScore {
        round_id: EventId,
        player_id: PlayerId,
        entry: HoleEntry,
    },
    /// Record a player's match-play result.
    RecordMatchResult {
        round_id: EventId,
        player_id: PlayerId,
        result: MatchResult,
    },
    /// Replace a round's playing groups.
    SetPlayerGroups {
        round_id: EventId,
        groups: Vec<PlayerGroup>,
    },
    /// Attach a highlight to an event.
    AddHighlight {
        event_id: EventId,
        highlight: Highlight,
    },
}

impl Command {
    /// The command's name, used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateTournament { .. } => "CreateTournament",
            Self::CreateTour { .. } => "CreateTour",
            Self::CreateRound { .. } => "CreateRound",
            Self::UpdateDetails { .. } => "UpdateDetails",
            Self::DeleteEvent { .. } => "DeleteEvent",
            Self::Invite { .. } => "Invite",
            Self::Accept { .. } => "Accept",
            Self::Decline { .. } => "Decline",
            Self::RemovePlayer { .. } => "RemovePlayer",
            Self::CreateTeam { .. } => "CreateTeam",
            Self::DeleteTeam { .. } => "DeleteTeam",
            Self::AssignTeam { .. } => "AssignTeam",
            Self::SetCaptain { .. } => "SetCaptain",
            Self::RecordHoleScore { .. } => "RecordHoleScore",
            Self::RecordMatchResult { .. } => "RecordMatchResult",
            Self::SetPlayerGroups { .. } => "SetPlayerGroups",
            Self::AddHighlight { .. } => "AddHighlight",
        }
    }
}
