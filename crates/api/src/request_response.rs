// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API layer.

use crate::error::ApiError;
use fairway::{Outcome, Transition};
use fairway_domain::{
    CourseDetails, Email, Event, EventId, EventKind, EventStatus, MatchOutcome, Player,
    PlayerGroup, PlayerId, PlayerStanding, PointsSystem, RoundStanding, ShoutOut, TeamStanding,
    TourStanding, TourTeamStanding,
};
use fairway_notify::{CompletionNotice, Notice};
use serde::{Deserialize, Serialize};
use time::Date;

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

/// A player as supplied by a client.
///
/// When `id` is omitted a fresh one is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl PlayerRequest {
    /// Converts the request into a domain player.
    ///
    /// # Errors
    ///
    /// Returns an error if the id or email is malformed.
    pub fn into_player(self) -> Result<Player, ApiError> {
        let id: PlayerId = match self.id {
            Some(id) => PlayerId::new(&id)?,
            None => PlayerId::generate(),
        };
        let email: Email = Email::parse(&self.email)?;
        let mut player: Player = Player::new(id, &self.name, email);
        player.avatar_url = self.avatar_url;
        Ok(player)
    }
}

/// API request to create a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTournamentRequest {
    pub creator: PlayerRequest,
    pub name: String,
    #[serde(default)]
    pub format: String,
    #[serde(with = "calendar_date")]
    pub start_date: Date,
    #[serde(with = "calendar_date")]
    pub end_date: Date,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub is_team_event: bool,
    #[serde(default)]
    pub scoring_type: String,
    /// Creates the tournament inside this tour.
    #[serde(default)]
    pub tour_id: Option<String>,
}

/// API request to create a tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTourRequest {
    pub creator: PlayerRequest,
    pub name: String,
    #[serde(with = "calendar_date")]
    pub start_date: Date,
    #[serde(with = "calendar_date")]
    pub end_date: Date,
    #[serde(default)]
    pub points_system: Option<PointsSystem>,
}

/// API request to create a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoundRequest {
    /// The tournament or tour to create the round in.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Enrolled only when the round is standalone.
    #[serde(default)]
    pub creator: Option<PlayerRequest>,
    pub name: String,
    #[serde(with = "calendar_date")]
    pub date: Date,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub course_details: Option<CourseDetails>,
}

/// API request to change an event's descriptive fields.
///
/// Omitted fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, with = "calendar_date::option")]
    pub start_date: Option<Date>,
    #[serde(default, with = "calendar_date::option")]
    pub end_date: Option<Date>,
    #[serde(default, with = "calendar_date::option")]
    pub date: Option<Date>,
    #[serde(default)]
    pub course_details: Option<CourseDetails>,
    #[serde(default)]
    pub points_system: Option<PointsSystem>,
    #[serde(default)]
    pub is_team_event: Option<bool>,
    #[serde(default)]
    pub scoring_type: Option<String>,
}

/// API request to invite emails to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteRequest {
    pub emails: Vec<String>,
}

/// API request to decline an invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclineRequest {
    pub email: String,
}

/// API request to add a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub captain: Option<String>,
}

/// API request to move a player between teams. `None` unassigns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTeamRequest {
    #[serde(default)]
    pub team_id: Option<String>,
}

/// API request to set or clear a team captain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCaptainRequest {
    #[serde(default)]
    pub captain: Option<String>,
}

/// API request to record one hole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoleScoreRequest {
    pub hole: u8,
    #[serde(default)]
    pub score: Option<u8>,
    #[serde(default)]
    pub par: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// API request to record a match-play result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResultRequest {
    pub opponent_id: String,
    pub result: MatchOutcome,
    pub points: f64,
}

/// API request to replace a round's playing groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerGroupsRequest {
    pub groups: Vec<PlayerGroup>,
}

/// API request to attach a highlight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightRequest {
    pub player_id: String,
    pub title: String,
    pub media_url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

/// How a command landed, as reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandOutcome {
    Applied,
    NotFound,
    Unchanged,
}

impl From<Outcome> for CommandOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Applied => Self::Applied,
            Outcome::NotFound => Self::NotFound,
            Outcome::Unchanged => Self::Unchanged,
        }
    }
}

/// Response to any mutating request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    pub outcome: CommandOutcome,
    /// The id of the entity the request created, when it created one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_id: Option<String>,
    /// Top-level events that were written.
    pub changed: Vec<EventId>,
    /// Top-level events that were deleted.
    pub removed: Vec<EventId>,
    /// Shout-outs earned by the request.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shout_outs: Vec<ShoutOut>,
}

impl CommandResponse {
    pub(crate) fn from_transition(transition: &Transition, created_id: Option<String>) -> Self {
        let created_id: Option<String> = if transition.outcome == Outcome::Applied {
            created_id
        } else {
            None
        };
        Self {
            outcome: transition.outcome.into(),
            created_id,
            changed: transition.changed.iter().map(|e| e.id().clone()).collect(),
            removed: transition.removed.clone(),
            shout_outs: transition
                .notices
                .iter()
                .filter_map(|notice| match notice {
                    Notice::ShoutOut(shout_out) => Some(shout_out.clone()),
                    Notice::Completed(_) => None,
                })
                .collect(),
        }
    }
}

/// Response to a status refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub changed: Vec<EventId>,
    pub completed: Vec<CompletionNotice>,
}

/// One line of the event listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: EventId,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub name: String,
    pub status: EventStatus,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id().clone(),
            kind: event.kind(),
            name: event.name().to_string(),
            status: event.status(),
        }
    }
}

/// Response listing every top-level event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsResponse {
    pub events: Vec<EventSummary>,
}

/// Individual and team standings of a tournament.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentLeaderboardResponse {
    pub event_id: EventId,
    pub individual: Vec<PlayerStanding>,
    pub teams: Vec<TeamStanding>,
}

/// Individual and team points of a tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourLeaderboardResponse {
    pub event_id: EventId,
    pub individual: Vec<TourStanding>,
    pub teams: Vec<TourTeamStanding>,
}

/// Standings of a single round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundLeaderboardResponse {
    pub event_id: EventId,
    pub standings: Vec<RoundStanding>,
}

/// Any leaderboard, keyed by the kind of event it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LeaderboardResponse {
    Tournament(TournamentLeaderboardResponse),
    Tour(TourLeaderboardResponse),
    Round(RoundLeaderboardResponse),
}

/// Shout-outs held by an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoutOutsResponse {
    pub event_id: EventId,
    pub shout_outs: Vec<ShoutOut>,
}

/// A handler's response together with the notices its transition produced.
///
/// Notices are not part of the client response; callers hand them to the
/// notice worker.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    pub response: T,
    pub notices: Vec<Notice>,
}
