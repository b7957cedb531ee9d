// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ids::{Email, EventId, PlayerId, TeamId};
use crate::status::EventStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::{Date, OffsetDateTime};

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

/// Hole count assumed for rounds without course details.
pub const DEFAULT_HOLES: u8 = 18;

/// The kind of a persisted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A standalone or tour-nested tournament.
    Tournament,
    /// A multi-tournament series.
    Tour,
    /// A single round.
    Round,
}

impl EventKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tournament => "tournament",
            Self::Tour => "tour",
            Self::Round => "round",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A participant in an event.
///
/// `id` identifies a joined player; `email` identifies them while only an
/// invitation exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
}

impl Player {
    /// Creates a player with no avatar and no team.
    #[must_use]
    pub fn new(id: PlayerId, name: &str, email: Email) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            email,
            avatar_url: None,
            team_id: None,
        }
    }
}

/// A team within a tournament or tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Must reference a player whose `team_id` is this team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captain: Option<PlayerId>,
}

/// One hole on a player's scorecard. A missing `score` means not yet played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoleScore {
    pub hole: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub par: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl HoleScore {
    /// Creates an unplayed hole.
    #[must_use]
    pub const fn unplayed(hole: u8, par: Option<u8>) -> Self {
        Self {
            hole,
            score: None,
            par,
            notes: None,
        }
    }

    /// Returns whether a score has been recorded for this hole.
    #[must_use]
    pub const fn is_played(&self) -> bool {
        self.score.is_some()
    }
}

/// Course layout a round is played on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetails {
    pub name: String,
    pub holes: u8,
    pub par: u16,
}

impl CourseDetails {
    /// Returns the per-hole par used when synthesizing scorecards:
    /// `floor(par / holes)`.
    #[must_use]
    pub fn par_per_hole(&self) -> Option<u8> {
        if self.holes == 0 {
            return None;
        }
        u8::try_from(self.par / u16::from(self.holes)).ok()
    }
}

/// Result of a single match-play pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    Win,
    Loss,
    Halved,
}

/// A player's match-play result within a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub opponent_id: PlayerId,
    pub result: MatchOutcome,
    pub points: f64,
}

/// A playing group (tee time) within a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerGroup {
    pub id: String,
    pub name: String,
    pub player_ids: Vec<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tee_time: Option<String>,
}

/// Classification of a notable hole score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShoutOutKind {
    Birdie,
    Eagle,
    HoleInOne,
}

impl ShoutOutKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Birdie => "birdie",
            Self::Eagle => "eagle",
            Self::HoleInOne => "hole-in-one",
        }
    }
}

/// A detected notable score attached to the event that owns the round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoutOut {
    pub id: String,
    pub event_id: EventId,
    pub player_id: PlayerId,
    pub round_id: EventId,
    pub hole_number: u8,
    #[serde(rename = "type")]
    pub kind: ShoutOutKind,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// User-submitted media attached to an event. Unrelated to scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub id: String,
    pub player_id: PlayerId,
    pub title: String,
    pub media_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A single outing with per-player, per-hole scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: EventId,
    pub name: String,
    #[serde(with = "calendar_date")]
    pub date: Date,
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_details: Option<CourseDetails>,
    #[serde(default)]
    pub scores: BTreeMap<PlayerId, Vec<HoleScore>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_results: Option<BTreeMap<PlayerId, MatchResult>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub player_groups: Vec<PlayerGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub players: Vec<Player>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invitations: Vec<Email>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shout_outs: Vec<ShoutOut>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<Highlight>,
}

impl Round {
    /// Creates an empty round with no course, players or scores.
    #[must_use]
    pub fn new(id: EventId, name: &str, date: Date, format: &str) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            date,
            format: format.trim().to_string(),
            course_details: None,
            scores: BTreeMap::new(),
            match_results: None,
            player_groups: Vec::new(),
            players: Vec::new(),
            invitations: Vec::new(),
            status: EventStatus::default(),
            shout_outs: Vec::new(),
            highlights: Vec::new(),
        }
    }

    /// Number of holes on this round's course.
    #[must_use]
    pub fn hole_count(&self) -> u8 {
        self.course_details
            .as_ref()
            .map_or(DEFAULT_HOLES, |course| course.holes)
    }

    /// Returns whether this round is scored as match play.
    #[must_use]
    pub fn is_match_play(&self) -> bool {
        self.format.contains("Match Play")
    }

    /// Builds an unplayed scorecard sized to the course.
    #[must_use]
    pub fn blank_scorecard(&self) -> Vec<HoleScore> {
        let par: Option<u8> = self
            .course_details
            .as_ref()
            .and_then(CourseDetails::par_per_hole);
        (1..=self.hole_count())
            .map(|hole| HoleScore::unplayed(hole, par))
            .collect()
    }

    /// Creates a scorecard for `player_id` unless one already exists.
    ///
    /// Returns `true` when a scorecard was created.
    pub fn ensure_scorecard(&mut self, player_id: &PlayerId) -> bool {
        if self.scores.contains_key(player_id) {
            return false;
        }
        let card: Vec<HoleScore> = self.blank_scorecard();
        self.scores.insert(player_id.clone(), card);
        true
    }

    /// Removes every trace of a player's participation in this round.
    ///
    /// Returns `true` if anything was removed.
    pub fn forget_player(&mut self, player_id: &PlayerId) -> bool {
        let mut removed: bool = self.scores.remove(player_id).is_some();
        if let Some(results) = self.match_results.as_mut() {
            removed |= results.remove(player_id).is_some();
        }
        let before: usize = self.players.len();
        self.players.retain(|p| &p.id != player_id);
        removed |= self.players.len() != before;
        for group in &mut self.player_groups {
            let group_before: usize = group.player_ids.len();
            group.player_ids.retain(|id| id != player_id);
            removed |= group.player_ids.len() != group_before;
        }
        removed
    }
}

/// A multi-round competition, standalone or nested inside a tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: EventId,
    pub name: String,
    pub format: String,
    #[serde(with = "calendar_date")]
    pub start_date: Date,
    #[serde(with = "calendar_date")]
    pub end_date: Date,
    pub location: String,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub rounds: Vec<Round>,
    #[serde(default)]
    pub invitations: Vec<Email>,
    #[serde(default)]
    pub is_team_event: bool,
    #[serde(default)]
    pub scoring_type: String,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shout_outs: Vec<ShoutOut>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<Highlight>,
}

impl Tournament {
    /// Replaces the round with the given id.
    ///
    /// Returns `false` if this tournament does not own such a round.
    pub fn replace_round(&mut self, round_id: &EventId, round: Round) -> bool {
        match self.rounds.iter_mut().find(|r| &r.id == round_id) {
            Some(slot) => {
                *slot = round;
                true
            }
            None => false,
        }
    }
}

/// Rules mapping finishing position to tour points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsSystem {
    #[serde(default = "PointsSystem::default_win")]
    pub win: u32,
    #[serde(default)]
    pub top_finish: BTreeMap<u32, u32>,
    #[serde(default = "PointsSystem::default_participation")]
    pub participation: u32,
}

impl PointsSystem {
    const fn default_win() -> u32 {
        100
    }

    const fn default_participation() -> u32 {
        10
    }

    /// Points awarded for a 1-based finishing position.
    #[must_use]
    pub fn points_for(&self, position: u32) -> u32 {
        if position == 1 {
            return self.win;
        }
        self.top_finish
            .get(&position)
            .copied()
            .unwrap_or(self.participation)
    }
}

impl Default for PointsSystem {
    fn default() -> Self {
        Self {
            win: Self::default_win(),
            top_finish: BTreeMap::new(),
            participation: Self::default_participation(),
        }
    }
}

/// A series of tournaments (and loose rounds) with a points table.
///
/// The tour exclusively owns its tournaments and rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: EventId,
    pub name: String,
    #[serde(with = "calendar_date")]
    pub start_date: Date,
    #[serde(with = "calendar_date")]
    pub end_date: Date,
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rounds: Vec<Round>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub players: Vec<Player>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<Team>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invitations: Vec<Email>,
    #[serde(default)]
    pub points_system: PointsSystem,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shout_outs: Vec<ShoutOut>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<Highlight>,
}

impl Tour {
    /// Replaces the nested tournament with the given id.
    ///
    /// Returns `false` if this tour does not own such a tournament.
    pub fn replace_tournament(&mut self, tournament_id: &EventId, tournament: Tournament) -> bool {
        match self
            .tournaments
            .iter_mut()
            .find(|t| &t.id == tournament_id)
        {
            Some(slot) => {
                *slot = tournament;
                true
            }
            None => false,
        }
    }

    /// Replaces the tour-level round with the given id.
    ///
    /// Returns `false` if this tour does not own such a round directly.
    pub fn replace_round(&mut self, round_id: &EventId, round: Round) -> bool {
        match self.rounds.iter_mut().find(|r| &r.id == round_id) {
            Some(slot) => {
                *slot = round;
                true
            }
            None => false,
        }
    }
}

/// A persisted event: the discriminant selects which shape applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Tournament(Tournament),
    Tour(Tour),
    Round(Round),
}

impl Event {
    /// Returns the event's identifier.
    #[must_use]
    pub const fn id(&self) -> &EventId {
        match self {
            Self::Tournament(t) => &t.id,
            Self::Tour(t) => &t.id,
            Self::Round(r) => &r.id,
        }
    }

    /// Returns the event's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Tournament(t) => &t.name,
            Self::Tour(t) => &t.name,
            Self::Round(r) => &r.name,
        }
    }

    /// Returns the discriminant.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Tournament(_) => EventKind::Tournament,
            Self::Tour(_) => EventKind::Tour,
            Self::Round(_) => EventKind::Round,
        }
    }

    /// Returns the stored lifecycle status.
    #[must_use]
    pub const fn status(&self) -> EventStatus {
        match self {
            Self::Tournament(t) => t.status,
            Self::Tour(t) => t.status,
            Self::Round(r) => r.status,
        }
    }
}
