// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod achievement;
mod error;
mod ids;
mod leaderboard;
mod roster;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use achievement::{classify_hole, classify_score, shout_out_message};
pub use error::DomainError;
pub use ids::{Email, EventId, PlayerId, TeamId};
pub use leaderboard::{
    PlayerStanding, RoundStanding, TeamStanding, TourStanding, TourTeamStanding, holes_played,
    round_leaderboard, round_total, team_leaderboard, tour_leaderboard, tour_team_leaderboard,
    tournament_leaderboard,
};
pub use roster::{Roster, TeamRoster};
pub use status::{EventStatus, derive_status, local_date, parse_time_zone};
pub use types::{
    CourseDetails, DEFAULT_HOLES, Event, EventKind, Highlight, HoleScore, MatchOutcome,
    MatchResult, Player, PlayerGroup, PointsSystem, Round, ShoutOut, ShoutOutKind, Team, Tour,
    Tournament,
};
pub use validation::{
    validate_captain, validate_course, validate_date_range, validate_hole_number,
    validate_match_points, validate_name, validate_strokes, validate_team_name_unique,
};
