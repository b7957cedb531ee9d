// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Fairway engine.
//!
//! Turns client requests into core commands, runs them against an
//! [`EventRepository`](fairway_persistence::EventRepository) and shapes
//! the results for transport. Handlers are synchronous and
//! transport-agnostic; the server crate wraps them in HTTP.

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
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    accept_invitation, add_highlight, assign_team, create_round, create_team, create_tour,
    create_tournament, decline_invitation, delete_event, delete_team, get_event, invite,
    leaderboard, list_events, record_completion_achievements, record_hole_score,
    record_match_result, refresh_statuses, remove_player, set_captain, set_player_groups,
    shout_outs, update_event,
};
pub use request_response::{
    ApiResult, AssignTeamRequest, CommandOutcome, CommandResponse, CreateRoundRequest,
    CreateTeamRequest, CreateTourRequest, CreateTournamentRequest, DeclineRequest, EventSummary,
    HighlightRequest, HoleScoreRequest, InviteRequest, LeaderboardResponse, ListEventsResponse,
    MatchResultRequest, PlayerGroupsRequest, PlayerRequest, RefreshResponse,
    RoundLeaderboardResponse, SetCaptainRequest, ShoutOutsResponse, TourLeaderboardResponse,
    TournamentLeaderboardResponse, UpdateEventRequest,
};
