// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fairway_domain::{EventKind, EventStatus};
use fairway_persistence::InMemoryRepository;
use time::macros::date;

use super::helpers::{
    create_test_context, create_test_tournament_request, play_holes, seed_round, seed_tour,
    seed_tournament,
};
use crate::{
    ApiError, ApiResult, CreateTournamentRequest, LeaderboardResponse, ListEventsResponse,
    RefreshResponse, ShoutOutsResponse, create_tournament, leaderboard, list_events,
    refresh_statuses, shout_outs,
};

// ============================================================================
// Listing
// ============================================================================

#[test]
fn test_list_events_summarizes_top_level_events() {
    let mut repository: InMemoryRepository = InMemoryRepository::new();
    seed_tournament(&mut repository, "Spring Open");
    seed_tour(&mut repository, "Summer Tour");

    let listing: ListEventsResponse = list_events(&mut repository).unwrap();

    assert_eq!(listing.events.len(), 2);
    assert!(
        listing
            .events
            .iter()
            .any(|e| e.kind == EventKind::Tournament && e.name == "Spring Open")
    );
    assert!(
        listing
            .events
            .iter()
            .all(|e| e.status == EventStatus::Active)
    );
}

// ============================================================================
// Leaderboards
// ============================================================================

#[test]
fn test_tournament_leaderboard_orders_by_total() {
    let mut repository: InMemoryRepository = InMemoryRepository::new();
    let tournament_id: String = seed_tournament(&mut repository, "Spring Open");
    let round_id: String = seed_round(&mut repository, "Day One", Some(&tournament_id));
    play_holes(&mut repository, &round_id, "ann", &[5, 5, 5]);

    let Some(LeaderboardResponse::Tournament(board)) =
        leaderboard(&mut repository, &tournament_id).unwrap()
    else {
        panic!("expected a tournament leaderboard");
    };

    assert_eq!(board.individual.len(), 1);
    assert_eq!(board.individual[0].total, 15);
    assert_eq!(board.individual[0].holes_played, 3);
    assert_eq!(board.individual[0].position, 1);
    assert!(board.teams.is_empty());
}

#[test]
fn test_round_leaderboard_names_players_from_owner() {
    let mut repository: InMemoryRepository = InMemoryRepository::new();
    let tournament_id: String = seed_tournament(&mut repository, "Spring Open");
    let round_id: String = seed_round(&mut repository, "Day One", Some(&tournament_id));
    play_holes(&mut repository, &round_id, "ann", &[4, 3]);

    let Some(LeaderboardResponse::Round(board)) = leaderboard(&mut repository, &round_id).unwrap()
    else {
        panic!("expected a round leaderboard");
    };

    assert_eq!(board.standings.len(), 1);
    assert_eq!(board.standings[0].name, "Player ann");
    assert_eq!(board.standings[0].total, 7);
}

#[test]
fn test_tour_leaderboard_awards_points_for_nested_tournament() {
    let mut repository: InMemoryRepository = InMemoryRepository::new();
    let tour_id: String = seed_tour(&mut repository, "Summer Tour");
    let mut request: CreateTournamentRequest = create_test_tournament_request("Leg One");
    request.tour_id = Some(tour_id.clone());
    let leg: String = create_tournament(&mut repository, request, &create_test_context())
        .unwrap()
        .response
        .created_id
        .unwrap();
    let round_id: String = seed_round(&mut repository, "Leg One Day One", Some(&leg));
    play_holes(&mut repository, &round_id, "ann", &[4]);

    let Some(LeaderboardResponse::Tour(board)) = leaderboard(&mut repository, &tour_id).unwrap()
    else {
        panic!("expected a tour leaderboard");
    };

    assert_eq!(board.individual.len(), 1);
    assert_eq!(board.individual[0].player_id.as_str(), "ann");
    assert_eq!(board.individual[0].total_points, 100);
}

#[test]
fn test_leaderboard_for_unknown_event_is_none() {
    let mut repository: InMemoryRepository = InMemoryRepository::new();

    let board: Option<LeaderboardResponse> = leaderboard(&mut repository, "ghost").unwrap();

    assert!(board.is_none());
}

#[test]
fn test_leaderboard_with_blank_id_is_invalid_input() {
    let mut repository: InMemoryRepository = InMemoryRepository::new();

    let result: Result<Option<LeaderboardResponse>, ApiError> = leaderboard(&mut repository, "");

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

// ============================================================================
// Shout-outs
// ============================================================================

#[test]
fn test_shout_outs_are_read_from_owner() {
    let mut repository: InMemoryRepository = InMemoryRepository::new();
    let tournament_id: String = seed_tournament(&mut repository, "Spring Open");
    let round_id: String = seed_round(&mut repository, "Day One", Some(&tournament_id));
    play_holes(&mut repository, &round_id, "ann", &[4, 3, 2]);

    let held: ShoutOutsResponse = shout_outs(&mut repository, &tournament_id)
        .unwrap()
        .unwrap();
    let on_round: ShoutOutsResponse = shout_outs(&mut repository, &round_id).unwrap().unwrap();

    assert_eq!(held.shout_outs.len(), 2);
    assert!(on_round.shout_outs.is_empty());
    assert!(shout_outs(&mut repository, "ghost").unwrap().is_none());
}

// ============================================================================
// Status refresh
// ============================================================================

#[test]
fn test_refresh_statuses_is_idempotent() {
    let mut repository: InMemoryRepository = InMemoryRepository::new();
    let tournament_id: String = seed_tournament(&mut repository, "Spring Open");

    let first: ApiResult<RefreshResponse> =
        refresh_statuses(&mut repository, date!(2026 - 05 - 04)).unwrap();
    let second: ApiResult<RefreshResponse> =
        refresh_statuses(&mut repository, date!(2026 - 05 - 04)).unwrap();

    assert_eq!(first.response.completed.len(), 1);
    assert_eq!(first.response.completed[0].event_id.as_str(), tournament_id);
    assert_eq!(first.notices.len(), 1);
    assert!(second.response.changed.is_empty());
    assert!(second.response.completed.is_empty());
    assert!(second.notices.is_empty());
}

#[test]
fn test_refresh_statuses_on_same_day_changes_nothing() {
    let mut repository: InMemoryRepository = InMemoryRepository::new();
    seed_tournament(&mut repository, "Spring Open");

    let result: ApiResult<RefreshResponse> =
        refresh_statuses(&mut repository, create_test_context().today).unwrap();

    assert!(result.response.changed.is_empty());
}
