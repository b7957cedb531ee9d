// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_scored_round, create_team_player, create_test_player, create_test_tour,
    create_test_tournament, eid, pid, standard_points,
};
use crate::{
    MatchOutcome, MatchResult, PlayerStanding, PointsSystem, Round, RoundStanding, Team, TeamId,
    TeamStanding, Tour, TourStanding, TourTeamStanding, Tournament, holes_played,
    round_leaderboard, round_total, team_leaderboard, tour_leaderboard, tour_team_leaderboard,
    tournament_leaderboard,
};
use std::collections::BTreeMap;

/// Eighteen holes adding up to `total`, starting from all fours.
fn card_totalling(total: u32) -> Vec<u8> {
    let mut card: Vec<u8> = vec![4; 18];
    let mut diff: i64 = i64::from(total) - 72;
    let mut hole: usize = 0;
    while diff != 0 {
        if diff > 0 {
            card[hole] += 1;
            diff -= 1;
        } else {
            card[hole] -= 1;
            diff += 1;
        }
        hole = (hole + 1) % 18;
    }
    card
}

fn create_team(id: &str) -> Team {
    Team {
        id: TeamId::new(id).unwrap(),
        name: format!("Team {id}"),
        color: String::from("#336699"),
        logo: None,
        captain: None,
    }
}

#[test]
fn test_round_total_treats_missing_scores_as_zero() {
    let mut round: Round = create_scored_round("r1", &[("a", &[4, 5, 3])]);
    round.scores.get_mut(&pid("a")).unwrap()[1].score = None;

    assert_eq!(round_total(&round, &pid("a")), 7);
    assert_eq!(holes_played(&round, &pid("a")), 2);
    assert_eq!(round_total(&round, &pid("nobody")), 0);
    assert_eq!(holes_played(&round, &pid("nobody")), 0);
}

#[test]
fn test_tournament_leaderboard_sorts_fewest_strokes_first() {
    let a_card: Vec<u8> = card_totalling(70);
    let b_card: Vec<u8> = card_totalling(72);
    let round: Round = create_scored_round("r1", &[("b", &b_card), ("a", &a_card)]);
    let tournament: Tournament = create_test_tournament(
        "t1",
        vec![create_test_player("b"), create_test_player("a")],
        vec![round],
    );

    let board: Vec<PlayerStanding> = tournament_leaderboard(&tournament);

    assert_eq!(board.len(), 2);
    assert_eq!(board[0].player_id, pid("a"));
    assert_eq!(board[0].total, 70);
    assert_eq!(board[0].position, 1);
    assert_eq!(board[0].round_totals[&eid("r1")], 70);
    assert_eq!(board[1].player_id, pid("b"));
    assert_eq!(board[1].total, 72);
    assert_eq!(board[1].position, 2);
}

#[test]
fn test_team_leaderboard_matches_individual_order_in_stroke_play() {
    let a_card: Vec<u8> = card_totalling(70);
    let b_card: Vec<u8> = card_totalling(72);
    let round: Round = create_scored_round("r1", &[("a", &a_card), ("b", &b_card)]);
    let mut tournament: Tournament = create_test_tournament(
        "t1",
        vec![create_team_player("b", "blue"), create_team_player("a", "red")],
        vec![round],
    );
    tournament.teams = vec![create_team("blue"), create_team("red")];

    let board: Vec<TeamStanding> = team_leaderboard(&tournament);

    assert_eq!(board[0].team_id, TeamId::new("red").unwrap());
    assert!((board[0].total - 70.0).abs() < f64::EPSILON);
    assert_eq!(board[1].team_id, TeamId::new("blue").unwrap());
    assert!((board[1].total - 72.0).abs() < f64::EPSILON);
}

#[test]
fn test_team_leaderboard_sums_match_points_in_match_play() {
    let mut round: Round = create_scored_round("r1", &[("a", &[4]), ("b", &[5])]);
    round.format = String::from("Match Play");
    round.match_results = Some(BTreeMap::from([
        (
            pid("a"),
            MatchResult {
                opponent_id: pid("b"),
                result: MatchOutcome::Win,
                points: 1.0,
            },
        ),
        (
            pid("b"),
            MatchResult {
                opponent_id: pid("a"),
                result: MatchOutcome::Loss,
                points: 0.0,
            },
        ),
    ]));
    let mut tournament: Tournament = create_test_tournament(
        "t1",
        vec![create_team_player("a", "red"), create_team_player("b", "blue")],
        vec![round],
    );
    tournament.teams = vec![create_team("red"), create_team("blue")];

    let board: Vec<TeamStanding> = team_leaderboard(&tournament);

    // Ascending under one sort, so the losing side with fewer points leads.
    assert_eq!(board[0].team_id, TeamId::new("blue").unwrap());
    assert!(board[0].total.abs() < f64::EPSILON);
    assert!((board[1].total - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_player_without_rounds_appears_last_among_ties() {
    let round: Round = create_scored_round("r1", &[("a", &[]), ("b", &[4])]);
    let tournament: Tournament = create_test_tournament(
        "t1",
        vec![
            create_test_player("idle"),
            create_test_player("a"),
            create_test_player("b"),
        ],
        vec![round],
    );

    let board: Vec<PlayerStanding> = tournament_leaderboard(&tournament);

    // "idle" and "a" both total 0 with no holes played; input order decides.
    assert_eq!(board[0].player_id, pid("idle"));
    assert_eq!(board[0].total, 0);
    assert_eq!(board[1].player_id, pid("a"));
    assert_eq!(board[2].player_id, pid("b"));
    assert_eq!(board[0].position, 1);
    assert_eq!(board[1].position, 1);
    assert_eq!(board[2].position, 3);
}

#[test]
fn test_zero_round_player_ranks_after_played_tie() {
    let round: Round = create_scored_round("r1", &[("a", &[4, 4])]);
    let mut tournament: Tournament = create_test_tournament(
        "t1",
        vec![create_test_player("idle"), create_test_player("a")],
        vec![round],
    );
    // Zero is not a legal stroke count, but it ties the totals while keeping holes played.
    tournament.rounds[0].scores.get_mut(&pid("a")).unwrap().iter_mut().for_each(|h| {
        h.score = Some(0);
    });

    let board: Vec<PlayerStanding> = tournament_leaderboard(&tournament);

    assert_eq!(board[0].player_id, pid("a"));
    assert_eq!(board[0].holes_played, 2);
    assert_eq!(board[1].player_id, pid("idle"));
    assert_eq!(board[1].total, 0);
    assert_eq!(board[1].holes_played, 0);
}

#[test]
fn test_competition_ranking_skips_after_ties() {
    let round: Round = create_scored_round(
        "r1",
        &[("a", &[3]), ("b", &[4]), ("c", &[4]), ("d", &[5])],
    );

    let board: Vec<RoundStanding> = round_leaderboard(&round, &[]);
    let positions: Vec<u32> = board.iter().map(|s| s.position).collect();

    assert_eq!(positions, vec![1, 2, 2, 4]);
}

#[test]
fn test_round_leaderboard_resolves_names_from_roster() {
    let mut round: Round = create_scored_round("r1", &[("a", &[4]), ("ghost", &[5])]);
    round.players.push(create_test_player("a"));
    let roster: Vec<crate::Player> = vec![create_team_player("a", "red")];

    let board: Vec<RoundStanding> = round_leaderboard(&round, &roster);

    assert_eq!(board[0].name, "Player a");
    assert_eq!(board[0].team_id, Some(TeamId::new("red").unwrap()));
    assert_eq!(board[1].name, "ghost");
    assert_eq!(board[1].team_id, None);
}

#[test]
fn test_tour_points_follow_points_system() {
    let round: Round = create_scored_round(
        "r1",
        &[("x", &[3]), ("p2", &[4]), ("p3", &[5]), ("y", &[6])],
    );
    let tournament: Tournament = create_test_tournament(
        "t1",
        vec![
            create_test_player("y"),
            create_test_player("p3"),
            create_test_player("p2"),
            create_test_player("x"),
        ],
        vec![round],
    );
    let tour: Tour = create_test_tour(vec![tournament], standard_points());

    let board: Vec<TourStanding> = tour_leaderboard(&tour);
    let points: BTreeMap<String, u32> = board
        .iter()
        .map(|s| (s.player_id.to_string(), s.total_points))
        .collect();

    assert_eq!(points["x"], 100);
    assert_eq!(points["p2"], 80);
    assert_eq!(points["p3"], 60);
    assert_eq!(points["y"], 10);
    assert_eq!(board[0].player_id, pid("x"));
    assert_eq!(board[0].tournament_points[&eid("t1")], 100);
}

#[test]
fn test_tour_points_accumulate_across_events() {
    let first: Tournament = create_test_tournament(
        "t1",
        vec![create_test_player("x"), create_test_player("y")],
        vec![create_scored_round("r1", &[("x", &[3]), ("y", &[4])])],
    );
    let mut tour: Tour = create_test_tour(vec![first], PointsSystem::default());
    let before: Vec<TourStanding> = tour_leaderboard(&tour);

    tour.tournaments.push(create_test_tournament(
        "t2",
        vec![create_test_player("x"), create_test_player("y")],
        vec![create_scored_round("r2", &[("x", &[5]), ("y", &[4])])],
    ));
    tour.rounds
        .push(create_scored_round("r3", &[("x", &[4]), ("y", &[3])]));
    let after: Vec<TourStanding> = tour_leaderboard(&tour);

    for standing in &before {
        let later: &TourStanding = after
            .iter()
            .find(|s| s.player_id == standing.player_id)
            .unwrap();
        assert!(later.total_points >= standing.total_points);
    }
    let y: &TourStanding = after.iter().find(|s| s.player_id == pid("y")).unwrap();
    assert_eq!(y.total_points, 10 + 100 + 100);
    assert_eq!(y.round_points[&eid("r3")], 100);
}

#[test]
fn test_tour_round_only_player_takes_name_from_tour_roster() {
    let mut tour: Tour = create_test_tour(Vec::new(), PointsSystem::default());
    tour.players.push(create_team_player("walk-on", "red"));
    tour.rounds
        .push(create_scored_round("r1", &[("walk-on", &[4])]));

    let board: Vec<TourStanding> = tour_leaderboard(&tour);

    assert_eq!(board.len(), 1);
    assert_eq!(board[0].name, "Player walk-on");
    assert_eq!(board[0].team_id, Some(TeamId::new("red").unwrap()));
    assert_eq!(board[0].total_points, 100);
}

#[test]
fn test_tour_members_without_results_appear_with_zero() {
    let mut tour: Tour = create_test_tour(Vec::new(), PointsSystem::default());
    tour.players.push(create_test_player("bench"));

    let board: Vec<TourStanding> = tour_leaderboard(&tour);

    assert_eq!(board.len(), 1);
    assert_eq!(board[0].total_points, 0);
    assert_eq!(board[0].position, 1);
}

#[test]
fn test_tour_team_leaderboard_aggregates_members() {
    let tournament: Tournament = create_test_tournament(
        "t1",
        vec![
            create_team_player("a", "red"),
            create_team_player("b", "blue"),
            create_team_player("c", "red"),
        ],
        vec![create_scored_round(
            "r1",
            &[("a", &[3]), ("b", &[4]), ("c", &[5])],
        )],
    );
    let mut tour: Tour = create_test_tour(vec![tournament], standard_points());
    tour.teams = vec![create_team("red"), create_team("blue")];

    let board: Vec<TourTeamStanding> = tour_team_leaderboard(&tour);

    assert_eq!(board[0].team_id, TeamId::new("red").unwrap());
    assert_eq!(board[0].total_points, 160);
    assert_eq!(board[0].tournament_points[&eid("t1")], 160);
    assert_eq!(board[1].total_points, 80);
    assert_eq!(board[1].position, 2);
}
