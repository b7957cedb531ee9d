// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Derived standings.
//!
//! Every function here is a pure computation over a resolved tournament,
//! tour or round. Nothing is cached and nothing is mutated.
//!
//! ## Ordering Rules
//!
//! Stroke-based boards (tournament, team, round) sort ascending: fewer
//! strokes is better. Point-based boards (tour, tour team) sort descending.
//!
//! Equal stroke totals are ordered by holes played (more first), then by
//! input order. A player who has not played anything therefore sits last
//! among the players sharing their total.
//!
//! ## Positions
//!
//! Displayed positions use competition ranking: equal totals share a
//! position and the next distinct total skips ahead (1, 2, 2, 4).
//! Tour points are awarded by finishing index instead, so two players tied
//! on strokes still receive the points for consecutive places.
//!
//! ## Team Totals
//!
//! A team's round total is the sum of its players' match-play points when the
//! round is match play and has results, otherwise the sum of their strokes.
//! Both are sorted ascending under one board. This is only meaningful when a
//! tournament does not mix formats; nothing here enforces that.

use crate::ids::{EventId, PlayerId, TeamId};
use crate::roster::Roster;
use crate::types::{Player, Round, Team, Tour, Tournament};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// A player's line on a tournament leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStanding {
    pub player_id: PlayerId,
    pub name: String,
    pub team_id: Option<TeamId>,
    pub position: u32,
    pub total: u32,
    pub holes_played: u32,
    pub round_totals: BTreeMap<EventId, u32>,
}

/// A team's line on a tournament team leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub name: String,
    pub color: String,
    pub position: u32,
    pub total: f64,
    pub round_totals: BTreeMap<EventId, f64>,
}

/// A player's line on a single-round leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundStanding {
    pub player_id: PlayerId,
    pub name: String,
    pub team_id: Option<TeamId>,
    pub position: u32,
    pub total: u32,
    pub holes_played: u32,
}

/// A player's line on a tour points table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourStanding {
    pub player_id: PlayerId,
    pub name: String,
    pub team_id: Option<TeamId>,
    pub position: u32,
    pub total_points: u32,
    pub tournament_points: BTreeMap<EventId, u32>,
    pub round_points: BTreeMap<EventId, u32>,
}

/// A team's line on a tour points table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourTeamStanding {
    pub team_id: TeamId,
    pub name: String,
    pub color: String,
    pub position: u32,
    pub total_points: u32,
    pub tournament_points: BTreeMap<EventId, u32>,
    pub round_points: BTreeMap<EventId, u32>,
}

/// Sum of a player's recorded strokes in a round. Unplayed holes count 0.
#[must_use]
pub fn round_total(round: &Round, player_id: &PlayerId) -> u32 {
    round.scores.get(player_id).map_or(0, |card| {
        card.iter()
            .map(|hole| u32::from(hole.score.unwrap_or(0)))
            .sum()
    })
}

/// Number of holes with a recorded score for a player in a round.
#[must_use]
pub fn holes_played(round: &Round, player_id: &PlayerId) -> u32 {
    round.scores.get(player_id).map_or(0, |card| {
        let played: usize = card.iter().filter(|hole| hole.is_played()).count();
        u32::try_from(played).unwrap_or(u32::MAX)
    })
}

/// Individual stroke leaderboard for a tournament.
///
/// Every enrolled player appears, including those with no rounds (total 0).
#[must_use]
pub fn tournament_leaderboard(tournament: &Tournament) -> Vec<PlayerStanding> {
    let mut standings: Vec<PlayerStanding> = tournament
        .players
        .iter()
        .map(|player| {
            let round_totals: BTreeMap<EventId, u32> = tournament
                .rounds
                .iter()
                .map(|round| (round.id.clone(), round_total(round, &player.id)))
                .collect();
            let holes: u32 = tournament
                .rounds
                .iter()
                .map(|round| holes_played(round, &player.id))
                .sum();
            PlayerStanding {
                player_id: player.id.clone(),
                name: player.name.clone(),
                team_id: player.team_id.clone(),
                position: 0,
                total: round_totals.values().sum(),
                holes_played: holes,
                round_totals,
            }
        })
        .collect();

    standings.sort_by(|a, b| {
        a.total
            .cmp(&b.total)
            .then_with(|| b.holes_played.cmp(&a.holes_played))
    });
    assign_positions(&mut standings, |s| s.total, |s, p| s.position = p);
    standings
}

/// Team leaderboard for a tournament.
#[must_use]
pub fn team_leaderboard(tournament: &Tournament) -> Vec<TeamStanding> {
    let mut standings: Vec<TeamStanding> = tournament
        .teams
        .iter()
        .map(|team| {
            let members: Vec<&PlayerId> = tournament
                .players
                .iter()
                .filter(|p| p.team_id.as_ref() == Some(&team.id))
                .map(|p| &p.id)
                .collect();
            let round_totals: BTreeMap<EventId, f64> = tournament
                .rounds
                .iter()
                .map(|round| (round.id.clone(), team_round_total(round, &members)))
                .collect();
            TeamStanding {
                team_id: team.id.clone(),
                name: team.name.clone(),
                color: team.color.clone(),
                position: 0,
                total: round_totals.values().sum(),
                round_totals,
            }
        })
        .collect();

    standings.sort_by(|a, b| a.total.total_cmp(&b.total));
    assign_positions(&mut standings, |s| s.total, |s, p| s.position = p);
    standings
}

fn team_round_total(round: &Round, members: &[&PlayerId]) -> f64 {
    match (&round.match_results, round.is_match_play()) {
        (Some(results), true) => members
            .iter()
            .filter_map(|id| results.get(*id))
            .map(|result| result.points)
            .sum(),
        _ => members
            .iter()
            .map(|id| f64::from(round_total(round, id)))
            .sum(),
    }
}

/// Leaderboard for a round that is not scored as part of a tournament.
///
/// Everyone with a scorecard appears. Names and teams are looked up in
/// `roster` first, then in the round's own players; unknown players are
/// listed under their id.
#[must_use]
pub fn round_leaderboard(round: &Round, roster: &[Player]) -> Vec<RoundStanding> {
    let mut standings: Vec<RoundStanding> = round
        .scores
        .keys()
        .map(|player_id| {
            let known: Option<&Player> = roster
                .iter()
                .chain(round.players.iter())
                .find(|p| &p.id == player_id);
            RoundStanding {
                player_id: player_id.clone(),
                name: known.map_or_else(|| player_id.to_string(), |p| p.name.clone()),
                team_id: known.and_then(|p| p.team_id.clone()),
                position: 0,
                total: round_total(round, player_id),
                holes_played: holes_played(round, player_id),
            }
        })
        .collect();

    standings.sort_by(|a, b| {
        a.total
            .cmp(&b.total)
            .then_with(|| b.holes_played.cmp(&a.holes_played))
    });
    assign_positions(&mut standings, |s| s.total, |s, p| s.position = p);
    standings
}

/// Cross-event points table for a tour.
///
/// Each nested tournament and each tour-level round awards points by
/// finishing index using the tour's points system. Tour members with no
/// results appear with zero points.
#[must_use]
pub fn tour_leaderboard(tour: &Tour) -> Vec<TourStanding> {
    let mut table: PointsTable<'_> = PointsTable::new(tour);

    for tournament in &tour.tournaments {
        for (index, standing) in tournament_leaderboard(tournament).iter().enumerate() {
            let points: u32 = tour.points_system.points_for(finishing_position(index));
            let entry: &mut TourStanding =
                table.entry(&standing.player_id, &standing.name, standing.team_id.as_ref());
            entry.total_points += points;
            *entry
                .tournament_points
                .entry(tournament.id.clone())
                .or_default() += points;
        }
    }

    for round in &tour.rounds {
        for (index, standing) in round_leaderboard(round, &tour.players)
            .iter()
            .enumerate()
        {
            let points: u32 = tour.points_system.points_for(finishing_position(index));
            let entry: &mut TourStanding =
                table.entry(&standing.player_id, &standing.name, standing.team_id.as_ref());
            entry.total_points += points;
            *entry.round_points.entry(round.id.clone()).or_default() += points;
        }
    }

    let mut standings: Vec<TourStanding> = table.rows;
    standings.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    assign_positions(&mut standings, |s| s.total_points, |s, p| s.position = p);
    standings
}

/// Team points table for a tour, aggregated from [`tour_leaderboard`].
#[must_use]
pub fn tour_team_leaderboard(tour: &Tour) -> Vec<TourTeamStanding> {
    let individual: Vec<TourStanding> = tour_leaderboard(tour);

    let mut standings: Vec<TourTeamStanding> = tour
        .teams
        .iter()
        .map(|team: &Team| {
            let mut row: TourTeamStanding = TourTeamStanding {
                team_id: team.id.clone(),
                name: team.name.clone(),
                color: team.color.clone(),
                position: 0,
                total_points: 0,
                tournament_points: BTreeMap::new(),
                round_points: BTreeMap::new(),
            };
            for member in individual
                .iter()
                .filter(|s| s.team_id.as_ref() == Some(&team.id))
            {
                row.total_points += member.total_points;
                for (id, points) in &member.tournament_points {
                    *row.tournament_points.entry(id.clone()).or_default() += points;
                }
                for (id, points) in &member.round_points {
                    *row.round_points.entry(id.clone()).or_default() += points;
                }
            }
            row
        })
        .collect();

    standings.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    assign_positions(&mut standings, |s| s.total_points, |s, p| s.position = p);
    standings
}

/// Accumulator for tour points keyed by player, preserving first-seen order.
struct PointsTable<'a> {
    tour: &'a Tour,
    rows: Vec<TourStanding>,
    index: HashMap<PlayerId, usize>,
}

impl<'a> PointsTable<'a> {
    fn new(tour: &'a Tour) -> Self {
        let mut table: Self = Self {
            tour,
            rows: Vec::new(),
            index: HashMap::new(),
        };
        for player in &tour.players {
            table.entry(&player.id, &player.name, player.team_id.as_ref());
        }
        table
    }

    fn entry(
        &mut self,
        player_id: &PlayerId,
        fallback_name: &str,
        fallback_team: Option<&TeamId>,
    ) -> &mut TourStanding {
        let slot: usize = match self.index.get(player_id) {
            Some(slot) => *slot,
            None => {
                let tour: &'a Tour = self.tour;
                let member: Option<&Player> = tour.player(player_id);
                self.rows.push(TourStanding {
                    player_id: player_id.clone(),
                    name: member.map_or_else(|| fallback_name.to_string(), |p| p.name.clone()),
                    team_id: member.map_or_else(
                        || fallback_team.cloned(),
                        |p| p.team_id.clone().or_else(|| fallback_team.cloned()),
                    ),
                    position: 0,
                    total_points: 0,
                    tournament_points: BTreeMap::new(),
                    round_points: BTreeMap::new(),
                });
                let slot: usize = self.rows.len() - 1;
                self.index.insert(player_id.clone(), slot);
                slot
            }
        };
        &mut self.rows[slot]
    }
}

fn finishing_position(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

/// Writes competition-ranking positions into already sorted standings.
fn assign_positions<T, K: PartialEq>(
    standings: &mut [T],
    key: impl Fn(&T) -> K,
    set: impl Fn(&mut T, u32),
) {
    let mut previous: Option<K> = None;
    let mut position: u32 = 0;
    for (index, standing) in standings.iter_mut().enumerate() {
        let current: K = key(standing);
        if previous.as_ref() != Some(&current) {
            position = finishing_position(index);
        }
        set(standing, position);
        previous = Some(current);
    }
}
