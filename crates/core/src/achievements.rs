// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::EventStore;
use fairway_domain::{
    EventKind, PlayerId, PlayerStanding, Round, Tour, TourStanding, holes_played,
    tour_leaderboard, tournament_leaderboard,
};
use fairway_notify::{AchievementRecord, CompletionNotice};

/// Medal records for a completed tournament or tour.
///
/// Players who never recorded a hole are left off the board before medals
/// are handed out, and the remaining players are re-ranked with shared
/// positions for ties. Everyone placed 1st to 3rd gets a record.
///
/// Returns nothing for rounds or for events that no longer exist.
#[must_use]
pub fn medal_records(
    store: &EventStore,
    notice: &CompletionNotice,
) -> Vec<(PlayerId, AchievementRecord)> {
    match notice.kind {
        EventKind::Tournament => store
            .tournament(&notice.event_id)
            .map(|tournament| {
                let board: Vec<PlayerStanding> = tournament_leaderboard(tournament)
                    .into_iter()
                    .filter(|s| s.holes_played > 0)
                    .collect();
                let ranked: Vec<(u32, &PlayerStanding)> = rerank(&board, |s| u64::from(s.total));
                award(notice, ranked, |s| (&s.player_id, s.name.as_str()))
            })
            .unwrap_or_default(),
        EventKind::Tour => store
            .tour(&notice.event_id)
            .map(|tour| {
                let board: Vec<TourStanding> = tour_leaderboard(tour)
                    .into_iter()
                    .filter(|s| tour_holes_played(tour, &s.player_id) > 0)
                    .collect();
                let ranked: Vec<(u32, &TourStanding)> =
                    rerank(&board, |s| u64::from(s.total_points));
                award(notice, ranked, |s| (&s.player_id, s.name.as_str()))
            })
            .unwrap_or_default(),
        EventKind::Round => Vec::new(),
    }
}

fn tour_holes_played(tour: &Tour, player_id: &PlayerId) -> u32 {
    tour.tournaments
        .iter()
        .flat_map(|t| t.rounds.iter())
        .chain(tour.rounds.iter())
        .map(|round: &Round| holes_played(round, player_id))
        .sum()
}

/// Competition ranking over an already sorted board.
fn rerank<T>(board: &[T], key: impl Fn(&T) -> u64) -> Vec<(u32, &T)> {
    let mut ranked: Vec<(u32, &T)> = Vec::with_capacity(board.len());
    let mut previous: Option<u64> = None;
    let mut position: u32 = 0;
    for (index, standing) in board.iter().enumerate() {
        let current: u64 = key(standing);
        if previous != Some(current) {
            position = u32::try_from(index + 1).unwrap_or(u32::MAX);
        }
        ranked.push((position, standing));
        previous = Some(current);
    }
    ranked
}

fn award<'a, T>(
    notice: &CompletionNotice,
    ranked: Vec<(u32, &'a T)>,
    who: impl Fn(&'a T) -> (&'a PlayerId, &'a str),
) -> Vec<(PlayerId, AchievementRecord)> {
    ranked
        .into_iter()
        .filter_map(|(position, standing)| {
            let (player_id, name): (&PlayerId, &str) = who(standing);
            AchievementRecord::for_finish(notice, name, position)
                .map(|record| (player_id.clone(), record))
        })
        .collect()
}
