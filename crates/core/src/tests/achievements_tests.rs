// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    create_test_player, create_test_round, create_test_store, create_test_tour,
    create_test_tournament, eid, fill_card, pid,
};
use crate::{EventStore, medal_records};
use fairway_domain::{Event, EventKind, PlayerId, PointsSystem, Round, Tour, Tournament};
use fairway_notify::{AchievementKind, AchievementRecord, CompletionNotice};
use std::collections::BTreeMap;
use time::macros::date;

fn notice(id: &str, kind: EventKind, name: &str) -> CompletionNotice {
    CompletionNotice {
        event_id: eid(id),
        kind,
        event_name: name.to_string(),
        completed_on: date!(2026 - 05 - 04),
    }
}

fn scored_round(id: &str) -> Round {
    let mut round: Round = create_test_round(id);
    fill_card(&mut round, "ann", &[4; 9]);
    fill_card(&mut round, "bob", &[5; 9]);
    fill_card(&mut round, "cat", &[5; 9]);
    round.ensure_scorecard(&pid("dan"));
    round
}

fn summary(records: &[(PlayerId, AchievementRecord)]) -> Vec<(String, AchievementKind, u32)> {
    records
        .iter()
        .map(|(id, record)| (id.to_string(), record.kind, record.position))
        .collect()
}

#[test]
fn test_tournament_medals_skip_players_without_holes() {
    let players = ["dan", "ann", "bob", "cat"]
        .iter()
        .map(|id| create_test_player(id))
        .collect();
    let tournament: Tournament = create_test_tournament("open", players, vec![scored_round("r1")]);
    let store: EventStore = create_test_store(vec![Event::Tournament(tournament)]);

    let records = medal_records(
        &store,
        &notice("open", EventKind::Tournament, "Tournament open"),
    );

    assert_eq!(
        summary(&records),
        vec![
            (String::from("ann"), AchievementKind::TournamentWin, 1),
            (String::from("bob"), AchievementKind::TournamentPodium, 2),
            (String::from("cat"), AchievementKind::TournamentPodium, 2),
        ]
    );
    assert_eq!(records[0].1.text, "Player ann won Tournament open");
    assert_eq!(records[0].1.date, date!(2026 - 05 - 04));
}

#[test]
fn test_tour_medals_ignore_points_earned_without_playing() {
    let mut tour: Tour = create_test_tour("tour", Vec::new());
    tour.players = ["ann", "bob", "cat", "dan"]
        .iter()
        .map(|id| create_test_player(id))
        .collect();
    tour.points_system = PointsSystem {
        win: 100,
        top_finish: BTreeMap::from([(2, 80), (3, 60)]),
        participation: 10,
    };
    let mut round: Round = create_test_round("tr1");
    fill_card(&mut round, "ann", &[4; 9]);
    fill_card(&mut round, "bob", &[5; 9]);
    round.ensure_scorecard(&pid("cat"));
    tour.rounds.push(round);
    let store: EventStore = create_test_store(vec![Event::Tour(tour)]);

    let records = medal_records(&store, &notice("tour", EventKind::Tour, "Tour tour"));

    assert_eq!(
        summary(&records),
        vec![
            (String::from("ann"), AchievementKind::TourWin, 1),
            (String::from("bob"), AchievementKind::TourPodium, 2),
        ]
    );
}

#[test]
fn test_nested_tournament_medals_resolve_through_tour() {
    let players = vec![create_test_player("ann"), create_test_player("bob")];
    let cup: Tournament = create_test_tournament("cup", players, vec![scored_round("cup-r1")]);
    let store: EventStore =
        create_test_store(vec![Event::Tour(create_test_tour("tour", vec![cup]))]);

    let records = medal_records(&store, &notice("cup", EventKind::Tournament, "Cup"));

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].1.text, "Player bob finished 2nd in Cup");
}

#[test]
fn test_rounds_earn_no_medals() {
    let store: EventStore = create_test_store(vec![Event::Round(scored_round("solo"))]);

    assert!(medal_records(&store, &notice("solo", EventKind::Round, "Round solo")).is_empty());
}
