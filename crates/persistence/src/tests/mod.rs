// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use fairway_domain::{Email, Event, EventId, EventStatus, Player, PlayerId, Round, Tour, Tournament};
use time::macros::date;

pub fn eid(id: &str) -> EventId {
    EventId::new(id).unwrap()
}

pub fn create_test_player(id: &str) -> Player {
    Player::new(
        PlayerId::new(id).unwrap(),
        &format!("Player {id}"),
        Email::parse(&format!("{id}@example.com")).unwrap(),
    )
}

pub fn create_test_round(id: &str) -> Round {
    let mut round: Round = Round::new(
        eid(id),
        &format!("Round {id}"),
        date!(2026 - 06 - 12),
        "Stroke Play",
    );
    round.players.push(create_test_player("ann"));
    round.ensure_scorecard(&PlayerId::new("ann").unwrap());
    round
}

pub fn create_test_tournament(id: &str, rounds: Vec<Round>) -> Tournament {
    Tournament {
        id: eid(id),
        name: format!("Tournament {id}"),
        format: String::from("Stroke Play"),
        start_date: date!(2026 - 06 - 12),
        end_date: date!(2026 - 06 - 14),
        location: String::from("Cedar Ridge"),
        players: vec![create_test_player("ann")],
        teams: Vec::new(),
        rounds,
        invitations: vec![Email::parse("bob@example.com").unwrap()],
        is_team_event: false,
        scoring_type: String::from("gross"),
        status: EventStatus::Upcoming,
        shout_outs: Vec::new(),
        highlights: Vec::new(),
    }
}

/// A tour holding one tournament with one round, plus a tour round.
pub fn create_test_tour(id: &str) -> Event {
    let cup: Tournament = create_test_tournament(
        &format!("{id}-cup"),
        vec![create_test_round(&format!("{id}-cup-r1"))],
    );
    Event::Tour(Tour {
        id: eid(id),
        name: format!("Tour {id}"),
        start_date: date!(2026 - 04 - 01),
        end_date: date!(2026 - 09 - 30),
        tournaments: vec![cup],
        rounds: vec![create_test_round(&format!("{id}-r1"))],
        players: vec![create_test_player("ann")],
        teams: Vec::new(),
        invitations: Vec::new(),
        points_system: fairway_domain::PointsSystem::default(),
        status: EventStatus::Active,
        shout_outs: Vec::new(),
        highlights: Vec::new(),
    })
}
