// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApplyContext, EventStore};
use fairway_domain::{
    CourseDetails, Email, Event, EventId, EventStatus, Player, PlayerId, PointsSystem, Round,
    Team, TeamId, Tour, Tournament,
};
use time::Date;
use time::macros::{date, datetime};

pub fn eid(id: &str) -> EventId {
    EventId::new(id).unwrap()
}

pub fn pid(id: &str) -> PlayerId {
    PlayerId::new(id).unwrap()
}

pub fn email(value: &str) -> Email {
    Email::parse(value).unwrap()
}

pub fn create_test_player(id: &str) -> Player {
    Player::new(pid(id), &format!("Player {id}"), email(&format!("{id}@example.com")))
}

pub fn create_test_team(id: &str) -> Team {
    Team {
        id: TeamId::new(id).unwrap(),
        name: format!("Team {id}"),
        color: String::from("#2e7d32"),
        logo: None,
        captain: None,
    }
}

/// Context pinned to the middle of the default tournament window.
pub fn create_test_context() -> ApplyContext {
    ApplyContext::new(date!(2026 - 05 - 02), datetime!(2026-05-02 14:30 UTC))
}

/// A nine-hole par-35 round on 2026-05-02 with no scorecards.
pub fn create_test_round(id: &str) -> Round {
    let mut round: Round = Round::new(
        eid(id),
        &format!("Round {id}"),
        date!(2026 - 05 - 02),
        "Stroke Play",
    );
    round.course_details = Some(CourseDetails {
        name: String::from("Cedar Ridge"),
        holes: 9,
        par: 35,
    });
    round
}

pub fn create_test_tournament(id: &str, players: Vec<Player>, rounds: Vec<Round>) -> Tournament {
    Tournament {
        id: eid(id),
        name: format!("Tournament {id}"),
        format: String::from("Stroke Play"),
        start_date: date!(2026 - 05 - 01),
        end_date: date!(2026 - 05 - 03),
        location: String::from("Cedar Ridge"),
        players,
        teams: Vec::new(),
        rounds,
        invitations: Vec::new(),
        is_team_event: false,
        scoring_type: String::from("gross"),
        status: EventStatus::Upcoming,
        shout_outs: Vec::new(),
        highlights: Vec::new(),
    }
}

pub fn create_test_tour(id: &str, tournaments: Vec<Tournament>) -> Tour {
    let start_date: Date = date!(2026 - 04 - 01);
    Tour {
        id: eid(id),
        name: format!("Tour {id}"),
        start_date,
        end_date: date!(2026 - 09 - 30),
        tournaments,
        rounds: Vec::new(),
        players: Vec::new(),
        teams: Vec::new(),
        invitations: Vec::new(),
        points_system: PointsSystem::default(),
        status: EventStatus::Upcoming,
        shout_outs: Vec::new(),
        highlights: Vec::new(),
    }
}

pub fn create_test_store(events: Vec<Event>) -> EventStore {
    EventStore::from_events(events).unwrap()
}

/// Sets every hole of a player's card in a round to the given strokes.
pub fn fill_card(round: &mut Round, player: &str, strokes: &[u8]) {
    let card = round.scores.entry(pid(player)).or_insert_with(Vec::new);
    card.clear();
    for (i, s) in strokes.iter().enumerate() {
        card.push(fairway_domain::HoleScore {
            hole: u8::try_from(i + 1).unwrap(),
            score: Some(*s),
            par: Some(4),
            notes: None,
        });
    }
}
