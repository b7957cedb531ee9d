// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CourseDetails, Email, EventId, EventStatus, HoleScore, Player, PlayerId, PointsSystem, Round,
    TeamId, Tour, Tournament,
};
use std::collections::BTreeMap;
use time::Date;
use time::macros::date;

pub fn create_test_player(id: &str) -> Player {
    Player::new(
        PlayerId::new(id).unwrap(),
        &format!("Player {id}"),
        Email::parse(&format!("{id}@example.com")).unwrap(),
    )
}

pub fn create_team_player(id: &str, team: &str) -> Player {
    let mut player: Player = create_test_player(id);
    player.team_id = Some(TeamId::new(team).unwrap());
    player
}

pub fn pid(id: &str) -> PlayerId {
    PlayerId::new(id).unwrap()
}

pub fn eid(id: &str) -> EventId {
    EventId::new(id).unwrap()
}

/// A round with one scorecard per entry; each card lists per-hole strokes.
pub fn create_scored_round(id: &str, cards: &[(&str, &[u8])]) -> Round {
    let mut round: Round = Round::new(eid(id), "Round", date!(2026 - 05 - 02), "Stroke Play");
    round.course_details = Some(CourseDetails {
        name: String::from("Pebble Creek"),
        holes: 18,
        par: 72,
    });
    for (player, strokes) in cards {
        let card: Vec<HoleScore> = strokes
            .iter()
            .enumerate()
            .map(|(i, s)| HoleScore {
                hole: u8::try_from(i + 1).unwrap(),
                score: Some(*s),
                par: Some(4),
                notes: None,
            })
            .collect();
        round.scores.insert(pid(player), card);
    }
    round
}

pub fn create_test_tournament(id: &str, players: Vec<Player>, rounds: Vec<Round>) -> Tournament {
    Tournament {
        id: eid(id),
        name: format!("Tournament {id}"),
        format: String::from("Stroke Play"),
        start_date: date!(2026 - 05 - 01),
        end_date: date!(2026 - 05 - 03),
        location: String::from("Pebble Creek"),
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

pub fn create_test_tour(tournaments: Vec<Tournament>, points_system: PointsSystem) -> Tour {
    let start_date: Date = date!(2026 - 04 - 01);
    Tour {
        id: eid("tour-1"),
        name: String::from("Summer Tour"),
        start_date,
        end_date: date!(2026 - 09 - 30),
        tournaments,
        rounds: Vec::new(),
        players: Vec::new(),
        teams: Vec::new(),
        invitations: Vec::new(),
        points_system,
        status: EventStatus::Upcoming,
        shout_outs: Vec::new(),
        highlights: Vec::new(),
    }
}

pub fn standard_points() -> PointsSystem {
    PointsSystem {
        win: 100,
        top_finish: BTreeMap::from([(2, 80), (3, 60)]),
        participation: 10,
    }
}
