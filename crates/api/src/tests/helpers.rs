// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use fairway::ApplyContext;
use fairway_domain::{Event, EventId};
use fairway_persistence::{EventRepository, InMemoryRepository, PersistenceError};
use time::macros::{date, datetime};

use crate::{
    ApiResult, CommandResponse, CreateRoundRequest, CreateTourRequest, CreateTournamentRequest,
    HoleScoreRequest, PlayerRequest, create_round, create_tour, create_tournament,
    record_hole_score,
};

pub fn create_test_context() -> ApplyContext {
    ApplyContext::new(date!(2026 - 05 - 02), datetime!(2026-05-02 14:30 UTC))
}

pub fn create_test_player_request(id: &str) -> PlayerRequest {
    PlayerRequest {
        id: Some(id.to_string()),
        name: format!("Player {id}"),
        email: format!("{id}@example.com"),
        avatar_url: None,
    }
}

pub fn create_test_tournament_request(name: &str) -> CreateTournamentRequest {
    CreateTournamentRequest {
        creator: create_test_player_request("ann"),
        name: name.to_string(),
        format: String::from("Stroke Play"),
        start_date: date!(2026 - 05 - 01),
        end_date: date!(2026 - 05 - 03),
        location: String::from("Cedar Ridge"),
        is_team_event: false,
        scoring_type: String::from("stroke"),
        tour_id: None,
    }
}

pub fn create_test_tour_request(name: &str) -> CreateTourRequest {
    CreateTourRequest {
        creator: create_test_player_request("ann"),
        name: name.to_string(),
        start_date: date!(2026 - 04 - 01),
        end_date: date!(2026 - 09 - 30),
        points_system: None,
    }
}

pub fn create_test_round_request(name: &str, parent_id: Option<&str>) -> CreateRoundRequest {
    CreateRoundRequest {
        parent_id: parent_id.map(ToString::to_string),
        creator: parent_id.is_none().then(|| create_test_player_request("ann")),
        name: name.to_string(),
        date: date!(2026 - 05 - 02),
        format: String::from("Stroke Play"),
        course_details: None,
    }
}

pub fn hole(hole: u8, score: u8, par: u8) -> HoleScoreRequest {
    HoleScoreRequest {
        hole,
        score: Some(score),
        par: Some(par),
        notes: None,
    }
}

/// Creates a standalone tournament and returns its id.
pub fn seed_tournament(repository: &mut InMemoryRepository, name: &str) -> String {
    let result: ApiResult<CommandResponse> = create_tournament(
        repository,
        create_test_tournament_request(name),
        &create_test_context(),
    )
    .unwrap();
    result.response.created_id.unwrap()
}

/// Creates a tour and returns its id.
pub fn seed_tour(repository: &mut InMemoryRepository, name: &str) -> String {
    let result: ApiResult<CommandResponse> =
        create_tour(repository, create_test_tour_request(name), &create_test_context()).unwrap();
    result.response.created_id.unwrap()
}

/// Creates a round, inside `parent_id` when given, and returns its id.
pub fn seed_round(
    repository: &mut InMemoryRepository,
    name: &str,
    parent_id: Option<&str>,
) -> String {
    let result: ApiResult<CommandResponse> = create_round(
        repository,
        create_test_round_request(name, parent_id),
        &create_test_context(),
    )
    .unwrap();
    result.response.created_id.unwrap()
}

/// Records `strokes` on holes 1..=n for a player, par 4 throughout.
pub fn play_holes(
    repository: &mut InMemoryRepository,
    round_id: &str,
    player_id: &str,
    strokes: &[u8],
) {
    for (index, strokes) in strokes.iter().enumerate() {
        let number: u8 = u8::try_from(index + 1).unwrap();
        record_hole_score(
            repository,
            round_id,
            player_id,
            hole(number, *strokes, 4),
            &create_test_context(),
        )
        .unwrap();
    }
}

/// A repository that reads normally but refuses every write.
pub struct ReadOnlyRepository {
    pub inner: InMemoryRepository,
}

impl EventRepository for ReadOnlyRepository {
    fn list(&mut self) -> Result<Vec<Event>, PersistenceError> {
        self.inner.list()
    }

    fn get(&mut self, event_id: &EventId) -> Result<Option<Event>, PersistenceError> {
        self.inner.get(event_id)
    }

    fn put(&mut self, _event: &Event) -> Result<(), PersistenceError> {
        Err(PersistenceError::DatabaseError(String::from("disk full")))
    }

    fn delete(&mut self, _event_id: &EventId) -> Result<bool, PersistenceError> {
        Err(PersistenceError::DatabaseError(String::from("disk full")))
    }
}
