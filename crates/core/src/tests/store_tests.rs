// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    create_test_round, create_test_store, create_test_tour, create_test_tournament, eid,
};
use crate::{CoreError, EventStore, Located, RoundHome, TournamentHome};
use fairway_domain::{Event, EventKind, Round, Tour, Tournament};

fn nested_store() -> EventStore {
    let cup: Tournament =
        create_test_tournament("cup", Vec::new(), vec![create_test_round("cup-r1")]);
    let mut tour: Tour = create_test_tour("tour", vec![cup]);
    tour.rounds.push(create_test_round("tour-r1"));
    create_test_store(vec![
        Event::Tour(tour),
        Event::Round(create_test_round("solo")),
        Event::Tournament(create_test_tournament("open", Vec::new(), Vec::new())),
    ])
}

#[test]
fn test_standalone_events_resolve_to_themselves() {
    let store: EventStore = nested_store();

    assert_eq!(store.len(), 3);
    assert_eq!(store.round_home(&eid("solo")), Some(&RoundHome::Standalone));
    assert_eq!(
        store.tournament_home(&eid("open")),
        Some(&TournamentHome::Standalone)
    );
    assert!(store.tour(&eid("tour")).is_some());
}

#[test]
fn test_nested_events_resolve_to_their_homes() {
    let store: EventStore = nested_store();

    assert_eq!(
        store.tournament_home(&eid("cup")),
        Some(&TournamentHome::InTour {
            tour_id: eid("tour"),
            index: 0
        })
    );
    assert_eq!(
        store.round_home(&eid("cup-r1")),
        Some(&RoundHome::InTournament {
            tournament_id: eid("cup"),
            index: 0
        })
    );
    assert_eq!(
        store.round_home(&eid("tour-r1")),
        Some(&RoundHome::InTour {
            tour_id: eid("tour"),
            index: 0
        })
    );
    assert_eq!(store.round(&eid("cup-r1")).unwrap().name, "Round cup-r1");
}

#[test]
fn test_resolve_reports_kind_of_any_event() {
    let store: EventStore = nested_store();

    let kinds: Vec<EventKind> = ["cup", "tour", "cup-r1", "solo"]
        .iter()
        .map(|id| store.resolve(&eid(id)).unwrap().kind())
        .collect();

    assert_eq!(
        kinds,
        vec![
            EventKind::Tournament,
            EventKind::Tour,
            EventKind::Round,
            EventKind::Round
        ]
    );
    assert!(store.resolve(&eid("missing")).is_none());
}

#[test]
fn test_writing_back_a_nested_round_touches_only_the_tour() {
    let mut store: EventStore = nested_store();

    let mut resolved = store.resolve_round(&eid("cup-r1")).unwrap();
    resolved.value.name = String::from("Final Round");
    let written: bool = store.write_back_round(resolved).unwrap();

    assert!(written);
    assert_eq!(store.round(&eid("cup-r1")).unwrap().name, "Final Round");
    assert_eq!(store.touched().iter().collect::<Vec<_>>(), vec![&eid("tour")]);

    let changes = store.take_changes();
    assert_eq!(changes.changed.len(), 1);
    assert_eq!(changes.changed[0].id(), &eid("tour"));
    assert!(store.touched().is_empty());
}

#[test]
fn test_write_back_of_located_tournament_replaces_in_tour() {
    let mut store: EventStore = nested_store();

    let Some(Located::Tournament(mut resolved)) = store.resolve(&eid("cup")) else {
        panic!("cup should resolve to a tournament");
    };
    resolved.value.location = String::from("Pine Valley");
    store.write_back(Located::Tournament(resolved)).unwrap();

    let tour: &Tour = store.tour(&eid("tour")).unwrap();
    assert_eq!(tour.tournaments[0].location, "Pine Valley");
}

#[test]
fn test_duplicate_top_level_ids_are_rejected() {
    let result: Result<EventStore, CoreError> = EventStore::from_events(vec![
        Event::Round(create_test_round("same")),
        Event::Round(create_test_round("same")),
    ]);

    assert_eq!(result.unwrap_err(), CoreError::DuplicateId(eid("same")));
}

#[test]
fn test_round_in_two_places_is_a_containment_violation() {
    let cup: Tournament =
        create_test_tournament("cup", Vec::new(), vec![create_test_round("shared")]);
    let mut tour: Tour = create_test_tour("tour", vec![cup]);
    tour.rounds.push(create_test_round("shared"));

    let result: Result<EventStore, CoreError> = EventStore::from_events(vec![Event::Tour(tour)]);

    assert_eq!(
        result.unwrap_err(),
        CoreError::ContainmentViolation(eid("shared"))
    );
}

#[test]
fn test_tournament_both_standalone_and_nested_is_rejected() {
    let tour: Tour = create_test_tour(
        "tour",
        vec![create_test_tournament("cup", Vec::new(), Vec::new())],
    );

    let result: Result<EventStore, CoreError> = EventStore::from_events(vec![
        Event::Tour(tour),
        Event::Tournament(create_test_tournament("cup", Vec::new(), Vec::new())),
    ]);

    assert!(matches!(
        result.unwrap_err(),
        CoreError::ContainmentViolation(id) if id == eid("cup")
    ));
}

#[test]
fn test_insert_rejects_an_id_used_by_a_nested_event() {
    let mut store: EventStore = nested_store();

    let result: Result<(), CoreError> = store.insert(Event::Round(create_test_round("cup-r1")));

    assert_eq!(result.unwrap_err(), CoreError::DuplicateId(eid("cup-r1")));
    assert_eq!(store.len(), 3);
    assert!(store.touched().is_empty());
}

#[test]
fn test_insert_rolls_back_when_nested_ids_collide() {
    let mut store: EventStore = nested_store();
    let clashing: Tournament =
        create_test_tournament("new", Vec::new(), vec![create_test_round("tour-r1")]);

    let result: Result<(), CoreError> = store.insert(Event::Tournament(clashing));

    assert_eq!(
        result.unwrap_err(),
        CoreError::ContainmentViolation(eid("tour-r1"))
    );
    assert!(store.get(&eid("new")).is_none());
    assert_eq!(
        store.round_home(&eid("tour-r1")),
        Some(&RoundHome::InTour {
            tour_id: eid("tour"),
            index: 0
        })
    );
}

#[test]
fn test_remove_nested_round_updates_owner_and_index() {
    let mut store: EventStore = nested_store();

    assert!(store.remove(&eid("cup-r1")).unwrap());

    assert!(store.round(&eid("cup-r1")).is_none());
    assert!(!store.contains_id(&eid("cup-r1")));
    assert!(store.tournament(&eid("cup")).unwrap().rounds.is_empty());
    assert!(store.touched().contains(&eid("tour")));
}

#[test]
fn test_remove_top_level_event_drops_its_children() {
    let mut store: EventStore = nested_store();

    assert!(store.remove(&eid("tour")).unwrap());

    let changes = store.take_changes();
    assert_eq!(changes.removed, vec![eid("tour")]);
    assert!(changes.changed.is_empty());
    assert!(store.tournament(&eid("cup")).is_none());
    assert!(store.round(&eid("tour-r1")).is_none());
}

#[test]
fn test_remove_unknown_id_returns_false() {
    let mut store: EventStore = nested_store();

    assert!(!store.remove(&eid("ghost")).unwrap());
    assert!(store.touched().is_empty());
}

#[test]
fn test_replace_refuses_a_different_kind() {
    let mut store: EventStore = nested_store();
    let mut impostor: Round = create_test_round("open");
    impostor.name = String::from("Not a tournament");

    assert!(!store.replace(Event::Round(impostor)).unwrap());
    assert_eq!(store.get(&eid("open")).unwrap().kind(), EventKind::Tournament);
}
