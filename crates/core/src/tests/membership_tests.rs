// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    create_test_player, create_test_round, create_test_store, create_test_team, create_test_tour,
    create_test_tournament, eid, email, pid,
};
use crate::{EventStore, accept, decline, invite, remove_player};
use fairway_domain::{Email, Event, HoleScore, Player, Roster, Round, TeamId, Tour, Tournament};

fn tournament_store(players: Vec<Player>) -> EventStore {
    let tournament: Tournament =
        create_test_tournament("open", players, vec![create_test_round("open-r1")]);
    create_test_store(vec![Event::Tournament(tournament)])
}

fn tour_store() -> EventStore {
    let cup: Tournament =
        create_test_tournament("cup", Vec::new(), vec![create_test_round("cup-r1")]);
    let mut tour: Tour = create_test_tour("tour", vec![cup]);
    tour.players.push(create_test_player("alice"));
    tour.rounds.push(create_test_round("tour-r1"));
    create_test_store(vec![Event::Tour(tour)])
}

// ============================================================================
// Invite
// ============================================================================

#[test]
fn test_invite_skips_existing_players_and_duplicates() {
    let mut store: EventStore = tournament_store(vec![create_test_player("a")]);
    let emails: Vec<Email> = vec![
        email("a@example.com"),
        email("a@example.com"),
        email("b@example.com"),
        email("B@Example.com"),
    ];

    let added: Vec<Email> = invite(&mut store, &eid("open"), &emails).unwrap().unwrap();

    assert_eq!(added, vec![email("b@example.com")]);
    let tournament: &Tournament = store.tournament(&eid("open")).unwrap();
    assert_eq!(tournament.invitations, vec![email("b@example.com")]);
    assert!(!tournament.invitations.contains(&email("a@example.com")));
}

#[test]
fn test_invite_with_nothing_new_touches_nothing() {
    let mut store: EventStore = tournament_store(vec![create_test_player("a")]);

    let added: Vec<Email> = invite(&mut store, &eid("open"), &[email("a@example.com")])
        .unwrap()
        .unwrap();

    assert!(added.is_empty());
    assert!(store.touched().is_empty());
}

#[test]
fn test_invite_unknown_event_returns_none() {
    let mut store: EventStore = tournament_store(Vec::new());

    assert!(invite(&mut store, &eid("ghost"), &[email("x@example.com")])
        .unwrap()
        .is_none());
}

#[test]
fn test_tour_invite_cascades_to_tournaments() {
    let mut store: EventStore = tour_store();
    let emails: Vec<Email> = vec![email("alice@example.com"), email("bob@example.com")];

    let added: Vec<Email> = invite(&mut store, &eid("tour"), &emails).unwrap().unwrap();

    assert_eq!(added, vec![email("bob@example.com")]);
    let cup: &Tournament = store.tournament(&eid("cup")).unwrap();
    assert_eq!(
        cup.invitations,
        vec![email("alice@example.com"), email("bob@example.com")]
    );
}

#[test]
fn test_tour_invite_reaches_tour_player_missing_from_tournament() {
    let mut store: EventStore = tour_store();

    let added: Vec<Email> = invite(&mut store, &eid("tour"), &[email("alice@example.com")])
        .unwrap()
        .unwrap();

    assert!(added.is_empty());
    assert!(store.tour(&eid("tour")).unwrap().invitations.is_empty());
    assert_eq!(
        store.tournament(&eid("cup")).unwrap().invitations,
        vec![email("alice@example.com")]
    );
    assert!(store.touched().contains(&eid("tour")));
}

#[test]
fn test_tour_invite_skips_tournament_that_already_has_the_player() {
    let cup: Tournament = create_test_tournament(
        "cup",
        vec![create_test_player("alice")],
        vec![create_test_round("cup-r1")],
    );
    let mut tour: Tour = create_test_tour("tour", vec![cup]);
    tour.players.push(create_test_player("alice"));
    let mut store: EventStore = create_test_store(vec![Event::Tour(tour)]);

    invite(&mut store, &eid("tour"), &[email("alice@example.com")]).unwrap();

    assert!(store.tournament(&eid("cup")).unwrap().invitations.is_empty());
    assert!(store.touched().is_empty());
}

#[test]
fn test_tournament_invite_does_not_reach_the_tour() {
    let mut store: EventStore = tour_store();

    invite(&mut store, &eid("cup"), &[email("carol@example.com")]).unwrap();

    assert!(store.tour(&eid("tour")).unwrap().invitations.is_empty());
    assert_eq!(
        store.tournament(&eid("cup")).unwrap().invitations,
        vec![email("carol@example.com")]
    );
}

// ============================================================================
// Accept / decline
// ============================================================================

#[test]
fn test_accept_enrols_player_with_blank_scorecards() {
    let mut store: EventStore = tournament_store(Vec::new());
    invite(&mut store, &eid("open"), &[email("bob@example.com")]).unwrap();
    let bob: Player = create_test_player("bob");

    assert!(accept(&mut store, &eid("open"), &bob).unwrap());

    let tournament: &Tournament = store.tournament(&eid("open")).unwrap();
    assert!(tournament.invitations.is_empty());
    assert_eq!(tournament.players.len(), 1);
    let card: &Vec<HoleScore> = &tournament.rounds[0].scores[&pid("bob")];
    assert_eq!(card.len(), 9);
    assert!(card.iter().all(|h| h.score.is_none() && h.par == Some(3)));
}

#[test]
fn test_accept_without_invitation_is_refused() {
    let mut store: EventStore = tournament_store(Vec::new());

    assert!(!accept(&mut store, &eid("open"), &create_test_player("bob")).unwrap());
    assert!(store.tournament(&eid("open")).unwrap().players.is_empty());
}

#[test]
fn test_accept_twice_is_refused_the_second_time() {
    let mut store: EventStore = tournament_store(Vec::new());
    invite(&mut store, &eid("open"), &[email("bob@example.com")]).unwrap();
    let bob: Player = create_test_player("bob");

    assert!(accept(&mut store, &eid("open"), &bob).unwrap());
    assert!(!accept(&mut store, &eid("open"), &bob).unwrap());
    assert_eq!(store.tournament(&eid("open")).unwrap().players.len(), 1);
}

#[test]
fn test_accept_clears_team_assignment() {
    let mut store: EventStore = tournament_store(Vec::new());
    invite(&mut store, &eid("open"), &[email("bob@example.com")]).unwrap();
    let mut bob: Player = create_test_player("bob");
    bob.team_id = Some(TeamId::new("elsewhere").unwrap());

    accept(&mut store, &eid("open"), &bob).unwrap();

    assert_eq!(store.tournament(&eid("open")).unwrap().players[0].team_id, None);
}

#[test]
fn test_tour_accept_covers_every_nested_round() {
    let mut store: EventStore = tour_store();
    invite(&mut store, &eid("tour"), &[email("bob@example.com")]).unwrap();

    assert!(accept(&mut store, &eid("tour"), &create_test_player("bob")).unwrap());

    let tour: &Tour = store.tour(&eid("tour")).unwrap();
    assert!(tour.has_player(&pid("bob")));
    assert!(tour.rounds[0].scores.contains_key(&pid("bob")));
    let cup: &Tournament = &tour.tournaments[0];
    assert!(cup.invitations.is_empty());
    assert!(cup.players.iter().any(|p| p.id == pid("bob")));
    assert!(cup.rounds[0].scores.contains_key(&pid("bob")));
}

#[test]
fn test_accept_standalone_round_adds_scorecard() {
    let mut round: Round = create_test_round("solo");
    round.invitations.push(email("bob@example.com"));
    let mut store: EventStore = create_test_store(vec![Event::Round(round)]);

    assert!(accept(&mut store, &eid("solo"), &create_test_player("bob")).unwrap());

    let round: &Round = store.round(&eid("solo")).unwrap();
    assert_eq!(round.players.len(), 1);
    assert_eq!(round.scores[&pid("bob")].len(), 9);
}

#[test]
fn test_decline_removes_only_that_invitation() {
    let mut store: EventStore = tour_store();
    invite(&mut store, &eid("tour"), &[email("bob@example.com")]).unwrap();

    assert!(decline(&mut store, &eid("tour"), &email("bob@example.com")).unwrap());

    assert!(store.tour(&eid("tour")).unwrap().invitations.is_empty());
    assert_eq!(
        store.tournament(&eid("cup")).unwrap().invitations,
        vec![email("bob@example.com")]
    );
    assert!(!decline(&mut store, &eid("tour"), &email("bob@example.com")).unwrap());
}

// ============================================================================
// Remove
// ============================================================================

#[test]
fn test_remove_player_cascades_through_tour() {
    let mut store: EventStore = tour_store();
    invite(&mut store, &eid("tour"), &[email("bob@example.com")]).unwrap();
    accept(&mut store, &eid("tour"), &create_test_player("bob")).unwrap();

    assert!(remove_player(&mut store, &eid("tour"), &pid("bob")).unwrap());

    let tour: &Tour = store.tour(&eid("tour")).unwrap();
    assert!(!tour.players.iter().any(|p| p.id == pid("bob")));
    assert!(!tour.rounds[0].scores.contains_key(&pid("bob")));
    assert!(!tour.tournaments[0].players.iter().any(|p| p.id == pid("bob")));
    assert!(!tour.tournaments[0].rounds[0].scores.contains_key(&pid("bob")));
}

#[test]
fn test_remove_player_clears_captaincy() {
    let mut tournament: Tournament =
        create_test_tournament("open", vec![create_test_player("cap")], Vec::new());
    let mut team = create_test_team("red");
    team.captain = Some(pid("cap"));
    tournament.teams.push(team);
    let mut store: EventStore = create_test_store(vec![Event::Tournament(tournament)]);

    assert!(remove_player(&mut store, &eid("open"), &pid("cap")).unwrap());

    assert_eq!(store.tournament(&eid("open")).unwrap().teams[0].captain, None);
}

#[test]
fn test_remove_unknown_player_returns_false() {
    let mut store: EventStore = tournament_store(vec![create_test_player("a")]);

    assert!(!remove_player(&mut store, &eid("open"), &pid("nobody")).unwrap());
    assert!(store.touched().is_empty());
}
