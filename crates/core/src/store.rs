// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Indexed event collection and containment resolution.
//!
//! Events are persisted as a flat collection of top-level [`Event`]s. A
//! tournament lives either at the top level or inside exactly one tour; a
//! round lives at the top level, inside a tour, or inside a tournament.
//! [`EventStore`] keeps derived indices from every nested id to its
//! [`TournamentHome`] / [`RoundHome`] so lookups never scan.
//!
//! Mutation follows resolve, modify, write back: a `resolve_*` call returns
//! an owned copy together with its home, and the matching `write_back_*`
//! call replaces the child through its owning aggregate. Every top-level
//! event touched along the way is recorded so the caller can persist exactly
//! those.

use crate::error::CoreError;
use fairway_domain::{
    Event, EventId, EventKind, Highlight, Roster, Round, TeamRoster, Tour, Tournament,
};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Where a tournament lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TournamentHome {
    /// A top-level event.
    Standalone,
    /// Inside a tour's `tournaments`.
    InTour { tour_id: EventId, index: usize },
}

impl TournamentHome {
    /// The top-level event that holds a tournament with id `own_id`.
    #[must_use]
    pub const fn container<'a>(&'a self, own_id: &'a EventId) -> &'a EventId {
        match self {
            Self::Standalone => own_id,
            Self::InTour { tour_id, .. } => tour_id,
        }
    }
}

/// Where a round lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundHome {
    /// A top-level event.
    Standalone,
    /// Inside a tour's own `rounds`.
    InTour { tour_id: EventId, index: usize },
    /// Inside a tournament's `rounds`. The tournament may itself be nested.
    InTournament { tournament_id: EventId, index: usize },
}

impl RoundHome {
    /// The event that owns a round with id `round_id`: the tournament or
    /// tour holding it, or the round itself when standalone.
    #[must_use]
    pub const fn owner<'a>(&'a self, round_id: &'a EventId) -> &'a EventId {
        match self {
            Self::Standalone => round_id,
            Self::InTour { tour_id, .. } => tour_id,
            Self::InTournament { tournament_id, .. } => tournament_id,
        }
    }
}

/// An owned copy of a resolved entity and the place to write it back to.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T, H> {
    pub value: T,
    pub home: H,
}

/// Any event resolved by id, wherever it lives.
#[derive(Debug, Clone, PartialEq)]
pub enum Located {
    Tournament(Resolved<Tournament, TournamentHome>),
    Tour(Tour),
    Round(Resolved<Round, RoundHome>),
}

impl Located {
    /// The kind of the resolved event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Tournament(_) => EventKind::Tournament,
            Self::Tour(_) => EventKind::Tour,
            Self::Round(_) => EventKind::Round,
        }
    }

    /// The resolved event's id.
    #[must_use]
    pub const fn id(&self) -> &EventId {
        match self {
            Self::Tournament(resolved) => &resolved.value.id,
            Self::Tour(tour) => &tour.id,
            Self::Round(resolved) => &resolved.value.id,
        }
    }

    /// The resolved event's players and invitations.
    #[must_use]
    pub fn roster(&self) -> &dyn Roster {
        match self {
            Self::Tournament(resolved) => &resolved.value,
            Self::Tour(tour) => tour,
            Self::Round(resolved) => &resolved.value,
        }
    }

    /// Mutable access to the resolved event's players and invitations.
    pub fn roster_mut(&mut self) -> &mut dyn Roster {
        match self {
            Self::Tournament(resolved) => &mut resolved.value,
            Self::Tour(tour) => tour,
            Self::Round(resolved) => &mut resolved.value,
        }
    }

    /// Mutable team access; rounds have no teams.
    pub fn team_roster_mut(&mut self) -> Option<&mut dyn TeamRoster> {
        match self {
            Self::Tournament(resolved) => Some(&mut resolved.value),
            Self::Tour(tour) => Some(tour),
            Self::Round(_) => None,
        }
    }

    /// Mutable access to the resolved event's highlights.
    pub const fn highlights_mut(&mut self) -> &mut Vec<Highlight> {
        match self {
            Self::Tournament(resolved) => &mut resolved.value.highlights,
            Self::Tour(tour) => &mut tour.highlights,
            Self::Round(resolved) => &mut resolved.value.highlights,
        }
    }
}

/// Top-level events that a transition added or modified, and those it
/// removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Changes {
    pub changed: Vec<Event>,
    pub removed: Vec<EventId>,
}

/// The event collection with containment indices and change tracking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventStore {
    events: BTreeMap<EventId, Event>,
    tournament_homes: HashMap<EventId, TournamentHome>,
    round_homes: HashMap<EventId, RoundHome>,
    touched: BTreeSet<EventId>,
    removed: BTreeSet<EventId>,
}

impl EventStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Two top-level events share an id
    /// - A tournament or round id appears in more than one place
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Result<Self, CoreError> {
        let mut store: Self = Self::default();
        for event in events {
            let id: EventId = event.id().clone();
            if store.events.insert(id.clone(), event).is_some() {
                return Err(CoreError::DuplicateId(id));
            }
        }
        store.reindex()?;
        Ok(store)
    }

    /// Number of top-level events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns whether the store holds no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Top-level events in id order.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    /// Consumes the store, returning its top-level events in id order.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events.into_values().collect()
    }

    /// Looks up a top-level event.
    #[must_use]
    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.get(id)
    }

    /// Returns whether `id` is used by any event, nested or not.
    #[must_use]
    pub fn contains_id(&self, id: &EventId) -> bool {
        self.events.contains_key(id)
            || self.tournament_homes.contains_key(id)
            || self.round_homes.contains_key(id)
    }

    /// Where a tournament lives.
    #[must_use]
    pub fn tournament_home(&self, id: &EventId) -> Option<&TournamentHome> {
        self.tournament_homes.get(id)
    }

    /// Where a round lives.
    #[must_use]
    pub fn round_home(&self, id: &EventId) -> Option<&RoundHome> {
        self.round_homes.get(id)
    }

    /// Borrows a tournament wherever it lives.
    #[must_use]
    pub fn tournament(&self, id: &EventId) -> Option<&Tournament> {
        match self.tournament_homes.get(id)? {
            TournamentHome::Standalone => match self.events.get(id)? {
                Event::Tournament(tournament) => Some(tournament),
                _ => None,
            },
            TournamentHome::InTour { tour_id, index } => {
                self.tour(tour_id)?.tournaments.get(*index)
            }
        }
    }

    /// Borrows a tour. Tours only exist at the top level.
    #[must_use]
    pub fn tour(&self, id: &EventId) -> Option<&Tour> {
        match self.events.get(id)? {
            Event::Tour(tour) => Some(tour),
            _ => None,
        }
    }

    /// Borrows a round wherever it lives.
    #[must_use]
    pub fn round(&self, id: &EventId) -> Option<&Round> {
        match self.round_homes.get(id)? {
            RoundHome::Standalone => match self.events.get(id)? {
                Event::Round(round) => Some(round),
                _ => None,
            },
            RoundHome::InTour { tour_id, index } => self.tour(tour_id)?.rounds.get(*index),
            RoundHome::InTournament {
                tournament_id,
                index,
            } => self.tournament(tournament_id)?.rounds.get(*index),
        }
    }

    /// Resolves a tournament for modification.
    #[must_use]
    pub fn resolve_tournament(&self, id: &EventId) -> Option<Resolved<Tournament, TournamentHome>> {
        let home: TournamentHome = self.tournament_homes.get(id)?.clone();
        let value: Tournament = self.tournament(id)?.clone();
        Some(Resolved { value, home })
    }

    /// Resolves a round for modification.
    #[must_use]
    pub fn resolve_round(&self, id: &EventId) -> Option<Resolved<Round, RoundHome>> {
        let home: RoundHome = self.round_homes.get(id)?.clone();
        let value: Round = self.round(id)?.clone();
        Some(Resolved { value, home })
    }

    /// Resolves any event by id: tournaments first, then tours, then rounds.
    #[must_use]
    pub fn resolve(&self, id: &EventId) -> Option<Located> {
        if let Some(resolved) = self.resolve_tournament(id) {
            return Some(Located::Tournament(resolved));
        }
        if let Some(tour) = self.tour(id) {
            return Some(Located::Tour(tour.clone()));
        }
        self.resolve_round(id).map(Located::Round)
    }

    /// Writes a modified tournament back into its home.
    ///
    /// Returns `false` if the home no longer holds the tournament.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ContainmentViolation` if the modified tournament
    /// introduced an id that already exists elsewhere.
    pub fn write_back_tournament(
        &mut self,
        resolved: Resolved<Tournament, TournamentHome>,
    ) -> Result<bool, CoreError> {
        let Resolved { value, home } = resolved;
        let id: EventId = value.id.clone();
        let container: EventId = home.container(&id).clone();
        let replaced: bool = match (&home, self.events.get_mut(&container)) {
            (TournamentHome::Standalone, Some(Event::Tournament(slot))) => {
                *slot = value;
                true
            }
            (TournamentHome::InTour { .. }, Some(Event::Tour(tour))) => {
                tour.replace_tournament(&id, value)
            }
            _ => false,
        };
        self.finish_write(container, replaced)
    }

    /// Writes a modified round back into its home.
    ///
    /// Returns `false` if the home no longer holds the round.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ContainmentViolation` if the modified round
    /// introduced an id that already exists elsewhere.
    pub fn write_back_round(
        &mut self,
        resolved: Resolved<Round, RoundHome>,
    ) -> Result<bool, CoreError> {
        let Resolved { value, home } = resolved;
        let id: EventId = value.id.clone();
        match home {
            RoundHome::Standalone => {
                let replaced: bool = match self.events.get_mut(&id) {
                    Some(Event::Round(slot)) => {
                        *slot = value;
                        true
                    }
                    _ => false,
                };
                self.finish_write(id, replaced)
            }
            RoundHome::InTour { tour_id, .. } => {
                let replaced: bool = match self.events.get_mut(&tour_id) {
                    Some(Event::Tour(tour)) => tour.replace_round(&id, value),
                    _ => false,
                };
                self.finish_write(tour_id, replaced)
            }
            RoundHome::InTournament { tournament_id, .. } => {
                let Some(mut owner) = self.resolve_tournament(&tournament_id) else {
                    return Ok(false);
                };
                if !owner.value.replace_round(&id, value) {
                    return Ok(false);
                }
                self.write_back_tournament(owner)
            }
        }
    }

    /// Writes any resolved event back.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ContainmentViolation` if the modified event
    /// introduced an id that already exists elsewhere.
    pub fn write_back(&mut self, located: Located) -> Result<bool, CoreError> {
        match located {
            Located::Tournament(resolved) => self.write_back_tournament(resolved),
            Located::Tour(tour) => self.replace(Event::Tour(tour)),
            Located::Round(resolved) => self.write_back_round(resolved),
        }
    }

    /// Adds a new top-level event.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The id is already used anywhere in the store
    /// - A nested id inside the event collides with an existing one
    pub fn insert(&mut self, event: Event) -> Result<(), CoreError> {
        let id: EventId = event.id().clone();
        if self.contains_id(&id) {
            return Err(CoreError::DuplicateId(id));
        }
        self.events.insert(id.clone(), event);
        if let Err(err) = self.reindex() {
            self.events.remove(&id);
            self.reindex()?;
            return Err(err);
        }
        self.removed.remove(&id);
        self.touched.insert(id);
        Ok(())
    }

    /// Replaces an existing top-level event with the same id and kind.
    ///
    /// Returns `false` if no such event exists.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ContainmentViolation` if the replacement
    /// introduced an id that already exists elsewhere.
    pub fn replace(&mut self, event: Event) -> Result<bool, CoreError> {
        let id: EventId = event.id().clone();
        let replaced: bool = match self.events.get_mut(&id) {
            Some(slot) if slot.kind() == event.kind() => {
                *slot = event;
                true
            }
            _ => false,
        };
        self.finish_write(id, replaced)
    }

    /// Removes an event wherever it lives, together with everything it owns.
    ///
    /// Returns `false` if no event has this id.
    ///
    /// # Errors
    ///
    /// Returns an error only if the remaining collection fails to reindex.
    pub fn remove(&mut self, id: &EventId) -> Result<bool, CoreError> {
        if self.events.remove(id).is_some() {
            self.touched.remove(id);
            self.removed.insert(id.clone());
            self.reindex()?;
            return Ok(true);
        }

        if let Some(TournamentHome::InTour { tour_id, .. }) = self.tournament_homes.get(id).cloned()
        {
            let removed: bool = match self.events.get_mut(&tour_id) {
                Some(Event::Tour(tour)) => {
                    let before: usize = tour.tournaments.len();
                    tour.tournaments.retain(|t| &t.id != id);
                    tour.tournaments.len() != before
                }
                _ => false,
            };
            return self.finish_write(tour_id, removed);
        }

        match self.round_homes.get(id).cloned() {
            Some(RoundHome::InTour { tour_id, .. }) => {
                let removed: bool = match self.events.get_mut(&tour_id) {
                    Some(Event::Tour(tour)) => {
                        let before: usize = tour.rounds.len();
                        tour.rounds.retain(|r| &r.id != id);
                        tour.rounds.len() != before
                    }
                    _ => false,
                };
                self.finish_write(tour_id, removed)
            }
            Some(RoundHome::InTournament { tournament_id, .. }) => {
                let Some(mut owner) = self.resolve_tournament(&tournament_id) else {
                    return Ok(false);
                };
                let before: usize = owner.value.rounds.len();
                owner.value.rounds.retain(|r| &r.id != id);
                if owner.value.rounds.len() == before {
                    return Ok(false);
                }
                self.write_back_tournament(owner)
            }
            _ => Ok(false),
        }
    }

    /// Ids of top-level events modified since the last reset.
    #[must_use]
    pub const fn touched(&self) -> &BTreeSet<EventId> {
        &self.touched
    }

    /// Forgets all recorded changes.
    pub fn clear_changes(&mut self) {
        self.touched.clear();
        self.removed.clear();
    }

    /// Returns and forgets the recorded changes.
    pub fn take_changes(&mut self) -> Changes {
        let touched: BTreeSet<EventId> = std::mem::take(&mut self.touched);
        let removed: BTreeSet<EventId> = std::mem::take(&mut self.removed);
        Changes {
            changed: touched
                .iter()
                .filter_map(|id| self.events.get(id).cloned())
                .collect(),
            removed: removed.into_iter().collect(),
        }
    }

    /// Mutable iteration over top-level events for in-place updates that do
    /// not change any ids. Callers must report what they modified through
    /// [`Self::mark_touched`].
    pub(crate) fn events_mut(&mut self) -> impl Iterator<Item = (&EventId, &mut Event)> {
        self.events.iter_mut()
    }

    pub(crate) fn mark_touched(&mut self, id: EventId) {
        self.touched.insert(id);
    }

    fn finish_write(&mut self, container: EventId, written: bool) -> Result<bool, CoreError> {
        if written {
            self.touched.insert(container);
            self.reindex()?;
        }
        Ok(written)
    }

    /// Rebuilds the containment indices, enforcing that every id has
    /// exactly one home.
    fn reindex(&mut self) -> Result<(), CoreError> {
        let mut tournament_homes: HashMap<EventId, TournamentHome> = HashMap::new();
        let mut round_homes: HashMap<EventId, RoundHome> = HashMap::new();
        let mut seen: HashSet<&EventId> = self.events.keys().collect();

        for (id, event) in &self.events {
            match event {
                Event::Tournament(tournament) => {
                    tournament_homes.insert(id.clone(), TournamentHome::Standalone);
                    index_rounds(&mut round_homes, &mut seen, &tournament.rounds, |index| {
                        RoundHome::InTournament {
                            tournament_id: id.clone(),
                            index,
                        }
                    })?;
                }
                Event::Tour(tour) => {
                    for (index, tournament) in tour.tournaments.iter().enumerate() {
                        claim(&mut seen, &tournament.id)?;
                        tournament_homes.insert(
                            tournament.id.clone(),
                            TournamentHome::InTour {
                                tour_id: id.clone(),
                                index,
                            },
                        );
                        index_rounds(&mut round_homes, &mut seen, &tournament.rounds, |i| {
                            RoundHome::InTournament {
                                tournament_id: tournament.id.clone(),
                                index: i,
                            }
                        })?;
                    }
                    index_rounds(&mut round_homes, &mut seen, &tour.rounds, |index| {
                        RoundHome::InTour {
                            tour_id: id.clone(),
                            index,
                        }
                    })?;
                }
                Event::Round(_) => {
                    round_homes.insert(id.clone(), RoundHome::Standalone);
                }
            }
        }

        self.tournament_homes = tournament_homes;
        self.round_homes = round_homes;
        Ok(())
    }
}

fn claim<'a>(seen: &mut HashSet<&'a EventId>, id: &'a EventId) -> Result<(), CoreError> {
    if !seen.insert(id) {
        return Err(CoreError::ContainmentViolation(id.clone()));
    }
    Ok(())
}

fn index_rounds<'a>(
    homes: &mut HashMap<EventId, RoundHome>,
    seen: &mut HashSet<&'a EventId>,
    rounds: &'a [Round],
    home: impl Fn(usize) -> RoundHome,
) -> Result<(), CoreError> {
    for (index, round) in rounds.iter().enumerate() {
        claim(seen, &round.id)?;
        homes.insert(round.id.clone(), home(index));
    }
    Ok(())
}
