// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::EventStore;
use fairway_domain::{
    Event, EventId, EventKind, EventStatus, Round, Tour, Tournament, derive_status,
};
use fairway_notify::CompletionNotice;
use time::Date;

/// Recomputes the status of every tournament, tour and round in the store.
///
/// Nested tournaments and rounds are refreshed along with their owners. A
/// tournament or tour moving into `completed` yields a [`CompletionNotice`];
/// rounds never do. Top-level events whose tree changed are marked touched.
/// Running this twice with the same `today` changes nothing the second time.
pub fn refresh_statuses(store: &mut EventStore, today: Date) -> Vec<CompletionNotice> {
    let mut notices: Vec<CompletionNotice> = Vec::new();
    let mut changed: Vec<EventId> = Vec::new();

    for (id, event) in store.events_mut() {
        let touched: bool = match event {
            Event::Tournament(tournament) => refresh_tournament(tournament, today, &mut notices),
            Event::Tour(tour) => refresh_tour(tour, today, &mut notices),
            Event::Round(round) => refresh_round(round, today),
        };
        if touched {
            changed.push(id.clone());
        }
    }

    for id in changed {
        store.mark_touched(id);
    }
    notices
}

/// Sets a tournament's status from its dates, plus its rounds'.
///
/// Returns `true` if anything changed.
pub(crate) fn refresh_tournament(
    tournament: &mut Tournament,
    today: Date,
    notices: &mut Vec<CompletionNotice>,
) -> bool {
    let next: EventStatus = derive_status(tournament.start_date, tournament.end_date, today);
    let mut changed: bool = transition(
        &mut tournament.status,
        next,
        || CompletionNotice {
            event_id: tournament.id.clone(),
            kind: EventKind::Tournament,
            event_name: tournament.name.clone(),
            completed_on: today,
        },
        notices,
    );
    for round in &mut tournament.rounds {
        changed |= refresh_round(round, today);
    }
    changed
}

/// Sets a tour's status, then its tournaments' and rounds'.
pub(crate) fn refresh_tour(
    tour: &mut Tour,
    today: Date,
    notices: &mut Vec<CompletionNotice>,
) -> bool {
    let next: EventStatus = derive_status(tour.start_date, tour.end_date, today);
    let mut changed: bool = transition(
        &mut tour.status,
        next,
        || CompletionNotice {
            event_id: tour.id.clone(),
            kind: EventKind::Tour,
            event_name: tour.name.clone(),
            completed_on: today,
        },
        notices,
    );
    for tournament in &mut tour.tournaments {
        changed |= refresh_tournament(tournament, today, notices);
    }
    for round in &mut tour.rounds {
        changed |= refresh_round(round, today);
    }
    changed
}

/// A round is active on its own date only.
pub(crate) fn refresh_round(round: &mut Round, today: Date) -> bool {
    let next: EventStatus = derive_status(round.date, round.date, today);
    if round.status == next {
        return false;
    }
    round.status = next;
    true
}

fn transition(
    status: &mut EventStatus,
    next: EventStatus,
    notice: impl FnOnce() -> CompletionNotice,
    notices: &mut Vec<CompletionNotice>,
) -> bool {
    if *status == next {
        return false;
    }
    if status.completes_into(next) {
        notices.push(notice());
    }
    *status = next;
    true
}
