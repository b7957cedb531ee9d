// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, DetailsPatch, RoundDetails, TourDetails, TournamentDetails};
use crate::error::CoreError;
use crate::membership;
use crate::scoring::{self, ScoreUpdate};
use crate::status::{refresh_round, refresh_statuses, refresh_tour, refresh_tournament};
use crate::store::{EventStore, Located};
use crate::teams;
use crate::transition::{ApplyContext, Outcome, Transition};
use fairway_domain::{
    Event, EventId, EventKind, Player, Round, Tour, Tournament, derive_status, validate_course,
    validate_date_range, validate_name,
};
use fairway_notify::{CompletionNotice, Notice};
use time::Date;

/// Applies a command to the store, producing a new store and the changes
/// to persist.
///
/// The input store is never modified. On error nothing is produced.
///
/// # Arguments
///
/// * `store` - The current event collection (immutable)
/// * `command` - The command to apply
/// * `ctx` - The clock the transition runs against
///
/// # Errors
///
/// Returns an error if:
/// - The command violates a domain rule
/// - A new id collides with an existing one
/// - A child is attached to an event that cannot hold it
#[allow(clippy::too_many_lines)]
pub fn apply(
    store: &EventStore,
    command: Command,
    ctx: &ApplyContext,
) -> Result<Transition, CoreError> {
    let mut next: EventStore = store.clone();
    next.clear_changes();
    let mut notices: Vec<Notice> = Vec::new();

    let outcome: Outcome = match command {
        Command::CreateTournament {
            id,
            creator,
            details,
            tour_id,
        } => create_tournament(&mut next, id, &creator, details, tour_id, ctx.today)?,
        Command::CreateTour {
            id,
            creator,
            details,
        } => create_tour(&mut next, id, &creator, details, ctx.today)?,
        Command::CreateRound {
            id,
            parent,
            creator,
            details,
        } => create_round(&mut next, id, parent, creator.as_ref(), details, ctx.today)?,
        Command::UpdateDetails { event_id, patch } => {
            let mut completed: Vec<CompletionNotice> = Vec::new();
            let outcome: Outcome =
                update_details(&mut next, &event_id, patch, ctx.today, &mut completed)?;
            notices.extend(completed.into_iter().map(Notice::Completed));
            outcome
        }
        Command::DeleteEvent { event_id } => found(next.remove(&event_id)?),
        Command::Invite { event_id, emails } => {
            match membership::invite(&mut next, &event_id, &emails)? {
                Some(_) => Outcome::Applied,
                None => Outcome::NotFound,
            }
        }
        Command::Accept { event_id, player } => {
            validate_name("Player", &player.name)?;
            found(membership::accept(&mut next, &event_id, &player)?)
        }
        Command::Decline { event_id, email } => {
            found(membership::decline(&mut next, &event_id, &email)?)
        }
        Command::RemovePlayer {
            event_id,
            player_id,
        } => found(membership::remove_player(&mut next, &event_id, &player_id)?),
        Command::CreateTeam { event_id, team } => teams::create_team(&mut next, &event_id, team)?,
        Command::DeleteTeam { event_id, team_id } => {
            teams::delete_team(&mut next, &event_id, &team_id)?
        }
        Command::AssignTeam {
            event_id,
            player_id,
            team_id,
        } => teams::assign_team(&mut next, &event_id, &player_id, team_id.as_ref())?,
        Command::SetCaptain {
            event_id,
            team_id,
            captain,
        } => teams::set_captain(&mut next, &event_id, &team_id, captain.as_ref())?,
        Command::RecordHoleScore {
            round_id,
            player_id,
            entry,
        } => match scoring::record_hole_score(&mut next, &round_id, &player_id, &entry, ctx.now)? {
            ScoreUpdate::NotFound => Outcome::NotFound,
            ScoreUpdate::Recorded(shout_out) => {
                notices.extend(shout_out.map(Notice::ShoutOut));
                Outcome::Applied
            }
        },
        Command::RecordMatchResult {
            round_id,
            player_id,
            result,
        } => found(scoring::record_match_result(
            &mut next, &round_id, &player_id, result,
        )?),
        Command::SetPlayerGroups { round_id, groups } => {
            found(scoring::set_player_groups(&mut next, &round_id, groups)?)
        }
        Command::AddHighlight {
            event_id,
            highlight,
        } => match next.resolve(&event_id) {
            Some(mut located) => {
                located.highlights_mut().push(highlight);
                next.write_back(located)?;
                Outcome::Applied
            }
            None => Outcome::NotFound,
        },
    };

    Ok(Transition::finish(next, notices, outcome))
}

/// Recomputes every event's status against `today` as one transition.
///
/// The returned transition carries a `Completed` notice for every tournament
/// or tour that moved into `completed`.
#[must_use]
pub fn refresh_all_statuses(store: &EventStore, today: Date) -> Transition {
    let mut next: EventStore = store.clone();
    next.clear_changes();
    let notices: Vec<Notice> = refresh_statuses(&mut next, today)
        .into_iter()
        .map(Notice::Completed)
        .collect();
    Transition::finish(next, notices, Outcome::Applied)
}

const fn found(applied: bool) -> Outcome {
    if applied {
        Outcome::Applied
    } else {
        Outcome::NotFound
    }
}

fn founding_member(creator: &Player) -> Result<Player, CoreError> {
    validate_name("Player", &creator.name)?;
    let mut member: Player = creator.clone();
    member.team_id = None;
    Ok(member)
}

fn create_tournament(
    store: &mut EventStore,
    id: EventId,
    creator: &Player,
    details: TournamentDetails,
    tour_id: Option<EventId>,
    today: Date,
) -> Result<Outcome, CoreError> {
    validate_name("Tournament", &details.name)?;
    validate_date_range(details.start_date, details.end_date)?;
    let member: Player = founding_member(creator)?;
    if store.contains_id(&id) {
        return Err(CoreError::DuplicateId(id));
    }

    let tournament: Tournament = Tournament {
        id,
        name: details.name.trim().to_string(),
        format: details.format,
        start_date: details.start_date,
        end_date: details.end_date,
        location: details.location,
        players: vec![member],
        teams: Vec::new(),
        rounds: Vec::new(),
        invitations: Vec::new(),
        is_team_event: details.is_team_event,
        scoring_type: details.scoring_type,
        status: derive_status(details.start_date, details.end_date, today),
        shout_outs: Vec::new(),
        highlights: Vec::new(),
    };

    match tour_id {
        None => store.insert(Event::Tournament(tournament))?,
        Some(tour_id) => {
            let Some(mut tour) = store.tour(&tour_id).cloned() else {
                return missing_parent(store, tour_id);
            };
            tour.tournaments.push(tournament);
            store.replace(Event::Tour(tour))?;
        }
    }
    Ok(Outcome::Applied)
}

fn create_tour(
    store: &mut EventStore,
    id: EventId,
    creator: &Player,
    details: TourDetails,
    today: Date,
) -> Result<Outcome, CoreError> {
    validate_name("Tour", &details.name)?;
    validate_date_range(details.start_date, details.end_date)?;
    let member: Player = founding_member(creator)?;
    if store.contains_id(&id) {
        return Err(CoreError::DuplicateId(id));
    }

    let tour: Tour = Tour {
        id,
        name: details.name.trim().to_string(),
        start_date: details.start_date,
        end_date: details.end_date,
        tournaments: Vec::new(),
        rounds: Vec::new(),
        players: vec![member],
        teams: Vec::new(),
        invitations: Vec::new(),
        points_system: details.points_system,
        status: derive_status(details.start_date, details.end_date, today),
        shout_outs: Vec::new(),
        highlights: Vec::new(),
    };
    store.insert(Event::Tour(tour))?;
    Ok(Outcome::Applied)
}

/// Rounds inside a tournament or tour get a scorecard for every player of
/// the parent; a standalone round enrols its creator.
fn create_round(
    store: &mut EventStore,
    id: EventId,
    parent: Option<EventId>,
    creator: Option<&Player>,
    details: RoundDetails,
    today: Date,
) -> Result<Outcome, CoreError> {
    validate_name("Round", &details.name)?;
    if let Some(course) = &details.course_details {
        validate_course(course)?;
    }
    if store.contains_id(&id) {
        return Err(CoreError::DuplicateId(id));
    }

    let mut round: Round = Round::new(id, &details.name, details.date, &details.format);
    round.course_details = details.course_details;
    round.status = derive_status(details.date, details.date, today);

    let Some(parent) = parent else {
        if let Some(creator) = creator {
            let member: Player = founding_member(creator)?;
            round.ensure_scorecard(&member.id);
            round.players.push(member);
        }
        store.insert(Event::Round(round))?;
        return Ok(Outcome::Applied);
    };

    match store.resolve(&parent) {
        None => Ok(Outcome::NotFound),
        Some(Located::Tournament(mut resolved)) => {
            for player in &resolved.value.players {
                round.ensure_scorecard(&player.id);
            }
            resolved.value.rounds.push(round);
            store.write_back_tournament(resolved)?;
            Ok(Outcome::Applied)
        }
        Some(Located::Tour(mut tour)) => {
            for player in &tour.players {
                round.ensure_scorecard(&player.id);
            }
            tour.rounds.push(round);
            store.replace(Event::Tour(tour))?;
            Ok(Outcome::Applied)
        }
        Some(Located::Round(_)) => Err(CoreError::InvalidParent {
            parent,
            kind: EventKind::Round,
        }),
    }
}

fn missing_parent(store: &EventStore, parent: EventId) -> Result<Outcome, CoreError> {
    match store.resolve(&parent) {
        Some(located) => Err(CoreError::InvalidParent {
            kind: located.kind(),
            parent,
        }),
        None => Ok(Outcome::NotFound),
    }
}

/// Applies a details patch and re-derives status from the new dates.
fn update_details(
    store: &mut EventStore,
    event_id: &EventId,
    patch: DetailsPatch,
    today: Date,
    completed: &mut Vec<CompletionNotice>,
) -> Result<Outcome, CoreError> {
    let Some(mut located) = store.resolve(event_id) else {
        return Ok(Outcome::NotFound);
    };
    let before: Located = located.clone();

    match &mut located {
        Located::Tournament(resolved) => {
            let tournament: &mut Tournament = &mut resolved.value;
            patch_text(&mut tournament.name, patch.name, "Tournament")?;
            patch_text(&mut tournament.format, patch.format, "Format")?;
            if let Some(location) = patch.location {
                tournament.location = location;
            }
            tournament.start_date = patch.start_date.unwrap_or(tournament.start_date);
            tournament.end_date = patch.end_date.unwrap_or(tournament.end_date);
            validate_date_range(tournament.start_date, tournament.end_date)?;
            if let Some(is_team_event) = patch.is_team_event {
                tournament.is_team_event = is_team_event;
            }
            if let Some(scoring_type) = patch.scoring_type {
                tournament.scoring_type = scoring_type;
            }
            refresh_tournament(tournament, today, completed);
        }
        Located::Tour(tour) => {
            patch_text(&mut tour.name, patch.name, "Tour")?;
            tour.start_date = patch.start_date.unwrap_or(tour.start_date);
            tour.end_date = patch.end_date.unwrap_or(tour.end_date);
            validate_date_range(tour.start_date, tour.end_date)?;
            if let Some(points_system) = patch.points_system {
                tour.points_system = points_system;
            }
            refresh_tour(tour, today, completed);
        }
        Located::Round(resolved) => {
            let round: &mut Round = &mut resolved.value;
            patch_text(&mut round.name, patch.name, "Round")?;
            patch_text(&mut round.format, patch.format, "Format")?;
            round.date = patch.date.unwrap_or(round.date);
            if let Some(course) = patch.course_details {
                validate_course(&course)?;
                round.course_details = Some(course);
            }
            refresh_round(round, today);
        }
    }

    if located == before {
        return Ok(Outcome::Unchanged);
    }
    store.write_back(located)?;
    Ok(Outcome::Applied)
}

fn patch_text(field: &mut String, value: Option<String>, what: &str) -> Result<(), CoreError> {
    if let Some(value) = value {
        validate_name(what, &value)?;
        *field = value.trim().to_string();
    }
    Ok(())
}
