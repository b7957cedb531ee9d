// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Invitation and membership transitions.
//!
//! Per event and email the states are uninvited, invited, then accepted or
//! declined. Nothing moves back to invited: once accepted, the email is a
//! player and further invitations are filtered out; once declined, a new
//! invitation starts the cycle again.
//!
//! Each function resolves its target, mutates an owned copy and writes it
//! back once. A target that cannot be found, or an email that is not in the
//! expected state, is a silent no-op.

use crate::error::CoreError;
use crate::store::{EventStore, Located};
use fairway_domain::{Email, EventId, Player, PlayerId, Roster, Round, Team, Tour, Tournament};

/// Invites `emails` to an event.
///
/// Emails that already belong to a player, that are already invited, or
/// that repeat earlier in `emails` are skipped. Inviting to a tour also
/// invites the emails to each nested tournament where they are neither a
/// player nor already invited, whether or not they play on the tour.
///
/// Returns the emails newly invited at the requested level, or `None` if
/// the event does not exist.
///
/// # Errors
///
/// Returns an error only if the write-back fails.
pub fn invite(
    store: &mut EventStore,
    event_id: &EventId,
    emails: &[Email],
) -> Result<Option<Vec<Email>>, CoreError> {
    let Some(mut located) = store.resolve(event_id) else {
        return Ok(None);
    };

    let (added, cascaded): (Vec<Email>, bool) = match &mut located {
        Located::Tour(tour) => {
            let added: Vec<Email> = invite_into(&mut *tour, emails);
            let mut cascaded: bool = false;
            for tournament in &mut tour.tournaments {
                cascaded |= !invite_into(&mut *tournament, emails).is_empty();
            }
            (added, cascaded)
        }
        other => (invite_into(other.roster_mut(), emails), false),
    };

    if !added.is_empty() || cascaded {
        store.write_back(located)?;
    }
    Ok(Some(added))
}

/// Accepts a pending invitation on behalf of `player`.
///
/// The player's email must be invited to the event. The email leaves
/// `invitations`, the player joins `players` (without a team) unless their
/// id is already enrolled, and every round under the event gets a blank
/// scorecard for them. For a tour that covers the tour's own rounds and
/// every nested tournament's rounds, and any nested tournament invitation
/// for the same email is accepted too.
///
/// Returns `false` when the event does not exist or the email is not
/// invited, which makes repeating an accept harmless.
///
/// # Errors
///
/// Returns an error only if the write-back fails.
pub fn accept(
    store: &mut EventStore,
    event_id: &EventId,
    player: &Player,
) -> Result<bool, CoreError> {
    let Some(mut located) = store.resolve(event_id) else {
        return Ok(false);
    };
    if !located.roster().is_invited(&player.email) {
        return Ok(false);
    }

    let mut joining: Player = player.clone();
    joining.team_id = None;

    match &mut located {
        Located::Tournament(resolved) => {
            enrol(&mut resolved.value, &joining);
            backfill(&mut resolved.value.rounds, &joining.id);
        }
        Located::Tour(tour) => {
            enrol(&mut *tour, &joining);
            backfill(&mut tour.rounds, &joining.id);
            for tournament in &mut tour.tournaments {
                if tournament.is_invited(&joining.email) {
                    enrol(&mut *tournament, &joining);
                }
                backfill(&mut tournament.rounds, &joining.id);
            }
        }
        Located::Round(resolved) => {
            enrol(&mut resolved.value, &joining);
            resolved.value.ensure_scorecard(&joining.id);
        }
    }

    store.write_back(located)
}

/// Declines a pending invitation. Only the invitation is removed; nested
/// tournament invitations created by a tour cascade stay in place.
///
/// Returns `false` when the event does not exist or the email is not
/// invited.
///
/// # Errors
///
/// Returns an error only if the write-back fails.
pub fn decline(
    store: &mut EventStore,
    event_id: &EventId,
    email: &Email,
) -> Result<bool, CoreError> {
    let Some(mut located) = store.resolve(event_id) else {
        return Ok(false);
    };
    let invitations: &mut Vec<Email> = located.roster_mut().invitations_mut();
    let before: usize = invitations.len();
    invitations.retain(|invited| invited != email);
    if invitations.len() == before {
        return Ok(false);
    }
    store.write_back(located)
}

/// Removes a player from an event and everything it owns.
///
/// The player leaves `players`, loses any captaincy, and is dropped from
/// every round's scores, match results and groups. For a tour this cascades
/// into nested tournaments.
///
/// Returns `false` when the event does not exist or the player had no
/// presence in it.
///
/// # Errors
///
/// Returns an error only if the write-back fails.
pub fn remove_player(
    store: &mut EventStore,
    event_id: &EventId,
    player_id: &PlayerId,
) -> Result<bool, CoreError> {
    let Some(mut located) = store.resolve(event_id) else {
        return Ok(false);
    };

    let removed: bool = match &mut located {
        Located::Tournament(resolved) => remove_from_tournament(&mut resolved.value, player_id),
        Located::Tour(tour) => remove_from_tour(tour, player_id),
        Located::Round(resolved) => resolved.value.forget_player(player_id),
    };

    if !removed {
        return Ok(false);
    }
    store.write_back(located)
}

/// Adds each email that is neither a player nor already invited.
pub(crate) fn invite_into(roster: &mut dyn Roster, emails: &[Email]) -> Vec<Email> {
    let mut added: Vec<Email> = Vec::new();
    for email in emails {
        if roster.has_player_email(email) || roster.is_invited(email) {
            continue;
        }
        roster.invitations_mut().push(email.clone());
        added.push(email.clone());
    }
    added
}

fn enrol(roster: &mut dyn Roster, player: &Player) {
    roster.invitations_mut().retain(|email| email != &player.email);
    if !roster.has_player(&player.id) {
        roster.players_mut().push(player.clone());
    }
}

/// Gives `player_id` a blank scorecard in every round that lacks one.
pub(crate) fn backfill(rounds: &mut [Round], player_id: &PlayerId) {
    for round in rounds {
        round.ensure_scorecard(player_id);
    }
}

fn drop_member(roster: &mut dyn Roster, player_id: &PlayerId) -> bool {
    let players: &mut Vec<Player> = roster.players_mut();
    let before: usize = players.len();
    players.retain(|p| &p.id != player_id);
    players.len() != before
}

fn clear_captaincy(teams: &mut [Team], player_id: &PlayerId) -> bool {
    let mut cleared: bool = false;
    for team in teams {
        if team.captain.as_ref() == Some(player_id) {
            team.captain = None;
            cleared = true;
        }
    }
    cleared
}

fn remove_from_tournament(tournament: &mut Tournament, player_id: &PlayerId) -> bool {
    let mut removed: bool = drop_member(&mut *tournament, player_id);
    removed |= clear_captaincy(&mut tournament.teams, player_id);
    for round in &mut tournament.rounds {
        removed |= round.forget_player(player_id);
    }
    removed
}

fn remove_from_tour(tour: &mut Tour, player_id: &PlayerId) -> bool {
    let mut removed: bool = drop_member(&mut *tour, player_id);
    removed |= clear_captaincy(&mut tour.teams, player_id);
    for tournament in &mut tour.tournaments {
        removed |= remove_from_tournament(tournament, player_id);
    }
    for round in &mut tour.rounds {
        removed |= round.forget_player(player_id);
    }
    removed
}
