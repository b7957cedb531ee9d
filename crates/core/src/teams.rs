// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team management on tournaments and tours.

use crate::error::CoreError;
use crate::store::{EventStore, Located};
use crate::transition::Outcome;
use fairway_domain::{
    DomainError, EventId, EventKind, Player, PlayerId, Roster, Team, TeamId, TeamRoster,
    validate_captain, validate_name, validate_team_name_unique,
};

/// Adds a team.
///
/// # Errors
///
/// Returns an error if:
/// - The event is a round
/// - The name is blank or already used by another team
/// - The team id is already used
/// - A captain is given who is not on the team
pub fn create_team(
    store: &mut EventStore,
    event_id: &EventId,
    team: Team,
) -> Result<Outcome, CoreError> {
    let Some(mut located) = store.resolve(event_id) else {
        return Ok(Outcome::NotFound);
    };
    let roster: &mut dyn TeamRoster = team_roster(&mut located, event_id)?;

    validate_name("Team", &team.name)?;
    validate_team_name_unique(&team.name, roster.teams())?;
    if roster.teams().iter().any(|t| t.id == team.id) {
        return Err(DomainError::DuplicateTeamName(team.id.to_string()).into());
    }

    let captain: Option<PlayerId> = team.captain.clone();
    let team_id: TeamId = team.id.clone();
    roster.teams_mut().push(team);
    if let Some(captain) = captain {
        validate_captain(&team_id, &captain, roster.teams(), roster.players())?;
    }

    store.write_back(located)?;
    Ok(Outcome::Applied)
}

/// Deletes a team. Its players stay enrolled without a team.
///
/// # Errors
///
/// Returns an error if the event is a round or the write-back fails.
pub fn delete_team(
    store: &mut EventStore,
    event_id: &EventId,
    team_id: &TeamId,
) -> Result<Outcome, CoreError> {
    let Some(mut located) = store.resolve(event_id) else {
        return Ok(Outcome::NotFound);
    };
    let roster: &mut dyn TeamRoster = team_roster(&mut located, event_id)?;

    let teams: &mut Vec<Team> = roster.teams_mut();
    let before: usize = teams.len();
    teams.retain(|t| &t.id != team_id);
    if teams.len() == before {
        return Ok(Outcome::NotFound);
    }
    for player in roster.players_mut() {
        if player.team_id.as_ref() == Some(team_id) {
            player.team_id = None;
        }
    }

    store.write_back(located)?;
    Ok(Outcome::Applied)
}

/// Moves a player onto a team, or off every team when `team_id` is `None`.
///
/// A captain who changes team stops captaining the old one.
///
/// # Errors
///
/// Returns an error if the event is a round or the write-back fails.
pub fn assign_team(
    store: &mut EventStore,
    event_id: &EventId,
    player_id: &PlayerId,
    team_id: Option<&TeamId>,
) -> Result<Outcome, CoreError> {
    let Some(mut located) = store.resolve(event_id) else {
        return Ok(Outcome::NotFound);
    };
    let roster: &mut dyn TeamRoster = team_roster(&mut located, event_id)?;

    if let Some(team_id) = team_id {
        if !roster.teams().iter().any(|t| &t.id == team_id) {
            return Ok(Outcome::NotFound);
        }
    }
    let Some(player) = roster.players_mut().iter_mut().find(|p| &p.id == player_id) else {
        return Ok(Outcome::NotFound);
    };
    if player.team_id.as_ref() == team_id {
        return Ok(Outcome::Unchanged);
    }
    let previous: Option<TeamId> = player.team_id.take();
    player.team_id = team_id.cloned();

    if let Some(previous) = previous {
        for team in roster.teams_mut() {
            if team.id == previous && team.captain.as_ref() == Some(player_id) {
                team.captain = None;
            }
        }
    }

    store.write_back(located)?;
    Ok(Outcome::Applied)
}

/// Sets or clears a team's captain.
///
/// # Errors
///
/// Returns `DomainError::InvalidCaptain` if the player is not on the team,
/// or an error if the event is a round.
pub fn set_captain(
    store: &mut EventStore,
    event_id: &EventId,
    team_id: &TeamId,
    captain: Option<&PlayerId>,
) -> Result<Outcome, CoreError> {
    let Some(mut located) = store.resolve(event_id) else {
        return Ok(Outcome::NotFound);
    };
    let roster: &mut dyn TeamRoster = team_roster(&mut located, event_id)?;

    if !roster.teams().iter().any(|t| &t.id == team_id) {
        return Ok(Outcome::NotFound);
    }
    if let Some(captain) = captain {
        let players: &[Player] = roster.players();
        validate_captain(team_id, captain, roster.teams(), players)?;
    }
    for team in roster.teams_mut() {
        if &team.id == team_id {
            team.captain = captain.cloned();
        }
    }

    store.write_back(located)?;
    Ok(Outcome::Applied)
}

fn team_roster<'a>(
    located: &'a mut Located,
    event_id: &EventId,
) -> Result<&'a mut dyn TeamRoster, CoreError> {
    let kind: EventKind = located.kind();
    located.team_roster_mut().ok_or_else(|| CoreError::InvalidParent {
        parent: event_id.clone(),
        kind,
    })
}
