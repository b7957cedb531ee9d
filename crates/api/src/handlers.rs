// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every mutating handler follows the same cycle: load the store from the
//! repository, apply one command, and commit the transition's changes as a
//! single write-back. Callers are expected to serialize access to the
//! repository for the duration of a handler.

use fairway::{
    ApplyContext, Command, DetailsPatch, EventStore, HoleEntry, Located, RoundDetails, RoundHome,
    TourDetails, TournamentDetails, Transition, apply, medal_records, refresh_all_statuses,
};
use fairway_domain::{
    Email, Event, EventId, Highlight, MatchResult, Player, PlayerId, Roster, Round, ShoutOut,
    Team, TeamId, round_leaderboard, team_leaderboard, tour_leaderboard, tour_team_leaderboard,
    tournament_leaderboard,
};
use fairway_notify::{AchievementRecord, AchievementService, CompletionNotice, Notice};
use fairway_persistence::EventRepository;
use time::Date;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::request_response::{
    ApiResult, AssignTeamRequest, CommandResponse, CreateRoundRequest, CreateTeamRequest,
    CreateTourRequest, CreateTournamentRequest, DeclineRequest, EventSummary, HighlightRequest,
    HoleScoreRequest, InviteRequest, LeaderboardResponse, ListEventsResponse, MatchResultRequest,
    PlayerGroupsRequest, PlayerRequest, RefreshResponse, RoundLeaderboardResponse,
    SetCaptainRequest, ShoutOutsResponse, TourLeaderboardResponse, TournamentLeaderboardResponse,
    UpdateEventRequest,
};

fn parse_event_id(field: &str, value: &str) -> Result<EventId, ApiError> {
    EventId::new(value).map_err(|e| ApiError::invalid(field, e.to_string()))
}

fn parse_player_id(field: &str, value: &str) -> Result<PlayerId, ApiError> {
    PlayerId::new(value).map_err(|e| ApiError::invalid(field, e.to_string()))
}

fn parse_team_id(field: &str, value: &str) -> Result<TeamId, ApiError> {
    TeamId::new(value).map_err(|e| ApiError::invalid(field, e.to_string()))
}

/// Loads, applies and commits one command.
fn execute<R: EventRepository + ?Sized>(
    repository: &mut R,
    command: Command,
    ctx: &ApplyContext,
    created_id: Option<String>,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let name: &'static str = command.name();
    let store: EventStore = repository.load_store()?;
    let transition: Transition = apply(&store, command, ctx)?;

    if transition.has_changes() {
        repository.commit(&transition.changed, &transition.removed)?;
    }
    info!(
        command = name,
        outcome = ?transition.outcome,
        changed = transition.changed.len(),
        removed = transition.removed.len(),
        notices = transition.notices.len(),
        "Applied command"
    );

    let response: CommandResponse = CommandResponse::from_transition(&transition, created_id);
    Ok(ApiResult {
        response,
        notices: transition.notices,
    })
}

/// Creates a tournament, standalone or inside a tour.
///
/// The creator becomes the first player.
///
/// # Arguments
///
/// * `repository` - The event repository
/// * `request` - The tournament to create
/// * `ctx` - The clock the command runs against
///
/// # Errors
///
/// Returns an error if:
/// - The name is blank or the dates are inverted
/// - The creator's email is malformed
/// - `tourId` names an event that is not a tour
/// - The repository fails
pub fn create_tournament<R: EventRepository + ?Sized>(
    repository: &mut R,
    request: CreateTournamentRequest,
    ctx: &ApplyContext,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let id: EventId = EventId::generate();
    let tour_id: Option<EventId> = request
        .tour_id
        .as_deref()
        .map(|tour_id| parse_event_id("tourId", tour_id))
        .transpose()?;
    let command: Command = Command::CreateTournament {
        id: id.clone(),
        creator: request.creator.into_player()?,
        details: TournamentDetails {
            name: request.name,
            format: request.format,
            start_date: request.start_date,
            end_date: request.end_date,
            location: request.location,
            is_team_event: request.is_team_event,
            scoring_type: request.scoring_type,
        },
        tour_id,
    };
    execute(repository, command, ctx, Some(id.to_string()))
}

/// Creates a tour. The creator becomes the first player.
///
/// # Errors
///
/// Returns an error if the name is blank, the dates are inverted, the
/// creator is malformed, or the repository fails.
pub fn create_tour<R: EventRepository + ?Sized>(
    repository: &mut R,
    request: CreateTourRequest,
    ctx: &ApplyContext,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let id: EventId = EventId::generate();
    let command: Command = Command::CreateTour {
        id: id.clone(),
        creator: request.creator.into_player()?,
        details: TourDetails {
            name: request.name,
            start_date: request.start_date,
            end_date: request.end_date,
            points_system: request.points_system.unwrap_or_default(),
        },
    };
    execute(repository, command, ctx, Some(id.to_string()))
}

/// Creates a round, standalone or inside a tournament or tour.
///
/// # Errors
///
/// Returns an error if the name is blank, the course is invalid, the
/// parent is a round, or the repository fails.
pub fn create_round<R: EventRepository + ?Sized>(
    repository: &mut R,
    request: CreateRoundRequest,
    ctx: &ApplyContext,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let id: EventId = EventId::generate();
    let parent: Option<EventId> = request
        .parent_id
        .as_deref()
        .map(|parent| parse_event_id("parentId", parent))
        .transpose()?;
    let creator: Option<Player> = request
        .creator
        .map(PlayerRequest::into_player)
        .transpose()?;
    let command: Command = Command::CreateRound {
        id: id.clone(),
        parent,
        creator,
        details: RoundDetails {
            name: request.name,
            date: request.date,
            format: request.format,
            course_details: request.course_details,
        },
    };
    execute(repository, command, ctx, Some(id.to_string()))
}

/// Changes descriptive fields of any event and re-derives its status.
///
/// # Errors
///
/// Returns an error if a patched value is invalid or the repository fails.
pub fn update_event<R: EventRepository + ?Sized>(
    repository: &mut R,
    event_id: &str,
    request: UpdateEventRequest,
    ctx: &ApplyContext,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let patch: DetailsPatch = DetailsPatch {
        name: request.name,
        format: request.format,
        location: request.location,
        start_date: request.start_date,
        end_date: request.end_date,
        date: request.date,
        course_details: request.course_details,
        points_system: request.points_system,
        is_team_event: request.is_team_event,
        scoring_type: request.scoring_type,
    };
    let command: Command = Command::UpdateDetails {
        event_id: parse_event_id("eventId", event_id)?,
        patch,
    };
    execute(repository, command, ctx, None)
}

/// Deletes an event wherever it lives.
///
/// # Errors
///
/// Returns an error if the id is blank or the repository fails.
pub fn delete_event<R: EventRepository + ?Sized>(
    repository: &mut R,
    event_id: &str,
    ctx: &ApplyContext,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let command: Command = Command::DeleteEvent {
        event_id: parse_event_id("eventId", event_id)?,
    };
    execute(repository, command, ctx, None)
}

/// Invites emails to an event.
///
/// # Errors
///
/// Returns an error if any email is malformed or the repository fails.
pub fn invite<R: EventRepository + ?Sized>(
    repository: &mut R,
    event_id: &str,
    request: InviteRequest,
    ctx: &ApplyContext,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let emails: Vec<Email> = request
        .emails
        .iter()
        .map(|email| Email::parse(email))
        .collect::<Result<_, _>>()?;
    let command: Command = Command::Invite {
        event_id: parse_event_id("eventId", event_id)?,
        emails,
    };
    execute(repository, command, ctx, None)
}

/// Accepts an invitation on behalf of `request`'s player.
///
/// # Errors
///
/// Returns an error if the player is malformed or the repository fails.
pub fn accept_invitation<R: EventRepository + ?Sized>(
    repository: &mut R,
    event_id: &str,
    request: PlayerRequest,
    ctx: &ApplyContext,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let player: Player = request.into_player()?;
    let created_id: String = player.id.to_string();
    let command: Command = Command::Accept {
        event_id: parse_event_id("eventId", event_id)?,
        player,
    };
    execute(repository, command, ctx, Some(created_id))
}

/// Declines an invitation.
///
/// # Errors
///
/// Returns an error if the email is malformed or the repository fails.
pub fn decline_invitation<R: EventRepository + ?Sized>(
    repository: &mut R,
    event_id: &str,
    request: &DeclineRequest,
    ctx: &ApplyContext,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let command: Command = Command::Decline {
        event_id: parse_event_id("eventId", event_id)?,
        email: Email::parse(&request.email)?,
    };
    execute(repository, command, ctx, None)
}

/// Removes a player from an event and everything nested in it.
///
/// # Errors
///
/// Returns an error if an id is blank or the repository fails.
pub fn remove_player<R: EventRepository + ?Sized>(
    repository: &mut R,
    event_id: &str,
    player_id: &str,
    ctx: &ApplyContext,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let command: Command = Command::RemovePlayer {
        event_id: parse_event_id("eventId", event_id)?,
        player_id: parse_player_id("playerId", player_id)?,
    };
    execute(repository, command, ctx, None)
}

/// Adds a team to a tournament or tour.
///
/// # Errors
///
/// Returns an error if the name is taken, the captain is not on the team,
/// the event is a round, or the repository fails.
pub fn create_team<R: EventRepository + ?Sized>(
    repository: &mut R,
    event_id: &str,
    request: CreateTeamRequest,
    ctx: &ApplyContext,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let id: TeamId = match request.id.as_deref() {
        Some(id) => parse_team_id("id", id)?,
        None => TeamId::generate(),
    };
    let captain: Option<PlayerId> = request
        .captain
        .as_deref()
        .map(|captain| parse_player_id("captain", captain))
        .transpose()?;
    let team: Team = Team {
        id: id.clone(),
        name: request.name,
        color: request.color,
        logo: request.logo,
        captain,
    };
    let command: Command = Command::CreateTeam {
        event_id: parse_event_id("eventId", event_id)?,
        team,
    };
    execute(repository, command, ctx, Some(id.to_string()))
}

/// Deletes a team; its players become unassigned.
///
/// # Errors
///
/// Returns an error if the event is a round or the repository fails.
pub fn delete_team<R: EventRepository + ?Sized>(
    repository: &mut R,
    event_id: &str,
    team_id: &str,
    ctx: &ApplyContext,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let command: Command = Command::DeleteTeam {
        event_id: parse_event_id("eventId", event_id)?,
        team_id: parse_team_id("teamId", team_id)?,
    };
    execute(repository, command, ctx, None)
}

/// Moves a player onto a team, or off every team.
///
/// # Errors
///
/// Returns an error if the event is a round or the repository fails.
pub fn assign_team<R: EventRepository + ?Sized>(
    repository: &mut R,
    event_id: &str,
    player_id: &str,
    request: &AssignTeamRequest,
    ctx: &ApplyContext,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let team_id: Option<TeamId> = request
        .team_id
        .as_deref()
        .map(|team_id| parse_team_id("teamId", team_id))
        .transpose()?;
    let command: Command = Command::AssignTeam {
        event_id: parse_event_id("eventId", event_id)?,
        player_id: parse_player_id("playerId", player_id)?,
        team_id,
    };
    execute(repository, command, ctx, None)
}

/// Sets or clears a team's captain.
///
/// # Errors
///
/// Returns an error if the captain is not on the team, the event is a
/// round, or the repository fails.
pub fn set_captain<R: EventRepository + ?Sized>(
    repository: &mut R,
    event_id: &str,
    team_id: &str,
    request: &SetCaptainRequest,
    ctx: &ApplyContext,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let captain: Option<PlayerId> = request
        .captain
        .as_deref()
        .map(|captain| parse_player_id("captain", captain))
        .transpose()?;
    let command: Command = Command::SetCaptain {
        event_id: parse_event_id("eventId", event_id)?,
        team_id: parse_team_id("teamId", team_id)?,
        captain,
    };
    execute(repository, command, ctx, None)
}

/// Records one hole for a player. Any shout-out it earns is returned in the
/// response and as a notice.
///
/// # Errors
///
/// Returns an error if the hole or stroke values are invalid or the
/// repository fails.
pub fn record_hole_score<R: EventRepository + ?Sized>(
    repository: &mut R,
    round_id: &str,
    player_id: &str,
    request: HoleScoreRequest,
    ctx: &ApplyContext,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let command: Command = Command::RecordHoleScore {
        round_id: parse_event_id("roundId", round_id)?,
        player_id: parse_player_id("playerId", player_id)?,
        entry: HoleEntry {
            hole: request.hole,
            score: request.score,
            par: request.par,
            notes: request.notes,
        },
    };
    execute(repository, command, ctx, None)
}

/// Records a player's match-play result.
///
/// # Errors
///
/// Returns an error if the points are negative or the repository fails.
pub fn record_match_result<R: EventRepository + ?Sized>(
    repository: &mut R,
    round_id: &str,
    player_id: &str,
    request: &MatchResultRequest,
    ctx: &ApplyContext,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let command: Command = Command::RecordMatchResult {
        round_id: parse_event_id("roundId", round_id)?,
        player_id: parse_player_id("playerId", player_id)?,
        result: MatchResult {
            opponent_id: parse_player_id("opponentId", &request.opponent_id)?,
            result: request.result,
            points: request.points,
        },
    };
    execute(repository, command, ctx, None)
}

/// Replaces a round's playing groups.
///
/// # Errors
///
/// Returns an error if a grouped player is not in the round or the
/// repository fails.
pub fn set_player_groups<R: EventRepository + ?Sized>(
    repository: &mut R,
    round_id: &str,
    request: PlayerGroupsRequest,
    ctx: &ApplyContext,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    let command: Command = Command::SetPlayerGroups {
        round_id: parse_event_id("roundId", round_id)?,
        groups: request.groups,
    };
    execute(repository, command, ctx, None)
}

/// Attaches a highlight to an event.
///
/// # Errors
///
/// Returns an error if the title or media URL is blank or the repository
/// fails.
pub fn add_highlight<R: EventRepository + ?Sized>(
    repository: &mut R,
    event_id: &str,
    request: HighlightRequest,
    ctx: &ApplyContext,
) -> Result<ApiResult<CommandResponse>, ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::invalid("title", "Highlight title cannot be empty"));
    }
    if request.media_url.trim().is_empty() {
        return Err(ApiError::invalid("mediaUrl", "Media URL cannot be empty"));
    }
    let id: String = uuid::Uuid::new_v4().to_string();
    let highlight: Highlight = Highlight {
        id: id.clone(),
        player_id: parse_player_id("playerId", &request.player_id)?,
        title: request.title.trim().to_string(),
        media_url: request.media_url,
        caption: request.caption,
        created_at: ctx.now,
    };
    let command: Command = Command::AddHighlight {
        event_id: parse_event_id("eventId", event_id)?,
        highlight,
    };
    execute(repository, command, ctx, Some(id))
}

/// Recomputes every event's status against `today` and commits whatever
/// moved.
///
/// Running it twice on the same day changes nothing the second time.
///
/// # Errors
///
/// Returns an error if the repository fails.
pub fn refresh_statuses<R: EventRepository + ?Sized>(
    repository: &mut R,
    today: Date,
) -> Result<ApiResult<RefreshResponse>, ApiError> {
    let store: EventStore = repository.load_store()?;
    let transition: Transition = refresh_all_statuses(&store, today);
    if transition.has_changes() {
        repository.commit(&transition.changed, &transition.removed)?;
        info!(
            %today,
            changed = transition.changed.len(),
            completed = transition.notices.len(),
            "Refreshed event statuses"
        );
    } else {
        debug!(%today, "Event statuses already current");
    }

    let completed: Vec<CompletionNotice> = transition
        .notices
        .iter()
        .filter_map(|notice| match notice {
            Notice::Completed(completed) => Some(completed.clone()),
            Notice::ShoutOut(_) => None,
        })
        .collect();
    Ok(ApiResult {
        response: RefreshResponse {
            changed: transition.changed.iter().map(|e| e.id().clone()).collect(),
            completed,
        },
        notices: transition.notices,
    })
}

/// Lists every top-level event.
///
/// # Errors
///
/// Returns an error if the repository fails.
pub fn list_events<R: EventRepository + ?Sized>(
    repository: &mut R,
) -> Result<ListEventsResponse, ApiError> {
    let events: Vec<Event> = repository.list()?;
    Ok(ListEventsResponse {
        events: events.iter().map(EventSummary::from).collect(),
    })
}

/// Returns any event by id, including nested tournaments and rounds.
///
/// # Errors
///
/// Returns an error if the id is blank or the repository fails.
pub fn get_event<R: EventRepository + ?Sized>(
    repository: &mut R,
    event_id: &str,
) -> Result<Option<Event>, ApiError> {
    let event_id: EventId = parse_event_id("eventId", event_id)?;
    let store: EventStore = repository.load_store()?;
    Ok(store.resolve(&event_id).map(|located| match located {
        Located::Tournament(resolved) => Event::Tournament(resolved.value),
        Located::Tour(tour) => Event::Tour(tour),
        Located::Round(resolved) => Event::Round(resolved.value),
    }))
}

/// Computes the leaderboard of any event.
///
/// Tournaments get individual and team standings, tours get points
/// standings, rounds get stroke standings with names drawn from the round
/// and the event that owns it.
///
/// # Errors
///
/// Returns an error if the id is blank or the repository fails.
pub fn leaderboard<R: EventRepository + ?Sized>(
    repository: &mut R,
    event_id: &str,
) -> Result<Option<LeaderboardResponse>, ApiError> {
    let event_id: EventId = parse_event_id("eventId", event_id)?;
    let store: EventStore = repository.load_store()?;

    let Some(located) = store.resolve(&event_id) else {
        return Ok(None);
    };
    let response: LeaderboardResponse = match located {
        Located::Tournament(resolved) => {
            LeaderboardResponse::Tournament(TournamentLeaderboardResponse {
                individual: tournament_leaderboard(&resolved.value),
                teams: team_leaderboard(&resolved.value),
                event_id,
            })
        }
        Located::Tour(tour) => LeaderboardResponse::Tour(TourLeaderboardResponse {
            individual: tour_leaderboard(&tour),
            teams: tour_team_leaderboard(&tour),
            event_id,
        }),
        Located::Round(resolved) => {
            let roster: Vec<Player> = round_roster(&store, &resolved.value, &resolved.home);
            LeaderboardResponse::Round(RoundLeaderboardResponse {
                standings: round_leaderboard(&resolved.value, &roster),
                event_id,
            })
        }
    };
    Ok(Some(response))
}

/// The round's own players followed by those of the event that owns it.
fn round_roster(store: &EventStore, round: &Round, home: &RoundHome) -> Vec<Player> {
    let owner: Option<&dyn Roster> = match home {
        RoundHome::Standalone => None,
        RoundHome::InTournament { tournament_id, .. } => {
            store.tournament(tournament_id).map(|t| t as &dyn Roster)
        }
        RoundHome::InTour { tour_id, .. } => store.tour(tour_id).map(|t| t as &dyn Roster),
    };
    let mut roster: Vec<Player> = round.players.clone();
    if let Some(owner) = owner {
        roster.extend(owner.players().iter().cloned());
    }
    roster
}

/// Returns the shout-outs an event holds.
///
/// # Errors
///
/// Returns an error if the id is blank or the repository fails.
pub fn shout_outs<R: EventRepository + ?Sized>(
    repository: &mut R,
    event_id: &str,
) -> Result<Option<ShoutOutsResponse>, ApiError> {
    let event_id: EventId = parse_event_id("eventId", event_id)?;
    let store: EventStore = repository.load_store()?;
    let shout_outs: Option<Vec<ShoutOut>> = store.resolve(&event_id).map(|located| match located {
        Located::Tournament(resolved) => resolved.value.shout_outs,
        Located::Tour(tour) => tour.shout_outs,
        Located::Round(resolved) => resolved.value.shout_outs,
    });
    Ok(shout_outs.map(|shout_outs| ShoutOutsResponse {
        event_id,
        shout_outs,
    }))
}

/// Hands medals for every completion notice to the achievement service.
///
/// Standings are computed from the repository's current state. Failures
/// are logged and skipped; they never undo the completion.
///
/// Returns the number of records the service accepted.
///
/// # Errors
///
/// Returns an error only if the repository cannot be read.
pub fn record_completion_achievements<R: EventRepository + ?Sized>(
    repository: &mut R,
    notices: &[Notice],
    service: &dyn AchievementService,
) -> Result<usize, ApiError> {
    let completed: Vec<&CompletionNotice> = notices
        .iter()
        .filter_map(|notice| match notice {
            Notice::Completed(completed) => Some(completed),
            Notice::ShoutOut(_) => None,
        })
        .collect();
    if completed.is_empty() {
        return Ok(0);
    }

    let store: EventStore = repository.load_store()?;
    let mut accepted: usize = 0;
    for notice in completed {
        let records: Vec<(PlayerId, AchievementRecord)> = medal_records(&store, notice);
        for (player_id, record) in records {
            match service.record_achievement(&player_id, &record) {
                Ok(()) => {
                    accepted += 1;
                    debug!(
                        player_id = %player_id,
                        event_id = %record.event_id,
                        kind = %record.kind,
                        "Recorded achievement"
                    );
                }
                Err(e) => warn!(
                    player_id = %player_id,
                    event_id = %record.event_id,
                    error = %e,
                    "Failed to record achievement"
                ),
            }
        }
    }
    Ok(accepted)
}
