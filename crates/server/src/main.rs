// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod clock;
mod notices;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use chrono_tz::Tz;
use clap::Parser;
use fairway::ApplyContext;
use fairway_api::{
    ApiError, ApiResult, AssignTeamRequest, CommandResponse, CreateRoundRequest,
    CreateTeamRequest, CreateTourRequest, CreateTournamentRequest, DeclineRequest,
    HighlightRequest, HoleScoreRequest, InviteRequest, LeaderboardResponse, ListEventsResponse,
    MatchResultRequest, PlayerGroupsRequest, PlayerRequest, RefreshResponse, SetCaptainRequest,
    ShoutOutsResponse, UpdateEventRequest, accept_invitation, add_highlight, assign_team,
    create_round, create_team, create_tour, create_tournament, decline_invitation, delete_event,
    delete_team, get_event, invite, leaderboard, list_events, record_hole_score,
    record_match_result, refresh_statuses, remove_player, set_captain, set_player_groups,
    shout_outs, update_event,
};
use fairway_domain::{DomainError, Event, parse_time_zone};
use fairway_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::clock::Clock;
use crate::notices::{LoggedAchievements, NoticeSender, run_notice_worker};

/// Fairway Server - HTTP server for the Fairway golf competition engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "FAIRWAY_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "FAIRWAY_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "FAIRWAY_PORT", default_value_t = 3000)]
    port: u16,

    /// Seconds between event status refreshes. 0 disables the refresh task.
    #[arg(long, env = "FAIRWAY_REFRESH_INTERVAL_SECS", default_value_t = 300)]
    refresh_interval_secs: u64,

    /// IANA time zone that decides what "today" is
    #[arg(long, env = "FAIRWAY_TIMEZONE", default_value = "UTC")]
    timezone: String,
}

/// The repository every handler shares.
///
/// Each handler holds the lock for its whole load-apply-commit cycle.
pub type SharedRepository = Arc<Mutex<Persistence>>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    repository: SharedRepository,
    clock: Clock,
    notices: NoticeSender,
}

impl AppState {
    fn context(&self) -> Result<ApplyContext, HttpError> {
        Ok(self.clock.context()?)
    }

    /// Queues a command's notices and returns the client response.
    fn finish(&self, result: ApiResult<CommandResponse>) -> Json<CommandResponse> {
        let ApiResult { response, notices } = result;
        self.notices.send(notices);
        Json(response)
    }

    /// Refreshes every status against today and queues the completions.
    async fn refresh(&self) -> Result<RefreshResponse, HttpError> {
        let ctx: ApplyContext = self.context()?;
        let mut repository = self.repository.lock().await;
        let result: ApiResult<RefreshResponse> = refresh_statuses(&mut *repository, ctx.today)?;
        drop(repository);

        let ApiResult { response, notices } = result;
        self.notices.send(notices);
        Ok(response)
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    fn not_found(what: &str, id: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("{what} '{id}' not found"),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::Storage { .. } => {
                error!(error = %err, "Storage error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<DomainError> for HttpError {
    fn from(err: DomainError) -> Self {
        error!(error = %err, "Clock error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Events
// ============================================================================

/// Handler for GET `/events`.
async fn handle_list_events(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListEventsResponse>, HttpError> {
    let mut repository = app_state.repository.lock().await;
    let response: ListEventsResponse = list_events(&mut *repository)?;
    drop(repository);
    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}`. Finds nested events too.
async fn handle_get_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<Event>, HttpError> {
    let mut repository = app_state.repository.lock().await;
    let event: Option<Event> = get_event(&mut *repository, &event_id)?;
    drop(repository);
    event
        .map(Json)
        .ok_or_else(|| HttpError::not_found("Event", &event_id))
}

/// Handler for POST `/tournaments`.
async fn handle_create_tournament(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateTournamentRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(name = %req.name, tour_id = ?req.tour_id, "Handling create_tournament request");
    let ctx: ApplyContext = app_state.context()?;
    let mut repository = app_state.repository.lock().await;
    let result: ApiResult<CommandResponse> = create_tournament(&mut *repository, req, &ctx)?;
    drop(repository);
    Ok(app_state.finish(result))
}

/// Handler for POST `/tours`.
async fn handle_create_tour(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateTourRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(name = %req.name, "Handling create_tour request");
    let ctx: ApplyContext = app_state.context()?;
    let mut repository = app_state.repository.lock().await;
    let result: ApiResult<CommandResponse> = create_tour(&mut *repository, req, &ctx)?;
    drop(repository);
    Ok(app_state.finish(result))
}

/// Handler for POST `/rounds`.
async fn handle_create_round(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateRoundRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(name = %req.name, parent_id = ?req.parent_id, "Handling create_round request");
    let ctx: ApplyContext = app_state.context()?;
    let mut repository = app_state.repository.lock().await;
    let result: ApiResult<CommandResponse> = create_round(&mut *repository, req, &ctx)?;
    drop(repository);
    Ok(app_state.finish(result))
}

/// Handler for PUT `/events/{event_id}`.
async fn handle_update_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(event_id = %event_id, "Handling update_event request");
    let ctx: ApplyContext = app_state.context()?;
    let mut repository = app_state.repository.lock().await;
    let result: ApiResult<CommandResponse> = update_event(&mut *repository, &event_id, req, &ctx)?;
    drop(repository);
    Ok(app_state.finish(result))
}

/// Handler for DELETE `/events/{event_id}`.
async fn handle_delete_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(event_id = %event_id, "Handling delete_event request");
    let ctx: ApplyContext = app_state.context()?;
    let mut repository = app_state.repository.lock().await;
    let result: ApiResult<CommandResponse> = delete_event(&mut *repository, &event_id, &ctx)?;
    drop(repository);
    Ok(app_state.finish(result))
}

/// Handler for POST `/events/{event_id}/highlights`.
async fn handle_add_highlight(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<HighlightRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let ctx: ApplyContext = app_state.context()?;
    let mut repository = app_state.repository.lock().await;
    let result: ApiResult<CommandResponse> =
        add_highlight(&mut *repository, &event_id, req, &ctx)?;
    drop(repository);
    Ok(app_state.finish(result))
}

// ============================================================================
// Membership
// ============================================================================

/// Handler for POST `/events/{event_id}/invitations`.
async fn handle_invite(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<InviteRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(event_id = %event_id, count = req.emails.len(), "Handling invite request");
    let ctx: ApplyContext = app_state.context()?;
    let mut repository = app_state.repository.lock().await;
    let result: ApiResult<CommandResponse> = invite(&mut *repository, &event_id, req, &ctx)?;
    drop(repository);
    Ok(app_state.finish(result))
}

/// Handler for POST `/events/{event_id}/invitations/accept`.
async fn handle_accept_invitation(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<PlayerRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(event_id = %event_id, "Handling accept_invitation request");
    let ctx: ApplyContext = app_state.context()?;
    let mut repository = app_state.repository.lock().await;
    let result: ApiResult<CommandResponse> =
        accept_invitation(&mut *repository, &event_id, req, &ctx)?;
    drop(repository);
    Ok(app_state.finish(result))
}

/// Handler for POST `/events/{event_id}/invitations/decline`.
async fn handle_decline_invitation(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<DeclineRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let ctx: ApplyContext = app_state.context()?;
    let mut repository = app_state.repository.lock().await;
    let result: ApiResult<CommandResponse> =
        decline_invitation(&mut *repository, &event_id, &req, &ctx)?;
    drop(repository);
    Ok(app_state.finish(result))
}

/// Handler for DELETE `/events/{event_id}/players/{player_id}`.
async fn handle_remove_player(
    AxumState(app_state): AxumState<AppState>,
    Path((event_id, player_id)): Path<(String, String)>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(event_id = %event_id, player_id = %player_id, "Handling remove_player request");
    let ctx: ApplyContext = app_state.context()?;
    let mut repository = app_state.repository.lock().await;
    let result: ApiResult<CommandResponse> =
        remove_player(&mut *repository, &event_id, &player_id, &ctx)?;
    drop(repository);
    Ok(app_state.finish(result))
}

// ============================================================================
// Teams
// ============================================================================

/// Handler for POST `/events/{event_id}/teams`.
async fn handle_create_team(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(event_id = %event_id, name = %req.name, "Handling create_team request");
    let ctx: ApplyContext = app_state.context()?;
    let mut repository = app_state.repository.lock().await;
    let result: ApiResult<CommandResponse> = create_team(&mut *repository, &event_id, req, &ctx)?;
    drop(repository);
    Ok(app_state.finish(result))
}

/// Handler for DELETE `/events/{event_id}/teams/{team_id}`.
async fn handle_delete_team(
    AxumState(app_state): AxumState<AppState>,
    Path((event_id, team_id)): Path<(String, String)>,
) -> Result<Json<CommandResponse>, HttpError> {
    let ctx: ApplyContext = app_state.context()?;
    let mut repository = app_state.repository.lock().await;
    let result: ApiResult<CommandResponse> =
        delete_team(&mut *repository, &event_id, &team_id, &ctx)?;
    drop(repository);
    Ok(app_state.finish(result))
}

/// Handler for PUT `/events/{event_id}/players/{player_id}/team`.
async fn handle_assign_team(
    AxumState(app_state): AxumState<AppState>,
    Path((event_id, player_id)): Path<(String, String)>,
    Json(req): Json<AssignTeamRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let ctx: ApplyContext = app_state.context()?;
    let mut repository = app_state.repository.lock().await;
    let result: ApiResult<CommandResponse> =
        assign_team(&mut *repository, &event_id, &player_id, &req, &ctx)?;
    drop(repository);
    Ok(app_state.finish(result))
}

/// Handler for PUT `/events/{event_id}/teams/{team_id}/captain`.
async fn handle_set_captain(
    AxumState(app_state): AxumState<AppState>,
    Path((event_id, team_id)): Path<(String, String)>,
    Json(req): Json<SetCaptainRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let ctx: ApplyContext = app_state.context()?;
    let mut repository = app_state.repository.lock().await;
    let result: ApiResult<CommandResponse> =
        set_captain(&mut *repository, &event_id, &team_id, &req, &ctx)?;
    drop(repository);
    Ok(app_state.finish(result))
}

// ============================================================================
// Scoring
// ============================================================================

/// Handler for PUT `/rounds/{round_id}/scores/{player_id}`.
async fn handle_record_hole_score(
    AxumState(app_state): AxumState<AppState>,
    Path((round_id, player_id)): Path<(String, String)>,
    Json(req): Json<HoleScoreRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(
        round_id = %round_id,
        player_id = %player_id,
        hole = req.hole,
        "Handling record_hole_score request"
    );
    let ctx: ApplyContext = app_state.context()?;
    let mut repository = app_state.repository.lock().await;
    let result: ApiResult<CommandResponse> =
        record_hole_score(&mut *repository, &round_id, &player_id, req, &ctx)?;
    drop(repository);
    Ok(app_state.finish(result))
}

/// Handler for PUT `/rounds/{round_id}/match_results/{player_id}`.
async fn handle_record_match_result(
    AxumState(app_state): AxumState<AppState>,
    Path((round_id, player_id)): Path<(String, String)>,
    Json(req): Json<MatchResultRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let ctx: ApplyContext = app_state.context()?;
    let mut repository = app_state.repository.lock().await;
    let result: ApiResult<CommandResponse> =
        record_match_result(&mut *repository, &round_id, &player_id, &req, &ctx)?;
    drop(repository);
    Ok(app_state.finish(result))
}

/// Handler for PUT `/rounds/{round_id}/groups`.
async fn handle_set_player_groups(
    AxumState(app_state): AxumState<AppState>,
    Path(round_id): Path<String>,
    Json(req): Json<PlayerGroupsRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    let ctx: ApplyContext = app_state.context()?;
    let mut repository = app_state.repository.lock().await;
    let result: ApiResult<CommandResponse> =
        set_player_groups(&mut *repository, &round_id, req, &ctx)?;
    drop(repository);
    Ok(app_state.finish(result))
}

// ============================================================================
// Queries and status
// ============================================================================

/// Handler for GET `/events/{event_id}/leaderboard`.
async fn handle_leaderboard(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<LeaderboardResponse>, HttpError> {
    let mut repository = app_state.repository.lock().await;
    let response: Option<LeaderboardResponse> = leaderboard(&mut *repository, &event_id)?;
    drop(repository);
    response
        .map(Json)
        .ok_or_else(|| HttpError::not_found("Event", &event_id))
}

/// Handler for GET `/events/{event_id}/shout_outs`.
async fn handle_shout_outs(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<ShoutOutsResponse>, HttpError> {
    let mut repository = app_state.repository.lock().await;
    let response: Option<ShoutOutsResponse> = shout_outs(&mut *repository, &event_id)?;
    drop(repository);
    response
        .map(Json)
        .ok_or_else(|| HttpError::not_found("Event", &event_id))
}

/// Handler for POST `/status/refresh`.
async fn handle_refresh_statuses(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<RefreshResponse>, HttpError> {
    info!("Handling refresh_statuses request");
    Ok(Json(app_state.refresh().await?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/events", get(handle_list_events))
        .route(
            "/events/{event_id}",
            get(handle_get_event)
                .put(handle_update_event)
                .delete(handle_delete_event),
        )
        .route("/events/{event_id}/leaderboard", get(handle_leaderboard))
        .route("/events/{event_id}/shout_outs", get(handle_shout_outs))
        .route("/events/{event_id}/highlights", post(handle_add_highlight))
        .route("/events/{event_id}/invitations", post(handle_invite))
        .route(
            "/events/{event_id}/invitations/accept",
            post(handle_accept_invitation),
        )
        .route(
            "/events/{event_id}/invitations/decline",
            post(handle_decline_invitation),
        )
        .route(
            "/events/{event_id}/players/{player_id}",
            delete(handle_remove_player),
        )
        .route(
            "/events/{event_id}/players/{player_id}/team",
            put(handle_assign_team),
        )
        .route("/events/{event_id}/teams", post(handle_create_team))
        .route(
            "/events/{event_id}/teams/{team_id}",
            delete(handle_delete_team),
        )
        .route(
            "/events/{event_id}/teams/{team_id}/captain",
            put(handle_set_captain),
        )
        .route("/tournaments", post(handle_create_tournament))
        .route("/tours", post(handle_create_tour))
        .route("/rounds", post(handle_create_round))
        .route(
            "/rounds/{round_id}/scores/{player_id}",
            put(handle_record_hole_score),
        )
        .route(
            "/rounds/{round_id}/match_results/{player_id}",
            put(handle_record_match_result),
        )
        .route("/rounds/{round_id}/groups", put(handle_set_player_groups))
        .route("/status/refresh", post(handle_refresh_statuses))
        .with_state(app_state)
}

/// Refreshes statuses on a fixed period. The first refresh runs at startup.
fn spawn_status_refresh(app_state: AppState, period: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if let Err(e) = app_state.refresh().await {
                warn!(status = %e.status, message = %e.message, "Scheduled status refresh failed");
            }
        }
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Fairway Server");

    let tz: Tz = parse_time_zone(&args.timezone)?;
    info!(timezone = %tz, "Using time zone for event dates");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let repository: SharedRepository = Arc::new(Mutex::new(persistence));
    let (notices, notice_rx) = NoticeSender::channel();
    tokio::spawn(run_notice_worker(
        notice_rx,
        Arc::clone(&repository),
        Arc::new(LoggedAchievements),
    ));

    let app_state: AppState = AppState {
        repository,
        clock: Clock::System(tz),
        notices,
    };

    if args.refresh_interval_secs == 0 {
        info!("Scheduled status refresh disabled");
    } else {
        info!(
            every_secs = args.refresh_interval_secs,
            "Scheduling status refresh"
        );
        spawn_status_refresh(
            app_state.clone(),
            Duration::from_secs(args.refresh_interval_secs),
        );
    }

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
