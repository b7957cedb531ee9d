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

//! Notifications emitted by state transitions, and the contract of the
//! external service that turns them into player achievements.
//!
//! Transitions never call the achievement service themselves. They return
//! [`Notice`]s; whoever applied the transition decides when and how to
//! deliver them. Delivery is best-effort: an [`AchievementError`] is logged
//! by the caller and never rolls back the mutation that produced the notice.

use fairway_domain::{EventId, EventKind, PlayerId, ShoutOut};
use serde::{Deserialize, Serialize};
#[cfg(any(test, feature = "test-support"))]
use std::sync::Mutex;
use time::Date;

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

/// Signals that a tournament or tour moved into `completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionNotice {
    /// The completed event. Nested tournaments are reported by their own id.
    pub event_id: EventId,
    pub kind: EventKind,
    pub event_name: String,
    /// The date the refresh observed the transition.
    #[serde(with = "calendar_date")]
    pub completed_on: Date,
}

/// A notification produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "notice", rename_all = "camelCase")]
pub enum Notice {
    /// A tournament or tour completed.
    Completed(CompletionNotice),
    /// A notable hole score was recorded.
    ShoutOut(ShoutOut),
}

/// What a player achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    TournamentWin,
    TournamentPodium,
    TourWin,
    TourPodium,
}

impl AchievementKind {
    /// Picks the kind for a finishing position on a tournament or tour board.
    ///
    /// Returns `None` outside the top three.
    #[must_use]
    pub const fn for_finish(event: EventKind, position: u32) -> Option<Self> {
        match (event, position) {
            (EventKind::Tour, 1) => Some(Self::TourWin),
            (EventKind::Tour, 2 | 3) => Some(Self::TourPodium),
            (EventKind::Tournament, 1) => Some(Self::TournamentWin),
            (EventKind::Tournament, 2 | 3) => Some(Self::TournamentPodium),
            _ => None,
        }
    }

    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TournamentWin => "tournament_win",
            Self::TournamentPodium => "tournament_podium",
            Self::TourWin => "tour_win",
            Self::TourPodium => "tour_podium",
        }
    }
}

impl std::fmt::Display for AchievementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payload handed to [`AchievementService::record_achievement`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementRecord {
    #[serde(rename = "type")]
    pub kind: AchievementKind,
    pub event_id: EventId,
    pub event_name: String,
    #[serde(with = "calendar_date")]
    pub date: Date,
    pub position: u32,
    pub text: String,
}

impl AchievementRecord {
    /// Builds a medal record for a finishing position.
    ///
    /// Returns `None` when the position is not medal-eligible.
    #[must_use]
    pub fn for_finish(notice: &CompletionNotice, player_name: &str, position: u32) -> Option<Self> {
        let kind: AchievementKind = AchievementKind::for_finish(notice.kind, position)?;
        let place: &str = match position {
            1 => "won",
            2 => "finished 2nd in",
            _ => "finished 3rd in",
        };
        Some(Self {
            kind,
            event_id: notice.event_id.clone(),
            event_name: notice.event_name.clone(),
            date: notice.completed_on,
            position,
            text: format!("{player_name} {place} {}", notice.event_name),
        })
    }
}

/// Failure reported by the achievement collaborator.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AchievementError {
    /// The service could not be reached.
    #[error("Achievement service unavailable: {0}")]
    Unavailable(String),
    /// The service refused the record.
    #[error("Achievement for player '{player_id}' rejected: {reason}")]
    Rejected { player_id: PlayerId, reason: String },
}

/// The external profile/achievement service.
pub trait AchievementService: Send + Sync {
    /// Records an achievement for a player.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot store the record. Callers
    /// treat this as non-fatal.
    fn record_achievement(
        &self,
        player_id: &PlayerId,
        record: &AchievementRecord,
    ) -> Result<(), AchievementError>;
}

/// An [`AchievementService`] that keeps everything it is given in memory.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingAchievements {
    recorded: Mutex<Vec<(PlayerId, AchievementRecord)>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingAchievements {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far, in arrival order.
    #[must_use]
    pub fn recorded(&self) -> Vec<(PlayerId, AchievementRecord)> {
        self.recorded
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl AchievementService for RecordingAchievements {
    fn record_achievement(
        &self,
        player_id: &PlayerId,
        record: &AchievementRecord,
    ) -> Result<(), AchievementError> {
        let mut guard = self
            .recorded
            .lock()
            .map_err(|e| AchievementError::Unavailable(e.to_string()))?;
        guard.push((player_id.clone(), record.clone()));
        drop(guard);
        Ok(())
    }
}
