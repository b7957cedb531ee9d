// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Background handling of transition notices.
//!
//! Handlers hand their notices to a bounded queue and return immediately.
//! A single worker drains the queue: it logs shout-outs and turns completion
//! notices into achievement records. A slow or failing achievement service
//! never delays or fails a request.

use fairway_api::record_completion_achievements;
use fairway_domain::PlayerId;
use fairway_notify::{AchievementError, AchievementRecord, AchievementService, Notice};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, error, info, warn};

use crate::SharedRepository;

/// Notice batches queued before new ones are dropped.
const NOTICE_QUEUE_SIZE: usize = 256;

/// The sending half of the notice queue.
#[derive(Debug, Clone)]
pub struct NoticeSender {
    tx: mpsc::Sender<Vec<Notice>>,
}

impl NoticeSender {
    /// Creates the queue.
    #[must_use]
    pub fn channel() -> (Self, mpsc::Receiver<Vec<Notice>>) {
        let (tx, rx) = mpsc::channel(NOTICE_QUEUE_SIZE);
        (Self { tx }, rx)
    }

    /// Queues one transition's notices. Empty batches are skipped.
    pub fn send(&self, notices: Vec<Notice>) {
        if notices.is_empty() {
            return;
        }
        let count: usize = notices.len();
        let (reason, dropped): (&str, Vec<Notice>) = match self.tx.try_send(notices) {
            Ok(()) => {
                debug!(count, "Queued notices");
                return;
            }
            Err(TrySendError::Full(dropped)) => ("queue full", dropped),
            Err(TrySendError::Closed(dropped)) => ("worker stopped", dropped),
        };

        let completed: Vec<String> = completed_event_ids(&dropped);
        if completed.is_empty() {
            warn!(count, reason, "Notices dropped");
        } else {
            warn!(
                count,
                reason,
                completed_events = %completed.join(","),
                "Notices dropped, medals for these completed events will not be recorded"
            );
        }
    }
}

/// Ids of the events a batch reports as completed.
fn completed_event_ids(notices: &[Notice]) -> Vec<String> {
    notices
        .iter()
        .filter_map(|notice| match notice {
            Notice::Completed(completed) => Some(completed.event_id.to_string()),
            Notice::ShoutOut(_) => None,
        })
        .collect()
}

/// An achievement service that writes records to the log.
///
/// Stands in for the external profile service.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggedAchievements;

impl AchievementService for LoggedAchievements {
    fn record_achievement(
        &self,
        player_id: &PlayerId,
        record: &AchievementRecord,
    ) -> Result<(), AchievementError> {
        info!(
            player_id = %player_id,
            kind = %record.kind,
            event_id = %record.event_id,
            position = record.position,
            "{}",
            record.text
        );
        Ok(())
    }
}

/// Drains the notice queue until every sender is gone.
pub async fn run_notice_worker(
    mut rx: mpsc::Receiver<Vec<Notice>>,
    repository: SharedRepository,
    achievements: Arc<dyn AchievementService>,
) {
    info!("Notice worker started");
    while let Some(notices) = rx.recv().await {
        for notice in &notices {
            match notice {
                Notice::ShoutOut(shout_out) => info!(
                    player_id = %shout_out.player_id,
                    round_id = %shout_out.round_id,
                    kind = shout_out.kind.as_str(),
                    "{}",
                    shout_out.message
                ),
                Notice::Completed(completed) => info!(
                    event_id = %completed.event_id,
                    kind = %completed.kind,
                    completed_on = %completed.completed_on,
                    "{} completed",
                    completed.event_name
                ),
            }
        }

        if !notices.iter().any(|n| matches!(n, Notice::Completed(_))) {
            continue;
        }
        let mut guard = repository.lock().await;
        match record_completion_achievements(&mut *guard, &notices, achievements.as_ref()) {
            Ok(0) => debug!("No achievements to record"),
            Ok(count) => info!(count, "Recorded achievements"),
            Err(e) => error!(error = %e, "Failed to compute achievements"),
        }
        drop(guard);
    }
    info!("Notice worker stopped");
}
