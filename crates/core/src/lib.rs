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

mod achievements;
mod apply;
mod command;
mod error;
mod membership;
mod scoring;
mod status;
mod store;
mod teams;
mod transition;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use achievements::medal_records;
pub use apply::{apply, refresh_all_statuses};
pub use command::{Command, DetailsPatch, RoundDetails, TourDetails, TournamentDetails};
pub use error::CoreError;
pub use membership::{accept, decline, invite, remove_player};
pub use scoring::{
    HoleEntry, ScoreUpdate, record_hole_score, record_match_result, set_player_groups,
};
pub use status::refresh_statuses;
pub use store::{Changes, EventStore, Located, Resolved, RoundHome, TournamentHome};
pub use transition::{ApplyContext, Outcome, Transition};
