// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Classification of notable hole scores.

use crate::types::{HoleScore, ShoutOutKind};

/// Classifies a hole score.
///
/// A score of 1 is always a hole-in-one. Otherwise `par - score` of 1 is a
/// birdie and 2 or more is an eagle. Level par and worse produce nothing.
#[must_use]
pub fn classify_score(score: u8, par: u8) -> Option<ShoutOutKind> {
    if score == 1 {
        return Some(ShoutOutKind::HoleInOne);
    }
    match i16::from(par) - i16::from(score) {
        1 => Some(ShoutOutKind::Birdie),
        diff if diff >= 2 => Some(ShoutOutKind::Eagle),
        _ => None,
    }
}

/// Classifies a scorecard entry; unplayed holes and holes without par never
/// qualify.
#[must_use]
pub fn classify_hole(hole: &HoleScore) -> Option<ShoutOutKind> {
    match (hole.score, hole.par) {
        (Some(score), Some(par)) => classify_score(score, par),
        _ => None,
    }
}

/// Builds the display text for a shout-out.
///
/// Eagles three or more under par read as a double eagle; the kind stays
/// `Eagle`.
#[must_use]
pub fn shout_out_message(player_name: &str, hole: &HoleScore, kind: ShoutOutKind) -> String {
    let what: &str = match kind {
        ShoutOutKind::HoleInOne => "a hole-in-one",
        ShoutOutKind::Birdie => "a birdie",
        ShoutOutKind::Eagle => {
            let under: i16 = match (hole.score, hole.par) {
                (Some(score), Some(par)) => i16::from(par) - i16::from(score),
                _ => 2,
            };
            if under >= 3 { "a double eagle" } else { "an eagle" }
        }
    };
    format!("{player_name} made {what} on hole {}!", hole.hole)
}
