// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::store::{EventStore, RoundHome};
use fairway_domain::{
    DomainError, Event, EventId, HoleScore, MatchResult, PlayerGroup, PlayerId, Roster, Round,
    ShoutOut, ShoutOutKind, classify_hole, shout_out_message, validate_hole_number,
    validate_match_points, validate_strokes,
};
use time::OffsetDateTime;

/// A score update for a single hole.
///
/// `par` and `notes` are only overwritten when supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoleEntry {
    pub hole: u8,
    pub score: Option<u8>,
    pub par: Option<u8>,
    pub notes: Option<String>,
}

/// Result of [`record_hole_score`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreUpdate {
    /// The round does not exist or the player has no scorecard in it.
    NotFound,
    /// The hole was written; carries the shout-out it earned, if any.
    Recorded(Option<ShoutOut>),
}

/// Records a hole score and detects any shout-out it earns.
///
/// The shout-out is stored on the event that owns the round: the
/// tournament for tournament rounds, the tour for tour rounds, and the
/// round itself when standalone. Re-recording a hole replaces the
/// shout-out for that hole, so a corrected score never leaves a stale one
/// behind.
///
/// # Errors
///
/// Returns an error if:
/// - The hole number is outside the round's course
/// - The score or par is zero
/// - The write-back fails
pub fn record_hole_score(
    store: &mut EventStore,
    round_id: &EventId,
    player_id: &PlayerId,
    entry: &HoleEntry,
    now: OffsetDateTime,
) -> Result<ScoreUpdate, CoreError> {
    let Some(mut resolved) = store.resolve_round(round_id) else {
        return Ok(ScoreUpdate::NotFound);
    };

    validate_hole_number(entry.hole, resolved.value.hole_count())?;
    if let Some(score) = entry.score {
        validate_strokes(score)?;
    }
    if let Some(par) = entry.par {
        validate_strokes(par)?;
    }

    let name: String = player_name(store, &resolved.value, &resolved.home, player_id);
    let Some(card) = resolved.value.scores.get_mut(player_id) else {
        return Ok(ScoreUpdate::NotFound);
    };
    let hole: HoleScore = upsert_hole(card, entry);

    let owner_id: EventId = resolved.home.owner(round_id).clone();
    let home: RoundHome = resolved.home.clone();
    let shout_out: Option<ShoutOut> = classify_hole(&hole).map(|kind: ShoutOutKind| ShoutOut {
        id: format!("{round_id}:{player_id}:{}", hole.hole),
        event_id: owner_id,
        player_id: player_id.clone(),
        round_id: round_id.clone(),
        hole_number: hole.hole,
        kind,
        message: shout_out_message(&name, &hole, kind),
        timestamp: now,
    });

    store.write_back_round(resolved)?;
    attach_shout_out(store, &home, round_id, player_id, hole.hole, shout_out.clone())?;
    Ok(ScoreUpdate::Recorded(shout_out))
}

/// Upserts a player's match-play result, creating the results map if the
/// round has none yet.
///
/// Returns `false` if the round does not exist or the player has no
/// scorecard in it.
///
/// # Errors
///
/// Returns an error if the points are negative or not finite, or if the
/// write-back fails.
pub fn record_match_result(
    store: &mut EventStore,
    round_id: &EventId,
    player_id: &PlayerId,
    result: MatchResult,
) -> Result<bool, CoreError> {
    validate_match_points(result.points)?;
    let Some(mut resolved) = store.resolve_round(round_id) else {
        return Ok(false);
    };
    if !resolved.value.scores.contains_key(player_id) {
        return Ok(false);
    }
    resolved
        .value
        .match_results
        .get_or_insert_with(Default::default)
        .insert(player_id.clone(), result);
    store.write_back_round(resolved)
}

/// Replaces a round's playing groups.
///
/// Returns `false` if the round does not exist.
///
/// # Errors
///
/// Returns `DomainError::PlayerNotEnrolled` if a grouped player has no
/// scorecard in the round.
pub fn set_player_groups(
    store: &mut EventStore,
    round_id: &EventId,
    groups: Vec<PlayerGroup>,
) -> Result<bool, CoreError> {
    let Some(mut resolved) = store.resolve_round(round_id) else {
        return Ok(false);
    };
    for group in &groups {
        if let Some(stranger) = group
            .player_ids
            .iter()
            .find(|id| !resolved.value.scores.contains_key(*id))
        {
            return Err(DomainError::PlayerNotEnrolled(stranger.clone()).into());
        }
    }
    resolved.value.player_groups = groups;
    store.write_back_round(resolved)
}

/// Writes `entry` into the card, keeping holes in order. Returns the
/// resulting hole.
fn upsert_hole(card: &mut Vec<HoleScore>, entry: &HoleEntry) -> HoleScore {
    let position: Result<usize, usize> = card.binary_search_by_key(&entry.hole, |h| h.hole);
    let index: usize = match position {
        Ok(index) => index,
        Err(index) => {
            card.insert(index, HoleScore::unplayed(entry.hole, None));
            index
        }
    };
    let slot: &mut HoleScore = &mut card[index];
    slot.score = entry.score;
    if entry.par.is_some() {
        slot.par = entry.par;
    }
    if entry.notes.is_some() {
        slot.notes.clone_from(&entry.notes);
    }
    slot.clone()
}

/// Display name for a player: the round's own roster first, then the
/// owning event's, then the bare id.
fn player_name(
    store: &EventStore,
    round: &Round,
    home: &RoundHome,
    player_id: &PlayerId,
) -> String {
    let owner_roster: Option<&dyn Roster> = match home {
        RoundHome::Standalone => None,
        RoundHome::InTour { tour_id, .. } => store.tour(tour_id).map(|t| t as &dyn Roster),
        RoundHome::InTournament { tournament_id, .. } => {
            store.tournament(tournament_id).map(|t| t as &dyn Roster)
        }
    };
    round
        .player(player_id)
        .or_else(|| owner_roster.and_then(|roster| roster.player(player_id)))
        .map_or_else(|| player_id.to_string(), |p| p.name.clone())
}

/// Swaps whatever shout-out the owner holds for this hole with `shout_out`.
fn attach_shout_out(
    store: &mut EventStore,
    home: &RoundHome,
    round_id: &EventId,
    player_id: &PlayerId,
    hole: u8,
    shout_out: Option<ShoutOut>,
) -> Result<(), CoreError> {
    match home {
        RoundHome::Standalone => {
            if let Some(mut resolved) = store.resolve_round(round_id) {
                let shout_outs: &mut Vec<ShoutOut> = &mut resolved.value.shout_outs;
                if swap_shout_out(shout_outs, round_id, player_id, hole, shout_out) {
                    store.write_back_round(resolved)?;
                }
            }
        }
        RoundHome::InTournament { tournament_id, .. } => {
            if let Some(mut resolved) = store.resolve_tournament(tournament_id) {
                let shout_outs: &mut Vec<ShoutOut> = &mut resolved.value.shout_outs;
                if swap_shout_out(shout_outs, round_id, player_id, hole, shout_out) {
                    store.write_back_tournament(resolved)?;
                }
            }
        }
        RoundHome::InTour { tour_id, .. } => {
            if let Some(mut tour) = store.tour(tour_id).cloned() {
                if swap_shout_out(&mut tour.shout_outs, round_id, player_id, hole, shout_out) {
                    store.replace(Event::Tour(tour))?;
                }
            }
        }
    }
    Ok(())
}

fn swap_shout_out(
    shout_outs: &mut Vec<ShoutOut>,
    round_id: &EventId,
    player_id: &PlayerId,
    hole: u8,
    shout_out: Option<ShoutOut>,
) -> bool {
    let before: usize = shout_outs.len();
    shout_outs.retain(|s| {
        !(&s.round_id == round_id && &s.player_id == player_id && s.hole_number == hole)
    });
    let removed: bool = shout_outs.len() != before;
    match shout_out {
        Some(shout_out) => {
            shout_outs.push(shout_out);
            true
        }
        None => removed,
    }
}
