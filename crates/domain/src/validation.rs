// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::ids::{PlayerId, TeamId};
use crate::types::{CourseDetails, Player, Team};
use time::Date;

/// Validates that a display name is not blank.
///
/// # Arguments
///
/// * `what` - What is being named (used in the error message)
/// * `name` - The name to validate
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is empty after trimming.
pub fn validate_name(what: &str, name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(format!(
            "{what} name cannot be empty"
        )));
    }
    Ok(())
}

/// Validates that an event does not end before it starts.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if `end_date < start_date`.
pub fn validate_date_range(start_date: Date, end_date: Date) -> Result<(), DomainError> {
    if end_date < start_date {
        return Err(DomainError::InvalidDateRange {
            start_date,
            end_date,
        });
    }
    Ok(())
}

/// Validates a course layout.
///
/// # Errors
///
/// Returns an error if:
/// - The course name is empty
/// - The hole count is not between 1 and 18
/// - The course par is zero
pub fn validate_course(course: &CourseDetails) -> Result<(), DomainError> {
    validate_name("Course", &course.name)?;
    if !(1..=18).contains(&course.holes) {
        return Err(DomainError::InvalidHoleCount {
            holes: course.holes,
        });
    }
    if course.par == 0 {
        return Err(DomainError::InvalidCoursePar { par: course.par });
    }
    Ok(())
}

/// Validates that a hole number exists on a course with `holes` holes.
///
/// # Errors
///
/// Returns `DomainError::InvalidHoleNumber` if the hole is out of range.
pub fn validate_hole_number(hole: u8, holes: u8) -> Result<(), DomainError> {
    if hole == 0 || hole > holes {
        return Err(DomainError::InvalidHoleNumber { hole, holes });
    }
    Ok(())
}

/// Validates a per-hole stroke count or par.
///
/// # Errors
///
/// Returns `DomainError::InvalidStrokeCount` for zero.
pub fn validate_strokes(value: u8) -> Result<(), DomainError> {
    if value == 0 {
        return Err(DomainError::InvalidStrokeCount { value });
    }
    Ok(())
}

/// Validates match-play points.
///
/// # Errors
///
/// Returns `DomainError::InvalidMatchPoints` for negative or non-finite values.
pub fn validate_match_points(points: f64) -> Result<(), DomainError> {
    if !points.is_finite() || points < 0.0 {
        return Err(DomainError::InvalidMatchPoints(format!(
            "{points} is not a non-negative number"
        )));
    }
    Ok(())
}

/// Validates that a team name is unique within an event (case-insensitive).
///
/// # Errors
///
/// Returns `DomainError::DuplicateTeamName` if another team has the name.
pub fn validate_team_name_unique(name: &str, teams: &[Team]) -> Result<(), DomainError> {
    let wanted: String = name.trim().to_lowercase();
    if teams.iter().any(|t| t.name.trim().to_lowercase() == wanted) {
        return Err(DomainError::DuplicateTeamName(name.trim().to_string()));
    }
    Ok(())
}

/// Validates that `captain` is currently a member of `team_id`.
///
/// # Errors
///
/// Returns an error if:
/// - The team does not exist
/// - The player is not enrolled or is on another team
pub fn validate_captain(
    team_id: &TeamId,
    captain: &PlayerId,
    teams: &[Team],
    players: &[Player],
) -> Result<(), DomainError> {
    if !teams.iter().any(|t| &t.id == team_id) {
        return Err(DomainError::TeamNotFound(team_id.clone()));
    }
    let on_team: bool = players
        .iter()
        .any(|p| &p.id == captain && p.team_id.as_ref() == Some(team_id));
    if !on_team {
        return Err(DomainError::InvalidCaptain {
            team_id: team_id.clone(),
            player_id: captain.clone(),
        });
    }
    Ok(())
}
