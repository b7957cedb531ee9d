// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared membership accessors for events that hold players.

use crate::ids::{Email, PlayerId};
use crate::types::{Player, Round, Team, Tour, Tournament};

/// An event with enrolled players and pending invitations.
pub trait Roster {
    /// Enrolled players.
    fn players(&self) -> &[Player];
    /// Mutable access to the enrolled players.
    fn players_mut(&mut self) -> &mut Vec<Player>;
    /// Pending invitations.
    fn invitations(&self) -> &[Email];
    /// Mutable access to the pending invitations.
    fn invitations_mut(&mut self) -> &mut Vec<Email>;

    /// Looks up an enrolled player by id.
    fn player(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players().iter().find(|p| &p.id == player_id)
    }

    /// Returns whether a player with this id is enrolled.
    fn has_player(&self, player_id: &PlayerId) -> bool {
        self.player(player_id).is_some()
    }

    /// Returns whether a player with this email is enrolled.
    fn has_player_email(&self, email: &Email) -> bool {
        self.players().iter().any(|p| &p.email == email)
    }

    /// Returns whether this email has a pending invitation.
    fn is_invited(&self, email: &Email) -> bool {
        self.invitations().contains(email)
    }
}

/// An event that also organizes its players into teams.
pub trait TeamRoster: Roster {
    /// The event's teams.
    fn teams(&self) -> &[Team];
    /// Mutable access to the event's teams.
    fn teams_mut(&mut self) -> &mut Vec<Team>;
}

macro_rules! impl_roster {
    ($ty:ty) => {
        impl Roster for $ty {
            fn players(&self) -> &[Player] {
                &self.players
            }

            fn players_mut(&mut self) -> &mut Vec<Player> {
                &mut self.players
            }

            fn invitations(&self) -> &[Email] {
                &self.invitations
            }

            fn invitations_mut(&mut self) -> &mut Vec<Email> {
                &mut self.invitations
            }
        }
    };
}

impl_roster!(Tournament);
impl_roster!(Tour);
impl_roster!(Round);

impl TeamRoster for Tournament {
    fn teams(&self) -> &[Team] {
        &self.teams
    }

    fn teams_mut(&mut self) -> &mut Vec<Team> {
        &mut self.teams
    }
}

impl TeamRoster for Tour {
    fn teams(&self) -> &[Team] {
        &self.teams
    }

    fn teams_mut(&mut self) -> &mut Vec<Team> {
        &mut self.teams
    }
}
