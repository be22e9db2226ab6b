//! Roster store: uniquely named players kept in display order.

use chrono::Utc;
use tracing::{debug, info};

use crate::club::Club;
use crate::error::{CoincheError, Result};
use crate::history::{walk_mut, ClearAttendance, PurgePlayer};
use crate::model::{Player, PlayerId};
use crate::names::{collate, player_id, same_name};

impl Club {
    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    /// Add a player and return its generated id.
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoincheError::EmptyName);
        }
        self.check_name_free(name, None)?;

        let mut id = player_id(name);
        while self.state.has_player(&id) {
            id = player_id(name);
        }

        self.state.players.push(Player {
            id: id.clone(),
            name: name.to_string(),
            created_at: Utc::now(),
        });
        self.sort_roster();
        info!(player = %id, name, "player added");
        Ok(id)
    }

    pub fn rename_player(&mut self, id: &str, new_name: &str) -> Result<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(CoincheError::EmptyName);
        }
        let idx = self
            .state
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoincheError::not_found("player", id))?;
        self.check_name_free(new_name, Some(id))?;

        self.state.players[idx].name = new_name.to_string();
        self.sort_roster();
        info!(player = id, name = new_name, "player renamed");
        Ok(())
    }

    /// Remove a player and every reference to it in the history.
    ///
    /// Tables survive with a shorter team. Irreversible.
    pub fn delete_player(&mut self, id: &str) -> Result<()> {
        let idx = self
            .state
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoincheError::not_found("player", id))?;
        self.state.players.remove(idx);

        let mut purge = PurgePlayer::new(id);
        walk_mut(&mut self.state.sessions, &mut purge);
        info!(player = id, references = purge.removed, "player deleted");
        Ok(())
    }

    /// Drop every player and clear attendance in all sessions.
    ///
    /// Rounds and tables are kept as history.
    pub fn reset_roster(&mut self) {
        let count = self.state.players.len();
        self.state.players.clear();
        walk_mut(&mut self.state.sessions, &mut ClearAttendance);
        info!(removed = count, "roster reset");
    }

    fn check_name_free(&self, name: &str, except: Option<&str>) -> Result<()> {
        let clash = self
            .state
            .players
            .iter()
            .any(|p| Some(p.id.as_str()) != except && same_name(&p.name, name));
        if clash {
            debug!(name, "rejected duplicate name");
            return Err(CoincheError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    pub(crate) fn sort_roster(&mut self) {
        self.state.players.sort_by(|a, b| collate(&a.name, &b.name));
    }
}

#[cfg(test)]
#[path = "roster_tests.rs"]
mod roster_tests;
