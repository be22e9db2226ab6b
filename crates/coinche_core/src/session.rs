//! Sessions and attendance.
//!
//! The active session is simply the last one created. Older sessions stay
//! readable for statistics but refuse attendance changes.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::club::Club;
use crate::error::{CoincheError, Result};
use crate::model::{PlayerId, Session};
use crate::names::short_token;

impl Club {
    pub fn sessions(&self) -> &[Session] {
        &self.state.sessions
    }

    pub fn active_session(&self) -> Option<&Session> {
        self.state.active_session()
    }

    /// Start a new session (today when `date` is `None`) and make it active.
    ///
    /// Several sessions may share a date.
    pub fn create_session(&mut self, date: Option<NaiveDate>) -> String {
        let date = date.unwrap_or_else(|| Utc::now().date_naive());
        let id = format!("S-{}-{}", date.format("%Y-%m-%d"), short_token(4));
        self.state.sessions.push(Session {
            id: id.clone(),
            date,
            attendance: Vec::new(),
            waitlist: Vec::new(),
            rounds: Vec::new(),
        });
        info!(session = %id, %date, "session created");
        id
    }

    /// Mark a player present or absent in the active session.
    ///
    /// Marking absent also drops the player from the waitlist. An id missing
    /// from the roster can still be marked absent if the session lists it.
    pub fn set_attendance(&mut self, session_id: &str, player_id: &str, present: bool) -> Result<()> {
        let known = self.state.has_player(player_id);
        if present && !known {
            return Err(CoincheError::not_found("player", player_id));
        }
        let session = self.active_session_for(session_id)?;
        if !known && !session.is_present(player_id) {
            return Err(CoincheError::not_found("player", player_id));
        }

        if present {
            if !session.is_present(player_id) {
                session.attendance.push(player_id.to_string());
            }
        } else {
            session.attendance.retain(|p| p != player_id);
            session.waitlist.retain(|p| p != player_id);
        }
        debug!(session = session_id, player = player_id, present, "attendance updated");
        Ok(())
    }

    /// Present players of the given session (attendance minus deleted players)
    pub fn present_players(&self, session_id: &str) -> Result<Vec<PlayerId>> {
        let session = self
            .state
            .session(session_id)
            .ok_or_else(|| CoincheError::not_found("session", session_id))?;
        Ok(self.state.present_players(session))
    }

    /// The active session's waitlist restricted to present players, in order
    pub fn waiting_players(&self) -> Vec<PlayerId> {
        match self.state.active_session() {
            Some(s) => s
                .waitlist
                .iter()
                .filter(|id| s.is_present(id))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Resolve `session_id` to the active session, rejecting older sessions.
    pub(crate) fn active_session_for(&mut self, session_id: &str) -> Result<&mut Session> {
        if self.state.session(session_id).is_none() {
            return Err(CoincheError::not_found("session", session_id));
        }
        match self.state.active_session_mut() {
            Some(s) if s.id == session_id => Ok(s),
            _ => Err(CoincheError::InactiveSession(session_id.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
