//! Outcome ledger: scores, declared winners and notes per table.
//!
//! Scores and winner are independent: a winner may be declared that
//! contradicts the scores. The loss charge is never overwritten once set.

use chrono::Utc;
use tracing::info;

use crate::club::Club;
use crate::error::{CoincheError, Result};
use crate::model::{Table, TableRef, Team};

impl Club {
    pub fn table(&self, at: &TableRef) -> Result<&Table> {
        let session = self
            .state
            .session(&at.session_id)
            .ok_or_else(|| CoincheError::not_found("session", at.session_id.as_str()))?;
        let round = session
            .round(&at.round_id)
            .ok_or_else(|| CoincheError::not_found("round", at.round_id.as_str()))?;
        round
            .tables
            .get(at.index)
            .ok_or_else(|| CoincheError::not_found("table", at.to_string()))
    }

    fn table_mut(&mut self, at: &TableRef) -> Result<&mut Table> {
        let session = self
            .state
            .sessions
            .iter_mut()
            .find(|s| s.id == at.session_id)
            .ok_or_else(|| CoincheError::not_found("session", at.session_id.as_str()))?;
        let round = session
            .rounds
            .iter_mut()
            .find(|r| r.id == at.round_id)
            .ok_or_else(|| CoincheError::not_found("round", at.round_id.as_str()))?;
        round
            .tables
            .get_mut(at.index)
            .ok_or_else(|| CoincheError::not_found("table", at.to_string()))
    }

    /// Store or clear (`None`) a team's score.
    pub fn set_score(&mut self, at: &TableRef, team: Team, value: Option<i32>) -> Result<()> {
        let table = self.table_mut(at)?;
        match team {
            Team::A => table.score_a = value,
            Team::B => table.score_b = value,
        }
        Ok(())
    }

    /// Declare the winner of a table.
    ///
    /// Declaring the current winner again clears it, as does `None`. The first
    /// declaration stamps `losers_charged_at`; clearing removes the stamp.
    /// Returns the winner now in effect.
    pub fn set_winner(&mut self, at: &TableRef, team: Option<Team>) -> Result<Option<Team>> {
        let default_charge = self.state.settings.euro_per_loss;
        let table = self.table_mut(at)?;

        table.winner = match team {
            Some(t) if table.winner == Some(t) => None,
            other => other,
        };
        match table.winner {
            Some(_) => {
                if table.losers_charged_at.is_none() {
                    table.losers_charged_at = Some(Utc::now());
                }
                table.loser_pays_per_player.get_or_insert(default_charge);
            }
            None => table.losers_charged_at = None,
        }

        let winner = table.winner;
        info!(table = %at, winner = ?winner, "winner updated");
        Ok(winner)
    }

    pub fn set_notes(&mut self, at: &TableRef, notes: &str) -> Result<()> {
        self.table_mut(at)?.notes = notes.to_string();
        Ok(())
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod ledger_tests;
