//! Pairing engine: deals present players onto 4-seat tables.
//!
//! Pool order is `shuffle(waitlisted) ++ shuffle(others)`, so players who sat
//! out last round are seated first. Each group of four is shuffled again
//! before being split into teams, so team composition does not depend on
//! waitlist status. Whatever does not fill a table becomes the new waitlist.
//!
//! Randomness is injected: pass a seeded `StdRng` to get reproducible draws.

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::club::Club;
use crate::error::{CoincheError, Result};
use crate::model::{PlayerId, Round, Table};
use crate::names::short_token;

/// Players per table
pub const TABLE_SEATS: usize = 4;

/// Output of one draw
#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    pub tables: Vec<Table>,
    /// Players left without a seat, in pool order
    pub leftover: Vec<PlayerId>,
}

/// Deal `present` players onto tables.
///
/// `waitlist` only decides priority; its order is discarded, and ids that are
/// not in `present` are ignored. Every table captures `loser_pays`.
pub fn deal<R: Rng + ?Sized>(
    present: &[PlayerId],
    waitlist: &[PlayerId],
    loser_pays: u32,
    rng: &mut R,
) -> Result<Deal> {
    if present.len() < TABLE_SEATS {
        return Err(CoincheError::InsufficientPlayers {
            present: present.len(),
        });
    }

    let (mut waiting, mut others): (Vec<PlayerId>, Vec<PlayerId>) = present
        .iter()
        .cloned()
        .partition(|id| waitlist.contains(id));
    waiting.shuffle(rng);
    others.shuffle(rng);

    let mut pool = waiting;
    pool.append(&mut others);

    let mut tables = Vec::with_capacity(pool.len() / TABLE_SEATS);
    let mut seats = pool.chunks_exact(TABLE_SEATS);
    for group in seats.by_ref() {
        let mut mix = group.to_vec();
        mix.shuffle(rng);
        let team_b = mix.split_off(2);
        tables.push(Table::new(mix, team_b, loser_pays));
    }
    let leftover = seats.remainder().to_vec();

    Ok(Deal { tables, leftover })
}

impl Club {
    /// Draw a new round for the active session.
    ///
    /// Fails with `InsufficientPlayers` (state untouched) when fewer than four
    /// present players remain on the roster.
    pub fn create_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<String> {
        let session = self
            .state
            .active_session()
            .ok_or_else(|| CoincheError::not_found("session", "active"))?;
        let present = self.state.present_players(session);
        let loser_pays = self.state.settings.euro_per_loss;
        let Deal { tables, leftover } = deal(&present, &session.waitlist, loser_pays, rng)?;

        let round = Round {
            id: format!("R-{}", short_token(8)),
            created_at: Utc::now(),
            tables,
            waitlist_before: session.waitlist.clone(),
            waitlist_after: leftover.clone(),
        };
        let round_id = round.id.clone();
        let tables = round.tables.len();

        let session = self
            .state
            .active_session_mut()
            .ok_or_else(|| CoincheError::not_found("session", "active"))?;
        session.rounds.push(round);
        session.waitlist = leftover;

        info!(
            session = %session.id,
            round = %round_id,
            tables,
            waiting = session.waitlist.len(),
            "round created"
        );
        Ok(round_id)
    }

    /// Remove the last round of the active session and restore its waitlist.
    ///
    /// The restored waitlist keeps only players still present. Returns the
    /// removed round, or `None` when there was nothing to undo.
    pub fn undo_round(&mut self) -> Option<Round> {
        let session = self.state.active_session_mut()?;
        let round = session.rounds.pop()?;

        let restored: Vec<PlayerId> = round
            .waitlist_before
            .iter()
            .filter(|id| session.is_present(id))
            .cloned()
            .collect();
        session.waitlist = restored;

        info!(session = %session.id, round = %round.id, "round undone");
        debug!(waitlist = ?session.waitlist, "waitlist restored");
        Some(round)
    }

    pub fn can_create_round(&self) -> bool {
        self.state
            .active_session()
            .map(|s| self.state.present_players(s).len() >= TABLE_SEATS)
            .unwrap_or(false)
    }

    pub fn can_undo_round(&self) -> bool {
        self.state
            .active_session()
            .map(|s| !s.rounds.is_empty())
            .unwrap_or(false)
    }
}

#[cfg(test)]
#[path = "pairing_tests.rs"]
mod pairing_tests;
