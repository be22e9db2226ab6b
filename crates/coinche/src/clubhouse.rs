//! Command façade that persists after every successful mutation

use coinche_core::{Club, CoincheError, Round};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::error;

use crate::store::{Store, StoreError};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Club(#[from] CoincheError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A club bound to its store.
///
/// Commands run against the in-memory club; the store is written only when
/// the command succeeds. If the write fails the club is rolled back, so
/// memory and disk never disagree.
pub struct Clubhouse<S: Store> {
    club: Club,
    store: S,
    rng: StdRng,
}

impl<S: Store> Clubhouse<S> {
    /// Load the club from `store`. With a seed, table draws are reproducible.
    pub fn open(store: S, seed: Option<u64>) -> Result<Self, StoreError> {
        let state = store.load()?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            club: Club::from_state(state),
            store,
            rng,
        })
    }

    pub fn club(&self) -> &Club {
        &self.club
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run a mutating command and persist the result.
    pub fn execute<T, F>(&mut self, command: F) -> Result<T, CommandError>
    where
        F: FnOnce(&mut Club) -> coinche_core::Result<T>,
    {
        let before = self.club.clone();
        let value = command(&mut self.club)?;
        self.persist(before)?;
        Ok(value)
    }

    /// Draw a new round for the active session
    pub fn create_round(&mut self) -> Result<String, CommandError> {
        let before = self.club.clone();
        let round = self.club.create_round(&mut self.rng)?;
        self.persist(before)?;
        Ok(round)
    }

    /// Undo the last round; nothing is written when there was none
    pub fn undo_round(&mut self) -> Result<Option<Round>, CommandError> {
        let before = self.club.clone();
        match self.club.undo_round() {
            Some(round) => {
                self.persist(before)?;
                Ok(Some(round))
            }
            None => Ok(None),
        }
    }

    fn persist(&mut self, before: Club) -> Result<(), CommandError> {
        if let Err(e) = self.store.save(self.club.state()) {
            error!(error = %e, "save failed, rolling back");
            self.club = before;
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "clubhouse_tests.rs"]
mod clubhouse_tests;
