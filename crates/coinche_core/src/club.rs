//! The club: owner of the full state and entry point for every command.
//!
//! Commands live next to the concern they implement (`roster`, `session`,
//! `pairing`, `ledger`) as `impl Club` blocks; queries over the history live
//! in `stats`.

use tracing::info;

use crate::model::{Settings, State, Theme};

/// In-memory club state plus the commands that mutate it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Club {
    pub(crate) state: State,
}

impl Club {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a previously loaded state
    pub fn from_state(state: State) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn into_state(self) -> State {
        self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    /// Change the default loss charge. Negative values clamp to 0.
    ///
    /// Only tables created afterwards pick up the new value.
    pub fn set_euro_per_loss(&mut self, value: i64) {
        let clamped = value.clamp(0, u32::MAX as i64) as u32;
        self.state.settings.euro_per_loss = clamped;
        info!(euro_per_loss = clamped, "default loss charge changed");
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.settings.theme = theme;
    }

    /// Wipe players, sessions and settings back to a fresh state.
    pub fn clear_all_data(&mut self) {
        self.state = State::default();
        info!("all club data cleared");
    }
}

#[cfg(test)]
#[path = "club_tests.rs"]
mod club_tests;
