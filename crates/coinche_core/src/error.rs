//! Error kinds reported by club commands.
//!
//! Every command validates its inputs before touching state, so an `Err`
//! always means nothing was changed.

use thiserror::Error;

/// Errors returned by roster, session, pairing, ledger and import commands.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoincheError {
    /// Another player already uses this name (case and accents ignored)
    #[error("name already used: {0}")]
    DuplicateName(String),

    #[error("name is empty")]
    EmptyName,

    /// Unknown player, session, round or table
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("at least 4 present players are required, found {present}")]
    InsufficientPlayers { present: usize },

    /// Only the most recent session accepts attendance and round changes
    #[error("session {0} is not the active session")]
    InactiveSession(String),

    #[error("invalid import document: {0}")]
    InvalidFormat(String),

    #[error("import document is missing required fields: {0}")]
    MissingFields(String),

    #[error("failed to serialize: {0}")]
    Serialization(String),
}

impl CoincheError {
    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoincheError>;
