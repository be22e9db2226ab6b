//! Persisted club state: roster, sessions, rounds and tables.
//!
//! The serialized shape (camelCase keys, `A`/`B` team arrays) matches the
//! documents the club has been exporting for years, so old backups load as-is.
//! Every collection defaults when missing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Format version written into new documents
pub const STATE_VERSION: &str = "1.0.0";

/// Default amount each loser pays when nothing is configured
pub const DEFAULT_EURO_PER_LOSS: u32 = 5;

/// Players are referenced by their stable string id everywhere in the history
pub type PlayerId = String;

/// Complete club state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub settings: Settings,
    /// Roster, kept sorted by display name
    #[serde(default)]
    pub players: Vec<Player>,
    /// Sessions in creation order; the last one is active
    #[serde(default)]
    pub sessions: Vec<Session>,
}

fn default_version() -> String {
    STATE_VERSION.to_string()
}

impl Default for State {
    fn default() -> Self {
        Self {
            version: default_version(),
            settings: Settings::default(),
            players: Vec::new(),
            sessions: Vec::new(),
        }
    }
}

impl State {
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn has_player(&self, id: &str) -> bool {
        self.player(id).is_some()
    }

    /// Display name for a player id, `??` when the player no longer exists
    pub fn player_name(&self, id: &str) -> String {
        self.player(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "??".to_string())
    }

    pub fn session(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// The most recently created session
    pub fn active_session(&self) -> Option<&Session> {
        self.sessions.last()
    }

    pub(crate) fn active_session_mut(&mut self) -> Option<&mut Session> {
        self.sessions.last_mut()
    }

    /// Attendance of `session` restricted to players still on the roster
    pub fn present_players(&self, session: &Session) -> Vec<PlayerId> {
        session
            .attendance
            .iter()
            .filter(|id| self.has_player(id))
            .cloned()
            .collect()
    }

    /// Every table across the whole history
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.sessions
            .iter()
            .flat_map(|s| s.rounds.iter())
            .flat_map(|r| r.tables.iter())
    }
}

/// Colour theme selected by the presentation layer.
///
/// Unrecognised names in a saved document read back as `Auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    #[serde(other)]
    Auto,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Theme::Auto),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    /// Charge captured by tables created from now on
    #[serde(default = "default_euro_per_loss")]
    pub euro_per_loss: u32,
}

fn default_euro_per_loss() -> u32 {
    DEFAULT_EURO_PER_LOSS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Auto,
            euro_per_loss: DEFAULT_EURO_PER_LOSS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// One evening of play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub date: NaiveDate,
    /// Players present, in the order they were ticked
    #[serde(default)]
    pub attendance: Vec<PlayerId>,
    /// Players left over by the last round, first in line for the next one
    #[serde(default)]
    pub waitlist: Vec<PlayerId>,
    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl Session {
    pub fn is_present(&self, id: &str) -> bool {
        self.attendance.iter().any(|p| p == id)
    }

    pub fn round(&self, id: &str) -> Option<&Round> {
        self.rounds.iter().find(|r| r.id == id)
    }
}

/// One pairing pass: simultaneous tables plus the waitlist on either side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub waitlist_before: Vec<PlayerId>,
    #[serde(default)]
    pub waitlist_after: Vec<PlayerId>,
}

/// Side of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn other(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::A => write!(f, "A"),
            Team::B => write!(f, "B"),
        }
    }
}

impl std::str::FromStr for Team {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(Team::A),
            "B" | "b" => Ok(Team::B),
            other => Err(format!("unknown team: {}", other)),
        }
    }
}

/// A 2v2 match
///
/// Teams hold exactly two players when created. Deleting a player later can
/// shrink them; aggregation copes with that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(rename = "A", default)]
    pub team_a: Vec<PlayerId>,
    #[serde(rename = "B", default)]
    pub team_b: Vec<PlayerId>,
    #[serde(default)]
    pub score_a: Option<i32>,
    #[serde(default)]
    pub score_b: Option<i32>,
    #[serde(default)]
    pub winner: Option<Team>,
    /// Charge per losing player, captured when the table was created
    #[serde(default)]
    pub loser_pays_per_player: Option<u32>,
    #[serde(default)]
    pub losers_charged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
}

impl Table {
    pub fn new(team_a: Vec<PlayerId>, team_b: Vec<PlayerId>, loser_pays: u32) -> Self {
        Self {
            team_a,
            team_b,
            score_a: None,
            score_b: None,
            winner: None,
            loser_pays_per_player: Some(loser_pays),
            losers_charged_at: None,
            notes: String::new(),
        }
    }

    pub fn team(&self, team: Team) -> &[PlayerId] {
        match team {
            Team::A => &self.team_a,
            Team::B => &self.team_b,
        }
    }

    pub fn score(&self, team: Team) -> Option<i32> {
        match team {
            Team::A => self.score_a,
            Team::B => self.score_b,
        }
    }

    /// Losing side, if a winner was declared
    pub fn losers(&self) -> &[PlayerId] {
        match self.winner {
            Some(winner) => self.team(winner.other()),
            None => &[],
        }
    }

    /// All seated players, team A first
    pub fn members(&self) -> impl Iterator<Item = &PlayerId> {
        self.team_a.iter().chain(self.team_b.iter())
    }

    /// Charge per loser, falling back to `default` for legacy tables
    pub fn charge(&self, default: u32) -> u32 {
        self.loser_pays_per_player.unwrap_or(default)
    }
}

/// Reference to one table: session, round and 0-based position in the round
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub session_id: String,
    pub round_id: String,
    pub index: usize,
}

impl TableRef {
    pub fn new(session_id: impl Into<String>, round_id: impl Into<String>, index: usize) -> Self {
        Self {
            session_id: session_id.into(),
            round_id: round_id.into(),
            index,
        }
    }
}

impl std::fmt::Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/table {}", self.session_id, self.round_id, self.index + 1)
    }
}
