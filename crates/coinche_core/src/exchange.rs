//! Backup export and import.
//!
//! JSON carries the full state; CSV flattens the table history, one row per
//! table. Imports are validated and built completely before the club state
//! is swapped, so a rejected document leaves everything untouched.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::club::Club;
use crate::error::{CoincheError, Result};
use crate::model::{Player, Session, Settings, State, Theme};
use crate::names::{collate, same_name};

const CSV_HEADER: [&str; 10] = [
    "SessionID",
    "Date",
    "RoundID",
    "Table",
    "TeamA",
    "TeamB",
    "ScoreA",
    "ScoreB",
    "Winner",
    "LosersEuroEach",
];

/// How an imported document combines with the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPolicy {
    /// Discard the current state
    Replace,
    /// Union players and sessions by id; imported entries win on collision
    Merge,
}

/// Settings keys present in an imported document
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsPatch {
    theme: Option<Theme>,
    euro_per_loss: Option<u32>,
}

impl SettingsPatch {
    fn apply(self, settings: &mut Settings) {
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if let Some(euro) = self.euro_per_loss {
            settings.euro_per_loss = euro;
        }
    }
}

/// Parse and validate an import document.
///
/// Non-JSON or non-object input is `InvalidFormat`; an object without
/// `players` or `sessions` is `MissingFields`.
pub fn parse_document(text: &str) -> Result<Value> {
    let doc: Value =
        serde_json::from_str(text).map_err(|e| CoincheError::InvalidFormat(e.to_string()))?;
    let obj = doc
        .as_object()
        .ok_or_else(|| CoincheError::InvalidFormat("expected a JSON object".to_string()))?;

    let missing: Vec<&str> = ["players", "sessions"]
        .into_iter()
        .filter(|key| obj.get(*key).map_or(true, Value::is_null))
        .collect();
    if !missing.is_empty() {
        return Err(CoincheError::MissingFields(missing.join(", ")));
    }
    Ok(doc)
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| CoincheError::InvalidFormat(e.to_string()))
}

/// Names must stay distinct once accents and case are ignored
fn check_unique_names(players: &[Player]) -> Result<()> {
    for (i, p) in players.iter().enumerate() {
        if players[i + 1..]
            .iter()
            .any(|q| q.id != p.id && same_name(&q.name, &p.name))
        {
            return Err(CoincheError::DuplicateName(p.name.clone()));
        }
    }
    Ok(())
}

/// Combine `current` with an imported state.
fn merge(current: &State, doc: &Value, incoming: State) -> Result<State> {
    let mut players: Vec<Player> = current.players.clone();
    for p in incoming.players {
        match players.iter_mut().find(|q| q.id == p.id) {
            Some(slot) => *slot = p,
            None => players.push(p),
        }
    }
    players.sort_by(|a, b| collate(&a.name, &b.name));

    let mut sessions: Vec<Session> = current.sessions.clone();
    for s in incoming.sessions {
        match sessions.iter_mut().find(|q| q.id == s.id) {
            Some(slot) => *slot = s,
            None => sessions.push(s),
        }
    }
    // Stable: same-date sessions keep their relative order
    sessions.sort_by(|a, b| a.date.cmp(&b.date));

    let mut settings = current.settings.clone();
    if let Some(patch) = doc.get("settings").filter(|v| !v.is_null()) {
        decode::<SettingsPatch>(patch.clone())?.apply(&mut settings);
    }

    let version = doc
        .get("version")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| current.version.clone());

    Ok(State {
        version,
        settings,
        players,
        sessions,
    })
}

/// One CSV field, always quoted
fn csv_field(value: impl ToString) -> String {
    format!("\"{}\"", value.to_string().replace('"', "\"\""))
}

fn csv_row<I, T>(fields: I) -> String
where
    I: IntoIterator<Item = T>,
    T: ToString,
{
    fields.into_iter().map(|f| csv_field(f)).collect::<Vec<_>>().join(",")
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl Club {
    /// Full state as pretty-printed JSON
    pub fn export_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.state)
            .map_err(|e| CoincheError::Serialization(e.to_string()))
    }

    /// Table history as CSV, one row per table
    pub fn export_csv(&self) -> String {
        let state = &self.state;
        let names = |ids: &[String]| {
            ids.iter()
                .map(|id| state.player_name(id))
                .collect::<Vec<_>>()
                .join(" & ")
        };

        let mut rows = vec![csv_row(CSV_HEADER)];
        for session in &state.sessions {
            for round in &session.rounds {
                for (idx, table) in round.tables.iter().enumerate() {
                    rows.push(csv_row([
                        session.id.clone(),
                        session.date.to_string(),
                        round.id.clone(),
                        format!("Table {}", idx + 1),
                        names(&table.team_a[..]),
                        names(&table.team_b[..]),
                        opt(table.score_a),
                        opt(table.score_b),
                        opt(table.winner),
                        table.charge(state.settings.euro_per_loss).to_string(),
                    ]));
                }
            }
        }

        let mut out = rows.join("\n");
        out.push('\n');
        out
    }

    /// Import a JSON document under the given policy.
    ///
    /// On any error the current state is left exactly as it was.
    pub fn import_json(&mut self, text: &str, policy: ImportPolicy) -> Result<()> {
        let doc = parse_document(text)?;
        let incoming: State = decode(doc.clone())?;

        let next = match policy {
            ImportPolicy::Replace => incoming,
            ImportPolicy::Merge => merge(&self.state, &doc, incoming)?,
        };
        check_unique_names(&next.players)?;

        info!(
            ?policy,
            players = next.players.len(),
            sessions = next.sessions.len(),
            "import applied"
        );
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
#[path = "exchange_tests.rs"]
mod exchange_tests;
