//! Statistics over the full session history.
//!
//! Everything here is recomputed from scratch on each call; the history is
//! small enough that a full rescan is cheap.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::club::Club;
use crate::model::{PlayerId, State};
use crate::names::collate;

/// Number of partnerships reported by [`Club::pair_frequency`]
pub const TOP_PAIRS: usize = 6;

/// Aggregated record of one player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStats {
    pub id: PlayerId,
    pub name: String,
    /// Sessions attended
    pub presence: u32,
    /// Tables played
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    /// Money owed for losses
    pub euros: u64,
    /// Win percentage, one decimal
    pub rate: f64,
}

impl PlayerStats {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            presence: 0,
            games: 0,
            wins: 0,
            losses: 0,
            euros: 0,
            rate: 0.0,
        }
    }
}

/// Ranking orders offered to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsSort {
    #[default]
    Name,
    /// Most wins first, then least owed, then name
    Wins,
    /// Best rate first, then most wins, least owed, name
    Rate,
    /// Least owed first, then most wins, then name
    Euros,
}

impl std::str::FromStr for StatsSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(StatsSort::Name),
            "wins" => Ok(StatsSort::Wins),
            "rate" => Ok(StatsSort::Rate),
            "euros" | "money" => Ok(StatsSort::Euros),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

impl StatsSort {
    pub fn compare(self, a: &PlayerStats, b: &PlayerStats) -> Ordering {
        let by_name = || collate(&a.name, &b.name);
        match self {
            StatsSort::Name => by_name(),
            StatsSort::Wins => b
                .wins
                .cmp(&a.wins)
                .then(a.euros.cmp(&b.euros))
                .then_with(by_name),
            StatsSort::Rate => b
                .rate
                .total_cmp(&a.rate)
                .then(b.wins.cmp(&a.wins))
                .then(a.euros.cmp(&b.euros))
                .then_with(by_name),
            StatsSort::Euros => a
                .euros
                .cmp(&b.euros)
                .then(b.wins.cmp(&a.wins))
                .then_with(by_name),
        }
    }
}

/// A frequent partnership
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairStats {
    pub players: (PlayerId, PlayerId),
    /// "Name1 & Name2"
    pub names: String,
    pub games: u32,
    pub wins: u32,
    pub rate: f64,
}

/// Percentage rounded to one decimal place, 0 when `total` is 0
pub fn win_rate(wins: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (1000.0 * wins as f64 / total as f64).round() / 10.0
}

/// Per-player aggregates for everyone on the roster with any activity.
///
/// Ids in the history that no longer map to a roster player are ignored.
pub fn compute_stats(state: &State) -> Vec<PlayerStats> {
    let mut by_id: HashMap<&str, PlayerStats> = state
        .players
        .iter()
        .map(|p| (p.id.as_str(), PlayerStats::new(&p.id, &p.name)))
        .collect();
    let default_charge = state.settings.euro_per_loss;

    for session in &state.sessions {
        for id in &session.attendance {
            if let Some(s) = by_id.get_mut(id.as_str()) {
                s.presence += 1;
            }
        }
        for table in session.rounds.iter().flat_map(|r| r.tables.iter()) {
            for id in table.members() {
                if let Some(s) = by_id.get_mut(id.as_str()) {
                    s.games += 1;
                }
            }
            let Some(winner) = table.winner else {
                continue;
            };
            for id in table.team(winner) {
                if let Some(s) = by_id.get_mut(id.as_str()) {
                    s.wins += 1;
                }
            }
            let charge = table.charge(default_charge) as u64;
            for id in table.team(winner.other()) {
                if let Some(s) = by_id.get_mut(id.as_str()) {
                    s.losses += 1;
                    s.euros += charge;
                }
            }
        }
    }

    // Roster order keeps the output stable before any explicit sort
    state
        .players
        .iter()
        .filter_map(|p| by_id.remove(p.id.as_str()))
        .filter(|s| s.games > 0 || s.presence > 0)
        .map(|mut s| {
            s.rate = win_rate(s.wins, s.games);
            s
        })
        .collect()
}

/// Most frequent two-player teams, by games then win rate.
///
/// Teams shrunk below two players by a deletion are not counted.
pub fn pair_frequency(state: &State) -> Vec<PairStats> {
    let mut counts: BTreeMap<(&str, &str), (u32, u32)> = BTreeMap::new();
    for table in state.tables() {
        for team in [crate::model::Team::A, crate::model::Team::B] {
            let members = table.team(team);
            if members.len() != 2 {
                continue;
            }
            let (a, b) = (members[0].as_str(), members[1].as_str());
            let key = if a <= b { (a, b) } else { (b, a) };
            let entry = counts.entry(key).or_insert((0, 0));
            entry.0 += 1;
            if table.winner == Some(team) {
                entry.1 += 1;
            }
        }
    }

    let mut pairs: Vec<PairStats> = counts
        .into_iter()
        .map(|((a, b), (games, wins))| PairStats {
            players: (a.to_string(), b.to_string()),
            names: format!("{} & {}", state.player_name(a), state.player_name(b)),
            games,
            wins,
            rate: win_rate(wins, games),
        })
        .collect();
    pairs.sort_by(|x, y| y.games.cmp(&x.games).then(y.rate.total_cmp(&x.rate)));
    pairs.truncate(TOP_PAIRS);
    pairs
}

/// Total owed by all losers across the history.
///
/// Counts the losing members still seated, so a deleted loser no longer pays.
pub fn total_pot(state: &State) -> u64 {
    let default_charge = state.settings.euro_per_loss;
    state
        .tables()
        .filter(|t| t.winner.is_some())
        .map(|t| t.charge(default_charge) as u64 * t.losers().len() as u64)
        .sum()
}

impl Club {
    /// Player statistics in the requested order
    pub fn stats(&self, sort: StatsSort) -> Vec<PlayerStats> {
        let mut list = compute_stats(&self.state);
        list.sort_by(|a, b| sort.compare(a, b));
        list
    }

    pub fn pair_frequency(&self) -> Vec<PairStats> {
        pair_frequency(&self.state)
    }

    pub fn total_pot(&self) -> u64 {
        total_pot(&self.state)
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod stats_tests;
