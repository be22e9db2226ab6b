//! Plain-text views for the terminal

use coinche_core::{Club, PairStats, PlayerStats, Team};

/// Euro amount in the French style used at the club: "12 €"
pub fn euros(amount: u64) -> String {
    format!("{} €", amount)
}

/// Percentage with a decimal comma: "66,7 %"
pub fn percent(rate: f64) -> String {
    format!("{:.1} %", rate).replace('.', ",")
}

pub fn roster(club: &Club) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== Players ({}) ===\n", club.players().len()));
    for p in club.players() {
        report.push_str(&format!("{:<24} {}\n", p.name, p.id));
    }
    report
}

pub fn stats_table(stats: &[PlayerStats]) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "{:<20} {:>5} {:>5} {:>5} {:>5} {:>8} {:>8}\n",
        "Player", "Pres", "Games", "W", "L", "Rate", "Owed"
    ));
    report.push_str(&"-".repeat(62));
    report.push('\n');
    for s in stats {
        report.push_str(&format!(
            "{:<20} {:>5} {:>5} {:>5} {:>5} {:>8} {:>8}\n",
            s.name,
            s.presence,
            s.games,
            s.wins,
            s.losses,
            percent(s.rate),
            euros(s.euros)
        ));
    }
    report
}

pub fn top_pairs(pairs: &[PairStats]) -> String {
    let mut report = String::from("=== Top pairs ===\n");
    if pairs.is_empty() {
        report.push_str("No data\n");
    }
    for p in pairs {
        report.push_str(&format!(
            "{} - {} games, {}\n",
            p.names,
            p.games,
            percent(p.rate)
        ));
    }
    report
}

/// Rounds of the active session with scores and winners
pub fn active_rounds(club: &Club) -> String {
    let Some(session) = club.active_session() else {
        return "No session yet\n".to_string();
    };
    let state = club.state();
    let names = |ids: &[String]| {
        ids.iter()
            .map(|id| state.player_name(id))
            .collect::<Vec<_>>()
            .join(" & ")
    };

    let mut report = format!("=== Session {} ({}) ===\n", session.date, session.id);
    for (n, round) in session.rounds.iter().enumerate() {
        report.push_str(&format!("Round {} [{}]\n", n + 1, round.id));
        for (t, table) in round.tables.iter().enumerate() {
            let score = |team| {
                table
                    .score(team)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string())
            };
            let winner = table
                .winner
                .map(|w| format!("  winner {}", w))
                .unwrap_or_default();
            report.push_str(&format!(
                "  Table {}: A {} ({}) vs B {} ({}){}\n",
                t + 1,
                names(&table.team_a[..]),
                score(Team::A),
                names(&table.team_b[..]),
                score(Team::B),
                winner
            ));
        }
    }

    let waiting = club.waiting_players();
    if !waiting.is_empty() {
        report.push_str(&format!("Waiting (first next round): {}\n", names(&waiting[..])));
    }
    report
}
