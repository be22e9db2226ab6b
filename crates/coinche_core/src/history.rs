//! Mutable traversal over the session history tree.
//!
//! Sessions own rounds, rounds own tables, tables own team arrays. Rewrites
//! that must reach every reference (player deletion, roster reset) implement
//! [`HistoryVisitor`] and run through [`walk_mut`] so no level is skipped.

use crate::model::{PlayerId, Round, Session, Table};

/// Callbacks invoked for each node of the history, parents before children.
pub trait HistoryVisitor {
    fn visit_session(&mut self, _session: &mut Session) {}

    fn visit_round(&mut self, _round: &mut Round) {}

    fn visit_table(&mut self, _table: &mut Table) {}
}

/// Walk every session, round and table in order.
pub fn walk_mut<V: HistoryVisitor + ?Sized>(sessions: &mut [Session], visitor: &mut V) {
    for session in sessions.iter_mut() {
        visitor.visit_session(session);
        for round in session.rounds.iter_mut() {
            visitor.visit_round(round);
            for table in round.tables.iter_mut() {
                visitor.visit_table(table);
            }
        }
    }
}

/// Removes one player id from attendance, waitlists, round snapshots and
/// team arrays. Tables are kept even when a team shrinks.
pub struct PurgePlayer<'a> {
    pub id: &'a str,
    /// Number of references removed
    pub removed: usize,
}

impl<'a> PurgePlayer<'a> {
    pub fn new(id: &'a str) -> Self {
        Self { id, removed: 0 }
    }

    fn strip(&mut self, ids: &mut Vec<PlayerId>) {
        let before = ids.len();
        ids.retain(|p| p != self.id);
        self.removed += before - ids.len();
    }
}

impl HistoryVisitor for PurgePlayer<'_> {
    fn visit_session(&mut self, session: &mut Session) {
        self.strip(&mut session.attendance);
        self.strip(&mut session.waitlist);
    }

    fn visit_round(&mut self, round: &mut Round) {
        self.strip(&mut round.waitlist_before);
        self.strip(&mut round.waitlist_after);
    }

    fn visit_table(&mut self, table: &mut Table) {
        self.strip(&mut table.team_a);
        self.strip(&mut table.team_b);
    }
}

/// Empties every attendance set; rounds and tables are left alone.
pub struct ClearAttendance;

impl HistoryVisitor for ClearAttendance {
    fn visit_session(&mut self, session: &mut Session) {
        session.attendance.clear();
    }
}

/// Read-only check used by tests and debug assertions: does any node still
/// mention `id`?
pub fn references(sessions: &[Session], id: &str) -> bool {
    sessions.iter().any(|s| {
        s.attendance.iter().any(|p| p == id)
            || s.waitlist.iter().any(|p| p == id)
            || s.rounds.iter().any(|r| {
                r.waitlist_before.iter().any(|p| p == id)
                    || r.waitlist_after.iter().any(|p| p == id)
                    || r.tables.iter().any(|t| t.members().any(|p| p == id))
            })
    })
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
