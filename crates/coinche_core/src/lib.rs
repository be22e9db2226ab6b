//! Bookkeeping engine for recurring coinche sessions
//!
//! This crate provides:
//! - A roster of uniquely named players
//! - Sessions with attendance and a waitlist
//! - Random 2v2 table draws that seat waitlisted players first
//! - Per-table scores, winners and loss charges
//! - Statistics recomputed from the full history (wins, rate, money owed,
//!   frequent partnerships, total pot)
//! - JSON backup/restore and a flat CSV export of all tables
//!
//! # Usage
//!
//! ```
//! use coinche_core::{Club, StatsSort};
//! use rand::SeedableRng;
//!
//! let mut club = Club::new();
//! let session = club.create_session(None);
//! for name in ["Alexandre", "Marie", "Paul", "Luc", "Sophie"] {
//!     let id = club.add_player(name).unwrap();
//!     club.set_attendance(&session, &id, true).unwrap();
//! }
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! club.create_round(&mut rng).unwrap();
//! assert_eq!(club.waiting_players().len(), 1);
//! let ranking = club.stats(StatsSort::Wins);
//! assert_eq!(ranking.len(), 5);
//! ```

mod club;
mod error;
mod exchange;
pub mod history;
mod ledger;
mod model;
pub mod names;
mod pairing;
mod roster;
mod session;
mod stats;

pub use club::*;
pub use error::*;
pub use exchange::*;
pub use model::*;
pub use pairing::*;
pub use stats::*;
