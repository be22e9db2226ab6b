//! Session runner for coinche evenings
//!
//! This crate provides infrastructure for:
//! - Persisting the club state between invocations
//! - Running club commands with save-on-success semantics
//! - Rendering rosters, rounds and rankings as text
//!
//! # Usage
//!
//! ```bash
//! # Register players and open tonight's session
//! cargo run -p coinche -- player add "Chloé"
//! cargo run -p coinche -- session new
//!
//! # Draw tables and record a result
//! cargo run -p coinche -- round new
//! cargo run -p coinche -- win 1 1 A
//! ```

mod clubhouse;
mod config;
pub mod report;
mod store;

pub use clubhouse::*;
pub use config::*;
pub use store::*;
