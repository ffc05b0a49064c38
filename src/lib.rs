//! Stronghold: a turn-based kingdom rule engine with a text-menu front end.

pub mod simulation;
pub mod ui;

pub use simulation::{Kingdom, KingdomConfig, KingdomError, Notice, Outcome, Severity};
