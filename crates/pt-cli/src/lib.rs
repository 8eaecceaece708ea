//! ProTimes calendar sync CLI library.
//!
//! This crate wires the reconciliation engine to its real collaborators:
//! `icalBuddy` for calendar events and the ProTimes API for the ledger.

pub mod calendar;
pub mod catalog;
mod cli;
pub mod commands;
mod config;
pub mod ledger;
#[cfg(test)]
mod testing;

pub use cli::{Cli, Commands};
pub use config::Config;
