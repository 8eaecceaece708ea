//! Core domain logic for syncing calendar events into ProTimes.
//!
//! This crate contains:
//! - Project catalog: known projects and their description patterns
//! - Matching: attributing calendar descriptions to projects
//! - Calendar parsing: reading `icalBuddy` listings
//! - Reconciliation: replacing synced ledger entries with the calendar's

pub mod calendar;
pub mod entry;
pub mod matcher;
pub mod project;
pub mod reconcile;
pub mod types;

pub use calendar::{CalendarParseError, parse_listing};
pub use entry::{CalendarEntry, MatchedEntry, NewEntry, RemoteEntry, SYNC_MARKER, is_engine_owned};
pub use matcher::{Classification, ProjectMatch, classify, match_project};
pub use project::{CatalogRefresh, PatternError, Project, ProjectCatalog, ProjectPattern, RemoteProject};
pub use reconcile::{
    BoxError, CalendarSource, ReconciliationEngine, SyncError, SyncOutcome, TimeLedger, match_entries,
};
pub use types::{EntryId, ProjectId};
