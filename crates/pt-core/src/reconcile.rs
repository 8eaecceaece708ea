//! Delete-then-recreate reconciliation of calendar entries into the ledger.
//!
//! A sync run for `[from, to)`:
//!
//! 1. reads calendar entries and matches each against the catalog,
//! 2. deletes every ledger entry in range carrying [`SYNC_MARKER`],
//! 3. creates one ledger entry per matched calendar entry.
//!
//! Calls are issued one at a time. Nothing is rolled back when a step fails
//! partway, so a failed run can leave deleted entries that were never
//! recreated; rerunning the sync for the same range repairs that.

use chrono::NaiveDate;
use thiserror::Error;

use crate::entry::{CalendarEntry, MatchedEntry, NewEntry, RemoteEntry, SYNC_MARKER};
use crate::matcher::{Classification, classify};
use crate::project::{ProjectCatalog, RemoteProject};
use crate::types::EntryId;

/// Boxed collaborator error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Produces calendar entries for a date range.
pub trait CalendarSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns entries starting in `[from, to)`, in chronological order.
    fn extract(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<CalendarEntry>, Self::Error>;
}

/// The remote time-tracking ledger.
pub trait TimeLedger {
    type Error: std::error::Error + Send + Sync + 'static;

    fn list_projects(&self) -> Result<Vec<RemoteProject>, Self::Error>;

    fn list_entries(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<RemoteEntry>, Self::Error>;

    fn create_entry(&self, entry: &NewEntry) -> Result<RemoteEntry, Self::Error>;

    fn delete_entry(&self, id: EntryId) -> Result<(), Self::Error>;
}

/// A sync run was aborted.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A description uses the project marker but no project matches it.
    #[error("no project found for {description:?}")]
    UnknownProject { description: String },

    #[error("failed to read calendar entries")]
    Calendar(#[source] BoxError),

    #[error("failed to list existing time entries")]
    ListEntries(#[source] BoxError),

    #[error("failed to delete time entry {id}")]
    DeleteEntry {
        id: EntryId,
        #[source]
        source: BoxError,
    },

    #[error("failed to create time entry {description:?}")]
    CreateEntry {
        description: String,
        #[source]
        source: BoxError,
    },
}

/// How a successful sync run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The calendar had no entries in range.
    NoCalendarEntries,
    /// Calendar entries existed but none belonged to a project.
    NothingToSync,
    /// Owned entries were replaced.
    Synced { deleted: usize, created: usize },
}

/// Reconciles a calendar into a ledger using a project catalog.
#[derive(Debug)]
pub struct ReconciliationEngine<'a, C, L> {
    catalog: &'a ProjectCatalog,
    calendar: &'a C,
    ledger: &'a L,
}

impl<'a, C, L> ReconciliationEngine<'a, C, L>
where
    C: CalendarSource,
    L: TimeLedger,
{
    pub const fn new(catalog: &'a ProjectCatalog, calendar: &'a C, ledger: &'a L) -> Self {
        Self {
            catalog,
            calendar,
            ledger,
        }
    }

    /// Replaces the ledger's owned entries in `[from, to)` with the calendar's.
    pub fn sync(&self, from: NaiveDate, to: NaiveDate) -> Result<SyncOutcome, SyncError> {
        let entries = self
            .calendar
            .extract(from, to)
            .map_err(|err| SyncError::Calendar(Box::new(err)))?;
        if entries.is_empty() {
            tracing::info!(%from, %to, "no calendar entries found");
            return Ok(SyncOutcome::NoCalendarEntries);
        }

        let matched = match_entries(self.catalog, entries)?;
        if matched.is_empty() {
            tracing::info!(%from, %to, "nothing to sync");
            return Ok(SyncOutcome::NothingToSync);
        }

        let deleted = self.remove_owned_entries(from, to)?;

        let mut created = 0;
        for entry in &matched {
            let new_entry = entry.to_new_entry();
            tracing::info!(
                date = %new_entry.entry_date,
                minutes = new_entry.duration_minutes,
                description = %new_entry.description,
                "adding entry"
            );
            self.ledger
                .create_entry(&new_entry)
                .map_err(|err| SyncError::CreateEntry {
                    description: new_entry.description.clone(),
                    source: Box::new(err),
                })?;
            created += 1;
        }

        Ok(SyncOutcome::Synced { deleted, created })
    }

    fn remove_owned_entries(&self, from: NaiveDate, to: NaiveDate) -> Result<usize, SyncError> {
        let existing = self
            .ledger
            .list_entries(from, to)
            .map_err(|err| SyncError::ListEntries(Box::new(err)))?;

        let mut deleted = 0;
        for entry in existing.iter().filter(|entry| entry.is_engine_owned()) {
            tracing::info!(
                date = %entry.entry_date,
                minutes = entry.duration_minutes,
                description = %entry.description,
                "removing existing entry"
            );
            self.ledger
                .delete_entry(entry.id)
                .map_err(|err| SyncError::DeleteEntry {
                    id: entry.id,
                    source: Box::new(err),
                })?;
            deleted += 1;
        }
        tracing::debug!(deleted, marker = SYNC_MARKER, "removed owned entries");

        Ok(deleted)
    }
}

/// Matches calendar entries against the catalog, keeping calendar order.
///
/// Personal events are dropped. The first marked entry without a project
/// aborts matching.
pub fn match_entries(
    catalog: &ProjectCatalog,
    entries: Vec<CalendarEntry>,
) -> Result<Vec<MatchedEntry<'_>>, SyncError> {
    let mut matched = Vec::with_capacity(entries.len());
    for entry in entries {
        match classify(catalog, &entry.description) {
            Classification::Project(found) => matched.push(MatchedEntry {
                project: found.project,
                description: found.description,
                entry,
            }),
            Classification::Personal => {
                tracing::debug!(description = %entry.description, "skipping personal entry");
            }
            Classification::UnknownProject => {
                return Err(SyncError::UnknownProject {
                    description: entry.description,
                });
            }
        }
    }
    Ok(matched)
}
