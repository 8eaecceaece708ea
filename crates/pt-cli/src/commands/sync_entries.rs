//! Sync entries command for replacing synced ledger entries with calendar events.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use pt_core::{CalendarSource, ProjectCatalog, ReconciliationEngine, SyncOutcome, TimeLedger};

pub fn run<W, C, L>(
    writer: &mut W,
    calendar: &C,
    ledger: &L,
    catalog: &ProjectCatalog,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<SyncOutcome>
where
    W: Write,
    C: CalendarSource,
    L: TimeLedger,
{
    let outcome = ReconciliationEngine::new(catalog, calendar, ledger)
        .sync(from, to)
        .with_context(|| format!("failed to sync entries between {from} and {to}"))?;

    match outcome {
        SyncOutcome::NoCalendarEntries => {
            writeln!(writer, "No calendar entries found between {from} and {to}.")?;
        }
        SyncOutcome::NothingToSync => {
            writeln!(writer, "Nothing to sync between {from} and {to}.")?;
        }
        SyncOutcome::Synced { deleted, created } => {
            writeln!(writer, "Removed {deleted} and added {created} entries. Done.")?;
        }
    }

    Ok(outcome)
}
