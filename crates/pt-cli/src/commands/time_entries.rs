//! Time entries command for listing ledger entries in a date range.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use pt_core::TimeLedger;

pub fn run<W: Write, L: TimeLedger>(writer: &mut W, ledger: &L, from: NaiveDate, to: NaiveDate) -> Result<()> {
    let entries = ledger
        .list_entries(from, to)
        .context("failed to list time entries")?;

    for entry in &entries {
        writeln!(
            writer,
            "{}  {:>4}m  #{:<8} {}",
            entry.entry_date,
            entry.duration_minutes,
            entry.id.get(),
            entry.description
        )?;
    }

    let synced = entries.iter().filter(|entry| entry.is_engine_owned()).count();
    writeln!(
        writer,
        "{} entries between {from} and {to} ({synced} synced)",
        entries.len()
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    use insta::assert_snapshot;
    use pt_core::{EntryId, RemoteEntry};

    use crate::testing::FakeLedger;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn time_entries_command_counts_synced_entries() {
        let ledger = FakeLedger {
            entries: RefCell::new(vec![
                RemoteEntry {
                    id: EntryId::new(3),
                    entry_date: date("2022-01-03"),
                    duration_minutes: 90,
                    description: "Design review ⟨via PT:CLI⟩".to_string(),
                    project_id: None,
                },
                RemoteEntry {
                    id: EntryId::new(4),
                    entry_date: date("2022-01-03"),
                    duration_minutes: 15,
                    description: "Manual booking".to_string(),
                    project_id: None,
                },
            ]),
            ..FakeLedger::default()
        };

        let mut output = Vec::new();
        run(&mut output, &ledger, date("2022-01-03"), date("2022-01-04")).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        2022-01-03    90m  #3        Design review ⟨via PT:CLI⟩
        2022-01-03    15m  #4        Manual booking
        2 entries between 2022-01-03 and 2022-01-04 (1 synced)
        ");
    }

    #[test]
    fn time_entries_command_propagates_ledger_failure() {
        let ledger = FakeLedger {
            fail: true,
            ..FakeLedger::default()
        };
        let mut output = Vec::new();
        let err = run(&mut output, &ledger, date("2022-01-03"), date("2022-01-04")).unwrap_err();
        assert!(err.to_string().contains("failed to list time entries"));
    }
}
