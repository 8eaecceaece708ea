//! Parsing `icalBuddy` event listings.
//!
//! Expects one event per line, formatted with `-df '%Y-%m-%d' -tf '%H:%M'`
//! and a tab between the datetime and title properties:
//!
//! ```text
//! 2022-01-03 at 10:00 - 11:30	[acme] Design review
//! 2022-01-03 at 23:00 - 2022-01-04 at 01:00	Release
//! ```

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use thiserror::Error;

use crate::entry::CalendarEntry;

static ENTRY_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^(?<from_date>\d{4}-\d{2}-\d{2})\s at \s(?<from_time>\d{2}:\d{2})
        \s-\s
        (?:(?<to_date>\d{4}-\d{2}-\d{2})\s at \s)?(?<to_time>\d{2}:\d{2})
        \t
        (?<description>.+)",
    )
    .unwrap()
});

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A calendar listing could not be parsed.
#[derive(Debug, Error)]
pub enum CalendarParseError {
    /// The line does not have the expected shape.
    #[error("could not parse line {line_number}: {line:?}")]
    UnparseableLine { line_number: usize, line: String },

    /// The line has the right shape but names an impossible date or time.
    #[error("invalid timestamp {value:?} on line {line_number}")]
    InvalidTimestamp {
        line_number: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Parses a full listing, dropping events that start before `from`.
///
/// Blank lines are skipped. Any other malformed line fails the whole listing.
pub fn parse_listing(output: &str, from: NaiveDate) -> Result<Vec<CalendarEntry>, CalendarParseError> {
    let window_start = from.and_time(chrono::NaiveTime::MIN);
    let mut entries = Vec::new();

    for (index, line) in output.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let entry = parse_line(line, index + 1)?;
        if entry.from < window_start {
            tracing::debug!(start = %entry.from, "skipping entry before sync window");
            continue;
        }
        entries.push(entry);
    }

    Ok(entries)
}

/// Parses a single listing line.
pub fn parse_line(line: &str, line_number: usize) -> Result<CalendarEntry, CalendarParseError> {
    let Some(caps) = ENTRY_LINE_RE.captures(line) else {
        return Err(CalendarParseError::UnparseableLine {
            line_number,
            line: line.to_string(),
        });
    };

    let from_date = &caps["from_date"];
    let to_date = caps.name("to_date").map_or(from_date, |m| m.as_str());
    let from = parse_timestamp(from_date, &caps["from_time"], line_number)?;
    let to = parse_timestamp(to_date, &caps["to_time"], line_number)?;

    Ok(CalendarEntry::new(from, to, &caps["description"]))
}

fn parse_timestamp(date: &str, time: &str, line_number: usize) -> Result<NaiveDateTime, CalendarParseError> {
    let value = format!("{date} {time}");
    NaiveDateTime::parse_from_str(&value, TIMESTAMP_FORMAT).map_err(|source| {
        CalendarParseError::InvalidTimestamp {
            line_number,
            value,
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parses_same_day_entry() {
        let entry = parse_line("2022-01-03 at 10:00 - 11:30\t[acme] Design review", 1).unwrap();

        assert_eq!(entry.from.to_string(), "2022-01-03 10:00:00");
        assert_eq!(entry.to.to_string(), "2022-01-03 11:30:00");
        assert_eq!(entry.duration_minutes(), 90);
        assert_eq!(entry.description, "[acme] Design review");
    }

    #[test]
    fn parses_entry_with_explicit_end_date() {
        let entry = parse_line("2022-01-03 at 23:00 - 2022-01-04 at 01:00\tRelease", 1).unwrap();

        assert_eq!(entry.to.to_string(), "2022-01-04 01:00:00");
        assert_eq!(entry.duration_minutes(), 120);
    }

    #[test]
    fn rejects_line_without_tab_separator() {
        let err = parse_line("2022-01-03 at 10:00 - 11:30 Design review", 4).unwrap_err();
        assert!(matches!(
            err,
            CalendarParseError::UnparseableLine { line_number: 4, .. }
        ));
    }

    #[test]
    fn rejects_impossible_time() {
        let err = parse_line("2022-01-03 at 25:00 - 26:00\tLate", 2).unwrap_err();
        assert!(matches!(err, CalendarParseError::InvalidTimestamp { .. }));
    }

    #[test]
    fn listing_drops_entries_before_window() {
        let output = "2022-01-02 at 09:00 - 10:00\tYesterday\n\
                      2022-01-03 at 09:00 - 10:00\tToday\n\
                      \n\
                      2022-01-03 at 13:00 - 14:00\tLater\n";

        let entries = parse_listing(output, date("2022-01-03")).unwrap();

        let descriptions: Vec<&str> = entries.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Today", "Later"]);
    }

    #[test]
    fn listing_fails_on_any_malformed_line() {
        let output = "2022-01-03 at 09:00 - 10:00\tToday\n\
                      All day: Holiday\n";

        let err = parse_listing(output, date("2022-01-03")).unwrap_err();

        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn empty_listing_yields_no_entries() {
        assert!(parse_listing("", date("2022-01-03")).unwrap().is_empty());
    }
}
