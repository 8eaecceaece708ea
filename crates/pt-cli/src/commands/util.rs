//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use chrono::{Days, Local, NaiveDate};
use clap::Args;
use regex::Regex;

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(day|week)s?\s+ago$").unwrap());

/// Conservative bound for relative dates (~100 years in days).
const MAX_RELATIVE_DAYS: u64 = 100 * 366;

/// Date range shared by commands that work on a window of days.
#[derive(Debug, Clone, Default, Args)]
pub struct DateRangeArgs {
    /// First day of the range, inclusive [default: yesterday].
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// End of the range, exclusive [default: today].
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,
}

impl DateRangeArgs {
    /// Resolves the range against the local date.
    pub fn resolve(&self) -> Result<(NaiveDate, NaiveDate)> {
        self.resolve_from(Local::now().date_naive())
    }

    fn resolve_from(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
        let to = self.to.unwrap_or(today);
        let from = match self.from {
            Some(from) => from,
            None => today
                .checked_sub_days(Days::new(1))
                .context("date out of range")?,
        };
        if from > to {
            bail!("--from ({from}) must not be after --to ({to})");
        }
        Ok((from, to))
    }
}

/// Parse a date string as ISO 8601, a keyword, or a relative offset.
///
/// Supports:
/// - ISO 8601: "2026-01-15"
/// - Keywords: "today", "yesterday"
/// - Relative: "3 days ago", "1 week ago"
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    parse_date_from(s, Local::now().date_naive())
}

fn parse_date_from(s: &str, today: NaiveDate) -> Result<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    let days = match s {
        "today" => 0,
        "yesterday" => 1,
        _ => {
            let Some(caps) = RELATIVE_DATE_RE.captures(s) else {
                bail!(
                    "Invalid date: {s}. Use YYYY-MM-DD, 'today', 'yesterday' or relative (e.g., '3 days ago')"
                );
            };
            let n: u64 = caps[1]
                .parse()
                .context("failed to parse number in relative date")?;
            let days_per_unit = if &caps[2] == "week" { 7 } else { 1 };
            if n > MAX_RELATIVE_DAYS / days_per_unit {
                bail!("Relative date too far back: {n} {}s", &caps[2]);
            }
            n * days_per_unit
        }
    };

    today
        .checked_sub_days(Days::new(days))
        .context("date out of range")
}
