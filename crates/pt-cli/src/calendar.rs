//! Calendar source backed by the `icalBuddy` command.

use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use chrono::NaiveDate;
use pt_core::{CalendarEntry, CalendarParseError, CalendarSource};
use thiserror::Error;

/// Date and time formats must match what `pt_core::calendar` parses.
const LISTING_ARGS: &[&str] = &[
    "-nc",
    "-nrd",
    "-ea",
    "-eep",
    "notes,location,attendees",
    "-df",
    "%Y-%m-%d",
    "-tf",
    "%H:%M",
    "--propertySeparators",
    "|\t|",
    "--propertyOrder",
    "datetime,title",
    "--bullet",
    "",
];

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{program} produced output that is not UTF-8")]
    Encoding {
        program: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error(transparent)]
    Parse(#[from] CalendarParseError),
}

/// Reads events from the macOS calendar store through `icalBuddy`.
#[derive(Debug, Clone)]
pub struct IcalBuddy {
    program: PathBuf,
}

impl IcalBuddy {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(from: NaiveDate, to: NaiveDate) -> Vec<String> {
        LISTING_ARGS
            .iter()
            .map(ToString::to_string)
            .chain([format!("eventsFrom:{from}"), format!("to:{to}")])
            .collect()
    }
}

impl CalendarSource for IcalBuddy {
    type Error = CalendarError;

    fn extract(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<CalendarEntry>, Self::Error> {
        let program = self.program.display().to_string();
        tracing::debug!(%program, %from, %to, "reading calendar");

        let output = Command::new(&self.program)
            .args(Self::args(from, to))
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CalendarError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(CalendarError::Failed {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let listing = String::from_utf8(output.stdout)
            .map_err(|source| CalendarError::Encoding { program, source })?;
        let entries = pt_core::parse_listing(&listing, from)?;
        tracing::debug!(count = entries.len(), "read calendar entries");
        Ok(entries)
    }
}
