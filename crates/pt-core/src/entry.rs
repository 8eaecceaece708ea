//! Calendar entries, ledger entries, and the marker that ties them together.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::project::Project;
use crate::types::{EntryId, ProjectId};

/// Suffix appended to every description this tool writes to the ledger.
///
/// Ledger entries ending with it are owned by the sync and may be deleted.
pub const SYNC_MARKER: &str = "⟨via PT:CLI⟩";

/// Returns true if a ledger description was written by the sync.
pub fn is_engine_owned(description: &str) -> bool {
    description.trim_end().ends_with(SYNC_MARKER)
}

/// Appends the sync marker to a description.
pub fn tag_description(description: &str) -> String {
    format!("{description} {SYNC_MARKER}")
}

/// An event read from the calendar, in local time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    pub description: String,
}

impl CalendarEntry {
    pub fn new(from: NaiveDateTime, to: NaiveDateTime, description: impl Into<String>) -> Self {
        Self {
            from,
            to,
            description: description.into(),
        }
    }

    /// Whole minutes between start and end.
    pub fn duration_minutes(&self) -> i64 {
        (self.to - self.from).num_minutes()
    }

    /// The calendar day the entry is booked on.
    pub fn entry_date(&self) -> NaiveDate {
        self.from.date()
    }
}

/// A calendar entry attributed to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedEntry<'a> {
    pub entry: CalendarEntry,
    pub project: &'a Project,
    /// Description with the project pattern stripped.
    pub description: String,
}

impl MatchedEntry<'_> {
    /// Builds the ledger create request for this entry.
    pub fn to_new_entry(&self) -> NewEntry {
        NewEntry {
            project_id: self.project.id,
            description: tag_description(&self.description),
            entry_date: self.entry.entry_date(),
            duration_minutes: self.entry.duration_minutes(),
        }
    }
}

/// A time entry stored in the remote ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub id: EntryId,
    pub entry_date: NaiveDate,
    #[serde(rename = "sum_minutes", default, deserialize_with = "null_as_default")]
    pub duration_minutes: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
}

/// Reads an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl RemoteEntry {
    pub fn is_engine_owned(&self) -> bool {
        is_engine_owned(&self.description)
    }
}

/// A time entry to create in the remote ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub project_id: ProjectId,
    pub description: String,
    pub entry_date: NaiveDate,
    pub duration_minutes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::project::ProjectPattern;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn duration_is_whole_minutes() {
        let entry = CalendarEntry::new(
            at("2022-01-03", "10:00"),
            at("2022-01-03", "11:30"),
            "[acme] Design review",
        );
        assert_eq!(entry.duration_minutes(), 90);
    }

    #[test]
    fn duration_spans_midnight_when_end_date_given() {
        let entry = CalendarEntry::new(at("2022-01-03", "23:00"), at("2022-01-04", "01:15"), "Deploy");
        assert_eq!(entry.duration_minutes(), 135);
        assert_eq!(entry.entry_date(), NaiveDate::from_ymd_opt(2022, 1, 3).unwrap());
    }

    #[test]
    fn new_entry_carries_marker_date_and_duration() {
        let project = Project {
            id: ProjectId::new(1),
            name: "Acme".to_string(),
            pattern: ProjectPattern::new(r"\[acme\]").unwrap(),
        };
        let matched = MatchedEntry {
            entry: CalendarEntry::new(
                at("2022-01-03", "10:00"),
                at("2022-01-03", "11:30"),
                "[acme] Design review",
            ),
            project: &project,
            description: "Design review".to_string(),
        };

        let new_entry = matched.to_new_entry();

        assert_eq!(new_entry.project_id, ProjectId::new(1));
        assert_eq!(new_entry.description, "Design review ⟨via PT:CLI⟩");
        assert_eq!(new_entry.entry_date, NaiveDate::from_ymd_opt(2022, 1, 3).unwrap());
        assert_eq!(new_entry.duration_minutes, 90);
    }

    #[test]
    fn ownership_requires_marker_suffix() {
        assert!(is_engine_owned("Design review ⟨via PT:CLI⟩"));
        assert!(is_engine_owned("Design review ⟨via PT:CLI⟩ \n"));
        assert!(!is_engine_owned("⟨via PT:CLI⟩ moved to the front"));
        assert!(!is_engine_owned("Manual entry"));
    }

    #[test]
    fn remote_entry_reads_ledger_json() {
        let entry: RemoteEntry = serde_json::from_str(
            r#"{"id":12,"entry_date":"2022-01-03","sum_minutes":90,"description":"Design review ⟨via PT:CLI⟩","project_id":1,"user_id":5}"#,
        )
        .unwrap();

        assert_eq!(entry.id, EntryId::new(12));
        assert_eq!(entry.duration_minutes, 90);
        assert_eq!(entry.project_id, Some(ProjectId::new(1)));
        assert!(entry.is_engine_owned());
    }

    #[test]
    fn remote_entry_tolerates_missing_description() {
        let entry: RemoteEntry =
            serde_json::from_str(r#"{"id":3,"entry_date":"2022-01-03","sum_minutes":15}"#).unwrap();
        assert_eq!(entry.description, "");
        assert!(!entry.is_engine_owned());
    }

    #[test]
    fn remote_entry_reads_null_fields_as_empty() {
        let entries: Vec<RemoteEntry> = serde_json::from_str(
            r#"[
                {"id":3,"entry_date":"2022-01-03","sum_minutes":null,"description":null},
                {"id":4,"entry_date":"2022-01-03","sum_minutes":30,"description":"Old ⟨via PT:CLI⟩"}
            ]"#,
        )
        .unwrap();

        assert_eq!(entries[0].description, "");
        assert_eq!(entries[0].duration_minutes, 0);
        assert!(!entries[0].is_engine_owned());
        assert!(entries[1].is_engine_owned());
    }
}
