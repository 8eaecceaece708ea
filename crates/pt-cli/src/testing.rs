//! In-memory collaborators for command tests.

use std::cell::RefCell;

use chrono::NaiveDate;
use pt_core::{CalendarEntry, CalendarSource, EntryId, NewEntry, RemoteEntry, RemoteProject, TimeLedger};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("fake collaborator failure")]
pub struct FakeError;

#[derive(Debug, Default)]
pub struct FakeCalendar {
    pub entries: Vec<CalendarEntry>,
}

impl CalendarSource for FakeCalendar {
    type Error = FakeError;

    fn extract(&self, _from: NaiveDate, _to: NaiveDate) -> Result<Vec<CalendarEntry>, Self::Error> {
        Ok(self.entries.clone())
    }
}

#[derive(Debug, Default)]
pub struct FakeLedger {
    pub projects: Vec<RemoteProject>,
    pub entries: RefCell<Vec<RemoteEntry>>,
    pub fail: bool,
}

impl TimeLedger for FakeLedger {
    type Error = FakeError;

    fn list_projects(&self) -> Result<Vec<RemoteProject>, Self::Error> {
        if self.fail {
            return Err(FakeError);
        }
        Ok(self.projects.clone())
    }

    fn list_entries(&self, _from: NaiveDate, _to: NaiveDate) -> Result<Vec<RemoteEntry>, Self::Error> {
        if self.fail {
            return Err(FakeError);
        }
        Ok(self.entries.borrow().clone())
    }

    fn create_entry(&self, entry: &NewEntry) -> Result<RemoteEntry, Self::Error> {
        let mut entries = self.entries.borrow_mut();
        let id = entries.iter().map(|e| e.id.get()).max().unwrap_or(0) + 1;
        let created = RemoteEntry {
            id: EntryId::new(id),
            entry_date: entry.entry_date,
            duration_minutes: entry.duration_minutes,
            description: entry.description.clone(),
            project_id: Some(entry.project_id),
        };
        entries.push(created.clone());
        Ok(created)
    }

    fn delete_entry(&self, id: EntryId) -> Result<(), Self::Error> {
        self.entries.borrow_mut().retain(|e| e.id != id);
        Ok(())
    }
}
