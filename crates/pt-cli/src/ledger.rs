//! Blocking adapter over the async ProTimes client.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use pt_api::{ApiError, Client};
use pt_core::{EntryId, NewEntry, RemoteEntry, RemoteProject, TimeLedger};
use tokio::runtime::Runtime;

use crate::Config;

/// Drives each ledger request to completion before returning.
#[derive(Debug)]
pub struct BlockingLedger {
    client: Client,
    runtime: Runtime,
}

impl BlockingLedger {
    pub fn new(client: Client) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to initialize tokio runtime")?;
        Ok(Self { client, runtime })
    }

    /// Builds a ledger from configured credentials.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::with_timeout(
            config.api_base_url.clone(),
            config.credentials()?,
            config.request_timeout(),
        )
        .context("failed to create ProTimes client")?;
        Self::new(client)
    }
}

impl TimeLedger for BlockingLedger {
    type Error = ApiError;

    fn list_projects(&self) -> Result<Vec<RemoteProject>, Self::Error> {
        self.runtime.block_on(self.client.list_projects())
    }

    fn list_entries(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<RemoteEntry>, Self::Error> {
        self.runtime.block_on(self.client.list_entries(from, to))
    }

    fn create_entry(&self, entry: &NewEntry) -> Result<RemoteEntry, Self::Error> {
        self.runtime.block_on(self.client.create_entry(entry))
    }

    fn delete_entry(&self, id: EntryId) -> Result<(), Self::Error> {
        self.runtime.block_on(self.client.delete_entry(id))
    }
}
