//! HTTP client for the ProTimes time ledger.
//!
//! Every request is authenticated with the account's `email` and
//! `auth_token`, sent as query parameters. Dates are exchanged as
//! `YYYYMMDD` in queries and ISO `YYYY-MM-DD` in JSON bodies.

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use pt_core::{EntryId, NewEntry, ProjectId, RemoteEntry, RemoteProject};
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Default request timeout for API calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_BASE_URL: &str = "https://protimes.herokuapp.com/api/v1";
const QUERY_DATE_FORMAT: &str = "%Y%m%d";

/// Ledger client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The provided auth token was invalid.
    #[error("invalid auth token: {reason}")]
    InvalidToken { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Account credentials attached to every request.
#[derive(Clone)]
pub struct Credentials {
    pub email: Option<String>,
    pub auth_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("auth_token", &"[REDACTED]")
            .finish()
    }
}

/// ProTimes API client.
///
/// # Thread Safety
///
/// The client is safe to clone and share across threads. Each clone shares
/// the underlying HTTP connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the auth token is empty or whitespace-only, or if
    /// the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, credentials, DEFAULT_TIMEOUT)
    }

    /// Creates a new client with a custom per-request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        if credentials.auth_token.is_empty() {
            return Err(ApiError::InvalidToken {
                reason: "auth token cannot be empty",
            });
        }
        if credentials.auth_token.trim().is_empty() {
            return Err(ApiError::InvalidToken {
                reason: "auth token cannot be whitespace-only",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Lists all projects visible to the account.
    pub async fn list_projects(&self) -> Result<Vec<RemoteProject>, ApiError> {
        let body = self.send(self.http.get(self.url("projects.json"))).await?;
        parse_json(&body)
    }

    /// Lists time entries booked between `from` and `to`.
    pub async fn list_entries(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<RemoteEntry>, ApiError> {
        let request = self.http.get(self.url("time_entries")).query(&[
            ("from", from.format(QUERY_DATE_FORMAT).to_string()),
            ("to", to.format(QUERY_DATE_FORMAT).to_string()),
        ]);
        let body = self.send(request).await?;
        parse_json(&body)
    }

    /// Creates a time entry.
    pub async fn create_entry(&self, entry: &NewEntry) -> Result<RemoteEntry, ApiError> {
        let payload = CreateEntryRequest {
            time_entry: TimeEntryPayload::from(entry),
        };
        let body = self
            .send(self.http.post(self.url("time_entries")).json(&payload))
            .await?;
        parse_json(&body)
    }

    /// Deletes a time entry.
    pub async fn delete_entry(&self, id: EntryId) -> Result<(), ApiError> {
        self.send(self.http.delete(self.url(&format!("time_entries/{id}"))))
            .await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let mut auth = vec![("auth_token", self.credentials.auth_token.as_str())];
        if let Some(email) = &self.credentials.email {
            auth.push(("email", email.as_str()));
        }
        let request = request.query(&auth).build()?;
        tracing::debug!(method = %request.method(), path = request.url().path(), "sending request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Api {
                status,
                message: parse_api_error(&body).unwrap_or(body),
            });
        }
        Ok(body)
    }
}

#[derive(Debug, Serialize)]
struct CreateEntryRequest {
    time_entry: TimeEntryPayload,
}

/// The ledger parses durations from `time_input_natural_language`; the
/// explicit hour and minute fields stay zero.
#[derive(Debug, Serialize)]
struct TimeEntryPayload {
    project_id: ProjectId,
    description: String,
    hours: u32,
    minutes: u32,
    time_input_natural_language: String,
    entry_date: NaiveDate,
}

impl From<&NewEntry> for TimeEntryPayload {
    fn from(entry: &NewEntry) -> Self {
        Self {
            project_id: entry.project_id,
            description: entry.description.clone(),
            hours: 0,
            minutes: 0,
            time_input_natural_language: format!("{}m", entry.duration_minutes),
            entry_date: entry.entry_date,
        }
    }
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|err| ApiError::InvalidResponse(err.to_string()))
}

fn parse_api_error(body: &str) -> Option<String> {
    let payload: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| payload.get(key).and_then(serde_json::Value::as_str))
        .map(str::to_string)
}
