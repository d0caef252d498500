//! Harvest v2 API client.
//!
//! A small blocking client implementing [`TimeTracking`] over HTTP/JSON.
//! Every call is a single request; there is no retry, caching or pagination.

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use hv_core::model::{ProjectId, TaskId};
use hv_core::{Assignment, EntryId, RemoteError, TimeEntry, TimeTracking, User, UserId};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.harvestapp.com/v2";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const ACCOUNT_HEADER: &str = "harvest-account-id";
const USER_AGENT_VALUE: &str = concat!("hcli/", env!("CARGO_PKG_VERSION"));
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors building a client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A credential was empty or not usable as a header value.
    #[error("invalid {field}: {reason}")]
    InvalidCredential {
        field: &'static str,
        reason: &'static str,
    },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Personal access token and the account it belongs to.
#[derive(Clone)]
pub struct Credentials {
    pub token: String,
    pub account_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"[REDACTED]")
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Harvest API client.
///
/// Authentication headers are attached to every request. The timeout bounds
/// each request as a whole.
pub struct HarvestClient {
    http: Client,
    base_url: String,
}

impl fmt::Debug for HarvestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarvestClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl HarvestClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if a credential is empty, whitespace-only or contains
    /// characters not allowed in an HTTP header, or if the HTTP client fails
    /// to build.
    pub fn new(
        credentials: &Credentials,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let token = validate("API token", &credentials.token)?;
        let account_id = validate("account ID", &credentials.account_id)?;

        let mut bearer = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            ClientError::InvalidCredential {
                field: "API token",
                reason: "contains characters not allowed in a header",
            }
        })?;
        bearer.set_sensitive(true);
        let account = HeaderValue::from_str(account_id).map_err(|_| {
            ClientError::InvalidCredential {
                field: "account ID",
                reason: "contains characters not allowed in a header",
            }
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(HeaderName::from_static(ACCOUNT_HEADER), account);
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(ClientError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RemoteError> {
        tracing::debug!(path, ?query, "GET");
        execute(self.http.get(self.url(path)).query(query))
    }
}

impl TimeTracking for HarvestClient {
    fn current_user(&self) -> Result<User, RemoteError> {
        self.get("/users/me", &[])
    }

    fn assignments(&self, user_id: UserId) -> Result<Vec<Assignment>, RemoteError> {
        let page: AssignmentsPage =
            self.get(&format!("/users/{user_id}/project_assignments"), &[])?;
        Ok(page.project_assignments)
    }

    fn entries(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeEntry>, RemoteError> {
        let page: TimeEntriesPage = self.get("/time_entries", &entries_query(user_id, from, to))?;
        Ok(page.time_entries)
    }

    fn running_entries(&self, user_id: UserId) -> Result<Vec<TimeEntry>, RemoteError> {
        let page: TimeEntriesPage = self.get("/time_entries", &running_query(user_id))?;
        Ok(page.time_entries)
    }

    fn create_entry(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        date: NaiveDate,
    ) -> Result<TimeEntry, RemoteError> {
        let body = NewTimeEntry::new(project_id, task_id, date);
        tracing::debug!(?body, "POST /time_entries");
        execute(self.http.post(self.url("/time_entries")).json(&body))
    }

    fn stop_entry(&self, entry_id: EntryId) -> Result<TimeEntry, RemoteError> {
        let path = format!("/time_entries/{entry_id}/stop");
        tracing::debug!(path, "PATCH");
        execute(self.http.patch(self.url(&path)))
    }
}

/// Sends `request`; non-2xx responses become [`RemoteError::Status`].
fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, RemoteError> {
    let response = request.send().map_err(transport)?;
    let status = response.status();
    let body = response.text().map_err(transport)?;
    if !status.is_success() {
        tracing::debug!(%status, body = %body, "request rejected");
        return Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        });
    }
    tracing::trace!(body = %body, "response body");
    decode(&body)
}

/// Body for `POST /time_entries`. Omitting `hours` starts a timer.
#[derive(Debug, Serialize)]
struct NewTimeEntry {
    project_id: ProjectId,
    task_id: TaskId,
    spent_date: String,
}

impl NewTimeEntry {
    fn new(project_id: ProjectId, task_id: TaskId, date: NaiveDate) -> Self {
        Self {
            project_id,
            task_id,
            spent_date: date.format(DATE_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TimeEntriesPage {
    time_entries: Vec<TimeEntry>,
}

#[derive(Debug, Deserialize)]
struct AssignmentsPage {
    project_assignments: Vec<Assignment>,
}

fn validate<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ClientError> {
    if value.is_empty() {
        return Err(ClientError::InvalidCredential {
            field,
            reason: "cannot be empty",
        });
    }
    if value.trim().is_empty() {
        return Err(ClientError::InvalidCredential {
            field,
            reason: "cannot be whitespace-only",
        });
    }
    Ok(value.trim())
}

fn entries_query(user_id: UserId, from: NaiveDate, to: NaiveDate) -> Vec<(&'static str, String)> {
    vec![
        ("user_id", user_id.to_string()),
        ("from", from.format(DATE_FORMAT).to_string()),
        ("to", to.format(DATE_FORMAT).to_string()),
    ]
}

fn running_query(user_id: UserId) -> Vec<(&'static str, String)> {
    vec![
        ("user_id", user_id.to_string()),
        ("is_running", "true".to_string()),
    ]
}

fn transport(err: reqwest::Error) -> RemoteError {
    RemoteError::Transport(Box::new(err))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, RemoteError> {
    serde_json::from_str(body).map_err(|err| RemoteError::InvalidResponse(err.to_string()))
}
