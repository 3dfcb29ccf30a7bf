//! Microsoft Graph To Do implementation of `TaskService`.
//!
//! Endpoints used (relative to the base URL, default `https://graph.microsoft.com/v1.0`):
//! - `GET    /me/todo/lists`
//! - `POST   /me/todo/lists`
//! - `DELETE /me/todo/lists/{list}`
//! - `GET    /me/todo/lists/{list}/tasks?$filter=status ne 'completed'&$top=N`
//! - `POST   /me/todo/lists/{list}/tasks`
//! - `PATCH  /me/todo/lists/{list}/tasks/{task}`
//! - `DELETE /me/todo/lists/{list}/tasks/{task}`
//!
//! Token acquisition is not handled here; the bearer token comes from config.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::service::{ListSummary, ServiceError, TaskService, TaskSummary};

pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

// ============================================================================
// Graph API Types
// ============================================================================

/// Graph wraps every collection in `{"value": [...]}`
#[derive(Deserialize, Debug)]
struct Collection<T> {
    value: Vec<T>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ApiList {
    id: String,
    display_name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ApiTask {
    id: String,
    title: String,
    created_date_time: String,
    #[serde(default)]
    reminder_date_time: Option<ApiDateTime>,
    #[serde(default)]
    due_date_time: Option<ApiDateTime>,
}

/// Graph `dateTimeTimeZone` resource
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ApiDateTime {
    date_time: String,
    time_zone: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct NewList<'a> {
    display_name: &'a str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct NewTask<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reminder_date_time: Option<ApiDateTime>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    is_reminder_on: bool,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct TaskCompletion {
    status: &'static str,
    completed_date_time: ApiDateTime,
}

// ============================================================================
// Translation Layer
// ============================================================================

impl ApiDateTime {
    fn from_utc(dt: DateTime<Utc>) -> Self {
        Self {
            date_time: dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            time_zone: "UTC".to_string(),
        }
    }

    /// Graph returns seven fractional digits and no offset, e.g. `2026-01-02T07:00:00.0000000`.
    fn to_utc(&self) -> Result<DateTime<Utc>, ServiceError> {
        if !self.time_zone.eq_ignore_ascii_case("UTC") {
            debug!("Treating {} timestamp as UTC", self.time_zone);
        }
        NaiveDateTime::parse_from_str(&self.date_time, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| ServiceError::Parse(format!("bad dateTime '{}': {e}", self.date_time)))
    }
}

fn parse_created(raw: &str) -> Result<DateTime<Utc>, ServiceError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ServiceError::Parse(format!("bad createdDateTime '{raw}': {e}")))
}

fn task_from_api(task: ApiTask) -> Result<TaskSummary, ServiceError> {
    Ok(TaskSummary {
        created_at: parse_created(&task.created_date_time)?,
        reminder_at: task.reminder_date_time.as_ref().map(ApiDateTime::to_utc).transpose()?,
        due_at: task.due_date_time.as_ref().map(ApiDateTime::to_utc).transpose()?,
        id: task.id,
        title: task.title,
    })
}

// ============================================================================
// Service Implementation
// ============================================================================

pub struct GraphTaskService {
    base_url: String,
    access_token: Option<String>,
    client: reqwest::Client,
}

impl GraphTaskService {
    pub fn new(base_url: Option<String>, access_token: Option<String>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_GRAPH_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self {
            base_url,
            access_token,
            client: reqwest::Client::new(),
        }
    }

    fn lists_url(&self) -> String {
        format!("{}/me/todo/lists", self.base_url)
    }

    fn tasks_url(&self, list_id: &str) -> String {
        format!("{}/{list_id}/tasks", self.lists_url())
    }

    fn token(&self) -> Result<&str, ServiceError> {
        self.access_token.as_deref().filter(|t| !t.is_empty()).ok_or_else(|| {
            ServiceError::Config(
                "no access token (set TOD_ACCESS_TOKEN or [graph] access_token)".to_string(),
            )
        })
    }

    /// Attach auth, send, and turn non-2xx responses into `ServiceError::Api`.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ServiceError> {
        let response = request
            .bearer_auth(self.token()?)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        debug!("Graph response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Graph API error: {} - {}", status, message);
            return Err(ServiceError::Api { status, message });
        }
        Ok(response)
    }

    async fn get_collection<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Vec<T>, ServiceError> {
        let body = self
            .send(request)
            .await?
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        serde_json::from_str::<Collection<T>>(&body)
            .map(|c| c.value)
            .map_err(|e| ServiceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl TaskService for GraphTaskService {
    fn name(&self) -> &str {
        "graph"
    }

    async fn verify_credentials(&self) -> Result<(), ServiceError> {
        info!("Verifying Graph credentials against {}", self.base_url);
        self.send(self.client.get(self.lists_url()).query(&[("$top", "1")]))
            .await
            .map(|_| ())
    }

    async fn list_all_lists(&self) -> Result<Vec<ListSummary>, ServiceError> {
        let lists: Vec<ApiList> = self.get_collection(self.client.get(self.lists_url())).await?;
        debug!("Fetched {} lists", lists.len());
        Ok(lists
            .into_iter()
            .map(|l| ListSummary {
                id: l.id,
                display_name: l.display_name,
            })
            .collect())
    }

    async fn list_tasks(
        &self,
        list_id: &str,
        max_count: usize,
    ) -> Result<Vec<TaskSummary>, ServiceError> {
        let request = self.client.get(self.tasks_url(list_id)).query(&[
            ("$filter", "status ne 'completed'".to_string()),
            ("$top", max_count.to_string()),
        ]);
        let tasks: Vec<ApiTask> = self.get_collection(request).await?;
        debug!("Fetched {} tasks for list {}", tasks.len(), list_id);
        tasks.into_iter().map(task_from_api).collect()
    }

    async fn create_list(&self, display_name: &str) -> Result<(), ServiceError> {
        info!("Creating list '{}'", display_name);
        let body = NewList { display_name };
        self.send(self.client.post(self.lists_url()).json(&body))
            .await
            .map(|_| ())
    }

    async fn delete_list(&self, list_id: &str) -> Result<(), ServiceError> {
        info!("Deleting list {}", list_id);
        self.send(self.client.delete(format!("{}/{list_id}", self.lists_url())))
            .await
            .map(|_| ())
    }

    async fn create_task(
        &self,
        list_id: &str,
        title: &str,
        reminder_at: Option<DateTime<Utc>>,
    ) -> Result<(), ServiceError> {
        info!("Creating task '{}' in list {} (reminder={:?})", title, list_id, reminder_at);
        let body = NewTask {
            title,
            reminder_date_time: reminder_at.map(ApiDateTime::from_utc),
            is_reminder_on: reminder_at.is_some(),
        };
        self.send(self.client.post(self.tasks_url(list_id)).json(&body))
            .await
            .map(|_| ())
    }

    async fn complete_task(&self, list_id: &str, task_id: &str) -> Result<(), ServiceError> {
        info!("Completing task {} in list {}", task_id, list_id);
        let body = TaskCompletion {
            status: "completed",
            completed_date_time: ApiDateTime::from_utc(Utc::now()),
        };
        let url = format!("{}/{task_id}", self.tasks_url(list_id));
        self.send(self.client.patch(url).json(&body)).await.map(|_| ())
    }

    async fn delete_task(&self, list_id: &str, task_id: &str) -> Result<(), ServiceError> {
        info!("Deleting task {} in list {}", task_id, list_id);
        let url = format!("{}/{task_id}", self.tasks_url(list_id));
        self.send(self.client.delete(url)).await.map(|_| ())
    }
}
