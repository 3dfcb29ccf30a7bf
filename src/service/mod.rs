//! # Remote Task Service
//!
//! The narrow contract the controller consumes. Implementations may block for
//! arbitrary latency and may fail; the controller never interprets *why* a
//! call failed, only that it did.
//!
//! ```text
//! TaskService (trait)
//! ├── GraphTaskService   // Microsoft Graph To Do REST API
//! └── MockService        // tests only
//! ```

pub mod graph;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use graph::GraphTaskService;

/// Errors that can occur during service operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Service misconfigured (missing token, bad URL).
    Config(String),
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The API returned a non-success response.
    Api { status: u16, message: String },
    /// Failed to parse the service's response.
    Parse(String),
    /// The call did not resolve within the configured timeout.
    Timeout(Duration),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Config(msg) => write!(f, "config error: {msg}"),
            ServiceError::Network(msg) => write!(f, "network error: {msg}"),
            ServiceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ServiceError::Parse(msg) => write!(f, "parse error: {msg}"),
            ServiceError::Timeout(after) => {
                write!(f, "timed out after {}s", after.as_secs())
            }
        }
    }
}

impl std::error::Error for ServiceError {}

/// A task list as returned by the service. Immutable snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSummary {
    pub id: String,
    pub display_name: String,
}

/// A task as returned by the service. Immutable snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub reminder_at: Option<DateTime<Utc>>,
    pub due_at: Option<DateTime<Utc>>,
}

impl TaskSummary {
    /// The timestamp most worth showing next to the title:
    /// reminder, else due date, else creation time.
    pub fn relevant_timestamp(&self) -> DateTime<Utc> {
        self.reminder_at.or(self.due_at).unwrap_or(self.created_at)
    }
}

#[async_trait]
pub trait TaskService: Send + Sync {
    /// Returns the name of the service backend.
    fn name(&self) -> &str;

    /// Cheap authenticated call used once at startup.
    async fn verify_credentials(&self) -> Result<(), ServiceError>;

    async fn list_all_lists(&self) -> Result<Vec<ListSummary>, ServiceError>;

    /// Open tasks of a list, at most `max_count` of them.
    async fn list_tasks(
        &self,
        list_id: &str,
        max_count: usize,
    ) -> Result<Vec<TaskSummary>, ServiceError>;

    async fn create_list(&self, display_name: &str) -> Result<(), ServiceError>;

    async fn delete_list(&self, list_id: &str) -> Result<(), ServiceError>;

    async fn create_task(
        &self,
        list_id: &str,
        title: &str,
        reminder_at: Option<DateTime<Utc>>,
    ) -> Result<(), ServiceError>;

    async fn complete_task(&self, list_id: &str, task_id: &str) -> Result<(), ServiceError>;

    async fn delete_task(&self, list_id: &str, task_id: &str) -> Result<(), ServiceError>;
}

/// One service call, described as data so the reducer can hand it to the runner.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    LoadLists,
    LoadTasks { list_id: String },
    CreateList { display_name: String },
    DeleteList { list_id: String },
    CreateTask {
        list_id: String,
        title: String,
        reminder_at: Option<DateTime<Utc>>,
    },
    CompleteTask { list_id: String, task_id: String },
    DeleteTask { list_id: String, task_id: String },
}

impl Request {
    /// Human-readable label shown next to the spinner.
    pub fn status_label(&self) -> &'static str {
        match self {
            Request::LoadLists => "Loading lists",
            Request::LoadTasks { .. } => "Loading tasks",
            Request::CreateList { .. } => "Creating list",
            Request::DeleteList { .. } => "Deleting list",
            Request::CreateTask { .. } => "Creating task",
            Request::CompleteTask { .. } => "Completing task",
            Request::DeleteTask { .. } => "Deleting task",
        }
    }

    /// Mutations change remote data and are followed by a reload.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Request::LoadLists | Request::LoadTasks { .. })
    }
}

/// Successful result of a `Request`.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Lists(Vec<ListSummary>),
    Tasks {
        list_id: String,
        tasks: Vec<TaskSummary>,
    },
    Done,
}

/// Run a request against a service.
pub async fn execute(
    service: &dyn TaskService,
    request: &Request,
    max_tasks: usize,
) -> Result<Response, ServiceError> {
    match request {
        Request::LoadLists => service.list_all_lists().await.map(Response::Lists),
        Request::LoadTasks { list_id } => {
            let tasks = service.list_tasks(list_id, max_tasks).await?;
            Ok(Response::Tasks {
                list_id: list_id.clone(),
                tasks,
            })
        }
        Request::CreateList { display_name } => {
            service.create_list(display_name).await.map(|_| Response::Done)
        }
        Request::DeleteList { list_id } => {
            service.delete_list(list_id).await.map(|_| Response::Done)
        }
        Request::CreateTask {
            list_id,
            title,
            reminder_at,
        } => service
            .create_task(list_id, title, *reminder_at)
            .await
            .map(|_| Response::Done),
        Request::CompleteTask { list_id, task_id } => service
            .complete_task(list_id, task_id)
            .await
            .map(|_| Response::Done),
        Request::DeleteTask { list_id, task_id } => service
            .delete_task(list_id, task_id)
            .await
            .map(|_| Response::Done),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockService, sample_task};
    use chrono::TimeZone;

    #[test]
    fn test_relevant_timestamp_prefers_reminder_then_due() {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        let due = Utc.with_ymd_and_hms(2026, 1, 3, 8, 0, 0).unwrap();
        let reminder = Utc.with_ymd_and_hms(2026, 1, 2, 8, 0, 0).unwrap();

        let mut task = sample_task("t1", "Write report");
        task.created_at = created;
        assert_eq!(task.relevant_timestamp(), created);

        task.due_at = Some(due);
        assert_eq!(task.relevant_timestamp(), due);

        task.reminder_at = Some(reminder);
        assert_eq!(task.relevant_timestamp(), reminder);
    }

    #[test]
    fn test_error_display() {
        let err = ServiceError::Api {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 404): not found");
        assert_eq!(
            ServiceError::Timeout(Duration::from_secs(30)).to_string(),
            "timed out after 30s"
        );
    }

    #[test]
    fn test_only_loads_are_not_mutations() {
        assert!(!Request::LoadLists.is_mutation());
        assert!(!Request::LoadTasks { list_id: "A".into() }.is_mutation());
        assert!(Request::CreateList { display_name: "x".into() }.is_mutation());
        assert!(
            Request::DeleteTask {
                list_id: "A".into(),
                task_id: "t".into()
            }
            .is_mutation()
        );
    }

    #[tokio::test]
    async fn test_execute_load_tasks_passes_max_count() {
        let service = MockService::new();
        service.set_tasks("A", vec![sample_task("t1", "One")]);

        let response = execute(&service, &Request::LoadTasks { list_id: "A".into() }, 25)
            .await
            .unwrap();

        assert_eq!(
            response,
            Response::Tasks {
                list_id: "A".into(),
                tasks: vec![sample_task("t1", "One")],
            }
        );
        assert_eq!(service.calls(), vec!["list_tasks(A, 25)".to_string()]);
    }

    #[tokio::test]
    async fn test_execute_load_lists() {
        let service = MockService::new();
        let lists = vec![ListSummary {
            id: "A".into(),
            display_name: "Work".into(),
        }];
        service.set_lists(lists.clone());

        let response = execute(&service, &Request::LoadLists, 100).await.unwrap();

        assert_eq!(response, Response::Lists(lists));
        assert_eq!(service.calls(), vec!["list_all_lists".to_string()]);
    }

    #[tokio::test]
    async fn test_execute_mutation_returns_done() {
        let service = MockService::new();
        let request = Request::CreateTask {
            list_id: "A".into(),
            title: "Buy milk".into(),
            reminder_at: None,
        };

        let response = execute(&service, &request, 100).await.unwrap();

        assert_eq!(response, Response::Done);
        assert_eq!(service.calls(), vec!["create_task(A, Buy milk)".to_string()]);
    }

    #[tokio::test]
    async fn test_execute_propagates_failure() {
        let service = MockService::new();
        service.fail_with(ServiceError::Network("connection refused".into()));

        let result = execute(&service, &Request::LoadLists, 100).await;

        assert_eq!(
            result,
            Err(ServiceError::Network("connection refused".into()))
        );
    }
}
