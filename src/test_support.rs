//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::core::state::App;
use crate::core::time_expr::{TimeParseError, TimeParser};
use crate::service::{ListSummary, ServiceError, TaskService, TaskSummary};

/// In-memory service that records every call as a string.
#[derive(Default)]
pub struct MockService {
    calls: Mutex<Vec<String>>,
    lists: Mutex<Vec<ListSummary>>,
    tasks: Mutex<HashMap<String, Vec<TaskSummary>>>,
    failure: Mutex<Option<ServiceError>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_lists(&self, lists: Vec<ListSummary>) {
        *self.lists.lock().unwrap() = lists;
    }

    pub fn set_tasks(&self, list_id: &str, tasks: Vec<TaskSummary>) {
        self.tasks.lock().unwrap().insert(list_id.to_string(), tasks);
    }

    /// Every subsequent call fails with `error`.
    pub fn fail_with(&self, error: ServiceError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ServiceError> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TaskService for MockService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn verify_credentials(&self) -> Result<(), ServiceError> {
        self.record("verify_credentials".to_string())
    }

    async fn list_all_lists(&self) -> Result<Vec<ListSummary>, ServiceError> {
        self.record("list_all_lists".to_string())?;
        Ok(self.lists.lock().unwrap().clone())
    }

    async fn list_tasks(
        &self,
        list_id: &str,
        max_count: usize,
    ) -> Result<Vec<TaskSummary>, ServiceError> {
        self.record(format!("list_tasks({list_id}, {max_count})"))?;
        let tasks = self.tasks.lock().unwrap();
        Ok(tasks
            .get(list_id)
            .map(|t| t.iter().take(max_count).cloned().collect())
            .unwrap_or_default())
    }

    async fn create_list(&self, display_name: &str) -> Result<(), ServiceError> {
        self.record(format!("create_list({display_name})"))
    }

    async fn delete_list(&self, list_id: &str) -> Result<(), ServiceError> {
        self.record(format!("delete_list({list_id})"))
    }

    async fn create_task(
        &self,
        list_id: &str,
        title: &str,
        _reminder_at: Option<DateTime<Utc>>,
    ) -> Result<(), ServiceError> {
        self.record(format!("create_task({list_id}, {title})"))
    }

    async fn complete_task(&self, list_id: &str, task_id: &str) -> Result<(), ServiceError> {
        self.record(format!("complete_task({list_id}, {task_id})"))
    }

    async fn delete_task(&self, list_id: &str, task_id: &str) -> Result<(), ServiceError> {
        self.record(format!("delete_task({list_id}, {task_id})"))
    }
}

/// Service whose calls never resolve.
pub struct HangingService;

#[async_trait]
impl TaskService for HangingService {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn verify_credentials(&self) -> Result<(), ServiceError> {
        std::future::pending().await
    }

    async fn list_all_lists(&self) -> Result<Vec<ListSummary>, ServiceError> {
        std::future::pending().await
    }

    async fn list_tasks(&self, _: &str, _: usize) -> Result<Vec<TaskSummary>, ServiceError> {
        std::future::pending().await
    }

    async fn create_list(&self, _: &str) -> Result<(), ServiceError> {
        std::future::pending().await
    }

    async fn delete_list(&self, _: &str) -> Result<(), ServiceError> {
        std::future::pending().await
    }

    async fn create_task(
        &self,
        _: &str,
        _: &str,
        _: Option<DateTime<Utc>>,
    ) -> Result<(), ServiceError> {
        std::future::pending().await
    }

    async fn complete_task(&self, _: &str, _: &str) -> Result<(), ServiceError> {
        std::future::pending().await
    }

    async fn delete_task(&self, _: &str, _: &str) -> Result<(), ServiceError> {
        std::future::pending().await
    }
}

/// Parser that rejects everything.
pub struct FailingParser;

impl TimeParser for FailingParser {
    fn parse(&self, text: &str) -> Result<DateTime<Utc>, TimeParseError> {
        Err(TimeParseError::Unrecognized(text.to_string()))
    }
}

/// Parser that maps any text to one fixed instant.
pub struct FixedParser(pub DateTime<Utc>);

impl TimeParser for FixedParser {
    fn parse(&self, _text: &str) -> Result<DateTime<Utc>, TimeParseError> {
        Ok(self.0)
    }
}

pub fn sample_task(id: &str, title: &str) -> TaskSummary {
    TaskSummary {
        id: id.to_string(),
        title: title.to_string(),
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap(),
        reminder_at: None,
        due_at: None,
    }
}

/// Creates a test App with the given `(id, display_name)` lists and a failing parser.
pub fn app_with_lists(lists: &[(&str, &str)]) -> App {
    let mut app = App::new(Arc::new(FailingParser));
    app.lists = lists
        .iter()
        .map(|(id, name)| ListSummary {
            id: id.to_string(),
            display_name: name.to_string(),
        })
        .collect();
    app
}
