//! # Application State
//!
//! All UI state in one owned struct, mutated only on the event-loop thread.
//! Background work never reaches in here; it returns values that come back
//! as actions.
//!
//! ```text
//! App
//! ├── lists: Vec<ListSummary>            // replaced wholesale on reload
//! ├── tasks: Option<Vec<TaskSummary>>    // None = task pane not shown
//! ├── nav: NavigationState               // focus + selected indices
//! ├── status_message: String             // status line text
//! ├── pending: Option<PendingOperation>  // single-flight request slot
//! ├── prompt: Option<PromptSequence>     // active prompt sequence
//! └── time_parser: Arc<dyn TimeParser>   // reminder text -> timestamp
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;
use std::time::Instant;

use crate::core::navigation::NavigationState;
use crate::core::prompt::PromptSequence;
use crate::core::time_expr::{LocalTimeParser, TimeParser};
use crate::service::{ListSummary, Request, TaskSummary};

/// An in-flight service call and the label driving the busy indicator.
#[derive(Debug, Clone)]
pub struct PendingOperation {
    pub request: Request,
    pub label: &'static str,
    pub started: Instant,
}

impl PendingOperation {
    pub fn new(request: Request) -> Self {
        Self {
            label: request.status_label(),
            request,
            started: Instant::now(),
        }
    }
}

pub struct App {
    pub lists: Vec<ListSummary>,
    pub tasks: Option<Vec<TaskSummary>>,
    pub nav: NavigationState,
    pub status_message: String,
    pub pending: Option<PendingOperation>,
    pub prompt: Option<PromptSequence>,
    pub time_parser: Arc<dyn TimeParser>,
}

impl App {
    pub fn new(time_parser: Arc<dyn TimeParser>) -> Self {
        Self {
            lists: Vec::new(),
            tasks: None,
            nav: NavigationState::new(),
            status_message: String::from("Press ? for help"),
            pending: None,
            prompt: None,
            time_parser,
        }
    }

    pub fn selected_list(&self) -> Option<&ListSummary> {
        self.lists.get(self.nav.list_index)
    }

    pub fn selected_task(&self) -> Option<&TaskSummary> {
        self.tasks.as_ref()?.get(self.nav.task_index)
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Arc::new(LocalTimeParser))
    }
}
