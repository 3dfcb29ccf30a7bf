//! # Actions
//!
//! Everything that can happen in tod becomes an `Action`.
//! User presses `j`? That's `Action::Command(Command::MoveDown)`.
//! The service answers? That's `Action::RequestFinished { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O to perform.
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::navigation::Pane;
use crate::core::prompt::{PromptOutcome, PromptPurpose, PromptSequence};
use crate::core::state::{App, PendingOperation};
use crate::service::{Request, Response, ServiceError};

pub const HELP_TEXT: &str = "[j/k] move  [l] select  [h] back  [n] new  [c] complete  \
    [d] delete  [r] refresh  [Esc] cancel  [Ctrl-Q] quit";

/// Pane-level commands produced by the key map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveUp,
    MoveDown,
    Select,
    Back,
    New,
    Complete,
    Delete,
    Refresh,
    Help,
}

#[derive(Debug)]
pub enum Action {
    /// Session start: fetch the lists.
    Init,
    Command(Command),
    /// The user accepted the current prompt's text.
    PromptCommit(String),
    PromptCancel,
    RequestFinished {
        request: Request,
        result: Result<Response, ServiceError>,
    },
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Hand the request to the async runner.
    Spawn(Request),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Init => begin(app, Request::LoadLists),
        Action::Command(command) => handle_command(app, command),
        Action::PromptCommit(text) => commit_prompt(app, text),
        Action::PromptCancel => {
            if let Some(mut prompt) = app.prompt.take() {
                let outcome = prompt.cancel();
                debug!("Prompt {:?} ended: {:?}", prompt.purpose, outcome);
                app.status_message.clear();
            }
            Effect::None
        }
        Action::RequestFinished { request, result } => finish_request(app, request, result),
        Action::Quit => Effect::Quit,
    }
}

fn handle_command(app: &mut App, command: Command) -> Effect {
    if app.prompt.is_some() {
        debug!("Ignoring {:?} while a prompt is active", command);
        return Effect::None;
    }

    match (app.nav.focused, command) {
        (Pane::Lists, Command::MoveUp) => {
            app.nav.move_selection(-1, app.lists.len());
            Effect::None
        }
        (Pane::Lists, Command::MoveDown) => {
            app.nav.move_selection(1, app.lists.len());
            Effect::None
        }
        (Pane::Tasks, Command::MoveUp) => {
            app.nav.move_selection(-1, app.tasks.as_ref().map_or(0, Vec::len));
            Effect::None
        }
        (Pane::Tasks, Command::MoveDown) => {
            app.nav.move_selection(1, app.tasks.as_ref().map_or(0, Vec::len));
            Effect::None
        }
        (Pane::Lists, Command::Select) => match app.selected_list() {
            Some(list) => {
                let request = Request::LoadTasks {
                    list_id: list.id.clone(),
                };
                let effect = begin(app, request);
                if effect != Effect::None {
                    app.nav.task_index = 0;
                }
                effect
            }
            None => Effect::None,
        },
        (Pane::Tasks, Command::Back) => {
            app.tasks = None;
            app.nav.task_index = 0;
            app.nav.focus(Pane::Lists);
            Effect::None
        }
        (Pane::Lists, Command::New) => start_prompt(app, PromptPurpose::NewList, &["New list: "]),
        (Pane::Tasks, Command::New) => match app.selected_list() {
            Some(list) => {
                let purpose = PromptPurpose::NewTask {
                    list_id: list.id.clone(),
                };
                start_prompt(app, purpose, &["New task: ", "Reminder (optional): "])
            }
            None => Effect::None,
        },
        (Pane::Tasks, Command::Complete) => {
            let Some((list_id, task_id, title)) = selected_task_ids(app) else {
                return Effect::None;
            };
            let label = format!("Mark \"{title}\" as complete? <y> to confirm: ");
            start_prompt(
                app,
                PromptPurpose::CompleteTask { list_id, task_id },
                &[label.as_str()],
            )
        }
        (Pane::Lists, Command::Delete) => {
            let Some(list) = app.selected_list() else {
                return Effect::None;
            };
            let label = format!("Delete list \"{}\"? <y> to confirm: ", list.display_name);
            let purpose = PromptPurpose::DeleteList {
                list_id: list.id.clone(),
            };
            start_prompt(app, purpose, &[label.as_str()])
        }
        (Pane::Tasks, Command::Delete) => {
            let Some((list_id, task_id, title)) = selected_task_ids(app) else {
                return Effect::None;
            };
            let label = format!("Delete task \"{title}\"? <y> to confirm: ");
            start_prompt(
                app,
                PromptPurpose::DeleteTask { list_id, task_id },
                &[label.as_str()],
            )
        }
        (Pane::Lists, Command::Refresh) => begin(app, Request::LoadLists),
        (Pane::Tasks, Command::Refresh) => match app.selected_list() {
            Some(list) => {
                let request = Request::LoadTasks {
                    list_id: list.id.clone(),
                };
                begin(app, request)
            }
            None => Effect::None,
        },
        (_, Command::Help) => {
            app.status_message = HELP_TEXT.to_string();
            Effect::None
        }
        (pane, command) => {
            debug!("{:?} has no meaning on {:?}", command, pane);
            Effect::None
        }
    }
}

fn selected_task_ids(app: &App) -> Option<(String, String, String)> {
    let list = app.selected_list()?;
    let task = app.selected_task()?;
    Some((list.id.clone(), task.id.clone(), task.title.clone()))
}

fn start_prompt(app: &mut App, purpose: PromptPurpose, labels: &[&str]) -> Effect {
    if app.is_busy() {
        debug!("Not starting prompt {:?}: request in flight", purpose);
        return Effect::None;
    }
    debug!("Starting prompt {:?}", purpose);
    let labels = labels.iter().map(|l| l.to_string()).collect();
    app.prompt = Some(PromptSequence::new(purpose, labels));
    app.status_message.clear();
    Effect::None
}

fn commit_prompt(app: &mut App, text: String) -> Effect {
    let Some(prompt) = app.prompt.as_mut() else {
        warn!("Prompt commit with no active prompt");
        return Effect::None;
    };
    match prompt.commit(text) {
        PromptOutcome::Pending => Effect::None,
        PromptOutcome::Completed(answers) => match app.prompt.take() {
            Some(prompt) => finish_prompt(app, prompt.purpose, answers),
            None => Effect::None,
        },
        PromptOutcome::Cancelled => {
            app.prompt = None;
            Effect::None
        }
    }
}

fn is_confirmed(answers: &[String]) -> bool {
    answers
        .first()
        .is_some_and(|a| a.trim().eq_ignore_ascii_case("y"))
}

fn finish_prompt(app: &mut App, purpose: PromptPurpose, answers: Vec<String>) -> Effect {
    let first = answers.first().map(|a| a.trim()).unwrap_or_default();

    match purpose {
        PromptPurpose::NewList => {
            if first.is_empty() {
                return Effect::None;
            }
            let request = Request::CreateList {
                display_name: first.to_string(),
            };
            begin(app, request)
        }
        PromptPurpose::NewTask { list_id } => {
            if first.is_empty() {
                return Effect::None;
            }
            let title = first.to_string();
            let reminder_text = answers.get(1).map(|a| a.trim()).unwrap_or_default();
            let reminder_at = if reminder_text.is_empty() {
                None
            } else {
                match app.time_parser.parse(reminder_text) {
                    Ok(at) => Some(at),
                    Err(e) => {
                        warn!("Reminder '{}' rejected: {}", reminder_text, e);
                        app.status_message = format!("Creating task failed: {e}");
                        return Effect::None;
                    }
                }
            };
            begin(
                app,
                Request::CreateTask {
                    list_id,
                    title,
                    reminder_at,
                },
            )
        }
        PromptPurpose::CompleteTask { list_id, task_id } if is_confirmed(&answers) => {
            begin(app, Request::CompleteTask { list_id, task_id })
        }
        PromptPurpose::DeleteList { list_id } if is_confirmed(&answers) => {
            begin(app, Request::DeleteList { list_id })
        }
        PromptPurpose::DeleteTask { list_id, task_id } if is_confirmed(&answers) => {
            begin(app, Request::DeleteTask { list_id, task_id })
        }
        other => {
            debug!("Prompt {:?} not confirmed", other);
            Effect::None
        }
    }
}

/// Claim the single-flight slot and ask for `request` to be spawned.
fn begin(app: &mut App, request: Request) -> Effect {
    if let Some(pending) = &app.pending {
        debug!(
            "Ignoring {:?}: {:?} already in flight",
            request, pending.request
        );
        return Effect::None;
    }
    info!("Starting request: {:?}", request);
    app.pending = Some(PendingOperation::new(request.clone()));
    Effect::Spawn(request)
}

fn finish_request(
    app: &mut App,
    request: Request,
    result: Result<Response, ServiceError>,
) -> Effect {
    app.pending = None;

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            warn!("{:?} failed: {}", request, e);
            app.status_message = format!("{} failed: {e}", request.status_label());
            return Effect::None;
        }
    };
    app.status_message.clear();

    match response {
        Response::Lists(lists) => {
            debug!("Loaded {} lists", lists.len());
            app.lists = lists;
            app.nav.clamp_lists(app.lists.len());
            Effect::None
        }
        Response::Tasks { list_id, tasks } => {
            if app.selected_list().map(|l| l.id.as_str()) != Some(list_id.as_str()) {
                debug!("Dropping tasks for list {}: no longer selected", list_id);
                return Effect::None;
            }
            debug!("Loaded {} tasks for list {}", tasks.len(), list_id);
            app.nav.clamp_tasks(tasks.len());
            app.tasks = Some(tasks);
            app.nav.focus(Pane::Tasks);
            Effect::None
        }
        Response::Done => match request {
            Request::CreateList { .. } | Request::DeleteList { .. } => {
                begin(app, Request::LoadLists)
            }
            Request::CreateTask { list_id, .. }
            | Request::CompleteTask { list_id, .. }
            | Request::DeleteTask { list_id, .. } => begin(app, Request::LoadTasks { list_id }),
            Request::LoadLists | Request::LoadTasks { .. } => Effect::None,
        },
    }
}
