//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Input Focus
//!
//! Exactly one thing receives a key event: the prompt's `LineInput` while a
//! prompt is being answered, otherwise the focused pane via the `KeyMap`.
//! While a request is in flight nothing holds focus, and events go to the
//! `Typeahead` buffer. They are replayed in order as soon as a holder exists
//! again. `ForceQuit` bypasses all of this.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (request in flight): draws every ~80ms to animate the spinner.
//! - **Idle**: sleeps up to 500ms, only redraws on events or finished requests.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod keymap;
mod runner;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::core::typeahead::Typeahead;
use crate::service::TaskService;
use crate::tui::component::EventHandler;
use crate::tui::components::{LineEvent, LineInput};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::keymap::{Key, KeyMap};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub service_name: String,
    /// Editor for the current prompt step. Detached after every commit and
    /// attached again by `settle` if the prompt continues.
    pub prompt_input: Option<LineInput>,
}

impl TuiState {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            prompt_input: None,
        }
    }
}

/// Owns everything the event loop mutates. Free of terminal I/O so it can be
/// driven directly in tests.
pub struct Controller {
    pub app: App,
    pub tui: TuiState,
    typeahead: Typeahead<TuiEvent>,
    keymap: KeyMap,
}

impl Controller {
    pub fn new(app: App, tui: TuiState, keymap: KeyMap) -> Self {
        Self {
            app,
            tui,
            typeahead: Typeahead::new(),
            keymap,
        }
    }

    pub fn has_focus_holder(&self) -> bool {
        has_focus_holder(&self.app, &self.tui)
    }

    pub fn buffered_events(&self) -> usize {
        self.typeahead.len()
    }

    /// Route one terminal event. Returns the effects it produced, in order.
    pub fn handle_event(&mut self, event: TuiEvent) -> Vec<Effect> {
        match event {
            TuiEvent::ForceQuit => return vec![update(&mut self.app, Action::Quit)],
            TuiEvent::Resize => return Vec::new(),
            _ => {}
        }

        // Earlier buffered events must be delivered first
        if self.typeahead.is_engaged() || !self.has_focus_holder() {
            debug!("Buffering {:?} ({} queued)", event, self.typeahead.len());
            self.typeahead.capture(event);
            return self.flush();
        }

        let effect = dispatch(&mut self.app, &mut self.tui, &self.keymap, event);
        settle(&self.app, &mut self.tui);
        let mut effects = collect(effect);
        effects.extend(self.flush());
        effects
    }

    /// Apply an action from outside the key path (startup, finished requests).
    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        let effect = update(&mut self.app, action);
        settle(&self.app, &mut self.tui);
        let mut effects = collect(effect);
        effects.extend(self.flush());
        effects
    }

    /// Replay buffered events if something holds focus again.
    fn flush(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if !self.typeahead.is_engaged() || !self.has_focus_holder() {
            return effects;
        }

        let Controller {
            app,
            tui,
            typeahead,
            keymap,
        } = self;
        let replayed = typeahead.replay(|event| {
            effects.extend(collect(dispatch(app, tui, keymap, event)));
            settle(app, tui);
            has_focus_holder(app, tui)
        });
        debug!(
            "Replayed {} buffered events ({} still queued)",
            replayed,
            typeahead.len()
        );
        effects
    }
}

fn collect(effect: Effect) -> Vec<Effect> {
    match effect {
        Effect::None => Vec::new(),
        other => vec![other],
    }
}

fn has_focus_holder(app: &App, tui: &TuiState) -> bool {
    if app.is_busy() {
        return false;
    }
    app.prompt.is_none() || tui.prompt_input.is_some()
}

/// Attach or detach the prompt editor to match the core state.
fn settle(app: &App, tui: &mut TuiState) {
    match &app.prompt {
        None => tui.prompt_input = None,
        Some(prompt) if tui.prompt_input.is_none() && !app.is_busy() => {
            if let Some(label) = prompt.current_label() {
                debug!("Attaching prompt editor: {:?}", label);
                tui.prompt_input = Some(LineInput::new(label));
            }
        }
        Some(_) => {}
    }
}

/// Deliver an event to whoever holds focus.
fn dispatch(app: &mut App, tui: &mut TuiState, keymap: &KeyMap, event: TuiEvent) -> Effect {
    if let Some(input) = tui.prompt_input.as_mut() {
        return match input.handle_event(&event) {
            Some(LineEvent::Commit(text)) => {
                tui.prompt_input = None;
                update(app, Action::PromptCommit(text))
            }
            Some(LineEvent::Cancel) => {
                tui.prompt_input = None;
                update(app, Action::PromptCancel)
            }
            Some(LineEvent::Changed) | None => Effect::None,
        };
    }

    match Key::from_event(&event).and_then(|key| keymap.resolve(app.nav.focused, key)) {
        Some(command) => update(app, Action::Command(command)),
        None => {
            debug!("Unbound {:?} on {:?}", event, app.nav.focused);
            Effect::None
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Show cursor for prompt editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            Hide
        );
    }
}

const BUSY_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Run the event loop until the user quits. Must be called from inside a
/// tokio runtime; requests are spawned onto it.
pub fn run(config: ResolvedConfig, service: Arc<dyn TaskService>) -> std::io::Result<()> {
    let tui = TuiState::new(service.name());
    let mut controller = Controller::new(App::default(), tui, KeyMap::default());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for finished requests
    let (tx, rx) = mpsc::channel();

    let mut should_quit = false;
    let mut needs_redraw = true; // Force first frame

    let spawn = |effects: Vec<Effect>, should_quit: &mut bool| {
        for effect in effects {
            match effect {
                Effect::Spawn(request) => {
                    runner::spawn_request(
                        service.clone(),
                        request,
                        config.max_tasks,
                        config.request_timeout,
                        tx.clone(),
                    );
                }
                Effect::Quit => *should_quit = true,
                Effect::None => {}
            }
        }
    };

    spawn(controller.apply(Action::Init), &mut should_quit);

    while !should_quit {
        let busy = controller.app.is_busy();
        if busy {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &controller.app, &mut controller.tui))?;
            needs_redraw = false;
        }

        let timeout = if busy { BUSY_POLL } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            spawn(controller.handle_event(event), &mut should_quit);
            if should_quit {
                break;
            }
        }

        // Handle finished requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            spawn(controller.apply(action), &mut should_quit);
        }
    }

    info!("Quitting");
    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::navigation::Pane;
    use crate::service::{Request, Response};
    use crate::test_support::{app_with_lists, sample_task};

    fn controller(lists: &[(&str, &str)]) -> Controller {
        Controller::new(app_with_lists(lists), TuiState::new("mock"), KeyMap::default())
    }

    fn key(c: char) -> TuiEvent {
        TuiEvent::InputChar(c)
    }

    fn typed(controller: &mut Controller, text: &str) -> Vec<Effect> {
        text.chars()
            .flat_map(|c| controller.handle_event(key(c)))
            .collect()
    }

    fn finish(controller: &mut Controller, result: Response) -> Vec<Effect> {
        let request = controller
            .app
            .pending
            .as_ref()
            .expect("a request is pending")
            .request
            .clone();
        controller.apply(Action::RequestFinished {
            request,
            result: Ok(result),
        })
    }

    fn load_tasks(list_id: &str) -> Effect {
        Effect::Spawn(Request::LoadTasks {
            list_id: list_id.to_string(),
        })
    }

    #[test]
    fn test_select_spawns_exactly_one_task_load() {
        let mut c = controller(&[("A", "Work"), ("B", "Home")]);

        assert_eq!(c.handle_event(key('j')), Vec::new());
        assert_eq!(c.handle_event(TuiEvent::Submit), vec![load_tasks("B")]);
        // Second select lands in the buffer, not on the service
        assert_eq!(c.handle_event(TuiEvent::Submit), Vec::new());
        assert_eq!(c.buffered_events(), 1);

        let effects = finish(
            &mut c,
            Response::Tasks {
                list_id: "B".into(),
                tasks: vec![sample_task("t1", "One")],
            },
        );
        // Replayed Enter hits the task pane, where it means nothing
        assert_eq!(effects, Vec::new());
        assert_eq!(c.app.nav.focused, Pane::Tasks);
        assert_eq!(c.buffered_events(), 0);
    }

    #[test]
    fn test_keys_typed_while_loading_are_replayed_in_order() {
        let mut c = controller(&[("A", "Work")]);
        c.handle_event(key('l'));
        assert!(!c.has_focus_holder());

        // j j k while the tasks load
        assert!(typed(&mut c, "jjk").is_empty());
        assert_eq!(c.buffered_events(), 3);

        let tasks = vec![
            sample_task("t1", "One"),
            sample_task("t2", "Two"),
            sample_task("t3", "Three"),
        ];
        finish(
            &mut c,
            Response::Tasks {
                list_id: "A".into(),
                tasks,
            },
        );
        assert_eq!(c.app.nav.task_index, 1);
    }

    #[test]
    fn test_back_produces_no_effects() {
        let mut c = controller(&[("A", "Work")]);
        c.handle_event(key('l'));
        finish(
            &mut c,
            Response::Tasks {
                list_id: "A".into(),
                tasks: Vec::new(),
            },
        );

        assert_eq!(c.handle_event(key('h')), Vec::new());
        assert_eq!(c.app.nav.focused, Pane::Lists);
        assert!(c.app.tasks.is_none());
    }

    #[test]
    fn test_rapid_reloads_never_overlap() {
        let mut c = controller(&[("A", "Work")]);

        let first = c.handle_event(key('r'));
        let second = c.handle_event(key('r'));
        assert_eq!(first, vec![Effect::Spawn(Request::LoadLists)]);
        assert_eq!(second, Vec::new());

        // The second reload starts only once the first has finished
        let lists = c.app.lists.clone();
        let after = finish(&mut c, Response::Lists(lists.clone()));
        assert_eq!(after, vec![Effect::Spawn(Request::LoadLists)]);
        assert!(c.app.is_busy());

        assert_eq!(finish(&mut c, Response::Lists(lists)), Vec::new());
        assert!(!c.app.is_busy());
    }

    #[test]
    fn test_force_quit_bypasses_buffer() {
        let mut c = controller(&[("A", "Work")]);
        c.handle_event(key('r'));
        assert!(!c.has_focus_holder());
        assert_eq!(c.handle_event(TuiEvent::ForceQuit), vec![Effect::Quit]);
        assert_eq!(c.buffered_events(), 0);
    }

    #[test]
    fn test_prompt_editor_attaches_and_receives_keys() {
        let mut c = controller(&[("A", "Work")]);
        c.handle_event(key('n'));
        assert!(c.tui.prompt_input.is_some());

        // Pane bindings are plain text inside the prompt
        assert!(typed(&mut c, "jobs").is_empty());
        assert_eq!(c.app.nav.list_index, 0);

        let effects = c.handle_event(TuiEvent::Submit);
        assert_eq!(
            effects,
            vec![Effect::Spawn(Request::CreateList {
                display_name: "jobs".into()
            })]
        );
        assert!(c.tui.prompt_input.is_none());
    }

    #[test]
    fn test_two_step_prompt_reattaches_editor_between_steps() {
        let mut c = controller(&[("A", "Work")]);
        c.handle_event(key('l'));
        finish(
            &mut c,
            Response::Tasks {
                list_id: "A".into(),
                tasks: Vec::new(),
            },
        );

        c.handle_event(key('n'));
        typed(&mut c, "Buy milk");
        c.handle_event(TuiEvent::Submit);

        let label = c.tui.prompt_input.as_ref().map(|i| i.label.clone());
        assert_eq!(label.as_deref(), Some("Reminder (optional): "));
        assert!(c.tui.prompt_input.as_ref().is_some_and(|i| i.buffer.is_empty()));

        let effects = c.handle_event(TuiEvent::Submit);
        assert_eq!(
            effects,
            vec![Effect::Spawn(Request::CreateTask {
                list_id: "A".into(),
                title: "Buy milk".into(),
                reminder_at: None,
            })]
        );
    }

    #[test]
    fn test_keys_typed_during_mutation_go_to_next_prompt() {
        let mut c = controller(&[("A", "Work")]);
        c.handle_event(key('n'));
        typed(&mut c, "Groceries");
        c.handle_event(TuiEvent::Submit);
        assert!(c.app.is_busy());

        // "n" then a name, typed before the create round trip completes
        assert!(typed(&mut c, "nX").is_empty());
        assert_eq!(c.buffered_events(), 2);

        // CreateList done: the chained reload opens a new gap, keys stay queued
        let reload = finish(&mut c, Response::Done);
        assert_eq!(reload, vec![Effect::Spawn(Request::LoadLists)]);
        assert_eq!(c.buffered_events(), 2);

        let lists = app_with_lists(&[("A", "Work"), ("G", "Groceries")]).lists;
        finish(&mut c, Response::Lists(lists));

        // "n" opened a prompt and "X" landed in its editor
        assert!(c.app.prompt.is_some());
        let buffer = c.tui.prompt_input.as_ref().map(|i| i.buffer.clone());
        assert_eq!(buffer.as_deref(), Some("X"));
    }

    #[test]
    fn test_escape_cancels_prompt() {
        let mut c = controller(&[("A", "Work")]);
        c.handle_event(key('d'));
        assert!(c.app.prompt.is_some());
        assert_eq!(c.handle_event(TuiEvent::Escape), Vec::new());
        assert!(c.app.prompt.is_none());
        assert!(c.tui.prompt_input.is_none());
    }

    #[test]
    fn test_resize_is_never_buffered() {
        let mut c = controller(&[("A", "Work")]);
        c.handle_event(key('r'));
        assert_eq!(c.handle_event(TuiEvent::Resize), Vec::new());
        assert_eq!(c.buffered_events(), 0);
    }
}
