//! # Key Map
//!
//! Resolves a key pressed while a pane holds focus into a `Command`.
//! Bindings are looked up in the focused pane's scope first, then in the
//! scope shared by both panes.

use std::collections::HashMap;

use crate::core::action::Command;
use crate::core::navigation::Pane;
use crate::tui::event::TuiEvent;

/// A key as the panes see it. Editing-only events have no `Key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    pub fn from_event(event: &TuiEvent) -> Option<Self> {
        match event {
            TuiEvent::InputChar(c) => Some(Key::Char(*c)),
            TuiEvent::Submit => Some(Key::Enter),
            TuiEvent::CursorUp => Some(Key::Up),
            TuiEvent::CursorDown => Some(Key::Down),
            TuiEvent::CursorLeft => Some(Key::Left),
            TuiEvent::CursorRight => Some(Key::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Lists,
    Tasks,
    /// Bindings active in either pane.
    Panes,
}

impl From<Pane> for Scope {
    fn from(pane: Pane) -> Self {
        match pane {
            Pane::Lists => Scope::Lists,
            Pane::Tasks => Scope::Tasks,
        }
    }
}

pub struct KeyMap {
    bindings: HashMap<(Scope, Key), Command>,
}

impl KeyMap {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn bind(&mut self, scope: Scope, key: Key, command: Command) {
        self.bindings.insert((scope, key), command);
    }

    pub fn resolve(&self, pane: Pane, key: Key) -> Option<Command> {
        self.bindings
            .get(&(Scope::from(pane), key))
            .or_else(|| self.bindings.get(&(Scope::Panes, key)))
            .copied()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        use Command::*;

        let mut map = Self::empty();
        for key in [Key::Char('j'), Key::Down] {
            map.bind(Scope::Panes, key, MoveDown);
        }
        for key in [Key::Char('k'), Key::Up] {
            map.bind(Scope::Panes, key, MoveUp);
        }
        for key in [Key::Char('l'), Key::Enter, Key::Right] {
            map.bind(Scope::Lists, key, Select);
        }
        for key in [Key::Char('h'), Key::Left] {
            map.bind(Scope::Tasks, key, Back);
        }
        map.bind(Scope::Tasks, Key::Char('c'), Complete);
        map.bind(Scope::Panes, Key::Char('n'), New);
        map.bind(Scope::Panes, Key::Char('d'), Delete);
        map.bind(Scope::Panes, Key::Char('r'), Refresh);
        map.bind(Scope::Panes, Key::Char('?'), Help);
        map
    }
}
