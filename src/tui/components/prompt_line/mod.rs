//! # LineInput Component
//!
//! Single-line text input shown in place of the status line while a prompt
//! is active.
//!
//! ## Responsibilities
//!
//! - Capture text input, including bracketed paste
//! - Handle editing (backspace, delete, cursor movement)
//! - Emit `Commit` on Enter (even when the text is empty) and `Cancel` on Esc
//!
//! The label is a prop; the buffer and cursor are internal state. A fresh
//! `LineInput` is attached for every prompt step, so nothing carries over
//! between steps.

mod cursor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::{CursorState, next_char_boundary, prev_char_boundary};

/// High-level events emitted by the LineInput
#[derive(Debug, Clone, PartialEq)]
pub enum LineEvent {
    /// User accepted the text (Enter pressed)
    Commit(String),
    /// User abandoned the prompt (Esc pressed)
    Cancel,
    Changed,
}

pub struct LineInput {
    /// Prompt label (Prop)
    pub label: String,
    /// Text buffer (Internal State)
    pub buffer: String,
    cursor: CursorState,
}

impl LineInput {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            buffer: String::new(),
            cursor: CursorState::new(),
        }
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
    }
}

impl Component for LineInput {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let cursor_col = (self.label.width() + self.cursor.column(&self.buffer)) as u16;
        // Keep the cursor on screen by scrolling long input to the left
        let scroll = cursor_col.saturating_sub(area.width.saturating_sub(1));

        let line = Line::from(vec![
            Span::styled(
                self.label.as_str(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(self.buffer.as_str()),
        ]);
        frame.render_widget(Paragraph::new(line).scroll((0, scroll)), area);
        frame.set_cursor_position((area.x + cursor_col - scroll, area.y));
    }
}

impl EventHandler for LineInput {
    type Event = LineEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.insert(c.encode_utf8(&mut [0; 4]));
                Some(LineEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                // Single line: pasted newlines become spaces
                let flat = text.replace(['\r', '\n'], " ");
                self.insert(&flat);
                Some(LineEvent::Changed)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(prev..self.cursor.pos);
                    self.cursor.pos = prev;
                    Some(LineEvent::Changed)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor.pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(self.cursor.pos..next);
                    Some(LineEvent::Changed)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => self.cursor.move_left(&self.buffer).then_some(LineEvent::Changed),
            TuiEvent::CursorRight => {
                self.cursor.move_right(&self.buffer).then_some(LineEvent::Changed)
            }
            TuiEvent::CursorHome => self.cursor.move_home().then_some(LineEvent::Changed),
            TuiEvent::CursorEnd => self.cursor.move_end(&self.buffer).then_some(LineEvent::Changed),
            TuiEvent::Submit => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor.pos = 0;
                Some(LineEvent::Commit(text))
            }
            TuiEvent::Escape => Some(LineEvent::Cancel),
            _ => None,
        }
    }
}
