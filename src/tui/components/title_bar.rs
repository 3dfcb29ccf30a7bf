//! # TitleBar Component
//!
//! Top line: application name, the backend in use, and which pane holds
//! focus. Purely presentational; all data arrives as props.

use crate::core::navigation::Pane;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar<'a> {
    /// Backend name (e.g. "graph")
    pub service_name: &'a str,
    pub focused: Pane,
}

impl<'a> TitleBar<'a> {
    pub fn new(service_name: &'a str, focused: Pane) -> Self {
        Self {
            service_name,
            focused,
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let pane = match self.focused {
            Pane::Lists => "Lists",
            Pane::Tasks => "Tasks",
        };
        let line = Line::from(vec![
            Span::styled(" tod ", Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)),
            Span::raw(format!(" {} | {}", self.service_name, pane)),
        ]);
        frame.render_widget(line, area);
    }
}
