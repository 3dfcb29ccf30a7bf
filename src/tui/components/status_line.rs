//! # StatusLine Component
//!
//! Bottom line when no prompt is active. While a request is in flight it
//! shows a spinner and the operation label; otherwise the last status
//! message (errors, help text).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct StatusLine<'a> {
    /// Spinner glyph and label of the in-flight operation, if any.
    pub busy: Option<(char, &'a str)>,
    pub message: &'a str,
}

impl<'a> StatusLine<'a> {
    pub fn new(busy: Option<(char, &'a str)>, message: &'a str) -> Self {
        Self { busy, message }
    }
}

impl Component for StatusLine<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = match self.busy {
            Some((frame_char, label)) => Line::from(vec![
                Span::styled(format!("{frame_char} "), Style::default().fg(Color::Cyan)),
                Span::raw(format!("{label}...")),
            ]),
            None => Line::from(Span::styled(self.message, Style::default().fg(Color::Gray))),
        };
        frame.render_widget(line, area);
    }
}
