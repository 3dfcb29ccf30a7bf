//! # ListPane Component
//!
//! Left pane: every task list the service returned, with the selected one
//! highlighted. Follows the transient wrapper pattern: created each frame
//! from borrowed `App` data, holds no state of its own.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Paragraph};

use crate::service::ListSummary;
use crate::tui::component::Component;

pub struct ListPane<'a> {
    pub lists: &'a [ListSummary],
    pub selected: usize,
    pub focused: bool,
}

impl<'a> ListPane<'a> {
    pub fn new(lists: &'a [ListSummary], selected: usize, focused: bool) -> Self {
        Self {
            lists,
            selected,
            focused,
        }
    }
}

/// Bordered pane block, brighter when the pane holds focus.
pub(super) fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(format!(" {title} "))
}

pub(super) fn highlight_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    }
}

impl Component for ListPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = pane_block("Lists", self.focused);

        if self.lists.is_empty() {
            let empty = Paragraph::new("-- No Lists --")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .lists
            .iter()
            .map(|list| ListItem::new(list.display_name.as_str()))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight_style(self.focused));

        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
