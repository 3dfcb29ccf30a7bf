//! # TaskPane Component
//!
//! Right pane: the open tasks of the selected list. `None` means no list has
//! been opened, which renders an empty frame; `Some(&[])` is an opened list
//! with nothing left to do.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::service::TaskSummary;
use crate::tui::component::Component;

use super::list_pane::{highlight_style, pane_block};

pub struct TaskPane<'a> {
    pub title: &'a str,
    pub tasks: Option<&'a [TaskSummary]>,
    pub selected: usize,
    pub focused: bool,
}

impl<'a> TaskPane<'a> {
    pub fn new(
        title: &'a str,
        tasks: Option<&'a [TaskSummary]>,
        selected: usize,
        focused: bool,
    ) -> Self {
        Self {
            title,
            tasks,
            selected,
            focused,
        }
    }
}

fn format_timestamp(task: &TaskSummary) -> String {
    task.relevant_timestamp()
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

impl Component for TaskPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = pane_block(self.title, self.focused);

        let tasks = match self.tasks {
            None => {
                frame.render_widget(block, area);
                return;
            }
            Some([]) => {
                let empty = Paragraph::new("-- No Tasks --")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block);
                frame.render_widget(empty, area);
                return;
            }
            Some(tasks) => tasks,
        };

        let items: Vec<ListItem> = tasks
            .iter()
            .map(|task| {
                ListItem::new(Line::from(vec![
                    Span::styled(format_timestamp(task), Style::default().fg(Color::DarkGray)),
                    Span::raw("  "),
                    Span::raw(task.title.as_str()),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight_style(self.focused));

        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
