use crate::core::navigation::Pane;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ListPane, StatusLine, TaskPane, TitleBar};
use crate::tui::runner::spinner_frame;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::Span;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min, Percentage};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, bottom_area] = layout.areas(frame.area());
    let [lists_area, tasks_area] =
        Layout::horizontal([Percentage(35), Percentage(65)]).areas(main_area);

    TitleBar::new(&tui.service_name, app.nav.focused).render(frame, title_area);

    ListPane::new(&app.lists, app.nav.list_index, app.nav.focused == Pane::Lists)
        .render(frame, lists_area);

    let task_title = match (&app.tasks, app.selected_list()) {
        (Some(_), Some(list)) => list.display_name.as_str(),
        _ => "Tasks",
    };
    TaskPane::new(
        task_title,
        app.tasks.as_deref(),
        app.nav.task_index,
        app.nav.focused == Pane::Tasks,
    )
    .render(frame, tasks_area);

    // Bottom line: prompt editor, else spinner/status
    match (&app.prompt, tui.prompt_input.as_mut()) {
        (Some(_), Some(input)) => input.render(frame, bottom_area),
        (Some(prompt), None) => {
            let label = prompt.current_label().unwrap_or_default();
            frame.render_widget(Span::raw(label), bottom_area);
        }
        (None, _) => {
            let busy = app
                .pending
                .as_ref()
                .map(|p| (spinner_frame(p.started.elapsed()), p.label));
            StatusLine::new(busy, &app.status_message).render(frame, bottom_area);
        }
    }
}
