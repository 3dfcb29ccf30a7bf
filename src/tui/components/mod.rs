//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Created each frame from borrowed `App` data:
//! - `TitleBar`: top line with backend name and focused pane
//! - `ListPane`: task lists with the selection highlighted
//! - `TaskPane`: open tasks of the selected list
//! - `StatusLine`: spinner while busy, otherwise the status message
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `LineInput`: single-line prompt editor, lives in `TuiState` while a
//!   prompt step is being answered
//!
//! Components receive external data as props rather than reading `App`
//! directly, which keeps their dependencies explicit and testable.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs
//! ├── list_pane.rs
//! ├── task_pane.rs
//! ├── status_line.rs
//! └── prompt_line/     (LineInput + cursor tracking)
//! ```

mod list_pane;
pub mod prompt_line;
mod status_line;
mod task_pane;
mod title_bar;

pub use list_pane::ListPane;
pub use prompt_line::{LineEvent, LineInput};
pub use status_line::StatusLine;
pub use task_pane::TaskPane;
pub use title_bar::TitleBar;
