//! # Core Application Logic
//!
//! The controller's state machine. It knows nothing about any specific UI
//! technology and performs no I/O: requests leave as `Effect`s and results
//! come back as `Action`s.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (state)          │
//!                    │  • Action → update()    │
//!                    │  • Effect (requests)    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐                ┌────────────┐
//!          │    TUI     │                │  Service   │
//!          │  (ratatui) │ ── Effect ──▶  │  (runner)  │
//!          └────────────┘                └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all UI state in one place
//! - [`action`]: `Action`, `Command`, `Effect` and the `update()` reducer
//! - [`navigation`]: pane focus and wrap/clamp index movement
//! - [`prompt`]: multi-step prompt sequences
//! - [`typeahead`]: key buffering across focus gaps
//! - [`time_expr`]: reminder text parsing
//! - [`config`]: settings resolution

pub mod action;
pub mod config;
pub mod navigation;
pub mod prompt;
pub mod state;
pub mod time_expr;
pub mod typeahead;
