//! Drawboard Application
//!
//! The application shell: session and routing, the per-user project
//! collection, persistence after every change, and input routing into
//! the canvas editor.

mod app;
mod commands;
mod event_handler;
mod shortcuts;
mod ui;

pub use app::{App, AppError, AppResult};
pub use commands::{Command, CommandError, PageCommand};
pub use event_handler::{EventHandler, InputEvent};
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry};
pub use ui::{UiAction, UiState, render_ui};
