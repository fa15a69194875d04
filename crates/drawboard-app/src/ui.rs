//! UI actions and the text rendering of the current screen.

use crate::app::App;
use drawboard_core::session::Route;
use drawboard_core::shapes::{FontFamily, SerializableColor};
use drawboard_core::storage::Storage;
use drawboard_core::tools::ToolKind;

/// Actions triggered by UI controls.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    // Toolbar
    SetTool(ToolKind),
    SetColor(SerializableColor),
    SetThickness(f64),
    SetZoom(f64),
    SetFontSize(f64),
    SetFontFamily(FontFamily),
    // History and layering
    Undo,
    Redo,
    BringForward,
    SendBackward,
    // Pages
    PrevPage,
    NextPage,
    AddPage,
    // Project list
    CreateProject(String),
    OpenProject(String),
    /// Delete every project. Ignored unless confirmed.
    ClearAll { confirmed: bool },
    BackToProjects,
    Logout,
}

/// Visible shell state that is not part of the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Inline message (login error, "Project not found.").
    pub message: Option<String>,
    /// Page indicator, e.g. "Page 1 / 3".
    pub page_label: Option<String>,
}

impl UiState {
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}

/// Render the current screen as lines of text.
pub fn render_ui<S: Storage>(app: &App<S>) -> Vec<String> {
    let mut lines = vec![format!("[{}]", app.route())];
    match app.route() {
        Route::Login => {
            lines.push("Login: login <username> <password>".to_string());
        }
        Route::Projects => {
            let user = app.session().user().unwrap_or_default();
            lines.push(format!("Projects of {user}"));
            match app.projects() {
                Some(projects) if !projects.is_empty() => {
                    for project in projects.iter() {
                        lines.push(format!(
                            "  {}  {} ({} pages)",
                            project.id,
                            project.title,
                            project.page_count()
                        ));
                    }
                }
                _ => lines.push("  No projects yet".to_string()),
            }
        }
        Route::Editor { .. } => {
            if let Some(project) = app.current_project() {
                let settings = &app.editor().settings;
                lines.push(project.title.clone());
                lines.push(format!(
                    "Tool: {}  Color: {}  Thickness: {}  Zoom: {}  Font: {} {}",
                    app.editor().tool(),
                    settings.color(),
                    settings.thickness(),
                    settings.zoom_label(),
                    settings.font_size(),
                    settings.font_family()
                ));
                if let Some(page) = app.current_page() {
                    lines.push(format!("{} elements", page.len()));
                }
            }
        }
    }
    if let Some(label) = &app.ui().page_label {
        lines.push(label.clone());
    }
    if let Some(message) = &app.ui().message {
        lines.push(message.clone());
    }
    lines
}
