//! Core application state and lifecycle.

use crate::event_handler::{EventHandler, InputEvent};
use crate::ui::{UiAction, UiState};
use drawboard_core::config::AppConfig;
use drawboard_core::decode::decode_image;
use drawboard_core::document::{Page, Project};
use drawboard_core::editor::{CanvasEditor, EditOutcome, PendingImage};
use drawboard_core::projects::{ProjectCollection, ProjectError};
use drawboard_core::session::{Route, Session, SessionError};
use drawboard_core::storage::{ProjectStore, Storage, StorageError};
use drawboard_render::{RenderContext, Renderer, RendererError, SceneGraph};
use pollster::block_on;
use thiserror::Error;

/// Message shown when the editor route names an unknown project.
pub const PROJECT_NOT_FOUND: &str = "Project not found.";

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("No project is open")]
    NoOpenProject,
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// The application shell.
///
/// Owns the session, the logged-in user's project collection and the
/// editor for the active page. Every change to the collection is written
/// back to storage before the call returns.
pub struct App<S: Storage> {
    config: AppConfig,
    store: ProjectStore<S>,
    session: Session,
    route: Route,
    /// Unset until a user is logged in.
    projects: Option<ProjectCollection>,
    page_index: usize,
    editor: CanvasEditor,
    events: EventHandler,
    ui: UiState,
    scene: SceneGraph,
}

fn find_page<'a>(
    projects: &'a Option<ProjectCollection>,
    route: &Route,
    index: usize,
) -> Option<&'a Page> {
    let Route::Editor { project_id } = route else {
        return None;
    };
    projects.as_ref()?.find(project_id)?.page(index)
}

fn find_page_mut<'a>(
    projects: &'a mut Option<ProjectCollection>,
    route: &Route,
    index: usize,
) -> Option<&'a mut Page> {
    let Route::Editor { project_id } = route else {
        return None;
    };
    projects.as_mut()?.find_mut(project_id)?.page_mut(index)
}

impl<S: Storage> App<S> {
    /// Start the shell, restoring the stored session.
    pub fn new(config: AppConfig, storage: S) -> AppResult<Self> {
        let store = ProjectStore::new(storage);
        let session = block_on(store.load_session())?;
        let projects = match session.user() {
            Some(user) => Some(block_on(store.load_projects(user))?),
            None => None,
        };
        let route = Route::Projects.guard(&session);
        log::info!("Starting at {route}");

        Ok(Self {
            editor: CanvasEditor::new(config.canvas_size),
            config,
            store,
            session,
            route,
            projects,
            page_index: 0,
            events: EventHandler::new(),
            ui: UiState::default(),
            scene: SceneGraph::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// The logged-in user's projects.
    pub fn projects(&self) -> Option<&ProjectCollection> {
        self.projects.as_ref()
    }

    pub fn editor(&self) -> &CanvasEditor {
        &self.editor
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Zero-based index of the active page.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// The project shown by the editor route.
    pub fn current_project(&self) -> Option<&Project> {
        let Route::Editor { project_id } = &self.route else {
            return None;
        };
        self.projects.as_ref()?.find(project_id)
    }

    fn current_project_mut(&mut self) -> Option<&mut Project> {
        let Route::Editor { project_id } = &self.route else {
            return None;
        };
        self.projects.as_mut()?.find_mut(project_id)
    }

    /// The active page.
    pub fn current_page(&self) -> Option<&Page> {
        find_page(&self.projects, &self.route, self.page_index)
    }

    /// Canvas point of an unanswered text-tool click.
    pub fn pending_text(&self) -> Option<kurbo::Point> {
        self.events.pending_text()
    }

    /// Log in and load the user's collection. On failure the inline
    /// message is set and nothing else changes.
    pub fn login(&mut self, username: &str, password: &str) -> AppResult<()> {
        let mut session = self.session.clone();
        if let Err(e) = session.login(username, password) {
            log::warn!("Login failed for {username}");
            self.ui.set_message(e.to_string());
            return Err(e.into());
        }
        // The session is committed only once the collection is loaded.
        let projects = block_on(self.store.load_projects(username))?;
        log::info!("Logged in as {username}");
        self.session = session;
        self.save_session();
        self.projects = Some(projects);
        self.navigate(Route::Projects);
        Ok(())
    }

    /// Log out. Persisted projects stay in storage.
    pub fn logout(&mut self) {
        if let Some(user) = self.session.user() {
            log::info!("Logged out {user}");
        }
        self.session.logout();
        self.save_session();
        self.projects = None;
        self.navigate(Route::Login);
    }

    /// Go to a screen, redirected by the login guard.
    pub fn navigate(&mut self, route: Route) {
        let route = route.guard(&self.session);
        self.editor.reset_for_page();
        self.events.reset();
        self.page_index = 0;
        self.ui.clear_message();
        self.route = route;
        if matches!(self.route, Route::Editor { .. }) && self.current_project().is_none() {
            self.ui.set_message(PROJECT_NOT_FOUND);
        }
        self.refresh_page_label();
    }

    /// Open a project by id in the editor.
    pub fn open_project(&mut self, project_id: &str) {
        self.navigate(Route::Editor {
            project_id: project_id.to_string(),
        });
    }

    /// Create a project, persist, and open it. Returns the new id.
    pub fn create_project(&mut self, title: &str) -> AppResult<String> {
        let projects = self.projects.as_mut().ok_or(AppError::NotLoggedIn)?;
        let id = projects.create(title)?.id.clone();
        log::info!("Created project {id}");
        self.persist();
        self.open_project(&id);
        Ok(id)
    }

    /// Delete every project of the user. Does nothing unless confirmed.
    pub fn clear_all(&mut self, confirmed: bool) -> AppResult<bool> {
        if !confirmed {
            return Ok(false);
        }
        let user = self.session.user().ok_or(AppError::NotLoggedIn)?;
        let projects = self.projects.as_mut().ok_or(AppError::NotLoggedIn)?;
        projects.clear_all();
        block_on(self.store.clear_projects(user))?;
        log::info!("Deleted all projects of {user}");
        self.navigate(Route::Projects);
        Ok(true)
    }

    pub fn prev_page(&mut self) -> AppResult<()> {
        self.current_project().ok_or(AppError::NoOpenProject)?;
        if self.page_index > 0 {
            self.switch_page(self.page_index - 1);
        }
        Ok(())
    }

    pub fn next_page(&mut self) -> AppResult<()> {
        let count = self
            .current_project()
            .ok_or(AppError::NoOpenProject)?
            .page_count();
        if self.page_index + 1 < count {
            self.switch_page(self.page_index + 1);
        }
        Ok(())
    }

    /// Append an empty page and go to it.
    pub fn add_page(&mut self) -> AppResult<()> {
        let project = self.current_project_mut().ok_or(AppError::NoOpenProject)?;
        let index = project.add_page();
        log::info!("Added page {} to {}", index + 1, project.title);
        self.persist();
        self.switch_page(index);
        Ok(())
    }

    fn switch_page(&mut self, index: usize) {
        self.page_index = index;
        self.editor.reset_for_page();
        self.events.reset();
        self.refresh_page_label();
    }

    fn refresh_page_label(&mut self) {
        self.ui.page_label = self
            .current_project()
            .map(|project| format!("Page {} / {}", self.page_index + 1, project.page_count()));
    }

    /// Apply a UI control action.
    pub fn apply_action(&mut self, action: UiAction) -> AppResult<()> {
        match action {
            UiAction::SetTool(tool) => self.editor.set_tool(tool),
            UiAction::SetColor(color) => self.editor.settings.set_color(color),
            UiAction::SetThickness(thickness) => self.editor.settings.set_thickness(thickness),
            UiAction::SetZoom(zoom) => self.editor.settings.set_zoom(zoom),
            UiAction::SetFontSize(size) => self.editor.settings.set_font_size(size),
            UiAction::SetFontFamily(family) => self.editor.settings.set_font_family(family),
            UiAction::Undo => {
                self.edit_page(|editor, page| editor.undo(page))?;
            }
            UiAction::Redo => {
                self.edit_page(|editor, page| editor.redo(page))?;
            }
            UiAction::BringForward => {
                self.edit_page(|editor, page| editor.bring_forward(page))?;
            }
            UiAction::SendBackward => {
                self.edit_page(|editor, page| editor.send_backward(page))?;
            }
            UiAction::PrevPage => self.prev_page()?,
            UiAction::NextPage => self.next_page()?,
            UiAction::AddPage => self.add_page()?,
            UiAction::CreateProject(title) => {
                self.create_project(&title)?;
            }
            UiAction::OpenProject(id) => self.open_project(&id),
            UiAction::ClearAll { confirmed } => {
                self.clear_all(confirmed)?;
            }
            UiAction::BackToProjects => self.navigate(Route::Projects),
            UiAction::Logout => self.logout(),
        }
        Ok(())
    }

    /// Run an editor operation on the active page, persisting on change.
    pub fn edit_page(
        &mut self,
        edit: impl FnOnce(&mut CanvasEditor, &mut Page) -> EditOutcome,
    ) -> AppResult<EditOutcome> {
        let page = find_page_mut(&mut self.projects, &self.route, self.page_index)
            .ok_or(AppError::NoOpenProject)?;
        let outcome = edit(&mut self.editor, page);
        if outcome.is_changed() {
            self.persist();
        }
        Ok(outcome)
    }

    /// Route a canvas input event. Dropped images are decoded and placed
    /// before this returns.
    pub fn handle_event(&mut self, event: InputEvent) -> AppResult<EditOutcome> {
        let page = find_page_mut(&mut self.projects, &self.route, self.page_index)
            .ok_or(AppError::NoOpenProject)?;
        let outcome = self.events.handle(&mut self.editor, page, event);
        let pending = self.events.take_pending_images();

        let placed = if pending.is_empty() {
            0
        } else {
            self.place_images(pending)?
        };

        if outcome.is_changed() || placed > 0 {
            self.persist();
            return Ok(EditOutcome::Changed);
        }
        Ok(outcome)
    }

    /// Decode dropped images and add them to the active page.
    /// Files that fail to decode are skipped.
    fn place_images(&mut self, pending: Vec<PendingImage>) -> AppResult<usize> {
        let decoded: Vec<_> = pending
            .into_iter()
            .filter_map(|PendingImage { slot, file }| {
                let name = file.name.clone();
                match block_on(decode_image(file)) {
                    Ok(image) => Some((slot, image)),
                    Err(e) => {
                        log::warn!("Skipping dropped file {name}: {e}");
                        None
                    }
                }
            })
            .collect();

        let page = find_page_mut(&mut self.projects, &self.route, self.page_index)
            .ok_or(AppError::NoOpenProject)?;
        for (slot, image) in &decoded {
            self.editor.complete_image(page, *slot, image);
        }
        Ok(decoded.len())
    }

    /// Answer the text prompt, or replace the value of the open inline edit.
    pub fn submit_text(&mut self, content: &str) -> AppResult<EditOutcome> {
        match self.events.take_pending_text() {
            Some(position) => {
                self.edit_page(|editor, page| editor.commit_text(page, position, content))
            }
            None if self.editor.text_edit().is_some() => {
                self.edit_page(|editor, page| editor.set_text_value(page, content))
            }
            None => Ok(EditOutcome::Unchanged),
        }
    }

    /// Build the scene for the active page.
    pub fn render(&mut self) -> AppResult<&SceneGraph> {
        let page = find_page(&self.projects, &self.route, self.page_index)
            .ok_or(AppError::NoOpenProject)?;
        let ctx = RenderContext::for_editor(page, &self.editor, self.config.canvas_size);
        self.scene.build_scene(&ctx);
        Ok(&self.scene)
    }

    fn persist(&self) {
        let (Some(user), Some(projects)) = (self.session.user(), &self.projects) else {
            return;
        };
        if let Err(e) = block_on(self.store.save_projects(user, projects)) {
            log::error!("Failed to save projects for {user}: {e}");
        }
    }

    fn save_session(&self) {
        if let Err(e) = block_on(self.store.save_session(&self.session)) {
            log::error!("Failed to save session: {e}");
        }
    }
}
