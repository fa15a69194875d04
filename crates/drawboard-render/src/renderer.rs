//! Renderer trait abstraction.

use drawboard_core::document::Page;
use drawboard_core::editor::CanvasEditor;
use drawboard_core::shapes::{Element, ElementId};
use kurbo::Size;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The page to render, in paint order.
    pub page: &'a Page,
    /// Viewport size in screen pixels.
    pub viewport_size: Size,
    /// Zoom applied to everything on the canvas.
    pub zoom: f64,
    /// Background color.
    pub background_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Selected element.
    pub selected: Option<ElementId>,
    /// Element a tool gesture is building (drawn on top).
    pub preview: Option<&'a Element>,
    /// Element being dragged or transformed (drawn in place of the stored one).
    pub manipulated: Option<&'a Element>,
    /// Element under inline text edit (skipped in build_scene).
    pub editing_element_id: Option<ElementId>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(page: &'a Page, viewport_size: Size) -> Self {
        Self {
            page,
            viewport_size,
            zoom: 1.0,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            selection_color: Color::from_rgba8(0, 0, 255, 255),
            selected: None,
            preview: None,
            manipulated: None,
            editing_element_id: None,
        }
    }

    /// Context for the editor's current view of a page.
    pub fn for_editor(page: &'a Page, editor: &'a CanvasEditor, viewport_size: Size) -> Self {
        Self::new(page, viewport_size)
            .with_zoom(editor.settings.zoom())
            .with_selection(editor.selection())
            .with_preview(editor.preview())
            .with_manipulated(editor.manipulated())
            .with_editing_element(editor.text_edit().map(|edit| edit.element))
    }

    /// Set the zoom.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the selected element.
    pub fn with_selection(mut self, selected: Option<ElementId>) -> Self {
        self.selected = selected;
        self
    }

    /// Set the in-progress element.
    pub fn with_preview(mut self, preview: Option<&'a Element>) -> Self {
        self.preview = preview;
        self
    }

    /// Set the element being dragged or transformed.
    pub fn with_manipulated(mut self, element: Option<&'a Element>) -> Self {
        self.manipulated = element;
        self
    }

    /// Set the element being edited (will be skipped in build_scene).
    pub fn with_editing_element(mut self, id: Option<ElementId>) -> Self {
        self.editing_element_id = id;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the scene for a frame.
    ///
    /// Called after every change to the page or the editor state.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
