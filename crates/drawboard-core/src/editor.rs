//! The canvas editor: gestures, selection, history and layering for one page.
//!
//! The editor never owns a page. The shell lends it the active page for
//! every operation, and persists whenever an operation reports
//! [`EditOutcome::Changed`].

use crate::decode::{DecodedImage, DroppedFile};
use crate::document::Page;
use crate::handles::{Handle, HandleKind, apply_handle, hit_handle, image_handles};
use crate::input::Key;
use crate::shapes::{Element, ElementId, Image, Text};
use crate::text_edit::{TextEdit, TextEditResult};
use crate::toolbar::ToolSettings;
use crate::tools::{ToolKind, ToolManager};
use kurbo::{Point, Size, Vec2};

/// Pointer distance, in canvas units, that still counts as a hit.
pub const HIT_TOLERANCE: f64 = 4.0;

/// What an editor operation did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOutcome {
    /// The page is untouched.
    Unchanged,
    /// The page was modified and should be persisted.
    Changed,
    /// The text tool was clicked on empty canvas; the shell should ask for
    /// text and answer with [`CanvasEditor::commit_text`].
    TextPrompt(Point),
}

impl EditOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, EditOutcome::Changed)
    }
}

/// The editor's interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    /// A tool gesture is building an element.
    Drawing,
    /// A text or image element is being moved, resized or rotated.
    DraggingElement,
    /// An inline text input is open.
    EditingText,
}

/// An image file accepted from a drop, waiting to be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingImage {
    /// Position among the image files of the drop.
    pub slot: usize,
    pub file: DroppedFile,
}

/// State of an active manipulation of one element.
#[derive(Debug, Clone)]
struct ManipulationState {
    /// The handle being dragged (None = moving the whole element).
    handle: Option<HandleKind>,
    /// Pointer offset from the element's anchor at grab time.
    grab: Vec2,
    /// Element as it was when the manipulation started.
    original: Element,
    /// Element as it would be committed now.
    current: Element,
}

impl ManipulationState {
    fn update(&mut self, point: Point) {
        match (self.handle, &self.original) {
            (None, _) => {
                let mut moved = self.original.clone();
                moved.move_to(point - self.grab);
                self.current = moved;
            }
            (Some(handle), Element::Image(image)) => {
                // A rejected resize keeps the last valid frame.
                if let Some(image) = apply_handle(image, handle, point) {
                    self.current = Element::Image(image);
                }
            }
            (Some(_), _) => {}
        }
    }
}

/// Editing state for the active page.
#[derive(Debug, Clone)]
pub struct CanvasEditor {
    /// Current tool and in-progress gesture.
    pub tools: ToolManager,
    /// Toolbar values applied to new elements.
    pub settings: ToolSettings,
    /// Undone elements, most recent last.
    redo_stack: Vec<Element>,
    selection: Option<ElementId>,
    manipulation: Option<ManipulationState>,
    text_edit: Option<TextEdit>,
    canvas_size: Size,
}

impl CanvasEditor {
    /// Create an editor for a canvas of the given size.
    pub fn new(canvas_size: Size) -> Self {
        Self {
            tools: ToolManager::new(),
            settings: ToolSettings::default(),
            redo_stack: Vec::new(),
            selection: None,
            manipulation: None,
            text_edit: None,
            canvas_size,
        }
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    /// Switch tools. Clears the selection, any open text edit and any
    /// gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
        self.manipulation = None;
        self.selection = None;
        self.text_edit = None;
    }

    pub fn state(&self) -> EditorState {
        if self.tools.is_active() {
            EditorState::Drawing
        } else if self.manipulation.is_some() {
            EditorState::DraggingElement
        } else if self.text_edit.is_some() {
            EditorState::EditingText
        } else {
            EditorState::Idle
        }
    }

    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    /// Index of the selected element, derived from its id.
    pub fn selected_index(&self, page: &Page) -> Option<usize> {
        self.selection.and_then(|id| page.index_of(id))
    }

    /// Select an element. Returns false if the page has no such element.
    pub fn select(&mut self, page: &Page, id: ElementId) -> bool {
        if page.index_of(id).is_none() {
            return false;
        }
        self.selection = Some(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// The selected element if it is an image.
    pub fn selected_image<'a>(&self, page: &'a Page) -> Option<&'a Image> {
        self.selection
            .and_then(|id| page.get_by_id(id))
            .and_then(Element::as_image)
    }

    /// Resize and rotate handles of the selected image, if any.
    pub fn image_handles(&self, page: &Page) -> Vec<Handle> {
        self.selected_image(page).map(image_handles).unwrap_or_default()
    }

    pub fn text_edit(&self) -> Option<&TextEdit> {
        self.text_edit.as_ref()
    }

    /// The element a tool gesture is building.
    pub fn preview(&self) -> Option<&Element> {
        self.tools.preview()
    }

    /// The element being moved or transformed, as it would be committed now.
    pub fn manipulated(&self) -> Option<&Element> {
        self.manipulation.as_ref().map(|m| &m.current)
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Handle a pointer press at a canvas point.
    pub fn pointer_down(&mut self, page: &Page, point: Point) -> EditOutcome {
        if let Some(image) = self.selected_image(page) {
            if let Some(handle) = hit_handle(&image_handles(image), point) {
                let element = Element::Image(image.clone());
                self.tools.cancel();
                self.manipulation = Some(ManipulationState {
                    handle: Some(handle),
                    grab: Vec2::ZERO,
                    original: element.clone(),
                    current: element,
                });
                return EditOutcome::Unchanged;
            }
        }

        self.tools.cancel();
        self.manipulation = None;

        if let Some(id) = page.element_at(point, HIT_TOLERANCE) {
            if self.text_edit.as_ref().is_some_and(|edit| edit.element != id) {
                self.text_edit = None;
            }
            self.selection = Some(id);
            if let Some(element) = page.get_by_id(id).filter(|e| e.is_draggable()) {
                self.manipulation = Some(ManipulationState {
                    handle: None,
                    grab: point - element.anchor(),
                    original: element.clone(),
                    current: element.clone(),
                });
            }
            return EditOutcome::Unchanged;
        }

        self.selection = None;
        self.text_edit = None;

        if self.tools.current_tool == ToolKind::Text {
            return EditOutcome::TextPrompt(point);
        }
        self.tools.current_style = self.settings.stroke_style();
        self.tools.begin(point);
        EditOutcome::Unchanged
    }

    /// Handle pointer movement at a canvas point.
    pub fn pointer_move(&mut self, point: Point) {
        if self.tools.is_active() {
            self.tools.update(point);
        } else if let Some(manipulation) = &mut self.manipulation {
            manipulation.update(point);
        }
    }

    /// Handle a pointer release. Commits the gesture's element, or writes
    /// a moved/transformed element back at its existing index.
    pub fn pointer_up(&mut self, page: &mut Page, point: Point) -> EditOutcome {
        if let Some(element) = self.tools.end() {
            log::debug!("Committed {} element", element.kind().tag());
            page.push(element);
            self.redo_stack.clear();
            return EditOutcome::Changed;
        }

        let Some(mut manipulation) = self.manipulation.take() else {
            return EditOutcome::Unchanged;
        };
        manipulation.update(point);
        if manipulation.current == manipulation.original {
            return EditOutcome::Unchanged;
        }
        if page.replace(manipulation.current) {
            EditOutcome::Changed
        } else {
            EditOutcome::Unchanged
        }
    }

    /// Abort the gesture or manipulation in progress without committing.
    pub fn cancel_gesture(&mut self) {
        self.tools.cancel();
        self.manipulation = None;
    }

    /// Answer a text prompt. Empty text creates nothing.
    pub fn commit_text(&mut self, page: &mut Page, position: Point, content: &str) -> EditOutcome {
        if content.is_empty() {
            return EditOutcome::Unchanged;
        }
        let text = Text::new(
            position,
            content.to_string(),
            self.settings.font_size(),
            self.settings.font_family(),
            self.settings.color(),
        );
        page.push(Element::Text(text));
        self.redo_stack.clear();
        EditOutcome::Changed
    }

    /// Open inline editing on the text element under the point.
    /// Returns false if there is no text element there.
    pub fn double_click(&mut self, page: &Page, point: Point) -> bool {
        let Some(text) = page
            .element_at(point, HIT_TOLERANCE)
            .and_then(|id| page.get_by_id(id))
            .and_then(Element::as_text)
        else {
            return false;
        };
        self.tools.cancel();
        self.manipulation = None;
        self.selection = Some(text.id);
        self.text_edit = Some(TextEdit::open(text));
        true
    }

    /// Feed a key to the open text edit.
    pub fn text_key(&mut self, page: &mut Page, key: Key) -> EditOutcome {
        let Some(edit) = self.text_edit.as_mut() else {
            return EditOutcome::Unchanged;
        };
        match edit.handle_key(key) {
            TextEditResult::Changed => self.write_text_edit(page),
            TextEditResult::Unchanged => EditOutcome::Unchanged,
            TextEditResult::Exit => {
                self.text_edit = None;
                EditOutcome::Unchanged
            }
        }
    }

    /// Replace the whole value of the open text edit.
    pub fn set_text_value(&mut self, page: &mut Page, value: &str) -> EditOutcome {
        let Some(edit) = self.text_edit.as_mut() else {
            return EditOutcome::Unchanged;
        };
        edit.set_value(value);
        self.write_text_edit(page)
    }

    /// Close the text edit (focus lost).
    pub fn end_text_edit(&mut self) {
        self.text_edit = None;
    }

    fn write_text_edit(&mut self, page: &mut Page) -> EditOutcome {
        let Some(edit) = &self.text_edit else {
            return EditOutcome::Unchanged;
        };
        let (id, value) = (edit.element, edit.value().to_string());
        match page.get_by_id_mut(id).and_then(Element::as_text_mut) {
            Some(text) => {
                text.content = value;
                EditOutcome::Changed
            }
            None => {
                self.text_edit = None;
                EditOutcome::Unchanged
            }
        }
    }

    /// Move the topmost element to the redo stack.
    pub fn undo(&mut self, page: &mut Page) -> EditOutcome {
        let Some(element) = page.pop() else {
            return EditOutcome::Unchanged;
        };
        let id = element.id();
        if self.selection == Some(id) {
            self.selection = None;
        }
        if self.text_edit.as_ref().is_some_and(|edit| edit.element == id) {
            self.text_edit = None;
        }
        if self.manipulation.as_ref().is_some_and(|m| m.original.id() == id) {
            self.manipulation = None;
        }
        self.redo_stack.push(element);
        EditOutcome::Changed
    }

    /// Re-append the most recently undone element.
    pub fn redo(&mut self, page: &mut Page) -> EditOutcome {
        match self.redo_stack.pop() {
            Some(element) => {
                page.push(element);
                EditOutcome::Changed
            }
            None => EditOutcome::Unchanged,
        }
    }

    /// Swap the selected element with the one painted just above it.
    pub fn bring_forward(&mut self, page: &mut Page) -> EditOutcome {
        match self.selected_index(page) {
            Some(index) if index + 1 < page.len() => {
                page.swap(index, index + 1);
                EditOutcome::Changed
            }
            _ => EditOutcome::Unchanged,
        }
    }

    /// Swap the selected element with the one painted just below it.
    pub fn send_backward(&mut self, page: &mut Page) -> EditOutcome {
        match self.selected_index(page) {
            Some(index) if index > 0 => {
                page.swap(index, index - 1);
                EditOutcome::Changed
            }
            _ => EditOutcome::Unchanged,
        }
    }

    /// Accept the image files of a drop, numbering them by position.
    pub fn drop_images(&self, files: Vec<DroppedFile>) -> Vec<PendingImage> {
        files
            .into_iter()
            .filter(|file| {
                let accepted = file.is_image();
                if !accepted {
                    log::debug!("Ignoring dropped file {} ({})", file.name, file.mime_type);
                }
                accepted
            })
            .enumerate()
            .map(|(slot, file)| PendingImage { slot, file })
            .collect()
    }

    /// Place a decoded image on the page.
    pub fn complete_image(&mut self, page: &mut Page, slot: usize, decoded: &DecodedImage) -> ElementId {
        let image = decoded.place(self.canvas_size, slot);
        let id = image.id;
        page.push(Element::Image(image));
        self.redo_stack.clear();
        id
    }

    /// Forget per-page state when the active page changes.
    pub fn reset_for_page(&mut self) {
        self.tools.cancel();
        self.manipulation = None;
        self.selection = None;
        self.text_edit = None;
        self.redo_stack.clear();
    }
}
