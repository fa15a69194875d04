//! Event handling for canvas interactions.

use crate::shortcuts::{ShortcutAction, ShortcutRegistry};
use drawboard_core::decode::DroppedFile;
use drawboard_core::document::Page;
use drawboard_core::editor::{CanvasEditor, EditOutcome, PendingImage};
use drawboard_core::input::{Key, Modifiers};
use kurbo::Point;

/// An input event on the canvas. Points are in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    DoubleClick(Point),
    Key { key: Key, modifiers: Modifiers },
    Drop(Vec<DroppedFile>),
    /// The inline text input lost focus.
    Blur,
}

/// Translates input events into editor operations on the active page.
#[derive(Debug, Default)]
pub struct EventHandler {
    /// Whether the primary button is held.
    pressed: bool,
    /// Canvas point of an unanswered text-tool click.
    pending_text: Option<Point>,
    /// Image files accepted from the last drop, not yet decoded.
    pending_images: Vec<PendingImage>,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas point waiting for text, if the text tool was clicked.
    pub fn pending_text(&self) -> Option<Point> {
        self.pending_text
    }

    /// Take the text prompt point, closing the prompt.
    pub fn take_pending_text(&mut self) -> Option<Point> {
        self.pending_text.take()
    }

    /// Take the accepted image files of the last drop.
    pub fn take_pending_images(&mut self) -> Vec<PendingImage> {
        std::mem::take(&mut self.pending_images)
    }

    /// Drop any per-page interaction state.
    pub fn reset(&mut self) {
        self.pressed = false;
        self.pending_text = None;
        self.pending_images.clear();
    }

    /// Route an event to the editor.
    pub fn handle(
        &mut self,
        editor: &mut CanvasEditor,
        page: &mut Page,
        event: InputEvent,
    ) -> EditOutcome {
        if let InputEvent::PointerDown(point)
        | InputEvent::PointerMove(point)
        | InputEvent::PointerUp(point)
        | InputEvent::DoubleClick(point) = &event
        {
            if !point.is_finite() {
                log::warn!("Ignoring pointer event at non-finite point {point:?}");
                return EditOutcome::Unchanged;
            }
        }

        let camera = editor.settings.camera();
        match event {
            InputEvent::PointerDown(screen) => {
                self.pressed = true;
                self.pending_text = None;
                let outcome = editor.pointer_down(page, camera.screen_to_canvas(screen));
                if let EditOutcome::TextPrompt(point) = outcome {
                    self.pressed = false;
                    self.pending_text = Some(point);
                }
                outcome
            }
            InputEvent::PointerMove(screen) => {
                if self.pressed {
                    editor.pointer_move(camera.screen_to_canvas(screen));
                }
                EditOutcome::Unchanged
            }
            InputEvent::PointerUp(screen) => {
                if !self.pressed {
                    return EditOutcome::Unchanged;
                }
                self.pressed = false;
                editor.pointer_up(page, camera.screen_to_canvas(screen))
            }
            InputEvent::DoubleClick(screen) => {
                self.pressed = false;
                editor.cancel_gesture();
                editor.double_click(page, camera.screen_to_canvas(screen));
                EditOutcome::Unchanged
            }
            InputEvent::Key { key, modifiers } => self.handle_key(editor, page, key, modifiers),
            InputEvent::Drop(files) => {
                self.pending_images = editor.drop_images(files);
                log::debug!("Accepted {} dropped images", self.pending_images.len());
                EditOutcome::Unchanged
            }
            InputEvent::Blur => {
                editor.end_text_edit();
                EditOutcome::Unchanged
            }
        }
    }

    fn handle_key(
        &mut self,
        editor: &mut CanvasEditor,
        page: &mut Page,
        key: Key,
        modifiers: Modifiers,
    ) -> EditOutcome {
        // The inline input swallows plain keys.
        if editor.text_edit().is_some() && !modifiers.command() {
            return editor.text_key(page, key);
        }

        match ShortcutRegistry::lookup(key, modifiers) {
            Some(ShortcutAction::Undo) => editor.undo(page),
            Some(ShortcutAction::Redo) => editor.redo(page),
            Some(ShortcutAction::BringForward) => editor.bring_forward(page),
            Some(ShortcutAction::SendBackward) => editor.send_backward(page),
            Some(ShortcutAction::Cancel) => {
                self.pressed = false;
                self.pending_text = None;
                editor.cancel_gesture();
                EditOutcome::Unchanged
            }
            None => EditOutcome::Unchanged,
        }
    }
}
