//! Inline editing of an existing text element.

use crate::input::Key;
use crate::shapes::{ElementId, ElementTrait, Text};
use kurbo::Point;

/// What a key press did to the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEditResult {
    /// The value changed and should be written back.
    Changed,
    /// Nothing changed (cursor movement or an unhandled key).
    Unchanged,
    /// Editing should end.
    Exit,
}

/// An open inline text input over a text element.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEdit {
    /// The element being edited.
    pub element: ElementId,
    /// Where the input sits, in canvas coordinates.
    pub position: Point,
    value: String,
    /// Cursor position in characters.
    cursor: usize,
}

impl TextEdit {
    /// Open an edit pre-filled with the element's content, cursor at the end.
    pub fn open(text: &Text) -> Self {
        Self {
            element: text.id(),
            position: text.position,
            value: text.content.clone(),
            cursor: text.content.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the whole value, moving the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    /// Insert a string at the cursor.
    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_index(self.cursor);
        self.value.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Apply a key press.
    pub fn handle_key(&mut self, key: Key) -> TextEditResult {
        let len = self.value.chars().count();
        match key {
            Key::Enter | Key::Escape => TextEditResult::Exit,
            Key::Char(c) if !c.is_control() => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                TextEditResult::Changed
            }
            Key::Char(_) => TextEditResult::Unchanged,
            Key::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                TextEditResult::Changed
            }
            Key::Delete if self.cursor < len => {
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                TextEditResult::Changed
            }
            Key::Backspace | Key::Delete => TextEditResult::Unchanged,
            Key::ArrowLeft => {
                self.cursor = self.cursor.saturating_sub(1);
                TextEditResult::Unchanged
            }
            Key::ArrowRight => {
                self.cursor = (self.cursor + 1).min(len);
                TextEditResult::Unchanged
            }
            Key::Home => {
                self.cursor = 0;
                TextEditResult::Unchanged
            }
            Key::End => {
                self.cursor = len;
                TextEditResult::Unchanged
            }
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}
