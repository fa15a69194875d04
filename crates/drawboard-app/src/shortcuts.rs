//! Keyboard shortcut registry and documentation.

use drawboard_core::input::{Key, Modifiers};

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
    BringForward,
    SendBackward,
    Cancel,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
    pub action: ShortcutAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: Key,
        ctrl: bool,
        shift: bool,
        action: ShortcutAction,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(match self.key {
            Key::Char(c) => c.to_ascii_uppercase().to_string(),
            Key::Escape => "Escape".to_string(),
            other => format!("{other:?}"),
        });
        parts.join("+")
    }

    fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        let key_matches = match (self.key, key) {
            (Key::Char(a), Key::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        };
        key_matches && self.ctrl == modifiers.command() && self.shift == modifiers.shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new(Key::Char('z'), true, false, ShortcutAction::Undo, "Undo"),
            Shortcut::new(Key::Char('y'), true, false, ShortcutAction::Redo, "Redo"),
            Shortcut::new(Key::Char('z'), true, true, ShortcutAction::Redo, "Redo"),
            Shortcut::new(
                Key::Char(']'),
                false,
                false,
                ShortcutAction::BringForward,
                "Bring selected element forward",
            ),
            Shortcut::new(
                Key::Char('['),
                false,
                false,
                ShortcutAction::SendBackward,
                "Send selected element backward",
            ),
            Shortcut::new(
                Key::Escape,
                false,
                false,
                ShortcutAction::Cancel,
                "Cancel current action",
            ),
        ]
    }

    /// Find the action bound to a key press.
    pub fn lookup(key: Key, modifiers: Modifiers) -> Option<ShortcutAction> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, modifiers))
            .map(|shortcut| shortcut.action)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_bindings() {
        assert_eq!(
            ShortcutRegistry::lookup(Key::Char('z'), Modifiers::CTRL),
            Some(ShortcutAction::Undo)
        );
        assert_eq!(
            ShortcutRegistry::lookup(Key::Char('Z'), Modifiers::CTRL_SHIFT),
            Some(ShortcutAction::Redo)
        );
        assert_eq!(
            ShortcutRegistry::lookup(Key::Char('y'), Modifiers::CTRL),
            Some(ShortcutAction::Redo)
        );
        assert_eq!(ShortcutRegistry::lookup(Key::Char('z'), Modifiers::NONE), None);
    }

    #[test]
    fn test_layering_and_escape() {
        assert_eq!(
            ShortcutRegistry::lookup(Key::Char(']'), Modifiers::NONE),
            Some(ShortcutAction::BringForward)
        );
        assert_eq!(
            ShortcutRegistry::lookup(Key::Char('['), Modifiers::NONE),
            Some(ShortcutAction::SendBackward)
        );
        assert_eq!(
            ShortcutRegistry::lookup(Key::Escape, Modifiers::NONE),
            Some(ShortcutAction::Cancel)
        );
    }

    #[test]
    fn test_format() {
        let all = ShortcutRegistry::all();
        assert_eq!(all[2].format(), "Ctrl+Shift+Z");
        assert_eq!(all[5].format(), "Escape");
    }
}
