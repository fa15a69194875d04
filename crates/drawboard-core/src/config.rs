//! Application configuration.

use kurbo::Size;
use std::path::PathBuf;

/// Default canvas width in canvas units.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1200.0;
/// Default canvas height in canvas units.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 500.0;

/// Start-up configuration for the application shell.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory for file storage; `None` selects the platform default.
    pub storage_dir: Option<PathBuf>,
    /// Size of the drawing surface.
    pub canvas_size: Size,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            canvas_size: Size::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT),
        }
    }
}

impl AppConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given storage directory.
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    /// Use the given canvas size.
    pub fn with_canvas_size(mut self, size: Size) -> Self {
        self.canvas_size = size;
        self
    }

    /// The storage directory, falling back to the platform default.
    ///
    /// On Unix: `~/.local/share/drawboard/storage/`
    /// On Windows: `%LOCALAPPDATA%\drawboard\storage\`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn resolved_storage_dir(&self) -> Option<PathBuf> {
        self.storage_dir.clone().or_else(|| {
            dirs::data_local_dir()
                .or_else(dirs::home_dir)
                .map(|base| base.join("drawboard").join("storage"))
        })
    }
}
