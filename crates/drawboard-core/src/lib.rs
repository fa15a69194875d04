//! Drawboard Core Library
//!
//! Platform-agnostic data structures and editing logic for the Drawboard
//! sketching app: elements, pages, projects, tools, the canvas editor,
//! sessions and storage.

pub mod camera;
pub mod config;
pub mod decode;
pub mod document;
pub mod editor;
pub mod handles;
pub mod input;
pub mod projects;
pub mod session;
pub mod shapes;
pub mod storage;
pub mod text_edit;
pub mod toolbar;
pub mod tools;

pub use camera::Camera;
pub use config::AppConfig;
pub use decode::{DecodeError, DecodedImage, DroppedFile, decode_image};
pub use document::{Page, Project};
pub use editor::{CanvasEditor, EditOutcome, EditorState, PendingImage};
pub use handles::{Handle, HandleKind};
pub use input::{Key, Modifiers};
pub use projects::{ProjectCollection, ProjectError};
pub use session::{Route, Session, SessionError};
pub use shapes::{Element, ElementId, ElementKind, ElementStyle, SerializableColor};
pub use text_edit::TextEdit;
pub use toolbar::ToolSettings;
pub use tools::{ToolKind, ToolManager, ToolState};
