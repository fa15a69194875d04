//! Drawboard Render Library
//!
//! Renderer abstraction for Drawboard. The bundled implementation builds a
//! retained-mode scene graph with one node per element.

mod renderer;
mod scene;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use scene::{CompositeOp, LineCap, SceneGraph, SceneNode, SELECTION_DASH, SELECTED_TEXT_OUTLINE};
