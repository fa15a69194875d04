//! Tool system for the canvas.

use crate::shapes::{
    Arrow, BlendMode, Circle, Element, ElementStyle, Rectangle, Stroke, Triangle,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
    #[serde(rename = "rect")]
    Rectangle,
    Circle,
    Triangle,
    Arrow,
    Text,
}

impl ToolKind {
    /// Name shown in the tool picker.
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Brush => "brush",
            ToolKind::Eraser => "eraser",
            ToolKind::Rectangle => "rect",
            ToolKind::Circle => "circle",
            ToolKind::Triangle => "triangle",
            ToolKind::Arrow => "arrow",
            ToolKind::Text => "text",
        }
    }

    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Brush,
            ToolKind::Eraser,
            ToolKind::Rectangle,
            ToolKind::Circle,
            ToolKind::Triangle,
            ToolKind::Arrow,
            ToolKind::Text,
        ]
    }

    /// Whether a pointer drag with this tool builds an element.
    pub fn draws(&self) -> bool {
        !matches!(self, ToolKind::Text)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "rectangle" => Ok(ToolKind::Rectangle),
            _ => Self::all()
                .iter()
                .copied()
                .find(|tool| tool.name() == s)
                .ok_or_else(|| format!("unknown tool: {s}")),
        }
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// A gesture is building an element.
    Active {
        /// Where the gesture started.
        start: Point,
        /// Most recent pointer position.
        current: Point,
        /// Element being built.
        preview: Element,
    },
}

/// Manages the current tool and its in-progress gesture.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
    /// Style applied to new elements.
    pub current_style: ElementStyle,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool, dropping any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    /// Begin a gesture. Returns false if the current tool does not draw.
    pub fn begin(&mut self, point: Point) -> bool {
        let style = self.current_style.clone();
        let preview = match self.current_tool {
            ToolKind::Brush => Element::Stroke(Stroke::new(point, BlendMode::Normal, style)),
            ToolKind::Eraser => Element::Stroke(Stroke::new(point, BlendMode::Erase, style)),
            ToolKind::Rectangle => Element::Rectangle(Rectangle::new(point, 0.0, 0.0, style)),
            ToolKind::Circle => Element::Circle(Circle::new(point, 0.0, style)),
            ToolKind::Triangle => Element::Triangle(Triangle::new(point, 0.0, style)),
            ToolKind::Arrow => Element::Arrow(Arrow::new(point, point, style)),
            ToolKind::Text => return false,
        };
        self.state = ToolState::Active {
            start: point,
            current: point,
            preview,
        };
        true
    }

    /// Extend the gesture to a new pointer position.
    pub fn update(&mut self, point: Point) {
        let ToolState::Active {
            current, preview, ..
        } = &mut self.state
        else {
            return;
        };
        *current = point;
        match preview {
            Element::Stroke(stroke) => stroke.add_point(point),
            Element::Rectangle(rect) => rect.drag_corner_to(point),
            Element::Circle(circle) => circle.extend_to(point),
            Element::Triangle(triangle) => triangle.extend_to(point),
            Element::Arrow(arrow) => arrow.end = point,
            Element::Text(_) | Element::Image(_) => {}
        }
    }

    /// End the gesture and return the built element, however small.
    pub fn end(&mut self) -> Option<Element> {
        match std::mem::take(&mut self.state) {
            ToolState::Active { preview, .. } => Some(preview),
            ToolState::Idle => None,
        }
    }

    /// Cancel the current interaction.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Check if a tool interaction is active.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Active { .. })
    }

    /// The element being built, if any.
    pub fn preview(&self) -> Option<&Element> {
        match &self.state {
            ToolState::Active { preview, .. } => Some(preview),
            ToolState::Idle => None,
        }
    }
}
