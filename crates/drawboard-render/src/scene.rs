//! Retained-mode scene graph built from a page.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use drawboard_core::handles::{HandleKind, image_handles};
use drawboard_core::shapes::{BlendMode, Element, ElementId, SerializableColor};
use kurbo::Point;
use serde::Serialize;

/// Dash pattern of a selected shape outline.
pub const SELECTION_DASH: [f64; 2] = [4.0, 4.0];
/// Outline width of a selected text.
pub const SELECTED_TEXT_OUTLINE: f64 = 0.5;
/// Curve tension of freehand lines.
const LINE_TENSION: f64 = 0.5;

/// How a node is composited against what is below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositeOp {
    SourceOver,
    DestinationOut,
}

/// Line end style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    Round,
}

/// One retained-mode node. Geometry is in screen units (zoom applied).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node")]
pub enum SceneNode {
    Line {
        id: ElementId,
        points: Vec<Point>,
        stroke: SerializableColor,
        stroke_width: f64,
        line_cap: LineCap,
        tension: f64,
        composite: CompositeOp,
    },
    Rect {
        id: ElementId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        stroke: SerializableColor,
        stroke_width: f64,
        dash: Vec<f64>,
    },
    Circle {
        id: ElementId,
        center: Point,
        radius: f64,
        stroke: SerializableColor,
        stroke_width: f64,
        dash: Vec<f64>,
    },
    RegularPolygon {
        id: ElementId,
        center: Point,
        sides: u32,
        radius: f64,
        stroke: SerializableColor,
        stroke_width: f64,
        dash: Vec<f64>,
    },
    Arrow {
        id: ElementId,
        start: Point,
        end: Point,
        stroke: SerializableColor,
        stroke_width: f64,
    },
    Text {
        id: ElementId,
        position: Point,
        content: String,
        font_size: f64,
        font_family: String,
        fill: SerializableColor,
        outline: Option<SerializableColor>,
        outline_width: f64,
        draggable: bool,
    },
    Image {
        id: ElementId,
        position: Point,
        width: f64,
        height: f64,
        rotation: f64,
        mime_type: String,
        draggable: bool,
    },
    Transformer {
        target: ElementId,
        anchors: Vec<Point>,
        rotate_anchor: Option<Point>,
        rotate_enabled: bool,
        min_size: f64,
    },
}

impl SceneNode {
    /// The element this node draws or decorates.
    pub fn element_id(&self) -> ElementId {
        match self {
            SceneNode::Line { id, .. }
            | SceneNode::Rect { id, .. }
            | SceneNode::Circle { id, .. }
            | SceneNode::RegularPolygon { id, .. }
            | SceneNode::Arrow { id, .. }
            | SceneNode::Text { id, .. }
            | SceneNode::Image { id, .. } => *id,
            SceneNode::Transformer { target, .. } => *target,
        }
    }
}

/// A scene of nodes in paint order.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes in paint order.
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialize the scene as a JSON array.
    pub fn to_json(&self) -> RenderResult<String> {
        serde_json::to_string_pretty(&self.nodes)
            .map_err(|e| RendererError::RenderFailed(e.to_string()))
    }

    fn push_element(&mut self, element: &Element, ctx: &RenderContext) {
        let zoom = ctx.zoom;
        let scale = |p: Point| Point::new(p.x * zoom, p.y * zoom);
        let selected = ctx.selected == Some(element.id());
        let style = element.style();
        let stroke_width = style.stroke_width * zoom;
        let (outline, dash) = if selected {
            (SerializableColor::from(ctx.selection_color), SELECTION_DASH.to_vec())
        } else {
            (style.stroke_color, Vec::new())
        };

        let node = match element {
            Element::Stroke(stroke) => SceneNode::Line {
                id: element.id(),
                points: stroke.points.iter().copied().map(scale).collect(),
                stroke: style.stroke_color,
                stroke_width,
                line_cap: LineCap::Round,
                tension: LINE_TENSION,
                composite: match stroke.blend {
                    BlendMode::Normal => CompositeOp::SourceOver,
                    BlendMode::Erase => CompositeOp::DestinationOut,
                },
            },
            Element::Rectangle(rect) => SceneNode::Rect {
                id: element.id(),
                x: rect.position.x * zoom,
                y: rect.position.y * zoom,
                width: rect.width * zoom,
                height: rect.height * zoom,
                stroke: outline,
                stroke_width,
                dash,
            },
            Element::Circle(circle) => SceneNode::Circle {
                id: element.id(),
                center: scale(circle.center),
                radius: circle.radius * zoom,
                stroke: outline,
                stroke_width,
                dash,
            },
            Element::Triangle(triangle) => SceneNode::RegularPolygon {
                id: element.id(),
                center: scale(triangle.center),
                sides: 3,
                radius: triangle.radius * zoom,
                stroke: outline,
                stroke_width,
                dash,
            },
            Element::Arrow(arrow) => SceneNode::Arrow {
                id: element.id(),
                start: scale(arrow.start),
                end: scale(arrow.end),
                stroke: style.stroke_color,
                stroke_width,
            },
            Element::Text(text) => SceneNode::Text {
                id: element.id(),
                position: scale(text.position),
                content: text.content.clone(),
                font_size: text.font_size * zoom,
                font_family: text.font_family.name().to_string(),
                fill: text.fill,
                outline: selected.then(|| SerializableColor::from(ctx.selection_color)),
                outline_width: if selected { SELECTED_TEXT_OUTLINE * zoom } else { 0.0 },
                draggable: true,
            },
            Element::Image(image) => SceneNode::Image {
                id: element.id(),
                position: scale(image.position),
                width: image.width * zoom,
                height: image.height * zoom,
                rotation: image.rotation,
                mime_type: image.format.mime_type().to_string(),
                draggable: true,
            },
        };
        self.nodes.push(node);
    }

    fn push_transformer(&mut self, element: &Element, zoom: f64) {
        let Some(image) = element.as_image() else {
            return;
        };
        let handles = image_handles(image);
        let scale = |p: Point| Point::new(p.x * zoom, p.y * zoom);
        let anchors = handles
            .iter()
            .filter(|h| h.kind != HandleKind::Rotate)
            .map(|h| scale(h.position))
            .collect();
        let rotate_anchor = handles
            .iter()
            .find(|h| h.kind == HandleKind::Rotate)
            .map(|h| scale(h.position));
        self.nodes.push(SceneNode::Transformer {
            target: element.id(),
            anchors,
            rotate_anchor,
            rotate_enabled: true,
            min_size: drawboard_core::shapes::Image::MIN_SIZE * zoom,
        });
    }
}

impl Renderer for SceneGraph {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.nodes.clear();

        let manipulated = ctx.manipulated;
        let mut selected_element = None;

        for stored in ctx.page.iter() {
            let id = stored.id();
            if ctx.editing_element_id == Some(id) {
                continue;
            }
            let element = manipulated.filter(|m| m.id() == id).unwrap_or(stored);
            self.push_element(element, ctx);
            if ctx.selected == Some(id) {
                selected_element = Some(element);
            }
        }

        if let Some(preview) = ctx.preview {
            self.push_element(preview, ctx);
        }

        if let Some(element) = selected_element {
            self.push_transformer(element, ctx.zoom);
        }

        log::trace!("Built scene with {} nodes", self.nodes.len());
    }
}
