//! Pages and projects.

use crate::shapes::{Element, ElementId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ordered list of elements. List order is paint order: the last
/// element is drawn on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page {
    elements: Vec<Element>,
}

impl Page {
    /// Create an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a page from existing elements.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements in paint order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Append an element on top.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Remove and return the topmost element.
    pub fn pop(&mut self) -> Option<Element> {
        self.elements.pop()
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    /// Position of an element in paint order.
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn get_by_id(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn get_by_id_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Replace the element that has the same id, keeping its index.
    /// Returns false if no such element exists.
    pub fn replace(&mut self, element: Element) -> bool {
        match self.get_by_id_mut(element.id()) {
            Some(slot) => {
                *slot = element;
                true
            }
            None => false,
        }
    }

    /// Swap two elements in paint order.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.elements.swap(a, b);
    }

    /// Topmost element under a point.
    pub fn element_at(&self, point: Point, tolerance: f64) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.hit_test(point, tolerance))
            .map(|e| e.id())
    }
}

/// A named stack of pages owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Opaque unique identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Pages in order.
    pub pages: Vec<Page>,
}

impl Project {
    /// Create a project with a fresh id and one empty page.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            pages: vec![Page::new()],
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    /// Append an empty page and return its index.
    pub fn add_page(&mut self) -> usize {
        self.pages.push(Page::new());
        self.pages.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, ElementStyle, Rectangle};

    fn circle(x: f64) -> Element {
        Element::Circle(Circle::new(Point::new(x, 0.0), 10.0, ElementStyle::default()))
    }

    #[test]
    fn test_new_project_has_one_empty_page() {
        let project = Project::new("Sketch 1");
        assert_eq!(project.title, "Sketch 1");
        assert_eq!(project.page_count(), 1);
        assert!(project.pages[0].is_empty());
        assert!(!project.id.is_empty());
    }

    #[test]
    fn test_project_ids_are_unique() {
        assert_ne!(Project::new("a").id, Project::new("a").id);
    }

    #[test]
    fn test_add_page_returns_index() {
        let mut project = Project::new("p");
        assert_eq!(project.add_page(), 1);
        assert_eq!(project.add_page(), 2);
        assert_eq!(project.page_count(), 3);
    }

    #[test]
    fn test_element_at_prefers_topmost() {
        let mut page = Page::new();
        let bottom = circle(0.0);
        let top = circle(0.0);
        let top_id = top.id();
        page.push(bottom);
        page.push(top);
        assert_eq!(page.element_at(Point::new(10.0, 0.0), 1.0), Some(top_id));
        assert_eq!(page.element_at(Point::new(500.0, 0.0), 1.0), None);
    }

    #[test]
    fn test_replace_keeps_index() {
        let mut page = Page::new();
        page.push(circle(0.0));
        let rect = Rectangle::new(Point::ZERO, 5.0, 5.0, ElementStyle::default());
        let mut element = Element::Rectangle(rect);
        page.push(element.clone());
        page.push(circle(100.0));

        element.move_to(Point::new(50.0, 50.0));
        assert!(page.replace(element.clone()));
        assert_eq!(page.index_of(element.id()), Some(1));
        assert_eq!(page.get(1), Some(&element));
    }

    #[test]
    fn test_page_serializes_as_array() {
        let mut project = Project::new("p");
        project.pages[0].push(circle(1.0));
        let json = serde_json::to_value(&project).unwrap();
        assert!(json["pages"].is_array());
        assert!(json["pages"][0].is_array());
        assert_eq!(json["pages"][0][0]["type"], "circle");
    }
}
