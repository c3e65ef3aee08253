//! The document a stylesheet is applied to.
//!
//! [`StyleDocument`] is the minimal surface the applier needs: style nodes
//! keyed by id and class lists on the root element and on elements addressed
//! by selector. [`MemoryDocument`] implements it in memory for headless use
//! and tests; embedders bridge it to a real DOM or webview.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Where style nodes are inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    /// The document head.
    #[default]
    Head,
    /// The end of the document body.
    Body,
}

/// An element whose class list can be changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementTarget<'a> {
    /// The document root (`<html>`).
    Root,
    /// The first element matching a selector.
    Selector(&'a str),
}

/// Operations the style applier performs on a document.
pub trait StyleDocument {
    /// Append a style node.
    fn insert_style(&mut self, position: InsertPosition, id: &str, css: &str);

    /// Remove every style node with `id`. Returns whether one existed.
    fn remove_style(&mut self, id: &str) -> bool;

    /// Text of the style node with `id`.
    fn style_content(&self, id: &str) -> Option<String>;

    /// Whether the target element exists.
    fn has_element(&self, target: ElementTarget<'_>) -> bool;

    /// Class list of the target, or `None` if it does not exist.
    fn classes(&self, target: ElementTarget<'_>) -> Option<Vec<String>>;

    /// Add a class. Returns `false` if the target does not exist.
    fn add_class(&mut self, target: ElementTarget<'_>, class: &str) -> bool;

    /// Remove a class. Returns `false` if the target does not exist.
    fn remove_class(&mut self, target: ElementTarget<'_>, class: &str) -> bool;
}

/// A style node held by [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleNode {
    /// Node id.
    pub id: String,
    /// Stylesheet text.
    pub css: String,
}

/// An in-memory document with a root, a `body` element and any number of
/// extra elements addressed by selector string.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    head: Vec<StyleNode>,
    body: Vec<StyleNode>,
    root_classes: IndexSet<String>,
    elements: IndexMap<String, IndexSet<String>>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        let mut elements = IndexMap::new();
        elements.insert("body".to_string(), IndexSet::new());
        Self {
            head: Vec::new(),
            body: Vec::new(),
            root_classes: IndexSet::new(),
            elements,
        }
    }
}

impl MemoryDocument {
    /// A document with a `body` element.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element addressable by `selector`.
    pub fn with_element(mut self, selector: impl Into<String>) -> Self {
        self.elements.entry(selector.into()).or_default();
        self
    }

    /// Style nodes in the head, in insertion order.
    pub fn head_styles(&self) -> &[StyleNode] {
        &self.head
    }

    /// Style nodes in the body, in insertion order.
    pub fn body_styles(&self) -> &[StyleNode] {
        &self.body
    }

    fn class_set(&self, target: ElementTarget<'_>) -> Option<&IndexSet<String>> {
        match target {
            ElementTarget::Root => Some(&self.root_classes),
            ElementTarget::Selector(selector) => self.elements.get(selector),
        }
    }

    fn class_set_mut(&mut self, target: ElementTarget<'_>) -> Option<&mut IndexSet<String>> {
        match target {
            ElementTarget::Root => Some(&mut self.root_classes),
            ElementTarget::Selector(selector) => self.elements.get_mut(selector),
        }
    }
}

impl StyleDocument for MemoryDocument {
    fn insert_style(&mut self, position: InsertPosition, id: &str, css: &str) {
        let node = StyleNode {
            id: id.to_string(),
            css: css.to_string(),
        };
        match position {
            InsertPosition::Head => self.head.push(node),
            InsertPosition::Body => self.body.push(node),
        }
    }

    fn remove_style(&mut self, id: &str) -> bool {
        let before = self.head.len() + self.body.len();
        self.head.retain(|node| node.id != id);
        self.body.retain(|node| node.id != id);
        self.head.len() + self.body.len() != before
    }

    fn style_content(&self, id: &str) -> Option<String> {
        self.head
            .iter()
            .chain(&self.body)
            .find(|node| node.id == id)
            .map(|node| node.css.clone())
    }

    fn has_element(&self, target: ElementTarget<'_>) -> bool {
        self.class_set(target).is_some()
    }

    fn classes(&self, target: ElementTarget<'_>) -> Option<Vec<String>> {
        self.class_set(target).map(|set| set.iter().cloned().collect())
    }

    fn add_class(&mut self, target: ElementTarget<'_>, class: &str) -> bool {
        match self.class_set_mut(target) {
            Some(set) => {
                set.insert(class.to_string());
                true
            }
            None => false,
        }
    }

    fn remove_class(&mut self, target: ElementTarget<'_>, class: &str) -> bool {
        match self.class_set_mut(target) {
            Some(set) => {
                set.shift_remove(class);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_and_classes() {
        let mut doc = MemoryDocument::new().with_element("#app");
        doc.insert_style(InsertPosition::Head, "a", "x{}");
        doc.insert_style(InsertPosition::Body, "a", "y{}");
        assert_eq!(doc.style_content("a").as_deref(), Some("x{}"));
        assert!(doc.remove_style("a"));
        assert!(!doc.remove_style("a"));

        assert!(doc.add_class(ElementTarget::Selector("#app"), "dark-theme"));
        assert!(!doc.add_class(ElementTarget::Selector("#missing"), "dark-theme"));
        assert_eq!(doc.classes(ElementTarget::Selector("#app")).unwrap(), ["dark-theme"]);
        assert!(doc.has_element(ElementTarget::Selector("body")));
        assert!(doc.classes(ElementTarget::Root).unwrap().is_empty());
    }
}
