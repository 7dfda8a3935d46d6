//! The output tree produced by compositions and area components.
//!
//! This is a plain description of what to display. A host maps it onto real
//! views; [`Node::Conditional`] subtrees are meant to be bound to a
//! [`QueryObserver`](crate::observer::QueryObserver) and shown only while their
//! query matches.

use crate::{props::StyleProps, query::CompiledQuery, style::Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// The grid wrapper of a composition.
    Composition,
    /// A box placed into a named grid area.
    Area,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub area: Option<String>,
    pub style: Style,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Node {
    #[default]
    Empty,
    Text(String),
    Element(Element),
    Fragment(Vec<Node>),
    /// Rendered only while `query` matches.
    Conditional {
        query: CompiledQuery,
        child: Box<Node>,
    },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn fragment(children: impl IntoIterator<Item = Node>) -> Self {
        Node::Fragment(children.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Depth-first search for the box placed in `area`.
    pub fn find_area(&self, area: &str) -> Option<&Element> {
        match self {
            Node::Element(element) if element.area.as_deref() == Some(area) => Some(element),
            Node::Element(Element { children, .. }) | Node::Fragment(children) => {
                children.iter().find_map(|child| child.find_area(area))
            }
            Node::Conditional { child, .. } => child.find_area(area),
            Node::Empty | Node::Text(_) => None,
        }
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::text(text)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Props handed to an area component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxProps {
    pub style: StyleProps,
    pub children: Vec<Node>,
}

impl BoxProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn style(mut self, name: impl Into<String>, value: impl Into<crate::unit::Value>) -> Self {
        self.style.insert(name, value);
        self
    }
}
