//! Syntax module for the edge language
//!
//! This module provides the tree produced by the grammar rules. An edge list
//! like `friends(relationship|achievements)` becomes an [`EdgeList`] holding
//! one [`Edge`] named `friends` whose children are the two nested edges.

use serde::ser::{Serialize, SerializeMap, Serializer};

pub mod cursor;
pub mod parser;

pub use cursor::Cursor;

/// Represents a span in the source code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A named edge with its (possibly empty) nested edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub name: String,
    /// Span of the identifier.
    pub span: Span,
    pub children: EdgeList,
}

impl Edge {
    pub fn leaf(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
            children: EdgeList::default(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Sibling edges in input order.
///
/// Duplicate names are kept as written. Serialises as a map so that
/// `serde_json` yields the translated document directly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EdgeList {
    pub edges: Vec<Edge>,
}

impl EdgeList {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// First edge with the given name.
    pub fn get(&self, name: &str) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.edges.iter().map(|edge| edge.name.as_str())
    }

    /// Deepest nesting level; a flat list has depth 1, an empty list 0.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 0)];
        while let Some((list, level)) = pending.pop() {
            for edge in list {
                deepest = deepest.max(level + 1);
                pending.push((&edge.children, level + 1));
            }
        }
        deepest
    }
}

// Dropping a nested list would otherwise recurse once per level.
impl Drop for EdgeList {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.edges);
        while let Some(mut edge) = pending.pop() {
            pending.append(&mut edge.children.edges);
        }
    }
}

impl<'a> IntoIterator for &'a EdgeList {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

impl Serialize for EdgeList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.edges.len()))?;
        for edge in &self.edges {
            map.serialize_entry(&edge.name, &edge.children)?;
        }
        map.end()
    }
}
