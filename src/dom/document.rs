// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Document representation
//!
//! A document owns every node in a flat arena. Nodes are appended while the
//! tree is being built and never change afterwards, so borrowed [`Node`]s
//! can be handed out freely.

use super::node::{Node, NodeData, NodeId, NodeType};

/// Parsed HTML document
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new document holding only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::document()],
        }
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    /// The document (root) node
    pub fn root(&self) -> Node<'_> {
        Node::new(NodeId(0), self)
    }

    /// Look up a node by id.
    ///
    /// Ids are only meaningful for the document that issued them.
    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node::new(id, self)
    }

    /// Total number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the document holds nothing but its root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    fn push(&mut self, parent: NodeId, mut data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        data.parent = Some(parent);
        self.nodes.push(data);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append an element as the last child of `parent`
    pub fn append_element<K, V>(
        &mut self,
        parent: NodeId,
        tag_name: impl Into<String>,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> NodeId
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut data = NodeData::element(tag_name);
        for (name, value) in attributes {
            // First occurrence wins, like the HTML tokenizer
            data.attributes.entry(name.into()).or_insert_with(|| value.into());
        }
        self.push(parent, data)
    }

    /// Append a text node as the last child of `parent`
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.push(parent, NodeData::text(text))
    }

    /// Append a comment node as the last child of `parent`
    pub fn append_comment(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.push(parent, NodeData::comment(text))
    }

    pub(crate) fn append_doctype(&mut self, parent: NodeId) -> NodeId {
        self.push(parent, NodeData::doctype())
    }

    /// Record the source position of a node
    pub fn set_position(&mut self, id: NodeId, line: Option<u32>, column: Option<u32>) {
        let data = &mut self.nodes[id.0];
        data.line = line;
        data.column = column;
    }

    /// All nodes below the root, depth-first in document order
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.nodes[0].children.clone();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// All element nodes in document order
    pub fn elements(&self) -> impl Iterator<Item = Node<'_>> {
        self.descendants().filter(|node| node.node_type() == NodeType::Element)
    }

    /// Elements with the given tag name (exact match)
    #[cfg(test)]
    pub(crate) fn elements_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = Node<'a>> + 'a {
        self.elements().filter(move |node| node.local_name() == Some(tag))
    }
}

/// Pre-order traversal over a document
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let data = self.doc.data(id);
        self.stack.extend(data.children.iter().rev().copied());
        Some(Node::new(id, self.doc))
    }
}
