// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM Node types

use std::collections::HashMap;

use super::document::Document;

/// Index of a node inside its owning [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Node type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Document node
    Document,
    /// Element node (like <div>, <p>, etc.)
    Element,
    /// Text node
    Text,
    /// Comment node
    Comment,
    /// Document type node (<!DOCTYPE>)
    DocumentType,
}

/// Internal node data
#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub node_type: NodeType,
    /// Tag name as supplied by the parser (elements only)
    pub tag_name: Option<String>,
    /// Text for text/comment nodes
    pub text_content: Option<String>,
    pub attributes: HashMap<String, String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// 1-based source line
    pub line: Option<u32>,
    /// 1-based source column
    pub column: Option<u32>,
}

impl NodeData {
    fn blank(node_type: NodeType) -> Self {
        Self {
            node_type,
            tag_name: None,
            text_content: None,
            attributes: HashMap::new(),
            parent: None,
            children: Vec::new(),
            line: None,
            column: None,
        }
    }

    /// Create a new element node data
    pub fn element(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: Some(tag_name.into()),
            ..Self::blank(NodeType::Element)
        }
    }

    /// Create a new text node data
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text_content: Some(content.into()),
            ..Self::blank(NodeType::Text)
        }
    }

    /// Create a new comment node data
    pub fn comment(content: impl Into<String>) -> Self {
        Self {
            text_content: Some(content.into()),
            ..Self::blank(NodeType::Comment)
        }
    }

    /// Create a new doctype node data
    pub fn doctype() -> Self {
        Self::blank(NodeType::DocumentType)
    }

    /// Create a new document node data
    pub fn document() -> Self {
        Self::blank(NodeType::Document)
    }
}

/// A borrowed reference to a node in a [`Document`]
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    /// Node ID
    pub id: NodeId,
    doc: &'a Document,
}

impl<'a> Node<'a> {
    pub(crate) fn new(id: NodeId, doc: &'a Document) -> Self {
        Self { id, doc }
    }

    fn data(&self) -> &'a NodeData {
        self.doc.data(self.id)
    }

    /// Get the node type
    pub fn node_type(&self) -> NodeType {
        self.data().node_type
    }

    /// Get the tag name exactly as the parser produced it
    pub fn local_name(&self) -> Option<&'a str> {
        self.data().tag_name.as_deref()
    }

    /// Text of a text or comment node
    pub fn text(&self) -> Option<&'a str> {
        self.data().text_content.as_deref()
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        match self.node_type() {
            NodeType::Text => self.text().unwrap_or_default().to_string(),
            NodeType::Element | NodeType::Document => {
                self.children().map(|child| child.text_content()).collect()
            }
            _ => String::new(),
        }
    }

    /// Get an attribute value (exact name match)
    pub fn get_attribute(&self, name: &str) -> Option<&'a str> {
        self.data().attributes.get(name).map(String::as_str)
    }

    /// Check if has an attribute
    pub fn has_attribute(&self, name: &str) -> bool {
        self.data().attributes.contains_key(name)
    }

    /// Get parent node
    pub fn parent(&self) -> Option<Node<'a>> {
        self.data().parent.map(|id| Node::new(id, self.doc))
    }

    /// Get child nodes in document order
    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let doc = self.doc;
        self.data().children.iter().map(move |&id| Node::new(id, doc))
    }

    /// First child that is a text node
    pub fn first_text_child(&self) -> Option<Node<'a>> {
        self.children().find(|child| child.is_text())
    }

    /// 1-based source line, when the parser reported one
    pub fn line(&self) -> Option<u32> {
        self.data().line
    }

    /// 1-based source column, when it could be resolved
    pub fn column(&self) -> Option<u32> {
        self.data().column
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.node_type() == NodeType::Text
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.doc, other.doc)
    }
}

impl Eq for Node<'_> {}
