// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM tree consumed by the extractor
//!
//! Built on top of html5ever. Every node exposes its tag name, attributes,
//! children and, for elements, the source line/column it started on.

mod document;
mod locator;
mod node;
mod parser;

pub use document::{Descendants, Document};
pub use node::{Node, NodeId, NodeType};
pub use parser::parse_html;
