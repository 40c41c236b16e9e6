// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parser using html5ever
//!
//! The tree builder only knows which line it is on when it creates a node.
//! [`PositionSink`] wraps `RcDom` and pairs every element it creates with its
//! start tag in the source to recover the element's own line and column.

use std::borrow::Cow;
use std::collections::HashMap;
use std::rc::Rc;

use html5ever::parse_document;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{
    ElementFlags, NextParserState, NodeOrText, QuirksMode, TreeBuilderOpts, TreeSink,
};
use html5ever::{Attribute, ExpandedName, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use tracing::{debug, trace};

use super::document::Document;
use super::locator::{Position, TagLocator};
use super::node::NodeId;
use crate::error::{Error, Result};

/// Parse an HTML string into a [`Document`]
pub fn parse_html(html: &str) -> Result<Document> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };

    let parsed = parse_document(PositionSink::new(html), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| Error::malformed(e.to_string()))?;

    if !parsed.dom.errors.is_empty() {
        debug!(count = parsed.dom.errors.len(), "html5ever reported recoverable parse errors");
        for err in parsed.dom.errors.iter() {
            trace!(error = %err, "parse error");
        }
    }

    let mut doc = Document::new();
    let root = doc.root().id;
    let mut converter = DomConverter {
        doc: &mut doc,
        positions: &parsed.positions,
    };
    for child in parsed.dom.document.children.borrow().iter() {
        converter.convert_node(child, root);
    }

    debug!(nodes = doc.len(), "parsed html document");
    Ok(doc)
}

/// Output of [`PositionSink`]
struct ParsedDom {
    dom: RcDom,
    positions: HashMap<usize, Position>,
}

fn handle_key(handle: &Handle) -> usize {
    Rc::as_ptr(handle) as usize
}

/// `RcDom` tree sink that remembers where each element came from
struct PositionSink<'s> {
    dom: RcDom,
    locator: TagLocator<'s>,
    current_line: u64,
    positions: HashMap<usize, Position>,
}

impl<'s> PositionSink<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            dom: RcDom::default(),
            locator: TagLocator::new(source),
            current_line: 1,
            positions: HashMap::new(),
        }
    }
}

impl<'s> TreeSink for PositionSink<'s> {
    type Handle = Handle;
    type Output = ParsedDom;

    fn finish(self) -> Self::Output {
        ParsedDom {
            dom: self.dom,
            positions: self.positions,
        }
    }

    fn parse_error(&mut self, msg: Cow<'static, str>) {
        self.dom.parse_error(msg)
    }

    fn get_document(&mut self) -> Handle {
        self.dom.get_document()
    }

    fn elem_name<'a>(&'a self, target: &'a Handle) -> ExpandedName<'a> {
        self.dom.elem_name(target)
    }

    fn create_element(
        &mut self,
        name: QualName,
        attrs: Vec<Attribute>,
        flags: ElementFlags,
    ) -> Handle {
        let mut attr_names: Vec<String> = attrs
            .iter()
            .map(|attr| (*attr.name.local).to_ascii_lowercase())
            .collect();
        attr_names.sort();
        attr_names.dedup();

        let position = self
            .locator
            .locate(&name.local, &attr_names, self.current_line);
        let handle = self.dom.create_element(name, attrs, flags);
        self.positions.insert(handle_key(&handle), position);
        handle
    }

    fn create_comment(&mut self, text: StrTendril) -> Handle {
        self.dom.create_comment(text)
    }

    fn create_pi(&mut self, target: StrTendril, data: StrTendril) -> Handle {
        self.dom.create_pi(target, data)
    }

    fn append(&mut self, parent: &Handle, child: NodeOrText<Handle>) {
        self.dom.append(parent, child)
    }

    fn append_based_on_parent_node(
        &mut self,
        element: &Handle,
        prev_element: &Handle,
        child: NodeOrText<Handle>,
    ) {
        self.dom
            .append_based_on_parent_node(element, prev_element, child)
    }

    fn append_doctype_to_document(
        &mut self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        self.dom
            .append_doctype_to_document(name, public_id, system_id)
    }

    fn mark_script_already_started(&mut self, node: &Handle) {
        self.dom.mark_script_already_started(node)
    }

    fn pop(&mut self, node: &Handle) {
        self.dom.pop(node)
    }

    fn get_template_contents(&mut self, target: &Handle) -> Handle {
        self.dom.get_template_contents(target)
    }

    fn same_node(&self, x: &Handle, y: &Handle) -> bool {
        self.dom.same_node(x, y)
    }

    fn set_quirks_mode(&mut self, mode: QuirksMode) {
        self.dom.set_quirks_mode(mode)
    }

    fn append_before_sibling(&mut self, sibling: &Handle, new_node: NodeOrText<Handle>) {
        self.dom.append_before_sibling(sibling, new_node)
    }

    fn add_attrs_if_missing(&mut self, target: &Handle, attrs: Vec<Attribute>) {
        self.dom.add_attrs_if_missing(target, attrs)
    }

    fn remove_from_parent(&mut self, target: &Handle) {
        self.dom.remove_from_parent(target)
    }

    fn reparent_children(&mut self, node: &Handle, new_parent: &Handle) {
        self.dom.reparent_children(node, new_parent)
    }

    fn is_mathml_annotation_xml_integration_point(&self, handle: &Handle) -> bool {
        self.dom.is_mathml_annotation_xml_integration_point(handle)
    }

    fn set_current_line(&mut self, line_number: u64) {
        self.current_line = line_number;
    }

    fn complete_script(&mut self, node: &Handle) -> NextParserState {
        self.dom.complete_script(node)
    }
}

/// Converts html5ever DOM to our DOM
struct DomConverter<'a> {
    doc: &'a mut Document,
    positions: &'a HashMap<usize, Position>,
}

impl<'a> DomConverter<'a> {
    fn convert_node(&mut self, handle: &Handle, parent_id: NodeId) {
        let node_id = match handle.data {
            RcNodeData::Document | RcNodeData::ProcessingInstruction { .. } => return,
            RcNodeData::Doctype { .. } => self.doc.append_doctype(parent_id),
            RcNodeData::Text { ref contents } => {
                // Text is kept byte for byte, whitespace included
                self.doc.append_text(parent_id, contents.borrow().to_string())
            }
            RcNodeData::Comment { ref contents } => {
                self.doc.append_comment(parent_id, contents.to_string())
            }
            RcNodeData::Element {
                ref name,
                ref attrs,
                ref template_contents,
                ..
            } => {
                let attributes: Vec<(String, String)> = attrs
                    .borrow()
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect();
                let id = self
                    .doc
                    .append_element(parent_id, name.local.to_string(), attributes);

                let position = self
                    .positions
                    .get(&handle_key(handle))
                    .copied()
                    .unwrap_or_default();
                self.doc.set_position(id, position.line, position.column);

                // <template> content lives in a separate fragment
                if let Some(ref contents) = *template_contents.borrow() {
                    for child in contents.children.borrow().iter() {
                        self.convert_node(child, id);
                    }
                }

                id
            }
        };

        for child in handle.children.borrow().iter() {
            self.convert_node(child, node_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_html() {
        let doc = parse_html("<html><body><p>Hello</p></body></html>").unwrap();
        let p = doc.elements_by_tag("p").next().unwrap();
        assert_eq!(p.text_content(), "Hello");
    }

    #[test]
    fn test_parse_with_attributes() {
        let doc = parse_html("<div id=\"test\" style=\"\">content</div>").unwrap();
        let div = doc.elements_by_tag("div").next().unwrap();
        assert_eq!(div.get_attribute("id"), Some("test"));
        assert_eq!(div.get_attribute("style"), Some(""));
        assert!(div.has_attribute("style"));
    }

    #[test]
    fn test_names_are_lowercased_by_parser() {
        let doc = parse_html("<SCRIPT>var a;</SCRIPT><DIV ONCLICK=\"go()\"></DIV>").unwrap();
        let script = doc.elements_by_tag("script").next().unwrap();
        assert_eq!(script.first_text_child().and_then(|t| t.text()), Some("var a;"));

        let div = doc.elements_by_tag("div").next().unwrap();
        assert_eq!(div.get_attribute("onclick"), Some("go()"));
    }

    #[test]
    fn test_whitespace_text_kept() {
        let doc = parse_html("<script>\n  var i = 1;\n</script>").unwrap();
        let script = doc.elements_by_tag("script").next().unwrap();
        assert_eq!(
            script.first_text_child().and_then(|t| t.text()),
            Some("\n  var i = 1;\n")
        );
    }

    #[test]
    fn test_line_and_column() {
        let html = "<!DOCTYPE html>\n<html>\n<head>\n  <style>p{}</style>\n</head>\n<body>\n    <div></div><span></span>\n</body>\n</html>";
        let doc = parse_html(html).unwrap();

        let style = doc.elements_by_tag("style").next().unwrap();
        assert_eq!(style.line(), Some(4));
        assert_eq!(style.column(), Some(3));

        let div = doc.elements_by_tag("div").next().unwrap();
        assert_eq!(div.line(), Some(7));
        assert_eq!(div.column(), Some(5));

        let span = doc.elements_by_tag("span").next().unwrap();
        assert_eq!(span.line(), Some(7));
        assert_eq!(span.column(), Some(16));
    }

    #[test]
    fn test_implied_elements_have_no_column() {
        let doc = parse_html("<p>x</p>").unwrap();
        let body = doc.elements_by_tag("body").next().unwrap();
        assert_eq!(body.column(), None);

        let p = doc.elements_by_tag("p").next().unwrap();
        assert_eq!(p.line(), Some(1));
        assert_eq!(p.column(), Some(1));
    }

    #[test]
    fn test_template_contents_included() {
        let doc = parse_html("<template><script>tpl()</script></template>").unwrap();
        let script = doc.elements_by_tag("script").next().unwrap();
        assert_eq!(script.text_content(), "tpl()");
        assert_eq!(script.parent().and_then(|p| p.local_name()), Some("template"));
    }

    #[test]
    fn test_column_ignores_tags_in_script_text() {
        let doc =
            parse_html("<script>document.write(\"<b>\")</script><b style=\"c:d\">").unwrap();
        let b = doc.elements_by_tag("b").next().unwrap();
        assert_eq!(b.line(), Some(1));
        assert_eq!(b.column(), Some(39));
    }

    #[test]
    fn test_column_ignores_tags_in_attribute_values() {
        let doc = parse_html("<div title=\"<span>\"><span onclick=\"x()\">").unwrap();
        let span = doc.elements_by_tag("span").next().unwrap();
        assert_eq!(span.column(), Some(21));
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let doc = parse_html("<p>a</p>\r<p>b</p>\r<script>go()</script>").unwrap();
        let script = doc.elements_by_tag("script").next().unwrap();
        assert_eq!(script.line(), Some(3));
        assert_eq!(script.column(), Some(1));

        let doc = parse_html("<p>a</p>\r\n<i>b</i>").unwrap();
        let i = doc.elements_by_tag("i").next().unwrap();
        assert_eq!(i.line(), Some(2));
        assert_eq!(i.column(), Some(1));
    }

    #[test]
    fn test_multiline_start_tag_reports_first_line() {
        let mut html = String::from("<div");
        for n in 0..21 {
            html.push_str(&format!("\n  data-a{}=\"{}\"", n, n));
        }
        html.push_str("\n  style=\"color:red\">x</div>");

        let doc = parse_html(&html).unwrap();
        let div = doc.elements_by_tag("div").next().unwrap();
        assert_eq!(div.line(), Some(1));
        assert_eq!(div.column(), Some(1));
    }

    #[test]
    fn test_merged_body_does_not_shift_columns() {
        let doc = parse_html("<p>a</p><body onload=\"x()\"><i style=\"c:d\">").unwrap();
        let i = doc.elements_by_tag("i").next().unwrap();
        assert_eq!(i.column(), Some(28));
    }
}
