// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! The catalog of inline content
//!
//! Every way a document can carry script or style that a CSP without
//! `'unsafe-inline'` would block is one [`MatchRule`] here. Rule order is
//! the order in which matches are reported.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::dom::Node;
use crate::error::Error;

/// CSP directive an inline piece of content is governed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Directive {
    #[serde(rename = "script-src")]
    ScriptSrc,
    #[serde(rename = "style-src")]
    StyleSrc,
}

impl Directive {
    /// All known directives
    pub const ALL: [Directive; 2] = [Directive::ScriptSrc, Directive::StyleSrc];

    /// Directive name as written in a policy
    pub fn as_str(&self) -> &'static str {
        match self {
            Directive::ScriptSrc => "script-src",
            Directive::StyleSrc => "style-src",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Directive {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Directive::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| Error::invalid_target(s))
    }
}

/// Revision of [`EVENT_HANDLERS`].
///
/// Bump whenever the list changes: it alters which records a document
/// produces.
pub const EVENT_HANDLERS_VERSION: u32 = 1;

/// Inline event-handler content attributes, in reporting order.
pub const EVENT_HANDLERS: &[&str] = &[
    "onabort",
    "onafterprint",
    "onanimationcancel",
    "onanimationend",
    "onanimationiteration",
    "onanimationstart",
    "onauxclick",
    "onbeforeinput",
    "onbeforematch",
    "onbeforeprint",
    "onbeforetoggle",
    "onbeforeunload",
    "onblur",
    "oncancel",
    "oncanplay",
    "oncanplaythrough",
    "onchange",
    "onclick",
    "onclose",
    "oncontextlost",
    "oncontextmenu",
    "oncontextrestored",
    "oncopy",
    "oncuechange",
    "oncut",
    "ondblclick",
    "ondrag",
    "ondragend",
    "ondragenter",
    "ondragleave",
    "ondragover",
    "ondragstart",
    "ondrop",
    "ondurationchange",
    "onemptied",
    "onended",
    "onerror",
    "onfocus",
    "onfocusin",
    "onfocusout",
    "onformdata",
    "ongotpointercapture",
    "onhashchange",
    "oninput",
    "oninvalid",
    "onkeydown",
    "onkeypress",
    "onkeyup",
    "onlanguagechange",
    "onload",
    "onloadeddata",
    "onloadedmetadata",
    "onloadstart",
    "onlostpointercapture",
    "onmessage",
    "onmessageerror",
    "onmousedown",
    "onmouseenter",
    "onmouseleave",
    "onmousemove",
    "onmouseout",
    "onmouseover",
    "onmouseup",
    "onmousewheel",
    "onoffline",
    "ononline",
    "onpagehide",
    "onpageshow",
    "onpaste",
    "onpause",
    "onplay",
    "onplaying",
    "onpointercancel",
    "onpointerdown",
    "onpointerenter",
    "onpointerleave",
    "onpointermove",
    "onpointerout",
    "onpointerover",
    "onpointerup",
    "onpopstate",
    "onprogress",
    "onratechange",
    "onrejectionhandled",
    "onreset",
    "onresize",
    "onscroll",
    "onscrollend",
    "onsecuritypolicyviolation",
    "onseeked",
    "onseeking",
    "onselect",
    "onselectionchange",
    "onselectstart",
    "onslotchange",
    "onstalled",
    "onstorage",
    "onsubmit",
    "onsuspend",
    "ontimeupdate",
    "ontoggle",
    "ontouchcancel",
    "ontouchend",
    "ontouchmove",
    "ontouchstart",
    "ontransitioncancel",
    "ontransitionend",
    "ontransitionrun",
    "ontransitionstart",
    "onunhandledrejection",
    "onunload",
    "onvolumechange",
    "onwaiting",
    "onwebkitanimationend",
    "onwebkitanimationiteration",
    "onwebkitanimationstart",
    "onwebkittransitionend",
    "onwheel",
];

lazy_static! {
    static ref RULES: Vec<MatchRule> = {
        let mut rules = vec![
            MatchRule::ByTagName {
                tag: "script",
                directive: Directive::ScriptSrc,
            },
            MatchRule::ByTagName {
                tag: "style",
                directive: Directive::StyleSrc,
            },
            MatchRule::ByAttributePresence {
                attribute: "style",
                directive: Directive::StyleSrc,
            },
        ];
        rules.extend(EVENT_HANDLERS.iter().map(|&attribute| MatchRule::ByAttributePresence {
            attribute,
            directive: Directive::ScriptSrc,
        }));
        rules
    };
}

/// The full rule catalog in declaration order
pub fn rules() -> &'static [MatchRule] {
    &RULES
}

/// One way of finding inline content in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Text of elements with this tag name. Elements without a non-empty
    /// text child are not matched.
    ByTagName {
        tag: &'static str,
        directive: Directive,
    },
    /// Value of this attribute on any element that carries it, empty or not
    ByAttributePresence {
        attribute: &'static str,
        directive: Directive,
    },
}

impl MatchRule {
    /// Directive this rule feeds
    pub fn directive(&self) -> Directive {
        match self {
            MatchRule::ByTagName { directive, .. }
            | MatchRule::ByAttributePresence { directive, .. } => *directive,
        }
    }

    /// Attribute holding the content, if the rule is attribute based
    pub fn attribute_name(&self) -> Option<&'static str> {
        match self {
            MatchRule::ByTagName { .. } => None,
            MatchRule::ByAttributePresence { attribute, .. } => Some(*attribute),
        }
    }

    /// Decide whether `node` qualifies, looking only at its tag and attributes
    pub fn matches(&self, node: &Node<'_>) -> bool {
        if !node.is_element() {
            return false;
        }
        match self {
            MatchRule::ByTagName { tag, .. } => node.local_name() == Some(*tag),
            MatchRule::ByAttributePresence { attribute, .. } => node.has_attribute(attribute),
        }
    }

    /// Content this rule extracts from `node`, or `None` if it yields nothing
    pub fn content<'a>(&self, node: &Node<'a>) -> Option<&'a str> {
        if !self.matches(node) {
            return None;
        }
        match self {
            MatchRule::ByTagName { .. } => node
                .first_text_child()
                .and_then(|text| text.text())
                .filter(|text| !text.is_empty()),
            MatchRule::ByAttributePresence { attribute, .. } => node.get_attribute(attribute),
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchRule::ByTagName { tag, directive } => write!(f, "<{}> -> {}", tag, directive),
            MatchRule::ByAttributePresence {
                attribute,
                directive,
            } => write!(f, "[{}] -> {}", attribute, directive),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use std::collections::HashSet;

    #[test]
    fn test_rule_order() {
        let rules = rules();
        assert_eq!(rules.len(), 3 + EVENT_HANDLERS.len());
        assert_eq!(
            rules[0],
            MatchRule::ByTagName {
                tag: "script",
                directive: Directive::ScriptSrc
            }
        );
        assert_eq!(
            rules[1],
            MatchRule::ByTagName {
                tag: "style",
                directive: Directive::StyleSrc
            }
        );
        assert_eq!(rules[2].attribute_name(), Some("style"));
        assert_eq!(rules[3].attribute_name(), Some(EVENT_HANDLERS[0]));
        assert!(rules[3..]
            .iter()
            .all(|r| r.directive() == Directive::ScriptSrc));
    }

    #[test]
    fn test_event_handler_list_is_well_formed() {
        assert!(EVENT_HANDLERS.len() >= 100);
        let unique: HashSet<&str> = EVENT_HANDLERS.iter().copied().collect();
        assert_eq!(unique.len(), EVENT_HANDLERS.len(), "duplicate handler");
        for name in EVENT_HANDLERS {
            assert!(name.starts_with("on"));
            assert_eq!(*name, name.to_ascii_lowercase());
        }
        assert!(unique.contains("onclick"));
        assert!(unique.contains("onerror"));
        assert!(!unique.contains("style"));
    }

    #[test]
    fn test_directive_from_str() {
        assert_eq!("script-src".parse::<Directive>().unwrap(), Directive::ScriptSrc);
        assert_eq!("style-src".parse::<Directive>().unwrap(), Directive::StyleSrc);
        assert!(matches!(
            "img-src".parse::<Directive>(),
            Err(Error::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_tag_rule_skips_empty_text() {
        let mut doc = Document::new();
        let root = doc.root().id;
        let empty = doc.append_element(root, "script", Vec::<(String, String)>::new());
        let blank = doc.append_element(root, "script", Vec::<(String, String)>::new());
        doc.append_text(blank, "");
        let full = doc.append_element(root, "script", Vec::<(String, String)>::new());
        doc.append_text(full, "go();");

        let rule = rules()[0];
        assert!(rule.matches(&doc.node(empty)));
        assert_eq!(rule.content(&doc.node(empty)), None);
        assert_eq!(rule.content(&doc.node(blank)), None);
        assert_eq!(rule.content(&doc.node(full)), Some("go();"));
    }

    #[test]
    fn test_attribute_rule_keeps_empty_value() {
        let mut doc = Document::new();
        let root = doc.root().id;
        let div = doc.append_element(root, "div", [("style", "")]);

        let rule = rules()[2];
        assert_eq!(rule.content(&doc.node(div)), Some(""));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let mut doc = Document::new();
        let root = doc.root().id;
        let upper = doc.append_element(root, "SCRIPT", [("ONCLICK", "x()")]);
        doc.append_text(upper, "y();");

        let node = doc.node(upper);
        assert!(rules().iter().all(|rule| !rule.matches(&node)));
    }

    #[test]
    fn test_text_nodes_never_match() {
        let mut doc = Document::new();
        let root = doc.root().id;
        let text = doc.append_text(root, "script");
        assert!(rules().iter().all(|rule| !rule.matches(&doc.node(text))));
    }

    #[test]
    fn test_display() {
        assert_eq!(rules()[0].to_string(), "<script> -> script-src");
        assert_eq!(rules()[2].to_string(), "[style] -> style-src");
    }
}
