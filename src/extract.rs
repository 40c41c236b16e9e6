// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Extraction engine
//!
//! Applies the rule catalog to a parsed document. Output order is part of
//! the contract: rules in declaration order, and for each rule the matching
//! elements in document order. Identical input always yields identical
//! output, so allow-lists built from it diff cleanly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::dom::{parse_html, Document, Node};
use crate::error::{Error, Result};
use crate::inline::Inline;
use crate::rules::{rules, Directive, MatchRule};

/// Which directives to look for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Target {
    /// Every directive
    #[default]
    All,
    /// A single directive
    Only(Directive),
}

impl Target {
    /// Check whether records for `directive` are wanted
    pub fn includes(&self, directive: Directive) -> bool {
        match self {
            Target::All => true,
            Target::Only(only) => *only == directive,
        }
    }

    /// Rules consulted for this target, in declaration order
    pub fn rules(&self) -> impl Iterator<Item = &'static MatchRule> + '_ {
        rules().iter().filter(move |rule| self.includes(rule.directive()))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::All => f.write_str("all"),
            Target::Only(directive) => f.write_str(directive.as_str()),
        }
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "all" {
            return Ok(Target::All);
        }
        s.parse::<Directive>()
            .map(Target::Only)
            .map_err(|_| Error::invalid_target(s))
    }
}

impl From<Directive> for Target {
    fn from(directive: Directive) -> Self {
        Target::Only(directive)
    }
}

impl TryFrom<String> for Target {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Target> for String {
    fn from(target: Target) -> Self {
        target.to_string()
    }
}

/// Parse `html` and extract every inline piece of content for `target`
pub fn extract(html: &str, target: Target) -> Result<Vec<Inline>> {
    let doc = parse_html(html)?;
    Ok(extract_document(&doc, target))
}

/// Like [`extract`], with the target given by name.
///
/// An unknown target fails before the document is even parsed.
pub fn parse(html: &str, target: &str) -> Result<Vec<Inline>> {
    let target: Target = target.parse()?;
    extract(html, target)
}

/// Extract inline content from an already parsed document
pub fn extract_document(doc: &Document, target: Target) -> Vec<Inline> {
    let elements: Vec<Node<'_>> = doc.elements().collect();
    let mut inlines = Vec::new();

    for rule in target.rules() {
        let before = inlines.len();
        for element in &elements {
            if let Some(content) = rule.content(element) {
                inlines.push(Inline::at(
                    content,
                    rule.directive(),
                    element.line(),
                    element.column(),
                ));
            }
        }
        if inlines.len() > before {
            trace!(rule = %rule, matches = inlines.len() - before, "rule matched");
        }
    }

    debug!(
        target = %target,
        elements = elements.len(),
        inlines = inlines.len(),
        "extracted inline content"
    );
    inlines
}
