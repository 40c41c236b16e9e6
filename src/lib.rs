// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Inlinehashes - CSP hashes for inline content
//!
//! Finds every piece of inline script and style in an HTML document that a
//! Content-Security-Policy without `'unsafe-inline'` would block, and computes
//! the `sha256-`/`sha384-`/`sha512-` hash sources that allow-list it.
//!
//! ## What counts as inline
//!
//! - text of `<script>` elements (script-src)
//! - text of `<style>` elements (style-src)
//! - `style` attributes (style-src)
//! - event-handler attributes such as `onclick` (script-src)
//!
//! ## Example
//!
//! ```rust
//! use inlinehashes::{parse, Directive};
//!
//! let inlines = parse("<script>var i = 1;</script>", "all").unwrap();
//!
//! assert_eq!(inlines.len(), 1);
//! assert_eq!(inlines[0].directive(), Directive::ScriptSrc);
//! assert_eq!(
//!     inlines[0].sha256(),
//!     "sha256-1QhCpB/IFWw8Pb/g/IBzIBgErHWG5wrytauZib+UF+g="
//! );
//! ```

pub mod config;
pub mod digest;
pub mod dom;
pub mod error;
pub mod extract;
pub mod inline;
pub mod output;
pub mod rules;
pub mod source;

// Re-exports for convenience

// Extraction
pub use extract::{extract, extract_document, parse, Target};
pub use inline::{Inline, SHORT_CONTENT_CHARS};
pub use rules::{rules, Directive, MatchRule, EVENT_HANDLERS, EVENT_HANDLERS_VERSION};

// Hashing
pub use digest::{encode, Algorithm};

// DOM
pub use dom::{parse_html, Document, Node, NodeId, NodeType};

// Errors
pub use error::{Error, Result};

// Acquisition and output
pub use config::{FetchConfig, OutputConfig, OutputFormat, DEFAULT_USER_AGENT};
pub use output::{render, OutputRow};
pub use source::Source;

/// Inlinehashes version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
