// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Inline content records

use std::fmt;
use std::hash::{Hash, Hasher};

use once_cell::sync::OnceCell;

use crate::digest::{self, Algorithm};
use crate::rules::Directive;

/// Number of characters kept by [`Inline::short_content`]
pub const SHORT_CONTENT_CHARS: usize = 50;

/// One piece of inline content found in a document.
///
/// Either the text of a `<script>`/`<style>` element or the value of an
/// attribute such as `style` or `onclick`. Records are immutable; the
/// preview and the three hashes are computed on first access and cached.
#[derive(Clone)]
pub struct Inline {
    content: String,
    directive: Directive,
    line: Option<u32>,
    column: Option<u32>,
    short_end: OnceCell<usize>,
    sha256: OnceCell<String>,
    sha384: OnceCell<String>,
    sha512: OnceCell<String>,
}

impl Inline {
    /// Create a record with no source position
    pub fn new(content: impl Into<String>, directive: Directive) -> Self {
        Self::at(content, directive, None, None)
    }

    /// Create a record found at the given 1-based line and column
    pub fn at(
        content: impl Into<String>,
        directive: Directive,
        line: Option<u32>,
        column: Option<u32>,
    ) -> Self {
        Self {
            content: content.into(),
            directive,
            line,
            column,
            short_end: OnceCell::new(),
            sha256: OnceCell::new(),
            sha384: OnceCell::new(),
            sha512: OnceCell::new(),
        }
    }

    /// The extracted text, exactly as found
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn directive(&self) -> Directive {
        self.directive
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn column(&self) -> Option<u32> {
        self.column
    }

    /// First [`SHORT_CONTENT_CHARS`] characters of the content
    pub fn short_content(&self) -> &str {
        let end = *self.short_end.get_or_init(|| {
            self.content
                .char_indices()
                .nth(SHORT_CONTENT_CHARS)
                .map(|(idx, _)| idx)
                .unwrap_or(self.content.len())
        });
        &self.content[..end]
    }

    /// `sha256-...` hash source
    pub fn sha256(&self) -> &str {
        self.sha256
            .get_or_init(|| digest::encode(&self.content, Algorithm::Sha256))
    }

    /// `sha384-...` hash source
    pub fn sha384(&self) -> &str {
        self.sha384
            .get_or_init(|| digest::encode(&self.content, Algorithm::Sha384))
    }

    /// `sha512-...` hash source
    pub fn sha512(&self) -> &str {
        self.sha512
            .get_or_init(|| digest::encode(&self.content, Algorithm::Sha512))
    }

    /// Hash source for a runtime-selected algorithm
    pub fn hash(&self, algorithm: Algorithm) -> &str {
        match algorithm {
            Algorithm::Sha256 => self.sha256(),
            Algorithm::Sha384 => self.sha384(),
            Algorithm::Sha512 => self.sha512(),
        }
    }

    /// Representation carrying the whole content
    pub fn full_repr(&self) -> String {
        format!("Inline(content='{}')", self.content)
    }
}

impl fmt::Debug for Inline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inline")
            .field("content", &self.content)
            .field("directive", &self.directive)
            .field("line", &self.line)
            .field("column", &self.column)
            .finish()
    }
}

impl fmt::Display for Inline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Inline(content='{}...')", self.short_content())
    }
}

// Caches are derived from `content`, so they take no part in equality.
impl PartialEq for Inline {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
            && self.directive == other.directive
            && self.line == other.line
            && self.column == other.column
    }
}

impl Eq for Inline {}

impl Hash for Inline {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.content.hash(state);
        self.directive.hash(state);
        self.line.hash(state);
        self.column.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_content() {
        let cases = [
            (String::new(), String::new()),
            ("var a = 1".to_string(), "var a = 1".to_string()),
            ("a".repeat(60), "a".repeat(50)),
            ("a ".repeat(100), "a ".repeat(25)),
        ];

        for (content, short) in cases {
            let inline = Inline::new(content, Directive::ScriptSrc);
            assert_eq!(inline.short_content(), short);
        }
    }

    #[test]
    fn test_short_content_counts_chars_not_bytes() {
        let content = "é".repeat(60);
        let inline = Inline::new(content, Directive::StyleSrc);
        assert_eq!(inline.short_content().chars().count(), 50);
        assert_eq!(inline.short_content(), "é".repeat(50));
    }

    #[test]
    fn test_hashes() {
        let inline = Inline::new("var i = 1;", Directive::ScriptSrc);
        assert_eq!(
            inline.sha256(),
            "sha256-1QhCpB/IFWw8Pb/g/IBzIBgErHWG5wrytauZib+UF+g="
        );
        assert_eq!(
            inline.sha384(),
            "sha384-exw+zZA219Su/XnwiE7j7V4yLVNpXk08+H71sGIABcOj8Nq+OiXLWOkPTUajb3tv"
        );
        assert_eq!(inline.hash(Algorithm::Sha512), inline.sha512());
        // cached value is stable
        assert_eq!(inline.sha256(), inline.hash(Algorithm::Sha256));
    }

    #[test]
    fn test_synthetic_record_has_no_position() {
        let inline = Inline::new("color:red;", Directive::StyleSrc);
        assert_eq!(inline.line(), None);
        assert_eq!(inline.column(), None);
    }

    #[test]
    fn test_equality_ignores_caches() {
        let a = Inline::at("x()", Directive::ScriptSrc, Some(3), Some(7));
        let b = a.clone();
        let _ = a.sha512();
        assert_eq!(a, b);
        assert_ne!(a, Inline::at("x()", Directive::ScriptSrc, Some(4), Some(7)));
        assert_ne!(a, Inline::at("x()", Directive::StyleSrc, Some(3), Some(7)));
    }

    #[test]
    fn test_display() {
        let inline = Inline::new("a".repeat(80), Directive::ScriptSrc);
        assert_eq!(inline.to_string(), format!("Inline(content='{}...')", "a".repeat(50)));
        assert_eq!(inline.full_repr(), format!("Inline(content='{}')", "a".repeat(80)));
    }

    #[test]
    fn test_shared_across_threads() {
        let inline = std::sync::Arc::new(Inline::new("alert(1);", Directive::ScriptSrc));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let inline = inline.clone();
                std::thread::spawn(move || inline.sha384().to_string())
            })
            .collect();

        let hashes: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(hashes.iter().all(|h| h == inline.sha384()));
    }
}
