// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Start tag positions
//!
//! html5ever only reports the line the tokenizer is on. To get an element's
//! own line and column, the source is scanned once up front for start tags,
//! in the same order the tokenizer emits them. Comments, quoted attribute
//! values and raw-text bodies are skipped the way the tokenizer skips them,
//! so markup-looking text inside them is never taken for a tag.
//!
//! While the tree builder creates elements, [`TagLocator`] moves a cursor
//! forward through that list and pairs each element with its start tag.
//! When the pairing is not certain the column is left empty.

/// Elements whose body is not tokenized as markup
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script",
    "style",
    "textarea",
    "title",
    "xmp",
    "iframe",
    "noembed",
    "noframes",
    "noscript",
    "plaintext",
];

/// Elements the tree builder may create without a start tag
const IMPLIED_ELEMENTS: &[&str] = &["html", "head", "body", "tbody", "tr", "colgroup", "p"];

/// Source position of an element start tag, 1-based
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Position {
    pub line: Option<u32>,
    pub column: Option<u32>,
}

/// A start tag found in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StartTag {
    /// ASCII-lowercased tag name
    pub name: String,
    /// Lowercased attribute names, sorted and deduplicated
    pub attrs: Vec<String>,
    /// Byte offset of the `<`
    pub offset: usize,
}

/// Pairs created elements with their start tags
pub(crate) struct TagLocator<'s> {
    source: &'s str,
    line_starts: Vec<usize>,
    tags: Vec<StartTag>,
    next: usize,
}

impl<'s> TagLocator<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            line_starts: line_starts(source),
            tags: scan_start_tags(source),
            next: 0,
        }
    }

    /// Find the start tag of an element the tree builder is creating.
    ///
    /// `current_line` is the tokenizer's line, so the start tag cannot begin
    /// below it. Attribute-less elements the parser can synthesize are only
    /// paired with the very next start tag; anything else is paired with the
    /// next start tag of the same name and attribute set, dropping the tags
    /// in between (ignored or merged by the tree builder).
    pub fn locate(&mut self, name: &str, attrs: &[String], current_line: u64) -> Position {
        let fallback = Position {
            line: u32::try_from(current_line).ok().filter(|line| *line > 0),
            column: None,
        };

        let window = if attrs.is_empty() && IMPLIED_ELEMENTS.contains(&name) {
            1
        } else {
            usize::MAX
        };

        let found = self.tags[self.next..]
            .iter()
            .take(window)
            .take_while(|tag| (self.line_of(tag.offset) as u64) <= current_line)
            .position(|tag| tag.name == name && tag.attrs == attrs);

        let Some(rel) = found else {
            return fallback;
        };

        let index = self.next + rel;
        self.next = index + 1;

        let offset = self.tags[index].offset;
        let line = self.line_of(offset);
        let line_start = self.line_starts[line - 1];
        let column = self.source[line_start..offset].chars().count() + 1;

        Position {
            line: u32::try_from(line).ok(),
            column: u32::try_from(column).ok(),
        }
    }

    /// 1-based line containing a byte offset
    fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset)
    }
}

/// Byte offsets where each line starts.
///
/// `\r\n`, a lone `\r` and `\n` each end a line, as in the tokenizer's
/// input preprocessing.
pub(crate) fn line_starts(source: &str) -> Vec<usize> {
    let bytes = source.as_bytes();
    let mut starts = vec![0];
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                starts.push(i + 2);
                i += 2;
            }
            b'\r' | b'\n' => {
                starts.push(i + 1);
                i += 1;
            }
            _ => i += 1,
        }
    }

    starts
}

/// All start tags in `source`, in document order
pub(crate) fn scan_start_tags(source: &str) -> Vec<StartTag> {
    let bytes = source.as_bytes();
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(rel) = bytes[pos..].iter().position(|&b| b == b'<') {
        let lt = pos + rel;

        if bytes[lt..].starts_with(b"<!--") {
            pos = find(bytes, lt + 4, b"-->").map_or(bytes.len(), |end| end + 3);
            continue;
        }

        match bytes.get(lt + 1) {
            // end tags, doctypes, bogus comments
            Some(b'/' | b'!' | b'?') => pos = skip_past(bytes, lt + 2, b'>'),
            Some(c) if c.is_ascii_alphabetic() => {
                let (tag, end) = read_start_tag(bytes, lt);
                pos = end;

                if RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) {
                    pos = if tag.name == "plaintext" {
                        bytes.len()
                    } else {
                        find_end_tag(bytes, pos, &tag.name).unwrap_or(bytes.len())
                    };
                }

                tags.push(tag);
            }
            _ => pos = lt + 1,
        }
    }

    tags
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

/// Read the start tag at `lt`; returns the tag and the offset after its `>`
fn read_start_tag(bytes: &[u8], lt: usize) -> (StartTag, usize) {
    let mut i = lt + 1;
    while i < bytes.len() && !is_space(bytes[i]) && bytes[i] != b'/' && bytes[i] != b'>' {
        i += 1;
    }
    let name = String::from_utf8_lossy(&bytes[lt + 1..i]).to_ascii_lowercase();

    let mut attrs = Vec::new();
    loop {
        while i < bytes.len() && (is_space(bytes[i]) || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }
        if bytes[i] == b'>' {
            i += 1;
            break;
        }

        // a leading '=' belongs to the name
        let name_start = i;
        i += 1;
        while i < bytes.len()
            && !is_space(bytes[i])
            && !matches!(bytes[i], b'/' | b'>' | b'=')
        {
            i += 1;
        }
        attrs.push(String::from_utf8_lossy(&bytes[name_start..i]).to_ascii_lowercase());

        while i < bytes.len() && is_space(bytes[i]) {
            i += 1;
        }
        if bytes.get(i) != Some(&b'=') {
            continue;
        }
        i += 1;
        while i < bytes.len() && is_space(bytes[i]) {
            i += 1;
        }
        match bytes.get(i) {
            Some(&quote) if quote == b'"' || quote == b'\'' => {
                i = skip_past(bytes, i + 1, quote)
            }
            _ => {
                while i < bytes.len() && !is_space(bytes[i]) && bytes[i] != b'>' {
                    i += 1;
                }
            }
        }
    }

    attrs.sort();
    attrs.dedup();

    (
        StartTag {
            name,
            attrs,
            offset: lt,
        },
        i,
    )
}

/// Offset of the `</name` that closes a raw-text element
fn find_end_tag(bytes: &[u8], from: usize, name: &str) -> Option<usize> {
    let name = name.as_bytes();
    let mut pos = from;

    while let Some(lt) = find(bytes, pos, b"</") {
        let name_start = lt + 2;
        let name_end = name_start + name.len();
        if name_end <= bytes.len() && bytes[name_start..name_end].eq_ignore_ascii_case(name) {
            match bytes.get(name_end) {
                None => return Some(lt),
                Some(&b) if is_space(b) || b == b'/' || b == b'>' => return Some(lt),
                _ => {}
            }
        }
        pos = name_start;
    }

    None
}

fn find(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from >= bytes.len() {
        return None;
    }
    bytes[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|rel| from + rel)
}

/// Offset just past the next `byte`, or the end of input
fn skip_past(bytes: &[u8], from: usize, byte: u8) -> usize {
    if from >= bytes.len() {
        return bytes.len();
    }
    bytes[from..]
        .iter()
        .position(|&b| b == byte)
        .map_or(bytes.len(), |rel| from + rel + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(source: &str) -> Vec<String> {
        scan_start_tags(source).into_iter().map(|t| t.name).collect()
    }

    #[test]
    fn test_line_starts() {
        assert_eq!(line_starts("a"), vec![0]);
        assert_eq!(line_starts("a\nb"), vec![0, 2]);
        assert_eq!(line_starts("a\r\nb"), vec![0, 3]);
        assert_eq!(line_starts("a\rb\rc"), vec![0, 2, 4]);
        assert_eq!(line_starts("\r\n\n"), vec![0, 2, 3]);
    }

    #[test]
    fn test_scan_skips_raw_text_bodies() {
        let tags = scan_start_tags("<script>document.write(\"<b>\")</script><b style=\"c:d\">");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1].name, "b");
        assert_eq!(tags[1].offset, 38);
        assert_eq!(tags[1].attrs, vec!["style"]);

        assert_eq!(names("<STYLE>a<i>b</Style ><i>"), vec!["style", "i"]);
        assert_eq!(names("<title><a></title><a>"), vec!["title", "a"]);
        assert_eq!(names("<plaintext><a><b>"), vec!["plaintext"]);
        assert_eq!(names("<script>x</scriptx><a>"), vec!["script"]);
    }

    #[test]
    fn test_scan_skips_quoted_values() {
        let tags = scan_start_tags("<div title=\"<span>\"><span onclick=\"x()\">");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1].offset, 20);

        assert_eq!(names("<a title='>'><b>"), vec!["a", "b"]);
        assert_eq!(names("<a title=x>y><b>"), vec!["a", "b"]);
    }

    #[test]
    fn test_scan_skips_comments_and_end_tags() {
        assert_eq!(
            names("<!DOCTYPE html><!-- <a> --><?xml ?><p>1</p>< q><a>"),
            vec!["p", "a"]
        );
        assert_eq!(names("<!-- <a>"), Vec::<String>::new());
    }

    #[test]
    fn test_scan_attribute_names() {
        let tags = scan_start_tags("<DIV OnClick=a onclick=b id style/>");
        assert_eq!(tags[0].name, "div");
        assert_eq!(tags[0].attrs, vec!["id", "onclick", "style"]);
    }

    #[test]
    fn test_locate_skips_unmatched_tags() {
        let mut locator = TagLocator::new("<p>a</p><body onload=x><div id=d>");

        // implied html never claims a later tag
        assert_eq!(
            locator.locate("html", &[], 1),
            Position { line: Some(1), column: None }
        );
        assert_eq!(locator.locate("p", &[], 1).column, Some(1));

        // <body> merged into the implied body; div is still found
        let position = locator.locate("div", &["id".to_string()], 1);
        assert_eq!(position, Position { line: Some(1), column: Some(24) });
    }

    #[test]
    fn test_locate_respects_current_line() {
        let mut locator = TagLocator::new("<a>\n<i>");
        assert_eq!(locator.locate("i", &[], 1).column, None);
        assert_eq!(locator.locate("a", &[], 1).column, Some(1));
        assert_eq!(
            locator.locate("i", &[], 2),
            Position { line: Some(2), column: Some(1) }
        );
    }
}
