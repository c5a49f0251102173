//! Markup element scanner
//!
//! Finds `[name options]` elements in documentation text, pairing each with
//! its `[/name]` closing tag when one follows. Elements are yielded left to
//! right without overlap.

use regex::Regex;
use std::sync::LazyLock;

/// Opening tag: a word name, then everything up to the first `]` as options.
static OPENING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?P<name>\w+)(?P<options>[\s\S]*?)\]").expect("opening tag pattern is valid")
});

/// Byte range of an element in the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Starting byte offset
    pub start: usize,
    /// Ending byte offset (exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A scanned markup element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<'a> {
    /// Tag name as written (`b`, `url`, `method`, `Node2D`, ...)
    pub name: &'a str,
    /// Raw text between the name and `]`, leading space included
    pub options: &'a str,
    /// Inner content, present only when a `[/name]` closing tag matched
    pub content: Option<&'a str>,
    pub span: Span,
}

impl<'a> Element<'a> {
    /// Whether the element matched in its `[name]content[/name]` form
    pub fn is_paired(&self) -> bool {
        self.content.is_some()
    }

    /// Scan the first element in `text`, if any
    pub fn first(text: &'a str) -> Option<Self> {
        Scanner::new(text).next()
    }
}

/// Iterator over the elements of a text
pub struct Scanner<'a> {
    text: &'a str,
    /// Byte offset where the next search starts
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Scan all elements of a text
    pub fn scan(text: &'a str) -> Vec<Element<'a>> {
        Scanner::new(text).collect()
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }

        let caps = OPENING_TAG.captures_at(self.text, self.pos)?;
        let opening = caps.get(0)?;
        let name = caps.name("name")?.as_str();
        let options = caps.name("options").map_or("", |m| m.as_str());

        // The content runs up to the nearest closing tag with the same name
        let closing = format!("[/{}]", name);
        let rest = &self.text[opening.end()..];
        let (content, end) = match rest.find(&closing) {
            Some(offset) => (
                Some(&rest[..offset]),
                opening.end() + offset + closing.len(),
            ),
            None => (None, opening.end()),
        };

        self.pos = end;

        Some(Element {
            name,
            options,
            content,
            span: Span::new(opening.start(), end),
        })
    }
}
