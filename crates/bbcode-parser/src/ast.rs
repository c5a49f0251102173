//! Markup AST types
//!
//! This module defines the tree produced by interpreting documentation markup:
//! text leaves and named tags with ordered children and string parameters.

use crate::translator::SyntaxTranslator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node in the markup AST
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Node {
    /// Literal text
    Text(TextNode),
    /// A semantic tag (bold, link, reference, ...)
    Tag(TagNode),
}

/// Literal text leaf
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNode {
    pub content: String,
}

/// A tag with a semantic name, ordered children and parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagNode {
    /// Semantic name (e.g., "root", "bold", "reference")
    pub name: String,
    /// Children in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    /// Tag parameters (e.g., "url", "language", "type")
    #[serde(default, skip_serializing_if = "Params::is_empty")]
    pub params: Params,
}

/// String parameters of a tag
///
/// Keys are unique and iterate in insertion order. Inserting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a parameter, returning the previous value of `key` if any
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// Known semantic tag names
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagKind {
    Root,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Newline,
    Paragraph,
    Code,
    Codeblock,
    Link,
    Image,
    Font,
    Color,
    Alignment,
    Keyboard,
    Reference,

    // Any other name (custom interpreters, unrecognized markup)
    Unknown(String),
}

impl TagKind {
    /// Parse a tag kind from a semantic name
    pub fn parse(s: &str) -> Self {
        match s {
            "root" => Self::Root,
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "strikethrough" => Self::Strikethrough,
            "newline" => Self::Newline,
            "paragraph" => Self::Paragraph,
            "code" => Self::Code,
            "codeblock" => Self::Codeblock,
            "link" => Self::Link,
            "image" => Self::Image,
            "font" => Self::Font,
            "color" => Self::Color,
            "alignment" => Self::Alignment,
            "keyboard" => Self::Keyboard,
            "reference" => Self::Reference,
            _ => Self::Unknown(s.to_string()),
        }
    }

    /// Get the semantic name as a string
    pub fn as_str(&self) -> &str {
        match self {
            Self::Root => "root",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Strikethrough => "strikethrough",
            Self::Newline => "newline",
            Self::Paragraph => "paragraph",
            Self::Code => "code",
            Self::Codeblock => "codeblock",
            Self::Link => "link",
            Self::Image => "image",
            Self::Font => "font",
            Self::Color => "color",
            Self::Alignment => "alignment",
            Self::Keyboard => "keyboard",
            Self::Reference => "reference",
            Self::Unknown(name) => name,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Symbol kinds a reference tag can point to (the `type` param)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Annotation,
    Constant,
    Enum,
    Member,
    Method,
    Constructor,
    Operator,
    Signal,
    ThemeItem,
    Class,
}

impl ReferenceKind {
    /// Parse a reference keyword as written in markup (`[method Node.hide]`)
    ///
    /// Returns `None` for names that are not reference keywords; those are
    /// treated as class names by the interpreter.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "annotation" => Some(Self::Annotation),
            "constant" => Some(Self::Constant),
            "enum" => Some(Self::Enum),
            "member" => Some(Self::Member),
            "method" => Some(Self::Method),
            "constructor" => Some(Self::Constructor),
            "operator" => Some(Self::Operator),
            "signal" => Some(Self::Signal),
            "theme_item" => Some(Self::ThemeItem),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Annotation => "annotation",
            Self::Constant => "constant",
            Self::Enum => "enum",
            Self::Member => "member",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Operator => "operator",
            Self::Signal => "signal",
            Self::ThemeItem => "theme_item",
            Self::Class => "class",
        }
    }
}

impl Node {
    /// Create a text node
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(TextNode {
            content: content.into(),
        })
    }

    /// Translate this node with the given translator
    ///
    /// The node kind selects the translator method; the translator decides
    /// how to recurse into children.
    pub fn translate<T: SyntaxTranslator + ?Sized>(&self, translator: &T) -> String {
        match self {
            Node::Text(text) => translator.translate_text(text),
            Node::Tag(tag) => translator.translate_tag(tag),
        }
    }

    pub fn as_tag(&self) -> Option<&TagNode> {
        match self {
            Node::Tag(tag) => Some(tag),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Node::Text(text) => Some(text),
            Node::Tag(_) => None,
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Node::Text(text) => write!(f, "\"{}\"", text.content),
            Node::Tag(tag) => tag.write_tree(f, depth),
        }
    }
}

impl From<TagNode> for Node {
    fn from(tag: TagNode) -> Self {
        Node::Tag(tag)
    }
}

impl From<TextNode> for Node {
    fn from(text: TextNode) -> Self {
        Node::Text(text)
    }
}

impl TagNode {
    /// Create a tag with no children and no params
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: vec![],
            params: Params::new(),
        }
    }

    pub fn with_children(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            children,
            params: Params::new(),
        }
    }

    pub fn with_params(name: impl Into<String>, children: Vec<Node>, params: Params) -> Self {
        Self {
            name: name.into(),
            children,
            params,
        }
    }

    /// Append a child node
    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// The semantic kind of this tag
    pub fn kind(&self) -> TagKind {
        TagKind::parse(&self.name)
    }

    /// Get a param value, or an empty string when absent
    pub fn param(&self, key: &str) -> &str {
        self.params.get(key).unwrap_or_default()
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        if !self.params.is_empty() {
            write!(f, " {}", self.params)?;
        }
        if self.children.is_empty() {
            return f.write_str(">");
        }

        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str("\n")?;
            write_indent(f, depth + 1)?;
            child.write_tree(f, depth + 1)?;
        }

        f.write_str("\n")?;
        write_indent(f, depth)?;
        f.write_str(">")
    }
}

fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("\t")?;
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

impl fmt::Display for TagNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

impl fmt::Display for TextNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.content)
    }
}

#[cfg(feature = "json")]
impl TagNode {
    /// Serialize the tree to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize the tree to a pretty-printed JSON string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a tree from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
