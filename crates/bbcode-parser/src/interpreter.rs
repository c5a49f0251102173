//! Markup interpreter
//!
//! Recursive interpreter that turns documentation markup into a tree of
//! [`Node`]s rooted at a `root` tag.
//!
//! Malformed markup is never an error: anything the scanner cannot match
//! stays in the surrounding text.

use crate::ast::{Node, Params, ReferenceKind, TagKind, TagNode};
use crate::scanner::{Element, Scanner};

/// Converts markup text into an AST
pub trait Interpreter {
    /// Interpret a whole text blob into a `root` tag
    fn interpret(&self, text: &str) -> TagNode;
}

/// Options for the BBCode interpreter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpreterOptions {
    /// Maximum nesting depth at which element content is still interpreted.
    /// Content nested deeper is kept as literal text. `None` means unbounded.
    pub max_depth: Option<usize>,
}

/// Options written after a tag name, split into positional and keyed values
///
/// `[operator Color.operator *]` has the positional options
/// `["Color.operator", "*"]`; `[img width=32]` has the keyed option
/// `width=32`; `[url=https://example.com]` stores its value under the
/// empty key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOptions {
    pub list: Vec<String>,
    pub map: Params,
}

impl TagOptions {
    /// Get a positional option, or an empty string when absent
    pub fn positional(&self, index: usize) -> &str {
        self.list.get(index).map(String::as_str).unwrap_or_default()
    }

    /// Get a keyed option
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key)
    }
}

/// Parse the raw options of a tag
///
/// Options are separated by single spaces. A token without `=` is positional;
/// a token with `=` is split once into key and value, later keys overwriting
/// earlier ones.
pub fn parse_options(options: &str) -> TagOptions {
    let mut result = TagOptions::default();

    for token in options.split(' ') {
        if token.is_empty() {
            continue;
        }
        match token.split_once('=') {
            Some((key, value)) => {
                result.map.insert(key, value);
            }
            None => result.list.push(token.to_string()),
        }
    }

    result
}

/// Interpreter for the BBCode-like markup of Godot class documentation
///
/// Supported paired elements: `[b]`, `[i]`, `[u]`, `[s]`, `[p]`, `[color]`,
/// `[font]`, `[img]`, `[url]`, `[center]`, `[kbd]`, `[code]` and
/// `[codeblock]`. Standalone elements: `[br]`, `[lb]`, `[rb]`, `[param x]`,
/// symbol references (`[method Node.hide]`, ...) and class references
/// (`[Node2D]`).
#[derive(Debug, Clone, Default)]
pub struct BbcodeInterpreter {
    options: InterpreterOptions,
}

impl BbcodeInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: InterpreterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &InterpreterOptions {
        &self.options
    }

    /// Parse the raw options of a tag (see [`parse_options`])
    pub fn parse_options(&self, options: &str) -> TagOptions {
        parse_options(options)
    }

    /// Parse a reference element into a `reference` tag
    ///
    /// `[<kind> <name>]` references a symbol, `[operator <name> <symbol>]`
    /// also records the operator symbol, `[param <name>]` becomes inline
    /// code, and any other name is taken as a class name.
    pub fn parse_reference_tag(&self, el: &Element<'_>) -> TagNode {
        let options = parse_options(el.options);

        if let Some(kind) = ReferenceKind::parse(el.name) {
            let mut params =
                Params::from([("type", kind.as_str()), ("name", options.positional(0))]);
            if kind == ReferenceKind::Operator {
                params.insert("symbol", options.positional(1));
            }
            return TagNode::with_params(TagKind::Reference.as_str(), vec![], params);
        }

        if el.name == "param" {
            return TagNode::with_children(
                TagKind::Code.as_str(),
                vec![Node::text(options.positional(0))],
            );
        }

        TagNode::with_params(
            TagKind::Reference.as_str(),
            vec![],
            Params::from([("type", ReferenceKind::Class.as_str()), ("name", el.name)]),
        )
    }

    /// Parse a standalone element (one without a closing tag)
    pub fn parse_tag(&self, el: &Element<'_>) -> Node {
        match el.name {
            "br" => TagNode::new(TagKind::Newline.as_str()).into(),
            "lb" => Node::text("["),
            "rb" => Node::text("]"),
            // Any other bracket-only element names a documented symbol
            _ => self.parse_reference_tag(el).into(),
        }
    }

    /// Parse a scanned element, interpreting its content recursively
    pub fn parse_element(&self, el: &Element<'_>) -> Node {
        self.parse_element_at(el, 1)
    }

    /// Interpret a text into a fresh `root` tag
    pub fn parse_text(&self, text: &str) -> TagNode {
        self.parse_text_into(text, TagNode::new(TagKind::Root.as_str()))
    }

    /// Interpret a text, appending the resulting nodes to `root`
    pub fn parse_text_into(&self, text: &str, root: TagNode) -> TagNode {
        self.parse_text_at(text, root, 0)
    }

    fn parse_text_at(&self, text: &str, mut root: TagNode, depth: usize) -> TagNode {
        let elements = Scanner::scan(text);

        // Without elements the whole text is a single leaf
        if elements.is_empty() {
            root.push(Node::text(text));
            return root;
        }

        let mut prev_end = 0;
        for el in &elements {
            if el.span.start > prev_end {
                root.push(Node::text(&text[prev_end..el.span.start]));
            }
            root.push(self.parse_element_at(el, depth + 1));
            prev_end = el.span.end;
        }

        if prev_end < text.len() {
            root.push(Node::text(&text[prev_end..]));
        }

        root
    }

    /// `depth` is the nesting depth of the element's content
    fn parse_element_at(&self, el: &Element<'_>, depth: usize) -> Node {
        let Some(content) = el.content else {
            return self.parse_tag(el);
        };

        let options = parse_options(el.options);
        let mut element = TagNode::new(el.name);

        match el.name {
            "b" => element.name = TagKind::Bold.to_string(),
            "i" => element.name = TagKind::Italic.to_string(),
            "u" => element.name = TagKind::Underline.to_string(),
            "s" => element.name = TagKind::Strikethrough.to_string(),
            "p" => element.name = TagKind::Paragraph.to_string(),
            "color" => {
                element.name = TagKind::Color.to_string();
                element
                    .params
                    .insert("value", options.get("").unwrap_or_default());
            }
            "font" => {
                element.name = TagKind::Font.to_string();
                element
                    .params
                    .insert("url", options.get("").unwrap_or_default());
            }
            "img" => {
                element.name = TagKind::Image.to_string();
                element
                    .params
                    .insert("width", options.get("width").unwrap_or_default());
            }
            "url" => {
                // [url]https://...[/url] uses the content as its own target
                element.name = TagKind::Link.to_string();
                element
                    .params
                    .insert("url", options.get("").unwrap_or(content));
            }
            "center" => {
                element.name = TagKind::Alignment.to_string();
                element.params.insert("x", "center");
            }

            // Keyboard keys and code samples are taken literally
            "kbd" => return literal(TagKind::Keyboard, Params::new(), content),
            "code" => return literal(TagKind::Code, Params::new(), content),
            "codeblock" => {
                let params = Params::from([("language", options.get("lang").unwrap_or_default())]);
                return literal(TagKind::Codeblock, params, content);
            }

            // Unknown element - keep its name and options
            _ => {
                tracing::debug!(tag = el.name, "keeping unrecognized paired tag");
                element.params = options.map;
            }
        }

        if !content.is_empty() {
            if self.exceeds_depth(depth) {
                tracing::warn!(
                    tag = el.name,
                    depth,
                    "nesting limit reached, keeping element content as text"
                );
                element.push(Node::text(content));
            } else {
                element = self.parse_text_at(content, element, depth);
            }
        }

        element.into()
    }

    fn exceeds_depth(&self, depth: usize) -> bool {
        self.options.max_depth.is_some_and(|max| depth > max)
    }
}

impl Interpreter for BbcodeInterpreter {
    fn interpret(&self, text: &str) -> TagNode {
        self.parse_text(text)
    }
}

/// A tag whose content is a single uninterpreted text leaf
fn literal(kind: TagKind, params: Params, content: &str) -> Node {
    TagNode::with_params(kind.as_str(), vec![Node::text(content)], params).into()
}
