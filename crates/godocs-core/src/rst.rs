//! reStructuredText translator
//!
//! Renders a markup AST as reStructuredText for Sphinx documentation.

use bbcode_parser::{SyntaxTranslator, TagKind, TagNode, TextNode};

/// Indentation of directive bodies
const DIRECTIVE_INDENT: &str = "   ";

/// Translator producing reStructuredText
#[derive(Debug, Clone, Copy, Default)]
pub struct RstTranslator;

impl RstTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl SyntaxTranslator for RstTranslator {
    fn translate_text(&self, node: &TextNode) -> String {
        node.content.clone()
    }

    /// Concatenate children, keeping directives in blocks of their own
    ///
    /// A directive is preceded by a blank line unless it opens the output,
    /// and the first non-blank content after it starts a new block.
    fn translate_children(&self, node: &TagNode) -> String {
        let mut out = String::new();
        let mut after_directive = false;

        for child in &node.children {
            let rendered = child.translate(self);
            let directive = child.as_tag().is_some_and(|tag| is_directive(&tag.kind()));
            let blank = rendered.trim().is_empty();

            if !out.is_empty() && (directive || (after_directive && !blank)) {
                separate_blocks(&mut out, &rendered);
            }
            if directive {
                after_directive = true;
            } else if !blank {
                after_directive = false;
            }
            out.push_str(&rendered);
        }

        out
    }

    fn translate_tag(&self, node: &TagNode) -> String {
        let content = self.translate_children(node);

        match node.kind() {
            TagKind::Root | TagKind::Paragraph => content,
            TagKind::Bold => format!("**{}**", content),
            TagKind::Italic => format!("*{}*", content),
            TagKind::Newline => "\n".to_string(),
            TagKind::Code => format!("``{}``", content),
            TagKind::Codeblock => make_codeblock(&content, node.param("language")),
            TagKind::Link => format!("{} <{}>_", content, node.param("url")),
            TagKind::Reference => make_reference(node.param("name")),
            TagKind::Keyboard => format!(":kbd:`{}`", content),
            TagKind::Image => make_image(&content, node.param("width")),
            // No inline equivalent in reStructuredText
            TagKind::Underline
            | TagKind::Strikethrough
            | TagKind::Color
            | TagKind::Font
            | TagKind::Alignment => content,
            TagKind::Unknown(_) => String::new(),
        }
    }
}

fn is_directive(kind: &TagKind) -> bool {
    matches!(kind, TagKind::Codeblock | TagKind::Image)
}

/// Push newlines until `out` and `next` are separated by a blank line
fn separate_blocks(out: &mut String, next: &str) {
    let trailing = out.chars().rev().take_while(|c| *c == '\n').count();
    let leading = next.chars().take_while(|c| *c == '\n').count();
    for _ in (trailing + leading)..2 {
        out.push('\n');
    }
}

/// Build a `codeblock` directive with the content indented under it
///
/// Leading newlines are dropped and trailing ones collapse into a single
/// newline so that text after the block stays outside of it.
fn make_codeblock(content: &str, language: &str) -> String {
    let header = format!(".. codeblock:: {} ", language);
    let body = content.trim_start_matches('\n');
    let mut out = format!("{}\n\n{}", header, indent(body.trim_end_matches('\n')));
    if body.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn make_reference(name: &str) -> String {
    format!(":ref:`{} <{}>`", name, name)
}

fn make_image(path: &str, width: &str) -> String {
    let mut out = format!(".. image:: {}", path);
    if !width.is_empty() {
        out.push('\n');
        out.push_str(DIRECTIVE_INDENT);
        out.push_str(":width: ");
        out.push_str(width);
    }
    out
}

/// Indent every non-empty line for a directive body
fn indent(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", DIRECTIVE_INDENT, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
