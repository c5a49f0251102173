//! Markdown translator
//!
//! Renders a markup AST as CommonMark with a few widely supported
//! extensions (strikethrough, `<kbd>`).

use bbcode_parser::{SyntaxTranslator, TagKind, TagNode, TextNode};

/// Translator producing Markdown
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownTranslator;

impl MarkdownTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl SyntaxTranslator for MarkdownTranslator {
    fn translate_text(&self, node: &TextNode) -> String {
        node.content.clone()
    }

    /// Concatenate children, keeping a closing fence on its own line
    fn translate_children(&self, node: &TagNode) -> String {
        let mut out = String::new();
        let mut after_fence = false;

        for child in &node.children {
            let rendered = child.translate(self);
            if after_fence && !rendered.is_empty() {
                if !out.ends_with('\n') && !rendered.starts_with('\n') {
                    out.push('\n');
                }
                after_fence = false;
            }
            if child.as_tag().is_some_and(|tag| tag.kind() == TagKind::Codeblock) {
                after_fence = true;
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
            TagKind::Italic => format!("_{}_", content),
            TagKind::Strikethrough => format!("~~{}~~", content),
            TagKind::Newline => "\n".to_string(),
            TagKind::Code => inline_code(&content),
            TagKind::Codeblock => fenced_code(&content, node.param("language")),
            TagKind::Keyboard => format!("<kbd>{}</kbd>", content),
            TagKind::Link => format!("[{}]({})", content, node.param("url")),
            TagKind::Reference => node.param("name").to_string(),
            TagKind::Image => format!("![{}]({})", content, content),
            TagKind::Underline | TagKind::Color | TagKind::Font | TagKind::Alignment => content,
            TagKind::Unknown(_) => String::new(),
        }
    }
}

/// Wrap inline code in enough backticks to contain any run inside it
fn inline_code(content: &str) -> String {
    let ticks = "`".repeat(longest_backtick_run(content) + 1);
    if content.starts_with('`') || content.ends_with('`') {
        format!("{} {} {}", ticks, content, ticks)
    } else {
        format!("{}{}{}", ticks, content, ticks)
    }
}

/// Fence a code block, keeping a trailing newline from the markup
fn fenced_code(content: &str, language: &str) -> String {
    let content = content.trim_start_matches('\n');
    let body = content.trim_end_matches('\n');
    let fence = "`".repeat(calculate_fence_length(body));
    let mut out = format!("{}{}\n{}\n{}", fence, language, body, fence);
    if content.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Calculate the required fence length for a code block
///
/// The fence must be at least 3 backticks and longer than any
/// consecutive backtick sequence in the content.
fn calculate_fence_length(content: &str) -> usize {
    3.max(longest_backtick_run(content) + 1)
}

fn longest_backtick_run(content: &str) -> usize {
    let mut max_backticks = 0;
    let mut current_run = 0;

    for c in content.chars() {
        if c == '`' {
            current_run += 1;
            max_backticks = max_backticks.max(current_run);
        } else {
            current_run = 0;
        }
    }

    max_backticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbcode_parser::{Node, Params};

    fn hello() -> Vec<Node> {
        vec![Node::text("Hello, World!")]
    }

    #[test]
    fn test_emphasis() {
        let bold = TagNode::with_children("bold", hello());
        let italic = TagNode::with_children("italic", hello());
        let strike = TagNode::with_children("strikethrough", hello());

        assert_eq!(MarkdownTranslator.translate_tag(&bold), "**Hello, World!**");
        assert_eq!(MarkdownTranslator.translate_tag(&italic), "_Hello, World!_");
        assert_eq!(MarkdownTranslator.translate_tag(&strike), "~~Hello, World!~~");
    }

    #[test]
    fn test_inline_code() {
        let code = TagNode::with_children("code", hello());
        assert_eq!(MarkdownTranslator.translate_tag(&code), "`Hello, World!`");
    }

    #[test]
    fn test_inline_code_with_backticks() {
        let code = TagNode::with_children("code", vec![Node::text("a ` b")]);
        assert_eq!(MarkdownTranslator.translate_tag(&code), "``a ` b``");

        let code = TagNode::with_children("code", vec![Node::text("`x`")]);
        assert_eq!(MarkdownTranslator.translate_tag(&code), "`` `x` ``");
    }

    #[test]
    fn test_codeblock() {
        let codeblock = TagNode::with_params(
            "codeblock",
            vec![Node::text("\nprint(\"hi\")\n")],
            Params::from([("language", "gdscript")]),
        );
        assert_eq!(
            MarkdownTranslator.translate_tag(&codeblock),
            "```gdscript\nprint(\"hi\")\n```\n"
        );
    }

    #[test]
    fn test_closing_fence_ends_its_line() {
        let root = TagNode::with_children(
            "root",
            vec![
                Node::text("Example:\n"),
                TagNode::with_children("codeblock", vec![Node::text("print(1)")]).into(),
                Node::text("Then call it."),
            ],
        );
        assert_eq!(
            MarkdownTranslator.translate_tag(&root),
            "Example:\n```\nprint(1)\n```\nThen call it."
        );
    }

    #[test]
    fn test_codeblock_without_language() {
        let codeblock = TagNode::with_children("codeblock", hello());
        assert_eq!(
            MarkdownTranslator.translate_tag(&codeblock),
            "```\nHello, World!\n```"
        );
    }

    #[test]
    fn test_codeblock_containing_fence() {
        let codeblock = TagNode::with_children("codeblock", vec![Node::text("```\nx\n```")]);
        assert_eq!(
            MarkdownTranslator.translate_tag(&codeblock),
            "````\n```\nx\n```\n````"
        );
    }

    #[test]
    fn test_calculate_fence_length() {
        assert_eq!(calculate_fence_length("hello"), 3);
        assert_eq!(calculate_fence_length("hello `` world"), 3);
        assert_eq!(calculate_fence_length("```"), 4);
        assert_eq!(calculate_fence_length("`````"), 6);
    }

    #[test]
    fn test_link_and_reference() {
        let link = TagNode::with_params(
            "link",
            vec![Node::text("Godocs")],
            Params::from([("url", "https://github.com/godocs-godot/godocs")]),
        );
        assert_eq!(
            MarkdownTranslator.translate_tag(&link),
            "[Godocs](https://github.com/godocs-godot/godocs)"
        );

        let reference = TagNode::with_params(
            "reference",
            vec![],
            Params::from([("type", "method"), ("name", "Node.queue_free")]),
        );
        assert_eq!(MarkdownTranslator.translate_tag(&reference), "Node.queue_free");
    }

    #[test]
    fn test_keyboard_and_image() {
        let kbd = TagNode::with_children("keyboard", vec![Node::text("F1")]);
        assert_eq!(MarkdownTranslator.translate_tag(&kbd), "<kbd>F1</kbd>");

        let image = TagNode::with_children("image", vec![Node::text("icon.png")]);
        assert_eq!(MarkdownTranslator.translate_tag(&image), "![icon.png](icon.png)");
    }

    #[test]
    fn test_plain_styles_and_unknown() {
        for name in ["root", "paragraph", "underline", "color", "font", "alignment"] {
            let tag = TagNode::with_children(name, hello());
            assert_eq!(MarkdownTranslator.translate_tag(&tag), "Hello, World!", "{}", name);
        }

        let unknown = TagNode::with_children("wave", hello());
        assert_eq!(MarkdownTranslator.translate_tag(&unknown), "");
    }
}
