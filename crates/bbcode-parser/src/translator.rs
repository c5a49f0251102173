//! Syntax translator interface
//!
//! A translator renders an AST into a target syntax (reStructuredText,
//! Markdown, ...). Nodes dispatch on their own kind via [`Node::translate`];
//! translators decide how each tag kind is rendered.

use crate::ast::{Node, TagKind, TagNode, TextNode};

/// Renders AST nodes into a target syntax
pub trait SyntaxTranslator {
    /// Render a text leaf
    fn translate_text(&self, node: &TextNode) -> String;

    /// Render a tag, usually from the concatenated translation of its children
    ///
    /// Tags the translator does not know render as an empty string.
    fn translate_tag(&self, node: &TagNode) -> String;

    /// Render any node
    fn translate(&self, node: &Node) -> String {
        node.translate(self)
    }

    /// Render the children of a tag in order and concatenate them
    fn translate_children(&self, node: &TagNode) -> String {
        node.children
            .iter()
            .map(|child| child.translate(self))
            .collect()
    }

    /// Whether this translator renders the given tag kind
    ///
    /// Kinds for which this returns `false` are silently dropped by
    /// `translate_tag`.
    fn handles(&self, kind: &TagKind) -> bool {
        !kind.is_unknown()
    }
}

impl<T: SyntaxTranslator + ?Sized> SyntaxTranslator for &T {
    fn translate_text(&self, node: &TextNode) -> String {
        (**self).translate_text(node)
    }

    fn translate_tag(&self, node: &TagNode) -> String {
        (**self).translate_tag(node)
    }

    fn handles(&self, kind: &TagKind) -> bool {
        (**self).handles(kind)
    }
}

impl<T: SyntaxTranslator + ?Sized> SyntaxTranslator for Box<T> {
    fn translate_text(&self, node: &TextNode) -> String {
        (**self).translate_text(node)
    }

    fn translate_tag(&self, node: &TagNode) -> String {
        (**self).translate_tag(node)
    }

    fn handles(&self, kind: &TagKind) -> bool {
        (**self).handles(kind)
    }
}

/// List the tag names in a tree that `translator` would drop
///
/// Names are returned once each, in the order they are first seen.
pub fn unhandled_tags<T: SyntaxTranslator + ?Sized>(root: &TagNode, translator: &T) -> Vec<String> {
    let mut names = Vec::new();
    collect_unhandled(root, translator, &mut names);
    names
}

fn collect_unhandled<T: SyntaxTranslator + ?Sized>(
    tag: &TagNode,
    translator: &T,
    names: &mut Vec<String>,
) {
    if !translator.handles(&tag.kind()) && !names.contains(&tag.name) {
        names.push(tag.name.clone());
    }
    for child in &tag.children {
        if let Node::Tag(child) = child {
            collect_unhandled(child, translator, names);
        }
    }
}
