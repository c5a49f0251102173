//! godocs-core: Core library for translating Godot documentation markup
//!
//! This crate provides:
//! - reStructuredText and Markdown syntax translators
//! - A pipeline combining the markup interpreter with a translator
//! - Class documentation records and parallel batch translation

pub mod classes;
pub mod markdown;
pub mod rst;
pub mod translate;

pub use bbcode_parser::{
    BbcodeInterpreter, Interpreter, InterpreterOptions, Node, Params, SyntaxTranslator, TagKind,
    TagNode, TextNode, unhandled_tags,
};
pub use classes::{
    ClassDoc, Constant, DocContext, Enum, Method, Property, Signal, ThemeItem, translate_class,
    translate_context,
};
pub use markdown::MarkdownTranslator;
pub use rst::RstTranslator;
pub use translate::{
    Pipeline, PipelineOptions, Result, Syntax, TranslateError, translate_markup,
};
