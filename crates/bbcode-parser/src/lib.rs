//! bbcode-parser: Interpreter for Godot documentation markup
//!
//! This crate provides:
//! - Element scanner for `[tag options]content[/tag]` markup
//! - Interpreter that builds an AST of text and tag nodes
//! - The `SyntaxTranslator` trait used to render that AST
//!
//! # Example
//!
//! ```
//! use bbcode_parser::{BbcodeInterpreter, Interpreter};
//!
//! let root = BbcodeInterpreter::new().interpret("Start [b]Bold[/b] End");
//! assert_eq!(root.name, "root");
//! assert_eq!(root.children.len(), 3);
//! ```

pub mod ast;
pub mod interpreter;
pub mod scanner;
pub mod translator;

// Re-export main types for convenient access
pub use ast::{Node, Params, ReferenceKind, TagKind, TagNode, TextNode};
pub use interpreter::{
    BbcodeInterpreter, Interpreter, InterpreterOptions, TagOptions, parse_options,
};
pub use scanner::{Element, Scanner, Span};
pub use translator::{SyntaxTranslator, unhandled_tags};
