//! Markup translation pipeline
//!
//! Couples an [`Interpreter`] with a [`SyntaxTranslator`]: text is
//! interpreted into an AST which is then rendered in the target syntax.

use std::fmt;
use std::str::FromStr;

use bbcode_parser::{
    BbcodeInterpreter, Interpreter, InterpreterOptions, SyntaxTranslator, TagNode, unhandled_tags,
};
use serde::{Deserialize, Serialize};

use crate::markdown::MarkdownTranslator;
use crate::rst::RstTranslator;

/// Errors that can occur during translation
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Unhandled tags: {}", tags.join(", "))]
    UnhandledTags { tags: Vec<String> },

    #[error("Failed to translate class {class}: {source}")]
    Class {
        class: String,
        source: Box<TranslateError>,
    },

    #[error("Unknown syntax: {0} (expected rst or markdown)")]
    UnknownSyntax(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Target syntax of a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
    #[default]
    Rst,
    #[serde(alias = "md")]
    Markdown,
}

impl Syntax {
    pub fn as_str(&self) -> &'static str {
        match self {
            Syntax::Rst => "rst",
            Syntax::Markdown => "markdown",
        }
    }

    /// File extension for documents in this syntax
    pub fn extension(&self) -> &'static str {
        match self {
            Syntax::Rst => "rst",
            Syntax::Markdown => "md",
        }
    }

    /// Create the translator for this syntax
    pub fn translator(&self) -> Box<dyn SyntaxTranslator + Send + Sync> {
        match self {
            Syntax::Rst => Box::new(RstTranslator),
            Syntax::Markdown => Box::new(MarkdownTranslator),
        }
    }
}

impl FromStr for Syntax {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rst" | "restructuredtext" => Ok(Syntax::Rst),
            "md" | "markdown" => Ok(Syntax::Markdown),
            _ => Err(TranslateError::UnknownSyntax(s.to_string())),
        }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a [`Pipeline`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Fail on tags the translator would drop instead of dropping them
    pub strict: bool,
}

/// Interpreter and translator used together
pub struct Pipeline<I = BbcodeInterpreter, T = Box<dyn SyntaxTranslator + Send + Sync>> {
    interpreter: I,
    translator: T,
    options: PipelineOptions,
}

impl Pipeline {
    /// Pipeline with the markup interpreter and the translator of `syntax`
    pub fn for_syntax(
        syntax: Syntax,
        interpreter_options: InterpreterOptions,
        options: PipelineOptions,
    ) -> Self {
        Pipeline::new(
            BbcodeInterpreter::with_options(interpreter_options),
            syntax.translator(),
            options,
        )
    }
}

impl<I: Interpreter, T: SyntaxTranslator> Pipeline<I, T> {
    pub fn new(interpreter: I, translator: T, options: PipelineOptions) -> Self {
        Self {
            interpreter,
            translator,
            options,
        }
    }

    pub fn interpreter(&self) -> &I {
        &self.interpreter
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Interpret `text` without translating it
    pub fn interpret(&self, text: &str) -> TagNode {
        self.interpreter.interpret(text)
    }

    /// Interpret and translate `text`
    ///
    /// In strict mode, text containing tags the translator does not handle
    /// fails with [`TranslateError::UnhandledTags`].
    pub fn translate(&self, text: &str) -> Result<String> {
        let root = self.interpreter.interpret(text);

        let unhandled = unhandled_tags(&root, &self.translator);
        if !unhandled.is_empty() {
            if self.options.strict {
                return Err(TranslateError::UnhandledTags { tags: unhandled });
            }
            tracing::debug!(tags = ?unhandled, "dropping unhandled tags");
        }

        Ok(self.translator.translate_tag(&root))
    }
}

impl<I: fmt::Debug, T> fmt::Debug for Pipeline<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("interpreter", &self.interpreter)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Interpret `text` and render it with `translator`
///
/// Tags the translator does not handle are dropped.
pub fn translate_markup<I, T>(text: &str, interpreter: &I, translator: &T) -> String
where
    I: Interpreter + ?Sized,
    T: SyntaxTranslator + ?Sized,
{
    translator.translate_tag(&interpreter.interpret(text))
}
