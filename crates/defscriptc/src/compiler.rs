//! Responsible with compiling defscript sources into estree programs

use crate::emitter::Emitter;
use defscript_ast::{source, target};
use defscript_parsing::lexer::{Lexer, LexingError};
use defscript_parsing::parser::{self, GrammarParser, SyntaxError};
use defscript_parsing::rewrite::{self, CascadeOptions, Tokens, DEFAULT_INDENTERS};
use defscript_parsing::transforms::{TransformEngine, Vocabulary};
use defscript_parsing::view::DEFAULT_WINDOW;
use defscript_tokens::source::SourceFile;
use defscript_tokens::token::{Token, TokenKind};
use indexmap::IndexSet;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

pub mod error;

pub use error::{DefScriptCError, DefScriptCErrorKind, DefScriptCResult};

/// Responsible with compiling defscript sources.
///
/// Must be configured using a [DefScriptCBuilder].
#[derive(Debug)]
pub struct DefScriptC {
    options: CascadeOptions,
    engine: TransformEngine,
}

impl DefScriptC {
    /// Creates the default DefScriptCBuilder
    #[inline]
    pub fn builder() -> DefScriptCBuilder {
        DefScriptCBuilder::new()
    }

    /// Reads a source file from disk
    pub fn read_source(path: impl AsRef<Path>) -> DefScriptCResult<Arc<SourceFile>> {
        let path = path.as_ref();
        debug!("reading {path:?}");
        let text = std::fs::read_to_string(path)?;
        Ok(SourceFile::new(path.to_string_lossy(), text))
    }

    /// The number of tokens each stage of the cascade remembers
    pub fn lookback(&self) -> usize {
        self.options.window
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.engine.vocabulary()
    }

    /// Lexes a source from `offset`, without rewriting the token stream
    pub fn tokenize_raw(&self, source: &Arc<SourceFile>, offset: usize) -> DefScriptCResult<Lexer> {
        rewrite::tokenize_raw(source, offset).map_err(|e| lexing_error(source, e))
    }

    /// Lexes a source from `offset` and rewrites the token stream
    pub fn tokenize(&self, source: &Arc<SourceFile>, offset: usize) -> DefScriptCResult<Tokens> {
        rewrite::tokenize(source, offset, &self.options).map_err(|e| lexing_error(source, e))
    }

    /// Drains a token stream, locating the first lexing error in the source
    pub fn collect_tokens(
        source: &Arc<SourceFile>,
        tokens: impl IntoIterator<Item = Result<Token, LexingError>>,
    ) -> DefScriptCResult<Vec<Token>> {
        tokens
            .into_iter()
            .map(|token| token.map_err(|e| lexing_error(source, e)))
            .collect()
    }

    /// Parses a source with the given grammar
    pub fn parse<P: GrammarParser>(
        &self,
        source: &Arc<SourceFile>,
        parser: P,
    ) -> DefScriptCResult<source::Program> {
        let tokens = self.tokenize(source, 0)?;
        Ok(parser::parse(source, tokens, parser)?)
    }

    /// Parses a source and lowers it into the target vocabulary
    pub fn compile_ast<P: GrammarParser>(
        &mut self,
        source: &Arc<SourceFile>,
        parser: P,
    ) -> DefScriptCResult<target::Program> {
        let program = self.parse(source, parser)?;
        info!("lowering {}", source.name());
        Ok(self.engine.transform(program)?)
    }

    /// Compiles a source into text
    pub fn compile<P: GrammarParser, E: Emitter>(
        &mut self,
        source: &Arc<SourceFile>,
        parser: P,
        emitter: &mut E,
    ) -> DefScriptCResult<String> {
        let program = self.compile_ast(source, parser)?;
        info!("emitting {}", source.name());
        emitter
            .emit(&program)
            .map_err(|e| DefScriptCError::new(DefScriptCErrorKind::Emit(Box::new(e)), None, None))
    }
}

fn lexing_error(source: &Arc<SourceFile>, error: LexingError) -> DefScriptCError {
    SyntaxError::lexing(source, error).into()
}

/// Builder for creating a [DefScriptC] instance.
#[derive(Debug)]
pub struct DefScriptCBuilder {
    /// Number of tokens each stage of the cascade remembers
    pub lookback: usize,
    /// The node kinds the lowered program may use
    pub vocabulary: Vocabulary,
    /// Keywords that open an indented block
    pub indenters: IndexSet<TokenKind>,
}

impl DefScriptCBuilder {
    /// Creates a DefScriptCBuilder with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback;
        self
    }

    pub fn vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn indenters(mut self, indenters: impl IntoIterator<Item = TokenKind>) -> Self {
        self.indenters = indenters.into_iter().collect();
        self
    }

    /// Builds a [DefScriptC] instance from this builder
    pub fn build(self) -> Result<DefScriptC, BuildDefScriptCError> {
        if self.lookback == 0 {
            return Err(BuildDefScriptCError::ZeroWindow);
        }
        if !self.vocabulary.contains("Program") {
            return Err(BuildDefScriptCError::NoProgramNode);
        }
        if let Some(kind) = self.indenters.iter().find(|kind| kind.is_pseudo()) {
            return Err(BuildDefScriptCError::PseudoIndenter(*kind));
        }
        debug!(
            "building defscriptc with a lookback of {} and indenters {:?}",
            self.lookback, self.indenters
        );
        Ok(DefScriptC {
            options: CascadeOptions {
                window: self.lookback,
                indenters: self.indenters,
            },
            engine: TransformEngine::new(self.vocabulary),
        })
    }
}

impl Default for DefScriptCBuilder {
    fn default() -> Self {
        Self {
            lookback: DEFAULT_WINDOW,
            vocabulary: Vocabulary::default(),
            indenters: DEFAULT_INDENTERS.iter().copied().collect(),
        }
    }
}

/// An error occurred while building a [DefScriptC] instance
#[derive(Debug, Error)]
pub enum BuildDefScriptCError {
    #[error("Tokenizing can't occur with a lookback window of zero tokens")]
    ZeroWindow,
    #[error("The target vocabulary has no Program node")]
    NoProgramNode,
    #[error("{0} is produced by the cascade and can't open a block")]
    PseudoIndenter(TokenKind),
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_default_builder() {
        let compiler = DefScriptC::builder().build().expect("could not build defscriptc");
        assert_eq!(compiler.lookback(), 10);
        assert!(compiler.vocabulary().contains("ArrowFunctionExpression"));
    }

    #[test]
    fn test_zero_window() {
        let error = DefScriptC::builder().lookback(0).build().unwrap_err();
        assert!(matches!(error, BuildDefScriptCError::ZeroWindow));
    }

    #[test]
    fn test_vocabulary_needs_program() {
        let error = DefScriptC::builder()
            .vocabulary(Vocabulary::estree().without("Program"))
            .build()
            .unwrap_err();
        assert!(matches!(error, BuildDefScriptCError::NoProgramNode));
    }

    #[test]
    fn test_pseudo_token_indenter() {
        let error = DefScriptC::builder()
            .indenters([TokenKind::Do, TokenKind::Indent])
            .build()
            .unwrap_err();
        assert!(matches!(
            error,
            BuildDefScriptCError::PseudoIndenter(TokenKind::Indent)
        ));
    }

    #[test]
    fn test_lexing_error_is_located() {
        let compiler = DefScriptC::builder().build().unwrap();
        let source = SourceFile::anonymous("a\n  $");
        let tokens = compiler.tokenize(&source, 0).unwrap();
        let error = DefScriptC::collect_tokens(&source, tokens).unwrap_err();
        assert!(matches!(error.kind(), DefScriptCErrorKind::Syntax(_)));
    }

    #[test]
    fn test_tokenize_from_offset() {
        let compiler = DefScriptC::builder().build().unwrap();
        let source = SourceFile::anonymous("ignored\nkept");
        let tokens =
            DefScriptC::collect_tokens(&source, compiler.tokenize_raw(&source, 8).unwrap())
                .unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text(), "kept");
    }
}
