//! The rewrite cascade layered over the lexer.
//!
//! Three stages run in sequence, each reading its predecessor through a
//! [TokenView]: [StripTrivia], [ElideNewlines] and [StructureIndentation]. Every
//! stage is a lazy iterator, and errors from the lexer pass through all of them
//! unchanged.

use crate::lexer::{Lexer, LexingError};
use crate::view::{TokenView, DEFAULT_WINDOW};
use defscript_common::collections::DropoutStack;
use defscript_tokens::source::SourceFile;
use defscript_tokens::token::{Token, TokenKind};
use indexmap::IndexSet;
use std::sync::Arc;
use tracing::debug;

mod elide_newlines;
mod indentation;
mod strip_trivia;

pub use elide_newlines::ElideNewlines;
pub use indentation::{StructureIndentation, DEFAULT_INDENTERS};
pub use strip_trivia::StripTrivia;

/// The fully rewritten token stream of a source file
pub type Rewritten = StructureIndentation<ElideNewlines<StripTrivia<Lexer>>>;

/// Settings shared by the stages of the cascade
#[derive(Debug, Clone)]
pub struct CascadeOptions {
    /// how many tokens each view, and the final history, remembers
    pub window: usize,
    /// keywords that open an indented block
    pub indenters: IndexSet<TokenKind>,
}

impl Default for CascadeOptions {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            indenters: DEFAULT_INDENTERS.iter().copied().collect(),
        }
    }
}

/// Adapters for building the cascade stage by stage
pub trait RewriteExt: Iterator<Item = Result<Token, LexingError>> + Sized {
    fn strip_trivia(self, source: &Arc<SourceFile>, window: usize) -> StripTrivia<Self> {
        StripTrivia::new(TokenView::new(source, self, window))
    }

    fn elide_newlines(self, source: &Arc<SourceFile>, window: usize) -> ElideNewlines<Self> {
        ElideNewlines::new(TokenView::new(source, self, window))
    }

    fn structure_indentation(
        self,
        source: &Arc<SourceFile>,
        window: usize,
        indenters: IndexSet<TokenKind>,
    ) -> StructureIndentation<Self> {
        StructureIndentation::new(TokenView::new(source, self, window), indenters)
    }
}

impl<I> RewriteExt for I where I: Iterator<Item = Result<Token, LexingError>> {}

/// Lexes `source` from `offset` without rewriting anything
pub fn tokenize_raw(source: &Arc<SourceFile>, offset: usize) -> Result<Lexer, LexingError> {
    Lexer::new(source, offset)
}

/// Lexes `source` from `offset` and runs the whole cascade over it
pub fn tokenize(
    source: &Arc<SourceFile>,
    offset: usize,
    options: &CascadeOptions,
) -> Result<Tokens, LexingError> {
    debug!(
        "tokenizing {} from {offset} with a window of {}",
        source.name(),
        options.window
    );
    let stream = tokenize_raw(source, offset)?
        .strip_trivia(source, options.window)
        .elide_newlines(source, options.window)
        .structure_indentation(source, options.window, options.indenters.clone());
    Ok(Tokens::new(stream, options.window))
}

/// A token stream that remembers the last tokens it emitted
#[derive(Debug)]
pub struct Tokens<I = Rewritten> {
    inner: I,
    history: DropoutStack<Token>,
}

impl<I> Tokens<I> {
    pub fn new(inner: I, window: usize) -> Self {
        Self {
            inner,
            history: DropoutStack::new(window),
        }
    }

    /// The most recently emitted tokens, newest first
    pub fn history(&self) -> impl Iterator<Item = &Token> {
        self.history.rewind()
    }
}

impl<I> Iterator for Tokens<I>
where
    I: Iterator<Item = Result<Token, LexingError>>,
{
    type Item = Result<Token, LexingError>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.inner.next()?;
        if let Ok(token) = &next {
            self.history.push(token.clone());
        }
        Some(next)
    }
}
