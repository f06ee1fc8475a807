//! A windowed view over a token stream.
//!
//! Each rewrite stage reads its predecessor through a [TokenView], which keeps
//! a bounded history of the tokens it handed out and buffers however many
//! tokens ahead the stage asked to see.

use crate::lexer::LexingError;
use defscript_common::collections::{CachedQueue, DropoutStack};
use defscript_tokens::source::SourceFile;
use defscript_tokens::token::{Token, TokenKind};
use std::sync::Arc;

/// The default number of tokens a view remembers
pub const DEFAULT_WINDOW: usize = 10;
/// Views always remember the current token and the one before it
pub const MIN_WINDOW: usize = 2;

/// A view over a fallible token stream
#[derive(Debug)]
pub struct TokenView<I> {
    inner: I,
    source: Arc<SourceFile>,
    lookback: DropoutStack<Token>,
    lookahead: CachedQueue<Token>,
    error: Option<LexingError>,
    exhausted: bool,
}

impl<I> TokenView<I>
where
    I: Iterator<Item = Result<Token, LexingError>>,
{
    /// Creates a view remembering at most `window` tokens, but never fewer than
    /// [MIN_WINDOW]
    pub fn new(source: &Arc<SourceFile>, inner: I, window: usize) -> Self {
        Self {
            inner,
            source: source.clone(),
            lookback: DropoutStack::new(window.max(MIN_WINDOW)),
            lookahead: CachedQueue::new(),
            error: None,
            exhausted: false,
        }
    }

    /// Pulls the next token, recording it into the history.
    ///
    /// An error from the underlying stream is returned once, after which the view
    /// is exhausted.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Result<Token, LexingError>> {
        if let Some(token) = self.lookahead.dequeue() {
            self.lookback.push(token.clone());
            return Some(Ok(token));
        }
        if let Some(error) = self.error.take() {
            return Some(Err(error));
        }
        if self.exhausted {
            return None;
        }
        match self.inner.next() {
            Some(Ok(token)) => {
                self.lookback.push(token.clone());
                Some(Ok(token))
            }
            Some(Err(error)) => {
                self.exhausted = true;
                Some(Err(error))
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }

    /// The kind of the `n`-th most recently pulled token, where `0` is the token the
    /// last [next](Self::next) returned.
    ///
    /// `None` if fewer tokens were pulled or the token fell out of the window.
    pub fn look_back(&self, n: usize) -> Option<TokenKind> {
        self.lookback.peek(n).map(Token::kind)
    }

    /// The kind of the `n`-th token not pulled yet, where `0` is the token the next
    /// call to [next](Self::next) returns.
    ///
    /// Buffers from the underlying stream as needed. `None` past the end of the
    /// stream or at an error, which stays queued for [next](Self::next).
    pub fn look_ahead(&mut self, n: usize) -> Option<TokenKind> {
        while self.lookahead.len() <= n && !self.exhausted {
            match self.inner.next() {
                Some(Ok(token)) => self.lookahead.enqueue(token),
                Some(Err(error)) => {
                    self.error = Some(error);
                    self.exhausted = true;
                }
                None => self.exhausted = true,
            }
        }
        self.lookahead.peek(n).map(Token::kind)
    }

    /// Whether the underlying stream has ended
    pub fn is_exhausted(&self) -> bool {
        self.exhausted && self.lookahead.is_empty()
    }

    /// Creates a zero-width token at `at`.
    ///
    /// Without an explicit position, the token sits at the end of the token before
    /// the current one, or at the end of the current token once the stream is
    /// exhausted.
    pub fn pseudo_token(&self, kind: TokenKind, at: impl Into<Option<usize>>) -> Token {
        let at = at.into().unwrap_or_else(|| self.last_position());
        Token::pseudo(&self.source, kind, at)
    }

    fn last_position(&self) -> usize {
        let depth = if self.is_exhausted() { 0 } else { 1 };
        self.lookback
            .peek(depth)
            .or_else(|| self.lookback.peek(0))
            .map(|token| token.range().end)
            .unwrap_or(0)
    }

    /// The source tokens of this view point into
    pub fn source(&self) -> &Arc<SourceFile> {
        &self.source
    }

    /// The number of tokens this view remembers
    pub fn window(&self) -> usize {
        self.lookback.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use test_log::test;

    fn view(src: &str, window: usize) -> TokenView<Lexer> {
        let source = SourceFile::anonymous(src);
        let lexer = Lexer::new(&source, 0).unwrap();
        TokenView::new(&source, lexer, window)
    }

    #[test]
    fn test_look_back() {
        let mut view = view("a=b", DEFAULT_WINDOW);
        assert_eq!(view.look_back(0), None);
        view.next();
        view.next();
        assert_eq!(view.look_back(0), Some(TokenKind::Assign));
        assert_eq!(view.look_back(1), Some(TokenKind::Id));
        assert_eq!(view.look_back(2), None);
    }

    #[test]
    fn test_look_back_is_bounded() {
        let mut view = view("a=b", 2);
        view.next();
        view.next();
        view.next();
        assert_eq!(view.look_back(1), Some(TokenKind::Assign));
        assert_eq!(view.look_back(2), None);
    }

    #[test]
    fn test_window_has_a_minimum() {
        assert_eq!(view("a", 0).window(), MIN_WINDOW);
        assert_eq!(view("a", 7).window(), 7);
    }

    #[test]
    fn test_look_ahead_is_memoized() {
        let mut view = view("a=b", DEFAULT_WINDOW);
        assert_eq!(view.look_ahead(1), Some(TokenKind::Assign));
        assert_eq!(view.look_ahead(1), Some(TokenKind::Assign));
        assert_eq!(view.look_ahead(0), Some(TokenKind::Id));
        assert_eq!(view.look_ahead(3), None);
        let pulled = std::iter::from_fn(|| view.next())
            .map(|token| token.unwrap().kind())
            .collect::<Vec<_>>();
        assert_eq!(pulled, [TokenKind::Id, TokenKind::Assign, TokenKind::Id]);
    }

    #[test]
    fn test_error_waits_behind_lookahead() {
        let mut view = view("a $", DEFAULT_WINDOW);
        assert_eq!(view.look_ahead(2), None);
        assert!(matches!(view.next(), Some(Ok(_))));
        assert!(matches!(view.next(), Some(Ok(_))));
        assert!(matches!(view.next(), Some(Err(LexingError::NoRuleMatched { .. }))));
        assert!(view.next().is_none());
    }

    #[test]
    fn test_pseudo_token_position() {
        let mut view = view("ab cd", DEFAULT_WINDOW);
        assert_eq!(view.pseudo_token(TokenKind::Indent, None).range(), 0..0);
        view.next();
        view.next();
        assert_eq!(view.pseudo_token(TokenKind::Indent, None).range(), 2..2);
        assert_eq!(view.pseudo_token(TokenKind::Dedent, 4).range(), 4..4);
        view.next();
        view.next();
        assert!(view.is_exhausted());
        assert_eq!(view.pseudo_token(TokenKind::Dedent, None).range(), 5..5);
    }
}
