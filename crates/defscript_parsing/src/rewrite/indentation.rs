use crate::lexer::LexingError;
use crate::view::TokenView;
use defscript_tokens::token::{Token, TokenKind};
use indexmap::IndexSet;
use std::collections::VecDeque;
use tracing::trace;

/// Keywords that open a block without a following brace
pub const DEFAULT_INDENTERS: &[TokenKind] = &[
    TokenKind::Try,
    TokenKind::Finally,
    TokenKind::Else,
    TokenKind::Do,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Root,
    /// an indented block, by the width of its indentation
    Indent(usize),
    Brace,
}

/// Synthesizes `indent` and `dedent` tokens from the indentation after newlines.
///
/// Indentation only opens a block after an indenter keyword. Explicit braces
/// shield the levels outside of them, and closing a brace closes every
/// indented block opened within it.
#[derive(Debug)]
pub struct StructureIndentation<I> {
    view: TokenView<I>,
    indenters: IndexSet<TokenKind>,
    levels: Vec<Level>,
    pending: VecDeque<Token>,
    finished: bool,
}

impl<I> StructureIndentation<I>
where
    I: Iterator<Item = Result<Token, LexingError>>,
{
    pub fn new(view: TokenView<I>, indenters: IndexSet<TokenKind>) -> Self {
        Self {
            view,
            indenters,
            levels: vec![Level::Root],
            pending: VecDeque::new(),
            finished: false,
        }
    }

    fn dedent(&mut self) {
        let token = self.view.pseudo_token(TokenKind::Dedent, None);
        trace!("dedent at {}", token.range().start);
        self.pending.push_back(token);
    }

    fn close_brace(&mut self) {
        if !self.levels.contains(&Level::Brace) {
            return;
        }
        while let Some(Level::Indent(_)) = self.levels.last() {
            self.levels.pop();
            self.dedent();
        }
        self.levels.pop();
    }

    fn newline(&mut self, token: &Token) {
        let text = token.text();
        let width = text.len() - text.trim_end_matches([' ', '\t']).len();
        let after_indenter = self
            .view
            .look_back(1)
            .is_some_and(|kind| self.indenters.contains(&kind));
        if after_indenter {
            self.levels.push(Level::Indent(width));
            let token = self.view.pseudo_token(TokenKind::Indent, None);
            trace!("indent to {width} at {}", token.range().start);
            self.pending.push_back(token);
        } else {
            while let Some(&Level::Indent(level)) = self.levels.last() {
                if level <= width {
                    break;
                }
                self.levels.pop();
                self.dedent();
            }
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        while let Some(level) = self.levels.pop() {
            if let Level::Indent(_) = level {
                self.dedent();
            }
        }
    }
}

impl<I> Iterator for StructureIndentation<I>
where
    I: Iterator<Item = Result<Token, LexingError>>,
{
    type Item = Result<Token, LexingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.pop_front() {
            return Some(Ok(token));
        }
        if self.finished {
            return None;
        }
        let token = match self.view.next() {
            Some(Ok(token)) => token,
            Some(Err(e)) => {
                self.finished = true;
                return Some(Err(e));
            }
            None => {
                self.finish();
                return self.pending.pop_front().map(Ok);
            }
        };
        match token.kind() {
            TokenKind::LCurly => self.levels.push(Level::Brace),
            TokenKind::RCurly => self.close_brace(),
            TokenKind::Nl => self.newline(&token),
            _ => {}
        }
        self.pending.push_back(token);
        self.pending.pop_front().map(Ok)
    }
}
