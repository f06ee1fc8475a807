//! Turns source text into a lazy stream of raw tokens

use defscript_tokens::source::SourceFile;
use defscript_tokens::spanned::Span;
use defscript_tokens::token::Token;
use std::sync::Arc;
use thiserror::Error;
use tracing::trace;

mod rules;
mod string_scanner;

pub use rules::{Rule, RuleTable};
pub use string_scanner::{scan_string, Scan};

/// Lexes a [SourceFile] into tokens, trying the rules of a [RuleTable] in order at
/// every offset.
///
/// Every byte of the source ends up in exactly one token, trivia included. The
/// first error ends the stream.
#[derive(Debug)]
pub struct Lexer {
    source: Arc<SourceFile>,
    rules: Arc<RuleTable>,
    offset: usize,
    done: bool,
}

impl Lexer {
    /// Creates a new lexer over the defscript rule table, starting at `offset`
    pub fn new(source: &Arc<SourceFile>, offset: usize) -> Result<Self, LexingError> {
        Ok(Self::with_rules(source, RuleTable::shared()?, offset))
    }

    /// Creates a new lexer with a custom rule table
    pub fn with_rules(source: &Arc<SourceFile>, rules: Arc<RuleTable>, offset: usize) -> Self {
        Self {
            source: source.clone(),
            rules,
            offset,
            done: false,
        }
    }

    /// The source being lexed
    pub fn source(&self) -> &Arc<SourceFile> {
        &self.source
    }

    /// The offset of the next token
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn next_token(&mut self) -> LexResult<Option<Token>> {
        let text = self.source.text();
        if self.offset >= text.len() {
            return Ok(None);
        }
        let offset = self.offset;
        let rest = text
            .get(offset..)
            .ok_or(LexingError::NoRuleMatched { offset })?;

        for rule in self.rules.iter() {
            match rule.scan(rest) {
                Scan::NoMatch => continue,
                Scan::Unterminated => return Err(LexingError::UnterminatedString { offset }),
                Scan::Matched(len) => {
                    let matched = &rest[..len];
                    let kind = rule.kind_of(matched).ok_or_else(|| LexingError::UntypedMatch {
                        text: matched.to_string(),
                        offset,
                    })?;
                    let token = Token::new(Span::new(&self.source, offset, len), kind);
                    trace!("rule {:?} matched {token:?} at {offset}", rule.name());
                    self.offset += len;
                    return Ok(Some(token));
                }
            }
        }
        Err(LexingError::NoRuleMatched { offset })
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

type LexResult<T> = Result<T, LexingError>;

#[derive(Debug, Clone, Error)]
pub enum LexingError {
    #[error("no lexer rule matches at offset {offset}")]
    NoRuleMatched { offset: usize },
    #[error("string starting at offset {offset} is never closed")]
    UnterminatedString { offset: usize },
    #[error("{text:?} at offset {offset} matched a rule with no kind, and is not a kind itself")]
    UntypedMatch { text: String, offset: usize },
    #[error(transparent)]
    InvalidRule(#[from] regex::Error),
}

impl LexingError {
    /// The offset the error occurred at, if it came from lexing
    pub fn offset(&self) -> Option<usize> {
        match self {
            LexingError::NoRuleMatched { offset }
            | LexingError::UnterminatedString { offset }
            | LexingError::UntypedMatch { offset, .. } => Some(*offset),
            LexingError::InvalidRule(_) => None,
        }
    }
}
