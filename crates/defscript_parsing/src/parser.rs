//! The push protocol of the grammar parser.
//!
//! The grammar itself lives outside of this crate. [parse] drives any
//! [GrammarParser] with a rewritten token stream, attaching a line/column
//! location to every token on the way in.

use crate::lexer::LexingError;
use defscript_ast::source::Program;
use defscript_ast::{Position, SourceLocation};
use defscript_tokens::source::SourceFile;
use defscript_tokens::spanned::{Span, Spanned};
use defscript_tokens::token::{Token, TokenKind};
use defscript_tokens::SpannedError;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tracing::{debug, trace};

/// A token along with the line/column location of its range
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedToken {
    pub token: Token,
    pub loc: SourceLocation,
}

impl LocatedToken {
    pub fn new(token: Token) -> Self {
        let loc = location_of(&token.span());
        Self { token, loc }
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind()
    }

    /// The `type` of this token as the grammar knows it
    pub fn type_name(&self) -> &'static str {
        self.token.kind().into()
    }

    pub fn text(&self) -> &str {
        self.token.text()
    }
}

/// Maps a span onto its line/column location
pub fn location_of(span: &Span) -> SourceLocation {
    let source = span.source();
    let (start_line, start_col) = source.line_col(span.range().start);
    let (end_line, end_col) = source.line_col(span.range().end);
    SourceLocation::new(
        Position::new(start_line, start_col),
        Position::new(end_line, end_col),
    )
}

/// A grammar parser fed one token at a time
pub trait GrammarParser {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Feeds the next token
    fn push(&mut self, token: LocatedToken) -> Result<(), Self::Error>;

    /// Signals the end of input, producing the parsed program
    fn finish(self) -> Result<Program, Self::Error>;
}

/// Parses a token stream of `source` with a grammar parser
pub fn parse<P, I>(source: &Arc<SourceFile>, tokens: I, mut parser: P) -> SyntaxResult<Program>
where
    P: GrammarParser,
    I: IntoIterator<Item = Result<Token, LexingError>>,
{
    debug!("parsing {}", source.name());
    let mut pushed = 0usize;
    let mut last = None;
    for token in tokens {
        let token = token.map_err(|e| SyntaxError::lexing(source, e))?;
        let span = token.span();
        let located = LocatedToken::new(token);
        trace!("pushing {} at {}", located.type_name(), located.loc);
        parser.push(located).map_err(|e| {
            SyntaxError::new(SyntaxErrorKind::Grammar(Box::new(e)), span.clone(), None)
        })?;
        last = Some(span);
        pushed += 1;
    }
    debug!("pushed {pushed} tokens, finishing");
    // errors at the end of input point at the last token the grammar saw
    let end = last.unwrap_or_else(|| Span::empty(source, source.len()));
    parser
        .finish()
        .map_err(|e| SyntaxError::new(SyntaxErrorKind::Grammar(Box::new(e)), end, None))
}

/// Represents an error occurring during parsing
#[derive(Debug, thiserror::Error)]
pub struct SyntaxError {
    pub kind: SpannedError<SyntaxErrorKind, SyntaxError>,
}

impl SyntaxError {
    /// Creates a new error
    pub fn new(
        kind: SyntaxErrorKind,
        location: impl Into<Option<Span>>,
        cause: impl Into<Option<Self>>,
    ) -> Self {
        Self {
            kind: SpannedError::new(kind, location, cause),
        }
    }

    /// Creates an error from a lexing error, located at the offending character
    pub fn lexing(source: &Arc<SourceFile>, error: LexingError) -> Self {
        let location = error.offset().map(|offset| {
            let len = source
                .text()
                .get(offset..)
                .and_then(|rest| rest.chars().next())
                .map_or(0, char::len_utf8);
            Span::new(source, offset.min(source.len()), len)
        });
        Self::new(SyntaxErrorKind::Lex(error), location, None)
    }

    pub fn error(&self) -> &SyntaxErrorKind {
        self.kind.error()
    }

    pub fn location(&self) -> Option<&Span> {
        self.kind.location()
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "syntax error: {}", self.kind)
    }
}

impl<E> From<E> for SyntaxError
where
    E: Into<SyntaxErrorKind>,
{
    fn from(value: E) -> Self {
        Self::new(value.into(), None, None)
    }
}

/// [SyntaxError] kind
#[derive(Debug, thiserror::Error)]
pub enum SyntaxErrorKind {
    #[error(transparent)]
    Lex(#[from] LexingError),
    #[error("{0}")]
    Grammar(Box<dyn std::error::Error + Send + Sync>),
}

pub type SyntaxResult<T = ()> = Result<T, SyntaxError>;
