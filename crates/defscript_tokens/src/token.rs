//! A lexical token from a source file

use crate::source::SourceFile;
use crate::spanned::{Span, Spanned};
use std::fmt::{Debug, Formatter};
use std::ops::Range;
use std::sync::Arc;

/// A lexical token from a source file
#[derive(Clone)]
pub struct Token {
    span: Span,
    kind: TokenKind,
}

impl Token {
    /// Creates a new token
    pub fn new(span: Span, kind: TokenKind) -> Self {
        Self { span, kind }
    }

    /// Creates a zero-width pseudo token at a byte offset
    pub fn pseudo(source: &Arc<SourceFile>, kind: TokenKind, at: usize) -> Self {
        Self::new(Span::empty(source, at), kind)
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The `[start, end)` byte range of this token
    pub fn range(&self) -> Range<usize> {
        self.span.range()
    }

    /// The source text of this token
    pub fn text(&self) -> &str {
        self.span.text()
    }

    /// The source this token was lexed from
    pub fn source(&self) -> &Arc<SourceFile> {
        self.span.source()
    }

    /// Whether this token is trivia the grammar never sees
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?})", self.kind, self.text())
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.span == other.span
    }
}

/// The kind for this token.
///
/// The string form of a kind is the `type` the grammar parser receives. Kinds
/// that share their spelling with the source text (keywords, brackets,
/// punctuation) can be resolved from the matched text with [str::parse].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::Display,
)]
pub enum TokenKind {
    #[strum(serialize = "string")]
    String,
    #[strum(serialize = "comment")]
    Comment,
    #[strum(serialize = "ws")]
    Ws,
    /// one or more line breaks, along with the indentation that follows them
    #[strum(serialize = "nl")]
    Nl,

    #[strum(serialize = "for")]
    For,
    #[strum(serialize = "if")]
    If,
    #[strum(serialize = "else")]
    Else,
    #[strum(serialize = "def")]
    Def,
    /// `this` or `@`
    #[strum(serialize = "this")]
    This,
    #[strum(serialize = "in")]
    In,
    #[strum(serialize = "on")]
    On,
    #[strum(serialize = "do")]
    Do,
    #[strum(serialize = "return")]
    Return,
    #[strum(serialize = "while")]
    While,
    #[strum(serialize = "function")]
    Function,
    #[strum(serialize = "yield")]
    Yield,
    #[strum(serialize = "break")]
    Break,
    #[strum(serialize = "continue")]
    Continue,
    #[strum(serialize = "try")]
    Try,
    #[strum(serialize = "finally")]
    Finally,

    #[strum(serialize = "{")]
    LCurly,
    #[strum(serialize = "}")]
    RCurly,
    #[strum(serialize = "[")]
    LBracket,
    #[strum(serialize = "]")]
    RBracket,
    #[strum(serialize = "(")]
    LParen,
    #[strum(serialize = ")")]
    RParen,

    #[strum(serialize = "number")]
    Number,
    #[strum(serialize = "true")]
    True,
    #[strum(serialize = "false")]
    False,
    #[strum(serialize = "null")]
    Null,
    #[strum(serialize = "undefined")]
    Undefined,
    #[strum(serialize = "id")]
    Id,

    /// ->
    #[strum(serialize = "->")]
    ThinArrow,
    /// =>
    #[strum(serialize = "=>")]
    FatArrow,
    /// `==`, `!=`, `<=`, `>=`, `<`, `>`
    #[strum(serialize = "compare")]
    Compare,
    /// `+=`, `-=`, `*=`, `/=`, `^=`
    #[strum(serialize = "reassign")]
    Reassign,
    /// :=
    #[strum(serialize = ":=")]
    Define,
    /// =
    #[strum(serialize = "=")]
    Assign,
    #[strum(serialize = ",")]
    Comma,
    #[strum(serialize = ".")]
    Dot,
    #[strum(serialize = ":")]
    Colon,
    /// a cascade step marker, `~*` followed by any number of `~`.
    ///
    /// Every marker has the type `cascade`; the step's degree is only kept in
    /// the token text (`~*` is degree 1, `~*~` degree 2, ...).
    #[strum(serialize = "cascade")]
    Cascade,
    /// `+`, `-`
    #[strum(serialize = "linear")]
    Linear,
    /// `*`, `/`, `//`, `%`
    #[strum(serialize = "scalar")]
    Scalar,
    /// ^
    #[strum(serialize = "pow")]
    Pow,

    /// synthesized at the start of an indented block
    #[strum(serialize = "indent")]
    Indent,
    /// synthesized at the end of an indented block
    #[strum(serialize = "dedent")]
    Dedent,
}

impl TokenKind {
    /// Whitespace and comments
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Ws | TokenKind::Comment)
    }

    /// Tokens synthesized by the rewrite cascade rather than lexed
    pub fn is_pseudo(&self) -> bool {
        matches!(self, TokenKind::Indent | TokenKind::Dedent)
    }

    /// The closing bracket matching this opening bracket
    pub fn closing(&self) -> Option<TokenKind> {
        match self {
            TokenKind::LCurly => Some(TokenKind::RCurly),
            TokenKind::LBracket => Some(TokenKind::RBracket),
            TokenKind::LParen => Some(TokenKind::RParen),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_from_text() {
        assert_eq!(TokenKind::from_str("else"), Ok(TokenKind::Else));
        assert_eq!(TokenKind::from_str("{"), Ok(TokenKind::LCurly));
        assert_eq!(TokenKind::from_str(":="), Ok(TokenKind::Define));
        assert!(TokenKind::from_str("elsewhere").is_err());
    }

    #[test]
    fn test_kind_type_string() {
        assert_eq!(TokenKind::Indent.as_ref(), "indent");
        assert_eq!(TokenKind::Assign.to_string(), "=");
        assert_eq!(<&'static str>::from(TokenKind::Id), "id");
    }

    #[test]
    fn test_pseudo_token_is_zero_width() {
        let source = SourceFile::anonymous("do\n  a");
        let token = Token::pseudo(&source, TokenKind::Indent, 2);
        assert_eq!(token.range(), 2..2);
        assert_eq!(token.text(), "");
        assert!(token.kind().is_pseudo());
    }
}
