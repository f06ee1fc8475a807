use crate::lexer::LexingError;
use crate::view::TokenView;
use defscript_tokens::token::{Token, TokenKind};
use tracing::trace;

/// Newlines directly after these never end a statement
const SUPPRESS_AFTER: &[TokenKind] = &[TokenKind::LBracket, TokenKind::LCurly, TokenKind::Comma];
/// Newlines directly before these never end a statement
const SUPPRESS_BEFORE: &[TokenKind] = &[
    TokenKind::Nl,
    TokenKind::RBracket,
    TokenKind::RCurly,
    TokenKind::Comma,
];

/// Drops every newline that cannot end a statement.
///
/// Tracks the open brackets so that newlines inside parentheses are dropped
/// as well.
#[derive(Debug)]
pub struct ElideNewlines<I> {
    view: TokenView<I>,
    open: Vec<TokenKind>,
}

impl<I> ElideNewlines<I>
where
    I: Iterator<Item = Result<Token, LexingError>>,
{
    pub fn new(view: TokenView<I>) -> Self {
        Self { view, open: vec![] }
    }

    fn elide(&mut self) -> bool {
        let back = self.view.look_back(1);
        let ahead = self.view.look_ahead(0);
        match (back, ahead) {
            (Some(back), Some(ahead)) => {
                SUPPRESS_AFTER.contains(&back)
                    || SUPPRESS_BEFORE.contains(&ahead)
                    || self.open.last() == Some(&TokenKind::LParen)
            }
            _ => true,
        }
    }
}

impl<I> Iterator for ElideNewlines<I>
where
    I: Iterator<Item = Result<Token, LexingError>>,
{
    type Item = Result<Token, LexingError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let token = match self.view.next()? {
                Ok(token) => token,
                Err(e) => return Some(Err(e)),
            };
            match token.kind() {
                kind @ (TokenKind::LCurly | TokenKind::LBracket | TokenKind::LParen) => {
                    self.open.push(kind)
                }
                kind @ (TokenKind::RCurly | TokenKind::RBracket | TokenKind::RParen) => {
                    if self.open.last().and_then(TokenKind::closing) == Some(kind) {
                        self.open.pop();
                    }
                }
                TokenKind::Nl if self.elide() => {
                    trace!("eliding newline at {:?}", token.range());
                    continue;
                }
                _ => {}
            }
            return Some(Ok(token));
        }
    }
}
