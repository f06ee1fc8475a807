use crate::lexer::LexingError;
use crate::view::TokenView;
use defscript_tokens::token::Token;

/// Drops whitespace and comments
#[derive(Debug)]
pub struct StripTrivia<I> {
    view: TokenView<I>,
}

impl<I> StripTrivia<I>
where
    I: Iterator<Item = Result<Token, LexingError>>,
{
    pub fn new(view: TokenView<I>) -> Self {
        Self { view }
    }
}

impl<I> Iterator for StripTrivia<I>
where
    I: Iterator<Item = Result<Token, LexingError>>,
{
    type Item = Result<Token, LexingError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.view.next()? {
                Ok(token) if token.is_trivia() => continue,
                other => return Some(other),
            }
        }
    }
}
