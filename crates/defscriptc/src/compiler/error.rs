//! A defscript compilation error

use defscript_parsing::parser::SyntaxError;
use defscript_parsing::transforms::TransformError;
use defscript_tokens::spanned::Span;
use defscript_tokens::SpannedError;
use std::io;
use thiserror::Error;

/// The kind of error
#[derive(Debug, Error)]
pub enum DefScriptCErrorKind {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("could not lower program: {0}")]
    Transform(#[from] TransformError),
    #[error("could not emit program: {0}")]
    Emit(Box<dyn std::error::Error + Send + Sync>),
}

/// An error occurred while compiling defscript
#[derive(Debug, Error)]
#[error(transparent)]
pub struct DefScriptCError(#[from] SpannedError<DefScriptCErrorKind, DefScriptCError>);

impl DefScriptCError {
    /// Creates a new [DefScriptCError] using a quick constructor
    #[inline]
    pub fn new(
        error: impl Into<DefScriptCErrorKind>,
        location: impl Into<Option<Span>>,
        caused_by: impl Into<Option<DefScriptCError>>,
    ) -> Self {
        Self(SpannedError::new(error.into(), location.into(), caused_by.into()))
    }

    pub fn kind(&self) -> &DefScriptCErrorKind {
        self.0.error()
    }

    pub fn location(&self) -> Option<&Span> {
        self.0.location()
    }
}

impl<T> From<T> for DefScriptCError
where
    DefScriptCErrorKind: From<T>,
{
    fn from(value: T) -> Self {
        Self(SpannedError::new(DefScriptCErrorKind::from(value), None, None))
    }
}

/// A type alias for general results in defscriptc
pub type DefScriptCResult<T> = Result<T, DefScriptCError>;
