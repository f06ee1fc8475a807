//! Tokens, spans and the source files they point into.

use crate::spanned::{LineReader, Span};
use std::fmt::{Display, Formatter};

pub mod source;
pub mod spanned;
pub mod token;

/// An error with a location
#[derive(Debug, thiserror::Error)]
pub struct SpannedError<E, C> {
    error: E,
    location: Option<Span>,
    cause: Option<Box<C>>,
}

impl<E, C> SpannedError<E, C> {
    pub fn new(error: E, location: impl Into<Option<Span>>, cause: impl Into<Option<C>>) -> Self {
        Self {
            error,
            location: location.into(),
            cause: cause.into().map(Box::new),
        }
    }

    /// Gets the inner error
    pub fn error(&self) -> &E {
        &self.error
    }

    /// Gets the location of this error, if known
    pub fn location(&self) -> Option<&Span> {
        self.location.as_ref()
    }

    /// Gets the error that caused this one, if any
    pub fn cause(&self) -> Option<&C> {
        self.cause.as_deref()
    }
}

impl<E: Display, C: Display> Display for SpannedError<E, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.error)?;
        if let Some(location) = &self.location {
            let (line, col) = location.line_col();
            writeln!(f, "  -> {}:{line}:{col}", location.source().name())?;
            if let Some((lines, base_line)) = LineReader::new(2, 2).lines(location) {
                let width = lines.iter().map(|line| line.line).max().unwrap_or(0) / 10 + 1;
                for line in &lines {
                    writeln!(f, "{:width$} | {}", line.line, line.src.trim_end())?;
                    if line.line == base_line {
                        if location.len() > 0 {
                            writeln!(
                                f,
                                "{}{}{}",
                                " ".repeat(width + 3),
                                " ".repeat(line.col),
                                "~".repeat(location.len())
                            )?;
                        } else {
                            writeln!(f, "{}{}^", " ".repeat(width + 3), "-".repeat(line.col))?;
                        }
                    }
                }
            }
            writeln!(f)?;
        }
        if let Some(cause) = &self.cause {
            cause.fmt(f)?;
        }

        Ok(())
    }
}
