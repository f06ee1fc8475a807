//! A trait that can provide the [Span] of a token or node

use crate::source::SourceFile;
use std::fmt::{Debug, Formatter};
use std::ops::Range;
use std::sync::Arc;

/// A trait that can provide the [Span] of the complete context of a token
pub trait Spanned {
    fn span(&self) -> Span;
}

/// A range of bytes within a [SourceFile]
#[derive(Clone)]
pub struct Span {
    source: Arc<SourceFile>,
    offset: usize,
    len: usize,
}

impl Span {
    /// Creates a new span
    pub fn new(source: &Arc<SourceFile>, start: usize, len: usize) -> Self {
        Self {
            source: source.clone(),
            offset: start,
            len,
        }
    }

    /// Creates a zero-width span at the given offset
    pub fn empty(source: &Arc<SourceFile>, at: usize) -> Self {
        Self::new(source, at, 0)
    }

    /// Gets a span directly after this span
    pub fn end(&self) -> Self {
        Self {
            source: self.source.clone(),
            offset: self.offset + self.len,
            len: 0,
        }
    }

    /// Creates a span that encompasses both, if both are from the same source
    pub fn join(&self, other: &Self) -> Option<Self> {
        if !Arc::ptr_eq(&self.source, &other.source) {
            None
        } else {
            let min = self.offset.min(other.offset);
            let max = (self.offset + self.len).max(other.offset + other.len);
            Some(Self {
                source: self.source.clone(),
                offset: min,
                len: max - min,
            })
        }
    }

    /// Gets the source this span is from
    #[inline]
    pub fn source(&self) -> &Arc<SourceFile> {
        &self.source
    }

    /// The text covered by this span
    pub fn text(&self) -> &str {
        &self.source.text()[self.range()]
    }

    /// The `[start, end)` byte range of this span
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    /// Gets the 1-based line and 0-based column this span starts at
    pub fn line_col(&self) -> (usize, usize) {
        self.source.line_col(self.offset)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source, &other.source)
            && self.offset == other.offset
            && self.len == other.len
    }
}

impl Eq for Span {}

impl Debug for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}..{}]", self.source.name(), self.offset, self.offset + self.len)
    }
}

impl Spanned for Span {
    fn span(&self) -> Span {
        self.clone()
    }
}

/// A line reader struct that's responsible for getting lines around a span
#[derive(Debug, Default)]
pub struct LineReader {
    before: usize,
    after: usize,
}

impl LineReader {
    /// Creates a new line reader that gets `before` number of lines before a span and
    /// `after` number of lines after.
    pub fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }

    /// Gets the lines surrounding a given span, plus the line the span starts on.
    ///
    /// Returns `None` if the span starts past the end of its source.
    pub fn lines(&self, span: &Span) -> Option<(Vec<Line>, usize)> {
        let text = span.source().text();
        if span.offset() > text.len() {
            return None;
        }
        let (base_line, _) = span.line_col();
        let range = base_line.saturating_sub(self.before)..=base_line.saturating_add(self.after);

        let mut byte_offset = 0usize;
        let mut lines = vec![];
        for (index, src) in text.split('\n').enumerate() {
            let line = index + 1;
            if range.contains(&line) {
                let col = if line == base_line {
                    text[byte_offset..span.offset()].chars().count()
                } else {
                    0
                };
                lines.push(Line {
                    line,
                    col,
                    byte_offset,
                    src: src.to_string(),
                });
            }
            byte_offset += src.len() + 1;
        }
        Some((lines, base_line))
    }
}

#[derive(Debug)]
pub struct Line {
    pub line: usize,
    pub col: usize,
    pub byte_offset: usize,
    pub src: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_end() {
        let source = SourceFile::anonymous("hello world");
        let p = Span::new(&source, 0, 5).end();
        assert_eq!(p.offset(), 5);
        assert_eq!(p.len(), 0);
    }

    #[test]
    fn test_span_text() {
        let source = SourceFile::anonymous("hello world");
        assert_eq!(Span::new(&source, 6, 5).text(), "world");
    }

    #[test]
    fn test_join() {
        let source = SourceFile::anonymous("0123456789abcdefghijklmnopqrstuvwxyz");
        let p1 = Span::new(&source, 0, 8);
        let p2 = Span::new(&source, 16, 8);
        assert_eq!(p1.join(&p2).unwrap(), Span::new(&source, 0, 24));
    }

    #[test]
    fn test_join_different_sources() {
        let p1 = Span::new(&SourceFile::anonymous("a"), 0, 1);
        let p2 = Span::new(&SourceFile::anonymous("a"), 0, 1);
        assert!(p1.join(&p2).is_none());
    }

    #[test]
    fn test_line_reader() {
        let source = SourceFile::anonymous("one\ntwo\nthree\nfour\nfive\nsix");
        let span = Span::new(&source, 9, 3);
        let (lines, base) = LineReader::new(1, 1).lines(&span).unwrap();
        assert_eq!(base, 3);
        assert_eq!(
            lines.iter().map(|l| l.src.as_str()).collect::<Vec<_>>(),
            ["two", "three", "four"]
        );
        assert_eq!(lines[1].col, 1);
    }
}
