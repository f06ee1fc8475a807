//! Source text that tokens and spans refer back to

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A named piece of source text.
///
/// Shared between every token lexed from it, so spans can render excerpts
/// without going back to the file system.
pub struct SourceFile {
    name: String,
    text: String,
    line_starts: Vec<usize>,
}

impl SourceFile {
    /// Creates a new, shared source file
    pub fn new(name: impl AsRef<str>, text: impl Into<String>) -> Arc<Self> {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(index, _)| index + 1))
            .collect();
        Arc::new(Self {
            name: name.as_ref().to_string(),
            text,
            line_starts,
        })
    }

    /// Creates a source file with a placeholder name
    pub fn anonymous(text: impl Into<String>) -> Arc<Self> {
        Self::new("<anonymous>", text)
    }

    /// The display name of this source
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full text of this source
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The length of the source in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Gets the 1-based line and 0-based column of a byte offset.
    ///
    /// Offsets past the end resolve to the end of the text.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len());
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let start = self.line_starts[line - 1];
        let col = match self.text.get(start..offset) {
            Some(prefix) => prefix.chars().count(),
            None => offset - start,
        };
        (line, col)
    }
}

impl Debug for SourceFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("len", &self.text.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let source = SourceFile::anonymous("ab\ncd\n\nef");
        assert_eq!(source.line_col(0), (1, 0));
        assert_eq!(source.line_col(1), (1, 1));
        assert_eq!(source.line_col(3), (2, 0));
        assert_eq!(source.line_col(4), (2, 1));
        assert_eq!(source.line_col(7), (4, 0));
        assert_eq!(source.line_col(100), (4, 2));
    }
}
