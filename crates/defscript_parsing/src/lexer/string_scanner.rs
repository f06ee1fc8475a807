//! Scans single-quoted string literals

/// The outcome of running a scanner at the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// The rule does not apply here
    NoMatch,
    /// The rule consumed this many bytes
    Matched(usize),
    /// The rule applied, but its terminator never came
    Unterminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscapeState {
    Plain,
    Escaped,
}

/// Scans a `'` delimited string.
///
/// A backslash always consumes the character after it, so `'\\'` ends at the
/// second quote while `'\''` does not end at the escaped one.
pub fn scan_string(rest: &str) -> Scan {
    let mut chars = rest.char_indices();
    match chars.next() {
        Some((_, '\'')) => {}
        _ => return Scan::NoMatch,
    }
    let mut state = EscapeState::Plain;
    for (index, c) in chars {
        state = match (state, c) {
            (EscapeState::Escaped, _) => EscapeState::Plain,
            (EscapeState::Plain, '\\') => EscapeState::Escaped,
            (EscapeState::Plain, '\'') => return Scan::Matched(index + c.len_utf8()),
            (EscapeState::Plain, _) => EscapeState::Plain,
        };
    }
    Scan::Unterminated
}
