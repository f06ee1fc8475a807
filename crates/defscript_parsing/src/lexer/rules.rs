//! The ordered rule table of the lexer

use super::string_scanner::{scan_string, Scan};
use defscript_tokens::token::TokenKind;
use regex::Regex;
use std::fmt::{Debug, Formatter};
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

const KEYWORDS: &[&str] = &[
    "for", "if", "else", "def", "this", "in", "on", "do", "return", "while", "function", "yield",
    "break", "continue", "try", "finally",
];

enum Matcher {
    Pattern(Regex),
    Scanner(fn(&str) -> Scan),
}

/// A single lexer rule.
///
/// A rule without a kind takes the kind spelled by the text it matched.
pub struct Rule {
    name: &'static str,
    kind: Option<TokenKind>,
    matcher: Matcher,
}

impl Rule {
    /// A rule matching an anchored regular expression
    pub fn pattern(
        name: &'static str,
        kind: Option<TokenKind>,
        pattern: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            kind,
            matcher: Matcher::Pattern(Regex::new(&format!(r"\A(?:{pattern})"))?),
        })
    }

    /// A rule driven by a scanning routine
    pub fn scanner(name: &'static str, kind: TokenKind, scanner: fn(&str) -> Scan) -> Self {
        Self {
            name,
            kind: Some(kind),
            matcher: Matcher::Scanner(scanner),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Tries this rule at the start of `rest`. Empty matches never count.
    pub fn scan(&self, rest: &str) -> Scan {
        let scan = match &self.matcher {
            Matcher::Pattern(regex) => match regex.find(rest) {
                Some(found) => Scan::Matched(found.end()),
                None => Scan::NoMatch,
            },
            Matcher::Scanner(scanner) => scanner(rest),
        };
        match scan {
            Scan::Matched(0) => Scan::NoMatch,
            scan => scan,
        }
    }

    /// The kind of a token this rule matched
    pub fn kind_of(&self, text: &str) -> Option<TokenKind> {
        self.kind.or_else(|| TokenKind::from_str(text).ok())
    }
}

impl Debug for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("Rule");
        debug.field("name", &self.name).field("kind", &self.kind);
        match &self.matcher {
            Matcher::Pattern(regex) => debug.field("pattern", &regex.as_str()),
            Matcher::Scanner(_) => debug.field("pattern", &"<scanner>"),
        };
        debug.finish()
    }
}

/// Rules tried in order, the first match winning
#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Creates a table from rules in priority order
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// The defscript rule table
    pub fn defscript() -> Result<Self, regex::Error> {
        use TokenKind::{
            Cascade, Comment, Compare, Id, Linear, Nl, Number, Pow, Reassign, Scalar, This, Ws,
        };
        Ok(Self::new([
            Rule::scanner("string", TokenKind::String, scan_string),
            Rule::pattern("comment", Some(Comment), r"#[^\n]*")?,
            Rule::pattern("keyword", None, &format!(r"\b(?:{})\b", KEYWORDS.join("|")))?,
            Rule::pattern("ws", Some(Ws), r"[ \t]+")?,
            Rule::pattern("nl", Some(Nl), r"(?:\s*\n\s*)+")?,
            Rule::pattern("this", Some(This), r"@")?,
            Rule::pattern("bracket", None, r"[{}\[\]()]")?,
            Rule::pattern(
                "number",
                Some(Number),
                r"0x[0-9a-fA-F]+|0b[01]+|0o[0-7]+|[0-9]+(?:\.[0-9]+)?(?:[eE]-?[0-9]+)?",
            )?,
            Rule::pattern("literal", None, r"\b(?:true|false|null|undefined)\b")?,
            Rule::pattern("id", Some(Id), r"[a-zA-Z_][a-zA-Z_0-9]*")?,
            Rule::pattern("arrow", None, r"[-=]>")?,
            Rule::pattern("compare", Some(Compare), r"[=<>!]=|[<>]")?,
            Rule::pattern("reassign", Some(Reassign), r"[+\-*/^]=")?,
            Rule::pattern("assign", None, r":?=")?,
            Rule::pattern("punctuation", None, r"[,.:]")?,
            Rule::pattern("cascade", Some(Cascade), r"~\*~*")?,
            Rule::pattern("linear", Some(Linear), r"[+-]")?,
            Rule::pattern("scalar", Some(Scalar), r"//|[*/%]")?,
            Rule::pattern("pow", Some(Pow), r"\^")?,
        ]))
    }

    /// The defscript rule table, compiled once per process
    pub fn shared() -> Result<Arc<Self>, regex::Error> {
        static SHARED: OnceLock<Result<Arc<RuleTable>, regex::Error>> = OnceLock::new();
        SHARED
            .get_or_init(|| RuleTable::defscript().map(Arc::new))
            .clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(rest: &str) -> Option<(&'static str, usize)> {
        let table = RuleTable::shared().unwrap();
        let found = table.iter().find_map(|rule| match rule.scan(rest) {
            Scan::Matched(len) => Some((rule.name(), len)),
            _ => None,
        });
        found
    }

    #[test]
    fn test_keyword_needs_word_boundary() {
        assert_eq!(first("do x"), Some(("keyword", 2)));
        assert_eq!(first("done"), Some(("id", 4)));
    }

    #[test]
    fn test_prefixed_numbers_before_decimal() {
        assert_eq!(first("0x1F;"), Some(("number", 4)));
        assert_eq!(first("0b101"), Some(("number", 5)));
        assert_eq!(first("1.5e-3 "), Some(("number", 6)));
    }

    #[test]
    fn test_literal_needs_word_boundary() {
        assert_eq!(first("true"), Some(("literal", 4)));
        assert_eq!(first("nullable"), Some(("id", 8)));
    }

    #[test]
    fn test_compound_operators_first() {
        assert_eq!(first("=> x"), Some(("arrow", 2)));
        assert_eq!(first("== x"), Some(("compare", 2)));
        assert_eq!(first(":= x"), Some(("assign", 2)));
        assert_eq!(first("^= x"), Some(("reassign", 2)));
        assert_eq!(first("// x"), Some(("scalar", 2)));
        assert_eq!(first("~*~ x"), Some(("cascade", 3)));
    }

    #[test]
    fn test_untyped_kind_from_text() {
        let rule = Rule::pattern("assign", None, ":?=").unwrap();
        assert_eq!(rule.kind_of(":="), Some(TokenKind::Define));
        assert_eq!(rule.kind_of("="), Some(TokenKind::Assign));
        assert_eq!(rule.kind_of("=="), None);
    }
}
