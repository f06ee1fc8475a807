#![doc = include_str!("../README.md")]

pub mod lexer;
pub mod parser;
pub mod rewrite;
pub mod transforms;
pub mod view;

pub use lexer::{Lexer, LexingError};
pub use parser::{parse, GrammarParser, LocatedToken, SyntaxError, SyntaxErrorKind, SyntaxResult};
pub use rewrite::{tokenize, tokenize_raw, CascadeOptions, Tokens};
pub use transforms::{transform, TransformEngine, TransformError, TransformResult, Vocabulary};
