//! The defscript source tree, as produced by the grammar parser.
//!
//! Mirrors estree where the languages agree, and adds the defscript-only
//! kinds: [StmtKind::Assignment], [StmtKind::Cascade], [StmtKind::Yield],
//! [ExprKind::CompareChain], [ExprKind::VirtualObject], [PropertyKind::Method]
//! and lexically-bound [Function]s.

mod expr;
mod stmt;

pub use expr::*;
pub use stmt::*;

use crate::loc::{Located, SourceLocation};

/// The root of a parsed defscript module
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub loc: Option<SourceLocation>,
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn new(body: impl IntoIterator<Item = Stmt>) -> Self {
        Self {
            loc: None,
            body: body.into_iter().collect(),
        }
    }

    pub fn at(mut self, loc: impl Into<Option<SourceLocation>>) -> Self {
        self.loc = loc.into();
        self
    }
}

impl Located for Program {
    fn loc(&self) -> Option<SourceLocation> {
        self.loc
    }
}

/// A binary operator as written in defscript
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::AsRefStr, strum::Display,
)]
pub enum BinaryOperator {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "%")]
    Rem,
    /// Integer division, rounding towards negative infinity
    #[strum(serialize = "//")]
    FloorDiv,
    #[strum(serialize = "^")]
    Pow,
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    NotEq,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = "<=")]
    LtEq,
    #[strum(serialize = ">=")]
    GtEq,
    #[strum(serialize = "in")]
    In,
}

impl BinaryOperator {
    /// Whether this operator can appear in a comparison chain
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Eq
                | BinaryOperator::NotEq
                | BinaryOperator::Lt
                | BinaryOperator::Gt
                | BinaryOperator::LtEq
                | BinaryOperator::GtEq
        )
    }
}

/// An assignment operator as written in defscript
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::AsRefStr, strum::Display,
)]
pub enum AssignmentOperator {
    #[strum(serialize = "=")]
    Assign,
    #[strum(serialize = "+=")]
    AddAssign,
    #[strum(serialize = "-=")]
    SubAssign,
    #[strum(serialize = "*=")]
    MulAssign,
    #[strum(serialize = "/=")]
    DivAssign,
    #[strum(serialize = "^=")]
    PowAssign,
}
