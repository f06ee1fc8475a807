//! The estree shaped target tree.
//!
//! Only the transform engine constructs these nodes. Every node kind is named
//! after its estree `type`, which is what the node-constructor registry is
//! keyed by.

mod expr;
mod stmt;

pub use expr::*;
pub use stmt::*;

use crate::loc::{Located, SourceLocation};
use crate::source;
use strum::VariantNames as _;

/// The root of a lowered module
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub loc: Option<SourceLocation>,
    pub body: Vec<Stmt>,
    pub source_type: SourceType,
}

impl Located for Program {
    fn loc(&self) -> Option<SourceLocation> {
        self.loc
    }
}

/// estree `sourceType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::AsRefStr, strum::Display)]
pub enum SourceType {
    #[default]
    #[strum(serialize = "script")]
    Script,
    #[strum(serialize = "module")]
    Module,
}

/// The names of every node kind in the target vocabulary
pub fn node_kinds() -> impl Iterator<Item = &'static str> {
    ExprKind::VARIANTS
        .iter()
        .chain(StmtKind::VARIANTS)
        .copied()
        .chain([
            "Program",
            "Property",
            "VariableDeclarator",
            "CatchClause",
        ])
}

/// A binary operator of the target language
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
    #[strum(serialize = "**")]
    Exp,
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    NotEq,
    #[strum(serialize = "===")]
    StrictEq,
    #[strum(serialize = "!==")]
    StrictNotEq,
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
    #[strum(serialize = "instanceof")]
    InstanceOf,
}

impl TryFrom<source::BinaryOperator> for BinaryOperator {
    type Error = source::BinaryOperator;

    /// Fails for operators with no native counterpart
    fn try_from(value: source::BinaryOperator) -> Result<Self, Self::Error> {
        use source::BinaryOperator as Src;
        Ok(match value {
            Src::Add => Self::Add,
            Src::Sub => Self::Sub,
            Src::Mul => Self::Mul,
            Src::Div => Self::Div,
            Src::Rem => Self::Rem,
            Src::Pow => Self::Exp,
            Src::Eq => Self::Eq,
            Src::NotEq => Self::NotEq,
            Src::Lt => Self::Lt,
            Src::Gt => Self::Gt,
            Src::LtEq => Self::LtEq,
            Src::GtEq => Self::GtEq,
            Src::In => Self::In,
            Src::FloorDiv => return Err(value),
        })
    }
}

/// An assignment operator of the target language
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
    #[strum(serialize = "%=")]
    RemAssign,
    #[strum(serialize = "**=")]
    ExpAssign,
}

impl From<source::AssignmentOperator> for AssignmentOperator {
    fn from(value: source::AssignmentOperator) -> Self {
        use source::AssignmentOperator as Src;
        match value {
            Src::Assign => Self::Assign,
            Src::AddAssign => Self::AddAssign,
            Src::SubAssign => Self::SubAssign,
            Src::MulAssign => Self::MulAssign,
            Src::DivAssign => Self::DivAssign,
            Src::PowAssign => Self::ExpAssign,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pow_is_native_exponentiation() {
        assert_eq!(
            BinaryOperator::try_from(source::BinaryOperator::Pow),
            Ok(BinaryOperator::Exp)
        );
        assert_eq!(
            AssignmentOperator::from(source::AssignmentOperator::PowAssign).as_ref(),
            "**="
        );
    }

    #[test]
    fn test_floor_div_has_no_counterpart() {
        assert!(BinaryOperator::try_from(source::BinaryOperator::FloorDiv).is_err());
    }

    #[test]
    fn test_node_kinds_use_estree_names() {
        let kinds = node_kinds().collect::<Vec<_>>();
        for expected in [
            "Identifier",
            "ArrowFunctionExpression",
            "FunctionExpression",
            "ExpressionStatement",
            "VariableDeclaration",
            "Program",
        ] {
            assert!(kinds.contains(&expected), "missing {expected}");
        }
        assert!(!kinds.contains(&"CascadeStatement"));
    }
}
