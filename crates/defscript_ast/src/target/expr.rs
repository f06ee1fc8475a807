//! Target expressions

use super::{AssignmentOperator, BinaryOperator, Block};
use crate::literal::Literal;
use crate::loc::{Located, SourceLocation};
use crate::operators::{LogicalOperator, UnaryOperator};

/// An expression
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub loc: Option<SourceLocation>,
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(loc: Option<SourceLocation>, kind: ExprKind) -> Self {
        Self { loc, kind }
    }

    pub fn identifier(loc: Option<SourceLocation>, name: impl AsRef<str>) -> Self {
        Self::new(loc, ExprKind::Identifier(name.as_ref().to_string()))
    }

    /// `left = right`
    pub fn assign(loc: Option<SourceLocation>, left: Expr, right: Expr) -> Self {
        Self::new(
            loc,
            ExprKind::Assignment {
                operator: AssignmentOperator::Assign,
                left: Box::new(left),
                right: Box::new(right),
            },
        )
    }

    pub fn binary(
        loc: Option<SourceLocation>,
        operator: BinaryOperator,
        left: Expr,
        right: Expr,
    ) -> Self {
        Self::new(
            loc,
            ExprKind::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            },
        )
    }

    pub fn logical(
        loc: Option<SourceLocation>,
        operator: LogicalOperator,
        left: Expr,
        right: Expr,
    ) -> Self {
        Self::new(
            loc,
            ExprKind::Logical {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            },
        )
    }

    /// Gets the name of this expression if it's an identifier
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// The estree `type` of this node
    pub fn kind_name(&self) -> &'static str {
        (&self.kind).into()
    }
}

impl Located for Expr {
    fn loc(&self) -> Option<SourceLocation> {
        self.loc
    }
}

/// Expression kind
#[derive(Debug, Clone, PartialEq, strum::IntoStaticStr, strum::VariantNames)]
pub enum ExprKind {
    #[strum(serialize = "Identifier")]
    Identifier(String),
    #[strum(serialize = "Literal")]
    Literal(Literal),
    #[strum(serialize = "ThisExpression")]
    This,
    #[strum(serialize = "ArrayExpression")]
    Array(Vec<Expr>),
    #[strum(serialize = "ObjectExpression")]
    Object(Vec<Property>),
    #[strum(serialize = "FunctionExpression")]
    Function(Box<Function>),
    /// Always has a block body
    #[strum(serialize = "ArrowFunctionExpression")]
    Arrow(Box<Function>),
    #[strum(serialize = "UnaryExpression")]
    Unary {
        operator: UnaryOperator,
        argument: Box<Expr>,
    },
    #[strum(serialize = "BinaryExpression")]
    Binary {
        operator: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    #[strum(serialize = "LogicalExpression")]
    Logical {
        operator: LogicalOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    #[strum(serialize = "ConditionalExpression")]
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    #[strum(serialize = "AssignmentExpression")]
    Assignment {
        operator: AssignmentOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    #[strum(serialize = "CallExpression")]
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    #[strum(serialize = "NewExpression")]
    New {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    #[strum(serialize = "MemberExpression")]
    Member {
        object: Box<Expr>,
        property: Box<Expr>,
        computed: bool,
    },
    #[strum(serialize = "SequenceExpression")]
    Sequence(Vec<Expr>),
    #[strum(serialize = "YieldExpression")]
    Yield {
        argument: Option<Box<Expr>>,
        delegate: bool,
    },
    #[strum(serialize = "AwaitExpression")]
    Await(Box<Expr>),
}

/// The shared shape of function and arrow function expressions
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub loc: Option<SourceLocation>,
    pub id: Option<Expr>,
    pub params: Vec<Expr>,
    pub body: Block,
    pub generator: bool,
    pub is_async: bool,
}

impl Located for Function {
    fn loc(&self) -> Option<SourceLocation> {
        self.loc
    }
}

/// An object literal member
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub loc: Option<SourceLocation>,
    pub key: Expr,
    pub value: Expr,
    pub kind: PropertyKind,
    pub method: bool,
    pub shorthand: bool,
    pub computed: bool,
}

impl Located for Property {
    fn loc(&self) -> Option<SourceLocation> {
        self.loc
    }
}

/// estree property `kind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::AsRefStr, strum::Display)]
pub enum PropertyKind {
    #[default]
    #[strum(serialize = "init")]
    Init,
    #[strum(serialize = "get")]
    Get,
    #[strum(serialize = "set")]
    Set,
}
