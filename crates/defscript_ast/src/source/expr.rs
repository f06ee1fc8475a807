//! Source expressions

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
    /// Creates an expression with no location
    pub fn new(kind: ExprKind) -> Self {
        Self { loc: None, kind }
    }

    pub fn at(mut self, loc: impl Into<Option<SourceLocation>>) -> Self {
        self.loc = loc.into();
        self
    }

    pub fn identifier(name: impl AsRef<str>) -> Self {
        Self::new(ExprKind::Identifier(name.as_ref().to_string()))
    }

    pub fn literal(value: impl Into<Literal>) -> Self {
        Self::new(ExprKind::Literal(value.into()))
    }

    pub fn binary(operator: BinaryOperator, left: Expr, right: Expr) -> Self {
        Self::new(ExprKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn call(callee: Expr, arguments: impl IntoIterator<Item = Expr>) -> Self {
        Self::new(ExprKind::Call {
            callee: Box::new(callee),
            arguments: arguments.into_iter().collect(),
        })
    }

    pub fn member(object: Expr, property: impl AsRef<str>) -> Self {
        Self::new(ExprKind::Member {
            object: Box::new(object),
            property: Box::new(Expr::identifier(property)),
            computed: false,
        })
    }

    /// The name of this node's kind
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
#[derive(Debug, Clone, PartialEq, strum::IntoStaticStr)]
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
    #[strum(serialize = "Function")]
    Function(Box<Function>),
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
    /// `a < b <= c`, with one more expression than operators
    #[strum(serialize = "CompareChainExpression")]
    CompareChain {
        expressions: Vec<Expr>,
        operators: Vec<BinaryOperator>,
    },
    /// The implicit receiver of the innermost cascade step
    #[strum(serialize = "VirtualObjectExpression")]
    VirtualObject,
    #[strum(serialize = "YieldExpression")]
    Yield {
        argument: Option<Box<Expr>>,
        delegate: bool,
    },
    #[strum(serialize = "AwaitExpression")]
    Await(Box<Expr>),
}

/// A function literal.
///
/// `bound` is `None` when the source left it to the enclosing context to decide
/// whether the function captures the surrounding `this`.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub loc: Option<SourceLocation>,
    pub params: Vec<Expr>,
    pub body: Block,
    pub bound: Option<bool>,
    pub generator: bool,
    pub is_async: bool,
}

impl Function {
    pub fn new(params: impl IntoIterator<Item = Expr>, body: Block) -> Self {
        Self {
            loc: None,
            params: params.into_iter().collect(),
            body,
            bound: None,
            generator: false,
            is_async: false,
        }
    }

    pub fn bound(mut self, bound: impl Into<Option<bool>>) -> Self {
        self.bound = bound.into();
        self
    }

    pub fn generator(mut self, generator: bool) -> Self {
        self.generator = generator;
        self
    }

    pub fn asynchronous(mut self, is_async: bool) -> Self {
        self.is_async = is_async;
        self
    }

    pub fn at(mut self, loc: impl Into<Option<SourceLocation>>) -> Self {
        self.loc = loc.into();
        self
    }
}

impl Located for Function {
    fn loc(&self) -> Option<SourceLocation> {
        self.loc
    }
}

/// A member of an object literal
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub loc: Option<SourceLocation>,
    pub kind: PropertyKind,
}

impl Property {
    pub fn new(kind: PropertyKind) -> Self {
        Self { loc: None, kind }
    }

    pub fn at(mut self, loc: impl Into<Option<SourceLocation>>) -> Self {
        self.loc = loc.into();
        self
    }

    pub fn kind_name(&self) -> &'static str {
        (&self.kind).into()
    }
}

impl Located for Property {
    fn loc(&self) -> Option<SourceLocation> {
        self.loc
    }
}

/// Property kind
#[derive(Debug, Clone, PartialEq, strum::IntoStaticStr)]
pub enum PropertyKind {
    /// `key: value`
    #[strum(serialize = "AssignmentProperty")]
    Assignment { key: Expr, value: Expr },
    /// `id(params) body`
    #[strum(serialize = "Method")]
    Method { id: Expr, definition: Function },
}
