//! Source statements

use super::{AssignmentOperator, Expr, Function};
use crate::loc::{Located, SourceLocation};

/// A statement
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub loc: Option<SourceLocation>,
    pub kind: StmtKind,
}

impl Stmt {
    /// Creates a statement with no location
    pub fn new(kind: StmtKind) -> Self {
        Self { loc: None, kind }
    }

    pub fn at(mut self, loc: impl Into<Option<SourceLocation>>) -> Self {
        self.loc = loc.into();
        self
    }

    pub fn expression(expr: Expr) -> Self {
        Self::new(StmtKind::Expression(expr))
    }

    pub fn assign(left: Expr, right: Expr) -> Self {
        Self::new(StmtKind::Assignment {
            operator: AssignmentOperator::Assign,
            left,
            right,
        })
    }

    /// The name of this node's kind
    pub fn kind_name(&self) -> &'static str {
        (&self.kind).into()
    }
}

impl Located for Stmt {
    fn loc(&self) -> Option<SourceLocation> {
        self.loc
    }
}

/// Statement kind
#[derive(Debug, Clone, PartialEq, strum::IntoStaticStr)]
pub enum StmtKind {
    #[strum(serialize = "ExpressionStatement")]
    Expression(Expr),
    #[strum(serialize = "BlockStatement")]
    Block(Block),
    #[strum(serialize = "EmptyStatement")]
    Empty,
    #[strum(serialize = "IfStatement")]
    If {
        test: Expr,
        consequent: Box<Stmt>,
        alternate: Option<Box<Stmt>>,
    },
    #[strum(serialize = "WhileStatement")]
    While { test: Expr, body: Box<Stmt> },
    #[strum(serialize = "DoWhileStatement")]
    DoWhile { body: Box<Stmt>, test: Expr },
    #[strum(serialize = "ForInStatement")]
    ForIn {
        left: Expr,
        right: Expr,
        body: Box<Stmt>,
    },
    #[strum(serialize = "ForOfStatement")]
    ForOf {
        left: Expr,
        right: Expr,
        body: Box<Stmt>,
    },
    #[strum(serialize = "ReturnStatement")]
    Return(Option<Expr>),
    #[strum(serialize = "BreakStatement")]
    Break,
    #[strum(serialize = "ContinueStatement")]
    Continue,
    #[strum(serialize = "ThrowStatement")]
    Throw(Expr),
    #[strum(serialize = "TryStatement")]
    Try {
        block: Block,
        handler: Option<CatchClause>,
        finalizer: Option<Block>,
    },
    #[strum(serialize = "VariableDeclaration")]
    VariableDeclaration(Vec<VariableDeclarator>),
    #[strum(serialize = "FunctionDeclaration")]
    FunctionDeclaration { id: Expr, value: Function },
    /// `left op= right` in statement position
    #[strum(serialize = "AssignmentStatement")]
    Assignment {
        operator: AssignmentOperator,
        left: Expr,
        right: Expr,
    },
    /// A receiver followed by steps applied against it.
    ///
    /// `degrees[i]` is the 1-based nesting depth of `statements[i]`.
    #[strum(serialize = "CascadeStatement")]
    Cascade {
        root: Expr,
        statements: Vec<Stmt>,
        degrees: Vec<usize>,
    },
    #[strum(serialize = "YieldStatement")]
    Yield(Option<Expr>),
}

/// A braced or indented list of statements
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub loc: Option<SourceLocation>,
    pub body: Vec<Stmt>,
}

impl Block {
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

impl Located for Block {
    fn loc(&self) -> Option<SourceLocation> {
        self.loc
    }
}

/// A single binding of a variable declaration
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub loc: Option<SourceLocation>,
    pub id: Expr,
    pub init: Option<Expr>,
    pub constant: bool,
}

impl VariableDeclarator {
    pub fn new(id: Expr, init: impl Into<Option<Expr>>, constant: bool) -> Self {
        Self {
            loc: None,
            id,
            init: init.into(),
            constant,
        }
    }
}

impl Located for VariableDeclarator {
    fn loc(&self) -> Option<SourceLocation> {
        self.loc
    }
}

/// The `catch` part of a try statement
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub loc: Option<SourceLocation>,
    pub param: Option<Expr>,
    pub body: Block,
}

impl Located for CatchClause {
    fn loc(&self) -> Option<SourceLocation> {
        self.loc
    }
}
