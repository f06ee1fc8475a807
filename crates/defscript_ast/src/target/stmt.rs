//! Target statements

use super::Expr;
use crate::loc::{Located, SourceLocation};

/// A statement
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub loc: Option<SourceLocation>,
    pub kind: StmtKind,
}

impl Stmt {
    pub fn new(loc: Option<SourceLocation>, kind: StmtKind) -> Self {
        Self { loc, kind }
    }

    pub fn expression(loc: Option<SourceLocation>, expr: Expr) -> Self {
        Self::new(loc, StmtKind::Expression(expr))
    }

    /// The estree `type` of this node
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
#[derive(Debug, Clone, PartialEq, strum::IntoStaticStr, strum::VariantNames)]
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
    VariableDeclaration {
        kind: DeclarationKind,
        declarations: Vec<VariableDeclarator>,
    },
}

/// A list of statements
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub loc: Option<SourceLocation>,
    pub body: Vec<Stmt>,
}

impl Located for Block {
    fn loc(&self) -> Option<SourceLocation> {
        self.loc
    }
}

/// estree variable declaration `kind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr, strum::Display)]
pub enum DeclarationKind {
    #[strum(serialize = "var")]
    Var,
    #[strum(serialize = "let")]
    Let,
    #[strum(serialize = "const")]
    Const,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub loc: Option<SourceLocation>,
    pub id: Expr,
    pub init: Option<Expr>,
}

impl Located for VariableDeclarator {
    fn loc(&self) -> Option<SourceLocation> {
        self.loc
    }
}

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
