//! Parameterized target-syntax snippets.
//!
//! A template is written in a small subset of the target language, with
//! `<%= name %>` placeholders standing in for expressions. Templates are
//! compiled once and then instantiated against a set of bindings any number of
//! times.

mod parser;

use super::error::{TransformError, TransformResult};
use super::vocabulary::Vocabulary;
use defscript_ast::literal::Literal;
use defscript_ast::operators::{LogicalOperator, UnaryOperator};
use defscript_ast::target::{BinaryOperator, Expr, ExprKind, Stmt, StmtKind};
use defscript_ast::SourceLocation;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// The shape a template is instantiated as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum TemplateKind {
    /// Exactly one expression statement, unwrapped to its expression
    Expression,
    /// Exactly one statement
    Statement,
    /// Any number of statements
    Program,
}

#[derive(Debug, Clone, PartialEq)]
enum TExpr {
    Placeholder(String),
    Identifier(String),
    Number(f64),
    String(String),
    This,
    Array(Vec<TExpr>),
    Unary {
        operator: UnaryOperator,
        argument: Box<TExpr>,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<TExpr>,
        right: Box<TExpr>,
    },
    Logical {
        operator: LogicalOperator,
        left: Box<TExpr>,
        right: Box<TExpr>,
    },
    Member {
        object: Box<TExpr>,
        property: Box<TExpr>,
        computed: bool,
    },
    Call {
        callee: Box<TExpr>,
        arguments: Vec<TExpr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum TStmt {
    Expression(TExpr),
    Return(Option<TExpr>),
}

/// A compiled template
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    source: String,
    body: Vec<TStmt>,
}

impl Template {
    /// Compiles a template
    pub fn compile(source: impl AsRef<str>) -> TransformResult<Self> {
        let source = source.as_ref();
        let body = parser::parse_template(source)
            .map_err(|message| TransformError::TemplateSyntax { message })?;
        Ok(Self {
            source: source.to_string(),
            body,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Instantiates this template as a single expression
    pub fn expression(
        &self,
        bindings: &[(&str, Expr)],
        vocabulary: &Vocabulary,
        loc: Option<SourceLocation>,
    ) -> TransformResult<Expr> {
        match self.body.as_slice() {
            [TStmt::Expression(expr)] => Instantiate::new(bindings, vocabulary, loc).expr(expr),
            _ => Err(TransformError::InvalidTemplate {
                kind: TemplateKind::Expression,
            }),
        }
    }

    /// Instantiates this template as a single statement
    pub fn statement(
        &self,
        bindings: &[(&str, Expr)],
        vocabulary: &Vocabulary,
        loc: Option<SourceLocation>,
    ) -> TransformResult<Stmt> {
        match self.body.as_slice() {
            [stmt] => Instantiate::new(bindings, vocabulary, loc).stmt(stmt),
            _ => Err(TransformError::InvalidTemplate {
                kind: TemplateKind::Statement,
            }),
        }
    }

    /// Instantiates this template as a list of statements
    pub fn program(
        &self,
        bindings: &[(&str, Expr)],
        vocabulary: &Vocabulary,
        loc: Option<SourceLocation>,
    ) -> TransformResult<Vec<Stmt>> {
        let instantiate = Instantiate::new(bindings, vocabulary, loc);
        self.body.iter().map(|stmt| instantiate.stmt(stmt)).collect()
    }
}

struct Instantiate<'a> {
    bindings: &'a [(&'a str, Expr)],
    vocabulary: &'a Vocabulary,
    loc: Option<SourceLocation>,
}

impl<'a> Instantiate<'a> {
    fn new(
        bindings: &'a [(&'a str, Expr)],
        vocabulary: &'a Vocabulary,
        loc: Option<SourceLocation>,
    ) -> Self {
        Self {
            bindings,
            vocabulary,
            loc,
        }
    }

    fn stmt(&self, stmt: &TStmt) -> TransformResult<Stmt> {
        let kind = match stmt {
            TStmt::Expression(expr) => StmtKind::Expression(self.expr(expr)?),
            TStmt::Return(argument) => {
                StmtKind::Return(argument.as_ref().map(|arg| self.expr(arg)).transpose()?)
            }
        };
        self.vocabulary.stmt(self.loc, kind)
    }

    fn boxed(&self, expr: &TExpr) -> TransformResult<Box<Expr>> {
        self.expr(expr).map(Box::new)
    }

    fn exprs(&self, exprs: &[TExpr]) -> TransformResult<Vec<Expr>> {
        exprs.iter().map(|expr| self.expr(expr)).collect()
    }

    fn expr(&self, expr: &TExpr) -> TransformResult<Expr> {
        let kind = match expr {
            TExpr::Placeholder(name) => {
                return self
                    .bindings
                    .iter()
                    .find(|(bound, _)| bound == name)
                    .map(|(_, expr)| expr.clone())
                    .ok_or_else(|| TransformError::UnboundPlaceholder { name: name.clone() })
            }
            TExpr::Identifier(name) => ExprKind::Identifier(name.clone()),
            TExpr::Number(n) => ExprKind::Literal(Literal::Number(*n)),
            TExpr::String(s) => ExprKind::Literal(Literal::String(s.clone())),
            TExpr::This => ExprKind::This,
            TExpr::Array(elements) => ExprKind::Array(self.exprs(elements)?),
            TExpr::Unary { operator, argument } => ExprKind::Unary {
                operator: *operator,
                argument: self.boxed(argument)?,
            },
            TExpr::Binary {
                operator,
                left,
                right,
            } => ExprKind::Binary {
                operator: *operator,
                left: self.boxed(left)?,
                right: self.boxed(right)?,
            },
            TExpr::Logical {
                operator,
                left,
                right,
            } => ExprKind::Logical {
                operator: *operator,
                left: self.boxed(left)?,
                right: self.boxed(right)?,
            },
            TExpr::Member {
                object,
                property,
                computed,
            } => ExprKind::Member {
                object: self.boxed(object)?,
                property: self.boxed(property)?,
                computed: *computed,
            },
            TExpr::Call { callee, arguments } => ExprKind::Call {
                callee: self.boxed(callee)?,
                arguments: self.exprs(arguments)?,
            },
        };
        self.vocabulary.expr(self.loc, kind)
    }
}

/// Compiled templates, keyed by their source text
#[derive(Debug, Default)]
pub struct TemplateCache {
    compiled: HashMap<String, Arc<Template>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the compiled form of a template, compiling it on first use
    pub fn get_or_compile(&mut self, source: &str) -> TransformResult<Arc<Template>> {
        if let Some(template) = self.compiled.get(source) {
            return Ok(template.clone());
        }
        trace!("compiling template {source:?}");
        let template = Arc::new(Template::compile(source)?);
        self.compiled.insert(source.to_string(), template.clone());
        Ok(template)
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}
