//! The default rule for node kinds without a registered transformer: look up
//! the target kind of the same name, lower every child, and keep the location.

use super::context::Context;
use super::error::{TransformError, TransformResult};
use defscript_ast::source;
use defscript_ast::target::{CatchClause, Expr, ExprKind, Stmt, StmtKind};

pub(super) fn pass_expr(cx: &mut Context, kind: source::ExprKind) -> TransformResult<Expr> {
    use source::ExprKind as Src;

    cx.require(cx.kind())?;
    let kind = match kind {
        Src::Identifier(name) => ExprKind::Identifier(name),
        Src::Literal(literal) => ExprKind::Literal(literal),
        Src::This => ExprKind::This,
        Src::Array(elements) => ExprKind::Array(cx.transform_exprs(elements)?),
        Src::Object(properties) => ExprKind::Object(
            properties
                .into_iter()
                .map(|property| cx.transform_property(property))
                .collect::<TransformResult<_>>()?,
        ),
        Src::Unary { operator, argument } => ExprKind::Unary {
            operator,
            argument: boxed(cx, *argument)?,
        },
        Src::Logical {
            operator,
            left,
            right,
        } => ExprKind::Logical {
            operator,
            left: boxed(cx, *left)?,
            right: boxed(cx, *right)?,
        },
        Src::Conditional {
            test,
            consequent,
            alternate,
        } => ExprKind::Conditional {
            test: boxed(cx, *test)?,
            consequent: boxed(cx, *consequent)?,
            alternate: boxed(cx, *alternate)?,
        },
        Src::Assignment {
            operator,
            left,
            right,
        } => ExprKind::Assignment {
            operator: operator.into(),
            left: boxed(cx, *left)?,
            right: boxed(cx, *right)?,
        },
        Src::Call { callee, arguments } => ExprKind::Call {
            callee: boxed(cx, *callee)?,
            arguments: cx.transform_exprs(arguments)?,
        },
        Src::New { callee, arguments } => ExprKind::New {
            callee: boxed(cx, *callee)?,
            arguments: cx.transform_exprs(arguments)?,
        },
        Src::Member {
            object,
            property,
            computed,
        } => ExprKind::Member {
            object: boxed(cx, *object)?,
            property: boxed(cx, *property)?,
            computed,
        },
        Src::Sequence(exprs) => ExprKind::Sequence(cx.transform_exprs(exprs)?),
        Src::Yield { argument, delegate } => ExprKind::Yield {
            argument: argument.map(|arg| boxed(cx, *arg)).transpose()?,
            delegate,
        },
        Src::Await(argument) => ExprKind::Await(boxed(cx, *argument)?),
        Src::Binary { .. } | Src::Function(_) | Src::CompareChain { .. } | Src::VirtualObject => {
            return Err(TransformError::unsupported_node(cx.kind()))
        }
    };
    cx.expr(kind)
}

pub(super) fn pass_stmt(cx: &mut Context, kind: source::StmtKind) -> TransformResult<Stmt> {
    use source::StmtKind as Src;

    cx.require(cx.kind())?;
    let kind = match kind {
        Src::Expression(expr) => StmtKind::Expression(cx.transform_expr(expr)?),
        Src::Block(block) => StmtKind::Block(cx.transform_block(block)?),
        Src::Empty => StmtKind::Empty,
        Src::If {
            test,
            consequent,
            alternate,
        } => StmtKind::If {
            test: cx.transform_expr(test)?,
            consequent: single(cx, *consequent)?,
            alternate: alternate.map(|alt| single(cx, *alt)).transpose()?,
        },
        Src::While { test, body } => StmtKind::While {
            test: cx.transform_expr(test)?,
            body: single(cx, *body)?,
        },
        Src::DoWhile { body, test } => StmtKind::DoWhile {
            body: single(cx, *body)?,
            test: cx.transform_expr(test)?,
        },
        Src::ForIn { left, right, body } => StmtKind::ForIn {
            left: cx.transform_expr(left)?,
            right: cx.transform_expr(right)?,
            body: single(cx, *body)?,
        },
        Src::ForOf { left, right, body } => StmtKind::ForOf {
            left: cx.transform_expr(left)?,
            right: cx.transform_expr(right)?,
            body: single(cx, *body)?,
        },
        Src::Return(argument) => {
            StmtKind::Return(argument.map(|arg| cx.transform_expr(arg)).transpose()?)
        }
        Src::Break => StmtKind::Break,
        Src::Continue => StmtKind::Continue,
        Src::Throw(argument) => StmtKind::Throw(cx.transform_expr(argument)?),
        Src::Try {
            block,
            handler,
            finalizer,
        } => StmtKind::Try {
            block: cx.transform_block(block)?,
            handler: handler
                .map(|handler| catch_clause(cx, handler))
                .transpose()?,
            finalizer: finalizer
                .map(|finalizer| cx.transform_block(finalizer))
                .transpose()?,
        },
        Src::VariableDeclaration(_)
        | Src::FunctionDeclaration { .. }
        | Src::Assignment { .. }
        | Src::Cascade { .. }
        | Src::Yield(_) => return Err(TransformError::unsupported_node(cx.kind())),
    };
    cx.stmt(kind)
}

fn boxed(cx: &mut Context, expr: source::Expr) -> TransformResult<Box<Expr>> {
    cx.transform_expr(expr).map(Box::new)
}

fn single(cx: &mut Context, stmt: source::Stmt) -> TransformResult<Box<Stmt>> {
    let kind = stmt.kind_name();
    cx.transform_all([stmt], false)?
        .pop()
        .map(Box::new)
        .ok_or(TransformError::InvalidExpansion { kind })
}

fn catch_clause(cx: &mut Context, handler: source::CatchClause) -> TransformResult<CatchClause> {
    let source::CatchClause { loc, param, body } = handler;
    let param = param.map(|param| cx.transform_expr(param)).transpose()?;
    let body = cx.transform_block(body)?;
    cx.catch_clause(loc, param, body)
}
