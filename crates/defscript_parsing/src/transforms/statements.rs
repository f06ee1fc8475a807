//! Statement transformers, and the scope-aware lowering of statement lists

use super::context::Context;
use super::error::{TransformError, TransformResult};
use super::expansion::Expansion;
use super::frame::Frame;
use defscript_ast::source;
use defscript_ast::target::{DeclarationKind, ExprKind, Stmt, StmtKind};
use itertools::Itertools;

/// Lowers the statements of a scope whose frame the caller has pushed, and
/// pops it.
///
/// Function declarations are hoisted above the other statements, and every
/// name minted while lowering the scope is declared in one `let` at its top.
pub(super) fn body(cx: &mut Context, stmts: Vec<source::Stmt>) -> TransformResult<Vec<Stmt>> {
    let mut functions = vec![];
    let mut rest = vec![];
    let runs = stmts
        .into_iter()
        .chunk_by(|stmt| matches!(stmt.kind, source::StmtKind::FunctionDeclaration { .. }));
    for (hoisted, run) in &runs {
        let lowered = cx.transform_all(run, true)?;
        if hoisted {
            functions.extend(lowered);
        } else {
            rest.extend(lowered);
        }
    }

    let Frame::Scope { vars, .. } = cx.pop()? else {
        return Err(TransformError::StackDiscipline(
            "statement list lowered outside of its scope",
        ));
    };

    let mut body = Vec::with_capacity(functions.len() + rest.len() + 1);
    if !vars.is_empty() {
        let declarations = vars
            .into_iter()
            .map(|name| cx.declarator(None, cx.identifier(name)?, None))
            .collect::<TransformResult<Vec<_>>>()?;
        body.push(cx.stmt(StmtKind::VariableDeclaration {
            kind: DeclarationKind::Let,
            declarations,
        })?);
    }
    body.extend(functions);
    body.extend(rest);
    Ok(body)
}

pub(super) fn block(cx: &mut Context, block: source::Block) -> TransformResult<Expansion<Stmt>> {
    let block = cx.transform_block(block)?;
    cx.stmt(StmtKind::Block(block)).map(Expansion::Single)
}

/// Groups runs of constant and non-constant declarators into `const` and
/// `let` declarations
pub(super) fn variable_declaration(
    cx: &mut Context,
    declarators: Vec<source::VariableDeclarator>,
) -> TransformResult<Expansion<Stmt>> {
    if declarators.is_empty() {
        return Err(TransformError::MalformedNode {
            kind: cx.kind(),
            reason: "declaration without declarators".to_string(),
        });
    }

    let mut declarations = vec![];
    for (constant, run) in &declarators.into_iter().chunk_by(|declarator| declarator.constant) {
        let kind = if constant {
            DeclarationKind::Const
        } else {
            DeclarationKind::Let
        };
        let mut lowered = vec![];
        for source::VariableDeclarator { loc, id, init, .. } in run {
            let id = cx.transform_expr(id)?;
            let init = init.map(|init| cx.transform_expr(init)).transpose()?;
            lowered.push(cx.declarator(loc, id, init)?);
        }
        declarations.push(cx.stmt(StmtKind::VariableDeclaration {
            kind,
            declarations: lowered,
        })?);
    }
    Ok(Expansion::Spread(declarations).normalize())
}

/// `def f(...)` becomes `const f = <function>`
pub(super) fn function_declaration(
    cx: &mut Context,
    id: source::Expr,
    value: source::Function,
) -> TransformResult<Expansion<Stmt>> {
    let id = cx.transform_expr(id)?;
    let init = cx.transform_function(value)?;
    let declarator = cx.declarator(None, id, Some(init))?;
    cx.stmt(StmtKind::VariableDeclaration {
        kind: DeclarationKind::Const,
        declarations: vec![declarator],
    })
    .map(Expansion::Single)
}

pub(super) fn assignment(
    cx: &mut Context,
    operator: source::AssignmentOperator,
    left: source::Expr,
    right: source::Expr,
) -> TransformResult<Expansion<Stmt>> {
    let left = cx.transform_expr(left)?;
    let right = cx.transform_expr(right)?;
    let assignment = cx.expr(ExprKind::Assignment {
        operator: operator.into(),
        left: Box::new(left),
        right: Box::new(right),
    })?;
    cx.stmt(StmtKind::Expression(assignment)).map(Expansion::Single)
}

pub(super) fn yield_statement(
    cx: &mut Context,
    argument: Option<source::Expr>,
) -> TransformResult<Expansion<Stmt>> {
    let argument = argument
        .map(|argument| cx.transform_expr(argument).map(Box::new))
        .transpose()?;
    let expr = cx.expr(ExprKind::Yield {
        argument,
        delegate: false,
    })?;
    cx.stmt(StmtKind::Expression(expr)).map(Expansion::Single)
}
