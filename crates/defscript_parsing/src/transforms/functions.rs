//! Function literals.
//!
//! A bound function captures the surrounding `this`. Unless the source says
//! otherwise, functions are bound everywhere except directly inside a method
//! definition.

use super::context::Context;
use super::error::TransformResult;
use super::frame::FrameTag;
use defscript_ast::source;
use defscript_ast::target::{Expr, ExprKind, Function, StmtKind};

/// Immediately applies a generator to the `this` of its arrow wrapper
const APPLY_GENERATOR: &str = "(<%= fn %>).apply(this, [])";

pub(super) fn function(cx: &mut Context, function: source::Function) -> TransformResult<Expr> {
    let source::Function {
        loc,
        params,
        body,
        bound,
        generator,
        is_async,
    } = function;
    let loc = loc.or(cx.loc());
    let bound = bound.unwrap_or_else(|| {
        cx.context(FrameTag::Method, |_| true, |frame| frame.tag() != FrameTag::Method)
            .is_none()
    });

    if bound && generator && is_async {
        return Err(cx.not_implemented("bound async generators"));
    }

    let params = cx.transform_exprs(params)?;
    let body = cx.transform_block(body)?;

    if !bound {
        return cx.expr(ExprKind::Function(Box::new(Function {
            loc,
            id: None,
            params,
            body,
            generator,
            is_async,
        })));
    }

    let body = if generator {
        let generator = cx.expr(ExprKind::Function(Box::new(Function {
            loc,
            id: None,
            params: vec![],
            body,
            generator: true,
            is_async: false,
        })))?;
        let applied = cx.expression(APPLY_GENERATOR, &[("fn", generator)])?;
        let ret = cx.stmt(StmtKind::Return(Some(applied)))?;
        cx.block(vec![ret])?
    } else {
        body
    };
    cx.expr(ExprKind::Arrow(Box::new(Function {
        loc,
        id: None,
        params,
        body,
        generator: false,
        is_async,
    })))
}
