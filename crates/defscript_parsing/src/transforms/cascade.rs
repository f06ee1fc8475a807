//! Cascade statements.
//!
//! ```text
//! canvas
//!   ~* .context('2d')
//!   ~*~ .fill()
//!   ~* .reset()
//! ```
//!
//! lowers to
//!
//! ```text
//! _root$1 = canvas
//! _cascade$1 = _root$1.context('2d')
//! _cascade$1.fill()
//! _root$1.reset()
//! ```

use super::context::Context;
use super::error::{TransformError, TransformResult};
use super::expansion::Expansion;
use super::frame::{Frame, FrameTag};
use super::{CASCADE_PREFIX, ROOT_PREFIX};
use defscript_ast::source;
use defscript_ast::target::{Expr, Stmt, StmtKind};
use defscript_ast::SourceLocation;
use tracing::trace;

fn malformed(reason: impl Into<String>, loc: Option<SourceLocation>) -> TransformError {
    TransformError::MalformedCascade {
        reason: reason.into(),
        loc,
    }
}

pub(super) fn cascade(
    cx: &mut Context,
    root: source::Expr,
    statements: Vec<source::Stmt>,
    degrees: Vec<usize>,
) -> TransformResult<Expansion<Stmt>> {
    if statements.len() != degrees.len() {
        return Err(malformed(
            format!("{} steps but {} degrees", statements.len(), degrees.len()),
            cx.loc(),
        ));
    }

    let root_name = cx.fresh_name(ROOT_PREFIX)?;
    let root = cx.transform_expr(root)?;
    let mut lowered = vec![assign_statement(cx, &root_name, root)?];

    cx.push(Frame::cascade(root_name))?;
    let mut steps = statements.into_iter().zip(degrees.iter().copied()).peekable();
    while let Some((statement, degree)) = steps.next() {
        let loc = statement.loc.or(cx.loc());
        let depth = receivers(cx)?.len();
        if degree == 0 || degree > depth {
            return Err(malformed(
                format!("step of degree {degree} under {depth} receivers"),
                loc,
            ));
        }
        receivers(cx)?.truncate(degree);

        let next = steps.peek().map(|(_, next)| *next).unwrap_or(0);
        if next <= degree {
            lowered.extend(cx.transform_stmt(statement)?);
            continue;
        }
        if next > degree + 1 {
            return Err(malformed(
                format!("degree jumps from {degree} to {next}"),
                loc,
            ));
        }
        let source::StmtKind::Expression(expr) = statement.kind else {
            return Err(malformed(
                format!("{} cannot receive a cascade", statement.kind_name()),
                loc,
            ));
        };
        let name = cx.fresh_name(CASCADE_PREFIX)?;
        let receiver = cx.transform_expr(expr)?;
        lowered.push(assign_statement(cx, &name, receiver)?);
        trace!("cascade receiver {name} at degree {}", degree + 1);
        receivers(cx)?.push(name);
    }
    cx.pop()?;

    Ok(Expansion::Spread(lowered))
}

/// The receiver of the innermost cascade step
pub(super) fn virtual_object(cx: &mut Context) -> TransformResult<Expr> {
    let receiver = cx
        .context(FrameTag::Cascade, |_| true, |_| false)
        .and_then(|frame| match frame {
            Frame::Cascade { receivers } => receivers.last().cloned(),
            _ => None,
        })
        .ok_or_else(|| malformed("virtual object outside of a cascade", cx.loc()))?;
    cx.identifier(receiver)
}

fn receivers<'c>(cx: &'c mut Context) -> TransformResult<&'c mut Vec<String>> {
    match cx.own_frame_mut()? {
        Frame::Cascade { receivers } => Ok(receivers),
        _ => Err(TransformError::StackDiscipline(
            "cascade frame replaced while lowering its steps",
        )),
    }
}

fn assign_statement(cx: &Context, name: &str, value: Expr) -> TransformResult<Stmt> {
    let assignment = cx.assign(cx.identifier(name)?, value)?;
    cx.stmt(StmtKind::Expression(assignment))
}
