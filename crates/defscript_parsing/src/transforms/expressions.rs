//! Operator desugaring

use super::context::Context;
use super::error::{TransformError, TransformResult};
use super::TEMP_PREFIX;
use defscript_ast::operators::LogicalOperator;
use defscript_ast::source;
use defscript_ast::target::{BinaryOperator, Expr, ExprKind};

const FLOOR_DIVISION: &str = "Math.floor(<%= left %> / <%= right %>)";

fn operator(op: source::BinaryOperator) -> TransformResult<BinaryOperator> {
    BinaryOperator::try_from(op).map_err(|op| TransformError::UnsupportedOperator {
        operator: op.to_string(),
    })
}

pub(super) fn binary(
    cx: &mut Context,
    op: source::BinaryOperator,
    left: source::Expr,
    right: source::Expr,
) -> TransformResult<Expr> {
    let left = cx.transform_expr(left)?;
    let right = cx.transform_expr(right)?;
    if op == source::BinaryOperator::FloorDiv {
        return cx.expression(FLOOR_DIVISION, &[("left", left), ("right", right)]);
    }
    cx.expr(ExprKind::Binary {
        operator: operator(op)?,
        left: Box::new(left),
        right: Box::new(right),
    })
}

/// `a < b <= c` becomes `a < (_temp$1 = b) && _temp$1 <= c`, so every inner
/// operand is evaluated exactly once
pub(super) fn compare_chain(
    cx: &mut Context,
    expressions: Vec<source::Expr>,
    operators: Vec<source::BinaryOperator>,
) -> TransformResult<Expr> {
    if operators.is_empty() || expressions.len() != operators.len() + 1 {
        return Err(TransformError::MalformedNode {
            kind: cx.kind(),
            reason: format!(
                "{} operands for {} operators",
                expressions.len(),
                operators.len()
            ),
        });
    }

    let last = operators.len() - 1;
    let mut expressions = expressions.into_iter();
    let mut previous: Option<String> = None;
    let mut chain: Option<Expr> = None;
    for (i, op) in operators.into_iter().enumerate() {
        let comparator = operator(op)?;
        let left = match previous.take() {
            Some(temp) => cx.identifier(temp)?,
            None => next_operand(cx, &mut expressions)?,
        };
        let right = if i == last {
            next_operand(cx, &mut expressions)?
        } else {
            let temp = cx.fresh_name(TEMP_PREFIX)?;
            let value = next_operand(cx, &mut expressions)?;
            let assignment = cx.assign(cx.identifier(&temp)?, value)?;
            previous = Some(temp);
            assignment
        };
        let comparison = cx.expr(ExprKind::Binary {
            operator: comparator,
            left: Box::new(left),
            right: Box::new(right),
        })?;
        chain = Some(match chain {
            Some(chain) => cx.expr(ExprKind::Logical {
                operator: LogicalOperator::And,
                left: Box::new(chain),
                right: Box::new(comparison),
            })?,
            None => comparison,
        });
    }
    chain.ok_or_else(|| TransformError::MalformedNode {
        kind: cx.kind(),
        reason: "empty comparison chain".to_string(),
    })
}

fn next_operand(
    cx: &mut Context,
    expressions: &mut impl Iterator<Item = source::Expr>,
) -> TransformResult<Expr> {
    match expressions.next() {
        Some(expr) => cx.transform_expr(expr),
        None => Err(TransformError::MalformedNode {
            kind: cx.kind(),
            reason: "comparison chain ran out of operands".to_string(),
        }),
    }
}
