use defscript_ast::source::{BinaryOperator, Expr, ExprKind, Program, Stmt};
use defscript_ast::SourceLocation;
use defscript_parsing::parser::{GrammarParser, LocatedToken};
use defscript_tokens::token::TokenKind;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum LineGrammarError {
    #[error("unexpected {0}")]
    Unexpected(&'static str),
    #[error("statement ended early")]
    Incomplete,
}

/// A stand-in grammar of one statement per line:
///
/// ```text
/// statement := id ('=' operand (op operand)*)?
/// operand   := id | number
/// ```
///
/// Several comparison operators in a row form a comparison chain.
#[derive(Debug, Default)]
pub struct LineGrammar {
    pending: Vec<LocatedToken>,
    body: Vec<Stmt>,
}

impl LineGrammar {
    fn end_statement(&mut self) -> Result<(), LineGrammarError> {
        let tokens = std::mem::take(&mut self.pending);
        let Some((first, rest)) = tokens.split_first() else {
            return Ok(());
        };
        if first.kind() != TokenKind::Id {
            return Err(LineGrammarError::Unexpected(first.type_name()));
        }
        let target = Expr::identifier(first.text()).at(first.loc);
        let stmt = match rest {
            [] => Stmt::expression(target),
            [assign, value @ ..] if assign.kind() == TokenKind::Assign => {
                let value = expression(value)?;
                let loc = value.loc.map(|loc| first.loc.join(&loc));
                Stmt::assign(target, value).at(loc)
            }
            [other, ..] => return Err(LineGrammarError::Unexpected(other.type_name())),
        };
        let loc = stmt.loc.unwrap_or(first.loc);
        self.body.push(stmt.at(loc));
        Ok(())
    }
}

fn operand(token: &LocatedToken) -> Result<Expr, LineGrammarError> {
    let expr = match token.kind() {
        TokenKind::Id => Expr::identifier(token.text()),
        TokenKind::Number => Expr::literal(
            token
                .text()
                .parse::<f64>()
                .map_err(|_| LineGrammarError::Unexpected("number"))?,
        ),
        _ => return Err(LineGrammarError::Unexpected(token.type_name())),
    };
    Ok(expr.at(token.loc))
}

fn expression(tokens: &[LocatedToken]) -> Result<Expr, LineGrammarError> {
    let (first, rest) = tokens.split_first().ok_or(LineGrammarError::Incomplete)?;
    let mut operands = vec![operand(first)?];
    let mut operators = vec![];
    for pair in rest.chunks(2) {
        let [op, right] = pair else {
            return Err(LineGrammarError::Incomplete);
        };
        let operator = BinaryOperator::from_str(op.text())
            .map_err(|_| LineGrammarError::Unexpected(op.type_name()))?;
        operators.push(operator);
        operands.push(operand(right)?);
    }

    let loc = join(&operands);
    if operators.len() > 1 && operators.iter().all(BinaryOperator::is_comparison) {
        return Ok(Expr::new(ExprKind::CompareChain {
            expressions: operands,
            operators,
        })
        .at(loc));
    }
    let mut operands = operands.into_iter();
    let mut expr = operands.next().ok_or(LineGrammarError::Incomplete)?;
    for (operator, right) in operators.into_iter().zip(operands) {
        let loc = expr.loc.zip(right.loc).map(|(l, r)| l.join(&r));
        expr = Expr::binary(operator, expr, right).at(loc);
    }
    Ok(expr)
}

fn join(exprs: &[Expr]) -> Option<SourceLocation> {
    exprs
        .iter()
        .map(|expr| expr.loc)
        .reduce(|l, r| l.zip(r).map(|(l, r)| l.join(&r)))
        .flatten()
}

impl GrammarParser for LineGrammar {
    type Error = LineGrammarError;

    fn push(&mut self, token: LocatedToken) -> Result<(), Self::Error> {
        match token.kind() {
            TokenKind::Nl | TokenKind::Indent | TokenKind::Dedent => self.end_statement(),
            _ => {
                self.pending.push(token);
                Ok(())
            }
        }
    }

    fn finish(mut self) -> Result<Program, Self::Error> {
        self.end_statement()?;
        let loc = self
            .body
            .iter()
            .filter_map(|stmt| stmt.loc)
            .reduce(|l, r| l.join(&r));
        Ok(Program::new(self.body).at(loc))
    }
}
