use defscript_ast::source::{Expr, Program, Stmt};
use defscript_ast::target::{self, ExprKind, StmtKind};
use defscript_parsing::parser::{GrammarParser, LocatedToken};
use defscript_tokens::token::TokenKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn target_dir() -> PathBuf {
    let target = Path::new(env!("CARGO_TARGET_TMPDIR"));
    let buf = target.join(format!(
        "target-{:?}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos()
    ));
    std::fs::create_dir_all(&buf).expect("could not create directory");
    buf
}

#[derive(Debug, thiserror::Error)]
#[error("unexpected {0}")]
pub struct Unexpected(pub &'static str);

/// Lines of `id` or `id = id`
#[derive(Debug, Default)]
pub struct Assignments {
    line: Vec<LocatedToken>,
    body: Vec<Stmt>,
}

impl Assignments {
    fn end_line(&mut self) -> Result<(), Unexpected> {
        let line = std::mem::take(&mut self.line);
        let ident = |token: &LocatedToken| Expr::identifier(token.text()).at(token.loc);
        let stmt = match line.as_slice() {
            [] => return Ok(()),
            [name] if name.kind() == TokenKind::Id => Stmt::expression(ident(name)).at(name.loc),
            [left, eq, right]
                if left.kind() == TokenKind::Id
                    && eq.kind() == TokenKind::Assign
                    && right.kind() == TokenKind::Id =>
            {
                Stmt::assign(ident(left), ident(right)).at(left.loc.join(&right.loc))
            }
            [.., last] => return Err(Unexpected(last.type_name())),
        };
        self.body.push(stmt);
        Ok(())
    }
}

impl GrammarParser for Assignments {
    type Error = Unexpected;

    fn push(&mut self, token: LocatedToken) -> Result<(), Self::Error> {
        if token.kind() == TokenKind::Nl {
            self.end_line()
        } else {
            self.line.push(token);
            Ok(())
        }
    }

    fn finish(mut self) -> Result<Program, Self::Error> {
        self.end_line()?;
        Ok(Program::new(self.body))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("cannot emit {0}")]
pub struct CannotEmit(pub &'static str);

/// Renders identifiers and assignments, one statement per line
#[derive(Debug, Default)]
pub struct LineEmitter;

impl LineEmitter {
    fn expr(expr: &target::Expr) -> Result<String, CannotEmit> {
        match &expr.kind {
            ExprKind::Identifier(name) => Ok(name.clone()),
            ExprKind::Assignment {
                operator,
                left,
                right,
            } => Ok(format!(
                "{} {operator} {}",
                Self::expr(left)?,
                Self::expr(right)?
            )),
            _ => Err(CannotEmit(expr.kind_name())),
        }
    }
}

impl defscriptc::emitter::Emitter for LineEmitter {
    type Error = CannotEmit;

    fn emit(&mut self, program: &target::Program) -> Result<String, Self::Error> {
        let mut out = String::new();
        for stmt in &program.body {
            match &stmt.kind {
                StmtKind::Expression(expr) => {
                    out.push_str(&Self::expr(expr)?);
                    out.push_str(";\n");
                }
                _ => return Err(CannotEmit(stmt.kind_name())),
            }
        }
        Ok(out)
    }
}
