//! The state of a single lowering pass, and the view registered transformers
//! get of it.

use super::error::{TransformError, TransformResult};
use super::expansion::Expansion;
use super::frame::{Frame, FrameTag};
use super::template::TemplateCache;
use super::vocabulary::Vocabulary;
use super::{cascade, expressions, functions, statements, structural};
use defscript_ast::source;
use defscript_ast::target::{
    AssignmentOperator, Block, CatchClause, Expr, ExprKind, Program, Property, SourceType, Stmt,
    StmtKind, VariableDeclarator,
};
use defscript_ast::SourceLocation;
use std::collections::HashSet;
use tracing::{debug, trace};

/// A single lowering pass over one compilation unit
pub(crate) struct Pass<'e> {
    vocabulary: &'e Vocabulary,
    templates: &'e mut TemplateCache,
    frames: Vec<Frame>,
    reserved: HashSet<String>,
}

impl<'e> Pass<'e> {
    pub fn new(
        vocabulary: &'e Vocabulary,
        templates: &'e mut TemplateCache,
        reserved: HashSet<String>,
    ) -> Self {
        Self {
            vocabulary,
            templates,
            frames: vec![],
            reserved,
        }
    }

    /// Lowers a whole program under a root scope
    pub fn program(&mut self, program: source::Program) -> TransformResult<Program> {
        let source::Program { loc, body } = program;
        self.invoke(loc, "Program", |cx| {
            cx.push(Frame::scope(true))?;
            let body = statements::body(cx, body)?;
            cx.program(body)
        })
    }

    /// Ends the pass, checking that every frame was popped
    pub fn finish(self) -> TransformResult<()> {
        if self.frames.is_empty() {
            Ok(())
        } else {
            Err(TransformError::StackDiscipline(
                "frames left on the stack at the end of the pass",
            ))
        }
    }

    /// Runs a transformer for a node of the given kind. A frame the
    /// transformer pushed and did not pop is popped once it returns.
    fn invoke<T>(
        &mut self,
        loc: Option<SourceLocation>,
        kind: &'static str,
        transformer: impl FnOnce(&mut Context<'_, 'e>) -> TransformResult<T>,
    ) -> TransformResult<T> {
        let mut cx = Context {
            pass: self,
            loc,
            kind,
            pushed: false,
        };
        let result = transformer(&mut cx);
        if cx.pushed {
            trace!("popping frame left by {kind}");
            cx.pass.frames.pop();
        }
        result
    }

    fn expr(&mut self, expr: source::Expr) -> TransformResult<Expr> {
        let source::Expr { loc, kind } = expr;
        let name: &'static str = (&kind).into();
        self.invoke(loc, name, |cx| match kind {
            source::ExprKind::Binary {
                operator,
                left,
                right,
            } => expressions::binary(cx, operator, *left, *right),
            source::ExprKind::CompareChain {
                expressions,
                operators,
            } => expressions::compare_chain(cx, expressions, operators),
            source::ExprKind::Function(function) => functions::function(cx, *function),
            source::ExprKind::VirtualObject => cascade::virtual_object(cx),
            other => structural::pass_expr(cx, other),
        })
    }

    fn stmt(&mut self, stmt: source::Stmt) -> TransformResult<Expansion<Stmt>> {
        let source::Stmt { loc, kind } = stmt;
        let name: &'static str = (&kind).into();
        self.invoke(loc, name, |cx| match kind {
            source::StmtKind::Block(block) => statements::block(cx, block),
            source::StmtKind::VariableDeclaration(declarators) => {
                statements::variable_declaration(cx, declarators)
            }
            source::StmtKind::FunctionDeclaration { id, value } => {
                statements::function_declaration(cx, id, value)
            }
            source::StmtKind::Assignment {
                operator,
                left,
                right,
            } => statements::assignment(cx, operator, left, right),
            source::StmtKind::Cascade {
                root,
                statements,
                degrees,
            } => cascade::cascade(cx, root, statements, degrees),
            source::StmtKind::Yield(argument) => statements::yield_statement(cx, argument),
            other => structural::pass_stmt(cx, other).map(Expansion::Single),
        })
    }

    fn property(&mut self, property: source::Property) -> TransformResult<Property> {
        let source::Property { loc, kind } = property;
        let name: &'static str = (&kind).into();
        self.invoke(loc, name, |cx| match kind {
            source::PropertyKind::Assignment { key, value } => {
                let key = cx.transform_expr(key)?;
                let value = cx.transform_expr(value)?;
                cx.property(key, value, false)
            }
            source::PropertyKind::Method { id, definition } => {
                let key = cx.transform_expr(id)?;
                let method = !definition.bound.unwrap_or(false);
                cx.push(Frame::Method)?;
                let value = cx.transform_function(definition)?;
                cx.pop()?;
                cx.property(key, value, method)
            }
        })
    }
}

/// What a transformer sees of the pass while lowering one node.
///
/// Nodes built through a context are stamped with the location of the node
/// being lowered.
pub(crate) struct Context<'p, 'e> {
    pass: &'p mut Pass<'e>,
    loc: Option<SourceLocation>,
    kind: &'static str,
    pushed: bool,
}

impl<'p, 'e> Context<'p, 'e> {
    /// The location of the node being lowered
    pub fn loc(&self) -> Option<SourceLocation> {
        self.loc
    }

    /// The kind name of the node being lowered
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn transform_expr(&mut self, expr: source::Expr) -> TransformResult<Expr> {
        self.pass.expr(expr)
    }

    pub fn transform_exprs(
        &mut self,
        exprs: impl IntoIterator<Item = source::Expr>,
    ) -> TransformResult<Vec<Expr>> {
        exprs
            .into_iter()
            .map(|expr| self.transform_expr(expr))
            .collect()
    }

    pub fn transform_stmt(&mut self, stmt: source::Stmt) -> TransformResult<Expansion<Stmt>> {
        self.pass.stmt(stmt)
    }

    fn transform_single(&mut self, stmt: source::Stmt) -> TransformResult<Stmt> {
        let kind = stmt.kind_name();
        match self.transform_stmt(stmt)?.normalize() {
            Expansion::Single(stmt) => Ok(stmt),
            Expansion::Spread(_) => Err(TransformError::InvalidExpansion { kind }),
        }
    }

    /// Transforms a list of statements. Unless `spread` is set, every
    /// statement must lower to exactly one statement.
    pub fn transform_all(
        &mut self,
        stmts: impl IntoIterator<Item = source::Stmt>,
        spread: bool,
    ) -> TransformResult<Vec<Stmt>> {
        let mut lowered = vec![];
        for stmt in stmts {
            if spread {
                lowered.extend(self.transform_stmt(stmt)?);
            } else {
                lowered.push(self.transform_single(stmt)?);
            }
        }
        Ok(lowered)
    }

    /// Transforms a block under a scope of its own
    pub fn transform_block(&mut self, block: source::Block) -> TransformResult<Block> {
        let source::Block { loc, body } = block;
        let loc = loc.or(self.loc);
        self.pass.invoke(loc, "BlockStatement", |cx| {
            cx.push(Frame::scope(false))?;
            let body = statements::body(cx, body)?;
            cx.block(body)
        })
    }

    pub fn transform_function(&mut self, function: source::Function) -> TransformResult<Expr> {
        let loc = function.loc.or(self.loc);
        self.pass
            .invoke(loc, "Function", |cx| functions::function(cx, function))
    }

    pub fn transform_property(&mut self, property: source::Property) -> TransformResult<Property> {
        self.pass.property(property)
    }

    /// Pushes this transformer's frame
    pub fn push(&mut self, frame: Frame) -> TransformResult<()> {
        if self.pushed {
            return Err(TransformError::StackDiscipline(
                "a transformer may only push one frame at a time",
            ));
        }
        trace!("{} pushed {} frame", self.kind, frame.tag());
        self.pass.frames.push(frame);
        self.pushed = true;
        Ok(())
    }

    /// Pops the frame this transformer pushed
    pub fn pop(&mut self) -> TransformResult<Frame> {
        if !self.pushed {
            return Err(TransformError::StackDiscipline("pop without a matching push"));
        }
        self.pushed = false;
        let frame = self
            .pass
            .frames
            .pop()
            .ok_or(TransformError::StackDiscipline("frame stack is empty"))?;
        trace!("{} popped {} frame", self.kind, frame.tag());
        Ok(frame)
    }

    /// The frame this transformer pushed
    pub fn own_frame_mut(&mut self) -> TransformResult<&mut Frame> {
        if !self.pushed {
            return Err(TransformError::StackDiscipline(
                "no frame pushed by this transformer",
            ));
        }
        self.pass
            .frames
            .last_mut()
            .ok_or(TransformError::StackDiscipline("frame stack is empty"))
    }

    /// Finds the nearest frame with the given tag that passes `filter`. The
    /// search gives up at the first frame that trips `breaker`.
    pub fn context(
        &self,
        tag: FrameTag,
        filter: impl Fn(&Frame) -> bool,
        breaker: impl Fn(&Frame) -> bool,
    ) -> Option<&Frame> {
        for frame in self.pass.frames.iter().rev() {
            if frame.tag() == tag && filter(frame) {
                return Some(frame);
            }
            if breaker(frame) {
                return None;
            }
        }
        None
    }

    /// Mints a name that is not used anywhere in the compilation unit, and
    /// declares it in the nearest scope
    pub fn fresh_name(&mut self, prefix: &str) -> TransformResult<String> {
        let Pass {
            frames, reserved, ..
        } = &mut *self.pass;
        let vars = frames
            .iter_mut()
            .rev()
            .find_map(|frame| match frame {
                Frame::Scope { vars, .. } => Some(vars),
                _ => None,
            })
            .ok_or(TransformError::StackDiscipline(
                "fresh name requested outside of any scope",
            ))?;
        let mut n = 1usize;
        let name = loop {
            let candidate = format!("{prefix}${n}");
            if !reserved.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        debug!("minted {name:?} for {}", self.kind);
        reserved.insert(name.clone());
        vars.insert(name.clone());
        Ok(name)
    }

    /// Compiles (once) and instantiates an expression template
    pub fn expression(
        &mut self,
        template: &str,
        bindings: &[(&str, Expr)],
    ) -> TransformResult<Expr> {
        let template = self.pass.templates.get_or_compile(template)?;
        template.expression(bindings, self.pass.vocabulary, self.loc)
    }

    pub fn not_implemented(&self, what: impl Into<String>) -> TransformError {
        TransformError::NotImplemented {
            kind: self.kind,
            what: what.into(),
        }
    }

    pub fn require(&self, kind: &str) -> TransformResult<()> {
        self.pass.vocabulary.require(kind)
    }

    pub fn expr(&self, kind: ExprKind) -> TransformResult<Expr> {
        self.pass.vocabulary.expr(self.loc, kind)
    }

    pub fn stmt(&self, kind: StmtKind) -> TransformResult<Stmt> {
        self.pass.vocabulary.stmt(self.loc, kind)
    }

    pub fn identifier(&self, name: impl AsRef<str>) -> TransformResult<Expr> {
        self.pass.vocabulary.identifier(self.loc, name)
    }

    /// `left = right`
    pub fn assign(&self, left: Expr, right: Expr) -> TransformResult<Expr> {
        self.expr(ExprKind::Assignment {
            operator: AssignmentOperator::Assign,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn block(&self, body: Vec<Stmt>) -> TransformResult<Block> {
        self.pass.vocabulary.block(self.loc, body)
    }

    pub fn property(&self, key: Expr, value: Expr, method: bool) -> TransformResult<Property> {
        self.pass.vocabulary.property(self.loc, key, value, method)
    }

    pub fn declarator(
        &self,
        loc: Option<SourceLocation>,
        id: Expr,
        init: Option<Expr>,
    ) -> TransformResult<VariableDeclarator> {
        self.pass.vocabulary.declarator(loc.or(self.loc), id, init)
    }

    pub fn catch_clause(
        &self,
        loc: Option<SourceLocation>,
        param: Option<Expr>,
        body: Block,
    ) -> TransformResult<CatchClause> {
        self.pass.vocabulary.catch_clause(loc.or(self.loc), param, body)
    }

    pub fn program(&self, body: Vec<Stmt>) -> TransformResult<Program> {
        self.pass
            .vocabulary
            .program(self.loc, body, SourceType::Script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use defscript_ast::source::{Expr as SrcExpr, Stmt as SrcStmt, StmtKind as SrcStmtKind};
    use test_log::test;

    fn with_pass<T>(f: impl FnOnce(&mut Pass) -> T) -> T {
        let vocabulary = Vocabulary::default();
        let mut templates = TemplateCache::new();
        let mut pass = Pass::new(&vocabulary, &mut templates, HashSet::new());
        f(&mut pass)
    }

    fn cascade() -> SrcStmt {
        let step = SrcStmt::expression(SrcExpr::call(
            SrcExpr::member(SrcExpr::new(source::ExprKind::VirtualObject), "fill"),
            [],
        ));
        SrcStmt::new(SrcStmtKind::Cascade {
            root: SrcExpr::identifier("canvas"),
            statements: vec![step],
            degrees: vec![1],
        })
    }

    #[test]
    fn test_push_twice() {
        with_pass(|pass| {
            let result = pass.invoke(None, "Test", |cx| {
                cx.push(Frame::Method)?;
                cx.push(Frame::Method)
            });
            assert!(matches!(result, Err(TransformError::StackDiscipline(_))));
            assert!(pass.frames.is_empty(), "frame left by the transformer is popped");
        });
    }

    #[test]
    fn test_pop_without_push() {
        with_pass(|pass| {
            pass.frames.push(Frame::scope(true));
            let result = pass.invoke(None, "Test", |cx| cx.pop());
            assert!(matches!(result, Err(TransformError::StackDiscipline(_))));
            assert_eq!(pass.frames.len(), 1, "outer frame is untouched");
        });
    }

    #[test]
    fn test_own_frame_without_push() {
        with_pass(|pass| {
            let result = pass.invoke(None, "Test", |cx| cx.own_frame_mut().map(|_| ()));
            assert!(matches!(result, Err(TransformError::StackDiscipline(_))));
        });
    }

    #[test]
    fn test_finish_with_frames_left() {
        let vocabulary = Vocabulary::default();
        let mut templates = TemplateCache::new();
        let mut pass = Pass::new(&vocabulary, &mut templates, HashSet::new());
        pass.frames.push(Frame::Method);
        assert!(matches!(
            pass.finish(),
            Err(TransformError::StackDiscipline(_))
        ));
    }

    #[test]
    fn test_fresh_name_outside_scope() {
        with_pass(|pass| {
            let result = pass.invoke(None, "Test", |cx| cx.fresh_name("_temp"));
            assert!(matches!(result, Err(TransformError::StackDiscipline(_))));
        });
    }

    #[test]
    fn test_transform_all_spreads() {
        with_pass(|pass| {
            let lowered = pass
                .invoke(None, "Test", |cx| {
                    cx.push(Frame::scope(true))?;
                    cx.transform_all([cascade(), SrcStmt::new(SrcStmtKind::Break)], true)
                })
                .unwrap();
            let kinds = lowered.iter().map(Stmt::kind_name).collect::<Vec<_>>();
            assert_eq!(
                kinds,
                ["ExpressionStatement", "ExpressionStatement", "BreakStatement"]
            );
        });
    }

    #[test]
    fn test_transform_all_rejects_expansion() {
        with_pass(|pass| {
            let result = pass.invoke(None, "Test", |cx| {
                cx.push(Frame::scope(true))?;
                cx.transform_all([SrcStmt::new(SrcStmtKind::Break), cascade()], false)
            });
            assert_eq!(
                result,
                Err(TransformError::InvalidExpansion {
                    kind: "CascadeStatement"
                })
            );
        });
    }

    #[test]
    fn test_context_stops_at_breaker() {
        with_pass(|pass| {
            pass.frames.push(Frame::Method);
            pass.frames.push(Frame::scope(false));
            let found = pass.invoke(None, "Test", |cx| {
                let through = cx.context(FrameTag::Method, |_| true, |_| false).is_some();
                let blocked = cx
                    .context(FrameTag::Method, |_| true, |frame| frame.tag() == FrameTag::Scope)
                    .is_some();
                Ok((through, blocked))
            });
            assert_eq!(found, Ok((true, false)));
        });
    }
}
