use super::error::{TransformError, TransformResult};
use defscript_ast::target::{
    self, Block, CatchClause, Expr, ExprKind, Program, Property, SourceType, Stmt, StmtKind,
    VariableDeclarator,
};
use defscript_ast::SourceLocation;
use indexmap::IndexSet;

/// The node kinds the target language can construct.
///
/// Every target node the engine builds goes through one of the constructors
/// here, which stamp its location and fail with
/// [UnsupportedNode](TransformError::UnsupportedNode) for kinds outside of the
/// vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    kinds: IndexSet<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::estree()
    }
}

impl Vocabulary {
    /// Every kind of the target tree
    pub fn estree() -> Self {
        Self::new(target::node_kinds())
    }

    pub fn new(kinds: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            kinds: kinds
                .into_iter()
                .map(|kind| kind.as_ref().to_string())
                .collect(),
        }
    }

    /// Removes a kind, modelling a more restricted target
    pub fn without(mut self, kind: impl AsRef<str>) -> Self {
        self.kinds.shift_remove(kind.as_ref());
        self
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.iter().map(String::as_str)
    }

    pub fn require(&self, kind: &str) -> TransformResult<()> {
        if self.contains(kind) {
            Ok(())
        } else {
            Err(TransformError::unsupported_node(kind))
        }
    }

    pub fn expr(&self, loc: Option<SourceLocation>, kind: ExprKind) -> TransformResult<Expr> {
        self.require((&kind).into())?;
        Ok(Expr::new(loc, kind))
    }

    pub fn stmt(&self, loc: Option<SourceLocation>, kind: StmtKind) -> TransformResult<Stmt> {
        self.require((&kind).into())?;
        Ok(Stmt::new(loc, kind))
    }

    pub fn identifier(
        &self,
        loc: Option<SourceLocation>,
        name: impl AsRef<str>,
    ) -> TransformResult<Expr> {
        self.expr(loc, ExprKind::Identifier(name.as_ref().to_string()))
    }

    /// The body of a block statement or function
    pub fn block(&self, loc: Option<SourceLocation>, body: Vec<Stmt>) -> TransformResult<Block> {
        self.require("BlockStatement")?;
        Ok(Block { loc, body })
    }

    pub fn property(
        &self,
        loc: Option<SourceLocation>,
        key: Expr,
        value: Expr,
        method: bool,
    ) -> TransformResult<Property> {
        self.require("Property")?;
        Ok(Property {
            loc,
            key,
            value,
            kind: Default::default(),
            method,
            shorthand: false,
            computed: false,
        })
    }

    pub fn declarator(
        &self,
        loc: Option<SourceLocation>,
        id: Expr,
        init: Option<Expr>,
    ) -> TransformResult<VariableDeclarator> {
        self.require("VariableDeclarator")?;
        Ok(VariableDeclarator { loc, id, init })
    }

    pub fn catch_clause(
        &self,
        loc: Option<SourceLocation>,
        param: Option<Expr>,
        body: Block,
    ) -> TransformResult<CatchClause> {
        self.require("CatchClause")?;
        Ok(CatchClause { loc, param, body })
    }

    pub fn program(
        &self,
        loc: Option<SourceLocation>,
        body: Vec<Stmt>,
        source_type: SourceType,
    ) -> TransformResult<Program> {
        self.require("Program")?;
        Ok(Program {
            loc,
            body,
            source_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estree_vocabulary() {
        let vocabulary = Vocabulary::estree();
        assert!(vocabulary.contains("ArrowFunctionExpression"));
        assert!(vocabulary.contains("Property"));
        assert!(!vocabulary.contains("CascadeStatement"));
        assert!(!vocabulary.contains("CompareChainExpression"));
    }

    #[test]
    fn test_constructors_stamp_location() {
        let vocabulary = Vocabulary::estree();
        let loc = SourceLocation::new(Default::default(), Default::default());
        let expr = vocabulary.identifier(Some(loc), "a").unwrap();
        assert_eq!(expr.loc, Some(loc));
        assert_eq!(expr.kind_name(), "Identifier");
    }

    #[test]
    fn test_removed_kind_is_unsupported() {
        let vocabulary = Vocabulary::estree().without("ThisExpression");
        assert_eq!(
            vocabulary.expr(None, ExprKind::This),
            Err(TransformError::unsupported_node("ThisExpression"))
        );
    }
}
