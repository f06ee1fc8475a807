use super::template::TemplateKind;
use defscript_ast::SourceLocation;

/// An error aborting a transform pass
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("no target equivalent for node kind {kind}")]
    UnsupportedNode { kind: String },
    #[error("{kind} transformation cannot expand into several nodes here")]
    InvalidExpansion { kind: &'static str },
    #[error("invalid {kind} template")]
    InvalidTemplate { kind: TemplateKind },
    #[error("could not parse template:\n{message}")]
    TemplateSyntax { message: String },
    #[error("template placeholder {name:?} has no binding")]
    UnboundPlaceholder { name: String },
    #[error("malformed cascade: {reason}")]
    MalformedCascade {
        reason: String,
        loc: Option<SourceLocation>,
    },
    #[error("malformed {kind}: {reason}")]
    MalformedNode { kind: &'static str, reason: String },
    #[error("operator {operator} has no target equivalent")]
    UnsupportedOperator { operator: String },
    #[error("transformer for {kind} not fully implemented: {what}")]
    NotImplemented { kind: &'static str, what: String },
    #[error("scope stack discipline violated: {0}")]
    StackDiscipline(&'static str),
}

impl TransformError {
    pub fn unsupported_node(kind: impl AsRef<str>) -> Self {
        Self::UnsupportedNode {
            kind: kind.as_ref().to_string(),
        }
    }

    /// The source location the error points at, if it carries one
    pub fn loc(&self) -> Option<SourceLocation> {
        match self {
            TransformError::MalformedCascade { loc, .. } => *loc,
            _ => None,
        }
    }
}

pub type TransformResult<T> = Result<T, TransformError>;
