//! Lowering of the defscript source tree into the estree target tree.
//!
//! Every node kind has a transformer. Kinds that only exist in defscript, or
//! whose meaning changes on the way, have a registered transformer of their
//! own; every other kind is copied structurally into the target kind of the
//! same name. Target nodes are only ever built through a [Vocabulary], so a
//! kind the target does not have is reported as
//! [TransformError::UnsupportedNode] and nothing is produced.
//!
//! The pass keeps a stack of [Frame]s. Scopes collect the names minted while
//! lowering them and declare them at their top, cascades track their
//! receivers, and methods mark where functions stop capturing `this`.

use defscript_ast::{source, target};
use reserved::ReservedNames;
use tracing::debug;

mod cascade;
mod context;
mod error;
mod expansion;
mod expressions;
mod frame;
mod functions;
mod reserved;
mod statements;
mod structural;
mod template;
mod vocabulary;

pub use error::{TransformError, TransformResult};
pub use expansion::Expansion;
pub use frame::{Frame, FrameTag};
pub use template::{Template, TemplateCache, TemplateKind};
pub use vocabulary::Vocabulary;

/// Prefix of the names cascade roots are stored in
pub const ROOT_PREFIX: &str = "_root";
/// Prefix of the names nested cascade receivers are stored in
pub const CASCADE_PREFIX: &str = "_cascade";
/// Prefix of the names inner operands of comparison chains are stored in
pub const TEMP_PREFIX: &str = "_temp";

/// Lowers source programs into a target vocabulary.
///
/// Templates compiled while lowering one program are kept for the next.
#[derive(Debug, Default)]
pub struct TransformEngine {
    vocabulary: Vocabulary,
    templates: TemplateCache,
}

impl TransformEngine {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            templates: TemplateCache::new(),
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The number of distinct templates compiled so far
    pub fn compiled_templates(&self) -> usize {
        self.templates.len()
    }

    /// Lowers a program
    pub fn transform(&mut self, program: source::Program) -> TransformResult<target::Program> {
        let reserved = ReservedNames::collect(&program);
        debug!(
            "lowering program of {} statements, {} names reserved",
            program.body.len(),
            reserved.len()
        );
        let mut pass = context::Pass::new(&self.vocabulary, &mut self.templates, reserved);
        let program = pass.program(program)?;
        pass.finish()?;
        Ok(program)
    }
}

/// Lowers a program into the full estree vocabulary
pub fn transform(program: source::Program) -> TransformResult<target::Program> {
    TransformEngine::default().transform(program)
}
