//! Rendering of lowered programs

use defscript_ast::target::Program;

/// Renders a lowered program as text
pub trait Emitter {
    type Error: std::error::Error + Send + Sync + 'static;

    fn emit(&mut self, program: &Program) -> Result<String, Self::Error>;
}
