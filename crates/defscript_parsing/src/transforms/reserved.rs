use defscript_ast::source::Program;
use defscript_ast::visit::Visit;
use std::collections::HashSet;
use std::convert::Infallible;

/// Collects every identifier name appearing in a tree
#[derive(Debug, Default)]
pub struct ReservedNames {
    names: HashSet<String>,
}

impl ReservedNames {
    pub fn collect(program: &Program) -> HashSet<String> {
        let mut reserved = Self::default();
        match reserved.visit_program(program) {
            Ok(()) => reserved.names,
            Err(never) => match never {},
        }
    }
}

impl Visit for ReservedNames {
    type Err = Infallible;

    fn visit_identifier(&mut self, name: &str) -> Result<(), Self::Err> {
        if !self.names.contains(name) {
            self.names.insert(name.to_string());
        }
        Ok(())
    }
}
