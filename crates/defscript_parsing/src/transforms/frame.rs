use indexmap::IndexSet;

/// A frame of the scope stack.
///
/// Frames live exactly as long as the transformation of the node that pushed
/// them.
#[derive(Debug, Clone, PartialEq, strum::EnumDiscriminants)]
#[strum_discriminants(name(FrameTag), derive(Hash, strum::Display))]
pub enum Frame {
    /// A lexical scope collecting the names to declare at its top
    Scope { vars: IndexSet<String>, root: bool },
    /// The receivers of a cascade, innermost last
    Cascade { receivers: Vec<String> },
    /// The definition of a method
    Method,
}

impl Frame {
    pub fn scope(root: bool) -> Self {
        Frame::Scope {
            vars: IndexSet::new(),
            root,
        }
    }

    pub fn cascade(root: impl Into<String>) -> Self {
        Frame::Cascade {
            receivers: vec![root.into()],
        }
    }

    pub fn tag(&self) -> FrameTag {
        self.into()
    }
}
