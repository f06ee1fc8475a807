//! Operators whose spelling and meaning are the same in both trees

/// A prefix unary operator
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::AsRefStr, strum::Display,
)]
pub enum UnaryOperator {
    #[strum(serialize = "-")]
    Neg,
    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = "!")]
    Not,
    #[strum(serialize = "~")]
    BitNot,
    #[strum(serialize = "typeof")]
    TypeOf,
    #[strum(serialize = "void")]
    Void,
    #[strum(serialize = "delete")]
    Delete,
}

/// A short-circuiting operator
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::AsRefStr, strum::Display,
)]
pub enum LogicalOperator {
    #[strum(serialize = "&&")]
    And,
    #[strum(serialize = "||")]
    Or,
}
