//! Error types for URI template compilation.

use thiserror::Error;

/// Result type alias for URI template operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error returned when a URI template pattern cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An opening brace was never closed.
    #[error("unclosed expression starting at offset {offset}")]
    UnclosedExpression { offset: usize },
    /// A closing brace appeared outside of an expression.
    #[error("unexpected '}}' at offset {offset}")]
    UnexpectedClosingBrace { offset: usize },
    /// An expression contained no variables.
    #[error("empty expression at offset {offset}")]
    EmptyExpression { offset: usize },
    /// A variable name contained characters outside `[A-Za-z0-9_.]`.
    #[error("invalid variable name '{name}'")]
    InvalidVariableName { name: String },
    /// The expression operator is valid RFC 6570 but not supported here.
    #[error("unsupported expression operator '{operator}'")]
    UnsupportedOperator { operator: char },
    /// Prefix (`:n`) and explode (`*`) modifiers are not supported.
    #[error("unsupported modifier on variable '{name}'")]
    UnsupportedModifier { name: String },
}
