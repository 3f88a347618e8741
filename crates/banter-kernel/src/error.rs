//! Command error taxonomy.
//!
//! Every handler failure is a value of this enum. The executor renders it
//! as one `ERROR: {message}` output line; nothing here is fatal to the
//! process.

use thiserror::Error;

/// A command that matched a grammar rule but failed inside its handler.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// Outer shape matched, inner structural sub-pattern did not.
    #[error("Invalid {0}")]
    Syntax(&'static str),

    /// Malformed bracketed array literal.
    #[error("Invalid array literal")]
    BadArrayLiteral,

    /// The pattern argument of the string `remove` did not compile.
    #[error("Invalid pattern '{0}'")]
    BadPattern(String),

    /// Array operation on a non-list variable (unquoted spelling).
    #[error("{0} is not an array")]
    NotAnArrayBare(String),

    /// Array operation on a non-list variable.
    #[error("'{0}' is not an array")]
    NotAnArray(String),

    /// String operation on a non-text variable.
    #[error("'{0}' is not a string")]
    NotAString(String),

    /// Referenced variable does not exist.
    #[error("Variable '{0}' not defined")]
    UndefinedVariable(String),

    /// List element removal target was absent.
    #[error("'{0}' not found in '{1}'")]
    NotFoundIn(String, String),

    /// Guarded divide-by-zero in the uppercase DIVIDE command.
    #[error("Division by zero")]
    DivisionByZero,

    /// Numeric argument failed to parse.
    #[error("Invalid input for {0}")]
    BadNumber(&'static str),

    /// Numeric argument outside the function's domain.
    #[error("{0} is not defined for negative numbers")]
    NegativeInput(&'static str),

    /// Input magnitude or recursion depth above the configured bound.
    #[error("{what} limit exceeded (max {max})")]
    LimitExceeded { what: &'static str, max: u64 },

    /// The generic word dispatched to nothing.
    #[error("Unsupported action")]
    Unsupported,
}
