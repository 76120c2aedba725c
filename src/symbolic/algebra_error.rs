//! Error type shared by every part of the algebra engine.
use std::fmt;

/// All failures are local and permanent: they describe a property of the input, never a
/// transient condition, so none of them is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgebraError {
    /// unknown variable, negative exponent, dimension mismatch, missing substitution value,
    /// mismatched variable lists
    InvalidArgument(String),
    /// a denominator (or a dual-number value slot) evaluated to zero
    DivisionByZero(String),
    /// malformed expression text; `input` keeps the offending text
    Parse { input: String, message: String },
    /// an external literal could not be turned into an exact rational
    Coercion(String),
}

impl AlgebraError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        AlgebraError::InvalidArgument(msg.into())
    }
    pub fn division_by_zero(msg: impl Into<String>) -> Self {
        AlgebraError::DivisionByZero(msg.into())
    }
    pub fn parse(input: &str, message: impl Into<String>) -> Self {
        AlgebraError::Parse {
            input: input.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for AlgebraError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlgebraError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            AlgebraError::DivisionByZero(msg) => write!(f, "Division by zero: {}", msg),
            AlgebraError::Parse { input, message } => {
                write!(f, "Cannot parse expression '{}': {}", input, message)
            }
            AlgebraError::Coercion(msg) => write!(f, "Coercion failed: {}", msg),
        }
    }
}

impl std::error::Error for AlgebraError {}

pub type AlgebraResult<T> = Result<T, AlgebraError>;
