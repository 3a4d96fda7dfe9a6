//! Errors raised by rational construction, parsing and division.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, RatioError>;

/// Errors produced by [`Ratio`](crate::Ratio) operations.
///
/// Arithmetic other than division, comparison, formatting and hashing never
/// fail on well-formed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatioError {
    /// The text was not a `N` or `N/D` integer literal pair.
    #[error("could not parse the string \"{input}\" as a valid rational number")]
    Parse { input: String },

    /// The divisor of a division was zero.
    #[error("divide by zero")]
    DivideByZero,

    /// A numerator/denominator pair had a zero denominator.
    #[error("zero denominator")]
    ZeroDenominator,

    /// A NaN or infinite float cannot be represented exactly.
    #[error("cannot represent {kind} as a rational number")]
    NonFinite { kind: &'static str },

    /// The value does not fit the target fixed-width backend.
    #[error("integer value does not fit the target backend")]
    Overflow,
}

impl RatioError {
    pub(crate) fn parse(input: &str) -> Self {
        RatioError::Parse {
            input: input.to_owned(),
        }
    }
}
