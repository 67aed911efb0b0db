//! Identifier Codec Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An identifier codec error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for identifier codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A character outside the base-62 alphabet was encountered.
    #[display("invalid base-62 digit: {_0:?}")]
    InvalidDigit(#[error(not(source))] char),
    /// The decoded value does not fit in 64 bits.
    #[display("identifier overflows 64 bits")]
    Overflow,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The input is either a valid identifier or it's not.
        false
    }
}
