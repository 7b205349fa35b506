//! Errors returned by `LinkedHashTable` operations.

use thiserror::Error;

/// Recoverable failures of table operations. A failed operation never
/// mutates the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// An argument cannot be stored: keys and values are C-string-like and
    /// must not contain an interior NUL byte.
    #[error("invalid argument: {what} contains a NUL byte")]
    InvalidArgument { what: &'static str },
    /// The key is not present in any generation.
    #[error("key not found")]
    NotFound,
}

/// Reject strings the table cannot represent.
pub(crate) fn check_arg(what: &'static str, s: &str) -> Result<(), TableError> {
    if s.as_bytes().contains(&0) {
        return Err(TableError::InvalidArgument { what });
    }
    Ok(())
}
