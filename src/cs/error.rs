//! Error types shared by the coding algorithms.

use thiserror::Error;

/// Errors produced while generating or applying a prefix code.
#[derive(Debug, Error)]
pub enum Error {
    /// The byte source failed while it was being scanned.
    #[error("I/O error while reading input: {0}")]
    Io(#[from] std::io::Error),

    /// A query that needs a code was issued before one was generated.
    #[error("no code has been generated yet")]
    CodeNotGenerated,

    /// The byte at `position` was never seen while the code was generated.
    #[error("byte {byte:#04x} at position {position} has no codeword")]
    UnknownSymbol { byte: u8, position: usize },

    /// A bit string contained something other than '0' or '1'.
    #[error("invalid bit {found:?} at position {position}")]
    InvalidBit { found: char, position: usize },

    /// A bit string followed an edge that does not exist in the code tree.
    #[error("bit at position {position} does not follow any codeword")]
    InvalidCodeword { position: usize },
}

/// Result alias for operations that can fail with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
