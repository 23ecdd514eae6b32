//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// the archive ends before a declared field
    #[error("archive truncated: needed {needed} more bytes but only {remaining} remain")]
    Truncated {
        /// bytes the next field requires
        needed: u64,
        /// bytes left in the stream
        remaining: u64,
    },

    /// entry path text is not valid UTF-16
    #[error("entry path is not valid UTF-16")]
    InvalidEncoding(#[from] std::string::FromUtf16Error),

    /// invalid entry path: {0}
    #[error("invalid entry path: {0}")]
    InvalidPath(String),

    /// duplicate entry path: {0}
    #[error("duplicate entry path: {0}")]
    DuplicatePath(String),

    /// a count or length exceeds its 4-byte field
    #[error("{field} does not fit in the archive's 4-byte length field")]
    SizeOverflow {
        /// which field overflowed
        field: &'static str,
    },

    /// unable to find requested file
    #[error("unable to find requested file")]
    FileNotFound(#[from] FileNotFoundError),
}

/// Error type to provide further information when a file has not been found
#[derive(Error, Diagnostic, Debug)]
pub enum FileNotFoundError {
    /// at index {0}
    #[error("at index {0}")]
    Index(usize),

    /// by name {0}
    #[error("by name {0}")]
    Name(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
