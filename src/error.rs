//! Error types for alignment construction, queries, and persistence.
//!
//! A plain hand-written `Display`/`Error` rather than a derive-macro error
//! crate: every kind is a plain enum variant, `Display` spells it out in
//! prose, and `std::error::Error::source` forwards to the wrapped I/O error
//! where there is one.

use core::fmt;

#[cfg(not(any(test, feature = "std")))]
use alloc::string::String;

/// Errors produced while building, querying, or persisting an alignment.
#[derive(Debug)]
pub enum Error {
    /// The input path does not exist.
    InputNotFound { path: String },

    /// A FASTA record could not be parsed (missing header, empty record,
    /// invalid UTF-8 in a position the adapter must interpret, etc).
    FormatInvalid { reason: String },

    /// A record's length did not match the alignment's column count `L`,
    /// or a record ended before `position + B'` while building a batch.
    LengthMismatch {
        record: usize,
        expected: usize,
        found: usize,
    },

    /// `get(row)` or `cell(row, col)` was called with an out-of-range index.
    IndexOutOfRange { index: usize, len: usize },

    /// A read or write to the persistence layer failed. Only constructible
    /// with `std`, since there is no persistence layer without file I/O.
    #[cfg(any(test, feature = "std"))]
    PersistIo {
        context: String,
        source: std::io::Error,
    },

    /// A symbol outside `{A, C, G, T, U, N, -}` was encountered. Only
    /// constructed when strict-alphabet mode is enabled; in the default
    /// lenient mode the byte is stored as-is and no error is raised.
    SymbolNonCanonical { symbol: u8, row: usize, column: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputNotFound { path } => write!(f, "input not found: {path}"),
            Self::FormatInvalid { reason } => write!(f, "invalid FASTA format: {reason}"),
            Self::LengthMismatch {
                record,
                expected,
                found,
            } => write!(
                f,
                "record {record} has length {found}, expected {expected}"
            ),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            #[cfg(any(test, feature = "std"))]
            Self::PersistIo { context, source } => {
                write!(f, "persistence I/O error ({context}): {source}")
            }
            Self::SymbolNonCanonical { symbol, row, column } => write!(
                f,
                "non-canonical symbol {:?} at row {row}, column {column}",
                *symbol as char
            ),
        }
    }
}

#[cfg(any(test, feature = "std"))]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PersistIo { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Error {
    #[cfg(any(test, feature = "std"))]
    pub(crate) fn persist_io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::PersistIo {
            context: context.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
