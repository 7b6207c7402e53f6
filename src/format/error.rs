//! Error types for label and class file operations.

use thiserror::Error;

/// Errors that can occur while reading or writing annotation files.
///
/// Decoding itself never fails: malformed lines are dropped individually.
/// Only the surrounding file I/O can error.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PartialEq for FormatError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
        }
    }
}
