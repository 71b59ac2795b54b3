//! Error types for the Huffman coder.
//!
//! Two kinds of failure show up here. `EmptyAlphabet`, `WeightOverflow`, `NameTooLong` and the
//! persistence errors are ordinary runtime conditions a caller is expected to handle. `EmptyQueue`,
//! `UnknownSymbol` and `StreamCorruption` mean the tree, the code table or the packed
//! stream do not belong together; they end the operation and are logged as errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reading or writing the frequency (weight) log.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("weight log \"{}\" not found", .0.display())]
    NotFound(PathBuf),
    #[error("weight log \"{}\" could not be read: {}", .0.display(), .1)]
    Unreadable(PathBuf, #[source] io::Error),
    #[error("weight log \"{}\" could not be written: {}", .0.display(), .1)]
    Unwritable(PathBuf, #[source] io::Error),
}

impl PersistenceError {
    /// Sort an io::Error raised while reading `path` into NotFound or Unreadable.
    pub fn from_read(path: PathBuf, e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::NotFound {
            PersistenceError::NotFound(path)
        } else {
            PersistenceError::Unreadable(path, e)
        }
    }
}

#[derive(Error, Debug)]
pub enum HuffmanError {
    #[error("no bytes recorded, nothing to encode")]
    EmptyAlphabet,
    #[error("priority queue emptied before the tree was complete")]
    EmptyQueue,
    #[error("byte {0} has no entry in the code table")]
    UnknownSymbol(u8),
    #[error("corrupt stream at bit {bit}: {reason}")]
    StreamCorruption { bit: usize, reason: &'static str },
    /// Frequency counts whose total does not fit in a u64.
    #[error("frequency counts add up to more than {}", u64::MAX)]
    WeightOverflow,
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("coder name is {len} bytes, the limit is {max}")]
    NameTooLong { len: usize, max: usize },
    /// A code table (or decompression) was requested before the tree was built.
    #[error("huffman tree has not been built")]
    TreeNotBuilt,
    #[error("code table has not been built")]
    CodeTableNotBuilt,
}

impl HuffmanError {
    /// True for errors that signal a broken invariant rather than a normal runtime condition.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            HuffmanError::EmptyQueue
                | HuffmanError::UnknownSymbol(_)
                | HuffmanError::StreamCorruption { .. }
        )
    }
}

/// The binary reports everything as an io::Error, like the rest of its file handling.
impl From<HuffmanError> for io::Error {
    fn from(e: HuffmanError) -> Self {
        let kind = match &e {
            HuffmanError::Persistence(PersistenceError::NotFound(_)) => io::ErrorKind::NotFound,
            HuffmanError::StreamCorruption { .. } | HuffmanError::UnknownSymbol(_) => {
                io::ErrorKind::InvalidData
            }
            HuffmanError::NameTooLong { .. } | HuffmanError::WeightOverflow => {
                io::ErrorKind::InvalidInput
            }
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, e.to_string())
    }
}
