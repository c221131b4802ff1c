//! Error types for locating and reading `PSSH` boxes.

use thiserror::Error;

/// The errors that may occur when scanning an init segment.
#[derive(Debug, Error)]
pub enum Error {
    /// No `pssh` signature was found in the buffer.
    #[error("no pssh box found in {0} bytes of data")]
    BoxNotFound(usize),

    /// A `pssh` signature was found but the box around it is unusable.
    #[error("malformed pssh box at offset {offset}: {reason}")]
    MalformedBox { offset: usize, reason: String },

    /// Key id text is not 16 bytes of hex.
    #[error("invalid key id: {0}")]
    InvalidKeyId(String),

    /// Reading past the end of the buffer.
    #[error("cannot read {0}")]
    Read(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed<T: Into<String>>(offset: usize, reason: T) -> Self {
        Self::MalformedBox {
            offset,
            reason: reason.into(),
        }
    }

    /// Returns true if no `pssh` signature was present at all.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BoxNotFound(_))
    }
}
