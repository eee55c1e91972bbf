//! Error types for unable-aifc

use crate::codec::ChunkId;

/// Errors that can occur while reading, decrypting or writing an AIFF/AIFC file.
///
/// Every variant is fatal for the file being processed.
#[derive(Debug, thiserror::Error)]
pub enum AifcError {
    /// The outer chunk is not a `FORM` chunk
    #[error("this does not seem to be an AIFC file (outer chunk is '{0}', expected 'FORM')")]
    NotAnAifcFile(ChunkId),

    /// The form type is neither `AIFC` nor `AIFF`
    #[error("form type '{0}' is not AIFC or AIFF")]
    UnsupportedFormType(ChunkId),

    /// A sub-chunk has a negative size or reaches past its parent's data region
    #[error(
        "invalid data while parsing chunks: '{id}' at offset {start} declares {size} bytes, parent ends at {limit}"
    )]
    ChunkBoundsViolation {
        id: ChunkId,
        start: u64,
        size: i64,
        limit: u64,
    },

    /// A chunk's declared size does not fit the layout of its body
    #[error("malformed '{id}' chunk: {reason}")]
    MalformedChunk { id: ChunkId, reason: String },

    /// The Common chunk declares a compression type other than `able` or `NONE`
    #[error("unsupported compression type '{0}', only able and NONE are supported")]
    UnsupportedCompression(ChunkId),

    /// A chunk the compression type depends on is absent
    #[error("required '{0}' chunk is missing")]
    MissingChunk(ChunkId),

    /// The stream ended before a fixed-width read completed
    #[error("unexpected end of data")]
    TruncatedRead,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),
}

impl AifcError {
    /// Create a new MalformedChunk error.
    pub fn malformed<S: Into<String>>(id: ChunkId, reason: S) -> Self {
        Self::MalformedChunk {
            id,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for AifcError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::TruncatedRead
        } else {
            Self::Io(err)
        }
    }
}

/// Result type alias using [`AifcError`].
pub type Result<T> = std::result::Result<T, AifcError>;
