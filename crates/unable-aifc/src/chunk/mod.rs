//! Chunk capability and the leaf chunks understood by the decryptor

pub mod able;
pub mod comm;
pub mod fver;
pub mod ssnd;

pub use able::{AbleChunk, AbleKey};
pub use comm::CommonChunk;
pub use fver::FormatVersionChunk;
pub use ssnd::SoundDataChunk;

use std::io::{Read, Seek, Write};

use crate::codec::{self, make_id, ChunkId};
use crate::error::{AifcError, Result};

/// Format version chunk id
pub const FVER: ChunkId = make_id(*b"FVER");
/// Able metadata chunk id, carries the keystream key
pub const ABLE: ChunkId = make_id(*b"ABLE");
/// Common chunk id
pub const COMM: ChunkId = make_id(*b"COMM");
/// Sound data chunk id
pub const SSND: ChunkId = make_id(*b"SSND");

/// Anything stored as `id`, `size`, body and an optional pad byte
pub trait Chunk {
    /// Identifier written in front of the body
    fn id(&self) -> ChunkId;

    /// Parse the body occupying exactly `[start, start + size)`
    fn read_data<R: Read + Seek>(&mut self, reader: &mut R, start: u64, size: u32) -> Result<()>;

    /// Length of the body `write_data` produces, pad byte excluded
    fn data_len(&self) -> u64;

    /// Serialize the body
    fn write_data<W: Write>(&self, writer: &mut W) -> Result<()>;

    /// Fail with the error `write_data` would hit, before anything is written
    fn check_body(&self) -> Result<()> {
        Ok(())
    }

    /// Serialize header, body and pad byte
    ///
    /// Nothing reaches `writer` when the body cannot be serialized.
    fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.check_body()?;
        let len = self.data_len();
        let size = i32::try_from(len).map_err(|_| {
            AifcError::malformed(self.id(), format!("{} bytes do not fit a chunk size", len))
        })?;

        codec::write_id(writer, self.id())?;
        codec::write_i32(writer, size)?;
        self.write_data(writer)?;

        if len % 2 == 1 {
            writer.write_all(&[0])?;
        }

        Ok(())
    }
}

/// Sub-chunks the form reader dispatches to a parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    FormatVersion,
    Able,
    Common,
    SoundData,
}

const DISPATCH: [(ChunkId, ChunkKind); 4] = [
    (FVER, ChunkKind::FormatVersion),
    (ABLE, ChunkKind::Able),
    (COMM, ChunkKind::Common),
    (SSND, ChunkKind::SoundData),
];

impl ChunkKind {
    /// Look up the parser for `id`; `None` means the chunk is skipped
    pub fn from_id(id: ChunkId) -> Option<Self> {
        DISPATCH
            .iter()
            .find(|(known, _)| *known == id)
            .map(|(_, kind)| *kind)
    }

    pub const fn id(self) -> ChunkId {
        match self {
            ChunkKind::FormatVersion => FVER,
            ChunkKind::Able => ABLE,
            ChunkKind::Common => COMM,
            ChunkKind::SoundData => SSND,
        }
    }
}

/// Body length plus the pad byte odd sizes carry
pub const fn padded_len(size: u64) -> u64 {
    size + (size % 2)
}
