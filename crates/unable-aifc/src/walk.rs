//! Bounded iteration over the sub-chunks of a parent chunk

use std::io::{Read, Seek, SeekFrom};

use crate::chunk::padded_len;
use crate::codec::{self, ChunkId};
use crate::error::{AifcError, Result};

/// Location of one sub-chunk's body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ChunkHeader {
    pub id: ChunkId,
    /// Stream offset of the first body byte
    pub data_start: u64,
    pub size: u32,
}

impl ChunkHeader {
    pub fn data_end(&self) -> u64 {
        self.data_start + u64::from(self.size)
    }

    /// Where the next sibling's header starts
    pub fn padded_end(&self) -> u64 {
        self.data_start + padded_len(u64::from(self.size))
    }
}

/// Visit every sub-chunk inside `[data_start, data_start + data_size)`
///
/// A sub-chunk with a negative size, or whose body would end past the parent
/// region, fails with [`AifcError::ChunkBoundsViolation`] before `visit` sees
/// it. The pad byte after an odd-sized body may lie one byte past the parent.
/// After each visit the reader is moved to the padded end no matter how much
/// of the body the visitor consumed.
pub fn walk_chunks<R, F>(reader: &mut R, data_start: u64, data_size: u64, mut visit: F) -> Result<()>
where
    R: Read + Seek,
    F: FnMut(&ChunkHeader, &mut R) -> Result<()>,
{
    let data_end = data_start + data_size;

    while reader.stream_position()? < data_end {
        let id = codec::read_id(reader)?;
        let size = codec::read_i32(reader)?;
        let start = reader.stream_position()?;

        let size = match u32::try_from(size) {
            Ok(size) if start + u64::from(size) <= data_end => size,
            _ => {
                return Err(AifcError::ChunkBoundsViolation {
                    id,
                    start,
                    size: i64::from(size),
                    limit: data_end,
                })
            }
        };

        let header = ChunkHeader {
            id,
            data_start: start,
            size,
        };
        tracing::debug!("Chunk '{}' at {} ({} bytes)", id, start, size);

        visit(&header, reader)?;

        reader.seek(SeekFrom::Start(header.padded_end()))?;
    }

    Ok(())
}
