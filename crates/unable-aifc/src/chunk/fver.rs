//! Format version (`FVER`) chunk

use std::io::{Read, Seek, Write};

use super::{Chunk, FVER};
use crate::codec::{self, ChunkId};
use crate::error::{AifcError, Result};

/// Timestamp of the AIFC version 1 specification
pub const AIFC_VERSION_1: u32 = 0xA280_5140;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatVersionChunk {
    pub timestamp: u32,
}

impl Default for FormatVersionChunk {
    fn default() -> Self {
        Self {
            timestamp: AIFC_VERSION_1,
        }
    }
}

impl Chunk for FormatVersionChunk {
    fn id(&self) -> ChunkId {
        FVER
    }

    fn read_data<R: Read + Seek>(&mut self, reader: &mut R, start: u64, size: u32) -> Result<()> {
        if size != 4 {
            return Err(AifcError::malformed(
                FVER,
                format!("expected 4 bytes, found {}", size),
            ));
        }

        let body = codec::read_window(reader, start, size)?;
        self.timestamp = codec::read_u32(&mut body.as_slice())?;
        Ok(())
    }

    fn data_len(&self) -> u64 {
        4
    }

    fn write_data<W: Write>(&self, writer: &mut W) -> Result<()> {
        codec::write_u32(writer, self.timestamp)
    }
}
