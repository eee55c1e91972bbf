//! Sound data (`SSND`) chunk

use std::io::{Read, Seek, Write};

use super::{AbleKey, Chunk, SSND};
use crate::cipher;
use crate::codec::{self, ChunkId};
use crate::error::{AifcError, Result};

const HEADER_LEN: u32 = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoundDataChunk {
    pub offset: u32,
    pub block_size: u32,
    /// Sample bytes following the offset and block size fields
    pub payload: Vec<u8>,
}

impl SoundDataChunk {
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            offset: 0,
            block_size: 0,
            payload,
        }
    }

    /// Recover plain samples from an able-encrypted payload, in place
    pub fn decrypt(&mut self, key: &AbleKey) {
        cipher::apply_keystream(key.as_bytes(), &mut self.payload);
    }

    /// Produce an able-encrypted payload from plain samples, in place
    pub fn encrypt(&mut self, key: &AbleKey) {
        cipher::apply_keystream(key.as_bytes(), &mut self.payload);
    }
}

impl Chunk for SoundDataChunk {
    fn id(&self) -> ChunkId {
        SSND
    }

    fn read_data<R: Read + Seek>(&mut self, reader: &mut R, start: u64, size: u32) -> Result<()> {
        if size < HEADER_LEN {
            return Err(AifcError::malformed(
                SSND,
                format!("{} bytes cannot hold offset and block size", size),
            ));
        }

        let mut body = codec::read_window(reader, start, size)?;
        let mut header = &body[..HEADER_LEN as usize];
        self.offset = codec::read_u32(&mut header)?;
        self.block_size = codec::read_u32(&mut header)?;

        body.drain(..HEADER_LEN as usize);
        self.payload = body;
        Ok(())
    }

    fn data_len(&self) -> u64 {
        u64::from(HEADER_LEN) + self.payload.len() as u64
    }

    fn write_data<W: Write>(&self, writer: &mut W) -> Result<()> {
        codec::write_u32(writer, self.offset)?;
        codec::write_u32(writer, self.block_size)?;
        writer.write_all(&self.payload)?;
        Ok(())
    }
}
