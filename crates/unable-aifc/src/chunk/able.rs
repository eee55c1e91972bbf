//! Able metadata (`ABLE`) chunk
//!
//! Body layout: a big-endian `u32` key length followed by that many key bytes.
//! Like the keystream in [`crate::cipher`], this layout is this crate's own
//! and not the vendor's.

use std::fmt;
use std::io::{Read, Seek, Write};

use super::{Chunk, ABLE};
use crate::codec::{self, ChunkId};
use crate::error::{AifcError, Result};

/// Opaque key parameterizing the sound data keystream
#[derive(Clone, PartialEq, Eq)]
pub struct AbleKey(Vec<u8>);

impl AbleKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Key bytes stay out of logs
impl fmt::Debug for AbleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AbleKey({} bytes)", self.0.len())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbleChunk {
    key: Option<AbleKey>,
}

impl AbleChunk {
    pub fn with_key(key: AbleKey) -> Self {
        Self { key: Some(key) }
    }

    /// Key read from the file, `None` when no `ABLE` chunk was present
    pub fn key(&self) -> Option<&AbleKey> {
        self.key.as_ref()
    }

    /// Hand the key over for a single decrypt
    pub fn take_key(&mut self) -> Option<AbleKey> {
        self.key.take()
    }

    fn key_len(&self) -> Result<u32> {
        let len = self.key.as_ref().map_or(0, AbleKey::len);
        u32::try_from(len).map_err(|_| AifcError::malformed(ABLE, "key too long"))
    }
}

impl Chunk for AbleChunk {
    fn id(&self) -> ChunkId {
        ABLE
    }

    fn read_data<R: Read + Seek>(&mut self, reader: &mut R, start: u64, size: u32) -> Result<()> {
        if size < 4 {
            return Err(AifcError::malformed(
                ABLE,
                format!("{} bytes cannot hold the key length", size),
            ));
        }

        let body = codec::read_window(reader, start, size)?;
        let (len_bytes, key) = body.split_at(4);
        let key_len = codec::read_u32(&mut &len_bytes[..])?;

        if key_len == 0 {
            return Err(AifcError::malformed(ABLE, "empty key"));
        }
        if u64::from(key_len) != key.len() as u64 {
            return Err(AifcError::malformed(
                ABLE,
                format!("key length {} does not match {} body bytes", key_len, key.len()),
            ));
        }

        self.key = Some(AbleKey::new(key));
        Ok(())
    }

    fn check_body(&self) -> Result<()> {
        self.key_len().map(|_| ())
    }

    fn data_len(&self) -> u64 {
        4 + self.key.as_ref().map_or(0, |k| k.len() as u64)
    }

    fn write_data<W: Write>(&self, writer: &mut W) -> Result<()> {
        let key = self.key.as_ref().map_or(&[][..], |k| k.as_bytes());
        codec::write_u32(writer, self.key_len()?)?;
        writer.write_all(key)?;
        Ok(())
    }
}
