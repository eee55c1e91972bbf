//! Big-endian primitives shared by every chunk
//!
//! AIFF and AIFC store all integers big-endian and tag every chunk with a
//! four character identifier.

use std::fmt;
use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::{AifcError, Result};

/// A four byte chunk or type identifier, held as its big-endian `u32` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId(u32);

impl ChunkId {
    /// Pack four characters into an identifier
    pub const fn new(chars: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(chars))
    }

    pub const fn from_u32(value: u32) -> Self {
        Self(value)
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.to_bytes();
        if bytes.iter().all(|b| (0x20..0x7F).contains(b)) {
            // Printable ASCII, always one byte per char
            for b in bytes {
                write!(f, "{}", b as char)?;
            }
            Ok(())
        } else {
            write!(f, "0x{:08X}", self.0)
        }
    }
}

#[cfg(feature = "serialize")]
impl serde::Serialize for ChunkId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outer chunk of every AIFF/AIFC file
pub const FORM: ChunkId = ChunkId::new(*b"FORM");
/// Extended form type
pub const AIFC: ChunkId = ChunkId::new(*b"AIFC");
/// Legacy form type
pub const AIFF: ChunkId = ChunkId::new(*b"AIFF");
/// Compression type of plain PCM
pub const NONE: ChunkId = ChunkId::new(*b"NONE");
/// Compression type marking keystream-encrypted sound data
pub const ABLE_COMPRESSION: ChunkId = ChunkId::new(*b"able");

/// Build an identifier from four characters
pub const fn make_id(chars: [u8; 4]) -> ChunkId {
    ChunkId::new(chars)
}

/// Read a four byte identifier
pub fn read_id<R: Read>(reader: &mut R) -> Result<ChunkId> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(ChunkId::new(buf))
}

/// Read a big-endian signed 32-bit integer
pub fn read_i32<R: Read>(reader: &mut R) -> Result<i32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_be_bytes(buf))
}

/// Read a big-endian unsigned 32-bit integer
pub fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

/// Read a big-endian signed 16-bit integer
pub fn read_i16<R: Read>(reader: &mut R) -> Result<i16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(i16::from_be_bytes(buf))
}

pub fn write_id<W: Write>(writer: &mut W, id: ChunkId) -> Result<()> {
    writer.write_all(&id.to_bytes())?;
    Ok(())
}

pub fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<()> {
    writer.write_all(&value.to_be_bytes())?;
    Ok(())
}

pub fn write_u32<W: Write>(writer: &mut W, value: u32) -> Result<()> {
    writer.write_all(&value.to_be_bytes())?;
    Ok(())
}

pub fn write_i16<W: Write>(writer: &mut W, value: i16) -> Result<()> {
    writer.write_all(&value.to_be_bytes())?;
    Ok(())
}

/// Read exactly `size` bytes starting at `start`
///
/// The buffer grows with the data actually read, so a huge declared size on a
/// short stream fails with [`AifcError::TruncatedRead`] instead of allocating
/// the declared amount up front.
pub fn read_window<R: Read + Seek>(reader: &mut R, start: u64, size: u32) -> Result<Vec<u8>> {
    reader.seek(SeekFrom::Start(start))?;

    let mut buf = Vec::new();
    reader.take(u64::from(size)).read_to_end(&mut buf)?;

    if buf.len() != size as usize {
        return Err(AifcError::TruncatedRead);
    }

    Ok(buf)
}
