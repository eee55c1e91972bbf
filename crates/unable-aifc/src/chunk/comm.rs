//! Common (`COMM`) chunk
//!
//! AIFF stores 18 bytes: channels, sample frames, sample size and an 80-bit
//! extended sample rate. AIFC appends a compression type and a Pascal-string
//! compression name. Only the compression type drives decisions here; the
//! remaining fields are carried through untouched.

use std::io::{Read, Seek, Write};

use super::{Chunk, COMM};
use crate::codec::{self, ChunkId, NONE};
use crate::error::{AifcError, Result};

const AIFF_LEN: u32 = 18;
const AIFC_MIN_LEN: u32 = 22;

/// Compression name written for plain PCM
pub const NOT_COMPRESSED: &[u8] = b"not compressed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonChunk {
    pub channels: i16,
    pub sample_frames: u32,
    pub sample_size: i16,
    /// 80-bit IEEE extended, big-endian
    pub sample_rate: [u8; 10],
    pub compression_type: ChunkId,
    /// Raw Pascal-string contents
    ///
    /// `None` when the body ends right after the compression type, and is
    /// written back that way.
    pub compression_name: Option<Vec<u8>>,
}

impl Default for CommonChunk {
    // An absent COMM chunk leaves an all-zero compression type, which the
    // form's compression gate rejects.
    fn default() -> Self {
        Self {
            channels: 0,
            sample_frames: 0,
            sample_size: 0,
            sample_rate: [0; 10],
            compression_type: ChunkId::from_u32(0),
            compression_name: None,
        }
    }
}

impl CommonChunk {
    pub fn compression_type(&self) -> ChunkId {
        self.compression_type
    }

    /// Sample rate decoded from the 80-bit extended field
    pub fn sample_rate(&self) -> f64 {
        extended_to_f64(&self.sample_rate)
    }

    /// Describe the payload as plain PCM after a successful decrypt
    pub fn mark_uncompressed(&mut self) {
        self.compression_type = NONE;
        self.compression_name = Some(NOT_COMPRESSED.to_vec());
    }

    /// Length-prefix byte of the compression name, when there is one
    fn name_count(&self) -> Result<Option<u8>> {
        self.compression_name
            .as_ref()
            .map(|name| {
                u8::try_from(name.len()).map_err(|_| {
                    AifcError::malformed(COMM, "compression name longer than 255 bytes")
                })
            })
            .transpose()
    }
}

impl Chunk for CommonChunk {
    fn id(&self) -> ChunkId {
        COMM
    }

    fn read_data<R: Read + Seek>(&mut self, reader: &mut R, start: u64, size: u32) -> Result<()> {
        if size < AIFF_LEN || (size > AIFF_LEN && size < AIFC_MIN_LEN) {
            return Err(AifcError::malformed(
                COMM,
                format!("{} bytes match neither the AIFF nor the AIFC layout", size),
            ));
        }

        let body = codec::read_window(reader, start, size)?;
        let mut fields = &body[..AIFF_LEN as usize];

        let channels = codec::read_i16(&mut fields)?;
        let sample_frames = codec::read_u32(&mut fields)?;
        let sample_size = codec::read_i16(&mut fields)?;
        let mut sample_rate = [0u8; 10];
        fields.read_exact(&mut sample_rate)?;

        // AIFF bodies are upgraded to the AIFC layout on write
        let (compression_type, compression_name) = if size == AIFF_LEN {
            (NONE, Some(NOT_COMPRESSED.to_vec()))
        } else {
            let mut tail = &body[AIFF_LEN as usize..];
            let compression_type = codec::read_id(&mut tail)?;
            let name = read_pstring(tail)?;
            (compression_type, name)
        };

        *self = Self {
            channels,
            sample_frames,
            sample_size,
            sample_rate,
            compression_type,
            compression_name,
        };

        Ok(())
    }

    fn check_body(&self) -> Result<()> {
        self.name_count().map(|_| ())
    }

    fn data_len(&self) -> u64 {
        let name_len = self
            .compression_name
            .as_ref()
            .map_or(0, |name| 1 + name.len() as u64);
        u64::from(AIFC_MIN_LEN) + name_len + name_len % 2
    }

    fn write_data<W: Write>(&self, writer: &mut W) -> Result<()> {
        codec::write_i16(writer, self.channels)?;
        codec::write_u32(writer, self.sample_frames)?;
        codec::write_i16(writer, self.sample_size)?;
        writer.write_all(&self.sample_rate)?;
        codec::write_id(writer, self.compression_type)?;

        if let (Some(count), Some(name)) = (self.name_count()?, &self.compression_name) {
            writer.write_all(&[count])?;
            writer.write_all(name)?;
            if (1 + name.len()) % 2 == 1 {
                writer.write_all(&[0])?;
            }
        }

        Ok(())
    }
}

/// Parse the compression name; `tail` starts at the count byte
fn read_pstring(tail: &[u8]) -> Result<Option<Vec<u8>>> {
    let Some((&count, rest)) = tail.split_first() else {
        return Ok(None);
    };

    let count = count as usize;
    if count > rest.len() {
        return Err(AifcError::malformed(
            COMM,
            format!(
                "compression name of {} bytes overruns the {} remaining",
                count,
                rest.len()
            ),
        ));
    }

    // Pad byte keeps count + text even; it may be missing at the very end
    let used = count + (1 + count) % 2;
    if rest.len() > used {
        tracing::warn!(
            "Ignoring {} trailing bytes in COMM chunk",
            rest.len() - used
        );
    }

    Ok(Some(rest[..count].to_vec()))
}

/// Convert an 80-bit IEEE 754 extended value to `f64`
pub fn extended_to_f64(bytes: &[u8; 10]) -> f64 {
    let sign_exp = u16::from_be_bytes([bytes[0], bytes[1]]);
    let mut mantissa_bytes = [0u8; 8];
    mantissa_bytes.copy_from_slice(&bytes[2..]);
    let mantissa = u64::from_be_bytes(mantissa_bytes);

    let negative = sign_exp & 0x8000 != 0;
    let exponent = i32::from(sign_exp & 0x7FFF);

    let magnitude = if exponent == 0 && mantissa == 0 {
        0.0
    } else if exponent == 0x7FFF {
        if mantissa << 1 == 0 {
            f64::INFINITY
        } else {
            f64::NAN
        }
    } else {
        // Explicit integer bit, so the mantissa is scaled by 2^-63
        mantissa as f64 * 2f64.powi(exponent - 16383 - 63)
    };

    if negative {
        -magnitude
    } else {
        magnitude
    }
}
