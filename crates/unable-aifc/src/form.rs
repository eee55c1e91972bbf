//! Top-level `FORM` chunk: reads the whole file, decrypts, writes plain AIFC

use std::io::{Read, Seek, SeekFrom, Write};

use crate::chunk::{
    padded_len, AbleChunk, Chunk, ChunkKind, CommonChunk, FormatVersionChunk, SoundDataChunk, ABLE,
};
use crate::codec::{self, ChunkId, ABLE_COMPRESSION, AIFC, AIFF, FORM, NONE};
use crate::error::{AifcError, Result};
use crate::walk::{walk_chunks, ChunkHeader};

/// What the compression gate did with the sound data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decryption {
    /// The payload was able-encrypted and has been restored in place
    Decrypted,
    /// The payload was already plain PCM and is passed through
    AlreadyPlain,
}

/// Declared position and size of the `FORM` body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormHeader {
    pub data_start: u64,
    pub data_size: u32,
}

/// Read the `FORM` id and size
///
/// The body must at least hold the form type.
pub fn read_form_header<R: Read + Seek>(reader: &mut R) -> Result<FormHeader> {
    let id = codec::read_id(reader)?;
    if id != FORM {
        return Err(AifcError::NotAnAifcFile(id));
    }

    let size = codec::read_i32(reader)?;
    let data_start = reader.stream_position()?;

    match u32::try_from(size) {
        Ok(data_size) if data_size >= 4 => Ok(FormHeader {
            data_start,
            data_size,
        }),
        _ => Err(AifcError::ChunkBoundsViolation {
            id,
            start: data_start,
            size: i64::from(size),
            limit: data_start + 4,
        }),
    }
}

/// Read the form type, returning whether it is `AIFC`
pub fn read_form_type<R: Read>(reader: &mut R) -> Result<bool> {
    match codec::read_id(reader)? {
        AIFC => Ok(true),
        AIFF => Ok(false),
        other => Err(AifcError::UnsupportedFormType(other)),
    }
}

/// Header, body and pad byte of a sub-chunk
fn framed_len(data_len: u64) -> u64 {
    8 + padded_len(data_len)
}

/// The decryptor's view of an AIFF/AIFC file
///
/// Holds one of each recognized sub-chunk, defaulted when the file lacks it.
/// Unrecognized sub-chunks are skipped and not kept.
#[derive(Debug, Clone, Default)]
pub struct FormChunk {
    is_aifc: bool,
    decryption: Option<Decryption>,
    pub format_version: FormatVersionChunk,
    pub able: AbleChunk,
    pub common: CommonChunk,
    pub sound_data: SoundDataChunk,
}

impl FormChunk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the input form type was `AIFC` rather than `AIFF`
    pub fn is_aifc(&self) -> bool {
        self.is_aifc
    }

    /// Outcome of the compression gate, once `read` has succeeded
    pub fn decryption(&self) -> Option<Decryption> {
        self.decryption
    }

    /// Read a complete file positioned at its `FORM` id and decrypt it
    pub fn read<R: Read + Seek>(&mut self, reader: &mut R) -> Result<Decryption> {
        self.parse(reader)?;
        self.apply_compression()
    }

    /// Read a complete file without touching the sound data
    pub fn parse<R: Read + Seek>(&mut self, reader: &mut R) -> Result<()> {
        let header = read_form_header(reader)?;
        self.parse_body(reader, header.data_start, header.data_size)
    }

    fn parse_body<R: Read + Seek>(&mut self, reader: &mut R, start: u64, size: u32) -> Result<()> {
        reader.seek(SeekFrom::Start(start))?;
        self.is_aifc = read_form_type(reader)?;

        walk_chunks(reader, start, u64::from(size), |header, reader| {
            self.read_sub_chunk(header, reader)
        })
    }

    fn read_sub_chunk<R: Read + Seek>(&mut self, header: &ChunkHeader, reader: &mut R) -> Result<()> {
        let Some(kind) = ChunkKind::from_id(header.id) else {
            tracing::debug!("Skipping unknown chunk '{}'", header.id);
            return Ok(());
        };

        let (start, size) = (header.data_start, header.size);
        match kind {
            ChunkKind::FormatVersion => self.format_version.read_data(reader, start, size),
            ChunkKind::Able => self.able.read_data(reader, start, size),
            ChunkKind::Common => self.common.read_data(reader, start, size),
            ChunkKind::SoundData => self.sound_data.read_data(reader, start, size),
        }
    }

    /// Gate on the Common compression type and decrypt when it is `able`
    pub fn apply_compression(&mut self) -> Result<Decryption> {
        let outcome = match self.common.compression_type() {
            ABLE_COMPRESSION => {
                let key = self.able.take_key().ok_or(AifcError::MissingChunk(ABLE))?;
                self.sound_data.decrypt(&key);
                self.common.mark_uncompressed();
                tracing::debug!(
                    "Decrypted {} bytes of sound data",
                    self.sound_data.payload.len()
                );
                Decryption::Decrypted
            }
            NONE => {
                tracing::info!("file was not encrypted, duplicated input file");
                Decryption::AlreadyPlain
            }
            other => return Err(AifcError::UnsupportedCompression(other)),
        };

        self.decryption = Some(outcome);
        Ok(outcome)
    }
}

impl Chunk for FormChunk {
    fn id(&self) -> ChunkId {
        FORM
    }

    fn read_data<R: Read + Seek>(&mut self, reader: &mut R, start: u64, size: u32) -> Result<()> {
        self.parse_body(reader, start, size)?;
        self.apply_compression()?;
        Ok(())
    }

    fn check_body(&self) -> Result<()> {
        self.format_version.check_body()?;
        self.common.check_body()?;
        self.sound_data.check_body()
    }

    fn data_len(&self) -> u64 {
        4 + framed_len(self.format_version.data_len())
            + framed_len(self.common.data_len())
            + framed_len(self.sound_data.data_len())
    }

    /// Always emits `AIFC` followed by the version, common and sound data chunks
    fn write_data<W: Write>(&self, writer: &mut W) -> Result<()> {
        codec::write_id(writer, AIFC)?;
        self.format_version.write(writer)?;
        self.common.write(writer)?;
        self.sound_data.write(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::COMM;
    use std::io::Cursor;

    fn plain_body() -> Vec<u8> {
        let mut body = b"AIFF".to_vec();
        body.extend_from_slice(b"COMM\x00\x00\x00\x12");
        body.extend_from_slice(&[0, 1, 0, 0, 0, 1, 0, 8]);
        body.extend_from_slice(&[0x40, 0x0E, 0xAC, 0x44, 0, 0, 0, 0, 0, 0]);
        body.extend_from_slice(b"SSND\x00\x00\x00\x09");
        body.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 0, 0x7F, 0]);
        body
    }

    #[test]
    fn test_read_data_at_offset() {
        // Body embedded after unrelated leading bytes
        let mut data = vec![0xEE; 6];
        let body = plain_body();
        data.extend_from_slice(&body);

        let mut cursor = Cursor::new(data);

        let mut form = FormChunk::new();
        form.read_data(&mut cursor, 6, body.len() as u32).unwrap();

        assert!(!form.is_aifc());
        assert_eq!(form.decryption(), Some(Decryption::AlreadyPlain));
        assert_eq!(form.sound_data.payload, vec![0x7F]);
        assert_eq!(cursor.position(), 6 + body.len() as u64);
    }

    #[test]
    fn test_unwritable_common_leaves_writer_empty() {
        let mut form = FormChunk::new();
        form.common.mark_uncompressed();
        form.common.compression_name = Some(vec![b'n'; 256]);

        let mut out = Vec::new();
        assert!(matches!(
            form.write(&mut out),
            Err(AifcError::MalformedChunk { id: COMM, .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_form_too_small_for_type() {
        let mut cursor = Cursor::new(b"FORM\x00\x00\x00\x02AI".to_vec());
        assert!(matches!(
            read_form_header(&mut cursor),
            Err(AifcError::ChunkBoundsViolation { .. })
        ));
    }

    #[test]
    fn test_parse_leaves_payload_encrypted() {
        let mut data = b"FORM".to_vec();
        let mut body = b"AIFC".to_vec();
        body.extend_from_slice(b"ABLE\x00\x00\x00\x05\x00\x00\x00\x01k\x00");
        body.extend_from_slice(b"COMM\x00\x00\x00\x18");
        body.extend_from_slice(&[0; 18]);
        body.extend_from_slice(b"able\x00\x00");
        body.extend_from_slice(b"SSND\x00\x00\x00\x0A");
        body.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 0, 0xAA, 0xBB]);
        data.extend_from_slice(&(body.len() as i32).to_be_bytes());
        data.extend_from_slice(&body);

        let mut form = FormChunk::new();
        form.parse(&mut Cursor::new(data.clone())).unwrap();
        assert_eq!(form.sound_data.payload, vec![0xAA, 0xBB]);
        assert_eq!(form.decryption(), None);
        assert!(form.able.key().is_some());

        let mut form = FormChunk::new();
        assert_eq!(
            form.read(&mut Cursor::new(data)).unwrap(),
            Decryption::Decrypted
        );
        assert_ne!(form.sound_data.payload, vec![0xAA, 0xBB]);
    }
}
