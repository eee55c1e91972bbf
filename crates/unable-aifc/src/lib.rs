//! # unable-aifc
//!
//! Reads AIFF/AIFC files whose sound data was encrypted with the `able`
//! compression type and writes them back as plain AIFC.
//!
//! ## Features
//!
//! - Bounded chunk walking: every sub-chunk is confined to its declared range
//! - `FVER`, `ABLE`, `COMM` and `SSND` parsing; other chunks are skipped
//! - Keystream decryption keyed by the `ABLE` chunk
//! - Output always normalized to the `AIFC` form type
//!
//! ## Example
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::{BufReader, BufWriter};
//!
//! let mut input = BufReader::new(File::open("loop.aif").unwrap());
//! let mut output = BufWriter::new(File::create("loop_plain.aif").unwrap());
//!
//! match unable_aifc::decrypt(&mut input, &mut output).unwrap() {
//!     unable_aifc::Decryption::Decrypted => println!("decrypted"),
//!     unable_aifc::Decryption::AlreadyPlain => println!("already plain"),
//! }
//! ```

pub mod chunk;
pub mod cipher;
pub mod codec;
pub mod error;
pub mod form;
pub mod types;
pub mod walk;

pub use codec::ChunkId;
pub use error::{AifcError, Result};
pub use form::{Decryption, FormChunk};
pub use types::*;

use std::io::{Read, Seek, Write};

use chunk::{AbleChunk, Chunk, ChunkKind, CommonChunk};
use walk::walk_chunks;

/// Read a complete file, decrypt it if needed and write plain AIFC
///
/// Nothing is written unless the whole input was read successfully.
pub fn decrypt<R, W>(reader: &mut R, writer: &mut W) -> Result<Decryption>
where
    R: Read + Seek,
    W: Write,
{
    let mut form = FormChunk::new();
    let outcome = form.read(reader)?;
    form.write(writer)?;
    writer.flush()?;
    Ok(outcome)
}

/// Describe a file's chunk layout and audio format without decrypting it
pub fn inspect<R: Read + Seek>(reader: &mut R) -> Result<FileReport> {
    let header = form::read_form_header(reader)?;
    let form_type = if form::read_form_type(reader)? {
        codec::AIFC
    } else {
        codec::AIFF
    };

    let mut chunks = Vec::new();
    let mut format = None;
    let mut has_key = false;

    walk_chunks(
        reader,
        header.data_start,
        u64::from(header.data_size),
        |chunk_header, reader| {
            chunks.push(*chunk_header);

            match ChunkKind::from_id(chunk_header.id) {
                Some(ChunkKind::Common) => {
                    let mut common = CommonChunk::default();
                    common.read_data(reader, chunk_header.data_start, chunk_header.size)?;
                    format = Some(AudioFormat::from(&common));
                }
                Some(ChunkKind::Able) => {
                    let mut able = AbleChunk::default();
                    able.read_data(reader, chunk_header.data_start, chunk_header.size)?;
                    has_key = able.key().is_some();
                }
                _ => {}
            }

            Ok(())
        },
    )?;

    Ok(FileReport {
        form_type,
        form_size: header.data_size,
        chunks,
        format,
        has_key,
    })
}
