//! Report types produced by [`crate::inspect`]

use crate::chunk::CommonChunk;
use crate::codec::{ChunkId, ABLE_COMPRESSION};
use crate::walk::ChunkHeader;

/// Audio format described by the Common chunk
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct AudioFormat {
    pub channels: i16,
    pub sample_frames: u32,
    /// Bits per sample
    pub sample_size: i16,
    /// Samples per second
    pub sample_rate: f64,
    pub compression_type: ChunkId,
    pub compression_name: Option<String>,
}

impl From<&CommonChunk> for AudioFormat {
    fn from(common: &CommonChunk) -> Self {
        Self {
            channels: common.channels,
            sample_frames: common.sample_frames,
            sample_size: common.sample_size,
            sample_rate: common.sample_rate(),
            compression_type: common.compression_type(),
            compression_name: common
                .compression_name
                .as_ref()
                .map(|name| String::from_utf8_lossy(name).into_owned()),
        }
    }
}

impl AudioFormat {
    /// Playback length in seconds, when the sample rate is usable
    pub fn duration_secs(&self) -> Option<f64> {
        if self.sample_rate.is_finite() && self.sample_rate > 0.0 {
            Some(f64::from(self.sample_frames) / self.sample_rate)
        } else {
            None
        }
    }
}

/// Structure of an AIFF/AIFC file as found on disk
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct FileReport {
    /// `AIFC` or `AIFF`
    pub form_type: ChunkId,
    /// Declared size of the `FORM` body
    pub form_size: u32,
    /// Every sub-chunk in file order, recognized or not
    pub chunks: Vec<ChunkHeader>,
    /// `None` when the file has no Common chunk
    pub format: Option<AudioFormat>,
    /// Whether an `ABLE` chunk with a key is present
    pub has_key: bool,
}

impl FileReport {
    /// Whether the sound data is able-encrypted
    pub fn is_encrypted(&self) -> bool {
        self.format
            .as_ref()
            .is_some_and(|format| format.compression_type == ABLE_COMPRESSION)
    }
}
