use std::io::Write;
use std::path::Path;

use crate::error::{Result, WavetableError};
use crate::wavetable::Wavetable;

pub const SAMPLE_RATE: u32 = 44100;
pub const CHANNELS: u16 = 1;
pub const BITS_PER_SAMPLE: u16 = 16;
pub const HEADER_LEN: usize = 44;

/// Canonical 44-byte PCM header: RIFF/WAVE, a 16-byte `fmt ` chunk, then `data`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WavHeader {
    pub riff_size: u32,
    pub fmt_size: u32,
    pub audio_format: u16,
    pub num_channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_size: u32,
}

impl WavHeader {
    /// Fails when the payload does not fit the 32-bit RIFF size fields.
    pub fn mono_pcm16(sample_count: usize) -> Result<Self> {
        let block_align = CHANNELS * (BITS_PER_SAMPLE / 8);
        let too_large = || {
            WavetableError::InvalidTable(format!(
                "{} samples exceed the 4 GiB WAV size limit",
                sample_count
            ))
        };
        let data_size = sample_count
            .checked_mul(block_align as usize)
            .and_then(|bytes| u32::try_from(bytes).ok())
            .ok_or_else(too_large)?;
        // everything after the RIFF size field, minus the payload
        let riff_size = data_size.checked_add(36).ok_or_else(too_large)?;
        Ok(Self {
            riff_size,
            fmt_size: 16,
            audio_format: 1,
            num_channels: CHANNELS,
            sample_rate: SAMPLE_RATE,
            byte_rate: SAMPLE_RATE * block_align as u32,
            block_align,
            bits_per_sample: BITS_PER_SAMPLE,
            data_size,
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(b"RIFF");
        out[4..8].copy_from_slice(&self.riff_size.to_le_bytes());
        out[8..12].copy_from_slice(b"WAVE");
        out[12..16].copy_from_slice(b"fmt ");
        out[16..20].copy_from_slice(&self.fmt_size.to_le_bytes());
        out[20..22].copy_from_slice(&self.audio_format.to_le_bytes());
        out[22..24].copy_from_slice(&self.num_channels.to_le_bytes());
        out[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        out[28..32].copy_from_slice(&self.byte_rate.to_le_bytes());
        out[32..34].copy_from_slice(&self.block_align.to_le_bytes());
        out[34..36].copy_from_slice(&self.bits_per_sample.to_le_bytes());
        out[36..40].copy_from_slice(b"data");
        out[40..44].copy_from_slice(&self.data_size.to_le_bytes());
        out
    }

    /// Parse a header produced by [`WavHeader::to_bytes`]. Returns `None` when
    /// the chunk ids do not match the canonical layout.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HEADER_LEN
            || &bytes[0..4] != b"RIFF"
            || &bytes[8..12] != b"WAVE"
            || &bytes[12..16] != b"fmt "
            || &bytes[36..40] != b"data"
        {
            return None;
        }
        let u16_at = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);
        let u32_at =
            |i: usize| u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        Some(Self {
            riff_size: u32_at(4),
            fmt_size: u32_at(16),
            audio_format: u16_at(20),
            num_channels: u16_at(22),
            sample_rate: u32_at(24),
            byte_rate: u32_at(28),
            block_align: u16_at(32),
            bits_per_sample: u16_at(34),
            data_size: u32_at(40),
        })
    }
}

/// Serialize samples as a mono 16-bit little-endian WAV byte stream.
pub fn encode_wav<I>(samples: I) -> Result<Vec<u8>>
where
    I: ExactSizeIterator<Item = i16>,
{
    let header = WavHeader::mono_pcm16(samples.len())?;
    let mut bytes = Vec::with_capacity(HEADER_LEN + header.data_size as usize);
    bytes.extend_from_slice(&header.to_bytes());
    for s in samples {
        bytes.extend_from_slice(&s.to_le_bytes());
    }
    Ok(bytes)
}

/// Write `table` to `path`, negating every sample when `invert` is set.
pub fn write_wavetable(table: &Wavetable, invert: bool, path: &Path) -> Result<()> {
    let bytes = if invert {
        encode_wav(table.inverted_samples())?
    } else {
        encode_wav(table.samples().iter().copied())?
    };

    let write_failure = |source| WavetableError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };
    let mut file = std::fs::File::create(path).map_err(write_failure)?;
    file.write_all(&bytes).map_err(write_failure)?;
    file.flush().map_err(write_failure)?;

    log::info!(
        "Created WAV file {} with {} rows of {} samples each{}",
        path.display(),
        table.row_count(),
        table.frame_size(),
        if invert { " (inverted)" } else { "" }
    );
    Ok(())
}
