//! WAV container handling.
//!
//! The carrier is split byte-exactly: everything from offset 0 through the
//! `data` chunk's size field is the header, the chunk payload is the
//! sample buffer the codec rewrites, and anything after the `data` chunk
//! is kept verbatim as a trailer. Re-emitting the three parts reproduces
//! the input byte for byte apart from the sample LSBs; no size patch-up is
//! needed because the total length never changes.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::StegoError;
use crate::result::Result;

/// A parsed WAV carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavFile {
    header: Vec<u8>,
    samples: Vec<u8>,
    trailer: Vec<u8>,
}

impl WavFile {
    /// Walks the RIFF chunks and splits the file around the `data` payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 12 || &bytes[0..4] != b"RIFF" {
            return Err(StegoError::InvalidRiff);
        }
        if &bytes[8..12] != b"WAVE" {
            return Err(StegoError::InvalidWave);
        }

        let mut offset = 12usize;
        loop {
            if offset
                .checked_add(8)
                .map_or(true, |next| next > bytes.len())
            {
                return Err(StegoError::DataChunkNotFound);
            }
            let id = &bytes[offset..offset + 4];
            let size = LittleEndian::read_u32(&bytes[offset + 4..offset + 8]) as usize;
            let body = offset + 8;

            if id == b"data" {
                let end = body
                    .checked_add(size)
                    .filter(|&end| end <= bytes.len())
                    .ok_or(StegoError::DataChunkNotFound)?;
                return Ok(Self {
                    header: bytes[..body].to_vec(),
                    samples: bytes[body..end].to_vec(),
                    trailer: bytes[end..].to_vec(),
                });
            }
            offset = body
                .checked_add(size)
                .ok_or(StegoError::DataChunkNotFound)?;
        }
    }

    pub fn header(&self) -> &[u8] {
        &self.header
    }

    /// The `data` chunk payload; every byte is an addressable sample byte.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    /// Header verbatim, samples, then whatever followed the `data` chunk.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.header.len() + self.samples.len() + self.trailer.len());
        out.extend_from_slice(&self.header);
        out.extend_from_slice(&self.samples);
        out.extend_from_slice(&self.trailer);
        out
    }
}

/// Builds a minimal 8-bit mono PCM file around the given sample bytes.
/// Test helper shared with the integration suites.
#[doc(hidden)]
pub fn build_pcm8_mono(samples: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(44 + samples.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + samples.len() as u32).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&44100u32.to_le_bytes());
    out.extend_from_slice(&44100u32.to_le_bytes()); // byte rate
    out.extend_from_slice(&1u16.to_le_bytes()); // block align
    out.extend_from_slice(&8u16.to_le_bytes()); // bits per sample
    out.extend_from_slice(b"data");
    out.extend_from_slice(&(samples.len() as u32).to_le_bytes());
    out.extend_from_slice(samples);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_header_samples_and_trailer() {
        let samples: Vec<u8> = (0..=255).collect();
        let bytes = build_pcm8_mono(&samples);
        let wav = WavFile::from_bytes(&bytes).unwrap();
        assert_eq!(wav.header().len(), 44);
        assert_eq!(wav.samples(), &samples[..]);
        assert_eq!(wav.header().len() + wav.samples().len(), bytes.len());
        assert_eq!(wav.to_bytes(), bytes);
    }

    #[test]
    fn skips_chunks_before_data() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&0u32.to_le_bytes()); // size field is ignored
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(&[0; 4]);
        bytes.extend_from_slice(b"LIST");
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&[0xAB, 0xCD]);
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&3u32.to_le_bytes());
        bytes.extend_from_slice(&[1, 2, 3]);

        let wav = WavFile::from_bytes(&bytes).unwrap();
        assert_eq!(wav.samples(), &[1, 2, 3]);
        assert_eq!(wav.to_bytes(), bytes);
    }

    #[test]
    fn preserves_trailing_chunks() {
        let mut bytes = build_pcm8_mono(&[9; 16]);
        bytes.extend_from_slice(b"LIST");
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(b"INFO");
        let wav = WavFile::from_bytes(&bytes).unwrap();
        assert_eq!(wav.samples(), &[9; 16]);
        assert_eq!(wav.to_bytes(), bytes);
    }

    #[test]
    fn rejects_non_riff() {
        assert!(matches!(
            WavFile::from_bytes(b"OggS but not riff at all"),
            Err(StegoError::InvalidRiff)
        ));
    }

    #[test]
    fn rejects_non_wave_riff() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(b"AVI ");
        assert!(matches!(
            WavFile::from_bytes(&bytes),
            Err(StegoError::InvalidWave)
        ));
    }

    #[test]
    fn missing_data_chunk_fails() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&12u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(&[0; 4]);
        assert!(matches!(
            WavFile::from_bytes(&bytes),
            Err(StegoError::DataChunkNotFound)
        ));
    }

    #[test]
    fn truncated_data_chunk_fails() {
        let mut bytes = build_pcm8_mono(&[1, 2, 3, 4]);
        bytes.truncate(bytes.len() - 2);
        assert!(matches!(
            WavFile::from_bytes(&bytes),
            Err(StegoError::DataChunkNotFound)
        ));
    }
}
