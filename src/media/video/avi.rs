//! AVI container handling.
//!
//! Only the interior of the `LIST`/`movi` chunk carries payload; the rest
//! of the file is preserved byte for byte. Re-emitting patches the RIFF
//! size at offset 4 and the movi chunk's size field, which in practice
//! rewrites the values already there since the length never changes.

use std::ops::Range;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::StegoError;
use crate::result::Result;

/// A parsed AVI carrier: the full file plus the located movi window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AviFile {
    bytes: Vec<u8>,
    movi: Range<usize>,
}

impl AviFile {
    /// Walks the top-level RIFF chunks and locates the movi interior.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 12 || &bytes[0..4] != b"RIFF" {
            return Err(StegoError::InvalidRiff);
        }
        if &bytes[8..12] != b"AVI " {
            return Err(StegoError::InvalidAvi);
        }

        let mut offset = 12usize;
        while offset
            .checked_add(8)
            .map_or(false, |next| next <= bytes.len())
        {
            let id = &bytes[offset..offset + 4];
            let size = LittleEndian::read_u32(&bytes[offset + 4..offset + 8]) as usize;

            if id == b"LIST" && offset + 12 <= bytes.len() && &bytes[offset + 8..offset + 12] == b"movi"
            {
                // the 12 header bytes (id, size, list type) stay outside the window
                let start = offset + 12;
                let len = size.saturating_sub(4);
                let end = start.saturating_add(len).min(bytes.len());
                if start >= end {
                    return Err(StegoError::MoviChunkNotFound);
                }
                return Ok(Self {
                    bytes: bytes.to_vec(),
                    movi: start..end,
                });
            }

            // pad skipped chunks to even length
            let skip = 8usize
                .checked_add(size)
                .and_then(|s| s.checked_add(size & 1));
            offset = match skip.and_then(|s| offset.checked_add(s)) {
                Some(next) => next,
                None => break,
            };
        }
        Err(StegoError::MoviChunkNotFound)
    }

    /// The movi interior the codec reads.
    pub fn movi(&self) -> &[u8] {
        &self.bytes[self.movi.clone()]
    }

    /// The movi interior the codec rewrites.
    pub fn movi_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[self.movi.clone()]
    }

    /// Full file with the RIFF and movi size fields patched.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.bytes.clone();
        let riff_size = (out.len() as u32).wrapping_sub(8);
        LittleEndian::write_u32(&mut out[4..8], riff_size);
        let size_field = self.movi.start - 8;
        LittleEndian::write_u32(
            &mut out[size_field..size_field + 4],
            self.movi.len() as u32 + 4,
        );
        out
    }
}

/// Builds a minimal AVI file with a header list and a movi chunk of the
/// given interior. Test helper shared with the integration suites.
#[doc(hidden)]
pub fn build_minimal_avi(movi: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&0u32.to_le_bytes()); // patched below
    out.extend_from_slice(b"AVI ");

    // hdrl list with a stub avih chunk
    out.extend_from_slice(b"LIST");
    out.extend_from_slice(&(4 + 8 + 56u32).to_le_bytes());
    out.extend_from_slice(b"hdrl");
    out.extend_from_slice(b"avih");
    out.extend_from_slice(&56u32.to_le_bytes());
    out.extend_from_slice(&[0; 56]);

    out.extend_from_slice(b"LIST");
    out.extend_from_slice(&(movi.len() as u32 + 4).to_le_bytes());
    out.extend_from_slice(b"movi");
    out.extend_from_slice(movi);

    let riff_size = (out.len() as u32) - 8;
    out[4..8].copy_from_slice(&riff_size.to_le_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locates_the_movi_interior() {
        let movi: Vec<u8> = (0..64).map(|i| i as u8 ^ 0x5A).collect();
        let bytes = build_minimal_avi(&movi);
        let avi = AviFile::from_bytes(&bytes).unwrap();
        assert_eq!(avi.movi(), &movi[..]);
        assert_eq!(avi.to_bytes(), bytes);
    }

    #[test]
    fn rewriting_movi_keeps_everything_else() {
        let bytes = build_minimal_avi(&[0u8; 100]);
        let mut avi = AviFile::from_bytes(&bytes).unwrap();
        avi.movi_mut().fill(0xFF);
        let out = avi.to_bytes();
        assert_eq!(out.len(), bytes.len());

        let start = out.len() - 100;
        assert_eq!(&out[..start], &bytes[..start], "bytes outside movi changed");
        assert!(out[start..].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn size_fields_are_patched() {
        let bytes = build_minimal_avi(&[7u8; 32]);
        let avi = AviFile::from_bytes(&bytes).unwrap();
        let out = avi.to_bytes();
        assert_eq!(
            LittleEndian::read_u32(&out[4..8]) as usize,
            out.len() - 8
        );
        let size_field = out.len() - 32 - 8;
        assert_eq!(LittleEndian::read_u32(&out[size_field..size_field + 4]), 36);
    }

    #[test]
    fn odd_sized_chunks_are_padded_when_skipped() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(b"AVI ");
        // odd-sized junk chunk followed by one pad byte
        bytes.extend_from_slice(b"JUNK");
        bytes.extend_from_slice(&3u32.to_le_bytes());
        bytes.extend_from_slice(&[1, 2, 3, 0]);
        bytes.extend_from_slice(b"LIST");
        bytes.extend_from_slice(&12u32.to_le_bytes());
        bytes.extend_from_slice(b"movi");
        bytes.extend_from_slice(&[9; 8]);

        let avi = AviFile::from_bytes(&bytes).unwrap();
        assert_eq!(avi.movi(), &[9; 8]);
    }

    #[test]
    fn rejects_non_riff() {
        assert!(matches!(
            AviFile::from_bytes(b"not a riff file, nope"),
            Err(StegoError::InvalidRiff)
        ));
    }

    #[test]
    fn rejects_wave_riff() {
        let bytes = crate::media::audio::wav::build_pcm8_mono(&[0; 8]);
        assert!(matches!(
            AviFile::from_bytes(&bytes),
            Err(StegoError::InvalidAvi)
        ));
    }

    #[test]
    fn missing_movi_fails() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(b"AVI ");
        assert!(matches!(
            AviFile::from_bytes(&bytes),
            Err(StegoError::MoviChunkNotFound)
        ));
    }

    #[test]
    fn empty_movi_fails() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(b"AVI ");
        bytes.extend_from_slice(b"LIST");
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(b"movi");
        assert!(matches!(
            AviFile::from_bytes(&bytes),
            Err(StegoError::MoviChunkNotFound)
        ));
    }
}
