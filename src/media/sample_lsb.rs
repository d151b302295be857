//! Keyed least-significant-bit codec for time-sample carriers.
//!
//! Used for both WAV sample bytes and the AVI movi stream; the container
//! framing differs, the embedding does not. One payload bit replaces the
//! LSB of one carrier byte; the bytes are visited in the keyed
//! distinct-index order, or front to back when the seed is sequential.
//!
//! The decoder first draws 32 indices to recover the length word, then
//! re-derives the full-length index sequence under the same seed. The
//! permutation's prefix law guarantees the first 32 indices of the longer
//! draw match the shorter one.

use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader};

use crate::error::StegoError;
use crate::media::payload;
use crate::permutation::sample_indices;
use crate::result::Result;
use crate::seed::Seed;

/// Payload capacity in bytes: one bit per sample byte, minus the length
/// prefix. Negative when the carrier cannot hold the prefix.
pub fn capacity(samples_len: usize) -> i64 {
    samples_len as i64 / 8 - 4
}

/// Hides the payload in the LSBs of the sample bytes.
pub fn encode(samples: &mut [u8], data: &[u8], seed: Seed) -> Result<()> {
    if data.len() as u64 > u64::from(u32::MAX) {
        return Err(StegoError::CapacityExceeded);
    }
    let framed = payload::frame(data);
    let total_bits = framed.len() * 8;
    if total_bits > samples.len() {
        return Err(StegoError::CapacityExceeded);
    }

    let indices = sample_indices(samples.len(), total_bits, seed)?;
    let mut reader = BitReader::endian(Cursor::new(&framed), BigEndian);
    for &index in &indices {
        let bit = reader.read_bit()?;
        let sample = samples
            .get_mut(index)
            .ok_or(StegoError::IndexOutOfBounds)?;
        *sample = (*sample & 0xFE) | u8::from(bit);
    }
    Ok(())
}

/// Recovers a payload hidden by [`encode`] under the same seed.
pub fn decode(samples: &[u8], seed: Seed) -> Result<Vec<u8>> {
    if samples.len() < 32 {
        return Err(StegoError::DecodeTruncated);
    }

    let header = sample_indices(samples.len(), 32, seed)?;
    let mut length_bytes = [0u8; 4];
    for (i, &index) in header.iter().enumerate() {
        let bit = samples.get(index).ok_or(StegoError::IndexOutOfBounds)? & 1;
        length_bytes[i / 8] |= bit << (7 - (i % 8));
    }
    let declared = u32::from_be_bytes(length_bytes);

    let total_bits = (4 + u64::from(declared)) * 8;
    if total_bits > samples.len() as u64 {
        return Err(StegoError::InvalidLength);
    }

    let indices = sample_indices(samples.len(), total_bits as usize, seed)?;
    let mut data = vec![0u8; declared as usize];
    for (i, &index) in indices.iter().enumerate().skip(32) {
        let bit = samples.get(index).ok_or(StegoError::IndexOutOfBounds)? & 1;
        let position = i - 32;
        data[position / 8] |= bit << (7 - (position % 8));
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carrier(len: usize, rng_seed: u64) -> Vec<u8> {
        let mut rng = fastrand::Rng::with_seed(rng_seed);
        (0..len).map(|_| rng.u8(..)).collect()
    }

    #[test]
    fn roundtrip_keyed() {
        let mut samples = carrier(4096, 1);
        let message = b"50 byte message padded to something realistic ....".to_vec();
        encode(&mut samples, &message, Seed::parse("k").unwrap()).unwrap();
        assert_eq!(decode(&samples, Seed::parse("k").unwrap()).unwrap(), message);
    }

    #[test]
    fn roundtrip_sequential() {
        let mut samples = carrier(2048, 2);
        encode(&mut samples, b"in order", Seed::sequential()).unwrap();
        assert_eq!(decode(&samples, Seed::sequential()).unwrap(), b"in order");
        // sequential embedding touches exactly the first (4 + n) * 8 bytes
        let framed_bits = (4 + 8) * 8;
        let fresh = carrier(2048, 2);
        assert_eq!(&samples[framed_bits..], &fresh[framed_bits..]);
    }

    #[test]
    fn roundtrip_empty_payload() {
        let mut samples = carrier(64, 3);
        encode(&mut samples, &[], Seed::from(12)).unwrap();
        assert_eq!(decode(&samples, Seed::from(12)).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn capacity_boundary() {
        // 512 sample bytes hold (512 - 32) / 8 = 60 payload bytes
        assert_eq!(capacity(512), 60);
        let mut samples = carrier(512, 4);
        encode(&mut samples, &[0x77; 60], Seed::from(5)).unwrap();
        assert_eq!(decode(&samples, Seed::from(5)).unwrap(), vec![0x77; 60]);

        let mut samples = carrier(512, 4);
        assert!(matches!(
            encode(&mut samples, &[0x77; 61], Seed::from(5)),
            Err(StegoError::CapacityExceeded)
        ));
    }

    #[test]
    fn only_lsbs_change() {
        let original = carrier(1024, 6);
        let mut stego = original.clone();
        encode(&mut stego, &[0b1010_1010; 32], Seed::from(9)).unwrap();
        for (before, after) in original.iter().zip(stego.iter()) {
            assert_eq!(before >> 1, after >> 1);
        }
    }

    #[test]
    fn wrong_seed_reads_garbage_or_fails() {
        let mut samples = carrier(4096, 7);
        let message = b"keyed positions".to_vec();
        encode(&mut samples, &message, Seed::from(1000)).unwrap();
        match decode(&samples, Seed::from(1001)) {
            Ok(other) => assert_ne!(other, message),
            Err(_) => {}
        }
    }

    #[test]
    fn implausible_length_is_rejected() {
        // all-ones LSBs decode to a length of u32::MAX
        let samples = vec![0xFFu8; 256];
        assert!(matches!(
            decode(&samples, Seed::sequential()),
            Err(StegoError::InvalidLength)
        ));
    }

    #[test]
    fn short_carrier_is_rejected() {
        assert!(matches!(
            decode(&[0u8; 16], Seed::from(1)),
            Err(StegoError::DecodeTruncated)
        ));
    }
}
