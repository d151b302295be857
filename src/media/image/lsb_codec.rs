//! Keyed least-significant-bit image codec.
//!
//! The payload is framed and spread over the low bits of the RGB channels,
//! visiting pixels in the keyed Fisher-Yates order. Each channel takes
//! `bits_per_channel` consecutive bits of the MSB-first payload stream in
//! the order R, G, B; which pixels stay untouched after the stream is
//! exhausted depends on the seed, so the payload boundary is not visible.
//! Alpha never carries data.

use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader};
use image::RgbaImage;

use crate::error::StegoError;
use crate::media::payload;
use crate::permutation::shuffled_order;
use crate::result::Result;
use crate::seed::Seed;

/// Lowest accepted bit depth per channel.
pub const MIN_BITS_PER_CHANNEL: u8 = 1;
/// Highest accepted bit depth per channel; more would show.
pub const MAX_BITS_PER_CHANNEL: u8 = 3;

fn validate_bits(bits: u8) -> Result<()> {
    if !(MIN_BITS_PER_CHANNEL..=MAX_BITS_PER_CHANNEL).contains(&bits) {
        return Err(StegoError::InvalidBitsPerChannel(bits));
    }
    Ok(())
}

/// Payload capacity in bytes; negative when the carrier cannot even hold
/// the length prefix.
pub fn capacity(width: u32, height: u32, bits: u8) -> i64 {
    i64::from(width) * i64::from(height) * 3 * i64::from(bits) / 8 - 4
}

/// Hides the payload in the low `bits` bits of the RGB channels.
pub fn encode(image: &mut RgbaImage, data: &[u8], seed: Seed, bits: u8) -> Result<()> {
    validate_bits(bits)?;
    let (width, height) = image.dimensions();
    if data.len() as u64 > u64::from(u32::MAX)
        || data.len() as i64 > capacity(width, height, bits)
    {
        return Err(StegoError::CapacityExceeded);
    }

    let framed = payload::frame(data);
    let total_bits = framed.len() as u64 * 8;
    let order = shuffled_order(width as usize * height as usize, seed);

    let bits = u32::from(bits);
    let clear_mask = !(((1u8) << bits) - 1);
    let mut reader = BitReader::endian(Cursor::new(&framed), BigEndian);
    let mut consumed: u64 = 0;

    'pixels: for &pixel_index in &order {
        let x = (pixel_index as u64 % u64::from(width)) as u32;
        let y = (pixel_index as u64 / u64::from(width)) as u32;
        let pixel = image.get_pixel_mut(x, y);
        for channel in 0..3 {
            if consumed == total_bits {
                break 'pixels;
            }
            // a final partial field is high-aligned and zero-filled
            let take = bits.min((total_bits - consumed) as u32);
            let field = reader.read::<u8>(take)? << (bits - take);
            pixel[channel] = (pixel[channel] & clear_mask) | field;
            consumed += u64::from(take);
        }
    }
    Ok(())
}

/// Recovers a payload hidden by [`encode`] under the same seed and bit depth.
pub fn decode(image: &RgbaImage, seed: Seed, bits: u8) -> Result<Vec<u8>> {
    validate_bits(bits)?;
    let (width, height) = image.dimensions();
    let order = shuffled_order(width as usize * height as usize, seed);

    let bits = u32::from(bits);
    let field_mask = (1u8 << bits) - 1;
    let mut collected: Vec<u8> = Vec::new();
    let mut acc: u16 = 0;
    let mut acc_bits: u32 = 0;
    let mut declared: Option<u64> = None;

    'pixels: for &pixel_index in &order {
        let x = (pixel_index as u64 % u64::from(width)) as u32;
        let y = (pixel_index as u64 / u64::from(width)) as u32;
        let pixel = image.get_pixel(x, y);
        for channel in 0..3 {
            acc = (acc << bits) | u16::from(pixel[channel] & field_mask);
            acc_bits += bits;
            if acc_bits >= 8 {
                acc_bits -= 8;
                collected.push((acc >> acc_bits) as u8);
                acc &= (1 << acc_bits) - 1;

                if declared.is_none() && collected.len() >= 4 {
                    declared = Some(u64::from(u32::from_be_bytes([
                        collected[0],
                        collected[1],
                        collected[2],
                        collected[3],
                    ])));
                }
                if let Some(n) = declared {
                    if collected.len() as u64 >= 4 + n {
                        break 'pixels;
                    }
                }
            }
        }
    }

    let Some(declared) = declared else {
        return Err(StegoError::DecodeTruncated);
    };
    if (collected.len() as u64) < 4 + declared {
        return Err(StegoError::DecodeTruncated);
    }
    collected.truncate(4 + declared as usize);
    Ok(payload::unframe(&collected)?.to_vec())
}
