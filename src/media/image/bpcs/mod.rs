//! Bit-Plane Complexity Segmentation codec.
//!
//! The carrier is sliced into 8×8 blocks per bit plane and color channel;
//! blocks that look like noise (complexity above the threshold) are wholly
//! replaced with payload blocks. Payload blocks that are not noisy enough
//! themselves are conjugated first, and the conjugation flags are embedded
//! after the payload so the decoder can undo it.
//!
//! Traversal is wire format: bit planes `0..=5` outermost (the top two
//! planes stay untouched to keep changes invisible), then the keyed
//! shuffle of the block grid, then the channels R, G, B. Edge tiles that
//! do not fill a full 8×8 block never carry data.
//!
//! Two fixed rules keep the decoder's complexity gate sound:
//! conjugation-map blocks are always stored conjugated (a sparse flag
//! bitmap packs to a near-flat block that would otherwise fall below the
//! gate), and the first payload block's conjugation state is readable from
//! its stored bit (0,0). That bit is the most significant bit of the
//! length prefix, which is always 0 on the wire, so the decoder can
//! recover the payload length before it has seen the map.

mod block;

pub use block::{blocks_from_bytes, bytes_from_blocks, BitBlock, BLOCK_SIZE, MAX_TRANSITIONS};

use image::RgbaImage;
use log::warn;

use crate::error::StegoError;
use crate::media::payload;
use crate::permutation::shuffled_order;
use crate::result::Result;
use crate::seed::Seed;

/// Default complexity threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.45;
/// Lowest accepted complexity threshold.
pub const MIN_THRESHOLD: f64 = 0.3;
/// Highest accepted complexity threshold.
pub const MAX_THRESHOLD: f64 = 0.5;

/// Bit planes that carry payload.
const PLANES: std::ops::Range<u8> = 0..6;
/// Color channels in embedding order.
const CHANNELS: [usize; 3] = [0, 1, 2];

/// Clamps an out-of-range threshold to the default instead of rejecting it.
pub fn normalize_threshold(threshold: f64) -> f64 {
    if (MIN_THRESHOLD..=MAX_THRESHOLD).contains(&threshold) {
        threshold
    } else {
        warn!("complexity threshold {threshold} outside [{MIN_THRESHOLD}, {MAX_THRESHOLD}], using {DEFAULT_THRESHOLD}");
        DEFAULT_THRESHOLD
    }
}

/// Top-left pixel coordinates of the full blocks, in keyed order.
fn block_walk(image: &RgbaImage, seed: Seed) -> Vec<(u32, u32)> {
    let blocks_x = image.width() / BLOCK_SIZE;
    let blocks_y = image.height() / BLOCK_SIZE;
    let count = (blocks_x as usize) * (blocks_y as usize);
    shuffled_order(count, seed)
        .into_iter()
        .map(|i| {
            let bx = (i as u32) % blocks_x;
            let by = (i as u32) / blocks_x;
            (bx * BLOCK_SIZE, by * BLOCK_SIZE)
        })
        .collect()
}

fn extract_block(image: &RgbaImage, x0: u32, y0: u32, plane: u8, channel: usize) -> BitBlock {
    let mut rows = [0u8; 8];
    for (r, row) in rows.iter_mut().enumerate() {
        for c in 0..8u32 {
            let value = image.get_pixel(x0 + c, y0 + r as u32)[channel];
            *row |= ((value >> plane) & 1) << (7 - c);
        }
    }
    BitBlock::from_rows(rows)
}

fn embed_block(
    image: &mut RgbaImage,
    x0: u32,
    y0: u32,
    plane: u8,
    channel: usize,
    block: &BitBlock,
) {
    let mask = !(1u8 << plane);
    for r in 0..8usize {
        for c in 0..8u32 {
            let pixel = image.get_pixel_mut(x0 + c, y0 + r as u32);
            pixel[channel] =
                (pixel[channel] & mask) | (u8::from(block.get(r, c as usize)) << plane);
        }
    }
}

/// Packs one flag per payload block into bytes, MSB first.
fn pack_conjugation_map(flags: &[bool]) -> Vec<u8> {
    let mut bitmap = vec![0u8; flags.len().div_ceil(8)];
    for (i, &flag) in flags.iter().enumerate() {
        if flag {
            bitmap[i / 8] |= 1 << (7 - (i % 8));
        }
    }
    bitmap
}

/// Block counts implied by a declared payload length.
fn block_counts(declared: usize) -> (usize, usize) {
    let payload_blocks = ((4 + declared as u64) * 8).div_ceil(64) as usize;
    let bitmap_bytes = payload_blocks.div_ceil(8);
    let map_blocks = (bitmap_bytes * 8).div_ceil(64);
    (payload_blocks, map_blocks)
}

/// Hides the payload in the noisy blocks of the carrier.
///
/// Fails with [`StegoError::CapacityExceeded`] when the carrier runs out of
/// blocks above the threshold before everything is placed. The raster may
/// already hold part of the payload at that point; discard it on failure.
pub fn encode(image: &mut RgbaImage, data: &[u8], seed: Seed, threshold: f64) -> Result<()> {
    let threshold = normalize_threshold(threshold);
    // the top bit of the length word is reserved as the first block's
    // conjugation indicator
    if data.len() as u64 >= 1 << 31 {
        return Err(StegoError::CapacityExceeded);
    }
    let framed = payload::frame(data);

    let mut queue = blocks_from_bytes(&framed);
    let mut flags = vec![false; queue.len()];
    for (block, flag) in queue.iter_mut().zip(flags.iter_mut()) {
        if block.complexity() <= threshold {
            *block = block.conjugate();
            *flag = true;
        }
        if block.complexity() <= threshold {
            // neither representation clears the gate, only possible at θ = 0.5
            return Err(StegoError::CapacityExceeded);
        }
    }

    let bitmap = pack_conjugation_map(&flags);
    for raw in blocks_from_bytes(&bitmap) {
        let stored = raw.conjugate();
        if stored.complexity() <= threshold {
            return Err(StegoError::CapacityExceeded);
        }
        queue.push(stored);
    }

    let walk = block_walk(image, seed);
    let mut cursor = 0;
    'slots: for plane in PLANES {
        for &(x0, y0) in &walk {
            for channel in CHANNELS {
                if cursor == queue.len() {
                    break 'slots;
                }
                if extract_block(image, x0, y0, plane, channel).complexity() > threshold {
                    embed_block(image, x0, y0, plane, channel, &queue[cursor]);
                    cursor += 1;
                }
            }
        }
    }
    if cursor < queue.len() {
        return Err(StegoError::CapacityExceeded);
    }
    Ok(())
}

/// Recovers a payload hidden by [`encode`] under the same seed and threshold.
pub fn decode(image: &RgbaImage, seed: Seed, threshold: f64) -> Result<Vec<u8>> {
    let threshold = normalize_threshold(threshold);
    let walk = block_walk(image, seed);

    let mut collected: Vec<BitBlock> = Vec::new();
    let mut needed: Option<(usize, usize)> = None;
    'slots: for plane in PLANES {
        for &(x0, y0) in &walk {
            for channel in CHANNELS {
                let block = extract_block(image, x0, y0, plane, channel);
                if block.complexity() > threshold {
                    collected.push(block);
                }
                if needed.is_none() {
                    if let Some(first) = collected.first() {
                        // bit (0,0) is the MSB of the length word, 0 on the
                        // wire, so a set bit means the block is conjugated
                        let first = if first.get(0, 0) {
                            first.conjugate()
                        } else {
                            *first
                        };
                        let rows = first.rows();
                        let declared =
                            u32::from_be_bytes([rows[0], rows[1], rows[2], rows[3]]) as usize;
                        needed = Some(block_counts(declared));
                    }
                }
                if let Some((payload_blocks, map_blocks)) = needed {
                    if collected.len() >= payload_blocks + map_blocks {
                        break 'slots;
                    }
                }
            }
        }
    }

    let Some((payload_blocks, map_blocks)) = needed else {
        return Err(StegoError::DecodeTruncated);
    };
    if collected.len() < payload_blocks + map_blocks {
        return Err(StegoError::DecodeTruncated);
    }
    collected.truncate(payload_blocks + map_blocks);

    let map: Vec<BitBlock> = collected
        .split_off(payload_blocks)
        .iter()
        .map(BitBlock::conjugate)
        .collect();
    let bitmap = bytes_from_blocks(&map);
    for (i, block) in collected.iter_mut().enumerate() {
        if (bitmap[i / 8] >> (7 - (i % 8))) & 1 == 1 {
            *block = block.conjugate();
        }
    }

    let stream = bytes_from_blocks(&collected);
    Ok(payload::unframe(&stream)?.to_vec())
}
