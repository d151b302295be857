//! The 8×8 binary block, its complexity measure and the conjugation
//! operator.
//!
//! A block is one 8×8 tile of a single bit plane of a single color
//! channel. Payload bits map into blocks row-major: stream position
//! `64k + 8r + c` is row `r`, column `c` of block `k`, with column 0 at
//! the most significant bit of each row byte. That layout makes a block
//! exactly 8 consecutive payload bytes, one byte per row.

/// Edge length of a block in pixels.
pub const BLOCK_SIZE: u32 = 8;

/// Maximum number of 4-neighbour bit transitions in a block:
/// 2 directions × 8 lines × 7 adjacent pairs. The complexity denominator
/// is normative; a different constant produces incompatible stego images.
pub const MAX_TRANSITIONS: u32 = 112;

/// Checkerboard rows for conjugation, (row + column) even set.
const CHECKER_EVEN: u8 = 0xAA;
const CHECKER_ODD: u8 = 0x55;

/// An 8×8 binary block; row `r` column `c` is bit `7 - c` of `rows[r]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitBlock {
    rows: [u8; 8],
}

impl BitBlock {
    pub fn from_rows(rows: [u8; 8]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> [u8; 8] {
        self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        (self.rows[row] >> (7 - col)) & 1 == 1
    }

    pub fn set(&mut self, row: usize, col: usize, bit: bool) {
        let mask = 1 << (7 - col);
        if bit {
            self.rows[row] |= mask;
        } else {
            self.rows[row] &= !mask;
        }
    }

    /// Complexity α: 4-neighbour bit transitions normalized to `[0, 1]`.
    ///
    /// `row ^ (row << 1)` lines up each bit with its right neighbour, so
    /// the top 7 bits of the xor are the horizontal transitions of that
    /// row; vertical transitions are the popcount of adjacent row xors.
    pub fn complexity(&self) -> f64 {
        let mut transitions = 0u32;
        for row in self.rows {
            transitions += ((row ^ (row << 1)) & 0xFE).count_ones();
        }
        for r in 0..7 {
            transitions += (self.rows[r] ^ self.rows[r + 1]).count_ones();
        }
        f64::from(transitions) / f64::from(MAX_TRANSITIONS)
    }

    /// The conjugate block: XOR with the checkerboard pattern.
    ///
    /// Conjugation is an involution and complements complexity, so any
    /// block has a representation on either side of a threshold below 0.5.
    pub fn conjugate(&self) -> Self {
        let mut rows = self.rows;
        for (r, row) in rows.iter_mut().enumerate() {
            *row ^= if r % 2 == 0 { CHECKER_EVEN } else { CHECKER_ODD };
        }
        Self { rows }
    }
}

/// Packs a byte stream into blocks, 8 bytes per block, the last block
/// zero-padded.
pub fn blocks_from_bytes(data: &[u8]) -> Vec<BitBlock> {
    data.chunks(8)
        .map(|chunk| {
            let mut rows = [0u8; 8];
            rows[..chunk.len()].copy_from_slice(chunk);
            BitBlock::from_rows(rows)
        })
        .collect()
}

/// Unpacks blocks back into the byte stream, including any padding bytes.
pub fn bytes_from_blocks(blocks: &[BitBlock]) -> Vec<u8> {
    let mut data = Vec::with_capacity(blocks.len() * 8);
    for block in blocks {
        data.extend_from_slice(&block.rows());
    }
    data
}
