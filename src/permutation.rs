//! Keyed position permutation.
//!
//! Both sides of a transmission must walk carrier positions in the same
//! order, so the generator is part of the wire format: positions are drawn
//! from `fastrand`'s wyrand generator seeded with the i64 seed reinterpreted
//! as u64 (position-format version 1). Swapping the generator, or the width
//! of the range draws, breaks every existing stego file.
//!
//! # Cross-platform portability
//!
//! All range draws use the `u64` primitives, never `usize`. A `usize` draw
//! consumes different amounts of generator state on 32-bit targets, which
//! silently produces a different permutation for the same seed.

use crate::error::StegoError;
use crate::result::Result;
use crate::seed::Seed;

/// Version tag of the position-selection scheme described in the module docs.
pub const POSITION_FORMAT_VERSION: u8 = 1;

fn rng_for(seed: Seed) -> fastrand::Rng {
    fastrand::Rng::with_seed(seed.value() as u64)
}

/// Every index `0..n` in keyed order.
///
/// Sequential seeds return the identity order; anything else is a full
/// Fisher-Yates shuffle. This is the canonical traversal for the LSB image
/// pixel walk and the BPCS block walk.
pub fn shuffled_order(n: usize, seed: Seed) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    if seed.is_sequential() {
        return order;
    }
    let mut rng = rng_for(seed);
    for i in (1..n).rev() {
        let j = rng.u64(0..=i as u64) as usize;
        order.swap(i, j);
    }
    order
}

/// The first `k` positions of the keyed order over `[0, n)`.
///
/// Sequential seeds yield `i mod n`. Otherwise `k` distinct indices are
/// drawn by rejection sampling, which fails with [`StegoError::CapacityExceeded`]
/// when `k > n`.
///
/// Prefix law: for a fixed `(n, seed)` the length-`k1` draw is a prefix of
/// every longer draw, because rejection sampling consumes the generator in
/// draw order only. The time-sample decoder re-derives its index sequence
/// at a larger `k` and relies on this.
pub fn sample_indices(n: usize, k: usize, seed: Seed) -> Result<Vec<usize>> {
    if k > 0 && n == 0 {
        return Err(StegoError::CapacityExceeded);
    }
    if seed.is_sequential() {
        return Ok((0..k).map(|i| i % n).collect());
    }
    if k > n {
        return Err(StegoError::CapacityExceeded);
    }
    let mut rng = rng_for(seed);
    let mut used = vec![false; n];
    let mut indices = Vec::with_capacity(k);
    while indices.len() < k {
        let idx = rng.u64(0..n as u64) as usize;
        if !used[idx] {
            used[idx] = true;
            indices.push(idx);
        }
    }
    Ok(indices)
}
