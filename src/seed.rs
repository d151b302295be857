//! Seed string normalization.
//!
//! A seed is a user supplied string that keys the position permutation. It is
//! normalized to a signed 64-bit value: a string that parses as a decimal
//! integer is taken verbatim, anything else is folded with the multiply-by-31
//! byte hash. The empty string is policy dependent: image codecs generate a
//! fresh random seed (which the caller must record), the time-sample codecs
//! fall back to sequential order.
//!
//! Encode and decode must use byte-equal seed strings, otherwise the decoder
//! walks different positions and unveils noise.

use log::warn;
use rand::rngs::OsRng;
use rand::RngCore;

/// Sentinel value selecting sequential (unshuffled) position order.
const SEQUENTIAL: i64 = -1;

/// A normalized position-permutation key.
///
/// Any negative value selects sequential order; this covers the explicit
/// `"-1"` seed, the empty-string sentinel of the time-sample codecs, and
/// long non-numeric strings whose byte hash wraps negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed(i64);

impl Seed {
    /// Normalizes a non-empty seed string, `None` for the empty string.
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() {
            return None;
        }
        Some(Self(
            s.parse::<i64>().unwrap_or_else(|_| hash_bytes(s.as_bytes())),
        ))
    }

    /// Normalizes a seed string, treating the empty string as sequential
    /// order. This is the policy of the WAV and AVI codecs.
    pub fn parse_or_sequential(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self(SEQUENTIAL))
    }

    /// Normalizes a seed string, replacing the empty string with a fresh
    /// random seed. This is the policy of the image codecs; the generated
    /// seed is returned from every encode entry point and must be recorded
    /// by the caller, without it the payload positions cannot be recovered.
    pub fn parse_or_random(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(Self::random)
    }

    /// A fresh non-negative seed from the OS random number generator.
    pub fn random() -> Self {
        let value = (OsRng.next_u64() >> 1) as i64;
        warn!("empty seed: generated {value}, decoding requires this exact seed");
        Self(value)
    }

    /// The sequential-order sentinel.
    pub fn sequential() -> Self {
        Self(SEQUENTIAL)
    }

    /// True when this seed selects sequential (unshuffled) position order.
    pub fn is_sequential(&self) -> bool {
        self.0 < 0
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// `h = 31*h + b` over the bytes, wrapping signed 64-bit arithmetic.
fn hash_bytes(bytes: &[u8]) -> i64 {
    bytes.iter().fold(0i64, |h, &b| {
        h.wrapping_mul(31).wrapping_add(i64::from(b))
    })
}
