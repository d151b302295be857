//! Codec configuration.
//!
//! The codec choice determines both the embedding method AND the output
//! format: image codecs emit PNG, the sample codec rewrites the carrier
//! container in place. WAV and AVI carriers always use the sample codec,
//! so for them the options only matter when they wrongly name an image
//! codec.

use crate::media::image::bpcs;

/// Codec selection plus its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CodecOptions {
    /// Multi-bit LSB in the RGB channels, PNG output.
    ImageLsb(LsbOptions),
    /// Bit-plane complexity segmentation, PNG output.
    ImageBpcs(BpcsOptions),
    /// One bit per sample byte, for WAV and AVI carriers.
    SampleLsb,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self::ImageLsb(LsbOptions::default())
    }
}

/// Options for the LSB image codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LsbOptions {
    /// How many low bits of each color channel carry payload (1-3).
    /// More bits mean more capacity and more visible noise.
    pub bits_per_channel: u8,
}

impl Default for LsbOptions {
    fn default() -> Self {
        Self {
            bits_per_channel: 1,
        }
    }
}

/// Options for the BPCS image codec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BpcsOptions {
    /// Complexity threshold in `[0.3, 0.5]`; out-of-range values are
    /// normalized to the default rather than rejected.
    pub threshold: f64,
}

impl Default for BpcsOptions {
    fn default() -> Self {
        Self {
            threshold: bpcs::DEFAULT_THRESHOLD,
        }
    }
}
