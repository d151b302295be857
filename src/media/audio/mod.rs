//! Audio carrier support.

pub mod wav;

pub use wav::WavFile;
