//! Video carrier support.

pub mod avi;

pub use avi::AviFile;
