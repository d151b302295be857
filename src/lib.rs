//! # stegmedia
//!
//! Hides arbitrary byte payloads in cover media and recovers them exactly,
//! given the seed string used for hiding:
//!
//! - **PNG/JPEG images** via keyed multi-bit LSB ([`media::image::lsb_codec`])
//!   or Bit-Plane Complexity Segmentation ([`media::image::bpcs`]); output is
//!   always PNG.
//! - **WAV audio** and **AVI video** via a byte-granular LSB codec over the
//!   `data` / `movi` chunk ([`media::sample_lsb`]); every byte outside the
//!   rewritten chunk payload is preserved exactly.
//!
//! The seed keys only *where* payload bits live (see [`permutation`]); it is
//! not encryption. Confidentiality has to be layered on top by encrypting
//! the payload before hiding it. None of the codecs survive lossy
//! re-encoding; stego media must be stored and transported byte-exact.
//!
//! # Usage Examples
//!
//! ## Hide a message inside an image
//!
//! ```rust
//! use stegmedia::{CodecOptions, Media, Persist};
//!
//! let mut media = Media::Image(image::RgbaImage::from_fn(64, 64, |x, y| {
//!     image::Rgba([(x * 5) as u8, (y * 3) as u8, (x + y) as u8, 255])
//! }));
//!
//! let seed = media
//!     .hide_data(b"Hello, World!", "super-secret", &CodecOptions::default())
//!     .expect("Failed to hide message");
//!
//! let unveiled = media
//!     .unveil_data("super-secret", &CodecOptions::default())
//!     .expect("Failed to unveil message");
//! assert_eq!(unveiled, b"Hello, World!");
//! ```
//!
//! ## File-based round trip
//!
//! ```no_run
//! let seed = stegmedia::api::hide::prepare()
//!     .with_seed("42")
//!     .with_file("Cargo.toml")
//!     .with_media("carrier.png")
//!     .with_output("carrier-with-file.png")
//!     .execute()
//!     .expect("Failed to hide file in image");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod error;
pub mod media;
pub mod permutation;
pub mod result;
pub mod seed;

pub use error::StegoError;
pub use media::codec_options::{BpcsOptions, CodecOptions, LsbOptions};
pub use media::types::Media;
pub use media::Persist;
pub use result::Result;
pub use seed::Seed;
