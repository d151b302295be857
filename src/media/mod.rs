pub mod audio;
pub mod codec_options;
pub mod image;
pub mod payload;
pub mod sample_lsb;
pub mod types;
pub mod video;

use std::path::Path;

pub use codec_options::{BpcsOptions, CodecOptions, LsbOptions};
pub use types::Media;

/// Anything that can write itself to a file.
pub trait Persist {
    fn save_as(&self, target: &Path) -> crate::Result<()>;
}
