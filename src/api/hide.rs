use std::path::{Path, PathBuf};

use crate::media::payload::file::wrap_file;
use crate::media::{CodecOptions, Media, Persist};
use crate::result::Result;
use crate::seed::Seed;
use crate::StegoError;

/// Prepares the hide API for further configuration
pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Default, Debug)]
pub struct HideApi {
    seed: String,
    message: Option<String>,
    file: Option<PathBuf>,
    media: Option<PathBuf>,
    output: Option<PathBuf>,
    options: CodecOptions,
}

impl HideApi {
    /// Use the given codec options
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// The seed string keying the embedding positions. Leave unset (or
    /// empty) on an image carrier to get a fresh random seed back from
    /// [`execute`](Self::execute); WAV and AVI carriers fall back to
    /// sequential order instead.
    pub fn with_seed(mut self, seed: &str) -> Self {
        self.seed = seed.to_string();
        self
    }

    /// This is the message that will be hidden
    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    /// This is the file that will be hidden, wrapped with its metadata
    /// header. Takes precedence over a message.
    pub fn with_file<A: AsRef<Path>>(mut self, data_file: A) -> Self {
        self.file = Some(data_file.as_ref().to_path_buf());
        self
    }

    /// This is the carrier media (PNG/JPEG image, WAV audio or AVI video)
    pub fn with_media<A: AsRef<Path>>(mut self, media: A) -> Self {
        self.media = Some(media.as_ref().to_path_buf());
        self
    }

    /// This is the output media
    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Execute the hiding process and return the effective seed.
    pub fn execute(self) -> Result<Seed> {
        let payload = self.payload()?;
        let Some(media_path) = self.media else {
            return Err(StegoError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(StegoError::TargetNotSet);
        };

        let mut media = Media::from_file(&media_path)?;
        let seed = media.hide_data(&payload, &self.seed, &self.options)?;
        media.save_as(&output)?;
        Ok(seed)
    }

    fn payload(&self) -> Result<Vec<u8>> {
        if let Some(file) = &self.file {
            let content =
                std::fs::read(file).map_err(|source| StegoError::ReadError { source })?;
            let name = file
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or(StegoError::InvalidFileName)?;
            let ext = file
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| format!(".{e}"))
                .unwrap_or_default();
            return wrap_file(name, &ext, &content);
        }
        if let Some(message) = &self.message {
            return Ok(message.clone().into_bytes());
        }
        Err(StegoError::MissingPayload)
    }
}
