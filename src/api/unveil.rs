use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::media::payload::file::{unwrap_file, FileMetadata};
use crate::media::{CodecOptions, Media};
use crate::result::Result;
use crate::StegoError;

/// Prepares the unveil API for further configuration
pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    seed: String,
    secret_media: Option<PathBuf>,
    options: CodecOptions,
}

impl UnveilApi {
    /// Use the given codec options; they must match the hiding side.
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// The seed string used when hiding. Image carriers cannot be decoded
    /// without it.
    pub fn with_seed(mut self, seed: &str) -> Self {
        self.seed = seed.to_string();
        self
    }

    /// This is the secret media that contains the data to be unveiled
    pub fn with_secret_media(mut self, secret_media: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_media.as_ref().to_path_buf());
        self
    }

    /// Execute the unveil process and return the recovered payload.
    pub fn execute(self) -> Result<Secret> {
        let Some(secret_media) = self.secret_media else {
            return Err(StegoError::CarrierNotSet);
        };
        let media = Media::from_file(&secret_media)?;
        let bytes = media.unveil_data(&self.seed, &self.options)?;
        Ok(Secret { bytes })
    }
}

/// A recovered payload, interpretable as raw bytes, text, or a wrapped file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret {
    bytes: Vec<u8>,
}

impl Secret {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Interprets the payload as UTF-8 text.
    pub fn into_text(self) -> Result<String> {
        Ok(String::from_utf8(self.bytes)?)
    }

    /// Interprets the payload as a wrapped file.
    pub fn into_file(self) -> Result<(FileMetadata, Vec<u8>)> {
        let (metadata, content) = unwrap_file(&self.bytes)?;
        Ok((metadata, content.to_vec()))
    }

    /// Writes a wrapped file payload into the folder under its original
    /// name, returning the path.
    pub fn write_to_folder(&self, folder: impl AsRef<Path>) -> Result<PathBuf> {
        let (metadata, content) = unwrap_file(&self.bytes)?;
        let file_name = Path::new(&metadata.file_name)
            .file_name()
            .ok_or(StegoError::InvalidFileName)?;
        let target = folder.as_ref().join(file_name);
        let mut file =
            File::create(&target).map_err(|source| StegoError::WriteError { source })?;
        file.write_all(content)
            .map_err(|source| StegoError::WriteError { source })?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_media_is_set() {
        assert!(matches!(
            prepare().execute().unwrap_err(),
            StegoError::CarrierNotSet
        ));
    }

    #[test]
    fn secret_text_decoding() {
        let secret = Secret {
            bytes: b"hello".to_vec(),
        };
        assert_eq!(secret.into_text().unwrap(), "hello");

        let secret = Secret {
            bytes: vec![0xFF, 0xFE],
        };
        assert!(matches!(
            secret.into_text(),
            Err(StegoError::InvalidTextData(_))
        ));
    }
}
