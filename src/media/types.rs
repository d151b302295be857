//! The media container and its codec dispatch.

use std::path::Path;

use image::RgbaImage;

use crate::error::StegoError;
use crate::media::audio::WavFile;
use crate::media::codec_options::CodecOptions;
use crate::media::image as stego_image;
use crate::media::sample_lsb;
use crate::media::video::AviFile;
use crate::media::Persist;
use crate::result::Result;
use crate::seed::Seed;

/// A carrier for steganography.
pub enum Media {
    Image(RgbaImage),
    Audio(WavFile),
    Video(AviFile),
}

impl Media {
    /// Loads a carrier, dispatching on the file extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Err(StegoError::UnsupportedMedia);
        };
        match ext.to_lowercase().as_str() {
            "png" | "jpg" | "jpeg" => Ok(Self::Image(stego_image::read_rgba(path)?)),
            "wav" => {
                let bytes = std::fs::read(path).map_err(|source| StegoError::ReadError { source })?;
                Ok(Self::Audio(WavFile::from_bytes(&bytes)?))
            }
            "avi" => {
                let bytes = std::fs::read(path).map_err(|source| StegoError::ReadError { source })?;
                Ok(Self::Video(AviFile::from_bytes(&bytes)?))
            }
            _ => Err(StegoError::UnsupportedMedia),
        }
    }

    /// Loads a carrier from memory, sniffing the magic bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" {
            return match &bytes[8..12] {
                b"WAVE" => Ok(Self::Audio(WavFile::from_bytes(bytes)?)),
                b"AVI " => Ok(Self::Video(AviFile::from_bytes(bytes)?)),
                _ => Err(StegoError::UnsupportedMedia),
            };
        }
        Ok(Self::Image(stego_image::rgba_from_bytes(bytes)?))
    }

    /// Hides `data` in the carrier and returns the effective seed.
    ///
    /// The seed string is normalized per medium: image carriers replace an
    /// empty string with a fresh random seed (record the returned value!),
    /// WAV and AVI carriers fall back to sequential order.
    pub fn hide_data(&mut self, data: &[u8], seed: &str, options: &CodecOptions) -> Result<Seed> {
        match self {
            Media::Image(image) => {
                let seed = Seed::parse_or_random(seed);
                match options {
                    CodecOptions::ImageLsb(opts) => {
                        stego_image::lsb_codec::encode(image, data, seed, opts.bits_per_channel)?
                    }
                    CodecOptions::ImageBpcs(opts) => {
                        stego_image::bpcs::encode(image, data, seed, opts.threshold)?
                    }
                    CodecOptions::SampleLsb => return Err(StegoError::OptionsMismatch),
                }
                Ok(seed)
            }
            Media::Audio(wav) => {
                let seed = Seed::parse_or_sequential(seed);
                sample_lsb::encode(wav.samples_mut(), data, seed)?;
                Ok(seed)
            }
            Media::Video(avi) => {
                let seed = Seed::parse_or_sequential(seed);
                sample_lsb::encode(avi.movi_mut(), data, seed)?;
                Ok(seed)
            }
        }
    }

    /// Recovers hidden data from the carrier.
    ///
    /// Image carriers require the exact seed string used for hiding; an
    /// empty seed is an error because the positions cannot be guessed.
    pub fn unveil_data(&self, seed: &str, options: &CodecOptions) -> Result<Vec<u8>> {
        match self {
            Media::Image(image) => {
                let seed = Seed::parse(seed).ok_or(StegoError::SeedRequired)?;
                match options {
                    CodecOptions::ImageLsb(opts) => {
                        stego_image::lsb_codec::decode(image, seed, opts.bits_per_channel)
                    }
                    CodecOptions::ImageBpcs(opts) => {
                        stego_image::bpcs::decode(image, seed, opts.threshold)
                    }
                    CodecOptions::SampleLsb => Err(StegoError::OptionsMismatch),
                }
            }
            Media::Audio(wav) => {
                sample_lsb::decode(wav.samples(), Seed::parse_or_sequential(seed))
            }
            Media::Video(avi) => sample_lsb::decode(avi.movi(), Seed::parse_or_sequential(seed)),
        }
    }

    /// Serializes the carrier: PNG for images, the patched container for
    /// WAV and AVI.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Media::Image(image) => stego_image::png_bytes(image),
            Media::Audio(wav) => Ok(wav.to_bytes()),
            Media::Video(avi) => Ok(avi.to_bytes()),
        }
    }
}

impl Persist for Media {
    fn save_as(&self, target: &Path) -> Result<()> {
        match self {
            Media::Image(image) => stego_image::write_png(image, target),
            Media::Audio(_) | Media::Video(_) => {
                std::fs::write(target, self.to_bytes()?)
                    .map_err(|source| StegoError::WriteError { source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::audio::wav::build_pcm8_mono;
    use crate::media::video::avi::build_minimal_avi;

    #[test]
    fn sniffs_riff_carriers() {
        let wav = build_pcm8_mono(&[0; 64]);
        assert!(matches!(Media::from_bytes(&wav), Ok(Media::Audio(_))));

        let avi = build_minimal_avi(&[0; 64]);
        assert!(matches!(Media::from_bytes(&avi), Ok(Media::Video(_))));
    }

    #[test]
    fn sniffs_png_carriers() {
        let image = RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 4]));
        let png = stego_image::png_bytes(&image).unwrap();
        assert!(matches!(Media::from_bytes(&png), Ok(Media::Image(_))));
    }

    #[test]
    fn unknown_riff_form_is_unsupported() {
        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(b"ACON");
        assert!(matches!(
            Media::from_bytes(&bytes),
            Err(StegoError::UnsupportedMedia)
        ));
    }

    #[test]
    fn image_codec_on_audio_is_fine_but_sample_codec_on_image_is_not() {
        let mut media = Media::Image(RgbaImage::from_pixel(32, 32, image::Rgba([7; 4])));
        assert!(matches!(
            media.hide_data(b"x", "1", &CodecOptions::SampleLsb),
            Err(StegoError::OptionsMismatch)
        ));

        // audio ignores the codec selection, there is only one sample codec
        let mut media = Media::Audio(WavFile::from_bytes(&build_pcm8_mono(&[0x80; 256])).unwrap());
        media
            .hide_data(b"ok", "1", &CodecOptions::default())
            .unwrap();
        assert_eq!(
            media.unveil_data("1", &CodecOptions::default()).unwrap(),
            b"ok"
        );
    }

    #[test]
    fn image_unveil_requires_a_seed() {
        let media = Media::Image(RgbaImage::from_pixel(16, 16, image::Rgba([7; 4])));
        assert!(matches!(
            media.unveil_data("", &CodecOptions::default()),
            Err(StegoError::SeedRequired)
        ));
    }
}
